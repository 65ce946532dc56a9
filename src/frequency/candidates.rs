use super::table::{FrequencyEntry, FrequencyTable};

/// Entries at or below a frequency threshold, in table order
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet<'a> {
    entries: Vec<&'a FrequencyEntry>,
}

impl FrequencyTable {
    /// Every entry whose frequency is at or below `threshold`
    pub fn candidates(&self, threshold: f64) -> CandidateSet<'_> {
        CandidateSet {
            entries: self
                .entries()
                .iter()
                .filter(|e| e.frequency as f64 <= threshold)
                .collect(),
        }
    }
}

impl<'a> CandidateSet<'a> {
    /// Keep only the last `limit` entries in table order.
    ///
    /// Truncation is positional; entries are not re-ranked by frequency first.
    pub fn truncate_to(mut self, limit: usize) -> Self {
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
        }
        self
    }

    pub fn lowest_frequency(&self) -> Option<u64> {
        self.entries.iter().map(|e| e.frequency).min()
    }

    /// Entry closest in frequency to `indicator`. Ties go to the earliest entry.
    pub fn nearest(&self, indicator: f64) -> Option<&'a FrequencyEntry> {
        let distance = |e: &FrequencyEntry| (indicator - e.frequency as f64).abs();

        self.entries
            .iter()
            .copied()
            .reduce(|acc, e| if distance(e) < distance(acc) { e } else { acc })
    }

    pub fn entries(&self) -> &[&'a FrequencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, character: &str) -> bool {
        self.entries.iter().any(|e| e.character == character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_table() -> FrequencyTable {
        FrequencyTable::from_pairs([("A", 1), ("B", 5), ("C", 10), ("D", 50), ("E", 100)]).unwrap()
    }

    fn characters<'a>(set: &CandidateSet<'a>) -> Vec<&'a str> {
        set.entries().iter().map(|e| e.character.as_str()).collect()
    }

    #[test]
    fn test_candidates_inclusive_threshold() {
        let table = create_test_table();

        assert_eq!(characters(&table.candidates(10.0)), vec!["A", "B", "C"]);
        assert_eq!(characters(&table.candidates(9.99)), vec!["A", "B"]);
        assert!(table.candidates(0.5).is_empty());
    }

    #[test]
    fn test_candidates_keep_table_order() {
        let table = FrequencyTable::from_pairs([("x", 9), ("y", 2), ("z", 5), ("w", 40)]).unwrap();

        assert_eq!(characters(&table.candidates(10.0)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_truncate_keeps_last_entries_positionally() {
        // Frequencies deliberately out of order so a frequency sort would differ
        let table =
            FrequencyTable::from_pairs([("a", 1), ("b", 9), ("c", 0), ("d", 7), ("e", 3)]).unwrap();

        let truncated = table.candidates(10.0).truncate_to(3);
        assert_eq!(characters(&truncated), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_truncate_under_limit_is_unchanged() {
        let table = create_test_table();

        let full = table.candidates(100.0);
        assert_eq!(full.clone().truncate_to(5), full);
        assert_eq!(full.clone().truncate_to(500), full);
    }

    #[test]
    fn test_lowest_frequency() {
        let table = FrequencyTable::from_pairs([("a", 8), ("b", 3), ("c", 6)]).unwrap();

        assert_eq!(table.candidates(10.0).lowest_frequency(), Some(3));
        assert_eq!(table.candidates(1.0).lowest_frequency(), None);
    }

    #[test]
    fn test_nearest_picks_minimum_distance() {
        let table = create_test_table();
        let set = table.candidates(100.0);

        assert_eq!(set.nearest(7.0).unwrap().character, "B");
        assert_eq!(set.nearest(8.0).unwrap().character, "C");
        assert_eq!(set.nearest(80.0).unwrap().character, "E");
        assert_eq!(set.nearest(-20.0).unwrap().character, "A");
    }

    #[test]
    fn test_nearest_ties_go_to_earliest_entry() {
        let table = create_test_table();
        let set = table.candidates(100.0);

        // 3.0 is equidistant from A (1) and B (5)
        assert_eq!(set.nearest(3.0).unwrap().character, "A");

        let same = FrequencyTable::from_pairs([("first", 4), ("second", 4), ("third", 4)]).unwrap();
        assert_eq!(same.candidates(4.0).nearest(4.0).unwrap().character, "first");
    }

    #[test]
    fn test_nearest_is_at_least_as_close_as_every_candidate() {
        let table = FrequencyTable::from_pairs([("p", 12), ("q", 2), ("r", 30), ("s", 19)]).unwrap();
        let set = table.candidates(30.0);

        for indicator in [0.0, 5.5, 13.0, 15.5, 24.0, 29.9] {
            let best = set.nearest(indicator).unwrap();
            let best_distance = (indicator - best.frequency as f64).abs();
            for e in set.entries() {
                assert!(best_distance <= (indicator - e.frequency as f64).abs());
            }
        }
    }

    #[test]
    fn test_nearest_on_empty_set() {
        let table = create_test_table();
        assert!(table.candidates(0.0).nearest(0.0).is_none());
    }
}
