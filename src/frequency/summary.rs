use super::table::FrequencyEntry;
use itertools::Itertools;

/// Aggregate of repeated draws
#[derive(Debug, Clone, PartialEq)]
pub struct DrawSummary {
    pub draws: usize,
    /// (character, frequency, times drawn), most drawn first
    pub counts: Vec<(String, u64, usize)>,
    pub mean_frequency: Option<f64>,
    pub std_dev_frequency: Option<f64>,
}

impl DrawSummary {
    pub fn from_entries(picks: &[&FrequencyEntry]) -> Self {
        let counts = picks
            .iter()
            .counts_by(|e| (e.character.as_str(), e.frequency))
            .into_iter()
            .sorted_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
            .map(|((character, frequency), count)| (character.to_string(), frequency, count))
            .collect();

        let frequencies: Vec<f64> = picks.iter().map(|e| e.frequency as f64).collect();

        Self {
            draws: picks.len(),
            counts,
            mean_frequency: mean(&frequencies),
            std_dev_frequency: std_dev(&frequencies),
        }
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| (data_mean - value).powi(2))
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}
