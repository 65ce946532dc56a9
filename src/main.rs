use charpick::{
    config::{Config, ConfigStore, FileConfigStore},
    frequency::{CharacterSelector, DrawSummary, FrequencyEntry, FrequencyTable, Selection},
};
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::{error::Error, path::PathBuf, process};

/// pick a character to practice, biased toward a learner level
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Picks one character from a corpus frequency table. Higher levels (must be greater than 1) favour rarer characters."
)]
pub struct Cli {
    /// learner level, a number greater than 1
    #[clap(allow_negative_numbers = true)]
    level: f64,

    /// number of independent draws
    #[clap(short = 'n', long)]
    count: Option<usize>,

    /// JSON table mapping characters to corpus counts (default: embedded sample)
    #[clap(short = 't', long)]
    table: Option<PathBuf>,

    /// print the intermediate values of each draw
    #[clap(long)]
    explain: bool,

    /// print per-character counts and frequency statistics over all draws
    #[clap(long)]
    summary: bool,

    /// increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// persist the effective table, count and log level as defaults
    #[clap(long)]
    save_config: bool,
}

/// Effective settings after merging CLI flags over the stored config
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeSettings {
    pub level: f64,
    pub count: usize,
    pub table_path: Option<PathBuf>,
    pub candidate_limit: usize,
    pub log_level: LevelFilter,
}

impl RuntimeSettings {
    fn resolve(cli: &Cli, config: &Config) -> Self {
        let log_level = match cli.verbose {
            0 => config.log_level_filter(),
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Self {
            level: cli.level,
            count: cli.count.unwrap_or(config.count),
            table_path: cli.table.clone().or_else(|| config.table_path.clone()),
            candidate_limit: config.candidate_limit,
            log_level,
        }
    }
}

impl From<&RuntimeSettings> for Config {
    fn from(rs: &RuntimeSettings) -> Self {
        Self {
            table_path: rs.table_path.clone(),
            count: rs.count,
            candidate_limit: rs.candidate_limit,
            log_level: rs.log_level.to_string().to_lowercase(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli, &FileConfigStore::new()) {
        eprintln!("charpick: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli, store: &impl ConfigStore) -> Result<(), Box<dyn Error>> {
    let settings = RuntimeSettings::resolve(cli, &store.load());

    SimpleLogger::new().with_level(settings.log_level).init()?;

    let table = match &settings.table_path {
        Some(path) => FrequencyTable::from_path(path)?,
        None => FrequencyTable::sample()?,
    };
    log::info!("loaded frequency table with {} characters", table.len());

    let selector = CharacterSelector::new(table).with_candidate_limit(settings.candidate_limit);
    let mut rng = rand::thread_rng();

    let mut picks: Vec<&FrequencyEntry> = Vec::with_capacity(settings.count);
    for _ in 0..settings.count {
        let selection = selector.explain(settings.level, &mut rng)?;
        if cli.explain {
            println!("{}", format_explanation(&selection));
        } else {
            println!("{}", selection.character());
        }
        picks.push(selection.entry);
    }

    if cli.summary {
        print!("{}", format_summary(&DrawSummary::from_entries(&picks)));
    }

    if cli.save_config {
        store.save(&Config::from(&settings))?;
        log::info!("saved defaults");
    }

    Ok(())
}

fn format_explanation(selection: &Selection) -> String {
    format!(
        "{}\tlevel={} target={} candidates={}/{} lowest={} indicator={} frequency={}",
        selection.character(),
        selection.level,
        selection.target_frequency,
        selection.used_candidates,
        selection.full_candidates,
        selection.lowest_frequency,
        selection.indicator,
        selection.entry.frequency,
    )
}

fn format_summary(summary: &DrawSummary) -> String {
    let mut out = format!("draws: {}\n", summary.draws);
    for (character, frequency, count) in &summary.counts {
        out.push_str(&format!("{character}\t{count}\t(frequency {frequency})\n"));
    }
    if let (Some(mean), Some(std_dev)) = (summary.mean_frequency, summary.std_dev_frequency) {
        out.push_str(&format!("mean frequency: {mean:.2} (std dev {std_dev:.2})\n"));
    }
    out
}
