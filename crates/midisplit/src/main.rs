use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use midisplit::{ExternalTools, Orchestrator, RunOptions, RunReport, SplitError};
use splitconf::{SplitConfig, TrackMode};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Split a MIDI file into one MIDI file per channel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// MIDI file, or `midicsv` text
    input: PathBuf,

    /// Delete intermediate CSV files (default for MIDI input)
    #[arg(long, conflicts_with = "keep_csv")]
    remove_csv: bool,

    /// Keep intermediate CSV files (default for CSV input)
    #[arg(long)]
    keep_csv: bool,

    /// Name of the output directory created next to the input
    #[arg(long, value_name = "NAME")]
    output_dir: Option<String>,

    /// Track layout of each output: renumber or collapse
    #[arg(long, value_name = "MODE")]
    tracks: Option<TrackMode>,

    /// Channel encodes to run at once
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    jobs: Option<u64>,

    /// Seconds a single converter invocation may run
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// MIDI to CSV converter program
    #[arg(long, value_name = "PROG")]
    midicsv: Option<String>,

    /// CSV to MIDI converter program
    #[arg(long, value_name = "PROG")]
    csvmidi: Option<String>,

    /// Fail when the input has no channel events
    #[arg(long)]
    fail_on_empty: bool,

    /// Config file used instead of ./midisplit.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the run report as JSON on stdout
    #[arg(long)]
    json: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Layer flags over the loaded configuration.
    fn apply_to(&self, config: &mut SplitConfig) {
        if let Some(midicsv) = &self.midicsv {
            config.tools.midicsv = midicsv.clone();
        }
        if let Some(csvmidi) = &self.csvmidi {
            config.tools.csvmidi = csvmidi.clone();
        }
        if let Some(timeout) = self.timeout {
            config.tools.timeout_secs = timeout;
        }
        if let Some(dir) = &self.output_dir {
            config.output.dir_name = dir.clone();
        }
        if self.remove_csv {
            config.output.remove_csv = Some(true);
        } else if self.keep_csv {
            config.output.remove_csv = Some(false);
        }
        if let Some(tracks) = self.tracks {
            config.output.tracks = tracks;
        }
        if let Some(jobs) = self.jobs {
            config.output.jobs = jobs as usize;
        }
        if self.fail_on_empty {
            config.output.fail_on_empty = true;
        }
        match self.verbose {
            0 => {}
            1 => config.logging.log_level = "debug".to_string(),
            _ => config.logging.log_level = "trace".to_string(),
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level '{}'", level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

fn setup(cli: &Cli) -> Result<SplitConfig> {
    let mut config = SplitConfig::load_from(cli.config.as_deref()).map_err(SplitError::from)?;
    cli.apply_to(&mut config);
    init_tracing(&config.logging.log_level)?;
    Ok(config)
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(report).context("failed to encode report")?;
        println!("{}", text);
    } else if report.empty {
        println!("{}: no channel events, nothing written", report.input.display());
    } else {
        for channel in &report.channels {
            println!("channel {:>2}: {}", channel.channel, channel.midi.display());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match setup(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: config: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let orchestrator = Orchestrator::new(
        ExternalTools::from_config(&config.tools),
        RunOptions::from(&config),
    );

    // Dropping the run on interrupt rolls back its output and kills converters.
    let outcome = tokio::select! {
        outcome = orchestrator.run(&cli.input) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, discarding staged output");
            eprintln!("error: interrupted");
            return ExitCode::from(130);
        }
    };

    match outcome {
        Ok(report) => match print_report(&report, cli.json) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: io: {:#}", e);
                ExitCode::from(1)
            }
        },
        Err(e) => {
            let kind = e.kind();
            tracing::debug!("run failed: {:?}", e);
            eprintln!("error: {}: {}", kind.stage(), e);
            ExitCode::from(kind.exit_code())
        }
    }
}
