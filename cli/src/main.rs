use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

/// Cleans the JSON output of the demo parser
#[derive(Parser, Debug)]
#[command(name = "match-cleaner", version, about, long_about = None)]
struct Cli {
    /// Parser output, read from stdin when omitted
    input: Option<PathBuf>,

    /// Where to write the result, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with cleaning options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output shape: structured/json or tabular/df
    #[arg(short, long)]
    return_type: Option<String>,

    #[arg(long)]
    keep_bad_scoring: bool,
    #[arg(long)]
    keep_no_frames: bool,
    #[arg(long)]
    keep_excess_players: bool,
    #[arg(long)]
    keep_end_round: bool,
    #[arg(long)]
    keep_warmups: bool,
    #[arg(long)]
    keep_knife_rounds: bool,
    #[arg(long)]
    keep_excess_kills: bool,
    #[arg(long)]
    keep_time_rounds: bool,

    /// Print the per round validation instead of cleaning
    #[arg(long)]
    validate: bool,

    /// Pretty print the output
    #[arg(long)]
    pretty: bool,

    /// More logging, repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Result<analysis::CleanOptions, String> {
        let mut options = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| format!("Reading config {:?}: {}", path, e))?;
                analysis::CleanOptions::from_json(&raw).map_err(|e| e.to_string())?
            }
            None => analysis::CleanOptions::default(),
        };

        options.remove_bad_scoring &= !self.keep_bad_scoring;
        options.remove_no_frames &= !self.keep_no_frames;
        options.remove_excess_players &= !self.keep_excess_players;
        options.remove_end_round &= !self.keep_end_round;
        options.remove_warmups &= !self.keep_warmups;
        options.remove_knife_rounds &= !self.keep_knife_rounds;
        options.remove_excess_kills &= !self.keep_excess_kills;
        options.remove_time_rounds &= !self.keep_time_rounds;

        if let Some(return_type) = &self.return_type {
            options.return_type = return_type.parse().map_err(|e: analysis::CleanError| e.to_string())?;
        }

        options.validate().map_err(|e| e.to_string())?;
        Ok(options)
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            (meta.target().starts_with("analysis") || meta.target().starts_with("match_cleaner"))
                && *meta.level() <= level
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("Reading {:?}: {}", path, e)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Reading stdin: {}", e))?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), String> {
    match path {
        Some(path) => std::fs::write(path, content).map_err(|e| format!("Writing {:?}: {}", path, e)),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content).map_err(|e| format!("Writing stdout: {}", e))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, String> {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.map_err(|e| format!("Serializing output: {}", e))
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = cli.options()?;

    let input = read_input(cli.input.as_ref())?;
    let mut demo = analysis::Demo::from_json(&input).map_err(|e| e.to_string())?;

    let data = demo.data().map_err(|e| e.to_string())?;
    tracing::info!(
        map = %data.map_name,
        rounds = data.game_rounds.len(),
        "Loaded match"
    );

    let content = if cli.validate {
        let report = demo.validate(&options).map_err(|e| e.to_string())?;
        to_json(&report, cli.pretty)?
    } else {
        let output = demo.clean_rounds(&options).map_err(|e| e.to_string())?;
        to_json(&output, cli.pretty)?
    };

    write_output(cli.output.as_ref(), &content)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
