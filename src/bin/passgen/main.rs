use std::env;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use passgen::{ClassSet, Settings};

mod clipboard;
mod generate;
mod pick;
mod table;

#[derive(Parser)]
#[command(about = "Generate random passwords and rate their strength")]
struct Args {
    /// Settings file to read defaults from [default: ~/.passgen/settings.yaml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log more; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate one or more passwords.
    #[command(alias = "gen")]
    Generate {
        #[command(flatten)]
        classes: ClassArgs,
        #[arg(short, long)]
        length: Option<usize>,
        /// How many passwords to generate.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
        /// Stop redrawing after this many attempts and construct the password instead.
        #[arg(long)]
        max_attempts: Option<NonZeroU32>,
        /// Copy the result to the clipboard.
        #[arg(long)]
        copy: bool,
        #[arg(long)]
        json: bool,
    },
    /// Rate the strength of a configuration without generating anything.
    Rate {
        #[command(flatten)]
        classes: ClassArgs,
        #[arg(short, long)]
        length: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Pick the classes and drag the length slider interactively, then generate.
    Pick {
        /// Copy the result to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Show the strength label for every length bracket and number of classes.
    Table,
}

/// Character class toggles. With none given, the classes from the settings are used.
#[derive(clap::Args)]
struct ClassArgs {
    /// Include uppercase letters.
    #[arg(short = 'U', long)]
    upper: bool,
    /// Include lowercase letters.
    #[arg(short = 'L', long)]
    lower: bool,
    /// Include digits.
    #[arg(short = 'D', long)]
    digits: bool,
    /// Include symbols.
    #[arg(short = 'S', long)]
    symbols: bool,
}

impl ClassArgs {
    fn or_default(&self, defaults: ClassSet) -> ClassSet {
        let given = ClassSet {
            upper: self.upper,
            lower: self.lower,
            digits: self.digits,
            symbols: self.symbols,
        };
        if given.is_empty() {
            defaults
        } else {
            given
        }
    }
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    init_logging(args.verbose);
    let settings = load_settings(args.config)?;

    match args.command {
        Command::Generate {
            classes,
            length,
            count,
            max_attempts,
            copy,
            json,
        } => {
            let request = generate::Request {
                classes: classes.or_default(settings.classes),
                length: length.unwrap_or(settings.length),
                retry: max_attempts
                    .map(passgen::RetryPolicy::Bounded)
                    .unwrap_or_else(|| settings.retry_policy()),
            };
            generate::generate(&request, count, copy, json)?;
        }
        Command::Rate {
            classes,
            length,
            json,
        } => generate::rate(
            &classes.or_default(settings.classes),
            length.unwrap_or(settings.length),
            json,
        )?,
        Command::Pick { copy } => pick::pick(&settings, copy)?,
        Command::Table => table::strength_table(std::io::stdout())?,
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_settings(config: Option<PathBuf>) -> Result<Settings, ProgError> {
    let settings = match config {
        // An explicitly named file has to exist.
        Some(path) => Settings::load(&path)?,
        None => Settings::load_or_default(&default_settings()?)?,
    };
    Ok(settings)
}

fn default_settings() -> anyhow::Result<PathBuf> {
    let home = env::var_os("HOME")
        .ok_or_else(|| anyhow::anyhow!("HOME is not set; cannot find home directory of user"))?;
    let default_path = {
        let mut p = PathBuf::from(home);
        p.push(".passgen");
        p.push("settings.yaml");
        p
    };
    Ok(default_path)
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error(
        "Cannot fit {classes} character classes into {length} characters; enable fewer classes or \
         ask for a longer password."
    )]
    Infeasible { classes: usize, length: usize },
    #[error("Selection cancelled; exiting.")]
    SelectionCancelled,
    #[error("Settings error: {0}")]
    Settings(passgen::SettingsError),
    #[error("Slider error: {0}")]
    Slider(passgen::SliderError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<passgen::SettingsError> for ProgError {
    fn from(err: passgen::SettingsError) -> ProgError {
        ProgError::Settings(err)
    }
}

impl From<passgen::SliderError> for ProgError {
    fn from(err: passgen::SliderError) -> ProgError {
        ProgError::Slider(err)
    }
}
