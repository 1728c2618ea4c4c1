//=========================================================================
// Pi Recall Binary
//=========================================================================
//
// Command-line entry point: parses flags, installs the logger, layers
// settings (defaults → TOML file → flags) and runs the engine.
//
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pi_recall::core::{GameResult, Settings};
use pi_recall::EngineBuilder;

//=== Cli =================================================================

#[derive(Debug, Parser)]
#[command(name = "pi-recall")]
#[command(about = "Recite the digits of pi, one key at a time")]
struct Cli {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// File holding the reference digits.
    #[arg(long)]
    digits: Option<PathBuf>,

    /// File holding the best score.
    #[arg(long)]
    best: Option<PathBuf>,

    /// Play in the terminal instead of a window.
    #[arg(long, default_value_t = false)]
    classic: bool,

    /// Fixed seed for glyph motion.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn settings(&self) -> GameResult<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(digits) = &self.digits {
            settings.digits_path = digits.clone();
        }
        if let Some(best) = &self.best {
            settings.best_path = best.clone();
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
        Ok(settings)
    }
}

//=== Entry Point =========================================================

fn run(cli: &Cli) -> GameResult<usize> {
    EngineBuilder::new()
        .with_settings(cli.settings()?)
        .classic(cli.classic)
        .build()?
        .run()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(best) => {
            println!("YOUR PB IS: {} digits", best);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("pi-recall: {}", e);
            ExitCode::FAILURE
        }
    }
}
