// Command-line entry point for jsdecls.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jsdecls::utils::file_utils::STDIN_PATH;
use jsdecls::{render, scan_file, LanguageMode, OutputFormat, ParseOptions, ScanError};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to scan (`-` reads standard input)
    file_path: PathBuf,

    /// Language mode: javascript, typescript or tsx (default: from extension)
    #[arg(short, long)]
    language: Option<LanguageMode>,

    /// Reject JSX syntax
    #[arg(long)]
    no_jsx: bool,

    /// Output format: json, pretty or summary
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        let language = self.language.unwrap_or_else(|| {
            if self.file_path.as_os_str() == STDIN_PATH {
                LanguageMode::JavaScript
            } else {
                LanguageMode::detect(&self.file_path)
            }
        });

        ParseOptions::new(language).with_jsx(!self.no_jsx)
    }
}

/// Logs go to stderr so stdout carries only the result
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run(cli: &Cli) -> Result<String, ScanError> {
    let names = scan_file(&cli.file_path, cli.parse_options())?;
    Ok(render(&names, cli.format)?)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
