mod logging;

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use dat2arff_core::{ConvertError, FileSystemProvider, SourceProvider};
use tracing::level_filters::LevelFilter;

use crate::logging::{init_logging, LogConfig, LogFormat};

/// How conversion errors are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Parser)]
#[command(name = "dat2arff", version, about = "Convert raw data files to ARFF")]
struct Cli {
    /// Path to the raw data file to convert
    #[arg(value_name = "DAT_FILE")]
    dat_file: PathBuf,

    /// Configuration file describing the relation and its attributes
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: PathBuf,

    /// Output file [default: <DAT_FILE>.arff]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Replace an existing output file without asking
    #[arg(short, long)]
    yes: bool,

    /// Format of conversion error reports
    #[arg(long, default_value = "text", value_enum)]
    error_format: ErrorFormat,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only)
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// Log output format
    #[arg(long, default_value = "pretty", value_enum)]
    log_format: LogFormatArg,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&log_config_from_cli(&cli));

    let level = cli.verbosity.tracing_level_filter();
    let quiet = level == LevelFilter::ERROR || level == LevelFilter::OFF;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.dat_file));

    let provider = FileSystemProvider;
    if let Err(msg) = preflight(&provider, &cli.dat_file, &cli.config) {
        eprintln!("Error: {}", msg);
        process::exit(1);
    }

    if provider.exists(&output) && !cli.yes {
        let stdin = io::stdin();
        if !ask_overwrite(&mut stdin.lock(), &mut io::stdout()) {
            println!("ARFF file generation stopped. Provide a valid output file.");
            process::exit(1);
        }
    }

    tracing::info!(
        data = %cli.dat_file.display(),
        config = %cli.config.display(),
        output = %output.display(),
        "converting"
    );
    let document = match dat2arff_core::convert_files(&cli.config, &cli.dat_file) {
        Ok(doc) => doc,
        Err(e) => {
            report_error(&e, cli.error_format);
            process::exit(1);
        }
    };

    if let Err(e) = std::fs::write(&output, document) {
        report_error(&ConvertError::io(output.display().to_string(), &e), cli.error_format);
        process::exit(1);
    }
    if !quiet {
        println!("ARFF file written to {}", output.display());
    }
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
    }
}

/// `<DAT_FILE>.arff`, appended to the full file name.
fn default_output_path(dat_file: &Path) -> PathBuf {
    let mut name = dat_file.as_os_str().to_owned();
    name.push(".arff");
    PathBuf::from(name)
}

/// Both inputs must exist before anything is read.
fn preflight(
    provider: &dyn SourceProvider,
    dat_file: &Path,
    config: &Path,
) -> Result<(), String> {
    if !provider.exists(dat_file) {
        return Err(format!(
            "The data file {} does not exist.",
            dat_file.display()
        ));
    }
    if !provider.exists(config) {
        return Err(format!(
            "The config file {} does not exist.",
            config.display()
        ));
    }
    Ok(())
}

/// Ask before replacing an existing output file. Re-prompts until the answer
/// is `y` or `n` (either case); end of input counts as `n`.
fn confirm_overwrite(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "Warning: The output file exists. Do you want to replace it? [y/n] ")?;
    out.flush()?;
    let mut answer = String::new();
    loop {
        answer.clear();
        if input.read_line(&mut answer)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        match answer.trim() {
            "y" | "Y" => return Ok(true),
            "n" | "N" => return Ok(false),
            _ => {
                write!(out, "Please, type 'y' or 'n': ")?;
                out.flush()?;
            }
        }
    }
}

/// `confirm_overwrite`, with a failed read or write logged and taken as `n`.
fn ask_overwrite(input: &mut impl BufRead, out: &mut impl Write) -> bool {
    confirm_overwrite(input, out).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cannot read overwrite answer");
        false
    })
}

fn report_error(e: &ConvertError, format: ErrorFormat) {
    tracing::debug!(kind = e.kind(), pass = e.pass(), "conversion failed");
    match format {
        ErrorFormat::Text => eprintln!("Error: {}", e),
        ErrorFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{{\"error\": \"{}\"}}", e.kind()));
            eprintln!("{}", err_json);
        }
    }
}
