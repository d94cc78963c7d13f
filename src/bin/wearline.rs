//! Wearline CLI - Command-line interface for Wearline
//!
//! Commands:
//! - normalize: Reconcile recorded raw day summaries into normalized metrics
//! - weekly: Bucket a recorded activity list into weekly training volume
//! - doctor: Diagnose environment and recorded payload files
//!
//! The CLI operates on recorded vendor payloads; it never logs in to a
//! vendor cloud itself.

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use wearline::{
    aggregate_weekly, normalize, ActivityRecord, NormalizedDayMetrics, RawDaySummary,
    WeeklyBucket, PRODUCER_NAME, WEARLINE_VERSION,
};

/// Wearline - Reconciliation and aggregation core for wearable daily metrics
#[derive(Parser)]
#[command(name = "wearline")]
#[command(version = WEARLINE_VERSION)]
#[command(about = "Reconcile and aggregate wearable daily metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile raw day summaries into normalized metrics
    Normalize {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "ndjson")]
        output_format: OutputFormat,

        /// Date for records lacking a calendarDate key (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Bucket an activity list into Monday-anchored weekly volume
    Weekly {
        /// Input file path: JSON array of activities (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,

        /// Trailing weekly buckets to keep
        #[arg(long, default_value = "15")]
        weeks: usize,
    },

    /// Diagnose environment and recorded payload files
    Doctor {
        /// Check a recorded day-summary payload file
        #[arg(long)]
        payload: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), WearlineCliError> {
    match cli.command {
        Commands::Normalize {
            input,
            output,
            input_format,
            output_format,
            date,
        } => cmd_normalize(&input, &output, input_format, output_format, date),

        Commands::Weekly {
            input,
            output,
            output_format,
            weeks,
        } => cmd_weekly(&input, &output, output_format, weeks),

        Commands::Doctor { payload, json } => cmd_doctor(payload.as_deref(), json),
    }
}

fn cmd_normalize(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
    date: Option<NaiveDate>,
) -> Result<(), WearlineCliError> {
    let input_data = read_input(input)?;

    let records: Vec<serde_json::Value> = match input_format {
        InputFormat::Ndjson => input_data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(serde_json::from_str)
            .collect::<Result<_, _>>()?,
        InputFormat::Json => serde_json::from_str(&input_data)?,
    };

    if records.is_empty() {
        return Err(WearlineCliError::NoRecords);
    }

    let mut metrics: Vec<NormalizedDayMetrics> = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let record_date = record
            .get("calendarDate")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .or(date)
            .ok_or(WearlineCliError::MissingDate { index })?;
        metrics.push(normalize(&RawDaySummary::from_value(record), record_date));
    }

    write_output(output, &format_records(&metrics, &output_format)?)
}

fn cmd_weekly(
    input: &Path,
    output: &Path,
    output_format: OutputFormat,
    weeks: usize,
) -> Result<(), WearlineCliError> {
    let input_data = read_input(input)?;
    let activities: Vec<ActivityRecord> = serde_json::from_str(&input_data)?;
    let buckets: Vec<WeeklyBucket> = aggregate_weekly(&activities, weeks);

    write_output(output, &format_records(&buckets, &output_format)?)
}

fn cmd_doctor(payload: Option<&Path>, json: bool) -> Result<(), WearlineCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "wearline_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Wearline version {}", WEARLINE_VERSION),
    });

    if let Some(payload_path) = payload {
        if payload_path.exists() {
            match fs::read_to_string(payload_path) {
                Ok(content) => {
                    let parse_errors = content
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .filter(|line| RawDaySummary::from_json(line).is_err())
                        .count();
                    if parse_errors == 0 {
                        checks.push(DoctorCheck {
                            name: "payload".to_string(),
                            status: CheckStatus::Ok,
                            message: "Payload file parses as NDJSON day summaries".to_string(),
                        });
                    } else {
                        checks.push(DoctorCheck {
                            name: "payload".to_string(),
                            status: CheckStatus::Error,
                            message: format!("{} lines failed to parse", parse_errors),
                        });
                    }
                }
                Err(e) => {
                    checks.push(DoctorCheck {
                        name: "payload".to_string(),
                        status: CheckStatus::Error,
                        message: format!("Cannot read payload file: {}", e),
                    });
                }
            }
        } else {
            checks.push(DoctorCheck {
                name: "payload".to_string(),
                status: CheckStatus::Warning,
                message: "Payload file does not exist".to_string(),
            });
        }
    }

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming input ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: WEARLINE_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Wearline Doctor Report");
        println!("======================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(WearlineCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_input(input: &Path) -> Result<String, WearlineCliError> {
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_output(output: &Path, data: &str) -> Result<(), WearlineCliError> {
    if output.to_string_lossy() == "-" {
        print!("{}", data);
        Ok(())
    } else {
        Ok(fs::write(output, data)?)
    }
}

fn format_records<T: serde::Serialize>(
    records: &[T],
    format: &OutputFormat,
) -> Result<String, WearlineCliError> {
    match format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for record in records {
                lines.push(serde_json::to_string(record)?);
            }
            Ok(lines.join("\n") + "\n")
        }
        OutputFormat::Json => Ok(serde_json::to_string(records)?),
        OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(records)?),
    }
}

// Error types

#[derive(Debug)]
enum WearlineCliError {
    Io(io::Error),
    Json(serde_json::Error),
    NoRecords,
    MissingDate { index: usize },
    DoctorFailed,
}

impl From<io::Error> for WearlineCliError {
    fn from(e: io::Error) -> Self {
        WearlineCliError::Io(e)
    }
}

impl From<serde_json::Error> for WearlineCliError {
    fn from(e: serde_json::Error) -> Self {
        WearlineCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<WearlineCliError> for CliError {
    fn from(e: WearlineCliError) -> Self {
        match e {
            WearlineCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            WearlineCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            WearlineCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "No records found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            WearlineCliError::MissingDate { index } => CliError {
                code: "MISSING_DATE".to_string(),
                message: format!("Record {} has no calendarDate", index),
                hint: Some("Add a calendarDate key or pass --date".to_string()),
            },
            WearlineCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
