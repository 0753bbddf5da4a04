// crates/tunnelcheck-cli/src/main.rs
// ============================================================================
// Module: Tunnelcheck CLI Entry Point
// Description: Command dispatcher for tunnel config and form validation.
// Purpose: Read bounded input, validate it, and report a redacted audit event.
// Dependencies: clap, serde_json, thiserror, tunnelcheck-core.
// ============================================================================

//! ## Overview
//! The tunnelcheck CLI validates tunnel config text or JSON form payloads
//! from a file or stdin and prints the verdict. The exit code is zero only
//! for valid input. All CLI strings are routed through the message catalog.
//! Security posture: inputs carry private keys; they are read once, never
//! echoed beyond validation errors, and never written to audit output.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde_json::Value;
use thiserror::Error;
use tunnelcheck_cli::OutputFormat;
use tunnelcheck_cli::Settings;
use tunnelcheck_cli::t;
use tunnelcheck_core::INVALID_FORM_ERROR;
use tunnelcheck_core::InputSource;
use tunnelcheck_core::ValidationAuditEvent;
use tunnelcheck_core::ValidationResult;
use tunnelcheck_core::validate_config_bytes;
use tunnelcheck_core::validate_form_json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Input path that selects stdin.
const STDIN_PATH: &str = "-";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "tunnelcheck", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate `[Interface]` / `[Peer]` config text.
    Validate(ValidateCommand),
    /// Validate a JSON form payload of config fields.
    ValidateForm(ValidateCommand),
    /// Settings utilities.
    Settings {
        /// Selected settings subcommand.
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

/// Arguments shared by the validation commands.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Input file path; `-` or omitted reads stdin.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// Output format (overrides `output.format`).
    #[arg(long, value_enum, value_name = "FORMAT")]
    format: Option<FormatArg>,
    /// Optional settings file path (defaults to tunnelcheck.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Validate a tunnelcheck settings file.
    Validate(SettingsValidateCommand),
}

/// Arguments for `settings validate`.
#[derive(Args, Debug)]
struct SettingsValidateCommand {
    /// Optional settings file path (defaults to tunnelcheck.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Output format flag values.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    /// Human-readable lines.
    Text,
    /// Serialized validation result.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// CLI error wrapper for catalog error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a catalog message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Validate(command) => command_validate(&command, InputSource::Text),
        Commands::ValidateForm(command) => command_validate(&command, InputSource::Form),
        Commands::Settings {
            command,
        } => command_settings(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help();
    write_stdout_line(&help.to_string()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Validation Commands
// ============================================================================

/// Executes `validate` and `validate-form`.
fn command_validate(command: &ValidateCommand, source: InputSource) -> CliResult<ExitCode> {
    let settings = Settings::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("settings.load_failed", error = err)))?;
    let sink = settings
        .audit_sink()
        .map_err(|err| CliError::new(t!("audit.open_failed", error = err)))?;

    let kind = match source {
        InputSource::Text => t!("input.kind.config"),
        InputSource::Form => t!("input.kind.form"),
    };
    let bytes = read_input(command.input.as_deref(), &kind, settings.limits.max_input_bytes)?;
    let result = validate_input(source, &bytes);
    sink.record(&ValidationAuditEvent::new(source, bytes.len(), &result));

    let format = command.format.map_or(settings.output.format, OutputFormat::from);
    let rendered = render_result(&result, source, format)?;
    write_stdout_bytes(rendered.as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(if result.is_valid() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Runs the validation path matching `source`.
fn validate_input(source: InputSource, bytes: &[u8]) -> ValidationResult {
    match source {
        InputSource::Text => validate_config_bytes(bytes),
        InputSource::Form => serde_json::from_slice::<Value>(bytes).map_or_else(
            |_| ValidationResult::rejected(INVALID_FORM_ERROR),
            |value| validate_form_json(&value),
        ),
    }
}

/// Renders a validation result in the requested format.
fn render_result(
    result: &ValidationResult,
    source: InputSource,
    format: OutputFormat,
) -> CliResult<String> {
    let subject = match source {
        InputSource::Text => t!("validate.subject.config"),
        InputSource::Form => t!("validate.subject.form"),
    };
    let mut output = match format {
        OutputFormat::Json => serde_json::to_string(result)
            .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?,
        OutputFormat::Text if result.is_valid() => t!("validate.ok", subject = subject),
        OutputFormat::Text => {
            let mut text = match result.errors().len() {
                1 => t!("validate.failed_one", subject = subject),
                count => t!("validate.failed", subject = subject, count = count),
            };
            for error in result.errors() {
                text.push('\n');
                text.push_str(&t!("validate.error_entry", error = error));
            }
            text
        }
    };
    output.push('\n');
    Ok(output)
}

// ============================================================================
// SECTION: Settings Commands
// ============================================================================

/// Dispatches settings subcommands.
fn command_settings(command: SettingsCommand) -> CliResult<ExitCode> {
    match command {
        SettingsCommand::Validate(command) => command_settings_validate(&command),
    }
}

/// Executes the settings validation command.
fn command_settings_validate(command: &SettingsValidateCommand) -> CliResult<ExitCode> {
    let _settings = Settings::load(command.config.as_deref())
        .map_err(|err| CliError::new(t!("settings.load_failed", error = err)))?;
    write_stdout_line(&t!("settings.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded reads.
#[derive(Debug)]
enum ReadLimitError {
    /// I/O failure.
    Io(std::io::Error),
    /// Input size exceeds the configured limit.
    TooLarge {
        /// Observed size in bytes (a lower bound for streams).
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads the command input from a file or stdin.
fn read_input(path: Option<&Path>, kind: &str, max_bytes: usize) -> CliResult<Vec<u8>> {
    let (label, outcome) = match path {
        Some(path) if path != Path::new(STDIN_PATH) => {
            (path.display().to_string(), read_bytes_with_limit(path, max_bytes))
        }
        _ => (t!("input.source.stdin"), read_stream_with_limit(std::io::stdin().lock(), max_bytes)),
    };
    outcome.map_err(|err| match err {
        ReadLimitError::Io(err) => {
            CliError::new(t!("input.read_failed", kind = kind, path = label, error = err))
        }
        ReadLimitError::TooLarge {
            size,
            limit,
        } => CliError::new(t!(
            "input.read_too_large",
            kind = kind,
            path = label,
            size = size,
            limit = limit
        )),
    })
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let metadata = file.metadata().map_err(ReadLimitError::Io)?;
    let size = metadata.len();
    let limit = u64::try_from(max_bytes).map_err(|_| ReadLimitError::TooLarge {
        size,
        limit: max_bytes,
    })?;
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    read_stream_with_limit(file, max_bytes)
}

/// Reads a stream to the end, failing once more than `max_bytes` arrive.
fn read_stream_with_limit<R: Read>(reader: R, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let read_limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut limited = reader.take(read_limit);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        let actual = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        return Err(ReadLimitError::TooLarge {
            size: actual,
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
