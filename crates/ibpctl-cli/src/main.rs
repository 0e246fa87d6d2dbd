// crates/ibpctl-cli/src/main.rs
// ============================================================================
// Module: ibpctl CLI Entry Point
// Description: Command-line front end for blockchain network administration.
// Purpose: Parse flags, dispatch one verb, and map the verdict to an exit code.
// Dependencies: clap, ibpctl-core, ibpctl-gateway, thiserror
// ============================================================================

//! ## Overview
//! `ibpctl` runs exactly one verb per process: it parses the invocation,
//! hands it to the [`OperationDispatcher`] backed by the HTTP gateway, prints a
//! localized status line, and exits with `0` on success, `1` for malformed
//! invocations, and `2` for any operational failure.
//!
//! Flags precede the verb. Once the verb's first argument is seen, every later
//! token is an argument, so secrets that start with `-` are accepted.
//!
//! Security posture: flags, spec files, and network profiles are untrusted;
//! usage errors are reported before any file or network access.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Parser;
use clap::ValueEnum;
use ibpctl_cli::audit::open_sink;
use ibpctl_cli::i18n::Locale;
use ibpctl_cli::i18n::set_locale;
use ibpctl_cli::t;
use ibpctl_core::AuditSink;
use ibpctl_core::COMMANDS;
use ibpctl_core::ChaincodeRequest;
use ibpctl_core::DispatchError;
use ibpctl_core::DispatchOutcome;
use ibpctl_core::ExitStatus;
use ibpctl_core::Invocation;
use ibpctl_core::NoopAuditSink;
use ibpctl_core::OperationDispatcher;
use ibpctl_core::Verb;
use ibpctl_gateway::HttpGateway;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "IBPCTL_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ibpctl", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Print usage and exit.
    #[arg(long = "help", short = 'h', action = ArgAction::SetTrue)]
    show_help: bool,
    /// Print version information and exit.
    #[arg(long = "version", short = 'V', action = ArgAction::SetTrue)]
    show_version: bool,
    /// Network profile file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Operation specification file.
    #[arg(long, value_name = "PATH")]
    spec: Option<PathBuf>,
    /// Preferred output language (overrides `IBPCTL_LANG`).
    #[arg(long, value_enum, value_name = "LANG")]
    lang: Option<LangArg>,
    /// Audit log destination (`-` for stderr).
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
    /// Verb to run.
    #[arg(value_name = "COMMAND")]
    verb: Option<String>,
    /// Positional arguments for the verb; values may start with `-`.
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

/// CLI language selection.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error carrying a localized message and its exit status.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
    /// Exit status class reported to the shell.
    status: ExitStatus,
}

impl CliError {
    /// Constructs a usage error; the usage text is appended.
    fn usage(message: String) -> Self {
        Self {
            message: format!("{message}\n{}", usage_text()),
            status: ExitStatus::Usage,
        }
    }

    /// Constructs an operational failure.
    const fn failure(message: String) -> Self {
        Self {
            message,
            status: ExitStatus::Failure,
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
        Err(err) => emit_error(&err),
    }
}

/// Parses flags and dispatches the selected verb.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::try_parse()
        .map_err(|err| CliError::usage(t!("usage.parse_failed", error = first_line(&err))))?;
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::failure(output_error(&t!("output.stream.stderr"), &err)))?;
    }

    if cli.show_help {
        write_stdout(&usage_text())?;
        return Ok(ExitCode::SUCCESS);
    }
    if cli.show_version {
        write_stdout(&t!("main.version", version = env!("CARGO_PKG_VERSION")))?;
        return Ok(ExitCode::SUCCESS);
    }

    let invocation = Invocation {
        config: cli.config,
        spec: cli.spec,
        verb: cli.verb,
        args: cli.args,
    };
    let audit = select_audit(&invocation, cli.audit_log)?;
    let dispatcher = OperationDispatcher::new(HttpGateway::new()).with_audit(audit);
    match dispatcher.dispatch(&invocation) {
        Ok(outcome) => {
            report_outcome(&outcome)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(dispatch_failure(&invocation, &err)),
    }
}

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::usage(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Opens the audit sink unless the invocation is already known to be malformed.
fn select_audit(
    invocation: &Invocation,
    audit_log: Option<PathBuf>,
) -> CliResult<Box<dyn AuditSink>> {
    if invocation.verb.is_none() || invocation.config.is_none() {
        return Ok(Box::new(NoopAuditSink));
    }
    let Some(path) = audit_log else {
        return Ok(Box::new(NoopAuditSink));
    };
    open_sink(Some(path.as_path())).map_err(|err| {
        CliError::failure(t!("audit.open_failed", path = path.display(), error = err))
    })
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

/// Prints the status line (or template) for a successful dispatch.
fn report_outcome(outcome: &DispatchOutcome) -> CliResult<()> {
    match outcome {
        DispatchOutcome::Template {
            template: Some(template),
            ..
        } => write_stdout(template),
        DispatchOutcome::Template {
            verb,
            template: None,
        } => write_stderr_line(&t!("spec_gen.none", verb = verb))
            .map_err(|err| CliError::failure(output_error(&t!("output.stream.stderr"), &err))),
        _ => write_stdout(&outcome_message(outcome)),
    }
}

/// Formats the localized status line for an applied operation.
fn outcome_message(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::AdminEnrolled => t!("outcome.admin_enrolled"),
        DispatchOutcome::UserEnrolled {
            user_id,
        } => t!("outcome.user_enrolled", user_id = user_id),
        DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Install(request)) => {
            t!("outcome.cc_installed", cc_id = request.cc_id, version = request.version)
        }
        DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Instantiate(request)) => t!(
            "outcome.cc_instantiated",
            cc_id = request.cc_id,
            version = request.version,
            channel = request.channel
        ),
        DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Upgrade(request)) => t!(
            "outcome.cc_upgraded",
            cc_id = request.cc_id,
            version = request.version,
            channel = request.channel
        ),
        DispatchOutcome::AdminCertInstalled(report) => {
            let steps =
                report.completed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            t!("outcome.admin_cert_installed", steps = steps)
        }
        DispatchOutcome::Template {
            verb, ..
        } => t!("spec_gen.none", verb = verb),
    }
}

/// Converts a dispatch error into a CLI error with the right exit status.
fn dispatch_failure(invocation: &Invocation, err: &DispatchError) -> CliError {
    if let DispatchError::Usage(usage) = err {
        return CliError::usage(t!("usage.error", error = usage));
    }
    let verb = invocation.verb.as_deref().unwrap_or_default();
    let message = t!("dispatch.failed", verb = verb, error = err);
    if matches!(err, DispatchError::PartialCompletion(_)) {
        return CliError::failure(format!("{message}\n{}", t!("dispatch.partial")));
    }
    CliError::failure(message)
}

/// Renders the usage text from the command catalog.
fn usage_text() -> String {
    let mut lines = vec![t!("usage.line"), String::new(), t!("usage.commands")];
    for descriptor in &COMMANDS {
        lines.push(format!("  ibpctl {}", descriptor.usage));
        lines.push(format!("      {}", command_summary(descriptor.verb)));
    }
    lines.push(String::new());
    lines.push(t!("usage.options"));
    let options = [
        ("--config <PATH>", t!("usage.option.config")),
        ("--spec <PATH>", t!("usage.option.spec")),
        ("--lang <LANG>", t!("usage.option.lang")),
        ("--audit-log <PATH>", t!("usage.option.audit_log")),
        ("-h, --help", t!("usage.option.help")),
        ("-V, --version", t!("usage.option.version")),
    ];
    for (flag, description) in options {
        lines.push(format!("  {flag:<20} {description}"));
    }
    lines.join("\n")
}

/// Returns the localized one-line summary for a verb.
fn command_summary(verb: Verb) -> String {
    match verb {
        Verb::Init => t!("command.summary.init"),
        Verb::Enroll => t!("command.summary.enroll"),
        Verb::CcDeploy => t!("command.summary.cc_deploy"),
        Verb::CcInstantiate => t!("command.summary.cc_instantiate"),
        Verb::CcUpgrade => t!("command.summary.cc_upgrade"),
        Verb::CcQuery => t!("command.summary.cc_query"),
        Verb::CcInvoke => t!("command.summary.cc_invoke"),
        Verb::AddAdminCert => t!("command.summary.add_admin_cert"),
        Verb::SpecGen => t!("command.summary.spec_gen"),
    }
}

/// Returns the first line of a clap parse error without its prefix.
fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout, mapping failures to a CLI error.
fn write_stdout(message: &str) -> CliResult<()> {
    write_stdout_line(message)
        .map_err(|err| CliError::failure(output_error(&t!("output.stream.stdout"), &err)))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    t!("output.write_failed", stream = stream, error = error)
}

/// Emits an error message to stderr and returns its exit code.
fn emit_error(err: &CliError) -> ExitCode {
    let _ = write_stderr_line(&err.message);
    ExitCode::from(err.status.code())
}
