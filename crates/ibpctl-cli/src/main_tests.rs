// crates/ibpctl-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for locale resolution, usage rendering, and reporting.
// Purpose: Ensure the entry point maps outcomes to the right text and exit codes.
// Dependencies: ibpctl-cli main helpers
// ============================================================================

//! ## Overview
//! Validates the pure helpers behind the `ibpctl` entry point: locale
//! selection, catalog-driven usage text, status lines, and error mapping.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::Parser;
use ibpctl_core::AdminCertReport;
use ibpctl_core::AdminStep;
use ibpctl_core::COMMANDS;
use ibpctl_core::ChaincodeRequest;
use ibpctl_core::DeployRequest;
use ibpctl_core::DispatchError;
use ibpctl_core::DispatchOutcome;
use ibpctl_core::ExitStatus;
use ibpctl_core::Invocation;
use ibpctl_core::StepCause;
use ibpctl_core::StepFailure;
use ibpctl_core::UsageError;

use super::Cli;
use super::LangArg;
use super::Locale;
use super::dispatch_failure;
use super::outcome_message;
use super::resolve_locale;
use super::usage_text;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn invocation(verb: &str) -> Invocation {
    Invocation {
        config: Some("net.yaml".into()),
        spec: None,
        verb: Some(verb.to_string()),
        args: Vec::new(),
    }
}

fn deploy_request() -> DeployRequest {
    DeployRequest {
        cc_id: "marbles".to_string(),
        version: "2.0".to_string(),
        cc_src_root_path: String::new(),
        channel: "mychannel".to_string(),
        cc_policy: String::new(),
        init_params: Vec::new(),
        collections_config: String::new(),
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn cli_accepts_flags_before_the_verb() {
    let cli = Cli::try_parse_from([
        "ibpctl",
        "--config=net.yaml",
        "--spec",
        "spec.json",
        "enroll",
        "alice",
        "pw",
        "org1",
    ])
    .expect("parse");
    assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("net.yaml")));
    assert_eq!(cli.spec.as_deref(), Some(std::path::Path::new("spec.json")));
    assert_eq!(cli.verb.as_deref(), Some("enroll"));
    assert_eq!(cli.args, vec!["alice", "pw", "org1"]);
}

#[test]
fn cli_accepts_hyphen_leading_verb_arguments() {
    let cli = Cli::try_parse_from(["ibpctl", "--config=net.yaml", "enroll", "alice", "-s3cret", "org1"])
        .expect("parse");
    assert_eq!(cli.verb.as_deref(), Some("enroll"));
    assert_eq!(cli.args, vec!["alice", "-s3cret", "org1"]);
}

#[test]
fn cli_passes_flags_after_the_verb_through_as_arguments() {
    let cli = Cli::try_parse_from([
        "ibpctl",
        "--config=net.yaml",
        "enroll",
        "alice",
        "pw",
        "org1",
        "--spec",
        "spec.json",
    ])
    .expect("parse");
    assert!(cli.spec.is_none());
    assert_eq!(cli.args, vec!["alice", "pw", "org1", "--spec", "spec.json"]);
}

#[test]
fn cli_rejects_unknown_flags() {
    assert!(Cli::try_parse_from(["ibpctl", "--bogus", "init"]).is_err());
}

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn resolve_locale_prefers_flag_over_env() {
    let locale = resolve_locale(Some(LangArg::En), Some("ca")).expect("locale");
    assert_eq!(locale, Locale::En);
    let locale = resolve_locale(None, Some("ca_ES")).expect("locale");
    assert_eq!(locale, Locale::Ca);
    let locale = resolve_locale(None, None).expect("locale");
    assert_eq!(locale, Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_value() {
    let err = resolve_locale(None, Some("klingon")).expect_err("invalid env");
    assert_eq!(err.status, ExitStatus::Usage);
    assert!(err.message.contains("IBPCTL_LANG"));
}

// ============================================================================
// SECTION: Usage
// ============================================================================

#[test]
fn usage_text_lists_every_catalog_command() {
    let usage = usage_text();
    for descriptor in &COMMANDS {
        assert!(usage.contains(descriptor.usage), "usage missing {}", descriptor.name);
    }
    assert!(usage.contains("--config <PATH>"));
}

// ============================================================================
// SECTION: Reporting
// ============================================================================

#[test]
fn outcome_messages_name_the_applied_chaincode() {
    let message =
        outcome_message(&DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Upgrade(
            deploy_request(),
        )));
    assert_eq!(message, "Chaincode marbles version 2.0 upgraded on channel mychannel.");

    let message = outcome_message(&DispatchOutcome::UserEnrolled {
        user_id: "alice".to_string(),
    });
    assert_eq!(message, "User alice enrolled.");
}

#[test]
fn admin_cert_outcome_lists_steps() {
    let report = AdminCertReport {
        completed: AdminStep::ORDER.to_vec(),
        failure: None,
    };
    let message = outcome_message(&DispatchOutcome::AdminCertInstalled(report));
    assert!(message.contains("add_admin_cert, stop_peer, start_peer"), "{message}");
}

#[test]
fn usage_failures_map_to_exit_one_with_usage_text() {
    let err = dispatch_failure(
        &Invocation::default(),
        &DispatchError::Usage(UsageError::MissingVerb),
    );
    assert_eq!(err.status, ExitStatus::Usage);
    assert_eq!(err.status.code(), 1);
    assert!(err.message.contains("Usage: ibpctl"));
}

#[test]
fn operational_failures_map_to_exit_two() {
    let err = dispatch_failure(&invocation("cc-query"), &DispatchError::Unimplemented {
        verb: "cc-query",
    });
    assert_eq!(err.status, ExitStatus::Failure);
    assert_eq!(err.status.code(), 2);
    assert!(err.message.contains("cc-query is not implemented"), "{}", err.message);
}

#[test]
fn partial_completion_reports_applied_steps() {
    let report = AdminCertReport {
        completed: vec![AdminStep::AddCert],
        failure: Some(StepFailure {
            step: AdminStep::StopPeer,
            cause: StepCause::Rejected,
        }),
    };
    let err =
        dispatch_failure(&invocation("add-admin-cert"), &DispatchError::PartialCompletion(report));
    assert_eq!(err.status, ExitStatus::Failure);
    assert!(err.message.contains("stop_peer"), "{}", err.message);
    assert!(err.message.contains("completed steps remain in effect"), "{}", err.message);
}
