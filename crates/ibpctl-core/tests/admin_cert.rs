// crates/ibpctl-core/tests/admin_cert.rs
// ============================================================================
// Module: Admin Cert Installation Tests
// Description: Tests for step ordering and partial completion reporting.
// ============================================================================
//! ## Overview
//! Validates that admin-cert steps run strictly in order, stop at the first
//! failure, and report what already took effect.

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

use std::fs;

use ibpctl_core::AdminCertRequest;
use ibpctl_core::AdminStep;
use ibpctl_core::DispatchError;
use ibpctl_core::DispatchOutcome;
use ibpctl_core::GatewayCall;
use ibpctl_core::GatewayOp;
use ibpctl_core::Invocation;
use ibpctl_core::OperationDispatcher;
use ibpctl_core::ScriptedGateway;
use ibpctl_core::ScriptedSession;
use ibpctl_core::StepCause;
use ibpctl_core::install_admin_cert;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const ADMIN_SPEC: &str = r#"{
    "orgMSP": "Org1MSP",
    "adminCertName": "ops-admin",
    "peerID": "peer0",
    "certFilePath": "/certs/admin.pem",
    "keyFilePath": "/certs/admin.key",
    "channel": "mychannel"
}"#;

const STEP_OPS: [GatewayOp; 5] = [
    GatewayOp::AddAdminCert,
    GatewayOp::StopPeer,
    GatewayOp::StartPeer,
    GatewayOp::SyncChannel,
    GatewayOp::GenerateKeyEntry,
];

fn request() -> AdminCertRequest {
    AdminCertRequest {
        org_msp: "Org1MSP".to_string(),
        admin_cert_name: "ops-admin".to_string(),
        peer_id: "peer0".to_string(),
        cert_file_path: "/certs/admin.pem".to_string(),
        key_file_path: "/certs/admin.key".to_string(),
        channel: "mychannel".to_string(),
    }
}

fn run_steps(gateway: &ScriptedGateway) -> ibpctl_core::AdminCertReport {
    install_admin_cert(gateway, &ScriptedSession::default(), &request(), |_, _| {})
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

#[test]
fn successful_run_calls_every_step_in_order() {
    let gateway = ScriptedGateway::new();
    let report = run_steps(&gateway);
    assert!(report.is_complete());
    assert_eq!(report.completed, AdminStep::ORDER.to_vec());
    assert_eq!(gateway.ops(), STEP_OPS.to_vec());

    let calls = gateway.calls();
    assert_eq!(calls[1], GatewayCall::StopPeer("peer0".to_string()));
    assert_eq!(calls[2], GatewayCall::StartPeer("peer0".to_string()));
    assert_eq!(calls[3], GatewayCall::SyncChannel("mychannel".to_string()));
}

#[test]
fn stop_peer_failure_skips_later_steps() {
    let gateway = ScriptedGateway::new().reject(GatewayOp::StopPeer);
    let report = run_steps(&gateway);
    assert_eq!(gateway.ops(), vec![GatewayOp::AddAdminCert, GatewayOp::StopPeer]);
    assert_eq!(report.completed, vec![AdminStep::AddCert]);
    assert_eq!(report.failed_step(), Some(AdminStep::StopPeer));
    assert!(!report.is_complete());
}

#[test]
fn each_step_failure_is_reported_by_name() {
    for (index, step) in AdminStep::ORDER.iter().enumerate() {
        let gateway = ScriptedGateway::new().fail(step.operation(), "boom");
        let report = run_steps(&gateway);
        assert_eq!(report.completed, AdminStep::ORDER[.. index].to_vec());
        let failure = report.failure.clone().unwrap();
        assert_eq!(failure.step, *step);
        assert_eq!(failure.cause, StepCause::Error("protocol error: boom".to_string()));
        assert_eq!(gateway.ops().len(), index + 1);
    }
}

#[test]
fn observer_sees_every_attempted_step() {
    let gateway = ScriptedGateway::new().reject(GatewayOp::SyncChannel);
    let mut seen = Vec::new();
    let report = install_admin_cert(&gateway, &ScriptedSession::default(), &request(), |step, result| {
        seen.push((step, matches!(result, Ok(true))));
    });
    assert_eq!(
        seen,
        vec![
            (AdminStep::AddCert, true),
            (AdminStep::StopPeer, true),
            (AdminStep::StartPeer, true),
            (AdminStep::SyncChannel, false),
        ]
    );
    assert_eq!(report.failed_step(), Some(AdminStep::SyncChannel));
}

// ============================================================================
// SECTION: Dispatch
// ============================================================================

fn dispatch_admin_cert(gateway: &ScriptedGateway) -> Result<DispatchOutcome, DispatchError> {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("net.yaml");
    let spec = dir.path().join("admin.json");
    fs::write(&config, "name: test\n").unwrap();
    fs::write(&spec, ADMIN_SPEC).unwrap();
    let invocation = Invocation {
        config: Some(config),
        spec: Some(spec),
        verb: Some("add-admin-cert".to_string()),
        args: Vec::new(),
    };
    OperationDispatcher::new(gateway.clone()).dispatch(&invocation)
}

#[test]
fn dispatch_reports_installed_certificate() {
    let gateway = ScriptedGateway::new();
    let outcome = dispatch_admin_cert(&gateway).unwrap();
    let DispatchOutcome::AdminCertInstalled(report) = outcome else {
        panic!("expected admin cert outcome");
    };
    assert!(report.is_complete());
    assert_eq!(gateway.calls()[2], GatewayCall::AddAdminCert(request()));
}

#[test]
fn dispatch_surfaces_partial_completion() {
    let gateway = ScriptedGateway::new().reject(GatewayOp::StartPeer);
    let err = dispatch_admin_cert(&gateway).unwrap_err();
    let DispatchError::PartialCompletion(report) = &err else {
        panic!("expected partial completion");
    };
    assert_eq!(report.completed, vec![AdminStep::AddCert, AdminStep::StopPeer]);
    assert_eq!(report.failed_step(), Some(AdminStep::StartPeer));
    let message = err.to_string();
    assert!(message.contains("start_peer"));
    assert!(message.contains("add_admin_cert, stop_peer"));
    assert_eq!(err.exit_status().code(), 2);
}
