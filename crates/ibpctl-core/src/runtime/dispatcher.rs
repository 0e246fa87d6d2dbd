// crates/ibpctl-core/src/runtime/dispatcher.rs
// ============================================================================
// Module: Operation Dispatcher
// Description: One-pass state machine from CLI invocation to verdict.
// Purpose: Route verbs to gateway operations and classify every failure.
// Dependencies: crate::{core, interfaces, runtime::admin_cert}, thiserror
// ============================================================================

//! ## Overview
//! [`OperationDispatcher::dispatch`] runs one invocation through a fixed
//! pipeline:
//!
//! 1. Usage: verb and `--config` present, verb known, exact positional arity.
//! 2. Spec gate: verbs that need a spec load it before anything else.
//! 3. Reserved verbs (`cc-query`, `cc-invoke`) fail as unimplemented.
//! 4. Session: read the network profile, open a session, enroll the admin
//!    (registering it first for `init`).
//! 5. The per-verb gateway protocol.
//!
//! ## Invariants
//! - Usage and spec failures happen before any gateway call.
//! - Each gateway operation is attempted at most once; there are no retries.
//! - Every outcome, success or failure, is recorded as an audit verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

use crate::core::AdminCertRequest;
use crate::core::ChaincodeRequest;
use crate::core::CommandDescriptor;
use crate::core::DeployRequest;
use crate::core::InstallRequest;
use crate::core::ReadLimitError;
use crate::core::SpecDocument;
use crate::core::SpecError;
use crate::core::Verb;
use crate::core::describe;
use crate::core::generate_template;
use crate::core::read_bytes_with_limit;
use crate::interfaces::AuditEvent;
use crate::interfaces::AuditSink;
use crate::interfaces::CallOutcome;
use crate::interfaces::GatewayError;
use crate::interfaces::GatewayOp;
use crate::interfaces::NetworkGateway;
use crate::interfaces::NoopAuditSink;
use crate::runtime::admin_cert::AdminCertReport;
use crate::runtime::admin_cert::StepCause;
use crate::runtime::admin_cert::install_admin_cert;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a network profile file in bytes.
pub const MAX_PROFILE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Invocation
// ============================================================================

/// Parsed CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Network profile path (`--config`).
    pub config: Option<PathBuf>,
    /// Spec document path (`--spec`).
    pub spec: Option<PathBuf>,
    /// Verb, if one was given.
    pub verb: Option<String>,
    /// Positional arguments after the verb.
    pub args: Vec<String>,
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Process exit status classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    /// The operation succeeded.
    Success = 0,
    /// The invocation was malformed.
    Usage = 1,
    /// The spec was invalid or the operation failed.
    Failure = 2,
}

impl ExitStatus {
    /// Returns the numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

/// Successful dispatch results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// `init`: the organization admin is registered and enrolled.
    AdminEnrolled,
    /// `enroll`: the user was enrolled.
    UserEnrolled {
        /// Enrolled user identifier.
        user_id: String,
    },
    /// `cc-deploy`, `cc-instantiate`, or `cc-upgrade` was accepted.
    ChaincodeApplied(ChaincodeRequest),
    /// `add-admin-cert` completed every step.
    AdminCertInstalled(AdminCertReport),
    /// `spec-gen`: the rendered template, if the target verb has one.
    Template {
        /// Verb the template was requested for.
        verb: String,
        /// Rendered JSON template.
        template: Option<String>,
    },
}

/// Malformed invocation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// No verb was given.
    #[error("no command given")]
    MissingVerb,
    /// No `--config` path was given.
    #[error("no config file provided")]
    MissingConfig,
    /// The verb is not in the command catalog.
    #[error("unknown command: {0}")]
    UnknownVerb(String),
    /// Wrong number of positional arguments.
    #[error("{verb} expects {expected} argument(s), got {actual}")]
    Arity {
        /// Verb being invoked.
        verb: &'static str,
        /// Required argument count.
        expected: usize,
        /// Supplied argument count.
        actual: usize,
    },
}

/// Dispatch failures; each maps to an [`ExitStatus`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed invocation.
    #[error(transparent)]
    Usage(#[from] UsageError),
    /// The spec document could not be loaded.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// The network profile could not be read.
    #[error("failed to read config file {}: {error}", path.display())]
    Config {
        /// Profile path.
        path: PathBuf,
        /// Underlying read failure.
        error: ReadLimitError,
    },
    /// Session setup or admin enrollment failed.
    #[error("failed to initialize session ({}): {cause}", op.as_str())]
    Session {
        /// Operation that failed.
        op: GatewayOp,
        /// Failure cause.
        cause: StepCause,
    },
    /// A gateway operation failed.
    #[error("{verb} failed ({}): {cause}", op.as_str())]
    Gateway {
        /// Verb being dispatched.
        verb: &'static str,
        /// Operation that failed.
        op: GatewayOp,
        /// Failure cause.
        cause: StepCause,
    },
    /// The verb is reserved but has no implementation.
    #[error("{verb} is not implemented")]
    Unimplemented {
        /// Reserved verb.
        verb: &'static str,
    },
    /// The admin-cert sequence stopped part way.
    #[error("admin cert installation incomplete: {0}")]
    PartialCompletion(AdminCertReport),
}

impl DispatchError {
    /// Returns the exit status class for this error.
    #[must_use]
    pub const fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Usage(_) => ExitStatus::Usage,
            Self::Spec(_)
            | Self::Config {
                ..
            }
            | Self::Session {
                ..
            }
            | Self::Gateway {
                ..
            }
            | Self::Unimplemented {
                ..
            }
            | Self::PartialCompletion(_) => ExitStatus::Failure,
        }
    }
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Gateway protocol selected for a network verb before the session opens.
enum Protocol<'a> {
    /// Register and enroll the organization admin.
    Init,
    /// Enroll a user identity.
    Enroll {
        /// User identifier.
        user_id: &'a str,
        /// Enrollment secret.
        secret: &'a str,
        /// Organization name.
        org: &'a str,
    },
    /// Install chaincode on the organization peers.
    Install(InstallRequest),
    /// Instantiate chaincode on a channel.
    Instantiate(DeployRequest),
    /// Upgrade chaincode on a channel.
    Upgrade(DeployRequest),
    /// Run the admin certificate steps.
    AdminCert(AdminCertRequest),
}

/// Drives CLI invocations against a [`NetworkGateway`].
pub struct OperationDispatcher<G> {
    /// Network gateway.
    gateway: G,
    /// Audit sink for gateway calls and verdicts.
    audit: Box<dyn AuditSink>,
}

impl<G: NetworkGateway> OperationDispatcher<G> {
    /// Creates a dispatcher with a no-op audit sink.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            audit: Box::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the underlying gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Dispatches one invocation and records its verdict.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] for malformed invocations, invalid specs, and
    /// any rejected or failed gateway operation.
    pub fn dispatch(&self, invocation: &Invocation) -> Result<DispatchOutcome, DispatchError> {
        let result = self.run(invocation);
        let (code, detail) = match &result {
            Ok(_) => (ExitStatus::Success.code(), None),
            Err(err) => (err.exit_status().code(), Some(err.to_string())),
        };
        self.audit.record(&AuditEvent::verdict(invocation.verb.as_deref(), code, detail));
        result
    }

    /// Runs the dispatch pipeline without recording the verdict.
    fn run(&self, invocation: &Invocation) -> Result<DispatchOutcome, DispatchError> {
        let name = invocation.verb.as_deref().ok_or(UsageError::MissingVerb)?;
        let config = invocation.config.as_deref().ok_or(UsageError::MissingConfig)?;
        let descriptor =
            describe(name).ok_or_else(|| UsageError::UnknownVerb(name.to_string()))?;
        if invocation.args.len() != descriptor.positional_args {
            return Err(arity_error(descriptor, invocation).into());
        }

        let verb = descriptor.verb;
        let protocol = match verb {
            Verb::SpecGen => {
                let target = invocation.args.first().cloned().unwrap_or_default();
                let template = generate_template(&target);
                return Ok(DispatchOutcome::Template {
                    verb: target,
                    template,
                });
            }
            Verb::CcQuery | Verb::CcInvoke => {
                load_spec(descriptor, invocation)?;
                return Err(DispatchError::Unimplemented {
                    verb: descriptor.name,
                });
            }
            Verb::Init => Protocol::Init,
            Verb::Enroll => {
                let [user_id, secret, org] = invocation.args.as_slice() else {
                    return Err(arity_error(descriptor, invocation).into());
                };
                Protocol::Enroll {
                    user_id,
                    secret,
                    org,
                }
            }
            Verb::CcDeploy => {
                Protocol::Install(InstallRequest::from_spec(&load_spec(descriptor, invocation)?))
            }
            Verb::CcInstantiate => {
                Protocol::Instantiate(DeployRequest::from_spec(&load_spec(descriptor, invocation)?))
            }
            Verb::CcUpgrade => {
                Protocol::Upgrade(DeployRequest::from_spec(&load_spec(descriptor, invocation)?))
            }
            Verb::AddAdminCert => {
                Protocol::AdminCert(AdminCertRequest::from_spec(&load_spec(descriptor, invocation)?))
            }
        };

        let profile =
            read_bytes_with_limit(config, MAX_PROFILE_BYTES).map_err(|error| {
                DispatchError::Config {
                    path: config.to_path_buf(),
                    error,
                }
            })?;
        let session_result = self.gateway.initialize_session(&profile);
        let outcome = if session_result.is_ok() { CallOutcome::Accepted } else { CallOutcome::Error };
        let detail = session_result.as_ref().err().map(ToString::to_string);
        self.audit.record(&AuditEvent::gateway_call(
            descriptor.name,
            GatewayOp::InitializeSession,
            outcome,
            detail,
        ));
        let mut session = session_result.map_err(|err| DispatchError::Session {
            op: GatewayOp::InitializeSession,
            cause: StepCause::Error(err.to_string()),
        })?;

        let register = matches!(protocol, Protocol::Init);
        let enrolled = self.gateway.enroll_admin(&mut session, register);
        self.observe(descriptor.name, GatewayOp::EnrollAdmin, enrolled).map_err(|cause| {
            DispatchError::Session {
                op: GatewayOp::EnrollAdmin,
                cause,
            }
        })?;

        match protocol {
            Protocol::Init => Ok(DispatchOutcome::AdminEnrolled),
            Protocol::Enroll {
                user_id,
                secret,
                org,
            } => {
                let result = self.gateway.enroll_user(&session, user_id, secret, org);
                self.require(descriptor.name, GatewayOp::EnrollUser, result)?;
                Ok(DispatchOutcome::UserEnrolled {
                    user_id: user_id.to_string(),
                })
            }
            Protocol::Install(request) => {
                let result = self.gateway.install_chaincode(&session, &request);
                self.require(descriptor.name, GatewayOp::InstallChaincode, result)?;
                Ok(DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Install(request)))
            }
            Protocol::Instantiate(request) => {
                let result = self.gateway.instantiate_chaincode(&session, &request);
                self.require(descriptor.name, GatewayOp::InstantiateChaincode, result)?;
                Ok(DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Instantiate(request)))
            }
            Protocol::Upgrade(request) => {
                let result = self.gateway.upgrade_chaincode(&session, &request);
                self.require(descriptor.name, GatewayOp::UpgradeChaincode, result)?;
                Ok(DispatchOutcome::ChaincodeApplied(ChaincodeRequest::Upgrade(request)))
            }
            Protocol::AdminCert(request) => {
                let report = install_admin_cert(&self.gateway, &session, &request, |step, result| {
                    self.record_call(descriptor.name, step.operation(), result);
                });
                if report.failure.is_some() {
                    return Err(DispatchError::PartialCompletion(report));
                }
                Ok(DispatchOutcome::AdminCertInstalled(report))
            }
        }
    }

    /// Records a gateway call and converts a negative result into a
    /// [`DispatchError::Gateway`].
    fn require(
        &self,
        verb: &'static str,
        op: GatewayOp,
        result: Result<bool, GatewayError>,
    ) -> Result<(), DispatchError> {
        self.observe(verb, op, result).map_err(|cause| DispatchError::Gateway {
            verb,
            op,
            cause,
        })
    }

    /// Records a gateway call and classifies its result.
    fn observe(
        &self,
        verb: &str,
        op: GatewayOp,
        result: Result<bool, GatewayError>,
    ) -> Result<(), StepCause> {
        self.record_call(verb, op, &result);
        StepCause::check(result)
    }

    /// Emits a `gateway_call` audit event.
    fn record_call(&self, verb: &str, op: GatewayOp, result: &Result<bool, GatewayError>) {
        let detail = result.as_ref().err().map(ToString::to_string);
        self.audit.record(&AuditEvent::gateway_call(verb, op, CallOutcome::of(result), detail));
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads the spec document when the verb requires one.
fn load_spec(
    descriptor: &CommandDescriptor,
    invocation: &Invocation,
) -> Result<SpecDocument, DispatchError> {
    if descriptor.requires_spec {
        Ok(SpecDocument::load(invocation.spec.as_deref())?)
    } else {
        Ok(SpecDocument::default())
    }
}

/// Builds the arity error for an invocation.
fn arity_error(descriptor: &CommandDescriptor, invocation: &Invocation) -> UsageError {
    UsageError::Arity {
        verb: descriptor.name,
        expected: descriptor.positional_args,
        actual: invocation.args.len(),
    }
}
