// crates/ibpctl-gateway/src/http.rs
// ============================================================================
// Module: HTTP Gateway
// Description: Network gateway backed by a network agent REST endpoint.
// Purpose: Translate gateway operations into bounded HTTP exchanges.
// Dependencies: ibpctl-core, ibpctl-config, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Every operation is one JSON request against the profile endpoint. Replies
//! carry `{"ok": bool, "message"?: string, "token"?: string}`:
//! - `ok: true` accepts the operation.
//! - `ok: false` with a message is an explicit error.
//! - `ok: false` without a message is a bare rejection.
//!
//! Non-2xx statuses fail closed as [`GatewayError::Status`]. Requests with
//! empty required fields are refused locally before anything is sent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::path::Path;

use ibpctl_config::NetworkProfile;
use ibpctl_core::AdminCertRequest;
use ibpctl_core::DeployRequest;
use ibpctl_core::GatewayError;
use ibpctl_core::InstallRequest;
use ibpctl_core::NetworkGateway;
use ibpctl_core::read_bytes_with_limit;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum response body size in bytes.
pub const MAX_RESPONSE_BYTES: usize = 256 * 1024;
/// Maximum size of a PEM certificate or key file in bytes.
pub const MAX_PEM_BYTES: usize = 64 * 1024;
/// Maximum characters of a response body kept in status errors.
const MAX_ERROR_BODY_CHARS: usize = 512;
/// HTTP status the agent uses for an already-installed admin cert.
const STATUS_CONFLICT: u16 = 409;

// ============================================================================
// SECTION: Session
// ============================================================================

/// Authenticated HTTP session.
#[derive(Debug, Clone)]
pub struct HttpSession {
    /// Validated network profile.
    profile: NetworkProfile,
    /// Parsed endpoint base URL.
    base: Url,
    /// HTTP client configured from the profile.
    client: Client,
    /// Admin token returned by enrollment.
    token: Option<String>,
}

impl HttpSession {
    /// Returns the network profile.
    #[must_use]
    pub const fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    /// Returns the admin token, once enrolled.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the bearer credential: the API key, else the admin token.
    fn bearer(&self) -> Option<&str> {
        self.profile.api_key.as_deref().or(self.token.as_deref())
    }
}

// ============================================================================
// SECTION: Wire Types
// ============================================================================

/// Agent reply payload.
#[derive(Debug, Deserialize)]
struct Reply {
    /// Whether the agent accepted the operation.
    ok: bool,
    /// Error or status message.
    #[serde(default)]
    message: Option<String>,
    /// Admin token (enrollment only).
    #[serde(default)]
    token: Option<String>,
}

impl Reply {
    /// Converts the reply into a gateway verdict.
    fn verdict(self) -> Result<bool, GatewayError> {
        if self.ok {
            return Ok(true);
        }
        match self.message {
            Some(message) if !message.trim().is_empty() => Err(GatewayError::Reported(message)),
            _ => Ok(false),
        }
    }
}

/// Raw HTTP exchange result.
struct Exchange {
    /// Response status code.
    status: u16,
    /// Response body, size-limited.
    body: Vec<u8>,
}

impl Exchange {
    /// Returns true for 2xx statuses.
    fn is_success(&self) -> bool {
        (200 .. 300).contains(&self.status)
    }

    /// Decodes a successful reply, failing closed on other statuses.
    fn reply(self) -> Result<Reply, GatewayError> {
        if !self.is_success() {
            let body =
                String::from_utf8_lossy(&self.body).chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(GatewayError::Status {
                status: self.status,
                body,
            });
        }
        serde_json::from_slice(&self.body)
            .map_err(|err| GatewayError::Protocol(format!("invalid agent reply: {err}")))
    }
}

/// Admin enrollment body.
#[derive(Serialize)]
struct AdminEnrollBody<'a> {
    /// Enrollment identifier.
    enrollment_id: &'a str,
    /// Enrollment secret.
    enrollment_secret: &'a str,
    /// Organization name.
    organization: &'a str,
    /// Organization MSP identifier.
    msp_id: &'a str,
    /// Register the identity before enrolling.
    register: bool,
}

/// User enrollment body.
#[derive(Serialize)]
struct UserEnrollBody<'a> {
    /// User identifier.
    user_id: &'a str,
    /// Enrollment secret.
    secret: &'a str,
    /// Organization name.
    organization: &'a str,
}

/// Chaincode install body.
#[derive(Serialize)]
struct InstallBody<'a> {
    /// Chaincode identifier.
    cc_id: &'a str,
    /// Chaincode version.
    version: &'a str,
    /// Go workspace path.
    #[serde(skip_serializing_if = "str::is_empty")]
    go_path: &'a str,
    /// Chaincode source root path.
    cc_src_root_path: &'a str,
    /// Collections config path.
    #[serde(skip_serializing_if = "str::is_empty")]
    collections_config: &'a str,
}

/// Chaincode instantiate/upgrade body.
#[derive(Serialize)]
struct DeployBody<'a> {
    /// Chaincode identifier.
    cc_id: &'a str,
    /// Chaincode version.
    version: &'a str,
    /// Chaincode source root path.
    #[serde(skip_serializing_if = "str::is_empty")]
    cc_src_root_path: &'a str,
    /// Endorsement policy.
    #[serde(skip_serializing_if = "str::is_empty")]
    cc_policy: &'a str,
    /// Init arguments.
    init_params: Vec<String>,
    /// Collections config path.
    #[serde(skip_serializing_if = "str::is_empty")]
    collections_config: &'a str,
}

/// Admin certificate upload body.
#[derive(Serialize)]
struct AdminCertBody<'a> {
    /// Certificate name.
    name: &'a str,
    /// PEM certificate.
    certificate: String,
}

/// Wallet entry body.
#[derive(Serialize)]
struct KeyEntryBody<'a> {
    /// Entry name.
    name: &'a str,
    /// Organization MSP identifier.
    msp_id: &'a str,
    /// PEM certificate.
    certificate: String,
    /// PEM private key.
    private_key: String,
}

/// Empty JSON object body.
#[derive(Serialize)]
struct EmptyBody {}

// ============================================================================
// SECTION: HTTP Gateway
// ============================================================================

/// Network gateway speaking to a network agent over HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpGateway;

impl HttpGateway {
    /// Creates an HTTP gateway.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the URL for `segments` under the session endpoint.
    fn url(session: &HttpSession, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = session.base.clone();
        url.path_segments_mut()
            .map_err(|()| GatewayError::Profile("endpoint cannot be a base url".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request.
    fn get(session: &HttpSession, segments: &[&str]) -> Result<Exchange, GatewayError> {
        let url = Self::url(session, segments)?;
        Self::send(session, session.client.get(url))
    }

    /// Sends a JSON POST request.
    fn post<B: Serialize>(
        session: &HttpSession,
        segments: &[&str],
        body: &B,
    ) -> Result<Exchange, GatewayError> {
        let url = Self::url(session, segments)?;
        let payload = serde_json::to_vec(body)
            .map_err(|err| GatewayError::Protocol(format!("failed to encode request: {err}")))?;
        let request =
            session.client.post(url).header(CONTENT_TYPE, "application/json").body(payload);
        Self::send(session, request)
    }

    /// Sends a request with auth and reads a bounded response.
    fn send(session: &HttpSession, request: RequestBuilder) -> Result<Exchange, GatewayError> {
        let request = match session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().map_err(|err| GatewayError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let limit = u64::try_from(MAX_RESPONSE_BYTES).unwrap_or(u64::MAX);
        if response.content_length().is_some_and(|length| length > limit) {
            return Err(GatewayError::Protocol(format!(
                "response exceeds {MAX_RESPONSE_BYTES} bytes"
            )));
        }
        let mut body = Vec::new();
        response
            .take(limit.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        if body.len() > MAX_RESPONSE_BYTES {
            return Err(GatewayError::Protocol(format!(
                "response exceeds {MAX_RESPONSE_BYTES} bytes"
            )));
        }
        Ok(Exchange {
            status,
            body,
        })
    }
}

// ============================================================================
// SECTION: Gateway Implementation
// ============================================================================

impl NetworkGateway for HttpGateway {
    type Session = HttpSession;

    fn initialize_session(&self, profile: &[u8]) -> Result<Self::Session, GatewayError> {
        let profile = NetworkProfile::from_slice(profile)
            .map_err(|err| GatewayError::Profile(err.to_string()))?;
        let base = profile.endpoint_url().map_err(|err| GatewayError::Profile(err.to_string()))?;
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(profile.timeout())
            .build()
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        let session = HttpSession {
            profile,
            base,
            client,
            token: None,
        };
        if Self::get(&session, &["v1", "health"])?.reply()?.verdict()? {
            Ok(session)
        } else {
            Err(GatewayError::Reported("network agent is not healthy".to_string()))
        }
    }

    fn enroll_admin(
        &self,
        session: &mut Self::Session,
        register: bool,
    ) -> Result<bool, GatewayError> {
        let admin = &session.profile.admin;
        let body = AdminEnrollBody {
            enrollment_id: &admin.enrollment_id,
            enrollment_secret: &admin.enrollment_secret,
            organization: &session.profile.organization,
            msp_id: &session.profile.msp_id,
            register,
        };
        let mut reply =
            Self::post(session, &["v1", "identities", "admin", "enroll"], &body)?.reply()?;
        if reply.ok {
            session.token = reply.token.take();
        }
        reply.verdict()
    }

    fn enroll_user(
        &self,
        session: &Self::Session,
        user_id: &str,
        secret: &str,
        org: &str,
    ) -> Result<bool, GatewayError> {
        require(&[("userID", user_id), ("secret", secret), ("org", org)])?;
        let body = UserEnrollBody {
            user_id,
            secret,
            organization: org,
        };
        Self::post(session, &["v1", "identities", "users", "enroll"], &body)?.reply()?.verdict()
    }

    fn install_chaincode(
        &self,
        session: &Self::Session,
        request: &InstallRequest,
    ) -> Result<bool, GatewayError> {
        require(&[
            ("ccID", &request.cc_id),
            ("version", &request.version),
            ("ccSrcRootPath", &request.cc_src_root_path),
        ])?;
        let body = InstallBody {
            cc_id: &request.cc_id,
            version: &request.version,
            go_path: &request.go_path,
            cc_src_root_path: &request.cc_src_root_path,
            collections_config: &request.collections_config,
        };
        Self::post(session, &["v1", "chaincodes", "install"], &body)?.reply()?.verdict()
    }

    fn instantiate_chaincode(
        &self,
        session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError> {
        deploy(session, request, "instantiate")
    }

    fn upgrade_chaincode(
        &self,
        session: &Self::Session,
        request: &DeployRequest,
    ) -> Result<bool, GatewayError> {
        deploy(session, request, "upgrade")
    }

    fn add_admin_cert(
        &self,
        session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError> {
        require(&[
            ("orgMSP", &request.org_msp),
            ("adminCertName", &request.admin_cert_name),
            ("certFilePath", &request.cert_file_path),
        ])?;
        let body = AdminCertBody {
            name: &request.admin_cert_name,
            certificate: read_pem(&request.cert_file_path)?,
        };
        let exchange =
            Self::post(session, &["v1", "msps", &request.org_msp, "admin-certs"], &body)?;
        if exchange.status == STATUS_CONFLICT {
            return Ok(true);
        }
        exchange.reply()?.verdict()
    }

    fn stop_peer(&self, session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError> {
        require(&[("peerID", peer_id)])?;
        Self::post(session, &["v1", "peers", peer_id, "stop"], &EmptyBody {})?.reply()?.verdict()
    }

    fn start_peer(&self, session: &Self::Session, peer_id: &str) -> Result<bool, GatewayError> {
        require(&[("peerID", peer_id)])?;
        Self::post(session, &["v1", "peers", peer_id, "start"], &EmptyBody {})?.reply()?.verdict()
    }

    fn sync_channel(&self, session: &Self::Session, channel: &str) -> Result<bool, GatewayError> {
        require(&[("channel", channel)])?;
        Self::post(session, &["v1", "channels", channel, "sync"], &EmptyBody {})?
            .reply()?
            .verdict()
    }

    fn generate_key_entry(
        &self,
        session: &Self::Session,
        request: &AdminCertRequest,
    ) -> Result<bool, GatewayError> {
        require(&[
            ("adminCertName", &request.admin_cert_name),
            ("certFilePath", &request.cert_file_path),
            ("keyFilePath", &request.key_file_path),
        ])?;
        let body = KeyEntryBody {
            name: &request.admin_cert_name,
            msp_id: &session.profile.msp_id,
            certificate: read_pem(&request.cert_file_path)?,
            private_key: read_pem(&request.key_file_path)?,
        };
        Self::post(session, &["v1", "wallet", "entries"], &body)?.reply()?.verdict()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Shared instantiate/upgrade exchange.
fn deploy(
    session: &HttpSession,
    request: &DeployRequest,
    action: &str,
) -> Result<bool, GatewayError> {
    require(&[
        ("ccID", &request.cc_id),
        ("version", &request.version),
        ("channel", &request.channel),
    ])?;
    let body = DeployBody {
        cc_id: &request.cc_id,
        version: &request.version,
        cc_src_root_path: &request.cc_src_root_path,
        cc_policy: &request.cc_policy,
        init_params: request
            .init_params
            .iter()
            .map(|param| String::from_utf8_lossy(param).into_owned())
            .collect(),
        collections_config: &request.collections_config,
    };
    HttpGateway::post(session, &["v1", "channels", &request.channel, "chaincodes", action], &body)?
        .reply()?
        .verdict()
}

/// Refuses requests with empty required fields.
fn require(fields: &[(&str, &str)]) -> Result<(), GatewayError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(GatewayError::Protocol(format!("missing required field {name}"))),
        None => Ok(()),
    }
}

/// Reads a bounded PEM file as UTF-8 text.
fn read_pem(path: &str) -> Result<String, GatewayError> {
    let bytes = read_bytes_with_limit(Path::new(path), MAX_PEM_BYTES)
        .map_err(|err| GatewayError::Io(format!("{path}: {err}")))?;
    String::from_utf8(bytes).map_err(|_| GatewayError::Io(format!("{path}: not utf-8")))
}
