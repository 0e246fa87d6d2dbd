// crates/ibpctl-gateway/src/lib.rs
// ============================================================================
// Module: ibpctl Gateway Library
// Description: Network gateway implementations.
// Purpose: Reach the blockchain network through its agent REST endpoint.
// Dependencies: ibpctl-core, ibpctl-config, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! `ibpctl-gateway` implements [`ibpctl_core::NetworkGateway`] over HTTP.
//! The dispatcher stays unaware of transport details; everything here is
//! blocking and single-shot, with timeouts taken from the network profile.
//!
//! Security posture: responses are untrusted and size-limited; redirects are
//! never followed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::HttpGateway;
pub use http::HttpSession;
pub use http::MAX_PEM_BYTES;
pub use http::MAX_RESPONSE_BYTES;
