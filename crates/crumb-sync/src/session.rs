//! # Session Authority Interface
//!
//! The seam between the remote client and the authentication protocol.
//!
//! ## Single-Retry Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Session Refresh, Exactly Once                         │
//! │                                                                         │
//! │  request + bearer(access_token)                                        │
//! │       │                                                                 │
//! │       ├── not 401 ──────────────────────────────► normal handling      │
//! │       │                                                                 │
//! │       ▼ 401                                                             │
//! │  refresh() ── Err ──► logout() ──► propagate refresh error             │
//! │       │                                                                 │
//! │       ▼ Ok(new token)                                                   │
//! │  retry original request ONCE with new bearer                           │
//! │       │                                                                 │
//! │       ├── not 401 ──────────────────────────────► normal handling      │
//! │       │                                                                 │
//! │       ▼ 401 again                                                       │
//! │  logout() ──► Application failure (NEVER connectivity: a second        │
//! │               auth rejection must not trigger the local fallback)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The protocol itself lives in [`crate::client::RemoteClient`]; this
//! module only defines the interface it drives. The actual token storage
//! and refresh endpoint are the auth layer's business, outside this crate.

use async_trait::async_trait;

use crate::error::RemoteResult;

/// Credential source and session lifecycle hooks for the remote client.
///
/// Implementations must be cheap to call: `access_token` runs before every
/// request.
#[async_trait]
pub trait SessionAuthority: Send + Sync {
    /// The current bearer credential, if a session is active.
    fn access_token(&self) -> Option<String>;

    /// Exchanges the refresh credential for a new access token.
    ///
    /// Called at most once per request, on the first 401.
    async fn refresh(&self) -> RemoteResult<String>;

    /// Tears the session down. Called when the refresh fails or the
    /// retried request is rejected again.
    fn logout(&self);
}
