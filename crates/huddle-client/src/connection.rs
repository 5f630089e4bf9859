//! Connection manager for the single shared realtime connection.
//!
//! At most one connection exists at a time. It is created lazily on the first
//! [`ConnectionManager::connect`] call, reused by repeated calls while live,
//! and only ever torn down explicitly. The manager is sans-IO: it owns the
//! handle and its liveness state, while the actual transport is opened by the
//! runtime in response to a [`crate::SessionAction::OpenTransport`].

use std::time::Duration;

use huddle_proto::PartyProfile;

use crate::error::CredentialError;

/// Transport connection policy.
///
/// Retry behavior is owned entirely by the transport layer; no additional
/// policy is layered on top by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectConfig {
    /// Maximum reconnection attempts before giving up.
    pub reconnect_attempts: u32,
    /// Fixed delay between reconnection attempts.
    pub reconnect_delay: Duration,
    /// Timeout for a single connection attempt.
    pub connect_timeout: Duration,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            reconnect_attempts: 5,
            reconnect_delay: Duration::from_millis(1000),
            connect_timeout: Duration::from_secs(20),
        }
    }
}

/// Liveness state of the shared connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No transport.
    Disconnected,
    /// Transport opening.
    Connecting,
    /// Transport established.
    Connected,
    /// Transport failed.
    Error,
}

/// Handle to the shared realtime connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    token: Option<String>,
    state: ConnectionState,
}

impl Connection {
    /// Bearer token read at connect time. `None` for unauthenticated
    /// connections.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Current liveness state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Whether the connection is usable or becoming usable.
    pub fn is_live(&self) -> bool {
        matches!(self.state, ConnectionState::Connecting | ConnectionState::Connected)
    }

    /// Whether the transport is fully established.
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

/// Read-only persistent key-value collaborator.
///
/// Backed by whatever storage the host application uses; the session only
/// ever reads the bearer token and the stored user profile through it.
pub trait CredentialStore {
    /// Stored bearer token, if any.
    fn auth_token(&self) -> Result<Option<String>, CredentialError>;

    /// Stored profile of the signed-in user, if any.
    fn current_user(&self) -> Result<Option<PartyProfile>, CredentialError>;
}

/// Owner of the single shared connection handle.
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    config: ConnectConfig,
    current: Option<Connection>,
}

impl ConnectionManager {
    /// Create a manager with the given transport policy.
    pub fn new(config: ConnectConfig) -> Self {
        Self { config, current: None }
    }

    /// Transport policy for this connection.
    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// Lazily create or reuse the shared connection.
    ///
    /// Idempotent: while a live connection exists it is returned as-is and no
    /// credential read occurs. Otherwise a fresh handle is constructed; stale
    /// handles are never resumed. A failed or missing token read is non-fatal
    /// and produces an unauthenticated connection.
    ///
    /// Returns the handle and whether a new transport must be opened.
    pub fn connect(&mut self, store: &dyn CredentialStore) -> (&Connection, bool) {
        let opened = !self.current.as_ref().is_some_and(Connection::is_live);
        let connection = if opened {
            let token = match store.auth_token() {
                Ok(Some(token)) => Some(token),
                Ok(None) => {
                    tracing::warn!("no auth token in storage, connecting unauthenticated");
                    None
                },
                Err(e) => {
                    tracing::warn!(error = %e, "token read failed, connecting unauthenticated");
                    None
                },
            };
            self.current.insert(Connection { token, state: ConnectionState::Connecting })
        } else {
            // Live handle exists; the fallback never constructs.
            self.current.get_or_insert_with(|| Connection {
                token: None,
                state: ConnectionState::Connecting,
            })
        };
        (connection, opened)
    }

    /// The live connection handle, if any.
    pub fn current(&self) -> Option<&Connection> {
        self.current.as_ref()
    }

    /// Mark the transport as established.
    pub fn mark_connected(&mut self) {
        if let Some(connection) = self.current.as_mut() {
            connection.state = ConnectionState::Connected;
            tracing::debug!("realtime connection established");
        }
    }

    /// Mark the transport as failed.
    pub fn mark_error(&mut self, reason: &str) {
        if let Some(connection) = self.current.as_mut() {
            connection.state = ConnectionState::Error;
            tracing::error!(%reason, "realtime connection error");
        }
    }

    /// Tear down the transport handle. No-op when already disconnected.
    pub fn disconnect(&mut self) {
        if self.current.take().is_some() {
            tracing::debug!("realtime connection closed");
        }
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new(ConnectConfig::default())
    }
}
