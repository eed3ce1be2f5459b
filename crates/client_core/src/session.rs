use std::sync::Arc;

use shared::domain::Credentials;
use tracing::{info, warn};

use crate::{error::AuthError, ApiTransport, Navigator};

/// Submits login credentials and interprets the outcome.
///
/// Holds no state across calls: the session issued on success lives in the
/// transport's cookie store, never here.
pub struct SessionGate {
    transport: Arc<ApiTransport>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGate {
    pub fn new(transport: Arc<ApiTransport>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            transport,
            navigator,
        }
    }

    /// Sends the credentials form-encoded. On success the server attaches the
    /// session to the response and the navigator moves to the list view.
    pub async fn submit(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let response = self
            .transport
            .http()
            .post(self.transport.url("/login"))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                warn!("login request failed: {err}");
                AuthError::Unreachable
            })?;

        if !response.status().is_success() {
            info!(status = %response.status(), "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        info!(username = %credentials.username, "login accepted");
        self.navigator.to_wire_list().await;
        Ok(())
    }
}
