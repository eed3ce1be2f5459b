use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

pub mod classify;
pub mod error;
pub mod list;
pub mod lookup;
pub mod session;
pub mod submit;

pub use classify::{classify, ListOutcome};
pub use error::{AuthError, FetchFailure, LookupError, SubmitError};
pub use list::{ListController, ListPhase, ListSnapshot};
pub use lookup::RecordLookup;
pub use session::SessionGate;
pub use submit::{encode_draft, MutationSubmitter};

/// Shared HTTP transport for every backend call.
///
/// The session capability is a cookie issued by `POST /login`; the cookie
/// store attaches it to each subsequent request, so no component above this
/// layer ever sees or stores session state.
pub struct ApiTransport {
    http: Client,
    base_url: String,
}

impl ApiTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Arc<Self>> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .context("failed to build http client")?;
        Ok(Arc::new(Self {
            http,
            base_url: base_url.into(),
        }))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Capability to move between the login view and the list view. Owned by the
/// embedding application; the core only invokes it.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn to_login(&self);
    async fn to_wire_list(&self);
}

/// Fallback navigator for embeddings without routing.
pub struct MissingNavigator;

#[async_trait]
impl Navigator for MissingNavigator {
    async fn to_login(&self) {
        warn!("navigation requested (login view) but no navigator is installed");
    }

    async fn to_wire_list(&self) {
        warn!("navigation requested (wire list view) but no navigator is installed");
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
