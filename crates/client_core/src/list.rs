use std::sync::Arc;

use shared::domain::{ListQuery, SortColumn, WireRecord};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    classify::{classify, ListOutcome},
    error::FetchFailure,
    ApiTransport, Navigator,
};

/// Where the list screen is in its lifecycle. `Unauthorized` is terminal for
/// this instance; recovery goes through re-authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Idle,
    Loading,
    Loaded,
    Unauthorized,
    Failed,
}

/// Cloned view of the controller state for rendering.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub phase: ListPhase,
    pub records: Vec<WireRecord>,
    pub page: u32,
    pub sort: SortColumn,
    pub has_more: bool,
    pub failure: Option<FetchFailure>,
}

impl ListSnapshot {
    pub fn error_message(&self) -> Option<String> {
        self.failure.map(|failure| failure.to_string())
    }
}

struct ListState {
    phase: ListPhase,
    query: ListQuery,
    generation: u64,
    records: Vec<WireRecord>,
    has_more: bool,
    failure: Option<FetchFailure>,
}

/// Owns pagination/sort state and reconciles fetch responses with it.
///
/// Every outbound fetch is stamped with a generation counter; a response is
/// applied only if its stamp is still current when it resolves. A slow
/// response for a superseded page or sort order therefore can never overwrite
/// state produced by a later request. There is no cancellation; staleness is
/// decided after the fact.
pub struct ListController {
    transport: Arc<ApiTransport>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<ListState>,
}

impl ListController {
    pub fn new(transport: Arc<ApiTransport>, navigator: Arc<dyn Navigator>) -> Arc<Self> {
        Arc::new(Self {
            transport,
            navigator,
            inner: Mutex::new(ListState {
                phase: ListPhase::Idle,
                query: ListQuery::default(),
                generation: 0,
                records: Vec::new(),
                has_more: false,
                failure: None,
            }),
        })
    }

    /// Initial fetch for the current query, issued when the list view mounts.
    pub async fn load(&self) {
        self.fetch().await;
    }

    /// Moves to `page` (clamped to 1). Moving past the known end of the list
    /// is a no-op; anything else triggers a fetch.
    pub async fn set_page(&self, page: u32) {
        let target = page.max(1);
        {
            let mut inner = self.inner.lock().await;
            if inner.phase == ListPhase::Unauthorized {
                return;
            }
            if target > inner.query.page && !inner.has_more {
                debug!(target, "ignoring page past known bound");
                return;
            }
            inner.query.page = target;
        }
        self.fetch().await;
    }

    pub async fn next_page(&self) {
        let page = { self.inner.lock().await.query.page };
        self.set_page(page + 1).await;
    }

    pub async fn prev_page(&self) {
        let page = { self.inner.lock().await.query.page };
        if page > 1 {
            self.set_page(page - 1).await;
        }
    }

    /// Changes the sort column and resets to page 1. Invalid columns are
    /// unrepresentable, so there is nothing to validate here.
    pub async fn set_sort(&self, sort: SortColumn) {
        {
            let mut inner = self.inner.lock().await;
            if inner.phase == ListPhase::Unauthorized {
                return;
            }
            inner.query.sort = sort;
            inner.query.page = 1;
        }
        self.fetch().await;
    }

    /// Re-fetches the current query unchanged. Used after a successful
    /// mutation; keeps the page the user is looking at.
    pub async fn refresh(&self) {
        {
            let inner = self.inner.lock().await;
            if inner.phase == ListPhase::Unauthorized {
                return;
            }
        }
        self.fetch().await;
    }

    pub async fn snapshot(&self) -> ListSnapshot {
        let inner = self.inner.lock().await;
        ListSnapshot {
            phase: inner.phase,
            records: inner.records.clone(),
            page: inner.query.page,
            sort: inner.query.sort,
            has_more: inner.has_more,
            failure: inner.failure,
        }
    }

    async fn fetch(&self) {
        let (generation, query) = {
            let mut inner = self.inner.lock().await;
            inner.generation += 1;
            inner.phase = ListPhase::Loading;
            (inner.generation, inner.query)
        };
        debug!(
            generation,
            page = query.page,
            sort = query.sort.as_str(),
            "issuing list fetch"
        );
        let outcome = self.perform(&query).await;
        self.apply(generation, outcome).await;
    }

    async fn perform(&self, query: &ListQuery) -> ListOutcome {
        let response = match self
            .transport
            .http()
            .get(self.transport.url("/wire-messages"))
            .query(query)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!("list fetch failed: {err}");
                return ListOutcome::TransportFailure;
            }
        };
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("list fetch body read failed: {err}");
                return ListOutcome::TransportFailure;
            }
        };
        classify(status, &body)
    }

    /// Applies a classified outcome, unless a newer fetch superseded it.
    /// An expired session is terminal and overrides the generation check.
    async fn apply(&self, generation: u64, outcome: ListOutcome) {
        if matches!(outcome, ListOutcome::Unauthorized) {
            {
                let mut inner = self.inner.lock().await;
                inner.phase = ListPhase::Unauthorized;
                inner.records.clear();
                inner.has_more = false;
                inner.failure = None;
            }
            warn!("session expired; returning to login");
            self.navigator.to_login().await;
            return;
        }

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "discarding stale list response"
            );
            return;
        }

        match outcome {
            ListOutcome::Items(records) => {
                inner.has_more = records.len() as u32 == inner.query.limit;
                info!(
                    page = inner.query.page,
                    count = records.len(),
                    has_more = inner.has_more,
                    "list loaded"
                );
                inner.records = records;
                inner.failure = None;
                inner.phase = ListPhase::Loaded;
            }
            ListOutcome::Empty => {
                inner.records.clear();
                inner.has_more = false;
                inner.failure = None;
                inner.phase = ListPhase::Loaded;
            }
            ListOutcome::Malformed => {
                warn!("list response had unexpected shape");
                inner.failure = Some(FetchFailure::Malformed);
                inner.phase = ListPhase::Failed;
            }
            ListOutcome::TransportFailure => {
                inner.failure = Some(FetchFailure::Transport);
                inner.phase = ListPhase::Failed;
            }
            ListOutcome::Unauthorized => {}
        }
    }
}
