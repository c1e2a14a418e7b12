//! Refresh controller
//!
//! Owns the cached dataset, the in-progress flag and the page document.
//! A refresh asks the backend to update, then fetches the dataset; while it
//! runs the cached copy stays on screen, and on failure the cached copy is
//! kept.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::{
    error::Error,
    helpers::symbol_matches,
    provider::CoinSource,
    types::{ApiStatus, CoinRecord},
    view::{MessageKind, Page},
};

pub const MESSAGE_UPDATING: &str = "Updating data...";
pub const MESSAGE_UPDATED: &str = "Data updated";
pub const MESSAGE_LOAD_FAILED: &str = "Failed to load data";
pub const MESSAGE_UPDATE_FAILED: &str = "Data update failed";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// Another refresh was already running; nothing was done.
    Skipped,
    Updated { records: usize },
    Failed { error: String, served_stale: bool },
}

/// Last fetched dataset plus the in-progress flag.
#[derive(Debug, Default)]
pub struct ClientState {
    cache: RwLock<Vec<CoinRecord>>,
    refreshing: AtomicBool,
}

impl ClientState {
    pub fn new() -> ClientState {
        ClientState::default()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::SeqCst)
    }

    /// Non-blocking try-lock; `None` when a refresh already holds it.
    pub fn try_begin_refresh(&self) -> Option<RefreshGuard<'_>> {
        self.refreshing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RefreshGuard { state: self })
    }

    pub async fn snapshot(&self) -> Vec<CoinRecord> {
        self.cache.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.cache.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.read().await.is_empty()
    }

    pub async fn replace(&self, records: Vec<CoinRecord>) {
        *self.cache.write().await = records;
    }
}

/// Clears the in-progress flag when dropped, whichever way the refresh ends.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
    state: &'a ClientState,
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.state.refreshing.store(false, Ordering::SeqCst);
    }
}

struct Fetched {
    records: Vec<CoinRecord>,
    source_updated_at: Option<String>,
}

#[derive(Debug)]
pub struct PollingRenderer<S> {
    source: S,
    state: ClientState,
    page: Arc<Mutex<Page>>,
    message_timeout: Duration,
}

impl<S: CoinSource> PollingRenderer<S> {
    pub fn new(source: S, message_timeout: Duration) -> PollingRenderer<S> {
        PollingRenderer {
            source,
            state: ClientState::new(),
            page: Arc::new(Mutex::new(Page::new())),
            message_timeout,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn page(&self) -> MutexGuard<'_, Page> {
        lock_page(&self.page)
    }

    pub fn render_html(&self) -> String {
        self.page().to_html()
    }

    /// Runs one update-then-fetch cycle unless one is already running.
    /// `force` marks a user initiated refresh, which reports its progress
    /// and always reports failures.
    pub async fn trigger_refresh(&self, force: bool) -> RefreshOutcome {
        let Some(_guard) = self.state.try_begin_refresh() else {
            debug!("Refresh already in progress, skipping");
            return RefreshOutcome::Skipped;
        };

        info!("Refreshing open interest data (manual: {})", force);

        if force {
            self.show_transient_message(MESSAGE_UPDATING, MessageKind::Success);
        }

        let cached = self.state.snapshot().await;
        {
            let mut page = self.page();
            page.set_loading(true);
            if !cached.is_empty() {
                page.render_table(&cached);
            }
        }

        let outcome = match self.fetch_latest().await {
            Ok(Fetched {
                records,
                source_updated_at,
            }) => {
                let count = records.len();
                {
                    let mut page = self.page();
                    page.render_table(&records);
                    page.set_refreshed(Utc::now(), source_updated_at);
                }
                self.state.replace(records).await;

                if force {
                    self.show_transient_message(
                        MESSAGE_UPDATED,
                        MessageKind::Success,
                    );
                }

                info!("Refresh complete, {} records", count);
                RefreshOutcome::Updated { records: count }
            },
            Err(e) => self.handle_failure(e, force).await,
        };

        self.page().set_loading(false);

        outcome
    }

    async fn fetch_latest(&self) -> Result<Fetched, Error> {
        let update = self.source.request_update().await?;
        if !update.is_success() {
            return Err(Error::UpdateRejected(update.reason()));
        }

        let coins = self.source.fetch_coins().await?;
        if !coins.is_success() {
            return Err(Error::FetchRejected(coins.reason()));
        }

        Ok(Fetched {
            records: coins.data.unwrap_or_default(),
            source_updated_at: coins.cache_update_time,
        })
    }

    async fn handle_failure(&self, e: Error, force: bool) -> RefreshOutcome {
        error!("Refresh failed: {}", e);

        let cached = self.state.snapshot().await;
        let served_stale = !cached.is_empty();

        if served_stale {
            self.page().render_table(&cached);
        }

        if force {
            let reason = match &e {
                Error::UpdateRejected(reason) | Error::FetchRejected(reason) => {
                    reason.to_owned()
                },
                e => e.to_string(),
            };
            self.show_transient_message(
                &format!("{}: {}", MESSAGE_UPDATE_FAILED, reason),
                MessageKind::Error,
            );
        } else if !served_stale {
            self.show_transient_message(MESSAGE_LOAD_FAILED, MessageKind::Error);
        }

        RefreshOutcome::Failed {
            error: e.to_string(),
            served_stale,
        }
    }

    /// Re-renders the cached records whose symbol contains `query`,
    /// ignoring case. Returns the number of rows shown.
    pub async fn filter_by_symbol(&self, query: &str) -> usize {
        let cached = self.state.snapshot().await;

        let filtered: Vec<CoinRecord> = if query.is_empty() {
            cached
        } else {
            cached
                .into_iter()
                .filter(|coin| symbol_matches(&coin.symbol, query))
                .collect()
        };

        let mut page = self.page();
        page.set_filter(query);
        page.render_table(&filtered);

        filtered.len()
    }

    /// Shows `text` and clears it after the message timeout, unless a newer
    /// message replaced it in the meantime.
    pub fn show_transient_message(&self, text: &str, kind: MessageKind) {
        let seq = self.page().show_message(text, kind);
        let page = Arc::clone(&self.page);
        let timeout = self.message_timeout;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            lock_page(&page).clear_message(seq);
        });
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.page().refreshed_at()
    }
}

fn lock_page(page: &Mutex<Page>) -> MutexGuard<'_, Page> {
    page.lock().unwrap_or_else(PoisonError::into_inner)
}
