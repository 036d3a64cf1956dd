//! A mounted transaction table
//!
//! The session owns the table state. Each spawned fetch holds only a weak
//! reference plus the generation it was started under, so its result is
//! discarded when the session is gone or a newer fetch has been started.

use std::sync::{Arc, Weak};
use tokio::sync::{RwLock, RwLockWriteGuard};
use tokio::task::JoinHandle;

use crate::provider::ProviderRef;
use crate::state::{LoadState, TableEvent, TableState};
use crate::table::{SortCycle, SortDirective};
use crate::types::SortKey;

/// Shared state reference
pub type StateRef = Arc<RwLock<TableState>>;

pub struct TableSession {
    state: StateRef,
    provider: ProviderRef,
}

impl std::fmt::Debug for TableSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSession")
            .field("provider", &self.provider.name())
            .finish()
    }
}

fn transition(guard: &mut TableState, event: TableEvent) {
    let current = std::mem::take(guard);
    *guard = current.apply(event);
}

async fn dispatch(state: &RwLock<TableState>, event: TableEvent) {
    transition(&mut *state.write().await, event);
}

async fn complete_fetch(weak: Weak<RwLock<TableState>>, provider: ProviderRef, generation: u64) -> bool {
    let result = provider.fetch_all().await;

    let Some(state) = weak.upgrade() else {
        log::debug!("Table torn down before {} answered; dropping result", provider.name());
        return false;
    };

    let mut guard = state.write().await;
    if !guard.is_current(generation) {
        log::debug!(
            "Fetch {} from {} superseded by fetch {}; dropping result",
            generation,
            provider.name(),
            guard.generation
        );
        return false;
    }

    let event = match result {
        Ok(records) => {
            log::info!("Fetched {} transactions from {}", records.len(), provider.name());
            TableEvent::FetchSucceeded { generation, records }
        }
        Err(error) => {
            log::error!(target: "expensedesk::error", "Transaction fetch failed: {}", error);
            TableEvent::FetchFailed { generation, error }
        }
    };
    transition(&mut guard, event);
    true
}

impl TableSession {
    pub fn new(provider: ProviderRef, cycle: SortCycle, sort: Option<SortDirective>) -> Self {
        Self {
            state: Arc::new(RwLock::new(TableState::new(cycle, sort))),
            provider,
        }
    }

    /// Mark a fetch as started and spawn it; the caller's write guard makes
    /// the check that led here and the transition one step
    fn spawn_fetch(&self, mut guard: RwLockWriteGuard<'_, TableState>) -> JoinHandle<bool> {
        transition(&mut guard, TableEvent::FetchStarted);
        let generation = guard.generation;
        drop(guard);

        tokio::spawn(complete_fetch(
            Arc::downgrade(&self.state),
            self.provider.clone(),
            generation,
        ))
    }

    /// Begin the initial fetch. Returns `None` when a fetch was already
    /// requested. The handle resolves to whether the result was applied.
    pub async fn start(&self) -> Option<JoinHandle<bool>> {
        let guard = self.state.write().await;
        if !matches!(guard.load, LoadState::Idle) {
            return None;
        }
        Some(self.spawn_fetch(guard))
    }

    /// Fetch again; the records are replaced as a whole when it completes.
    /// Any fetch still in flight is superseded.
    pub async fn reload(&self) -> JoinHandle<bool> {
        let guard = self.state.write().await;
        self.spawn_fetch(guard)
    }

    /// Header click
    pub async fn request_sort(&self, key: SortKey) {
        dispatch(&self.state, TableEvent::SortRequested(key)).await;
    }

    /// Copy of the current state; records are shared, not cloned
    pub async fn snapshot(&self) -> TableState {
        self.state.read().await.clone()
    }

    /// Unmount the table. Dropping the session releases the only strong
    /// reference to the state, so a fetch still in flight finds its weak
    /// reference dead in `complete_fetch` and discards its result.
    pub fn teardown(self) {
        log::debug!("Tearing down table session for {}", self.provider.name());
    }
}
