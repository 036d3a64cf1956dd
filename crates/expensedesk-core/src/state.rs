//! Transaction table state machine
//!
//! `TableState` is a value. Every change goes through [`TableState::apply`],
//! which consumes the old state and returns the next one.

use std::sync::Arc;

use crate::error::FetchError;
use crate::models::Transaction;
use crate::table::{derive_view, filter_view, next_directive, SortCycle, SortDirective};
use crate::types::SortKey;

/// Progress of the one transaction fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Fetch not requested yet
    #[default]
    Idle,
    /// Fetch in flight
    Loading,
    /// Records as delivered by the provider
    Loaded(Arc<Vec<Transaction>>),
    /// Provider failed
    Failed(FetchError),
}

/// Inputs to the state machine
///
/// Fetch completions carry the generation their fetch was started under;
/// a completion from an older generation is ignored.
#[derive(Debug, Clone)]
pub enum TableEvent {
    FetchStarted,
    FetchSucceeded { generation: u64, records: Vec<Transaction> },
    FetchFailed { generation: u64, error: FetchError },
    SortRequested(SortKey),
    SortCleared,
}

/// What the table body should show
#[derive(Debug, PartialEq)]
pub enum TableView<'a> {
    /// Idle or loading; no rows are rendered
    Pending,
    /// Fetch failed; the error replaces the rows
    Failed(&'a FetchError),
    /// Rows in display order
    Ready(Vec<&'a Transaction>),
}

/// Load progress combined with the active sort directive
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub load: LoadState,
    pub sort: Option<SortDirective>,
    pub cycle: SortCycle,
    /// Bumped by every `FetchStarted`
    pub generation: u64,
}

impl TableState {
    pub fn new(cycle: SortCycle, sort: Option<SortDirective>) -> Self {
        Self {
            load: LoadState::Idle,
            sort,
            cycle,
            generation: 0,
        }
    }

    /// Transition to the next state
    pub fn apply(self, event: TableEvent) -> Self {
        match event {
            TableEvent::FetchStarted => Self {
                load: LoadState::Loading,
                generation: self.generation + 1,
                ..self
            },
            TableEvent::FetchSucceeded { generation, .. } | TableEvent::FetchFailed { generation, .. }
                if generation != self.generation =>
            {
                log::debug!(
                    "Ignoring fetch result from generation {} (current {})",
                    generation,
                    self.generation
                );
                self
            }
            TableEvent::FetchSucceeded { records, .. } => Self {
                load: LoadState::Loaded(Arc::new(records)),
                ..self
            },
            TableEvent::FetchFailed { error, .. } => Self { load: LoadState::Failed(error), ..self },
            TableEvent::SortRequested(key) => Self {
                sort: next_directive(self.sort, key, self.cycle),
                ..self
            },
            TableEvent::SortCleared => Self { sort: None, ..self },
        }
    }

    /// Whether a completion tagged `generation` would still be applied
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Idle | LoadState::Loading)
    }

    /// Source records, once loaded
    pub fn records(&self) -> Option<&[Transaction]> {
        match &self.load {
            LoadState::Loaded(records) => Some(records.as_slice()),
            _ => None,
        }
    }

    /// Rows to display; views are only derived over loaded records
    pub fn view(&self) -> TableView<'_> {
        self.filtered_view("")
    }

    /// Rows to display, narrowed by a search query
    pub fn filtered_view(&self, query: &str) -> TableView<'_> {
        match &self.load {
            LoadState::Idle | LoadState::Loading => TableView::Pending,
            LoadState::Failed(error) => TableView::Failed(error),
            LoadState::Loaded(records) => {
                TableView::Ready(filter_view(derive_view(records, self.sort), query))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::tx;
    use crate::types::TransactionStatus;

    fn two() -> Vec<Transaction> {
        vec![
            tx("1", 10050, "2024-03-15", "Acme Corp", "INV-001", TransactionStatus::Approved),
            tx("2", 7525, "2024-03-14", "TechStart Inc", "INV-002", TransactionStatus::Pending),
        ]
    }

    /// Completion for a state that never saw `FetchStarted`
    fn loaded(records: Vec<Transaction>) -> TableEvent {
        TableEvent::FetchSucceeded { generation: 0, records }
    }

    fn ready_ids(view: TableView<'_>) -> Vec<String> {
        match view {
            TableView::Ready(rows) => rows.iter().map(|t| t.id.clone()).collect(),
            other => panic!("expected rows, got {:?}", other),
        }
    }

    #[test]
    fn test_no_view_while_loading() {
        let state = TableState::default();
        assert_eq!(state.view(), TableView::Pending);
        let state = state.apply(TableEvent::FetchStarted);
        assert!(state.is_loading());
        assert_eq!(state.view(), TableView::Pending);
    }

    #[test]
    fn test_sort_requested_while_loading_applies_after_load() {
        let state = TableState::default()
            .apply(TableEvent::FetchStarted)
            .apply(TableEvent::SortRequested(SortKey::Amount))
            .apply(TableEvent::FetchSucceeded { generation: 1, records: two() });
        assert_eq!(ready_ids(state.view()), vec!["2", "1"]);
    }

    #[test]
    fn test_failure_replaces_rows() {
        let error = FetchError::new("static", "unreachable");
        let state = TableState::default()
            .apply(TableEvent::FetchStarted)
            .apply(TableEvent::FetchFailed { generation: 1, error: error.clone() });
        assert_eq!(state.view(), TableView::Failed(&error));
        assert!(state.records().is_none());
    }

    #[test]
    fn test_refetch_replaces_records_wholesale() {
        let state = TableState::default()
            .apply(loaded(two()))
            .apply(loaded(two()[..1].to_vec()));
        assert_eq!(state.records().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_transitions_leave_records_untouched() {
        let loaded = TableState::default().apply(loaded(two()));
        let sorted = loaded
            .clone()
            .apply(TableEvent::SortRequested(SortKey::Amount))
            .apply(TableEvent::SortRequested(SortKey::Amount));
        assert_eq!(loaded.records(), sorted.records());
        assert_eq!(ready_ids(sorted.view()), vec!["1", "2"]);
        assert_eq!(ready_ids(sorted.apply(TableEvent::SortCleared).view()), vec!["1", "2"]);
        assert_eq!(ready_ids(loaded.view()), vec!["1", "2"]);
    }

    #[test]
    fn test_filtered_view() {
        let state = TableState::default().apply(loaded(two()));
        assert_eq!(ready_ids(state.filtered_view("techstart")), vec!["2"]);
    }

    #[test]
    fn test_empty_records_give_empty_view() {
        let state = TableState::default()
            .apply(loaded(vec![]))
            .apply(TableEvent::SortRequested(SortKey::Date));
        assert_eq!(state.view(), TableView::Ready(vec![]));
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let state = TableState::default()
            .apply(TableEvent::FetchStarted)
            .apply(TableEvent::FetchStarted);
        assert_eq!(state.generation, 2);
        assert!(!state.is_current(1));

        let state = state
            .apply(TableEvent::FetchSucceeded { generation: 2, records: two() })
            .apply(TableEvent::FetchSucceeded { generation: 1, records: two()[..1].to_vec() })
            .apply(TableEvent::FetchFailed {
                generation: 1,
                error: FetchError::new("static", "late"),
            });
        assert_eq!(state.records().map(|r| r.len()), Some(2));
    }
}
