//! Sortable transaction table
//!
//! The table never reorders the records it was given. A view is a list of
//! references into the source, computed from the active [`SortDirective`]
//! and an optional search query.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use expensedesk_config::TableConfig;
use expensedesk_utils::fixed_amount;

use crate::models::Transaction;
use crate::types::{SortDirection, SortKey};

/// The column and direction that order the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn ascending(key: SortKey) -> Self {
        Self { key, direction: SortDirection::Ascending }
    }

    pub fn descending(key: SortKey) -> Self {
        Self { key, direction: SortDirection::Descending }
    }
}

/// What a repeated click on a descending column does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCycle {
    /// asc -> desc -> desc ...
    #[default]
    TwoState,
    /// asc -> desc -> unsorted -> asc ...
    ThreeState,
}

impl SortCycle {
    pub fn from_config(config: &TableConfig) -> Self {
        if config.reset_after_descending {
            SortCycle::ThreeState
        } else {
            SortCycle::TwoState
        }
    }
}

/// Initial directive from configuration, if a default column is set
pub fn default_directive(config: &TableConfig) -> Option<SortDirective> {
    let key = config.default_sort.as_deref()?.parse::<SortKey>().ok()?;
    Some(SortDirective {
        key,
        direction: config.default_direction.into(),
    })
}

/// Directive that results from a click on `key`'s header
pub fn next_directive(
    current: Option<SortDirective>,
    key: SortKey,
    cycle: SortCycle,
) -> Option<SortDirective> {
    match current {
        Some(active) if active.key == key => match (active.direction, cycle) {
            (SortDirection::Ascending, _) => Some(SortDirective::descending(key)),
            (SortDirection::Descending, SortCycle::TwoState) => Some(active),
            (SortDirection::Descending, SortCycle::ThreeState) => None,
        },
        _ => Some(SortDirective::ascending(key)),
    }
}

/// Compare two transactions on one column, ascending
pub fn compare_by(key: SortKey, a: &Transaction, b: &Transaction) -> Ordering {
    match key {
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::ClientName => a.client_name.cmp(&b.client_name),
        SortKey::InvoiceNumber => a.invoice_number.cmp(&b.invoice_number),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

/// Order `records` by `sort`; with no directive, provider order is kept
pub fn derive_view<'a>(
    records: &'a [Transaction],
    sort: Option<SortDirective>,
) -> Vec<&'a Transaction> {
    let mut view: Vec<&Transaction> = records.iter().collect();
    if let Some(directive) = sort {
        view.sort_by(|a, b| {
            let ordering = compare_by(directive.key, a, b);
            match directive.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
    view
}

/// Lowercased text a search query is matched against
fn search_haystack(tx: &Transaction) -> [String; 5] {
    [
        tx.date.to_lowercase(),
        fixed_amount(tx.amount, 2),
        tx.client_name.to_lowercase(),
        tx.invoice_number.to_lowercase(),
        tx.status.as_str().to_lowercase(),
    ]
}

/// Keep transactions whose displayed fields contain `query`, ignoring case
pub fn filter_view<'a>(view: Vec<&'a Transaction>, query: &str) -> Vec<&'a Transaction> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return view;
    }
    view.into_iter()
        .filter(|tx| search_haystack(tx).iter().any(|field| field.contains(&query)))
        .collect()
}

/// Records plus the active directive; `request_sort` is the header click
#[derive(Debug, Clone, Default)]
pub struct SortableTable {
    records: Vec<Transaction>,
    active_sort: Option<SortDirective>,
    cycle: SortCycle,
}

impl SortableTable {
    pub fn new(records: Vec<Transaction>) -> Self {
        Self {
            records,
            active_sort: None,
            cycle: SortCycle::default(),
        }
    }

    pub fn with_cycle(mut self, cycle: SortCycle) -> Self {
        self.cycle = cycle;
        self
    }

    pub fn with_sort(mut self, sort: Option<SortDirective>) -> Self {
        self.active_sort = sort;
        self
    }

    /// Source records in provider order
    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn active_sort(&self) -> Option<SortDirective> {
        self.active_sort
    }

    pub fn request_sort(&mut self, key: SortKey) {
        self.active_sort = next_directive(self.active_sort, key, self.cycle);
        log::debug!("Sort directive now {:?}", self.active_sort);
    }

    pub fn view(&self) -> Vec<&Transaction> {
        derive_view(&self.records, self.active_sort)
    }

    pub fn search(&self, query: &str) -> Vec<&Transaction> {
        filter_view(self.view(), query)
    }
}
