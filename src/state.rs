//! Workflow state and its transition rules.
//!
//! `WorkflowState` holds the selection sets, the result list and the detail
//! plus one request counter per slot. A request takes a [`Ticket`] when it
//! starts and may only write its response back while that ticket is still
//! the newest one for the slot.

use crate::model::{RecipeDetail, RecipeSummary, ResultList};
use crate::selection::{combined_selection, SelectionSet, Toggle};

/// Slot a request writes into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Results,
    Detail,
}

/// Sequence number handed out when a request is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: Slot,
    pub seq: u64,
}

/// Whether a finished request was written into the state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Yes,
    /// A newer request was issued for the same slot
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub ingredients: SelectionSet,
    pub spices: SelectionSet,
    pub query: String,
    results: ResultList,
    detail: Option<RecipeDetail>,
    results_seq: u64,
    detail_seq: u64,
}

impl WorkflowState {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            ingredients: SelectionSet::new(case_sensitive),
            spices: SelectionSet::new(case_sensitive),
            ..Default::default()
        }
    }

    pub fn toggle_ingredient(&mut self, item: &str) -> Toggle {
        self.ingredients.toggle(item)
    }

    pub fn toggle_spice(&mut self, item: &str) -> Toggle {
        self.spices.toggle(item)
    }

    pub fn clear_selections(&mut self) {
        self.ingredients.clear();
        self.spices.clear();
    }

    pub fn combined(&self, include_spices: bool) -> Vec<String> {
        combined_selection(&self.ingredients, include_spices.then_some(&self.spices))
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    pub fn detail(&self) -> Option<&RecipeDetail> {
        self.detail.as_ref()
    }

    pub fn begin_search(&mut self) -> Ticket {
        self.results_seq += 1;
        Ticket {
            slot: Slot::Results,
            seq: self.results_seq,
        }
    }

    /// Replace the result list. Drops the current detail and invalidates
    /// any detail fetch still in flight.
    pub fn finish_search(&mut self, ticket: Ticket, summaries: Vec<RecipeSummary>) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        self.results = ResultList::Ready(summaries);
        self.detail = None;
        self.detail_seq += 1;
        Applied::Yes
    }

    pub fn begin_detail(&mut self) -> Ticket {
        self.detail_seq += 1;
        Ticket {
            slot: Slot::Detail,
            seq: self.detail_seq,
        }
    }

    pub fn finish_detail(&mut self, ticket: Ticket, detail: RecipeDetail) -> Applied {
        if !self.is_current(ticket) {
            return Applied::Stale;
        }

        self.detail = Some(detail);
        Applied::Yes
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        match ticket.slot {
            Slot::Results => ticket.seq == self.results_seq,
            Slot::Detail => ticket.seq == self.detail_seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: u64, title: &str) -> RecipeDetail {
        RecipeDetail {
            id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = WorkflowState::new(true);
        assert_eq!(state.results(), &ResultList::NotSearched);
        assert!(state.detail().is_none());
        assert!(state.combined(true).is_empty());
    }

    #[test]
    fn test_combined_respects_include_spices() {
        let mut state = WorkflowState::new(true);
        state.toggle_ingredient("egg");
        state.toggle_spice("salt");
        assert_eq!(state.combined(true), vec!["egg", "salt"]);
        assert_eq!(state.combined(false), vec!["egg"]);
    }

    #[test]
    fn test_clear_selections_idempotent() {
        let mut state = WorkflowState::new(true);
        state.clear_selections();
        assert!(state.ingredients.is_empty());
        assert!(state.spices.is_empty());

        state.toggle_ingredient("egg");
        state.toggle_spice("cumin");
        state.clear_selections();
        state.clear_selections();
        assert!(state.ingredients.is_empty());
        assert!(state.spices.is_empty());
    }

    #[test]
    fn test_finish_search_replaces_results() {
        let mut state = WorkflowState::new(true);
        let first = state.begin_search();
        state.finish_search(first, vec![RecipeSummary::new(1, "A", "a")]);
        let second = state.begin_search();
        state.finish_search(second, vec![RecipeSummary::new(2, "B", "b")]);

        assert_eq!(
            state.results().summaries(),
            [RecipeSummary::new(2, "B", "b")]
        );
    }

    #[test]
    fn test_stale_search_discarded() {
        let mut state = WorkflowState::new(true);
        let old = state.begin_search();
        let new = state.begin_search();

        assert_eq!(
            state.finish_search(new, vec![RecipeSummary::new(2, "New", "")]),
            Applied::Yes
        );
        assert_eq!(
            state.finish_search(old, vec![RecipeSummary::new(1, "Old", "")]),
            Applied::Stale
        );
        assert_eq!(state.results().summaries()[0].title, "New");
    }

    #[test]
    fn test_stale_detail_discarded() {
        let mut state = WorkflowState::new(true);
        let first = state.begin_detail();
        let second = state.begin_detail();

        assert_eq!(state.finish_detail(second, detail(2, "Second")), Applied::Yes);
        assert_eq!(state.finish_detail(first, detail(1, "First")), Applied::Stale);
        assert_eq!(state.detail().map(|d| d.id), Some(2));
    }

    #[test]
    fn test_search_drops_detail_and_pending_fetch() {
        let mut state = WorkflowState::new(true);
        let shown = state.begin_detail();
        state.finish_detail(shown, detail(1, "Shown"));

        let pending = state.begin_detail();
        let search = state.begin_search();
        state.finish_search(search, vec![]);

        assert!(state.detail().is_none());
        assert_eq!(state.finish_detail(pending, detail(5, "Late")), Applied::Stale);
        assert!(state.detail().is_none());
    }

    #[test]
    fn test_slots_are_independent() {
        let mut state = WorkflowState::new(true);
        let detail_ticket = state.begin_detail();
        let _ = state.begin_search();
        assert!(state.is_current(detail_ticket));
    }
}
