use std::time::Duration;

use scraper::{Html, Selector};

use crate::{SiteProfile, CONTROL_ID};

#[derive(Debug, Clone)]
pub struct WatcherSettings {
    /// How long flagged mutations coalesce before one reinjection check runs.
    pub debounce: Duration,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
        }
    }
}

/// Host-delivered summary of one batch of child-list mutations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Outer HTML of nodes added to the document.
    pub added_fragments: Vec<String>,
    /// Id attributes of nodes removed from the document.
    pub removed_ids: Vec<String>,
}

impl MutationBatch {
    pub fn removal(id: &str) -> Self {
        Self {
            removed_ids: vec![id.to_string()],
            ..Self::default()
        }
    }

    pub fn addition(fragment_html: &str) -> Self {
        Self {
            added_fragments: vec![fragment_html.to_string()],
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchState {
    Inactive,
    Observing,
}

/// Watches mutation batches and flags when the control may need
/// reinjection. Rescans broadly rather than tracking exact causality,
/// trading wasted work for robustness against single-page-app navigation.
#[derive(Debug)]
pub struct ReinjectionWatcher {
    state: WatchState,
    needs_reinject: bool,
}

impl ReinjectionWatcher {
    pub fn new() -> Self {
        Self {
            state: WatchState::Inactive,
            needs_reinject: false,
        }
    }

    /// Starts observing. Happens once per page lifetime; a second activation
    /// is a no-op returning false.
    pub fn activate(&mut self) -> bool {
        if self.state == WatchState::Observing {
            return false;
        }
        self.state = WatchState::Observing;
        true
    }

    pub fn is_observing(&self) -> bool {
        self.state == WatchState::Observing
    }

    /// Inspects a batch and returns the current flag state. Batches arriving
    /// while inactive are ignored.
    pub fn note_batch(&mut self, batch: &MutationBatch, profile: &dyn SiteProfile) -> bool {
        if self.state != WatchState::Observing {
            return false;
        }
        if batch_removed_control(batch) || batch_added_title(batch, profile) {
            self.needs_reinject = true;
        }
        self.needs_reinject
    }

    /// Debounce consumer: returns and clears the flag.
    pub fn take_flag(&mut self) -> bool {
        std::mem::take(&mut self.needs_reinject)
    }
}

impl Default for ReinjectionWatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn batch_removed_control(batch: &MutationBatch) -> bool {
    batch.removed_ids.iter().any(|id| id == CONTROL_ID)
}

fn batch_added_title(batch: &MutationBatch, profile: &dyn SiteProfile) -> bool {
    batch.added_fragments.iter().any(|fragment| {
        let parsed = Html::parse_fragment(fragment);
        profile.title_selectors().iter().any(|selector| {
            Selector::parse(selector)
                .map(|sel| parsed.select(&sel).next().is_some())
                .unwrap_or(false)
        })
    })
}
