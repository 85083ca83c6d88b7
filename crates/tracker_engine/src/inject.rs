use std::time::Duration;

use crate::{PageDocument, Placement, SiteProfile};

/// Well-known id of the injected control. At most one element with this id
/// may exist in a document at any time.
pub const CONTROL_ID: &str = "job-tracker-save-btn";

const CONTROL_LABEL: &str = "Save Job";

/// Result of one injection attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The control was already in the document; nothing changed.
    AlreadyPresent,
    /// The control was created and placed.
    Injected,
    /// No title element matched yet (page still rendering).
    TitleMissing,
}

/// Retry policy for `TitleMissing` pages.
///
/// `max_attempts: None` retries until the session is torn down, reproducing
/// the original unbounded behavior; the default caps at 30 attempts.
#[derive(Debug, Clone)]
pub struct InjectorSettings {
    pub retry_delay: Duration,
    pub max_attempts: Option<u32>,
}

impl Default for InjectorSettings {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(1),
            max_attempts: Some(30),
        }
    }
}

/// Idempotently makes sure the control exists in the document.
///
/// Presence is checked first, so calling this from stale timers or rapid
/// mutation storms can never produce a duplicate.
pub fn ensure_control_present(
    document: &mut PageDocument,
    profile: &dyn SiteProfile,
) -> InjectOutcome {
    if document.has_element_id(CONTROL_ID) {
        return InjectOutcome::AlreadyPresent;
    }

    let fragment = control_fragment(profile);
    for selector in profile.title_selectors() {
        let placed = match profile.placement() {
            Placement::AfterTitle => document.insert_after_first(selector, &fragment),
            Placement::InsideTitle => document.append_inside_first(selector, &fragment),
        };
        if placed {
            log::debug!(
                "injected control: site={} anchor={selector}",
                profile.name()
            );
            return InjectOutcome::Injected;
        }
    }
    InjectOutcome::TitleMissing
}

fn control_fragment(profile: &dyn SiteProfile) -> String {
    format!(
        "<button id=\"{CONTROL_ID}\" class=\"job-tracker-save job-tracker-save--{}\" \
         type=\"button\">{CONTROL_LABEL}</button>",
        profile.name()
    )
}
