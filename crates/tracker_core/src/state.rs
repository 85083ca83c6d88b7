use std::time::Duration;

use crate::view_model::{PopupView, Section, StatusView};

/// How long a status line stays visible before the host dismisses it.
pub const STATUS_AUTO_DISMISS: Duration = Duration::from_secs(5);

/// Job fields as the popup displays them. Empty strings are a valid,
/// observable "not found" state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    pub company: String,
    pub role: String,
    pub application_link: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
    pub token: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SaveForm {
    pub stage: String,
    pub priority: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopupState {
    /// None until the first auth status response arrives.
    auth: Option<bool>,
    sheet_id: Option<String>,
    sheet_name: Option<String>,
    /// Candidate id while a Connect request is in flight.
    pending_sheet_id: Option<String>,
    job: Option<JobDetails>,
    form: SaveForm,
    sheet_url_input: String,
    status: Option<StatusLine>,
    status_token: u32,
    signing_in: bool,
    connecting: bool,
    saving: bool,
    dirty: bool,
}

impl PopupState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exactly one section is visible; the closed enum makes that total.
    pub(crate) fn section(&self) -> Section {
        match self.auth {
            None => Section::Loading,
            Some(false) => Section::Auth,
            Some(true) => match (&self.sheet_id, &self.job) {
                (None, _) => Section::SheetConnect,
                (Some(_), None) => Section::NoJob,
                (Some(_), Some(_)) => Section::JobReview,
            },
        }
    }

    pub fn view(&self) -> PopupView {
        PopupView {
            section: self.section(),
            company: display_field(self.job.as_ref().map(|j| j.company.as_str())),
            role: display_field(self.job.as_ref().map(|j| j.role.as_str())),
            application_link: display_field(
                self.job.as_ref().map(|j| j.application_link.as_str()),
            ),
            sheet_name: self.sheet_name.clone(),
            sheet_url_input: self.sheet_url_input.clone(),
            status: self.status.as_ref().map(|s| StatusView {
                text: s.text.clone(),
                tone: s.tone,
            }),
            signing_in: self.signing_in,
            connecting: self.connecting,
            saving: self.saving,
        }
    }

    /// Returns and clears the dirty flag so hosts re-render only on change.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // -- accessors used by the update function --

    pub(crate) fn auth(&self) -> Option<bool> {
        self.auth
    }

    pub(crate) fn sheet_id(&self) -> Option<&str> {
        self.sheet_id.as_deref()
    }

    pub(crate) fn job(&self) -> Option<&JobDetails> {
        self.job.as_ref()
    }

    pub(crate) fn form(&self) -> &SaveForm {
        &self.form
    }

    pub(crate) fn sheet_url_input(&self) -> &str {
        &self.sheet_url_input
    }

    pub(crate) fn is_signing_in(&self) -> bool {
        self.signing_in
    }

    pub(crate) fn is_connecting(&self) -> bool {
        self.connecting
    }

    pub(crate) fn is_saving(&self) -> bool {
        self.saving
    }

    // -- mutations --

    pub(crate) fn set_auth(&mut self, authenticated: bool) {
        self.auth = Some(authenticated);
        self.mark_dirty();
    }

    pub(crate) fn set_job(&mut self, job: JobDetails) {
        self.job = Some(job);
        self.mark_dirty();
    }

    pub(crate) fn clear_job(&mut self) {
        self.job = None;
        self.mark_dirty();
    }

    pub(crate) fn set_signing_in(&mut self, value: bool) {
        self.signing_in = value;
        self.mark_dirty();
    }

    pub(crate) fn set_saving(&mut self, value: bool) {
        self.saving = value;
        self.mark_dirty();
    }

    pub(crate) fn restore_sheet_id(&mut self, id: String) {
        self.sheet_id = Some(id);
        self.mark_dirty();
    }

    pub(crate) fn begin_connect(&mut self, candidate_id: String) {
        self.pending_sheet_id = Some(candidate_id);
        self.connecting = true;
        self.mark_dirty();
    }

    /// Commits the in-flight Connect candidate, if any. Returns the id that
    /// was committed so the caller can persist it.
    pub(crate) fn commit_connect(&mut self, sheet_name: String) -> Option<String> {
        self.sheet_name = Some(sheet_name);
        self.connecting = false;
        let committed = self.pending_sheet_id.take();
        if let Some(id) = &committed {
            self.sheet_id = Some(id.clone());
        }
        self.mark_dirty();
        committed
    }

    pub(crate) fn abort_connect(&mut self) -> bool {
        let was_connecting = self.connecting;
        self.connecting = false;
        self.pending_sheet_id = None;
        self.mark_dirty();
        was_connecting
    }

    pub(crate) fn disconnect_sheet(&mut self) {
        self.sheet_id = None;
        self.sheet_name = None;
        self.mark_dirty();
    }

    pub(crate) fn set_sheet_url_input(&mut self, text: String) {
        self.sheet_url_input = text;
        self.mark_dirty();
    }

    pub(crate) fn set_stage(&mut self, stage: String) {
        self.form.stage = stage;
        self.mark_dirty();
    }

    pub(crate) fn set_priority(&mut self, priority: String) {
        self.form.priority = priority;
        self.mark_dirty();
    }

    pub(crate) fn set_notes(&mut self, notes: String) {
        self.form.notes = notes;
        self.mark_dirty();
    }

    pub(crate) fn reset_form(&mut self) {
        self.form = SaveForm::default();
        self.mark_dirty();
    }

    /// Installs a status line and returns its expiry token.
    pub(crate) fn push_status(&mut self, text: impl Into<String>, tone: StatusTone) -> u32 {
        self.status_token = self.status_token.wrapping_add(1);
        let token = self.status_token;
        self.status = Some(StatusLine {
            text: text.into(),
            tone,
            token,
        });
        self.mark_dirty();
        token
    }

    /// Clears the status line only if `token` still names it. A stale expiry
    /// must not clobber a newer status.
    pub(crate) fn expire_status(&mut self, token: u32) {
        if self.status.as_ref().is_some_and(|s| s.token == token) {
            self.status = None;
            self.mark_dirty();
        }
    }
}

fn display_field(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => crate::view_model::NOT_FOUND.to_string(),
    }
}
