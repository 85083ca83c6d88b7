use std::collections::VecDeque;
use std::path::PathBuf;

use tokio::runtime::Runtime;
use tracker_core::{update, Effect, JobDetails, Msg, PopupState, PopupView, Section};
use tracker_engine::{AppendRequest, BackendClient, JobRecord, TrackerHost};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::persistence;

/// Outcome of one popup flow, for the process exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlowOutcome {
    Saved,
    SaveFailed,
    NeedsSignIn,
    NeedsSheet,
    NoJobData,
}

/// Form values the CLI submits in place of interactive input.
pub(crate) struct FormInput {
    pub sheet_url: Option<String>,
    pub stage: String,
    pub priority: String,
    pub notes: String,
}

/// Executes `tracker_core` effects against the engine, the backend and the
/// local state store, feeding results back as messages.
pub(crate) struct EffectRunner<'rt> {
    runtime: &'rt Runtime,
    backend: BackendClient,
    host: TrackerHost,
    state_dir: PathBuf,
}

impl<'rt> EffectRunner<'rt> {
    pub(crate) fn new(
        runtime: &'rt Runtime,
        backend: BackendClient,
        host: TrackerHost,
        state_dir: PathBuf,
    ) -> Self {
        Self {
            runtime,
            backend,
            host,
            state_dir,
        }
    }

    /// Drives the popup state machine to a terminal state and reports it.
    pub(crate) fn run_popup_flow(&self, form: FormInput) -> FlowOutcome {
        let mut state = PopupState::new();
        let mut queue = VecDeque::from([Msg::PopupOpened]);
        let mut renderer = Renderer::default();

        self.pump(&mut state, &mut queue, &mut renderer);

        let mut sheet_arg = form.sheet_url;
        let mut save_attempted = false;

        loop {
            match state.view().section {
                Section::Loading => {
                    // Startup queries all answered synchronously; reaching
                    // here means none of them did.
                    tracker_warn!("popup never left the loading state");
                    return FlowOutcome::NoJobData;
                }
                Section::Auth => {
                    tracker_info!(
                        "Sign-in required: open {} in a browser, then re-run.",
                        self.backend.login_url()
                    );
                    return FlowOutcome::NeedsSignIn;
                }
                Section::SheetConnect => match sheet_arg.take() {
                    Some(sheet_url) => {
                        queue.push_back(Msg::SheetUrlChanged(sheet_url));
                        queue.push_back(Msg::ConnectClicked);
                        self.pump(&mut state, &mut queue, &mut renderer);
                        if state.view().section == Section::SheetConnect {
                            // Connect failed; the status line already said why.
                            return FlowOutcome::NeedsSheet;
                        }
                    }
                    None => {
                        tracker_info!("No sheet connected; pass --sheet <url> to connect one.");
                        return FlowOutcome::NeedsSheet;
                    }
                },
                Section::NoJob => {
                    return if save_attempted {
                        FlowOutcome::Saved
                    } else {
                        tracker_info!("No job data captured from this page.");
                        FlowOutcome::NoJobData
                    };
                }
                Section::JobReview => {
                    if save_attempted {
                        // Append failed and the job is still up for review.
                        return FlowOutcome::SaveFailed;
                    }
                    save_attempted = true;
                    queue.push_back(Msg::StageChanged(form.stage.clone()));
                    queue.push_back(Msg::PriorityChanged(form.priority.clone()));
                    queue.push_back(Msg::NotesChanged(form.notes.clone()));
                    queue.push_back(Msg::SaveClicked);
                    self.pump(&mut state, &mut queue, &mut renderer);
                }
            }
        }
    }

    /// Dispatches queued messages through the pure update function until the
    /// queue drains, running effects as they are emitted.
    fn pump(
        &self,
        state: &mut PopupState,
        queue: &mut VecDeque<Msg>,
        renderer: &mut Renderer,
    ) {
        while let Some(msg) = queue.pop_front() {
            let (next, effects) = update(std::mem::take(state), msg);
            *state = next;
            if state.consume_dirty() {
                renderer.render(&state.view());
            }
            for effect in effects {
                self.run_effect(effect, queue);
            }
        }
    }

    fn run_effect(&self, effect: Effect, queue: &mut VecDeque<Msg>) {
        match effect {
            Effect::CheckStoredJob => {
                let job = self.host.take_stored_job();
                queue.push_back(Msg::StoredJobChecked(job.map(to_details)));
            }
            Effect::RequestPageJob => {
                let job = self.host.request_page_job();
                queue.push_back(Msg::PageJobChecked(job.map(to_details)));
            }
            Effect::CheckAuth => {
                let authenticated = self
                    .runtime
                    .block_on(self.backend.auth_status())
                    .unwrap_or_else(|err| {
                        tracker_warn!("Auth check failed: {}", err);
                        false
                    });
                queue.push_back(Msg::AuthChecked { authenticated });
            }
            Effect::BeginLogin => {
                // A terminal cannot host the interactive OAuth window.
                queue.push_back(Msg::LoginFailed(format!(
                    "Interactive sign-in required; open {} in a browser.",
                    self.backend.login_url()
                )));
            }
            Effect::RestoreSheetId => {
                queue.push_back(Msg::SheetIdRestored(persistence::load_sheet_id(
                    &self.state_dir,
                )));
            }
            Effect::FetchSheetMetadata { spreadsheet_id } => {
                let msg = match self
                    .runtime
                    .block_on(self.backend.sheet_metadata(&spreadsheet_id))
                {
                    Ok(sheet_name) => Msg::SheetConnected { sheet_name },
                    Err(err) => {
                        tracker_warn!("Sheet metadata lookup failed: {}", err);
                        Msg::SheetConnectFailed(err.to_string())
                    }
                };
                queue.push_back(msg);
            }
            Effect::PersistSheetId { spreadsheet_id } => {
                persistence::save_sheet_id(&self.state_dir, &spreadsheet_id);
            }
            Effect::ClearSheetId => {
                persistence::clear_sheet_id(&self.state_dir);
            }
            Effect::AppendJob(fields) => {
                let request = AppendRequest {
                    spreadsheet_id: fields.spreadsheet_id,
                    company: fields.company,
                    role: fields.role,
                    application_link: fields.application_link,
                    stage: fields.stage,
                    priority: fields.priority,
                    notes: fields.notes,
                    timestamp: fields.timestamp,
                };
                let msg = match self.runtime.block_on(self.backend.append_job(&request)) {
                    Ok(sno) => Msg::JobAppended { sno },
                    Err(err) => {
                        tracker_warn!("Append failed: {}", err);
                        Msg::AppendFailed(err.to_string())
                    }
                };
                queue.push_back(msg);
            }
            Effect::ScheduleStatusExpiry { token } => {
                // Statuses are printed as they appear; timed dismissal is a
                // popup-surface concern.
                tracker_debug!("status expiry scheduled: token={}", token);
            }
        }
    }
}

/// Logs section transitions and fresh status lines, skipping repeats.
#[derive(Default)]
struct Renderer {
    last_section: Option<Section>,
    last_status: Option<String>,
}

impl Renderer {
    fn render(&mut self, view: &PopupView) {
        if self.last_section != Some(view.section) {
            self.last_section = Some(view.section);
            tracker_info!("section: {:?}", view.section);
            if view.section == Section::JobReview {
                tracker_info!(
                    "job: company={:?} role={:?} link={}",
                    view.company,
                    view.role,
                    view.application_link
                );
            }
        }
        let status_text = view.status.as_ref().map(|s| format!("[{:?}] {}", s.tone, s.text));
        if status_text.is_some() && status_text != self.last_status {
            tracker_info!("{}", status_text.as_deref().unwrap_or_default());
        }
        self.last_status = status_text;
    }
}

fn to_details(record: JobRecord) -> JobDetails {
    JobDetails {
        company: record.company,
        role: record.role,
        application_link: record.application_link,
        timestamp: record.timestamp,
    }
}
