use crate::effect::AppendFields;
use crate::{parse_spreadsheet_id, Effect, Msg, PopupState, StatusTone};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PopupState, msg: Msg) -> (PopupState, Vec<Effect>) {
    let effects = match msg {
        Msg::PopupOpened => {
            state.mark_dirty();
            vec![
                Effect::CheckStoredJob,
                Effect::CheckAuth,
                Effect::RestoreSheetId,
            ]
        }
        Msg::StoredJobChecked(Some(job)) => {
            state.set_job(job);
            Vec::new()
        }
        Msg::StoredJobChecked(None) => {
            // Nothing was pending at the coordinator; fall back to asking
            // the page script directly.
            vec![Effect::RequestPageJob]
        }
        Msg::PageJobChecked(Some(job)) => {
            state.set_job(job);
            Vec::new()
        }
        Msg::PageJobChecked(None) => Vec::new(),
        Msg::AuthChecked { authenticated } => {
            state.set_auth(authenticated);
            Vec::new()
        }
        Msg::SignInClicked => {
            if state.is_signing_in() {
                return (state, Vec::new());
            }
            state.set_signing_in(true);
            vec![Effect::BeginLogin]
        }
        Msg::LoginFinished => {
            state.set_signing_in(false);
            vec![Effect::CheckAuth]
        }
        Msg::LoginFailed(reason) => {
            state.set_signing_in(false);
            let token = state.push_status(reason, StatusTone::Error);
            vec![Effect::ScheduleStatusExpiry { token }]
        }
        Msg::SheetIdRestored(Some(id)) => {
            state.restore_sheet_id(id.clone());
            vec![Effect::FetchSheetMetadata {
                spreadsheet_id: id,
            }]
        }
        Msg::SheetIdRestored(None) => Vec::new(),
        Msg::SheetUrlChanged(text) => {
            state.set_sheet_url_input(text);
            Vec::new()
        }
        Msg::ConnectClicked => {
            if state.is_connecting() {
                return (state, Vec::new());
            }
            let input = state.sheet_url_input().trim().to_string();
            if input.is_empty() {
                let token =
                    state.push_status("Please enter a Google Sheet URL", StatusTone::Error);
                return (state, vec![Effect::ScheduleStatusExpiry { token }]);
            }
            match parse_spreadsheet_id(&input) {
                Some(id) => {
                    state.begin_connect(id.clone());
                    vec![Effect::FetchSheetMetadata {
                        spreadsheet_id: id,
                    }]
                }
                None => {
                    let token = state
                        .push_status("Please enter a valid Google Sheet URL", StatusTone::Error);
                    vec![Effect::ScheduleStatusExpiry { token }]
                }
            }
        }
        Msg::SheetConnected { sheet_name } => {
            match state.commit_connect(sheet_name) {
                Some(id) => {
                    let token = state.push_status(
                        "Successfully connected to Google Sheet",
                        StatusTone::Success,
                    );
                    vec![
                        Effect::PersistSheetId { spreadsheet_id: id },
                        Effect::ScheduleStatusExpiry { token },
                    ]
                }
                // Restore path: the id was already committed at startup.
                None => Vec::new(),
            }
        }
        Msg::SheetConnectFailed(reason) => {
            if state.abort_connect() {
                let token = state.push_status(reason, StatusTone::Error);
                vec![Effect::ScheduleStatusExpiry { token }]
            } else {
                // Metadata lookup for a restored id failed; the sheet stays
                // connected without a display name.
                Vec::new()
            }
        }
        Msg::DisconnectClicked => {
            state.disconnect_sheet();
            let token = state.push_status(
                "Successfully disconnected from Google Sheet",
                StatusTone::Success,
            );
            vec![
                Effect::ClearSheetId,
                Effect::ScheduleStatusExpiry { token },
            ]
        }
        Msg::StageChanged(stage) => {
            state.set_stage(stage);
            Vec::new()
        }
        Msg::PriorityChanged(priority) => {
            state.set_priority(priority);
            Vec::new()
        }
        Msg::NotesChanged(notes) => {
            state.set_notes(notes);
            Vec::new()
        }
        Msg::SaveClicked => handle_save_clicked(&mut state),
        Msg::JobAppended { sno } => {
            state.set_saving(false);
            state.reset_form();
            state.clear_job();
            let token = state.push_status(
                format!("Job saved successfully! (Sno: {sno})"),
                StatusTone::Success,
            );
            vec![Effect::ScheduleStatusExpiry { token }]
        }
        Msg::AppendFailed(reason) => {
            state.set_saving(false);
            let token = state.push_status(reason, StatusTone::Error);
            vec![Effect::ScheduleStatusExpiry { token }]
        }
        Msg::StatusExpired { token } => {
            state.expire_status(token);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn handle_save_clicked(state: &mut PopupState) -> Vec<Effect> {
    if state.is_saving() {
        return Vec::new();
    }
    let Some(job) = state.job().cloned() else {
        let token = state.push_status("No job data available", StatusTone::Error);
        return vec![Effect::ScheduleStatusExpiry { token }];
    };
    let Some(sheet_id) = state.sheet_id().map(ToOwned::to_owned) else {
        let token = state.push_status("No Google Sheet connected", StatusTone::Error);
        return vec![Effect::ScheduleStatusExpiry { token }];
    };
    let form = state.form().clone();
    if form.stage.is_empty() || form.priority.is_empty() {
        let token = state.push_status("Please select both stage and priority", StatusTone::Error);
        return vec![Effect::ScheduleStatusExpiry { token }];
    }

    state.set_saving(true);
    vec![Effect::AppendJob(AppendFields {
        spreadsheet_id: sheet_id,
        company: job.company,
        role: job.role,
        application_link: job.application_link,
        stage: form.stage,
        priority: form.priority,
        notes: form.notes,
        timestamp: job.timestamp,
    })]
}
