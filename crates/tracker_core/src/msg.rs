#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Popup surface opened; kicks off the startup queries.
    PopupOpened,
    /// Result of asking the coordinator for a pending payload.
    StoredJobChecked(Option<crate::JobDetails>),
    /// Result of asking the page script directly for job data.
    PageJobChecked(Option<crate::JobDetails>),
    /// Backend auth status arrived.
    AuthChecked { authenticated: bool },
    /// User clicked the sign-in button.
    SignInClicked,
    /// The interactive login window finished (closed or signalled done).
    LoginFinished,
    /// The login flow failed (timeout or window error).
    LoginFailed(String),
    /// Previously connected spreadsheet id restored from local state.
    SheetIdRestored(Option<String>),
    /// User edited the sheet URL input box.
    SheetUrlChanged(String),
    /// User clicked Connect Sheet.
    ConnectClicked,
    /// Backend confirmed sheet access and returned its name.
    SheetConnected { sheet_name: String },
    /// Backend rejected the sheet (or the request failed).
    SheetConnectFailed(String),
    /// User clicked Disconnect.
    DisconnectClicked,
    /// User edited the save form.
    StageChanged(String),
    PriorityChanged(String),
    NotesChanged(String),
    /// User submitted the save form.
    SaveClicked,
    /// Backend appended the row and returned its serial number.
    JobAppended { sno: u64 },
    /// Append failed.
    AppendFailed(String),
    /// A scheduled status auto-dismiss fired.
    StatusExpired { token: u32 },
    /// Fallback for placeholder wiring.
    NoOp,
}
