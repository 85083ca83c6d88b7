#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the coordinator for a pending job payload (single delivery).
    CheckStoredJob,
    /// Query backend auth status.
    CheckAuth,
    /// Open the interactive login window and wait for it to finish.
    BeginLogin,
    /// Load the persisted spreadsheet id, if any.
    RestoreSheetId,
    /// Verify sheet access and fetch its display name.
    FetchSheetMetadata { spreadsheet_id: String },
    /// Persist the connected spreadsheet id.
    PersistSheetId { spreadsheet_id: String },
    /// Drop the persisted spreadsheet id.
    ClearSheetId,
    /// Ask the page script for job data (no stored payload was pending).
    RequestPageJob,
    /// Append the reviewed job to the connected sheet.
    AppendJob(AppendFields),
    /// Arrange for `Msg::StatusExpired { token }` after the dismiss delay.
    ScheduleStatusExpiry { token: u32 },
}

/// Row fields for the append call, straight from state at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendFields {
    pub spreadsheet_id: String,
    pub company: String,
    pub role: String,
    pub application_link: String,
    pub stage: String,
    pub priority: String,
    pub notes: String,
    pub timestamp: String,
}
