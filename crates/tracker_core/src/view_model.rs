use crate::StatusTone;

/// Placeholder shown when an extracted field came back empty.
pub const NOT_FOUND: &str = "Not found";

/// The popup shows exactly one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Loading,
    Auth,
    SheetConnect,
    NoJob,
    JobReview,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub text: String,
    pub tone: StatusTone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub section: Section,
    pub company: String,
    pub role: String,
    pub application_link: String,
    pub sheet_name: Option<String>,
    pub sheet_url_input: String,
    pub status: Option<StatusView>,
    pub signing_in: bool,
    pub connecting: bool,
    pub saving: bool,
}
