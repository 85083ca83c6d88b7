//! Tracker engine: page capture, control injection and messaging relay.
mod auth;
mod backend;
mod extract;
mod fetch;
mod host;
mod inject;
mod page;
mod relay;
mod session;
mod site;
mod store;
mod types;
mod watch;

pub use auth::{wait_for_login, LoginWaitError, LoginWaitSettings, LoginWindow};
pub use backend::{AppendRequest, BackendClient, BackendError, BackendSettings};
pub use extract::extract_job;
pub use fetch::{FetchError, FetchFailure, FetchSettings, FetchedPage, PageFetcher, ReqwestPageFetcher};
pub use host::{HostEvent, HostSettings, TrackerHost};
pub use inject::{ensure_control_present, InjectOutcome, InjectorSettings, CONTROL_ID};
pub use page::PageDocument;
pub use relay::{spawn_coordinator, CoordinatorHandle};
pub use session::{spawn_session, PageHandle, SessionSettings};
pub use site::{Placement, SiteKind, SiteProfile};
pub use store::{ensure_state_dir, AtomicFileWriter, StoreError};
pub use types::{Clock, JobRecord};
pub use watch::{MutationBatch, ReinjectionWatcher, WatcherSettings};
