use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracker_logging::{tracker_debug, tracker_warn};

use crate::{
    ensure_control_present, extract_job, Clock, CoordinatorHandle, InjectOutcome,
    InjectorSettings, JobRecord, MutationBatch, PageDocument, ReinjectionWatcher, SiteProfile,
    WatcherSettings, CONTROL_ID,
};

#[derive(Debug, Clone, Default)]
pub struct SessionSettings {
    pub injector: InjectorSettings,
    pub watcher: WatcherSettings,
}

enum PageRequest {
    /// Popup asked the page directly; extraction runs against the current
    /// document.
    GetJobData {
        reply: oneshot::Sender<JobRecord>,
    },
    /// The injected control was clicked.
    ClickSave,
    /// The host page mutated.
    Mutations(MutationBatch),
    /// Serialized document, for hosts and tests.
    SnapshotHtml {
        reply: oneshot::Sender<String>,
    },
}

/// Handle to a page session (the content-script counterpart).
#[derive(Clone)]
pub struct PageHandle {
    tx: mpsc::Sender<PageRequest>,
    cancel: CancellationToken,
}

impl PageHandle {
    /// Asks the page for job data. A torn-down or unreachable session reads
    /// as `None` — no job data, not an error.
    pub async fn request_job_data(&self) -> Option<JobRecord> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(PageRequest::GetJobData { reply: reply_tx })
            .await
            .is_err()
        {
            return None;
        }
        reply_rx.await.ok()
    }

    /// Simulates a click on the injected control.
    pub async fn click_save(&self) {
        let _ = self.tx.send(PageRequest::ClickSave).await;
    }

    /// Feeds a batch of host-page mutations into the session.
    pub async fn apply_mutations(&self, batch: MutationBatch) {
        let _ = self.tx.send(PageRequest::Mutations(batch)).await;
    }

    pub async fn snapshot_html(&self) -> Option<String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(PageRequest::SnapshotHtml { reply: reply_tx })
            .await
            .is_err()
        {
            return None;
        }
        reply_rx.await.ok()
    }

    /// Page teardown: cancels the session and every timer it owns.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }
}

/// Spawns a session task owning the document, watcher and injection timers.
///
/// Must be called from within a tokio runtime.
pub fn spawn_session(
    page_url: String,
    html: String,
    profile: &'static dyn SiteProfile,
    coordinator: CoordinatorHandle,
    settings: SessionSettings,
    clock: Clock,
) -> PageHandle {
    let (tx, rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let task_cancel = cancel.child_token();

    tokio::spawn(run_session(
        page_url,
        html,
        profile,
        coordinator,
        settings,
        clock,
        task_cancel,
        rx,
    ));

    PageHandle { tx, cancel }
}

#[allow(clippy::too_many_arguments)]
async fn run_session(
    page_url: String,
    html: String,
    profile: &'static dyn SiteProfile,
    coordinator: CoordinatorHandle,
    settings: SessionSettings,
    clock: Clock,
    cancel: CancellationToken,
    mut rx: mpsc::Receiver<PageRequest>,
) {
    let mut document = PageDocument::from_html(&html);
    let mut watcher = ReinjectionWatcher::new();
    watcher.activate();

    let mut attempts_left = settings.injector.max_attempts;
    let mut retry_at: Option<Instant> = None;
    if ensure_control_present(&mut document, profile) == InjectOutcome::TitleMissing {
        retry_at = next_retry(&settings.injector, &mut attempts_left);
    }
    let mut reinject_at: Option<Instant> = None;

    loop {
        // Disabled branches still need a live deadline value.
        let far = Instant::now() + Duration::from_secs(3600);
        let retry_deadline = retry_at.unwrap_or(far);
        let reinject_deadline = reinject_at.unwrap_or(far);

        tokio::select! {
            _ = cancel.cancelled() => break,
            request = rx.recv() => {
                let Some(request) = request else { break };
                match request {
                    PageRequest::GetJobData { reply } => {
                        let record = extract_job(profile, &document, &page_url, &clock);
                        let _ = reply.send(record);
                    }
                    PageRequest::ClickSave => {
                        let record = extract_job(profile, &document, &page_url, &clock);
                        coordinator.open_popup(record).await;
                    }
                    PageRequest::Mutations(batch) => {
                        apply_batch(&mut document, &batch);
                        if watcher.note_batch(&batch, profile) {
                            reinject_at = Some(Instant::now() + settings.watcher.debounce);
                        }
                    }
                    PageRequest::SnapshotHtml { reply } => {
                        let _ = reply.send(document.html());
                    }
                }
            }
            _ = sleep_until(retry_deadline), if retry_at.is_some() => {
                retry_at = None;
                if ensure_control_present(&mut document, profile) == InjectOutcome::TitleMissing {
                    retry_at = next_retry(&settings.injector, &mut attempts_left);
                    if retry_at.is_none() {
                        tracker_warn!(
                            "giving up injection: site={} no title element appeared",
                            profile.name()
                        );
                    }
                }
            }
            _ = sleep_until(reinject_deadline), if reinject_at.is_some() => {
                reinject_at = None;
                if watcher.take_flag() && !document.has_element_id(CONTROL_ID) {
                    let outcome = ensure_control_present(&mut document, profile);
                    tracker_debug!(
                        "reinjection check: site={} outcome={outcome:?}",
                        profile.name()
                    );
                }
            }
        }
    }
}

fn apply_batch(document: &mut PageDocument, batch: &MutationBatch) {
    for id in &batch.removed_ids {
        document.remove_element_id(id);
    }
    for fragment in &batch.added_fragments {
        document.append_to_body(fragment);
    }
}

fn next_retry(settings: &InjectorSettings, attempts_left: &mut Option<u32>) -> Option<Instant> {
    match attempts_left {
        None => Some(Instant::now() + settings.retry_delay),
        Some(0) => None,
        Some(n) => {
            *n -= 1;
            Some(Instant::now() + settings.retry_delay)
        }
    }
}
