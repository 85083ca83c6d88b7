use tokio::sync::{mpsc, oneshot};

use crate::JobRecord;

enum CoordinatorRequest {
    /// Store the payload for the next popup open and request the surface.
    OpenPopup { job: JobRecord },
    /// Atomic take-and-clear of the pending payload.
    TakeStored {
        reply: oneshot::Sender<Option<JobRecord>>,
    },
}

/// Handle to the background coordinator task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<CoordinatorRequest>,
}

/// Spawns the coordinator: the long-lived task owning the single
/// pending-payload slot. Returns its handle plus the stream of popup-open
/// requests it raises.
///
/// Must be called from within a tokio runtime.
pub fn spawn_coordinator(buffer: usize) -> (CoordinatorHandle, mpsc::Receiver<()>) {
    let (tx, mut rx) = mpsc::channel(buffer);
    let (popup_tx, popup_rx) = mpsc::channel(buffer);

    tokio::spawn(async move {
        let mut pending: Option<JobRecord> = None;
        while let Some(request) = rx.recv().await {
            match request {
                CoordinatorRequest::OpenPopup { job } => {
                    if pending.is_some() {
                        log::debug!("pending job payload overwritten before delivery");
                    }
                    // Last write wins; there is no queue.
                    pending = Some(job);
                    let _ = popup_tx.try_send(());
                }
                CoordinatorRequest::TakeStored { reply } => {
                    let _ = reply.send(pending.take());
                }
            }
        }
    });

    (CoordinatorHandle { tx }, popup_rx)
}

impl CoordinatorHandle {
    /// Stores `job` for the next popup open and requests the popup surface.
    pub async fn open_popup(&self, job: JobRecord) {
        let _ = self
            .tx
            .send(CoordinatorRequest::OpenPopup { job })
            .await;
    }

    /// Takes the pending payload, if any. Exactly one caller ever observes
    /// a given payload; a coordinator that has gone away reads as `None`.
    pub async fn take_stored(&self) -> Option<JobRecord> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self
            .tx
            .send(CoordinatorRequest::TakeStored { reply: reply_tx })
            .await
            .is_err()
        {
            return None;
        }
        reply_rx.await.ok().flatten()
    }
}
