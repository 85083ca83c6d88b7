use std::sync::mpsc;
use std::thread;

use crate::{
    spawn_coordinator, spawn_session, Clock, JobRecord, MutationBatch, PageHandle,
    SessionSettings, SiteKind,
};

#[derive(Debug, Clone, Default)]
pub struct HostSettings {
    pub session: SessionSettings,
}

/// Events raised by the engine toward the embedding host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The coordinator asked for the popup surface to open.
    PopupRequested,
}

enum HostCommand {
    LoadPage {
        url: String,
        html: String,
        reply: mpsc::Sender<SiteKind>,
    },
    ClickSave,
    TakeStoredJob {
        reply: mpsc::Sender<Option<JobRecord>>,
    },
    RequestPageJob {
        reply: mpsc::Sender<Option<JobRecord>>,
    },
    ApplyMutations(MutationBatch),
    PageHtml {
        reply: mpsc::Sender<Option<String>>,
    },
    TeardownPage,
}

/// Synchronous facade over the engine: owns a dedicated thread running a
/// tokio runtime with the coordinator and at most one page session.
pub struct TrackerHost {
    cmd_tx: mpsc::Sender<HostCommand>,
    event_rx: mpsc::Receiver<HostEvent>,
}

impl TrackerHost {
    pub fn new(settings: HostSettings, clock: Clock) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<HostCommand>();
        let (event_tx, event_rx) = mpsc::channel::<HostEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let _enter = runtime.enter();

            let (coordinator, mut popup_rx) = spawn_coordinator(8);
            {
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    while popup_rx.recv().await.is_some() {
                        let _ = event_tx.send(HostEvent::PopupRequested);
                    }
                });
            }

            let mut session: Option<PageHandle> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    HostCommand::LoadPage { url, html, reply } => {
                        if let Some(old) = session.take() {
                            old.teardown();
                        }
                        let kind = SiteKind::detect(&url);
                        if let Some(profile) = kind.profile() {
                            session = Some(spawn_session(
                                url,
                                html,
                                profile,
                                coordinator.clone(),
                                settings.session.clone(),
                                clock.clone(),
                            ));
                        }
                        let _ = reply.send(kind);
                    }
                    HostCommand::ClickSave => {
                        if let Some(handle) = session.clone() {
                            runtime.spawn(async move { handle.click_save().await });
                        }
                    }
                    HostCommand::TakeStoredJob { reply } => {
                        let coordinator = coordinator.clone();
                        runtime.spawn(async move {
                            let _ = reply.send(coordinator.take_stored().await);
                        });
                    }
                    HostCommand::RequestPageJob { reply } => match session.clone() {
                        Some(handle) => {
                            runtime.spawn(async move {
                                let _ = reply.send(handle.request_job_data().await);
                            });
                        }
                        None => {
                            let _ = reply.send(None);
                        }
                    },
                    HostCommand::ApplyMutations(batch) => {
                        if let Some(handle) = session.clone() {
                            runtime.spawn(async move { handle.apply_mutations(batch).await });
                        }
                    }
                    HostCommand::PageHtml { reply } => match session.clone() {
                        Some(handle) => {
                            runtime.spawn(async move {
                                let _ = reply.send(handle.snapshot_html().await);
                            });
                        }
                        None => {
                            let _ = reply.send(None);
                        }
                    },
                    HostCommand::TeardownPage => {
                        if let Some(old) = session.take() {
                            old.teardown();
                        }
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Loads a page into the engine, replacing any previous session, and
    /// returns its classification. Unsupported pages get no session.
    pub fn load_page(&self, url: impl Into<String>, html: impl Into<String>) -> SiteKind {
        let (reply_tx, reply_rx) = mpsc::channel();
        let _ = self.cmd_tx.send(HostCommand::LoadPage {
            url: url.into(),
            html: html.into(),
            reply: reply_tx,
        });
        reply_rx.recv().unwrap_or(SiteKind::Unsupported)
    }

    /// Simulates a click on the injected control.
    pub fn click_save(&self) {
        let _ = self.cmd_tx.send(HostCommand::ClickSave);
    }

    /// Single-delivery read of the coordinator's pending payload.
    pub fn take_stored_job(&self) -> Option<JobRecord> {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self
            .cmd_tx
            .send(HostCommand::TakeStoredJob { reply: reply_tx })
            .is_err()
        {
            return None;
        }
        reply_rx.recv().ok().flatten()
    }

    /// Fresh extraction from the current page, `None` without a session.
    pub fn request_page_job(&self) -> Option<JobRecord> {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self
            .cmd_tx
            .send(HostCommand::RequestPageJob { reply: reply_tx })
            .is_err()
        {
            return None;
        }
        reply_rx.recv().ok().flatten()
    }

    pub fn apply_mutations(&self, batch: MutationBatch) {
        let _ = self.cmd_tx.send(HostCommand::ApplyMutations(batch));
    }

    pub fn page_html(&self) -> Option<String> {
        let (reply_tx, reply_rx) = mpsc::channel();
        if self
            .cmd_tx
            .send(HostCommand::PageHtml { reply: reply_tx })
            .is_err()
        {
            return None;
        }
        reply_rx.recv().ok().flatten()
    }

    pub fn teardown_page(&self) {
        let _ = self.cmd_tx.send(HostCommand::TeardownPage);
    }

    pub fn try_recv_event(&self) -> Option<HostEvent> {
        self.event_rx.try_recv().ok()
    }
}
