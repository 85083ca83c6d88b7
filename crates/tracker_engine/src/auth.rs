use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

/// Seam over the interactive OAuth window.
pub trait LoginWindow: Send + Sync {
    fn is_closed(&self) -> bool;
    fn close(&self);
}

#[derive(Debug, Clone)]
pub struct LoginWaitSettings {
    /// How often the window-closed state is polled.
    pub poll_interval: Duration,
    /// Hard cap on the whole sign-in flow.
    pub timeout: Duration,
}

impl Default for LoginWaitSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginWaitError {
    #[error("OAuth timeout")]
    TimedOut,
}

/// Waits for the login flow to finish: either the window closes (polled) or
/// an explicit completion signal arrives, whichever happens first. On
/// timeout the window is closed and the flow fails.
pub async fn wait_for_login(
    window: &dyn LoginWindow,
    completed: oneshot::Receiver<()>,
    settings: LoginWaitSettings,
) -> Result<(), LoginWaitError> {
    let deadline = Instant::now() + settings.timeout;
    let mut poll = interval(settings.poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut completed = completed;
    // A dropped completion sender just disables that branch; polling still
    // observes the window.
    let mut completion_open = true;

    loop {
        tokio::select! {
            _ = poll.tick() => {
                if window.is_closed() {
                    return Ok(());
                }
            }
            result = &mut completed, if completion_open => {
                match result {
                    Ok(()) => return Ok(()),
                    Err(_) => completion_open = false,
                }
            }
            _ = sleep_until(deadline) => {
                window.close();
                return Err(LoginWaitError::TimedOut);
            }
        }
    }
}
