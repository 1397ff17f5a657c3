use std::sync::Arc;

use crate::{error::SyncResult, log_info, log_warn};

const ENABLE_LOGS: bool = true;

pub trait Chime: Send + Sync {
    fn play(&self) -> SyncResult<()>;
}

pub trait Notifier: Send + Sync {
    /// Asks the OS for permission if needed and reports whether it is granted.
    fn permission_granted(&self) -> bool;
    fn notify(&self, title: &str, body: &str) -> SyncResult<()>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertOutcome {
    pub chimed: bool,
    pub notified: bool,
}

/// Reacts to the backend's phase-completion notification.
pub struct CompletionAlerts {
    chime: Arc<dyn Chime>,
    notifier: Arc<dyn Notifier>,
    title: String,
    sound_enabled: bool,
    permission_granted: bool,
}

impl CompletionAlerts {
    /// Queries notification permission once; it is not re-checked per event.
    pub fn new(chime: Arc<dyn Chime>, notifier: Arc<dyn Notifier>, title: String) -> Self {
        let permission_granted = notifier.permission_granted();
        log_info!("Notification permission granted: {}", permission_granted);

        Self {
            chime,
            notifier,
            title,
            sound_enabled: true,
            permission_granted,
        }
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn on_completion(&self, message: &str) -> AlertOutcome {
        let mut outcome = AlertOutcome::default();

        if self.sound_enabled {
            match self.chime.play() {
                Ok(()) => outcome.chimed = true,
                Err(err) => log_warn!("Chime failed: {}", err),
            }
        }

        if self.permission_granted {
            match self.notifier.notify(&self.title, message) {
                Ok(()) => outcome.notified = true,
                Err(err) => log_warn!("Notification failed: {}", err),
            }
        }

        outcome
    }
}
