use serde::{Deserialize, Serialize};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{
    backend::TimerBackend,
    error::SyncResult,
    model::{SettingsRecord, StatusSnapshot},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    Start,
    Pause,
    Reset,
    Skip,
    ToggleAlwaysOnTop,
    OpenSettings,
    CloseSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    KeyR,
    KeyS,
}

impl Key {
    /// Parses a DOM `KeyboardEvent.code`.
    pub fn from_code(code: &str) -> Option<Key> {
        match code {
            "Space" => Some(Key::Space),
            "KeyR" => Some(Key::KeyR),
            "KeyS" => Some(Key::KeyS),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyBinding {
    /// Start or pause, decided from a fresh status read.
    ToggleRun,
    Fixed(Intent),
}

fn binding_for(key: Key) -> KeyBinding {
    match key {
        Key::Space => KeyBinding::ToggleRun,
        Key::KeyR => KeyBinding::Fixed(Intent::Reset),
        Key::KeyS => KeyBinding::Fixed(Intent::Skip),
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum DispatchOutcome {
    Status(StatusSnapshot),
    Settings(SettingsRecord),
    AlwaysOnTop(bool),
}

pub trait WindowControl: Send + Sync {
    fn set_always_on_top(&self, on_top: bool) -> SyncResult<()>;
}

/// Maps intents to exactly one backend call each.
pub struct CommandDispatcher {
    backend: Arc<dyn TimerBackend>,
    window: Arc<dyn WindowControl>,
    settings_open: AtomicBool,
}

impl CommandDispatcher {
    pub fn new(backend: Arc<dyn TimerBackend>, window: Arc<dyn WindowControl>) -> Self {
        Self {
            backend,
            window,
            settings_open: AtomicBool::new(false),
        }
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open.load(Ordering::SeqCst)
    }

    pub fn set_settings_open(&self, open: bool) {
        self.settings_open.store(open, Ordering::SeqCst);
    }

    pub async fn dispatch(&self, intent: Intent) -> SyncResult<DispatchOutcome> {
        let outcome = match intent {
            Intent::Start => DispatchOutcome::Status(self.backend.start_timer().await?),
            Intent::Pause => DispatchOutcome::Status(self.backend.pause_timer().await?),
            Intent::Reset => DispatchOutcome::Status(self.backend.reset_timer().await?),
            Intent::Skip => DispatchOutcome::Status(self.backend.skip_timer().await?),
            Intent::ToggleAlwaysOnTop => {
                let on_top = self.backend.toggle_always_on_top().await?;
                self.window.set_always_on_top(on_top)?;
                DispatchOutcome::AlwaysOnTop(on_top)
            }
            Intent::OpenSettings => {
                let settings = self.backend.get_settings().await?;
                self.set_settings_open(true);
                DispatchOutcome::Settings(settings)
            }
            Intent::CloseSettings => {
                self.set_settings_open(false);
                DispatchOutcome::Status(self.backend.get_timer_status().await?)
            }
        };
        Ok(outcome)
    }

    /// Keyboard shortcuts. Nothing is dispatched while the settings panel is
    /// open or a text field has focus.
    pub async fn handle_key(
        &self,
        code: &str,
        text_input_focused: bool,
    ) -> SyncResult<Option<DispatchOutcome>> {
        if self.settings_open() || text_input_focused {
            return Ok(None);
        }

        let Some(key) = Key::from_code(code) else {
            return Ok(None);
        };

        let intent = match binding_for(key) {
            KeyBinding::Fixed(intent) => intent,
            KeyBinding::ToggleRun => {
                let status = self.backend.get_timer_status().await?;
                if status.is_running {
                    Intent::Pause
                } else {
                    Intent::Start
                }
            }
        };

        self.dispatch(intent).await.map(Some)
    }
}
