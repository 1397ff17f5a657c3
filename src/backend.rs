//! Contract for the timer backend this crate drives.
//!
//! The backend owns the countdown, the cycle counter and settings
//! persistence. Every command answers with a fresh [`StatusSnapshot`]; pushed
//! updates arrive through [`TimerBackend::subscribe`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::{
    error::SyncResult,
    model::{SettingsRecord, StatusSnapshot},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "camelCase")]
pub enum BackendEvent {
    /// Periodic or on-change snapshot.
    TimerUpdate(StatusSnapshot),
    /// Fired exactly once per phase completion.
    TimerNotification(String),
}

#[async_trait]
pub trait TimerBackend: Send + Sync {
    async fn start_timer(&self) -> SyncResult<StatusSnapshot>;
    async fn pause_timer(&self) -> SyncResult<StatusSnapshot>;
    async fn reset_timer(&self) -> SyncResult<StatusSnapshot>;
    async fn skip_timer(&self) -> SyncResult<StatusSnapshot>;
    async fn get_timer_status(&self) -> SyncResult<StatusSnapshot>;

    async fn get_settings(&self) -> SyncResult<SettingsRecord>;
    async fn save_settings(&self, settings: SettingsRecord) -> SyncResult<()>;

    /// Flips the persisted always-on-top flag and returns the new value.
    async fn toggle_always_on_top(&self) -> SyncResult<bool>;

    fn subscribe(&self) -> broadcast::Receiver<BackendEvent>;
}
