//! PulsoDoro front-end: turns timer status snapshots into render models,
//! routes user intents to the timer backend and handles completion alerts.
//!
//! The host application owns the countdown and hands it in as a
//! [`TimerBackend`] through [`install`].

pub mod alerts;
pub mod audio;
pub mod background;
pub mod backend;
pub mod break_prompt;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod projector;
pub mod settings_panel;
pub mod shell;
mod utils;
pub mod video;
pub mod view;

#[cfg(test)]
mod test_support;

pub use backend::{BackendEvent, TimerBackend};
pub use config::ViewConfig;
pub use controller::{Collaborators, FrontendController};
pub use dispatcher::{DispatchOutcome, Intent};
pub use error::{SyncError, SyncResult};
pub use model::{Phase, RenderModel, SettingsRecord, StatusSnapshot};
pub use shell::install;
pub use utils::init_logging;
