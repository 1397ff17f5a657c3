use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use crate::{
    alerts::{AlertOutcome, CompletionAlerts},
    background::{BackgroundResolver, BackgroundUpdate},
    backend::{BackendEvent, TimerBackend},
    error::SyncError,
    log_error, log_info, log_warn,
    model::{Phase, RenderModel, SettingsRecord, StatusSnapshot},
    projector::{StatusProjector, TransitionEffect},
};

const ENABLE_LOGS: bool = true;

/// Whatever paints the window.
pub trait ViewSink: Send + Sync {
    fn render(&self, model: &RenderModel);
    fn paint_background(&self, update: &BackgroundUpdate);
}

/// Owns the projector and background resolver and pushes their output to a
/// [`ViewSink`]. Callers serialize access through one `Mutex<ViewSync>`.
pub struct ViewSync {
    projector: StatusProjector,
    background: BackgroundResolver,
    alerts: CompletionAlerts,
    sink: Arc<dyn ViewSink>,
    last_model: Option<RenderModel>,
    settings_applied: bool,
}

impl ViewSync {
    pub fn new(
        projector: StatusProjector,
        background: BackgroundResolver,
        alerts: CompletionAlerts,
        sink: Arc<dyn ViewSink>,
    ) -> Self {
        Self {
            projector,
            background,
            alerts,
            sink,
            last_model: None,
            settings_applied: false,
        }
    }

    pub fn last_model(&self) -> Option<&RenderModel> {
        self.last_model.as_ref()
    }

    /// Whether a settings record has reached the view since startup.
    pub fn settings_applied(&self) -> bool {
        self.settings_applied
    }

    pub async fn apply_snapshot(&mut self, snapshot: &StatusSnapshot) -> RenderModel {
        let projection = self.projector.project(snapshot);
        let mut background_changed = false;

        for effect in &projection.effects {
            if let TransitionEffect::ChangeBackground(phase) = effect {
                self.repaint_background(*phase).await;
                background_changed = true;
            }
        }

        // New paths without a phase edge still have to reach the screen.
        if !background_changed && self.background.needs_paint() {
            self.repaint_background(snapshot.phase).await;
        }

        let mut model = projection.model;
        model.background_asset_key = self.background.displayed_key().map(str::to_string);
        self.publish(model.clone());
        model
    }

    pub fn on_timer_notification(&self, message: &str) -> AlertOutcome {
        self.alerts.on_completion(message)
    }

    /// Takes new background paths and sound preference from saved settings.
    pub fn apply_settings(&mut self, settings: &SettingsRecord) {
        self.background
            .set_paths(settings.focus_background(), settings.break_background());
        self.alerts.set_sound_enabled(settings.sound_enabled);
        self.settings_applied = true;
    }

    /// Repaints the background for `phase` if its key differs from what is
    /// shown. Used after the configured paths change.
    pub async fn refresh_background(&mut self, phase: Phase) {
        if !self.repaint_background(phase).await {
            return;
        }
        if let Some(mut model) = self.last_model.clone() {
            model.background_asset_key = self.background.displayed_key().map(str::to_string);
            self.publish(model);
        }
    }

    /// Repaints for the last phase the projector saw, if any.
    pub async fn refresh_current_background(&mut self) {
        if let Some(phase) = self.projector.last_observed_phase() {
            self.refresh_background(phase).await;
        }
    }

    /// Keeps the last frame on screen and flags the failure on it.
    pub fn report_failure(&mut self, err: &SyncError) {
        log_error!("Command failed: {}", err);
        if let Some(mut model) = self.last_model.clone() {
            model.notice = Some(err.to_string());
            self.publish(model);
        }
    }

    pub async fn handle_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::TimerUpdate(snapshot) => {
                self.apply_snapshot(&snapshot).await;
            }
            BackendEvent::TimerNotification(message) => {
                self.on_timer_notification(&message);
            }
        }
    }

    async fn repaint_background(&mut self, phase: Phase) -> bool {
        match self.background.apply(phase).await {
            Some(update) => {
                self.sink.paint_background(&update);
                true
            }
            None => false,
        }
    }

    fn publish(&mut self, model: RenderModel) {
        self.sink.render(&model);
        self.last_model = Some(model);
    }
}

/// Applies pushed backend events in arrival order until the stream closes.
/// A lagging receiver falls back to one status poll. If startup never got
/// the settings record, it is fetched again before the next pushed snapshot.
pub async fn pump_events(
    sync: Arc<Mutex<ViewSync>>,
    backend: Arc<dyn TimerBackend>,
    mut events: broadcast::Receiver<BackendEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let mut sync = sync.lock().await;
                if matches!(event, BackendEvent::TimerUpdate(_)) && !sync.settings_applied() {
                    match backend.get_settings().await {
                        Ok(settings) => {
                            log_info!("Settings loaded late from backend event stream");
                            sync.apply_settings(&settings);
                        }
                        Err(err) => log_warn!("Settings still unavailable: {}", err),
                    }
                }
                sync.handle_event(event).await;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                log_warn!("Dropped {} backend events; polling status", skipped);
                match backend.get_timer_status().await {
                    Ok(snapshot) => {
                        sync.lock().await.apply_snapshot(&snapshot).await;
                    }
                    Err(err) => sync.lock().await.report_failure(&err),
                }
            }
            Err(broadcast::error::RecvError::Closed) => {
                log_info!("Backend event stream closed");
                break;
            }
        }
    }
}
