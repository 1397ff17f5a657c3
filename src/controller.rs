//! The object the shell talks to. Holds every collaborator explicitly so the
//! whole front-end can be driven without a window.

use std::{future::Future, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    alerts::{Chime, CompletionAlerts, Notifier},
    background::{AssetLoader, BackgroundResolver, IMAGE_EXTENSIONS},
    backend::TimerBackend,
    break_prompt::BreakPromptSelector,
    config::ViewConfig,
    dispatcher::{CommandDispatcher, DispatchOutcome, Intent, WindowControl},
    error::{SyncError, SyncResult},
    log_info, log_warn,
    model::{RenderModel, SettingsRecord},
    projector::StatusProjector,
    settings_panel::{BackgroundSlot, FilePicker, PanelView, SettingsDraft, SettingsForm},
    video::{MediaPlayer, MusicController, MusicState},
    view::{pump_events, ViewSink, ViewSync},
};

const ENABLE_LOGS: bool = true;

pub struct Collaborators {
    pub backend: Arc<dyn TimerBackend>,
    pub sink: Arc<dyn ViewSink>,
    pub loader: Arc<dyn AssetLoader>,
    pub chime: Arc<dyn Chime>,
    pub notifier: Arc<dyn Notifier>,
    pub window: Arc<dyn WindowControl>,
    pub player: Arc<dyn MediaPlayer>,
    pub picker: Arc<dyn FilePicker>,
}

pub struct FrontendController {
    backend: Arc<dyn TimerBackend>,
    window: Arc<dyn WindowControl>,
    player: Arc<dyn MediaPlayer>,
    picker: Arc<dyn FilePicker>,
    dispatcher: CommandDispatcher,
    sync: Arc<Mutex<ViewSync>>,
    music: Mutex<MusicController>,
    draft: Mutex<Option<SettingsDraft>>,
}

impl FrontendController {
    pub fn new(config: &ViewConfig, parts: Collaborators) -> Self {
        Self::with_parts(
            config,
            parts,
            BreakPromptSelector::new(),
            MusicController::new(String::new()),
        )
    }

    pub(crate) fn with_parts(
        config: &ViewConfig,
        parts: Collaborators,
        prompts: BreakPromptSelector,
        music: MusicController,
    ) -> Self {
        let alerts = CompletionAlerts::new(
            parts.chime,
            parts.notifier,
            config.notification_title.clone(),
        );
        let sync = ViewSync::new(
            StatusProjector::new(config.cycles_to_long_break, prompts),
            BackgroundResolver::new(parts.loader),
            alerts,
            parts.sink,
        );

        Self {
            dispatcher: CommandDispatcher::new(parts.backend.clone(), parts.window.clone()),
            backend: parts.backend,
            window: parts.window,
            player: parts.player,
            picker: parts.picker,
            sync: Arc::new(Mutex::new(sync)),
            music: Mutex::new(music),
            draft: Mutex::new(None),
        }
    }

    /// Loads settings, applies them, then paints the current status.
    pub async fn init(&self) -> SyncResult<RenderModel> {
        let settings = self.backend.get_settings().await?;
        self.apply_settings(&settings).await;

        let status = self.backend.get_timer_status().await?;
        let model = self.sync.lock().await.apply_snapshot(&status).await;
        log_info!("Front-end synced at {:?}", status.phase);
        Ok(model)
    }

    /// Subscribes now; the returned future applies pushed backend events
    /// until the stream closes. Spawn it on the async runtime.
    pub fn event_pump(&self) -> impl Future<Output = ()> + Send + 'static {
        let events = self.backend.subscribe();
        pump_events(self.sync.clone(), self.backend.clone(), events)
    }

    pub async fn render_model(&self) -> Option<RenderModel> {
        self.sync.lock().await.last_model().cloned()
    }

    pub async fn intent(&self, intent: Intent) -> SyncResult<DispatchOutcome> {
        if intent == Intent::CloseSettings {
            *self.draft.lock().await = None;
        }
        let result = self.dispatcher.dispatch(intent).await;
        self.absorb(result).await
    }

    pub async fn key(
        &self,
        code: &str,
        text_input_focused: bool,
    ) -> SyncResult<Option<DispatchOutcome>> {
        match self.dispatcher.handle_key(code, text_input_focused).await {
            Ok(Some(outcome)) => self.absorb(Ok(outcome)).await.map(Some),
            Ok(None) => Ok(None),
            Err(err) => self.absorb(Err(err)).await.map(Some),
        }
    }

    pub async fn open_settings(&self) -> SyncResult<PanelView> {
        match self.intent(Intent::OpenSettings).await? {
            DispatchOutcome::Settings(_) => self.panel_view().await,
            _ => Err(SyncError::command("get_settings", "unexpected response")),
        }
    }

    pub async fn close_settings(&self) -> SyncResult<()> {
        self.intent(Intent::CloseSettings).await.map(|_| ())
    }

    /// Picks a file into the draft. Returns the panel view, unchanged when the
    /// dialog was cancelled.
    pub async fn pick_background(&self, slot: BackgroundSlot) -> SyncResult<PanelView> {
        let picked = self.picker.pick_file("Images", &IMAGE_EXTENSIONS).await?;
        if let Some(path) = picked {
            self.with_draft(|draft| draft.set_background(slot, path)).await?;
        }
        self.panel_view().await
    }

    pub async fn clear_background(&self, slot: BackgroundSlot) -> SyncResult<PanelView> {
        self.with_draft(|draft| draft.clear_background(slot)).await?;
        self.panel_view().await
    }

    /// Persists the form, applies it immediately and closes the panel.
    pub async fn save_settings(&self, form: SettingsForm) -> SyncResult<RenderModel> {
        let record = {
            let draft = self.draft.lock().await;
            let draft = draft
                .as_ref()
                .ok_or_else(|| SyncError::command("save_settings", "settings panel is not open"))?;
            draft.to_record(&form)
        };

        if let Err(err) = self.backend.save_settings(record.clone()).await {
            self.sync.lock().await.report_failure(&err);
            return Err(err);
        }

        self.apply_settings(&record).await;
        *self.draft.lock().await = None;
        self.dispatcher.set_settings_open(false);

        let status = match self.backend.get_timer_status().await {
            Ok(status) => status,
            Err(err) => {
                let mut sync = self.sync.lock().await;
                sync.refresh_current_background().await;
                sync.report_failure(&err);
                return Err(err);
            }
        };

        Ok(self.sync.lock().await.apply_snapshot(&status).await)
    }

    pub async fn toggle_music(&self) -> SyncResult<MusicState> {
        self.music.lock().await.toggle(self.player.as_ref())
    }

    /// Window and player failures are logged; they never block the timer.
    async fn apply_settings(&self, settings: &SettingsRecord) {
        self.sync.lock().await.apply_settings(settings);

        if let Err(err) = self
            .music
            .lock()
            .await
            .set_custom_video(&settings.custom_video_id, self.player.as_ref())
        {
            log_warn!("Could not switch video: {}", err);
        }
        if let Err(err) = self.window.set_always_on_top(settings.always_on_top) {
            log_warn!("Could not apply always-on-top: {}", err);
        }
    }

    async fn absorb(&self, result: SyncResult<DispatchOutcome>) -> SyncResult<DispatchOutcome> {
        match result {
            Ok(DispatchOutcome::Status(status)) => {
                self.sync.lock().await.apply_snapshot(&status).await;
                Ok(DispatchOutcome::Status(status))
            }
            Ok(DispatchOutcome::Settings(settings)) => {
                *self.draft.lock().await = Some(SettingsDraft::from_record(settings.clone()));
                Ok(DispatchOutcome::Settings(settings))
            }
            Ok(other) => Ok(other),
            Err(err) => {
                self.sync.lock().await.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn with_draft(&self, edit: impl FnOnce(&mut SettingsDraft)) -> SyncResult<()> {
        let mut draft = self.draft.lock().await;
        let draft = draft
            .as_mut()
            .ok_or_else(|| SyncError::command("edit_settings", "settings panel is not open"))?;
        edit(draft);
        Ok(())
    }

    async fn panel_view(&self) -> SyncResult<PanelView> {
        self.draft
            .lock()
            .await
            .as_ref()
            .map(SettingsDraft::view)
            .ok_or_else(|| SyncError::command("edit_settings", "settings panel is not open"))
    }
}
