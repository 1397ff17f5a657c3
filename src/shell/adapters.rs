use async_trait::async_trait;
use serde::Serialize;
use tauri::{plugin::PermissionState, AppHandle, Emitter, Manager, Runtime};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_notification::NotificationExt;
use tokio::sync::oneshot;

use crate::{
    alerts::Notifier,
    background::BackgroundUpdate,
    dispatcher::WindowControl,
    error::{SyncError, SyncResult},
    log_warn,
    model::RenderModel,
    settings_panel::FilePicker,
    video::MediaPlayer,
    view::ViewSink,
};

const ENABLE_LOGS: bool = true;

pub const RENDER_EVENT: &str = "render-model";
pub const BACKGROUND_EVENT: &str = "background-changed";
pub const PLAYER_EVENT: &str = "media-player";

/// Emits render models and backgrounds to the webview.
pub struct WebviewSink<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> WebviewSink<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> ViewSink for WebviewSink<R> {
    fn render(&self, model: &RenderModel) {
        if let Err(err) = self.app.emit(RENDER_EVENT, model) {
            log_warn!("Failed to emit {}: {}", RENDER_EVENT, err);
        }
    }

    fn paint_background(&self, update: &BackgroundUpdate) {
        if let Err(err) = self.app.emit(BACKGROUND_EVENT, update) {
            log_warn!("Failed to emit {}: {}", BACKGROUND_EVENT, err);
        }
    }
}

pub struct SystemNotifier<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> SystemNotifier<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

impl<R: Runtime> Notifier for SystemNotifier<R> {
    fn permission_granted(&self) -> bool {
        let notification = self.app.notification();
        match notification.permission_state() {
            Ok(PermissionState::Granted) => true,
            Ok(PermissionState::Denied) => false,
            Ok(_) => matches!(notification.request_permission(), Ok(PermissionState::Granted)),
            Err(err) => {
                log_warn!("Could not read notification permission: {}", err);
                false
            }
        }
    }

    fn notify(&self, title: &str, body: &str) -> SyncResult<()> {
        self.app
            .notification()
            .builder()
            .title(title)
            .body(body)
            .show()
            .map_err(SyncError::shell)
    }
}

pub struct MainWindow<R: Runtime> {
    app: AppHandle<R>,
    label: String,
}

impl<R: Runtime> MainWindow<R> {
    pub fn new(app: AppHandle<R>, label: String) -> Self {
        Self { app, label }
    }
}

impl<R: Runtime> WindowControl for MainWindow<R> {
    fn set_always_on_top(&self, on_top: bool) -> SyncResult<()> {
        let window = self
            .app
            .get_webview_window(&self.label)
            .ok_or_else(|| SyncError::shell(format!("window '{}' not found", self.label)))?;
        window.set_always_on_top(on_top).map_err(SyncError::shell)
    }
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
struct PlayerCommand<'a> {
    action: &'a str,
    video_id: Option<&'a str>,
}

/// Forwards player operations to the embedded widget in the webview.
pub struct WebviewPlayer<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> WebviewPlayer<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn send(&self, action: &str, video_id: Option<&str>) -> SyncResult<()> {
        self.app
            .emit(PLAYER_EVENT, PlayerCommand { action, video_id })
            .map_err(SyncError::shell)
    }
}

impl<R: Runtime> MediaPlayer for WebviewPlayer<R> {
    fn cue(&self, video_id: &str) -> SyncResult<()> {
        self.send("cue", Some(video_id))
    }

    fn play(&self) -> SyncResult<()> {
        self.send("play", None)
    }

    fn pause(&self) -> SyncResult<()> {
        self.send("pause", None)
    }

    fn load_new(&self, video_id: &str) -> SyncResult<()> {
        self.send("loadNew", Some(video_id))
    }
}

pub struct NativePicker<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> NativePicker<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> FilePicker for NativePicker<R> {
    async fn pick_file(&self, filter_name: &str, extensions: &[&str]) -> SyncResult<Option<String>> {
        let (tx, rx) = oneshot::channel();
        self.app
            .dialog()
            .file()
            .add_filter(filter_name, extensions)
            .pick_file(move |path| {
                let _ = tx.send(path);
            });

        let picked = rx.await.map_err(SyncError::shell)?;
        Ok(picked.map(|path| path.to_string()))
    }
}
