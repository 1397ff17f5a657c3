//! Tauri glue: managed state, command handlers and trait adapters.

pub mod adapters;
pub mod commands;

use anyhow::Context;
use std::sync::Arc;
use tauri::{Manager, Runtime};

use crate::{
    audio::RodioChime,
    background::FsImageLoader,
    backend::TimerBackend,
    config::ViewConfig,
    controller::{Collaborators, FrontendController},
    log_error, log_info, log_warn,
    utils::init_logging,
};
use adapters::{MainWindow, NativePicker, SystemNotifier, WebviewPlayer, WebviewSink};

const ENABLE_LOGS: bool = true;

pub(crate) struct AppState {
    pub(crate) controller: FrontendController,
}

/// Registers the plugins, managed state and commands this front-end needs.
/// `backend` is the timer the host application runs.
pub fn install<R: Runtime>(
    builder: tauri::Builder<R>,
    backend: Arc<dyn TimerBackend>,
) -> tauri::Builder<R> {
    let config = ViewConfig::from_env();
    init_logging(&config);

    log_info!("PulsoDoro view starting up...");

    builder
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(move |app| {
            let result = (|| -> anyhow::Result<()> {
                let handle = app.handle().clone();
                let controller = FrontendController::new(
                    &config,
                    Collaborators {
                        backend,
                        sink: Arc::new(WebviewSink::new(handle.clone())),
                        loader: Arc::new(FsImageLoader),
                        chime: Arc::new(RodioChime::new()),
                        notifier: Arc::new(SystemNotifier::new(handle.clone())),
                        window: Arc::new(MainWindow::new(
                            handle.clone(),
                            config.main_window_label.clone(),
                        )),
                        player: Arc::new(WebviewPlayer::new(handle.clone())),
                        picker: Arc::new(NativePicker::new(handle)),
                    },
                );

                // An unreachable backend leaves the window up; commands report it.
                if let Err(err) = tauri::async_runtime::block_on(controller.init())
                    .context("initial sync with timer backend")
                {
                    log_error!("{:#}", err);
                    log_warn!("Settings will be fetched again on the next timer update");
                }

                tauri::async_runtime::spawn(controller.event_pump());
                app.manage(AppState { controller });
                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_render_model,
            commands::dispatch_intent,
            commands::handle_key,
            commands::open_settings,
            commands::close_settings,
            commands::pick_background,
            commands::clear_background,
            commands::save_settings,
            commands::toggle_music,
            commands::resolve_video,
        ])
}
