use tauri::State;

use crate::{
    dispatcher::{DispatchOutcome, Intent},
    model::RenderModel,
    settings_panel::{BackgroundSlot, PanelView, SettingsForm},
    video::{resolve_video_id, MusicState},
};

use super::AppState;

#[tauri::command]
pub async fn get_render_model(state: State<'_, AppState>) -> Result<Option<RenderModel>, String> {
    Ok(state.controller.render_model().await)
}

#[tauri::command]
pub async fn dispatch_intent(
    state: State<'_, AppState>,
    intent: Intent,
) -> Result<DispatchOutcome, String> {
    state
        .controller
        .intent(intent)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn handle_key(
    state: State<'_, AppState>,
    code: String,
    text_input_focused: bool,
) -> Result<Option<DispatchOutcome>, String> {
    state
        .controller
        .key(&code, text_input_focused)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn open_settings(state: State<'_, AppState>) -> Result<PanelView, String> {
    state
        .controller
        .open_settings()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn close_settings(state: State<'_, AppState>) -> Result<(), String> {
    state
        .controller
        .close_settings()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn pick_background(
    state: State<'_, AppState>,
    slot: BackgroundSlot,
) -> Result<PanelView, String> {
    state
        .controller
        .pick_background(slot)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_background(
    state: State<'_, AppState>,
    slot: BackgroundSlot,
) -> Result<PanelView, String> {
    state
        .controller
        .clear_background(slot)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn save_settings(
    state: State<'_, AppState>,
    form: SettingsForm,
) -> Result<RenderModel, String> {
    state
        .controller
        .save_settings(form)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn toggle_music(state: State<'_, AppState>) -> Result<MusicState, String> {
    state
        .controller
        .toggle_music()
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub fn resolve_video(input: String) -> Option<String> {
    resolve_video_id(&input)
}
