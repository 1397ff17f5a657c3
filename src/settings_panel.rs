use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::SyncResult,
    model::{
        non_empty, SettingsRecord, DEFAULT_FOCUS_MINUTES, DEFAULT_LONG_BREAK_MINUTES,
        DEFAULT_SHORT_BREAK_MINUTES,
    },
    video::resolve_video_id,
};

pub const DEFAULT_BACKGROUND_NAME: &str = "Default gradient";

#[async_trait]
pub trait FilePicker: Send + Sync {
    /// Native single-file dialog filtered to `extensions`. `None` if cancelled.
    async fn pick_file(&self, filter_name: &str, extensions: &[&str]) -> SyncResult<Option<String>>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundSlot {
    Focus,
    Break,
}

/// Raw values from the panel's inputs, as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    pub focus_minutes: String,
    pub short_break_minutes: String,
    pub long_break_minutes: String,
    pub change_wallpaper: bool,
    pub sound_enabled: bool,
    pub always_on_top: bool,
    pub custom_video: String,
}

/// What the panel shows when it opens.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub change_wallpaper: bool,
    pub sound_enabled: bool,
    pub always_on_top: bool,
    pub custom_video: String,
    pub focus_background_name: String,
    pub break_background_name: String,
}

/// Settings being edited; background choices stay pending until saved.
#[derive(Debug, Clone)]
pub struct SettingsDraft {
    base: SettingsRecord,
    focus_background: String,
    break_background: String,
}

impl SettingsDraft {
    pub fn from_record(record: SettingsRecord) -> Self {
        Self {
            focus_background: record.focus_background_path.clone(),
            break_background: record.break_background_path.clone(),
            base: record,
        }
    }

    pub fn background(&self, slot: BackgroundSlot) -> &str {
        match slot {
            BackgroundSlot::Focus => &self.focus_background,
            BackgroundSlot::Break => &self.break_background,
        }
    }

    pub fn set_background(&mut self, slot: BackgroundSlot, path: String) {
        match slot {
            BackgroundSlot::Focus => self.focus_background = path,
            BackgroundSlot::Break => self.break_background = path,
        }
    }

    pub fn clear_background(&mut self, slot: BackgroundSlot) {
        self.set_background(slot, String::new());
    }

    pub fn background_name(&self, slot: BackgroundSlot) -> String {
        display_name(self.background(slot))
    }

    pub fn view(&self) -> PanelView {
        PanelView {
            focus_minutes: self.base.focus_minutes,
            short_break_minutes: self.base.short_break_minutes,
            long_break_minutes: self.base.long_break_minutes,
            change_wallpaper: self.base.change_wallpaper,
            sound_enabled: self.base.sound_enabled,
            always_on_top: self.base.always_on_top,
            custom_video: self.base.custom_video_id.clone(),
            focus_background_name: self.background_name(BackgroundSlot::Focus),
            break_background_name: self.background_name(BackgroundSlot::Break),
        }
    }

    pub fn to_record(&self, form: &SettingsForm) -> SettingsRecord {
        SettingsRecord {
            focus_minutes: parse_minutes(&form.focus_minutes, DEFAULT_FOCUS_MINUTES),
            short_break_minutes: parse_minutes(&form.short_break_minutes, DEFAULT_SHORT_BREAK_MINUTES),
            long_break_minutes: parse_minutes(&form.long_break_minutes, DEFAULT_LONG_BREAK_MINUTES),
            change_wallpaper: form.change_wallpaper,
            sound_enabled: form.sound_enabled,
            custom_video_id: resolve_video_id(&form.custom_video).unwrap_or_default(),
            always_on_top: form.always_on_top,
            focus_background_path: self.focus_background.clone(),
            break_background_path: self.break_background.clone(),
        }
    }
}

/// File name of `path` with either separator, or the default label.
pub fn display_name(path: &str) -> String {
    match non_empty(path) {
        Some(path) => path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or(path)
            .to_string(),
        None => DEFAULT_BACKGROUND_NAME.to_string(),
    }
}

/// Leading integer of `input`; zero, negative or missing falls back to `default`.
pub fn parse_minutes(input: &str, default: u32) -> u32 {
    let digits: String = input
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => default,
    }
}
