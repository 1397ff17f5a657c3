use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Focus,
    ShortBreak,
    LongBreak,
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

impl Phase {
    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Focus => "FOCUS",
            Phase::ShortBreak => "SHORT BREAK",
            Phase::LongBreak => "LONG BREAK",
        }
    }

    /// CSS class the view applies to its root element.
    pub fn theme(self) -> &'static str {
        match self {
            Phase::Idle => "",
            Phase::Focus => "focus",
            Phase::ShortBreak => "short-break",
            Phase::LongBreak => "long-break",
        }
    }
}

/// Authoritative timer state as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusSnapshot {
    #[serde(alias = "state")]
    pub phase: Phase,
    #[serde(alias = "remaining_secs")]
    pub remaining_seconds: u32,
    #[serde(alias = "cycle")]
    pub cycle_index: u32,
    pub is_running: bool,
}

impl StatusSnapshot {
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
            cycle_index: 1,
            is_running: false,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettingsRecord {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    pub change_wallpaper: bool,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default, alias = "custom_youtube_id")]
    pub custom_video_id: String,
    #[serde(default)]
    pub always_on_top: bool,
    #[serde(default, alias = "focus_background")]
    pub focus_background_path: String,
    #[serde(default, alias = "break_background")]
    pub break_background_path: String,
}

pub const DEFAULT_FOCUS_MINUTES: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MINUTES: u32 = 5;
pub const DEFAULT_LONG_BREAK_MINUTES: u32 = 15;

impl Default for SettingsRecord {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            short_break_minutes: DEFAULT_SHORT_BREAK_MINUTES,
            long_break_minutes: DEFAULT_LONG_BREAK_MINUTES,
            change_wallpaper: false,
            sound_enabled: true,
            custom_video_id: String::new(),
            always_on_top: false,
            focus_background_path: String::new(),
            break_background_path: String::new(),
        }
    }
}

impl SettingsRecord {
    pub fn focus_background(&self) -> Option<&str> {
        non_empty(&self.focus_background_path)
    }

    pub fn break_background(&self) -> Option<&str> {
        non_empty(&self.break_background_path)
    }
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DotState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlsEnabled {
    pub start: bool,
    pub pause: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreakPrompt {
    pub icon: String,
    pub text: String,
}

/// Everything the view needs to paint one frame. Rebuilt on every snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub time_text: String,
    pub phase_label: String,
    pub theme: String,
    pub dot_states: Vec<DotState>,
    pub controls_enabled: ControlsEnabled,
    pub background_asset_key: Option<String>,
    pub break_prompt: Option<BreakPrompt>,
    /// Transient indicator shown after a failed command.
    pub notice: Option<String>,
}

pub fn format_time(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
