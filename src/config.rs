/// Front-end knobs that do not live in the backend's settings record.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Number of progress dots; equals the backend's cycles-to-long-break.
    pub cycles_to_long_break: u32,
    pub notification_title: String,
    pub main_window_label: String,
    pub debug: bool,
}

pub const DEFAULT_CYCLES_TO_LONG_BREAK: u32 = 4;

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            cycles_to_long_break: DEFAULT_CYCLES_TO_LONG_BREAK,
            notification_title: "PulsoDoro".into(),
            main_window_label: "main".into(),
            debug: false,
        }
    }
}

impl ViewConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cycles_to_long_break = lookup("PULSODORO_CYCLES")
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|cycles| *cycles >= 1)
            .unwrap_or(defaults.cycles_to_long_break);

        let debug = lookup("PULSODORO_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            cycles_to_long_break,
            debug,
            ..defaults
        }
    }
}
