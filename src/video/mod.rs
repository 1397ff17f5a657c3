pub mod player;

pub use player::{MediaPlayer, MusicController, MusicState};

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

pub const VIDEO_ID_LEN: usize = 11;

/// Streams picked from when no custom video is configured.
pub const LOFI_STREAMS: [&str; 3] = [
    "jfKfPfyJRdk", // Lofi Girl
    "4xDzrJKXOOY", // Synthwave Boy
    "7NOSDKb0HlU", // ChilledCow study beats
];

fn bare_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid bare id pattern"))
}

fn url_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            // watch?v=ID, with v anywhere in the query
            r"youtube\.com/watch\?(?:[^#\s]*&)?v=([A-Za-z0-9_-]{11})",
            r"youtu\.be/([A-Za-z0-9_-]{11})",
            r"youtube\.com/embed/([A-Za-z0-9_-]{11})",
            r"youtube\.com/live/([A-Za-z0-9_-]{11})",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("valid video url pattern"))
        .collect()
    })
}

/// Extracts an 11-character video id from a bare id or a supported URL.
pub fn resolve_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if bare_id_pattern().is_match(trimmed) {
        return Some(trimmed.to_string());
    }

    url_patterns().iter().find_map(|pattern| {
        pattern
            .captures(trimmed)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str().to_string())
    })
}

/// The custom id when it resolves, otherwise a random default stream.
pub fn choose_stream<R: Rng + ?Sized>(custom: &str, rng: &mut R) -> String {
    if let Some(id) = resolve_video_id(custom) {
        return id;
    }
    LOFI_STREAMS
        .choose(rng)
        .copied()
        .unwrap_or(LOFI_STREAMS[0])
        .to_string()
}
