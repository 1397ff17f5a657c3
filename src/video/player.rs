use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;

use super::{choose_stream, resolve_video_id};
use crate::error::SyncResult;

/// Embedded video widget. The view owns construction; we only say which id.
pub trait MediaPlayer: Send + Sync {
    /// Loads the widget on first use with `video_id` queued.
    fn cue(&self, video_id: &str) -> SyncResult<()>;
    fn play(&self) -> SyncResult<()>;
    fn pause(&self) -> SyncResult<()>;
    /// Swaps the playing video on an already loaded widget.
    fn load_new(&self, video_id: &str) -> SyncResult<()>;
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MusicState {
    Unloaded,
    Playing,
    Paused,
}

pub struct MusicController {
    state: MusicState,
    current_id: Option<String>,
    custom_video: String,
    rng: StdRng,
}

impl MusicController {
    pub fn new(custom_video: String) -> Self {
        Self::with_rng(custom_video, StdRng::from_entropy())
    }

    pub fn with_rng(custom_video: String, rng: StdRng) -> Self {
        Self {
            state: MusicState::Unloaded,
            current_id: None,
            custom_video,
            rng,
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn toggle(&mut self, player: &dyn MediaPlayer) -> SyncResult<MusicState> {
        self.state = match self.state {
            MusicState::Unloaded => {
                let id = choose_stream(&self.custom_video, &mut self.rng);
                player.cue(&id)?;
                player.play()?;
                self.current_id = Some(id);
                MusicState::Playing
            }
            MusicState::Playing => {
                player.pause()?;
                MusicState::Paused
            }
            MusicState::Paused => {
                player.play()?;
                MusicState::Playing
            }
        };
        Ok(self.state)
    }

    /// Records a new custom video; swaps it in if the widget is already loaded.
    pub fn set_custom_video(&mut self, custom: &str, player: &dyn MediaPlayer) -> SyncResult<()> {
        self.custom_video = custom.to_string();

        if self.state == MusicState::Unloaded {
            return Ok(());
        }

        if let Some(id) = resolve_video_id(custom) {
            if self.current_id.as_deref() != Some(id.as_str()) {
                player.load_new(&id)?;
                self.current_id = Some(id);
                self.state = MusicState::Playing;
            }
        }
        Ok(())
    }
}
