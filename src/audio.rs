use rodio::{source::SineWave, OutputStream, Sink, Source};
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;
use std::time::Duration;

use crate::{alerts::Chime, error::{SyncError, SyncResult}};

/// Two rising notes, played when a phase completes.
const CHIME_NOTES: [(f32, u64); 2] = [(880.0, 180), (1318.5, 260)];
const CHIME_GAIN: f32 = 0.25;

enum AudioCommand {
    Chime,
}

/// Chime player on a dedicated thread; rodio output handles are not `Send`.
pub struct RodioChime {
    tx: Arc<Mutex<Option<Sender<AudioCommand>>>>,
}

impl RodioChime {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    fn ensure_thread(&self) -> SyncResult<Sender<AudioCommand>> {
        let mut guard = self.tx.lock().map_err(SyncError::shell)?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();

        thread::Builder::new()
            .name("chime-audio".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Chime => {
                            if let Err(err) = ensure_sink(&mut _stream, &mut sink) {
                                log::warn!("{}", err);
                                continue;
                            }
                            if let Some(ref s) = sink {
                                for (freq, millis) in CHIME_NOTES {
                                    s.append(
                                        SineWave::new(freq)
                                            .take_duration(Duration::from_millis(millis))
                                            .amplify(CHIME_GAIN),
                                    );
                                }
                                s.play();
                            }
                        }
                    }
                }
            })
            .map_err(SyncError::shell)?;

        *guard = Some(tx.clone());
        Ok(tx)
    }
}

impl Default for RodioChime {
    fn default() -> Self {
        Self::new()
    }
}

impl Chime for RodioChime {
    fn play(&self) -> SyncResult<()> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Chime).map_err(SyncError::shell)
    }
}
