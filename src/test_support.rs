//! Fakes for the collaborator traits. Test-only.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use tokio::sync::broadcast;

use crate::{
    alerts::{Chime, Notifier},
    background::{Asset, AssetLoader, BackgroundUpdate},
    backend::{BackendEvent, TimerBackend},
    dispatcher::WindowControl,
    error::{SyncError, SyncResult},
    model::{Phase, RenderModel, SettingsRecord, StatusSnapshot},
    settings_panel::FilePicker,
    video::MediaPlayer,
    view::ViewSink,
};

pub fn snapshot(phase: Phase, remaining_seconds: u32, cycle_index: u32, is_running: bool) -> StatusSnapshot {
    StatusSnapshot {
        phase,
        remaining_seconds,
        cycle_index,
        is_running,
    }
}

/// Writes `bytes` to a unique file under the temp dir and returns its path.
pub fn scratch_file(name: &str, bytes: &[u8]) -> String {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "pulsodoro-{}-{}-{}",
        std::process::id(),
        unique,
        name
    ));
    std::fs::write(&path, bytes).expect("write scratch file");
    path.to_string_lossy().into_owned()
}

struct BackendInner {
    status: StatusSnapshot,
    settings: SettingsRecord,
    saved: Option<SettingsRecord>,
    always_on_top: bool,
    calls: Vec<String>,
    failing: HashSet<String>,
}

/// In-memory backend with a toy phase walk and a call log.
pub struct FakeBackend {
    inner: Mutex<BackendInner>,
    events: Mutex<Option<broadcast::Sender<BackendEvent>>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}

impl FakeBackend {
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            inner: Mutex::new(BackendInner {
                status: snapshot(Phase::Idle, 1500, 1, false),
                settings: SettingsRecord::default(),
                saved: None,
                always_on_top: false,
                calls: Vec::new(),
                failing: HashSet::new(),
            }),
            events: Mutex::new(Some(tx)),
        }
    }

    pub fn with_settings(settings: SettingsRecord) -> Self {
        let backend = Self::default();
        backend.inner.lock().unwrap().settings = settings;
        backend
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn set_status(&self, status: StatusSnapshot) {
        self.inner.lock().unwrap().status = status;
    }

    pub fn set_running(&self, running: bool) {
        self.inner.lock().unwrap().status.is_running = running;
    }

    pub fn fail_next(&self, command: &str) {
        self.inner.lock().unwrap().failing.insert(command.to_string());
    }

    pub fn saved_settings(&self) -> Option<SettingsRecord> {
        self.inner.lock().unwrap().saved.clone()
    }

    pub fn push(&self, event: BackendEvent) {
        if let Some(tx) = self.events.lock().unwrap().as_ref() {
            let _ = tx.send(event);
        }
    }

    /// Drops the sender so subscribers see the stream end.
    pub fn close(&self) {
        self.events.lock().unwrap().take();
    }

    fn call<T>(
        &self,
        command: &'static str,
        op: impl FnOnce(&mut BackendInner) -> T,
    ) -> SyncResult<T> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(command.to_string());
        if inner.failing.remove(command) {
            return Err(SyncError::command(command, "scripted failure"));
        }
        Ok(op(&mut inner))
    }
}

#[async_trait]
impl TimerBackend for FakeBackend {
    async fn start_timer(&self) -> SyncResult<StatusSnapshot> {
        self.call("start_timer", |inner| {
            if inner.status.phase == Phase::Idle {
                inner.status.phase = Phase::Focus;
                inner.status.remaining_seconds = 1500;
            }
            inner.status.is_running = true;
            inner.status.clone()
        })
    }

    async fn pause_timer(&self) -> SyncResult<StatusSnapshot> {
        self.call("pause_timer", |inner| {
            inner.status.is_running = false;
            inner.status.clone()
        })
    }

    async fn reset_timer(&self) -> SyncResult<StatusSnapshot> {
        self.call("reset_timer", |inner| {
            inner.status = snapshot(Phase::Idle, 1500, 1, false);
            inner.status.clone()
        })
    }

    async fn skip_timer(&self) -> SyncResult<StatusSnapshot> {
        self.call("skip_timer", |inner| {
            let (phase, remaining) = match inner.status.phase {
                Phase::Idle => (Phase::Idle, inner.status.remaining_seconds),
                Phase::Focus => (Phase::ShortBreak, 300),
                Phase::ShortBreak | Phase::LongBreak => (Phase::Focus, 1500),
            };
            inner.status.phase = phase;
            inner.status.remaining_seconds = remaining;
            inner.status.clone()
        })
    }

    async fn get_timer_status(&self) -> SyncResult<StatusSnapshot> {
        self.call("get_timer_status", |inner| inner.status.clone())
    }

    async fn get_settings(&self) -> SyncResult<SettingsRecord> {
        self.call("get_settings", |inner| inner.settings.clone())
    }

    async fn save_settings(&self, settings: SettingsRecord) -> SyncResult<()> {
        self.call("save_settings", |inner| {
            inner.saved = Some(settings.clone());
            inner.settings = settings;
        })
    }

    async fn toggle_always_on_top(&self) -> SyncResult<bool> {
        self.call("toggle_always_on_top", |inner| {
            inner.always_on_top = !inner.always_on_top;
            inner.always_on_top
        })
    }

    fn subscribe(&self) -> broadcast::Receiver<BackendEvent> {
        match self.events.lock().unwrap().as_ref() {
            Some(tx) => tx.subscribe(),
            None => broadcast::channel(1).1,
        }
    }
}

#[derive(Default)]
pub struct CountingLoader {
    loads: Mutex<HashMap<String, usize>>,
    failing: Option<String>,
}

impl CountingLoader {
    pub fn failing_on(path: &str) -> Self {
        Self {
            loads: Mutex::new(HashMap::new()),
            failing: Some(path.to_string()),
        }
    }

    pub fn loads_for(&self, path: &str) -> usize {
        self.loads.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_loads(&self) -> usize {
        self.loads.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl AssetLoader for CountingLoader {
    async fn load(&self, path: &str) -> SyncResult<Asset> {
        *self.loads.lock().unwrap().entry(path.to_string()).or_default() += 1;
        if self.failing.as_deref() == Some(path) {
            return Err(SyncError::AssetUnavailable {
                path: path.to_string(),
                reason: "missing".into(),
            });
        }
        Ok(format!("data:image/png;base64,{}", path.len()))
    }
}

#[derive(Default)]
pub struct RecordingSink {
    renders: Mutex<Vec<RenderModel>>,
    backgrounds: Mutex<Vec<BackgroundUpdate>>,
}

impl RecordingSink {
    pub fn renders(&self) -> Vec<RenderModel> {
        self.renders.lock().unwrap().clone()
    }

    pub fn backgrounds(&self) -> Vec<BackgroundUpdate> {
        self.backgrounds.lock().unwrap().clone()
    }
}

impl ViewSink for RecordingSink {
    fn render(&self, model: &RenderModel) {
        self.renders.lock().unwrap().push(model.clone());
    }

    fn paint_background(&self, update: &BackgroundUpdate) {
        self.backgrounds.lock().unwrap().push(update.clone());
    }
}

#[derive(Default)]
pub struct RecordingChime {
    plays: AtomicUsize,
    fail: bool,
}

impl RecordingChime {
    pub fn failing() -> Self {
        Self {
            plays: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl Chime for RecordingChime {
    fn play(&self) -> SyncResult<()> {
        if self.fail {
            return Err(SyncError::shell("no audio device"));
        }
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct StubNotifier {
    granted: bool,
    queries: AtomicUsize,
    sent: Mutex<Vec<(String, String)>>,
}

impl StubNotifier {
    pub fn granted() -> Self {
        Self::with_permission(true)
    }

    pub fn denied() -> Self {
        Self::with_permission(false)
    }

    fn with_permission(granted: bool) -> Self {
        Self {
            granted,
            queries: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn permission_queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for StubNotifier {
    fn permission_granted(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.granted
    }

    fn notify(&self, title: &str, body: &str) -> SyncResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPlayer {
    calls: Mutex<Vec<String>>,
}

impl RecordingPlayer {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> SyncResult<()> {
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

impl MediaPlayer for RecordingPlayer {
    fn cue(&self, video_id: &str) -> SyncResult<()> {
        self.record(format!("cue:{video_id}"))
    }

    fn play(&self) -> SyncResult<()> {
        self.record("play".into())
    }

    fn pause(&self) -> SyncResult<()> {
        self.record("pause".into())
    }

    fn load_new(&self, video_id: &str) -> SyncResult<()> {
        self.record(format!("load_new:{video_id}"))
    }
}

#[derive(Default)]
pub struct RecordingWindow {
    states: Mutex<Vec<bool>>,
}

impl RecordingWindow {
    pub fn states(&self) -> Vec<bool> {
        self.states.lock().unwrap().clone()
    }
}

impl WindowControl for RecordingWindow {
    fn set_always_on_top(&self, on_top: bool) -> SyncResult<()> {
        self.states.lock().unwrap().push(on_top);
        Ok(())
    }
}

/// Answers the next file dialog with a preset path.
#[derive(Default)]
pub struct ScriptedPicker {
    answer: Mutex<Option<String>>,
    filters: Mutex<Vec<String>>,
}

impl ScriptedPicker {
    pub fn answer(&self, path: Option<&str>) {
        *self.answer.lock().unwrap() = path.map(str::to_string);
    }

    pub fn filters(&self) -> Vec<String> {
        self.filters.lock().unwrap().clone()
    }
}

#[async_trait]
impl FilePicker for ScriptedPicker {
    async fn pick_file(&self, _filter_name: &str, extensions: &[&str]) -> SyncResult<Option<String>> {
        self.filters.lock().unwrap().push(extensions.join(","));
        Ok(self.answer.lock().unwrap().take())
    }
}
