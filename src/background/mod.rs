pub mod loader;

pub use loader::{Asset, AssetLoader, FsImageLoader, IMAGE_EXTENSIONS};

use serde::Serialize;
use std::{collections::HashMap, sync::Arc};

use crate::{error::SyncResult, log_warn, model::Phase};

const ENABLE_LOGS: bool = true;

/// What the view should paint behind the timer after a phase change.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundUpdate {
    pub key: Option<String>,
    pub data_url: Option<Asset>,
}

#[derive(Debug, Clone)]
struct Displayed {
    key: Option<String>,
    loaded: bool,
}

/// Maps phases to background images, loading each path at most once.
pub struct BackgroundResolver {
    loader: Arc<dyn AssetLoader>,
    cache: HashMap<String, Asset>,
    focus_path: Option<String>,
    break_path: Option<String>,
    /// `None` until something has been painted, or after the paths change.
    displayed: Option<Displayed>,
}

impl BackgroundResolver {
    pub fn new(loader: Arc<dyn AssetLoader>) -> Self {
        Self {
            loader,
            cache: HashMap::new(),
            focus_path: None,
            break_path: None,
            displayed: None,
        }
    }

    /// Swaps the configured paths. The next [`apply`](Self::apply) repaints
    /// even if the phase did not change; cached assets are kept.
    pub fn set_paths(&mut self, focus_path: Option<&str>, break_path: Option<&str>) {
        self.focus_path = focus_path.map(str::to_string);
        self.break_path = break_path.map(str::to_string);
        self.displayed = None;
    }

    pub fn resolve(&self, phase: Phase) -> Option<&str> {
        match phase {
            Phase::Focus => self.focus_path.as_deref(),
            Phase::ShortBreak | Phase::LongBreak => self.break_path.as_deref(),
            Phase::Idle => None,
        }
    }

    /// Key of the asset currently on screen, if it loaded.
    pub fn displayed_key(&self) -> Option<&str> {
        self.displayed
            .as_ref()
            .filter(|displayed| displayed.loaded)
            .and_then(|displayed| displayed.key.as_deref())
    }

    /// True until the current paths have been painted once.
    pub fn needs_paint(&self) -> bool {
        self.displayed.is_none()
    }

    pub fn is_cached(&self, path: &str) -> bool {
        self.cache.contains_key(path)
    }

    pub async fn load(&mut self, path: &str) -> SyncResult<Asset> {
        if let Some(asset) = self.cache.get(path) {
            return Ok(asset.clone());
        }

        let asset = self.loader.load(path).await?;
        self.cache.insert(path.to_string(), asset.clone());
        Ok(asset)
    }

    /// Returns `None` when the resolved key matches what is already painted.
    pub async fn apply(&mut self, phase: Phase) -> Option<BackgroundUpdate> {
        let key = self.resolve(phase).map(str::to_string);

        if let Some(displayed) = &self.displayed {
            if displayed.key == key {
                return None;
            }
        }

        let data_url = match key.as_deref() {
            Some(path) => match self.load(path).await {
                Ok(asset) => Some(asset),
                Err(err) => {
                    log_warn!("Background for {:?} unavailable: {}", phase, err);
                    None
                }
            },
            None => None,
        };

        self.displayed = Some(Displayed {
            key: key.clone(),
            loaded: data_url.is_some(),
        });

        Some(BackgroundUpdate {
            key: if data_url.is_some() { key } else { None },
            data_url,
        })
    }
}
