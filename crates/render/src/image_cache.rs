use crate::error::RenderError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tiny_skia::Pixmap;

pub const BACKGROUND_KEY: &str = "background";
pub const LOGO_KEY: &str = "logo";

type Slot = Arc<OnceCell<Arc<Pixmap>>>;

/// Decoded images shared by every card of one run.
///
/// Each key has a slot that is filled at most once. Callers racing on an
/// empty slot block until the first loader finishes; a loader that fails
/// leaves the slot empty for the next caller.
#[derive(Debug, Default)]
pub struct ImageCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<F>(&self, key: &str, loader: F) -> Result<Arc<Pixmap>, RenderError>
    where
        F: FnOnce() -> Result<Pixmap, RenderError>,
    {
        let slot = self.slot(key)?;
        slot.get_or_try_init(|| {
            log::debug!("Decoding '{}' image for this run", key);
            loader().map(Arc::new)
        })
        .cloned()
    }

    /// The cached image for `key`, without loading.
    pub fn get(&self, key: &str) -> Option<Arc<Pixmap>> {
        let slots = self.slots.lock().ok()?;
        slots.get(key)?.get().cloned()
    }

    /// Number of keys holding an image.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .map(|s| s.values().filter(|slot| slot.get().is_some()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, key: &str) -> Result<Slot, RenderError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| RenderError::Cache {
                key: key.to_string(),
                message: "lock poisoned by a panicked render".to_string(),
            })?;
        Ok(slots.entry(key.to_string()).or_default().clone())
    }
}
