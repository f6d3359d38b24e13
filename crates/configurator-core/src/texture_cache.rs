//! Path-keyed cache of asynchronously loaded textures.
//!
//! The host starts a fetch when [`TextureCache::request`] returns `true` and
//! reports the outcome with [`TextureCache::resolve`]. Results may arrive in
//! any order; until then the slot reads as absent.

use fnv::FnvHashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("fetch {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("decode {path} failed: {reason}")]
    Decode { path: String, reason: String },
}

#[derive(Debug)]
pub enum TextureSlot<T> {
    Pending,
    Ready(T),
    Failed,
}

/// Read-only view of texture readiness used by the composer.
pub trait TextureLookup {
    fn is_ready(&self, path: &str) -> bool;
}

/// A lookup for which nothing has loaded yet.
pub struct NoTextures;

impl TextureLookup for NoTextures {
    fn is_ready(&self, _path: &str) -> bool {
        false
    }
}

#[derive(Debug)]
pub struct TextureCache<T> {
    slots: FnvHashMap<String, TextureSlot<T>>,
    generation: u64,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            slots: FnvHashMap::default(),
            generation: 0,
        }
    }
}

impl<T> TextureCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as pending. Returns `true` only the first time a path is
    /// seen; failed paths are not retried.
    pub fn request(&mut self, path: &str) -> bool {
        if self.slots.contains_key(path) {
            return false;
        }
        self.slots.insert(path.to_string(), TextureSlot::Pending);
        true
    }

    pub fn resolve(&mut self, path: &str, result: Result<T, TextureError>) {
        let slot = match result {
            Ok(tex) => TextureSlot::Ready(tex),
            Err(e) => {
                log::warn!("texture unavailable, channel left unset: {}", e);
                TextureSlot::Failed
            }
        };
        self.slots.insert(path.to_string(), slot);
        self.generation += 1;
    }

    pub fn get(&self, path: &str) -> Option<&T> {
        match self.slots.get(path) {
            Some(TextureSlot::Ready(t)) => Some(t),
            _ => None,
        }
    }

    pub fn slot(&self, path: &str) -> Option<&TextureSlot<T>> {
        self.slots.get(path)
    }

    pub fn is_failed(&self, path: &str) -> bool {
        matches!(self.slots.get(path), Some(TextureSlot::Failed))
    }

    /// Bumped on every resolution so dependents can tell when to recompose.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl<T> TextureLookup for TextureCache<T> {
    fn is_ready(&self, path: &str) -> bool {
        self.get(path).is_some()
    }
}
