//! Preview images for the selected file
//!
//! A preview is acquired once the picked file has been decoded and released
//! when its [`PreviewRef`] is dropped, so replacing the selection or tearing
//! the app down never leaves decoded pixels behind.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// Longest edge of a decoded preview; larger images are downscaled
const PREVIEW_MAX_EDGE: u32 = 768;

/// Decoded RGBA pixels ready to upload as a texture
pub struct PreviewImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

impl PreviewImage {
    /// Decode and downscale image bytes. Returns `None` for anything the
    /// `image` crate cannot read.
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        let img = image::load_from_memory(bytes).ok()?;
        let img = if img.width() > PREVIEW_MAX_EDGE || img.height() > PREVIEW_MAX_EDGE {
            img.thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
        } else {
            img
        };
        let rgba = img.to_rgba8();
        let size = [rgba.width() as usize, rgba.height() as usize];
        Some(Self {
            size,
            rgba: rgba.into_raw(),
        })
    }
}

#[derive(Default)]
struct Slots {
    next_id: u64,
    live: HashMap<u64, Arc<PreviewImage>>,
}

/// Owner of every live preview
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    slots: Arc<Mutex<Slots>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // A panic while holding the lock cannot leave Slots half-updated
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn acquire(&self, image: PreviewImage) -> PreviewRef {
        let mut slots = self.lock();
        slots.next_id += 1;
        let id = slots.next_id;
        slots.live.insert(id, Arc::new(image));
        debug!(id, live = slots.live.len(), "Preview acquired");
        PreviewRef {
            id,
            registry: self.clone(),
        }
    }

    pub fn get(&self, id: u64) -> Option<Arc<PreviewImage>> {
        self.lock().live.get(&id).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.lock().live.len()
    }

    fn release(&self, id: u64) {
        let mut slots = self.lock();
        if slots.live.remove(&id).is_some() {
            debug!(id, live = slots.live.len(), "Preview released");
        }
    }
}

/// Handle to one live preview. Dropping it releases the pixels.
pub struct PreviewRef {
    id: u64,
    registry: PreviewRegistry,
}

impl PreviewRef {
    /// Unique per acquisition; used as the texture name
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn image(&self) -> Option<Arc<PreviewImage>> {
        self.registry.get(self.id)
    }
}

impl Drop for PreviewRef {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}

impl std::fmt::Debug for PreviewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewRef").field("id", &self.id).finish()
    }
}

#[cfg(test)]
pub(crate) fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
