//! Platform abstraction layer
//!
//! A [`Surface`] is the render target the host hands to the game view. It
//! may be temporarily invalid (not yet created, being torn down); the
//! simulation loop skips frames while it is.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::renderer::{Canvas, FrameBuffer};

/// Render target driven by the simulation thread
pub trait Surface: Send {
    /// Whether frames can be drawn right now
    fn is_valid(&self) -> bool;
    /// Canvas for the next frame, `None` if it cannot be locked
    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas>;
    /// Publish the frame drawn since the last lock
    fn unlock_and_post(&mut self);
    /// Adopt new pixel dimensions
    fn resize(&mut self, width: u32, height: u32);
}

/// Shared view of a [`BufferSurface`] for the host side
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle {
    valid: Arc<AtomicBool>,
    posted: Arc<AtomicU64>,
    last_frame: Arc<Mutex<Vec<u8>>>,
}

impl SurfaceHandle {
    /// Mark the surface usable or not (e.g. while the host recreates it)
    pub fn set_valid(&self, valid: bool) {
        self.valid.store(valid, Ordering::Release);
    }

    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Frames posted so far
    pub fn frames_posted(&self) -> u64 {
        self.posted.load(Ordering::Acquire)
    }

    /// Copy of the most recently posted frame as RGBA bytes
    pub fn last_frame(&self) -> Vec<u8> {
        match self.last_frame.lock() {
            Ok(frame) => frame.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// In-memory surface backed by a [`FrameBuffer`]
///
/// Posting copies the frame out so the host can inspect or present it.
#[derive(Debug)]
pub struct BufferSurface {
    frame: FrameBuffer,
    handle: SurfaceHandle,
}

impl BufferSurface {
    /// A valid zero-sized surface; the view resizes it
    pub fn new() -> Self {
        let handle = SurfaceHandle::default();
        handle.set_valid(true);
        Self {
            frame: FrameBuffer::new(0, 0),
            handle,
        }
    }

    pub fn handle(&self) -> SurfaceHandle {
        self.handle.clone()
    }
}

impl Default for BufferSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for BufferSurface {
    fn is_valid(&self) -> bool {
        self.handle.is_valid()
    }

    fn lock_canvas(&mut self) -> Option<&mut dyn Canvas> {
        if !self.handle.is_valid() {
            return None;
        }
        Some(&mut self.frame)
    }

    fn unlock_and_post(&mut self) {
        let mut last = match self.handle.last_frame.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        last.clear();
        last.extend_from_slice(self.frame.as_bytes());
        self.handle.posted.fetch_add(1, Ordering::AcqRel);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.frame.resize(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;

    #[test]
    fn test_invalid_surface_refuses_lock() {
        let mut surface = BufferSurface::new();
        let handle = surface.handle();
        assert!(surface.lock_canvas().is_some());
        handle.set_valid(false);
        assert!(!surface.is_valid());
        assert!(surface.lock_canvas().is_none());
    }

    #[test]
    fn test_post_publishes_frame() {
        let mut surface = BufferSurface::new();
        let handle = surface.handle();
        surface.resize(2, 1);
        if let Some(canvas) = surface.lock_canvas() {
            canvas.draw_sprite(&Sprite::solid(1, 1, [9, 8, 7, 255]), 0.0, 0.0);
        }
        surface.unlock_and_post();
        assert_eq!(handle.frames_posted(), 1);
        assert_eq!(handle.last_frame(), vec![9, 8, 7, 255, 0, 0, 0, 255]);
    }
}
