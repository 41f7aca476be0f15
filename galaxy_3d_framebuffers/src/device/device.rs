/// Device traits - the boundary between the registry and the graphics backend

use bitflags::bitflags;
use glam::Vec4;
use crate::error::Result;
use crate::framebuffer::{FramebufferDefinition, SizeContext};

bitflags! {
    /// Buffers affected by a clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Color attachments
        const COLOR = 1 << 0;
        /// Depth attachment
        const DEPTH = 1 << 1;
        /// Stencil attachment
        const STENCIL = 1 << 2;
    }
}

impl ClearFlags {
    /// Every buffer the framebuffer actually has
    pub fn for_framebuffer(framebuffer: &dyn Framebuffer) -> Self {
        let mut flags = ClearFlags::empty();
        if framebuffer.color_attachment_count() > 0 {
            flags |= ClearFlags::COLOR;
        }
        if framebuffer.has_depth() {
            flags |= ClearFlags::DEPTH;
        }
        flags
    }
}

/// Binding slots that can be reset to "no framebuffer"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindTarget {
    /// Draw framebuffer only
    Draw,
    /// Both read and draw framebuffers
    All,
}

/// Framebuffer handle
///
/// Opaque GPU render target. A handle has exactly one owner; it is released
/// by moving it into [`FramebufferDevice::destroy_framebuffer`].
pub trait Framebuffer {
    /// Get the width in pixels
    fn width(&self) -> u32;

    /// Get the height in pixels
    fn height(&self) -> u32;

    /// Number of color attachments
    fn color_attachment_count(&self) -> usize;

    /// Whether a depth attachment is present
    fn has_depth(&self) -> bool;
}

/// Framebuffer device trait
///
/// Builds and destroys framebuffers and owns the context state the
/// registry touches (clear color and current draw binding).
/// Implemented by backend-specific devices.
pub trait FramebufferDevice {
    /// Build a framebuffer from a definition
    ///
    /// # Arguments
    ///
    /// * `definition` - Declarative description
    /// * `context` - Surface size queries for evaluating the size policy
    fn create_framebuffer(
        &mut self,
        definition: &FramebufferDefinition,
        context: &SizeContext,
    ) -> Result<Box<dyn Framebuffer>>;

    /// Release a framebuffer's GPU resources
    fn destroy_framebuffer(&mut self, framebuffer: Box<dyn Framebuffer>);

    /// Set the color used by subsequent clears
    fn set_clear_color(&mut self, color: Vec4);

    /// Bind a framebuffer as the current draw target
    fn bind_draw(&mut self, framebuffer: &dyn Framebuffer, set_viewport: bool);

    /// Clear the currently bound draw framebuffer
    fn clear(&mut self, framebuffer: &dyn Framebuffer, flags: ClearFlags);

    /// Reset the given binding slots to "no framebuffer"
    fn unbind(&mut self, target: BindTarget);
}

/// Scoped draw binding
///
/// Borrows the device for a batch of bind/clear calls and resets the binding
/// to `restore` when dropped, on every exit path.
pub struct DrawScope<'a> {
    device: &'a mut dyn FramebufferDevice,
    restore: BindTarget,
    set_viewport: bool,
}

impl<'a> DrawScope<'a> {
    /// Begin a scope that unbinds `restore` on drop
    pub fn new(device: &'a mut dyn FramebufferDevice, restore: BindTarget, set_viewport: bool) -> Self {
        Self { device, restore, set_viewport }
    }

    /// Access the device inside the scope
    pub fn device(&mut self) -> &mut dyn FramebufferDevice {
        &mut *self.device
    }

    /// Bind a framebuffer for drawing and clear all of its buffers
    pub fn bind_and_clear(&mut self, framebuffer: &dyn Framebuffer) {
        self.device.bind_draw(framebuffer, self.set_viewport);
        self.device.clear(framebuffer, ClearFlags::for_framebuffer(framebuffer));
    }
}

impl Drop for DrawScope<'_> {
    fn drop(&mut self) {
        self.device.unbind(self.restore);
    }
}
