/// Host surface size provider.
///
/// The registry sizes screen-relative framebuffers from the current
/// surface. Anything that can report a physical size in pixels can drive
/// [`FramebufferRegistry::rebuild_for_surface`](super::FramebufferRegistry::rebuild_for_surface).

use winit::dpi::PhysicalSize;
use winit::window::Window;

/// Source of the current surface size in physical pixels
pub trait SurfaceSize {
    /// Current `(width, height)`; either may be zero while minimized
    fn surface_size(&self) -> (u32, u32);
}

impl SurfaceSize for Window {
    fn surface_size(&self) -> (u32, u32) {
        self.inner_size().surface_size()
    }
}

impl SurfaceSize for PhysicalSize<u32> {
    fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl SurfaceSize for (u32, u32) {
    fn surface_size(&self) -> (u32, u32) {
        *self
    }
}
