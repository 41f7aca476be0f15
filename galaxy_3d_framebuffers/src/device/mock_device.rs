/// Mock framebuffer device for unit tests (no GPU required)
///
/// Records every device call in order so tests can check lifecycle
/// guarantees: creations, releases, bind/clear sequences and unbinds.

#[cfg(test)]
use glam::Vec4;
#[cfg(test)]
use rustc_hash::FxHashMap;
#[cfg(test)]
use crate::device::{BindTarget, ClearFlags, Framebuffer, FramebufferDevice};
#[cfg(test)]
use crate::error::{Error, Result};
#[cfg(test)]
use crate::framebuffer::{FramebufferDefinition, SizeContext};

// ============================================================================
// Mock Framebuffer
// ============================================================================

#[cfg(test)]
#[derive(Debug)]
pub struct MockFramebuffer {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    pub color_attachments: usize,
    pub depth: bool,
}

#[cfg(test)]
impl Framebuffer for MockFramebuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color_attachment_count(&self) -> usize {
        self.color_attachments
    }

    fn has_depth(&self) -> bool {
        self.depth
    }
}

// ============================================================================
// Mock Device
// ============================================================================

/// Device call recorded by the mock
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    Created(u32),
    Destroyed(u32),
    SetClearColor(Vec4),
    BindDraw(u32),
    Clear(u32, ClearFlags),
    Unbind(BindTarget),
}

/// Mock device that tracks framebuffers without a GPU
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockDevice {
    /// Every call, in order
    pub events: Vec<DeviceEvent>,
    /// Framebuffers of these resolved sizes fail to build
    pub failing_sizes: Vec<(u32, u32)>,
    next_id: u32,
    /// Live framebuffers by heap address
    live: FxHashMap<usize, u32>,
}

#[cfg(test)]
fn address(framebuffer: &dyn Framebuffer) -> usize {
    framebuffer as *const dyn Framebuffer as *const () as usize
}

#[cfg(test)]
impl MockDevice {
    /// Create a new mock device
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every framebuffer resolving to `width` x `height` fail to build
    pub fn fail_on_size(mut self, width: u32, height: u32) -> Self {
        self.failing_sizes.push((width, height));
        self
    }

    /// Build a standalone framebuffer, as an external owner would
    pub fn make_framebuffer(&mut self, width: u32, height: u32) -> Box<dyn Framebuffer> {
        self.create_framebuffer(&FramebufferDefinition::fixed(width, height), &SizeContext::new(width, height))
            .unwrap()
    }

    /// Id of a live framebuffer created by this device
    pub fn id_of(&self, framebuffer: &dyn Framebuffer) -> Option<u32> {
        self.live.get(&address(framebuffer)).copied()
    }

    /// Number of framebuffers created and not yet destroyed
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Ids in creation order
    pub fn created(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::Created(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids in destruction order
    pub fn destroyed(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::Destroyed(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids cleared, in order
    pub fn cleared(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DeviceEvent::Clear(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Last recorded event
    pub fn last_event(&self) -> Option<&DeviceEvent> {
        self.events.last()
    }

    /// Forget recorded events (live tracking is kept)
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
impl FramebufferDevice for MockDevice {
    fn create_framebuffer(
        &mut self,
        definition: &FramebufferDefinition,
        context: &SizeContext,
    ) -> Result<Box<dyn Framebuffer>> {
        let (width, height) = definition.resolve_size(context)?;
        if self.failing_sizes.contains(&(width, height)) {
            return Err(Error::BackendError(format!(
                "mock: refusing to build {}x{} framebuffer", width, height
            )));
        }

        self.next_id += 1;
        let id = self.next_id;
        let framebuffer: Box<dyn Framebuffer> = Box::new(MockFramebuffer {
            id,
            width,
            height,
            color_attachments: definition.color_attachments.len(),
            depth: definition.depth,
        });
        self.live.insert(address(framebuffer.as_ref()), id);
        self.events.push(DeviceEvent::Created(id));
        Ok(framebuffer)
    }

    fn destroy_framebuffer(&mut self, framebuffer: Box<dyn Framebuffer>) {
        let id = self
            .live
            .remove(&address(framebuffer.as_ref()))
            .expect("mock: destroying a framebuffer that is not live");
        self.events.push(DeviceEvent::Destroyed(id));
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.events.push(DeviceEvent::SetClearColor(color));
    }

    fn bind_draw(&mut self, framebuffer: &dyn Framebuffer, _set_viewport: bool) {
        let id = self.id_of(framebuffer).expect("mock: binding a dead framebuffer");
        self.events.push(DeviceEvent::BindDraw(id));
    }

    fn clear(&mut self, framebuffer: &dyn Framebuffer, flags: ClearFlags) {
        let id = self.id_of(framebuffer).expect("mock: clearing a dead framebuffer");
        self.events.push(DeviceEvent::Clear(id, flags));
    }

    fn unbind(&mut self, target: BindTarget) {
        self.events.push(DeviceEvent::Unbind(target));
    }
}
