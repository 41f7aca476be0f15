/// Central framebuffer registry.
///
/// Owns every live framebuffer by name. Framebuffers come in two classes:
///
/// - **Dynamic**: built from the current definition set, torn down and
///   rebuilt on every resize or definition reload.
/// - **Static**: exempt from the automatic sweep. Either handed over fully
///   built by an external owner, or a dynamic framebuffer that was marked
///   static after the fact.
///
/// The registry is the only owner of the framebuffers it holds. Each one is
/// released exactly once, by moving it into
/// [`FramebufferDevice::destroy_framebuffer`] at the moment its map entry is
/// removed. Static names always win over a definition with the same name.

use std::sync::Arc;
use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::device::{BindTarget, DrawScope, Framebuffer, FramebufferDevice};
use crate::error::{Error, Result};
use crate::resource::ResourceName;
use super::definition::{FramebufferDefinition, SizeContext};
use super::definition_store::DefinitionSet;
use super::surface::SurfaceSize;

const LOG_SOURCE: &str = "galaxy3d::FramebufferRegistry";

type FramebufferMap = FxHashMap<ResourceName, Box<dyn Framebuffer>>;

// ===== CONFIG =====

/// Registry configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryConfig {
    /// Color used when initializing and clearing framebuffers
    pub clear_color: Vec4,
    /// Whether binding a framebuffer also resets the viewport to its size
    pub set_viewport_on_bind: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec4::ZERO,
            set_viewport_on_bind: false,
        }
    }
}

// ===== STATIC FRAMEBUFFERS =====

/// How a name becomes static
pub enum StaticFramebuffer {
    /// A framebuffer built outside the registry; ownership moves to the registry
    Owned(Box<dyn Framebuffer>),
    /// Exempt the framebuffer already registered under the name from rebuilds
    Exempt,
}

/// Origin of a static entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticKind {
    /// Handed over through [`StaticFramebuffer::Owned`]
    ExternallyOwned,
    /// Built by the registry, then exempted through [`StaticFramebuffer::Exempt`]
    Exempted,
}

// ===== READ-ONLY VIEW =====

/// Read-only view over every live framebuffer
#[derive(Clone, Copy)]
pub struct FramebufferView<'a> {
    framebuffers: &'a FramebufferMap,
}

impl<'a> FramebufferView<'a> {
    /// Get a framebuffer by name
    pub fn get(&self, name: &ResourceName) -> Option<&'a dyn Framebuffer> {
        self.framebuffers.get(name).map(|fb| fb.as_ref())
    }

    /// Whether a framebuffer is registered under `name`
    pub fn contains(&self, name: &ResourceName) -> bool {
        self.framebuffers.contains_key(name)
    }

    /// Number of live framebuffers
    pub fn len(&self) -> usize {
        self.framebuffers.len()
    }

    /// Whether no framebuffer is live
    pub fn is_empty(&self) -> bool {
        self.framebuffers.is_empty()
    }

    /// Iterate over `(name, framebuffer)` pairs in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&'a ResourceName, &'a dyn Framebuffer)> + 'a {
        self.framebuffers.iter().map(|(name, fb)| (name, fb.as_ref()))
    }

    /// All live names
    pub fn names(&self) -> Vec<&'a ResourceName> {
        self.framebuffers.keys().collect()
    }
}

// ===== REGISTRY =====

/// Framebuffer registry (owned by the render loop)
///
/// All operations run on the rendering thread and take the device
/// explicitly. Batch operations ([`rebuild`](Self::rebuild),
/// [`clear_frame`](Self::clear_frame), [`add_static`](Self::add_static))
/// always leave the device with no framebuffer bound.
pub struct FramebufferRegistry {
    config: RegistryConfig,
    definitions: Arc<DefinitionSet>,
    statics: FxHashMap<ResourceName, StaticKind>,
    framebuffers: FramebufferMap,
}

impl Default for FramebufferRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FramebufferRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            definitions: Arc::new(DefinitionSet::default()),
            statics: FxHashMap::default(),
            framebuffers: FramebufferMap::default(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ===== LIFECYCLE =====

    /// Release every dynamic framebuffer and rebuild them at the given size
    ///
    /// A definition that fails to build is logged and left without a live
    /// framebuffer; the remaining definitions are still built. Definitions
    /// whose name is static are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSize` if either dimension is zero. Nothing is
    /// released in that case.
    pub fn rebuild(&mut self, device: &mut dyn FramebufferDevice, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidSize { width, height });
        }

        self.release_all(device);

        let definitions = Arc::clone(&self.definitions);
        let context = SizeContext::new(width, height);
        let mut scope = DrawScope::new(device, BindTarget::All, self.config.set_viewport_on_bind);
        scope.device().set_clear_color(self.config.clear_color);

        for (name, definition) in definitions.iter() {
            if self.statics.contains_key(name) {
                crate::engine_debug!(LOG_SOURCE,
                    "Keeping static framebuffer {} instead of its definition", name);
                continue;
            }

            match scope.device().create_framebuffer(definition, &context) {
                Ok(framebuffer) => {
                    scope.bind_and_clear(framebuffer.as_ref());
                    Self::install(&mut self.framebuffers, scope.device(), name.clone(), framebuffer);
                }
                Err(err) => {
                    crate::engine_error!(LOG_SOURCE,
                        "Failed to initialize framebuffer: {}: {}", name, err);
                }
            }
        }

        Ok(())
    }

    /// Rebuild at the current size of `surface`
    pub fn rebuild_for_surface(
        &mut self,
        device: &mut dyn FramebufferDevice,
        surface: &dyn SurfaceSize,
    ) -> Result<()> {
        let (width, height) = surface.surface_size();
        self.rebuild(device, width, height)
    }

    /// Replace the definition set and rebuild
    ///
    /// Entry point for the definition reload mechanism. The new set replaces
    /// the old one as a whole before any framebuffer is built.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidSize` if either dimension is zero. The new set
    /// is still stored and every dynamic framebuffer built from the old set
    /// is released; the next successful [`rebuild`](Self::rebuild) builds
    /// the new set.
    pub fn on_definitions_reloaded(
        &mut self,
        device: &mut dyn FramebufferDevice,
        definitions: impl Into<Arc<DefinitionSet>>,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.definitions = definitions.into();
        match self.rebuild(device, width, height) {
            Ok(()) => {
                crate::engine_info!(LOG_SOURCE, "Loaded {} framebuffers", self.definitions.len());
                Ok(())
            }
            Err(err) => {
                let released = self.release_all(device);
                crate::engine_warn!(LOG_SOURCE,
                    "Stored {} framebuffer definitions without building them ({}); released {} stale framebuffers",
                    self.definitions.len(), err, released);
                Err(err)
            }
        }
    }

    /// Release every dynamic framebuffer
    ///
    /// Static framebuffers are left in place. Returns the number released.
    pub fn release_all(&mut self, device: &mut dyn FramebufferDevice) -> usize {
        let statics = &self.statics;
        let (kept, released): (FramebufferMap, FramebufferMap) = std::mem::take(&mut self.framebuffers)
            .into_iter()
            .partition(|(name, _)| statics.contains_key(name));
        self.framebuffers = kept;

        let count = released.len();
        for (_, framebuffer) in released {
            device.destroy_framebuffer(framebuffer);
        }
        count
    }

    /// Release every framebuffer, static ones included
    ///
    /// After this the registry holds no GPU resources. Definitions are kept,
    /// so a later [`rebuild`](Self::rebuild) brings the dynamic set back.
    /// Returns the number released.
    pub fn dispose_all(&mut self, device: &mut dyn FramebufferDevice) -> usize {
        self.statics.clear();
        let count = self.framebuffers.len();
        for (_, framebuffer) in self.framebuffers.drain() {
            device.destroy_framebuffer(framebuffer);
        }
        count
    }

    // ===== STATIC FRAMEBUFFERS =====

    /// Register a static framebuffer
    ///
    /// With [`StaticFramebuffer::Owned`] the framebuffer is bound and cleared
    /// once, then stored under `name`. A framebuffer already stored under
    /// that name is released and a warning is logged.
    ///
    /// With [`StaticFramebuffer::Exempt`] the framebuffer currently stored
    /// under `name` stops being rebuilt; the registry still releases it on
    /// [`remove_static`](Self::remove_static) or [`dispose_all`](Self::dispose_all).
    ///
    /// # Errors
    ///
    /// Returns `Error::FramebufferNotFound` for `Exempt` when no framebuffer
    /// is stored under `name`.
    pub fn add_static(
        &mut self,
        device: &mut dyn FramebufferDevice,
        name: ResourceName,
        framebuffer: StaticFramebuffer,
    ) -> Result<()> {
        match framebuffer {
            StaticFramebuffer::Owned(framebuffer) => {
                let mut scope = DrawScope::new(device, BindTarget::Draw, self.config.set_viewport_on_bind);
                scope.device().set_clear_color(self.config.clear_color);
                scope.bind_and_clear(framebuffer.as_ref());

                if Self::install(&mut self.framebuffers, scope.device(), name.clone(), framebuffer) {
                    crate::engine_warn!(LOG_SOURCE, "Static framebuffer {} was overwritten", name);
                }
                self.statics.insert(name, StaticKind::ExternallyOwned);
            }
            StaticFramebuffer::Exempt => {
                if !self.framebuffers.contains_key(&name) {
                    return Err(Error::FramebufferNotFound(name.to_string()));
                }
                self.statics.entry(name).or_insert(StaticKind::Exempted);
            }
        }
        Ok(())
    }

    /// Remove a static framebuffer and release it
    ///
    /// Does nothing for names that are not static. Returns whether a
    /// static entry was removed.
    pub fn remove_static(&mut self, device: &mut dyn FramebufferDevice, name: &ResourceName) -> bool {
        if self.statics.remove(name).is_none() {
            return false;
        }

        if let Some(framebuffer) = self.framebuffers.remove(name) {
            device.destroy_framebuffer(framebuffer);
        }
        true
    }

    /// Whether `name` is static
    pub fn is_static(&self, name: &ResourceName) -> bool {
        self.statics.contains_key(name)
    }

    /// Origin of the static entry under `name`
    pub fn static_kind(&self, name: &ResourceName) -> Option<StaticKind> {
        self.statics.get(name).copied()
    }

    /// Number of static framebuffers
    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    // ===== PER FRAME =====

    /// Clear every dynamic framebuffer
    ///
    /// Called once per frame before rendering. Static framebuffers are left
    /// to their owners.
    pub fn clear_frame(&self, device: &mut dyn FramebufferDevice) {
        let mut scope = DrawScope::new(device, BindTarget::Draw, self.config.set_viewport_on_bind);
        scope.device().set_clear_color(self.config.clear_color);

        for (name, framebuffer) in &self.framebuffers {
            if !self.statics.contains_key(name) {
                scope.bind_and_clear(framebuffer.as_ref());
            }
        }
    }

    // ===== LOOKUP =====

    /// Get a framebuffer by name
    pub fn framebuffer(&self, name: &ResourceName) -> Option<&dyn Framebuffer> {
        self.framebuffers.get(name).map(|fb| fb.as_ref())
    }

    /// Read-only view over every live framebuffer
    pub fn framebuffers(&self) -> FramebufferView<'_> {
        FramebufferView { framebuffers: &self.framebuffers }
    }

    /// Number of live framebuffers
    pub fn framebuffer_count(&self) -> usize {
        self.framebuffers.len()
    }

    /// Current definition snapshot
    pub fn definitions(&self) -> &Arc<DefinitionSet> {
        &self.definitions
    }

    /// Get a definition by name
    pub fn definition(&self, name: &ResourceName) -> Option<&FramebufferDefinition> {
        self.definitions.get(name)
    }

    /// Store `framebuffer` under `name`, releasing any displaced one first
    ///
    /// Returns whether a framebuffer was displaced.
    fn install(
        framebuffers: &mut FramebufferMap,
        device: &mut dyn FramebufferDevice,
        name: ResourceName,
        framebuffer: Box<dyn Framebuffer>,
    ) -> bool {
        let displaced = match framebuffers.remove(&name) {
            Some(previous) => {
                device.destroy_framebuffer(previous);
                true
            }
            None => false,
        };
        framebuffers.insert(name, framebuffer);
        displaced
    }
}

impl Drop for FramebufferRegistry {
    fn drop(&mut self) {
        if !self.framebuffers.is_empty() {
            crate::engine_warn!(LOG_SOURCE,
                "Dropped with {} live framebuffers; call dispose_all() before dropping",
                self.framebuffers.len());
        }
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
