//! Framebuffer module
//!
//! Declarative definitions, their on-disk loader, and the registry that
//! turns them into live framebuffers.

mod definition;
mod definition_store;
mod registry;
mod surface;
pub mod names;

pub use definition::{
    AttachmentDefinition, AttachmentFormat, Dimension, FramebufferDefinition, SizeContext,
    QUERY_SCREEN_HEIGHT, QUERY_SCREEN_WIDTH,
};
pub use definition_store::{DefinitionSet, DefinitionStore, FRAMEBUFFER_DIRECTORY};
pub use registry::{
    FramebufferRegistry, FramebufferView, RegistryConfig, StaticFramebuffer, StaticKind,
};
pub use surface::SurfaceSize;
