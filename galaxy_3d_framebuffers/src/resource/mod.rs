//! Resource naming module
//!
//! Provides the namespaced identifier used to address framebuffer
//! definitions and live framebuffers.

mod resource_name;

pub use resource_name::{ResourceName, DEFAULT_NAMESPACE, TEMP_NAMESPACE};
