/*!
# Galaxy 3D Framebuffers

Named framebuffer registry for the Galaxy 3D rendering engine.

The registry owns every off-screen render target by name, rebuilds the
screen-dependent ones when the surface is resized or when definitions are
reloaded, clears them once per frame, and keeps externally supplied
"static" framebuffers alive across rebuilds.

## Architecture

- **FramebufferRegistry**: Owner of all live framebuffers
- **FramebufferDevice**: Backend trait that builds, binds, clears and destroys framebuffers
- **Framebuffer**: Opaque framebuffer handle trait
- **FramebufferDefinition**: Declarative size and attachment description
- **DefinitionStore**: Loader for JSON definitions on disk
- **ResourceName**: Namespaced `namespace:path` identifier

Backend implementations provide concrete types that implement the device traits.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod device;
pub mod resource;
pub mod framebuffer;

#[cfg(test)]
mod test_logger;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Registry
    pub use crate::framebuffer::FramebufferRegistry;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Device sub-module with the backend traits
    pub mod device {
        pub use crate::device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Framebuffer sub-module
    pub mod framebuffer {
        pub use crate::framebuffer::*;
    }
}

// Re-export math library at crate root
pub use glam;
