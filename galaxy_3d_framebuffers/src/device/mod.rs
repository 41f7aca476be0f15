/// Device module - framebuffer handle and backend device traits

pub mod device;

pub use device::*;

// Mock device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
