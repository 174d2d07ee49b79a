//! Display backends

pub mod memory;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub use macos::CoreGraphicsBackend as NativeBackend;

#[cfg(not(target_os = "macos"))]
mod unsupported;

#[cfg(not(target_os = "macos"))]
pub use unsupported::UnsupportedBackend as NativeBackend;

pub use memory::{AppliedChange, MemoryBackend};

/// Returns the backend for the platform this binary was built for
pub fn native() -> NativeBackend {
    NativeBackend::default()
}
