use thiserror::Error;

/// Errors surfaced by kernel construction and by the blur pass.
///
/// None of these are recovered from inside the pass. A failed rebuild leaves the pass dirty
/// so the next `execute` retries from scratch.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlurError {
    /// Kernel parameters that cannot produce a finite, normalized kernel.
    #[error("invalid blur configuration: {0}")]
    InvalidConfig(String),
    /// Shader compilation, validation or binding reflection failed.
    #[error("failed to build blur program: {0}")]
    ProgramBuild(String),
    /// The GPU service could not allocate a sampler, buffer or parameter set.
    #[error("failed to create GPU resource: {0}")]
    ResourceCreation(String),
    /// The draw could not be issued with the current rendering state.
    #[error("failed to render blur pass: {0}")]
    Render(String),
}

pub type Result<T, E = BlurError> = std::result::Result<T, E>;

/// Errors raised while bringing up a headless device.
#[cfg(feature = "wgpu")]
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GpuError {
    #[error("no suitable adapter: {0}")]
    AdapterNone(#[from] wgpu::RequestAdapterError),
    #[error("device request failed: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Generic error type for any error.
/// Recommended to use with terminal errors only, which are expected to be displayed and not handled.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
