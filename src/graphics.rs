/// Error types for core
pub mod error;
pub use error::*;

/// Service traits a blur pass is built against
pub mod backend;
pub use backend::*;

pub mod program;
pub use program::*;

pub mod sampler;
pub use sampler::*;

/// Viewports and scoped render state
pub mod state;
pub use state::*;
