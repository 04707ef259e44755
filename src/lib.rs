#![allow(clippy::module_name_repetitions)]

mod graphics;
pub use graphics::*;

pub mod kernel;
pub use kernel::{compute_weights, KernelWeights};

mod config;
pub use config::*;

pub mod blur;
pub use blur::{BlurPass, PassState};

/// Export wgpu crate
#[cfg(feature = "wgpu")]
pub use wgpu;

#[cfg(feature = "wgpu")]
pub mod gpu;
#[cfg(feature = "wgpu")]
pub use crate::gpu::*;

#[cfg(feature = "egui")]
mod egui;
