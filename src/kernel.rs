//! Gaussian kernel weights.
//!
//! The kernel is a square, row-major grid of `width * width` weights that sums to one, so
//! convolving a constant image leaves it unchanged.

use std::f32::consts::PI;

use crate::{BlurError, Result};

/// A normalized 2D blur kernel.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelWeights {
    width: u32,
    weights: Vec<f32>,
}

/// Unnormalized isotropic 2D Gaussian evaluated at squared distance `d2`.
fn coefficient(sigma: f32, d2: f32) -> f32 {
    let sigma_squared = sigma * sigma;
    let e = (-d2 / (2.0 * sigma_squared)).exp();
    e / (2.0 * PI * sigma_squared)
}

impl KernelWeights {
    /// Builds the kernel for an odd `width` and a positive spatial `sigma`.
    ///
    /// # Errors
    /// [`BlurError::InvalidConfig`] when `width` is zero, even or too large to index, or when
    /// `sigma` is not a positive finite number.
    pub fn gaussian(width: u32, sigma: f32) -> Result<Self> {
        if width == 0 || width % 2 == 0 {
            return Err(BlurError::InvalidConfig(format!(
                "kernel width must be odd and positive, got {width}"
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(BlurError::InvalidConfig(format!(
                "spatial sigma must be positive and finite, got {sigma}"
            )));
        }

        let cells = width.checked_mul(width).ok_or_else(|| {
            BlurError::InvalidConfig(format!("kernel width {width} is too large"))
        })?;

        let center = (width / 2) as f32;
        let mut weights = Vec::with_capacity(cells as usize);
        let mut sum = 0.0;

        // Symmetric in both directions, but the full grid is cheap at these sizes.
        for i in 0..width {
            for j in 0..width {
                let dx = i as f32 - center;
                let dy = j as f32 - center;
                let w = coefficient(sigma, dx * dx + dy * dy);
                sum += w;
                weights.push(w);
            }
        }

        // A vanishing sigma underflows or overflows the coefficients.
        if !(sum.is_finite() && sum > 0.0) {
            return Err(BlurError::InvalidConfig(format!(
                "spatial sigma {sigma} produces an empty kernel"
            )));
        }

        for w in &mut weights {
            *w /= sum;
        }

        Ok(Self { width, weights })
    }

    /// Number of samples along each axis.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Index of the center cell along each axis.
    pub fn center(&self) -> u32 {
        self.width / 2
    }

    /// Weight at `row`, `col`, or `None` outside the grid.
    pub fn get(&self, row: u32, col: u32) -> Option<f32> {
        if row >= self.width || col >= self.width {
            return None;
        }
        self.weights.get((row * self.width + col) as usize).copied()
    }

    /// Row-major weights, `width * width` elements.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }

    /// Iterates the grid one row at a time.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.weights.chunks(self.width as usize)
    }

    /// Sum of all weights, one up to rounding.
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Takes the row-major weights.
    pub fn into_vec(self) -> Vec<f32> {
        self.weights
    }
}

/// Shorthand for [`KernelWeights::gaussian`].
///
/// # Errors
/// See [`KernelWeights::gaussian`].
pub fn compute_weights(width: u32, spatial_sigma: f32) -> Result<KernelWeights> {
    KernelWeights::gaussian(width, spatial_sigma)
}
