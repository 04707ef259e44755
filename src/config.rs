use crate::DefineList;

/// Define holding the kernel width, an odd integer.
pub const KERNEL_WIDTH_DEFINE: &str = "_KERNEL_WIDTH";
/// Define holding the squared range sigma.
pub const RANGE_SIGMA_SQUARED_DEFINE: &str = "_RANGE_SIGMA_SQUARED";

/// Blur settings. The kernel width is always odd.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurConfig {
    kernel_width: u32,
    spatial_sigma: f32,
    range_sigma: f32,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self::new(5, 2.5, 0.2)
    }
}

impl BlurConfig {
    /// `kernel_width` is rounded up to the next odd number.
    pub const fn new(kernel_width: u32, spatial_sigma: f32, range_sigma: f32) -> Self {
        Self {
            kernel_width: kernel_width | 1,
            spatial_sigma,
            range_sigma,
        }
    }

    /// Number of texels sampled along each axis.
    /// Widths much larger than twice the spatial sigma add samples with negligible weight.
    #[must_use]
    pub const fn with_kernel_width(mut self, kernel_width: u32) -> Self {
        self.kernel_width = kernel_width | 1;
        self
    }

    /// Higher values result in a blurrier image.
    #[must_use]
    pub const fn with_spatial_sigma(mut self, sigma: f32) -> Self {
        self.spatial_sigma = sigma;
        self
    }

    /// Higher values result in a more Gaussian-like blur.
    #[must_use]
    pub const fn with_range_sigma(mut self, sigma: f32) -> Self {
        self.range_sigma = sigma;
        self
    }

    pub const fn kernel_width(&self) -> u32 {
        self.kernel_width
    }

    pub const fn spatial_sigma(&self) -> f32 {
        self.spatial_sigma
    }

    pub const fn range_sigma(&self) -> f32 {
        self.range_sigma
    }

    pub fn range_sigma_squared(&self) -> f32 {
        self.range_sigma * self.range_sigma
    }

    /// Compile-time constants for the blur shader.
    pub fn defines(&self) -> DefineList {
        let mut defines = DefineList::new();
        defines
            .add(KERNEL_WIDTH_DEFINE, self.kernel_width)
            // Debug keeps a decimal point on whole numbers so the value stays a float literal.
            .add(RANGE_SIGMA_SQUARED_DEFINE, format!("{:?}", self.range_sigma_squared()));
        defines
    }
}
