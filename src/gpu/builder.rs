use futures::executor::block_on;

use crate::{Gpu, GpuCtx, GpuError};

#[derive(Clone)]
/// Builder for a headless `Gpu`.
/// By default this is initialized with sensible values for our use case.
pub struct GpuBuilder<'a> {
    /// The backends that wgpu should use.
    /// By default, this is only the PRIMARY backends, which have first-class support.
    /// You can alternatively specify individual backends such as `VULKAN` or `DX12`.
    backends: wgpu::Backends,
    /// The power preference for the adapter.
    /// This defaults to `HighPerformance` but can be set to use `LowPower`.
    power_preference: wgpu::PowerPreference,
    /// The device limits.
    limits: wgpu::Limits,
    /// The features that the device must support.
    features: wgpu::Features,
    /// The features that the device can optionally support.
    optional_features: wgpu::Features,
    /// Use a software adapter when no hardware one is available.
    force_fallback_adapter: bool,
    /// The label for this context.
    label: Option<&'a str>,
}
impl Default for GpuBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}
impl GpuBuilder<'_> {
    /// Create a `GpuBuilder` with sensible defaults.
    pub fn new() -> Self {
        Self {
            backends: wgpu::Backends::PRIMARY,
            power_preference: wgpu::PowerPreference::HighPerformance,
            limits: wgpu::Limits::default(),
            label: None,
            features: wgpu::Features::default(),
            optional_features: wgpu::Features::empty(),
            force_fallback_adapter: false,
        }
    }
}
impl<'a> GpuBuilder<'a> {
    /// Sets the backends that wgpu should use.
    pub fn with_backends(mut self, backends: wgpu::Backends) -> Self {
        self.backends = backends;
        self
    }

    /// Sets the power preference for the adapter.
    pub fn with_power_preference(mut self, power_preference: wgpu::PowerPreference) -> Self {
        self.power_preference = power_preference;
        self
    }

    /// Sets the limits for the device.
    pub fn with_limits(mut self, limits: wgpu::Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the label for the device.
    /// The argument must outlive the builder.
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Sets the features that the device must support.
    pub fn with_features(mut self, features: wgpu::Features) -> Self {
        self.features = features;
        self
    }

    /// Sets the features that the device can optionally support.
    pub fn with_optional_features(mut self, features: wgpu::Features) -> Self {
        self.optional_features = features;
        self
    }

    pub fn with_fallback_adapter(mut self) -> Self {
        self.force_fallback_adapter = true;
        self
    }

    /// Blocking shorthand for `build_impl()`.
    /// # Errors
    /// Errors when no adapter matches or the device request is rejected.
    pub fn build_headless(self) -> Result<Gpu, GpuError> {
        block_on(self.build_impl())
    }

    /// Build the `Gpu` from the builder.
    /// # Errors
    /// Errors when a connection to the GPU could not be established.
    pub async fn build_impl(self) -> Result<Gpu, GpuError> {
        // Create the wgpu instance.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        });

        // Initialize the adapter (physical device).
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.power_preference,
                compatible_surface: None,
                force_fallback_adapter: self.force_fallback_adapter,
            })
            .await?;

        // Create the `device` (and get the handle for the command queue `queue`)
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: self.label,
                required_features: self.features(&adapter),
                required_limits: self.limits.clone(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: Default::default(),
            })
            .await?;

        let gpu = GpuCtx {
            adapter: Some(adapter),
            device,
            queue,
        };

        Ok(gpu.into_handle())
    }

    fn features(&self, adapter: &wgpu::Adapter) -> wgpu::Features {
        self.features | (self.optional_features & adapter.features())
    }
}
