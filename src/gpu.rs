//! `wgpu` implementations of the blur pass services.

mod builder;
pub use builder::GpuBuilder;

mod buffer;
pub use buffer::{Buffer, BufferBuilder};

mod context;
pub use context::{WgpuRenderContext, WgpuVars};

mod program;
pub use program::{compose_shader, parse_shader, reflect_bindings, shader_source, WgpuProgram};

use futures::executor::block_on;
use std::{ops::Deref, rc::Rc};

use crate::{
    AddressMode, Backend, BlurError, DefineList, FilterMode, RenderSurface, Result, SamplerDesc,
    SourceImage,
};

/// The device and queue a blur pass renders with.
pub struct GpuCtx {
    /// `None` when the device was handed over by an existing renderer.
    pub adapter: Option<wgpu::Adapter>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}
impl GpuCtx {
    /// Converts the context into a `Gpu` which can be passed around by clone
    #[must_use]
    pub fn into_handle(self) -> Gpu {
        Gpu {
            context: Rc::new(self),
        }
    }
}

/// A struct that wraps over `Rc<GpuCtx>` which can be passed around by clone.
/// Any struct holding a `Gpu` is guaranteed a valid device for as long as it lives.
#[derive(Clone)]
pub struct Gpu {
    context: Rc<GpuCtx>,
}
impl Gpu {
    /// An alias for `GpuBuilder::new()`
    #[must_use]
    pub fn builder<'a>() -> GpuBuilder<'a> {
        GpuBuilder::new()
    }

    /// Wraps a device created elsewhere.
    #[must_use]
    pub fn from_device(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        GpuCtx {
            adapter: None,
            device,
            queue,
        }
        .into_handle()
    }

    #[must_use]
    pub fn new_buffer<'a>(&self, label: &'a str) -> BufferBuilder<'a> {
        BufferBuilder::new(self.clone(), label)
    }

    /// A rendering context that records into `encoder`.
    pub fn render_context<'e>(&self, encoder: &'e mut wgpu::CommandEncoder) -> WgpuRenderContext<'e> {
        WgpuRenderContext::new(self.clone(), encoder)
    }

    /// Runs `f` inside a validation error scope and reports a captured error through `wrap`.
    pub(crate) fn checked<T>(&self, wrap: fn(String) -> BlurError, f: impl FnOnce() -> T) -> Result<T> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        self.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let value = f();
        let out_of_memory = block_on(self.device.pop_error_scope());
        let validation = block_on(self.device.pop_error_scope());
        match out_of_memory.or(validation) {
            Some(err) => Err(wrap(err.to_string())),
            None => Ok(value),
        }
    }
}
impl Deref for Gpu {
    type Target = GpuCtx;
    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

const fn filter_mode(mode: FilterMode) -> wgpu::FilterMode {
    match mode {
        FilterMode::Point => wgpu::FilterMode::Nearest,
        FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

const fn address_mode(mode: AddressMode) -> wgpu::AddressMode {
    match mode {
        AddressMode::Wrap => wgpu::AddressMode::Repeat,
        AddressMode::Clamp => wgpu::AddressMode::ClampToEdge,
    }
}

impl Backend for Gpu {
    type Program = WgpuProgram;
    type Vars = WgpuVars;
    type Sampler = Rc<wgpu::Sampler>;
    type Buffer = Buffer;
    type Texture = wgpu::Texture;
    type Target = wgpu::Texture;

    fn compile_program(&self, path: &str, defines: &DefineList) -> Result<WgpuProgram> {
        let template = shader_source(path)
            .ok_or_else(|| BlurError::ProgramBuild(format!("unknown shader `{path}`")))?;
        let source = compose_shader(template, defines);
        let module = parse_shader(&source)?;
        let bindings = reflect_bindings(&module);

        let shader = self.checked(BlurError::ProgramBuild, || {
            self.device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(path),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        })?;

        Ok(WgpuProgram::new(path, shader, bindings))
    }

    fn create_vars(&self, program: &WgpuProgram) -> Result<WgpuVars> {
        Ok(WgpuVars::new(program))
    }

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<Self::Sampler> {
        let sampler = self.checked(BlurError::ResourceCreation, || {
            self.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("Blur sampler"),
                address_mode_u: address_mode(desc.address_u),
                address_mode_v: address_mode(desc.address_v),
                address_mode_w: address_mode(desc.address_w),
                mag_filter: filter_mode(desc.mag_filter),
                min_filter: filter_mode(desc.min_filter),
                mipmap_filter: filter_mode(desc.mip_filter),
                ..Default::default()
            })
        })?;
        Ok(Rc::new(sampler))
    }

    fn create_typed_buffer(&self, label: &str, data: &[f32]) -> Result<Buffer> {
        if data.is_empty() {
            return Err(BlurError::ResourceCreation(format!(
                "typed buffer `{label}` has no elements"
            )));
        }
        self.checked(BlurError::ResourceCreation, || {
            self.new_buffer(label)
                .as_storage_buffer()
                .with_data(data)
                .build()
        })
    }
}

impl SourceImage for wgpu::Texture {
    fn array_size(&self) -> u32 {
        self.depth_or_array_layers()
    }
}

impl RenderSurface for wgpu::Texture {
    fn width(&self) -> u32 {
        wgpu::Texture::width(self)
    }

    fn height(&self) -> u32 {
        wgpu::Texture::height(self)
    }
}
