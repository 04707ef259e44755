use crate::{BindLocation, DefineList, ProgramReflection, Result, SamplerDesc};

/// An image that can be sampled by the blur, possibly with several array slices.
pub trait SourceImage {
    /// Number of layers. A plain 2D image has one.
    fn array_size(&self) -> u32;
}

/// A surface the blur renders into.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// The GPU services a blur pass is built from.
///
/// Handles are expected to be cheap to clone, the pass keeps its own copy.
pub trait Backend {
    type Program: ProgramReflection;
    type Vars: ShaderVars<Self>;
    type Sampler;
    type Buffer;
    type Texture: SourceImage;
    type Target: RenderSurface;

    /// Compiles the shader at `path` with the given defines.
    fn compile_program(&self, path: &str, defines: &DefineList) -> Result<Self::Program>;

    /// Creates an empty parameter set matching the layout of `program`.
    fn create_vars(&self, program: &Self::Program) -> Result<Self::Vars>;

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<Self::Sampler>;

    /// Creates a read only typed buffer holding `data`.
    fn create_typed_buffer(&self, label: &str, data: &[f32]) -> Result<Self::Buffer>;
}

/// The parameter set a program reads its inputs from.
pub trait ShaderVars<B: Backend + ?Sized> {
    fn set_sampler(&mut self, location: BindLocation, sampler: &B::Sampler);

    fn set_texture(&mut self, location: BindLocation, texture: &B::Texture);

    /// Binds `buffer` under the named buffer slot, taking ownership of it.
    fn set_typed_buffer(&mut self, name: &str, buffer: B::Buffer) -> Result<()>;
}
