use tracing::debug;

use crate::{
    Backend, BindLocation, BlurConfig, BlurError, KernelWeights, ProgramReflection, Result,
    SamplerDesc, ShaderVars,
};

/// Shader template the blur program is compiled from.
pub const SHADER_PATH: &str = "Effects/BilateralBlur.wgsl";
pub const SAMPLER_BINDING: &str = "gSampler";
pub const SOURCE_BINDING: &str = "gSrcTex";
pub const WEIGHTS_BINDING: &str = "weights";

/// Bind locations resolved once per program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BindLocations {
    pub sampler: BindLocation,
    pub src_texture: BindLocation,
}

/// Everything built from one configuration snapshot.
///
/// Replaced as a whole on rebuild. Bind locations never outlive the program they came from.
pub(crate) struct CompiledPass<B: Backend> {
    pub config: BlurConfig,
    pub program: B::Program,
    pub vars: B::Vars,
    pub sampler: B::Sampler,
    pub bind_locations: BindLocations,
    pub kernel: KernelWeights,
}

fn resolve<P: ProgramReflection>(program: &P, name: &str) -> Result<BindLocation> {
    program
        .resource_binding(name)
        .ok_or_else(|| BlurError::ProgramBuild(format!("program has no binding named `{name}`")))
}

impl<B: Backend> CompiledPass<B> {
    pub fn build(backend: &B, config: BlurConfig) -> Result<Self> {
        // The shader divides by the squared range sigma.
        let range_sigma = config.range_sigma();
        let range_sigma_squared = config.range_sigma_squared();
        if !(range_sigma > 0.0 && range_sigma_squared.is_finite() && range_sigma_squared > 0.0) {
            return Err(BlurError::InvalidConfig(format!(
                "range sigma must be positive and finite, got {range_sigma}"
            )));
        }

        let program = backend.compile_program(SHADER_PATH, &config.defines())?;
        let mut vars = backend.create_vars(&program)?;

        let bind_locations = BindLocations {
            sampler: resolve(&program, SAMPLER_BINDING)?,
            src_texture: resolve(&program, SOURCE_BINDING)?,
        };

        let kernel = KernelWeights::gaussian(config.kernel_width(), config.spatial_sigma())?;
        let buffer = backend.create_typed_buffer("Blur kernel weights", kernel.as_slice())?;
        vars.set_typed_buffer(WEIGHTS_BINDING, buffer)?;

        let sampler = backend.create_sampler(&SamplerDesc::blur())?;

        debug!(
            kernel_width = config.kernel_width(),
            spatial_sigma = config.spatial_sigma(),
            range_sigma = config.range_sigma(),
            ?bind_locations,
            "built blur program"
        );

        Ok(Self {
            config,
            program,
            vars,
            sampler,
            bind_locations,
            kernel,
        })
    }
}
