//! The blur pass: lazily rebuilt program state plus the execution protocol.

mod compiled;
pub use compiled::{SAMPLER_BINDING, SHADER_PATH, SOURCE_BINDING, WEIGHTS_BINDING};

use compiled::CompiledPass;
use tracing::{debug_span, trace, warn};

use crate::{
    Backend, BlurConfig, KernelWeights, RenderContext, RenderSurface, Result, Scoped, ShaderVars,
    SourceImage, Viewport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassState {
    /// The compiled program matches the current configuration.
    Clean,
    /// The next `execute` rebuilds the program first.
    Dirty,
}

/// A full-screen blur that renders one image into another.
///
/// Configuration changes only mark the pass dirty. The program, kernel buffer and sampler are
/// rebuilt together on the next [`execute`](BlurPass::execute).
pub struct BlurPass<B: Backend> {
    backend: B,
    config: BlurConfig,
    /// `None` while dirty.
    compiled: Option<CompiledPass<B>>,
    rebuilds: u64,
}

impl<B: Backend> BlurPass<B> {
    pub fn new(backend: B, config: BlurConfig) -> Self {
        Self {
            backend,
            config,
            compiled: None,
            rebuilds: 0,
        }
    }

    /// Kernel width 5, spatial sigma 2.5, range sigma 0.2.
    pub fn with_defaults(backend: B) -> Self {
        Self::new(backend, BlurConfig::default())
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> BlurConfig {
        self.config
    }

    pub fn set_config(&mut self, config: BlurConfig) {
        self.config = config;
        self.mark_dirty();
    }

    /// Controls the number of texels sampled when blurring each pixel.
    /// Even widths are rounded up to the next odd number.
    pub fn set_kernel_width(&mut self, kernel_width: u32) {
        self.set_config(self.config.with_kernel_width(kernel_width));
    }

    pub fn kernel_width(&self) -> u32 {
        self.config.kernel_width()
    }

    pub fn set_spatial_sigma(&mut self, sigma: f32) {
        self.set_config(self.config.with_spatial_sigma(sigma));
    }

    pub fn spatial_sigma(&self) -> f32 {
        self.config.spatial_sigma()
    }

    pub fn set_range_sigma(&mut self, sigma: f32) {
        self.set_config(self.config.with_range_sigma(sigma));
    }

    pub fn range_sigma(&self) -> f32 {
        self.config.range_sigma()
    }

    pub fn state(&self) -> PassState {
        match self.compiled {
            Some(_) => PassState::Clean,
            None => PassState::Dirty,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state() == PassState::Dirty
    }

    /// Number of successful program builds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// The configuration the current program was built from.
    pub fn compiled_config(&self) -> Option<BlurConfig> {
        self.compiled.as_ref().map(|c| c.config)
    }

    /// Weights uploaded with the current program.
    pub fn kernel(&self) -> Option<&KernelWeights> {
        self.compiled.as_ref().map(|c| &c.kernel)
    }

    fn mark_dirty(&mut self) {
        // The stale program is useless once the config moved on.
        self.compiled = None;
    }

    fn ensure_compiled(&mut self) -> Result<&mut CompiledPass<B>> {
        let compiled = match self.compiled.take() {
            Some(compiled) => compiled,
            None => {
                let _span = debug_span!("rebuild_program").entered();
                let compiled = CompiledPass::build(&self.backend, self.config).map_err(|err| {
                    warn!(%err, "blur program rebuild failed");
                    err
                })?;
                self.rebuilds += 1;
                compiled
            }
        };
        Ok(self.compiled.insert(compiled))
    }

    /// Blurs `src` into `dst`.
    ///
    /// Rebuilds the program first if the pass is dirty. A failed rebuild returns before any
    /// rendering state is touched. All pushed state is popped again on every exit path.
    ///
    /// # Errors
    /// Rebuild errors ([`BlurError::InvalidConfig`](crate::BlurError::InvalidConfig),
    /// [`BlurError::ProgramBuild`](crate::BlurError::ProgramBuild),
    /// [`BlurError::ResourceCreation`](crate::BlurError::ResourceCreation)) and draw errors from
    /// the context.
    pub fn execute<C>(&mut self, ctx: &mut C, src: &B::Texture, dst: &B::Target) -> Result<()>
    where
        C: RenderContext<B> + ?Sized,
    {
        let compiled = self.ensure_compiled()?;

        let array_size = src.array_size();
        let viewport = Viewport::full(dst.width(), dst.height());
        trace!(array_size, width = dst.width(), height = dst.height(), "executing blur");

        let mut viewports = Scoped::new(
            ctx,
            |ctx: &mut C| {
                for i in 0..array_size {
                    ctx.push_viewport(i, viewport);
                }
            },
            |ctx: &mut C| {
                for i in 0..array_size {
                    ctx.pop_viewport(i);
                }
            },
        );

        let locations = compiled.bind_locations;
        compiled.vars.set_sampler(locations.sampler, &compiled.sampler);
        compiled.vars.set_texture(locations.src_texture, src);

        let mut target = Scoped::new(
            &mut *viewports,
            |ctx: &mut C| ctx.push_render_target(dst),
            |ctx: &mut C| ctx.pop_render_target(),
        );
        let vars = &compiled.vars;
        let mut inputs = Scoped::new(
            &mut *target,
            |ctx: &mut C| ctx.push_vars(vars),
            |ctx: &mut C| ctx.pop_vars(),
        );

        inputs.draw_fullscreen(&compiled.program)
    }
}
