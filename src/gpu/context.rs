use std::{
    collections::{BTreeMap, HashMap},
    rc::Rc,
};

use tracing::warn;

use crate::{
    BindLocation, BlurError, Buffer, Gpu, RenderContext, Result, ShaderVars, Viewport,
    WgpuProgram,
};

#[derive(Clone)]
enum BoundResource {
    Sampler(Rc<wgpu::Sampler>),
    Texture(Rc<wgpu::TextureView>),
    Buffer(Rc<Buffer>),
}

/// Resources bound to one program, keyed by bind location.
#[derive(Clone)]
pub struct WgpuVars {
    bindings: Rc<HashMap<String, BindLocation>>,
    resources: BTreeMap<BindLocation, BoundResource>,
}

impl WgpuVars {
    pub(crate) fn new(program: &WgpuProgram) -> Self {
        Self {
            bindings: program.bindings().clone(),
            resources: BTreeMap::new(),
        }
    }

    /// One bind group per group index, laid out for `pipeline`.
    ///
    /// Resources that do not fit the layout are reported as [`BlurError::Render`].
    fn bind_groups(
        &self,
        gpu: &Gpu,
        pipeline: &wgpu::RenderPipeline,
    ) -> Result<Vec<(u32, wgpu::BindGroup)>> {
        if let Some((name, _)) = self
            .bindings
            .iter()
            .find(|(_, location)| !self.resources.contains_key(location))
        {
            return Err(BlurError::Render(format!("`{name}` is not bound")));
        }

        let mut groups: BTreeMap<u32, Vec<wgpu::BindGroupEntry>> = BTreeMap::new();
        for (location, resource) in &self.resources {
            let resource = match resource {
                BoundResource::Sampler(sampler) => wgpu::BindingResource::Sampler(sampler),
                BoundResource::Texture(view) => wgpu::BindingResource::TextureView(view),
                BoundResource::Buffer(buffer) => buffer.as_entire_binding(),
            };
            groups
                .entry(location.group)
                .or_default()
                .push(wgpu::BindGroupEntry {
                    binding: location.binding,
                    resource,
                });
        }

        groups
            .into_iter()
            .map(|(group, entries)| {
                let bind_group = gpu.checked(BlurError::Render, || {
                    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("Blur bind group"),
                        layout: &pipeline.get_bind_group_layout(group),
                        entries: &entries,
                    })
                })?;
                Ok((group, bind_group))
            })
            .collect()
    }
}

impl ShaderVars<Gpu> for WgpuVars {
    fn set_sampler(&mut self, location: BindLocation, sampler: &Rc<wgpu::Sampler>) {
        self.resources
            .insert(location, BoundResource::Sampler(sampler.clone()));
    }

    fn set_texture(&mut self, location: BindLocation, texture: &wgpu::Texture) {
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Blur source"),
            dimension: Some(wgpu::TextureViewDimension::D2Array),
            ..Default::default()
        });
        self.resources
            .insert(location, BoundResource::Texture(Rc::new(view)));
    }

    fn set_typed_buffer(&mut self, name: &str, buffer: Buffer) -> Result<()> {
        let location = self
            .bindings
            .get(name)
            .copied()
            .ok_or_else(|| BlurError::ProgramBuild(format!("no buffer slot named `{name}`")))?;
        self.resources
            .insert(location, BoundResource::Buffer(Rc::new(buffer)));
        Ok(())
    }
}

/// Stack based rendering state on top of a command encoder.
///
/// wgpu attaches a single array layer per render pass, so a draw is encoded as one pass per
/// layer of the active target, each using the viewport pushed for that layer index.
pub struct WgpuRenderContext<'a> {
    gpu: Gpu,
    encoder: &'a mut wgpu::CommandEncoder,
    viewports: HashMap<u32, Vec<Viewport>>,
    targets: Vec<wgpu::Texture>,
    vars: Vec<WgpuVars>,
}

impl<'a> WgpuRenderContext<'a> {
    pub fn new(gpu: Gpu, encoder: &'a mut wgpu::CommandEncoder) -> Self {
        Self {
            gpu,
            encoder,
            viewports: HashMap::new(),
            targets: Vec::new(),
            vars: Vec::new(),
        }
    }

    /// True when every push has been popped again.
    pub fn is_balanced(&self) -> bool {
        self.targets.is_empty()
            && self.vars.is_empty()
            && self.viewports.values().all(Vec::is_empty)
    }
}

impl RenderContext<Gpu> for WgpuRenderContext<'_> {
    fn push_viewport(&mut self, index: u32, viewport: Viewport) {
        self.viewports.entry(index).or_default().push(viewport);
    }

    fn pop_viewport(&mut self, index: u32) {
        if self
            .viewports
            .get_mut(&index)
            .and_then(Vec::pop)
            .is_none()
        {
            warn!(index, "popped a viewport that was never pushed");
        }
    }

    fn push_render_target(&mut self, target: &wgpu::Texture) {
        self.targets.push(target.clone());
    }

    fn pop_render_target(&mut self) {
        if self.targets.pop().is_none() {
            warn!("popped a render target that was never pushed");
        }
    }

    fn push_vars(&mut self, vars: &WgpuVars) {
        self.vars.push(vars.clone());
    }

    fn pop_vars(&mut self) {
        if self.vars.pop().is_none() {
            warn!("popped shader vars that were never pushed");
        }
    }

    fn draw_fullscreen(&mut self, program: &WgpuProgram) -> Result<()> {
        let target = self
            .targets
            .last()
            .ok_or_else(|| BlurError::Render("no render target pushed".into()))?;
        let vars = self
            .vars
            .last()
            .ok_or_else(|| BlurError::Render("no shader vars pushed".into()))?;

        let pipeline = program.pipeline(&self.gpu, target.format())?;
        let bind_groups = vars.bind_groups(&self.gpu, &pipeline)?;

        for layer in 0..target.depth_or_array_layers() {
            let view = target.create_view(&wgpu::TextureViewDescriptor {
                label: Some("Blur target layer"),
                dimension: Some(wgpu::TextureViewDimension::D2),
                base_array_layer: layer,
                array_layer_count: Some(1),
                ..Default::default()
            });

            let mut pass = self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(program.label()),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });

            if let Some(vp) = self.viewports.get(&layer).and_then(|stack| stack.last()) {
                pass.set_viewport(
                    vp.origin_x,
                    vp.origin_y,
                    vp.width,
                    vp.height,
                    vp.min_depth,
                    vp.max_depth,
                );
            }
            pass.set_pipeline(&pipeline);
            for (group, bind_group) in &bind_groups {
                pass.set_bind_group(*group, bind_group, &[]);
            }
            pass.draw(0..3, layer..layer + 1);
        }

        Ok(())
    }
}
