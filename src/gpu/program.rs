use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tracing::debug;

use crate::{
    blur::SHADER_PATH, BindLocation, BlurError, DefineList, Gpu, ProgramReflection, Result,
};

const BILATERAL_BLUR_WGSL: &str = include_str!("shader/bilateral_blur.wgsl");

/// Looks up a shader template by its resource name.
pub fn shader_source(path: &str) -> Option<&'static str> {
    match path {
        SHADER_PATH => Some(BILATERAL_BLUR_WGSL),
        _ => None,
    }
}

/// Declares every define as a module scope WGSL constant ahead of `template`.
pub fn compose_shader(template: &str, defines: &DefineList) -> String {
    let mut source = String::with_capacity(template.len() + defines.len() * 48);
    for (name, value) in defines.iter() {
        source.push_str(&format!("const {name} = {value};\n"));
    }
    source.push_str(template);
    source
}

/// Parses and validates WGSL source.
///
/// # Errors
/// [`BlurError::ProgramBuild`] with the rendered diagnostic.
pub fn parse_shader(source: &str) -> Result<naga::Module> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|err| BlurError::ProgramBuild(err.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|err| BlurError::ProgramBuild(err.to_string()))?;

    Ok(module)
}

/// Maps every named, bound global of `module` to its location.
pub fn reflect_bindings(module: &naga::Module) -> HashMap<String, BindLocation> {
    module
        .global_variables
        .iter()
        .filter_map(|(_, var)| {
            let name = var.name.clone()?;
            let binding = var.binding.as_ref()?;
            Some((name, BindLocation::new(binding.group, binding.binding)))
        })
        .collect()
}

/// A compiled shader module and the render pipelines built from it.
pub struct WgpuProgram {
    label: String,
    module: wgpu::ShaderModule,
    bindings: Rc<HashMap<String, BindLocation>>,
    /// Pipelines depend on the target format, so they are created on first use per format.
    pipelines: RefCell<HashMap<wgpu::TextureFormat, Rc<wgpu::RenderPipeline>>>,
}

impl WgpuProgram {
    pub(crate) fn new(
        label: &str,
        module: wgpu::ShaderModule,
        bindings: HashMap<String, BindLocation>,
    ) -> Self {
        Self {
            label: label.to_string(),
            module,
            bindings: Rc::new(bindings),
            pipelines: RefCell::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub(crate) fn bindings(&self) -> &Rc<HashMap<String, BindLocation>> {
        &self.bindings
    }

    /// The pipeline for `format`, created and cached on first use.
    ///
    /// A pipeline that fails validation is not cached.
    pub(crate) fn pipeline(
        &self,
        gpu: &Gpu,
        format: wgpu::TextureFormat,
    ) -> Result<Rc<wgpu::RenderPipeline>> {
        if let Some(pipeline) = self.pipelines.borrow().get(&format) {
            return Ok(pipeline.clone());
        }

        debug!(label = %self.label, ?format, "creating blur pipeline");
        let pipeline = gpu.checked(BlurError::Render, || {
            gpu.device
                .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some(&self.label),
                    layout: None,
                    vertex: wgpu::VertexState {
                        module: &self.module,
                        entry_point: Some("vs_main"),
                        compilation_options: Default::default(),
                        buffers: &[],
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &self.module,
                        entry_point: Some("fs_main"),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState::default(),
                    depth_stencil: None,
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                })
        })?;

        let pipeline = Rc::new(pipeline);
        self.pipelines.borrow_mut().insert(format, pipeline.clone());
        Ok(pipeline)
    }
}

impl ProgramReflection for WgpuProgram {
    fn resource_binding(&self, name: &str) -> Option<BindLocation> {
        self.bindings.get(name).copied()
    }
}
