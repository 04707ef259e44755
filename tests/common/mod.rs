//! A backend that records every service call instead of talking to a GPU.

#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use bilateral_blur::{
    Backend, BindLocation, BlurError, DefineList, ProgramReflection, RenderContext,
    RenderSurface, Result, SamplerDesc, ShaderVars, SourceImage, Viewport,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Compile { path: String, defines: Vec<(String, String)> },
    CreateVars { program: u32 },
    CreateSampler(SamplerDesc),
    CreateBuffer { label: String, data: Vec<f32> },
    PushViewport(u32, Viewport),
    PopViewport(u32),
    PushTarget(u32),
    PopTarget,
    PushVars { program: u32 },
    PopVars,
    Draw { program: u32, sampler: Option<u32>, texture: Option<u32> },
}

#[derive(Debug, Default)]
pub struct Failures {
    pub compile: bool,
    pub sampler: bool,
    pub buffer: bool,
    pub draw: bool,
    /// Names left out of compiled programs' reflection.
    pub hidden_bindings: Vec<&'static str>,
}

#[derive(Debug, Default)]
struct Shared {
    events: Vec<Event>,
    next_id: u32,
    failures: Failures,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    shared: Rc<RefCell<Shared>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.borrow().events.clone()
    }

    pub fn clear_events(&self) {
        self.shared.borrow_mut().events.clear();
    }

    pub fn fail(&self, update: impl FnOnce(&mut Failures)) {
        update(&mut self.shared.borrow_mut().failures);
    }

    pub fn compile_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Compile { .. }))
            .count()
    }

    pub fn context(&self) -> MockContext {
        MockContext {
            backend: self.clone(),
            viewports: HashMap::new(),
            targets: Vec::new(),
            vars: Vec::new(),
        }
    }

    fn record(&self, event: Event) {
        self.shared.borrow_mut().events.push(event);
    }

    fn next_id(&self) -> u32 {
        let mut shared = self.shared.borrow_mut();
        shared.next_id += 1;
        shared.next_id
    }
}

pub const SAMPLER_LOCATION: BindLocation = BindLocation::new(0, 0);
pub const SOURCE_LOCATION: BindLocation = BindLocation::new(0, 1);
pub const WEIGHTS_LOCATION: BindLocation = BindLocation::new(0, 2);

#[derive(Debug)]
pub struct MockProgram {
    pub id: u32,
    bindings: HashMap<String, BindLocation>,
}

impl ProgramReflection for MockProgram {
    fn resource_binding(&self, name: &str) -> Option<BindLocation> {
        self.bindings.get(name).copied()
    }
}

#[derive(Debug, Clone)]
pub struct MockSampler {
    pub id: u32,
    pub desc: SamplerDesc,
}

#[derive(Debug, Clone)]
pub struct MockBuffer {
    pub data: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct MockTexture {
    pub id: u32,
    pub layers: u32,
}

impl SourceImage for MockTexture {
    fn array_size(&self) -> u32 {
        self.layers
    }
}

#[derive(Debug, Clone)]
pub struct MockTarget {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl RenderSurface for MockTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockVars {
    pub program: u32,
    bindings: HashMap<String, BindLocation>,
    pub samplers: HashMap<BindLocation, u32>,
    pub textures: HashMap<BindLocation, u32>,
    pub buffers: HashMap<BindLocation, Vec<f32>>,
}

impl ShaderVars<MockBackend> for MockVars {
    fn set_sampler(&mut self, location: BindLocation, sampler: &MockSampler) {
        self.samplers.insert(location, sampler.id);
    }

    fn set_texture(&mut self, location: BindLocation, texture: &MockTexture) {
        self.textures.insert(location, texture.id);
    }

    fn set_typed_buffer(&mut self, name: &str, buffer: MockBuffer) -> Result<()> {
        let location = self
            .bindings
            .get(name)
            .copied()
            .ok_or_else(|| BlurError::ProgramBuild(format!("no buffer slot `{name}`")))?;
        self.buffers.insert(location, buffer.data);
        Ok(())
    }
}

impl Backend for MockBackend {
    type Program = MockProgram;
    type Vars = MockVars;
    type Sampler = MockSampler;
    type Buffer = MockBuffer;
    type Texture = MockTexture;
    type Target = MockTarget;

    fn compile_program(&self, path: &str, defines: &DefineList) -> Result<MockProgram> {
        self.record(Event::Compile {
            path: path.to_string(),
            defines: defines
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        });
        if self.shared.borrow().failures.compile {
            return Err(BlurError::ProgramBuild("injected compile failure".into()));
        }

        let hidden = self.shared.borrow().failures.hidden_bindings.clone();
        let bindings = [
            ("gSampler", SAMPLER_LOCATION),
            ("gSrcTex", SOURCE_LOCATION),
            ("weights", WEIGHTS_LOCATION),
        ]
        .into_iter()
        .filter(|(name, _)| !hidden.contains(name))
        .map(|(name, location)| (name.to_string(), location))
        .collect();

        Ok(MockProgram {
            id: self.next_id(),
            bindings,
        })
    }

    fn create_vars(&self, program: &MockProgram) -> Result<MockVars> {
        self.record(Event::CreateVars {
            program: program.id,
        });
        Ok(MockVars {
            program: program.id,
            bindings: program.bindings.clone(),
            ..Default::default()
        })
    }

    fn create_sampler(&self, desc: &SamplerDesc) -> Result<MockSampler> {
        self.record(Event::CreateSampler(*desc));
        if self.shared.borrow().failures.sampler {
            return Err(BlurError::ResourceCreation("injected sampler failure".into()));
        }
        Ok(MockSampler {
            id: self.next_id(),
            desc: *desc,
        })
    }

    fn create_typed_buffer(&self, label: &str, data: &[f32]) -> Result<MockBuffer> {
        self.record(Event::CreateBuffer {
            label: label.to_string(),
            data: data.to_vec(),
        });
        if self.shared.borrow().failures.buffer {
            return Err(BlurError::ResourceCreation("injected buffer failure".into()));
        }
        Ok(MockBuffer {
            data: data.to_vec(),
        })
    }
}

/// Keeps real stacks so tests can check that every push was undone.
pub struct MockContext {
    backend: MockBackend,
    pub viewports: HashMap<u32, Vec<Viewport>>,
    pub targets: Vec<u32>,
    pub vars: Vec<MockVars>,
}

impl MockContext {
    pub fn is_balanced(&self) -> bool {
        self.targets.is_empty() && self.vars.is_empty() && self.viewports.values().all(Vec::is_empty)
    }
}

impl RenderContext<MockBackend> for MockContext {
    fn push_viewport(&mut self, index: u32, viewport: Viewport) {
        self.backend.record(Event::PushViewport(index, viewport));
        self.viewports.entry(index).or_default().push(viewport);
    }

    fn pop_viewport(&mut self, index: u32) {
        self.backend.record(Event::PopViewport(index));
        self.viewports.get_mut(&index).and_then(Vec::pop);
    }

    fn push_render_target(&mut self, target: &MockTarget) {
        self.backend.record(Event::PushTarget(target.id));
        self.targets.push(target.id);
    }

    fn pop_render_target(&mut self) {
        self.backend.record(Event::PopTarget);
        self.targets.pop();
    }

    fn push_vars(&mut self, vars: &MockVars) {
        self.backend.record(Event::PushVars {
            program: vars.program,
        });
        self.vars.push(vars.clone());
    }

    fn pop_vars(&mut self) {
        self.backend.record(Event::PopVars);
        self.vars.pop();
    }

    fn draw_fullscreen(&mut self, program: &MockProgram) -> Result<()> {
        let vars = self
            .vars
            .last()
            .ok_or_else(|| BlurError::Render("no vars pushed".into()))?;
        self.backend.record(Event::Draw {
            program: program.id,
            sampler: vars.samplers.get(&SAMPLER_LOCATION).copied(),
            texture: vars.textures.get(&SOURCE_LOCATION).copied(),
        });
        if self.backend.shared.borrow().failures.draw {
            return Err(BlurError::Render("injected draw failure".into()));
        }
        Ok(())
    }
}

pub fn texture(id: u32, layers: u32) -> MockTexture {
    MockTexture { id, layers }
}

pub fn target(id: u32, width: u32, height: u32) -> MockTarget {
    MockTarget { id, width, height }
}
