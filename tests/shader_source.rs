#![cfg(test)]
#![cfg(feature = "wgpu")]

use bilateral_blur::{
    blur::{SAMPLER_BINDING, SHADER_PATH, SOURCE_BINDING, WEIGHTS_BINDING},
    compose_shader, parse_shader, reflect_bindings, shader_source, BindLocation, BlurConfig,
    BlurError, DefineList,
};

fn composed(config: BlurConfig) -> String {
    compose_shader(shader_source(SHADER_PATH).unwrap(), &config.defines())
}

#[test]
fn bundled_shader_validates_for_every_width() {
    for width in (1..=15).step_by(2) {
        let source = composed(BlurConfig::default().with_kernel_width(width));
        if let Err(err) = parse_shader(&source) {
            panic!("width {width}: {err}");
        }
    }
}

#[test]
fn whole_range_sigma_stays_a_float() {
    let source = composed(BlurConfig::default().with_range_sigma(2.0));
    assert!(source.starts_with("const _KERNEL_WIDTH = 5;\nconst _RANGE_SIGMA_SQUARED = 4.0;\n"));
    parse_shader(&source).unwrap();
}

#[test]
fn reflection_finds_the_blur_resources() {
    let module = parse_shader(&composed(BlurConfig::default())).unwrap();
    let bindings = reflect_bindings(&module);

    assert_eq!(bindings.len(), 3);
    assert_eq!(bindings[SAMPLER_BINDING], BindLocation::new(0, 0));
    assert_eq!(bindings[SOURCE_BINDING], BindLocation::new(0, 1));
    assert_eq!(bindings[WEIGHTS_BINDING], BindLocation::new(0, 2));
}

#[test]
fn unknown_shader_path_has_no_source() {
    assert!(shader_source("Effects/Missing.wgsl").is_none());
}

#[test]
fn missing_define_fails_to_build() {
    let mut defines = DefineList::new();
    defines.add("_KERNEL_WIDTH", 5);
    let source = compose_shader(shader_source(SHADER_PATH).unwrap(), &defines);

    assert!(matches!(parse_shader(&source), Err(BlurError::ProgramBuild(_))));
}

#[test]
fn malformed_define_fails_to_build() {
    let mut defines = BlurConfig::default().defines();
    defines.add("_KERNEL_WIDTH", "five");
    let source = compose_shader(shader_source(SHADER_PATH).unwrap(), &defines);

    assert!(matches!(parse_shader(&source), Err(BlurError::ProgramBuild(_))));
}
