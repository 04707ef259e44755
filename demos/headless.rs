//! Blurs a small layered checkerboard without a window.

use bilateral_blur::{wgpu, BlurPass, BoxError, Gpu};
use tracing::info;

const SIZE: u32 = 64;
const LAYERS: u32 = 2;

fn checkerboard(layer: u32) -> Vec<u8> {
    let mut texels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let on = ((x / 8) + (y / 8) + layer) % 2 == 0;
            let v = if on { 255 } else { 0 };
            texels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    texels
}

fn layered_texture(gpu: &Gpu, label: &str, usage: wgpu::TextureUsages) -> wgpu::Texture {
    gpu.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: SIZE,
            height: SIZE,
            depth_or_array_layers: LAYERS,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8Unorm,
        usage,
        view_formats: &[],
    })
}

fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let gpu = Gpu::builder().with_label("Blur demo").build_headless()?;

    let src = layered_texture(
        &gpu,
        "Demo source",
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    for layer in 0..LAYERS {
        gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &src,
                mip_level: 0,
                origin: wgpu::Origin3d { x: 0, y: 0, z: layer },
                aspect: wgpu::TextureAspect::All,
            },
            &checkerboard(layer),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(SIZE * 4),
                rows_per_image: Some(SIZE),
            },
            wgpu::Extent3d {
                width: SIZE,
                height: SIZE,
                depth_or_array_layers: 1,
            },
        );
    }
    let dst = layered_texture(
        &gpu,
        "Demo target",
        wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
    );

    let mut blur = BlurPass::with_defaults(gpu.clone());
    let mut encoder = gpu
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Blur demo encoder"),
        });
    {
        let mut ctx = gpu.render_context(&mut encoder);
        blur.execute(&mut ctx, &src, &dst)?;

        // Wider and softer, edges kept sharper.
        blur.set_kernel_width(9);
        blur.set_spatial_sigma(4.0);
        blur.set_range_sigma(0.1);
        blur.execute(&mut ctx, &src, &dst)?;
    }
    gpu.queue.submit([encoder.finish()]);
    gpu.device.poll(wgpu::PollType::Wait)?;

    info!(
        rebuilds = blur.rebuild_count(),
        kernel_width = blur.kernel_width(),
        "blurred {LAYERS} layers of {SIZE}x{SIZE}"
    );
    Ok(())
}
