use std::ops::Deref;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::Gpu;

/// A GPU buffer together with its size in bytes.
pub struct Buffer {
    inner: wgpu::Buffer,
    pub size: u64,
}
/// Allows you to use this as a reference to the inner `wgpu::Buffer`
impl Deref for Buffer {
    type Target = wgpu::Buffer;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct BufferBuilder<'a> {
    gpu: Gpu,
    label: Option<&'a str>,
    contents: &'a [u8],
    usage: wgpu::BufferUsages,
}
impl<'a> BufferBuilder<'a> {
    #[must_use]
    pub const fn new(gpu: Gpu, label: &'a str) -> Self {
        BufferBuilder {
            gpu,
            label: Some(label),
            contents: &[],
            usage: wgpu::BufferUsages::empty(),
        }
    }

    /// The buffer will be initialized with the contents of the given slice
    pub fn with_data<T>(mut self, data: &'a [T]) -> Self
    where
        T: Pod,
    {
        self.contents = bytemuck::cast_slice(data);
        self
    }

    /// Allow a buffer to be a `BufferBindingType::Storage` inside a bind group.
    pub fn as_storage_buffer(mut self) -> Self {
        self.usage |= wgpu::BufferUsages::STORAGE;
        self
    }

    /// Creates the buffer
    #[must_use]
    pub fn build(&self) -> Buffer {
        let inner = self
            .gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: self.label,
                usage: self.usage,
                contents: self.contents,
            });

        Buffer {
            inner,
            size: self.contents.len() as u64,
        }
    }
}
