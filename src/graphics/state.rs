use std::ops::{Deref, DerefMut};

use crate::{Backend, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Covers a `width` x `height` surface from the origin, depth range `[0, 1]`.
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}

/// The stack based rendering state a pass records into.
///
/// Every push must be matched by a pop on the same stack. Use [`Scoped`] to tie the pop to
/// scope exit.
pub trait RenderContext<B: Backend + ?Sized> {
    /// Pushes a viewport for array slice `index`.
    fn push_viewport(&mut self, index: u32, viewport: Viewport);
    fn pop_viewport(&mut self, index: u32);

    fn push_render_target(&mut self, target: &B::Target);
    fn pop_render_target(&mut self);

    fn push_vars(&mut self, vars: &B::Vars);
    fn pop_vars(&mut self);

    /// Draws a full-screen primitive with `program` into the active target, reading from the
    /// active parameter set.
    fn draw_fullscreen(&mut self, program: &B::Program) -> Result<()>;
}

/// Mutable access to a context that runs `release` on it when dropped.
///
/// Guards nest through `DerefMut`, and drop order undoes them innermost first.
pub struct Scoped<'a, C, F>
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    ctx: &'a mut C,
    /// Only `None` once the guard has been dropped.
    release: Option<F>,
}

impl<'a, C, F> Scoped<'a, C, F>
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    /// Runs `acquire` now and `release` when the guard goes out of scope.
    pub fn new(ctx: &'a mut C, acquire: impl FnOnce(&mut C), release: F) -> Self {
        acquire(ctx);
        Self {
            ctx,
            release: Some(release),
        }
    }
}

impl<C, F> Deref for Scoped<'_, C, F>
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<C, F> DerefMut for Scoped<'_, C, F>
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl<C, F> Drop for Scoped<'_, C, F>
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.ctx);
        }
    }
}
