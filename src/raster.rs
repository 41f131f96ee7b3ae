//! Bridging helpers between `vello_cpu` pixmaps and straight-alpha `image`
//! buffers, plus small shape fill/stroke wrappers.

use image::RgbaImage;
use kurbo::Shape;

use crate::error::{FrameryError, FrameryResult};

/// Straight RGBA color used by the drawing helpers.
pub(crate) type Rgba = [u8; 4];

/// Create a render context for a canvas of the given pixel size.
pub(crate) fn new_canvas(width: u32, height: u32) -> FrameryResult<vello_cpu::RenderContext> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameryError::render(format!("canvas width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameryError::render(format!("canvas height {height} exceeds u16")))?;
    Ok(vello_cpu::RenderContext::new(w, h))
}

/// Rasterize everything drawn so far into a straight-alpha RGBA image.
pub(crate) fn render_to_rgba(
    ctx: &mut vello_cpu::RenderContext,
    width: u32,
    height: u32,
) -> FrameryResult<RgbaImage> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FrameryError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FrameryError::render("pixmap height exceeds u16"))?;
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    let mut bytes = pixmap.data_as_u8_slice().to_vec();
    unpremultiply_rgba8_in_place(&mut bytes);
    RgbaImage::from_raw(width, height, bytes)
        .ok_or_else(|| FrameryError::render("pixmap byte length mismatch"))
}

/// Fill any kurbo shape with a straight-alpha color.
pub(crate) fn fill_shape(ctx: &mut vello_cpu::RenderContext, shape: &impl Shape, color: Rgba) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color[0], color[1], color[2], color[3],
    ));
    let mut path = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        path.push(el);
    }
    ctx.fill_path(&path);
}

/// Stroke any kurbo shape by expanding the outline and filling it.
pub(crate) fn stroke_shape(
    ctx: &mut vello_cpu::RenderContext,
    shape: &impl Shape,
    width: f64,
    color: Rgba,
) {
    let style = kurbo::Stroke::new(width);
    let outline = kurbo::stroke(
        shape.path_elements(0.1),
        &style,
        &kurbo::StrokeOpts::default(),
        0.1,
    );
    fill_shape(ctx, &outline, color);
}

/// Axis-aligned rectangle fill.
pub(crate) fn fill_rect(
    ctx: &mut vello_cpu::RenderContext,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Rgba,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color[0], color[1], color[2], color[3],
    ));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x1, y1));
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in &mut px[0..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}
