//! Small seam between `kurbo` geometry and the `vello_cpu` raster backend:
//! surface-extent guards, scratch rasterization, and paint conversions.

use std::sync::Arc;

use crate::{
    color::Rgba8,
    error::{ScreencraftError, ScreencraftResult},
};

/// Flattening tolerance for shape-to-path conversion.
const PATH_TOLERANCE: f64 = 0.1;

/// Guard a canvas size against the u16 surface extent of the backend.
pub fn surface_extent(width: u32, height: u32) -> ScreencraftResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ScreencraftError::render("surface width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ScreencraftError::render("surface height exceeds u16"))?;
    Ok((w, h))
}

/// Record drawing ops into a fresh scratch surface and return its pixels.
pub fn rasterize(
    width: u16,
    height: u16,
    f: impl FnOnce(&mut vello_cpu::RenderContext) -> ScreencraftResult<()>,
) -> ScreencraftResult<vello_cpu::Pixmap> {
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    f(&mut ctx)?;
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Wrap a premultiplied RGBA8 buffer as an image paint.
pub fn image_paint_from_premul(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> ScreencraftResult<vello_cpu::Image> {
    let (w, h) = surface_extent(width, height)?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(ScreencraftError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Flatten any `kurbo` shape into a backend path.
pub fn shape_to_cpu_path(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(PATH_TOLERANCE) {
        out.push(path_el_to_cpu(el));
    }
    out
}

fn path_el_to_cpu(el: kurbo::PathEl) -> vello_cpu::kurbo::PathEl {
    use vello_cpu::kurbo::PathEl as CpuEl;

    let p = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    match el {
        kurbo::PathEl::MoveTo(a) => CpuEl::MoveTo(p(a)),
        kurbo::PathEl::LineTo(a) => CpuEl::LineTo(p(a)),
        kurbo::PathEl::QuadTo(a, b) => CpuEl::QuadTo(p(a), p(b)),
        kurbo::PathEl::CurveTo(a, b, c) => CpuEl::CurveTo(p(a), p(b), p(c)),
        kurbo::PathEl::ClosePath => CpuEl::ClosePath,
    }
}

/// Fill a shape with a flat color under the context's current transform.
pub fn fill_shape(ctx: &mut vello_cpu::RenderContext, shape: &impl kurbo::Shape, color: Rgba8) {
    ctx.set_paint(color.to_peniko());
    ctx.fill_path(&shape_to_cpu_path(shape));
}

/// Draw a canvas-sized image paint at the origin, covering the surface.
pub fn fill_canvas_with_paint(
    ctx: &mut vello_cpu::RenderContext,
    paint: vello_cpu::Image,
    width: u32,
    height: u32,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(paint);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(width),
        f64::from(height),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_extent_guards_u16() {
        assert_eq!(surface_extent(1400, 560).unwrap(), (1400, 560));
        assert!(surface_extent(70_000, 10).is_err());
    }

    #[test]
    fn image_paint_rejects_length_mismatch() {
        assert!(image_paint_from_premul(&[0u8; 3], 1, 1).is_err());
        image_paint_from_premul(&[1, 2, 3, 255], 1, 1).unwrap();
    }

    #[test]
    fn rasterize_solid_fill_produces_expected_pixels() {
        let pm = rasterize(2, 2, |ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 2.0, 2.0));
            Ok(())
        })
        .unwrap();

        for px in pm.data_as_u8_slice().chunks_exact(4) {
            assert_eq!(px, [255, 0, 0, 255]);
        }
    }
}
