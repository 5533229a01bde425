use crate::{blur, color::Rgba8, error::ScreencraftResult, raster};

/// Canvas-level shadow color `rgba(0, 0, 0, 0.3)`.
pub const SHADOW_COLOR: Rgba8 = Rgba8::rgba(0, 0, 0, 77);

/// Render a drop shadow for a rounded-rect silhouette as a canvas-sized
/// image paint.
///
/// The silhouette is filled at `SHADOW_COLOR`, offset down by half the
/// intensity, then Gaussian-blurred with the intensity as blur radius:
/// the same parameters a canvas `shadowBlur`/`shadowOffsetY` pair produces.
/// Callers draw the returned paint before the casting shape so the shape
/// covers the shadow's center.
pub fn shadow_paint(
    canvas_w: u32,
    canvas_h: u32,
    shape: kurbo::RoundedRect,
    intensity: f64,
) -> ScreencraftResult<vello_cpu::Image> {
    let (w16, h16) = raster::surface_extent(canvas_w, canvas_h)?;
    let intensity = intensity.max(0.0);

    let silhouette = raster::rasterize(w16, h16, |ctx| {
        let offset = kurbo::Affine::translate((0.0, intensity / 2.0));
        ctx.set_transform(raster::affine_to_cpu(offset));
        raster::fill_shape(ctx, &shape, SHADOW_COLOR);
        Ok(())
    })?;

    let radius = intensity.ceil() as u32;
    let blurred = blur::blur_premul_rgba8(
        silhouette.data_as_u8_slice(),
        canvas_w,
        canvas_h,
        radius,
        blur::sigma_for_radius(radius),
    )?;
    raster::image_paint_from_premul(&blurred, canvas_w, canvas_h)
}
