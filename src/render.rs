use crate::{
    background,
    error::ScreencraftResult,
    frame::{ChromeStyle, ShadowSpec},
    geometry::{self, Layout},
    ingest::SourceImage,
    raster, shadow,
    settings::{CanvasSettings, FrameType},
};

/// Rendered output pixels, sized exactly `width x height`.
///
/// A fresh buffer per render call; preview and export each get their own and
/// nothing is partially reused.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// The compositor: one pure render pass over `(settings, source)`.
///
/// Preview and export both call this, differing only in when and how often;
/// identical inputs produce byte-identical output. Drawing order: background,
/// external shadow (flat/no-frame chrome only), frame chrome, then the
/// screenshot centered in the content area, clipped to the corner radius
/// when no frame is selected. Degenerate geometry skips everything after the
/// background instead of erroring.
#[tracing::instrument(skip_all, fields(width = settings.width, height = settings.height))]
pub fn render_frame(
    settings: &CanvasSettings,
    source: Option<&SourceImage>,
) -> ScreencraftResult<RenderedFrame> {
    settings.validate()?;
    let (w16, h16) = raster::surface_extent(settings.width, settings.height)?;

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    let mut ctx = vello_cpu::RenderContext::new(w16, h16);

    background::paint(&mut ctx, settings, source)?;

    if let Some(image) = source
        && let Some(layout) = geometry::resolve(settings, image.width, image.height)
    {
        draw_composite(&mut ctx, settings, image, &layout)?;
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    Ok(RenderedFrame {
        width: settings.width,
        height: settings.height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn draw_composite(
    ctx: &mut vello_cpu::RenderContext,
    settings: &CanvasSettings,
    image: &SourceImage,
    layout: &Layout,
) -> ScreencraftResult<()> {
    let canvas = (settings.width, settings.height);
    let radius = f64::from(settings.corner_radius);

    // Desktop and mobile manage their own shadow around body/bezel; every
    // other chrome gets the external pass on the frame silhouette.
    if settings.shadow_enabled && !settings.frame_type.manages_own_shadow() {
        let silhouette = kurbo::RoundedRect::from_rect(layout.frame, radius);
        let paint =
            shadow::shadow_paint(canvas.0, canvas.1, silhouette, settings.shadow_intensity)?;
        raster::fill_canvas_with_paint(ctx, paint, canvas.0, canvas.1);
    }

    let style = ChromeStyle {
        corner_radius: radius,
        dark_mode: settings.frame_dark_mode,
    };
    let shadow_spec = ShadowSpec {
        enabled: settings.shadow_enabled,
        intensity: settings.shadow_intensity,
    };
    let inset = settings
        .frame_type
        .paint(ctx, canvas, layout.frame, &style, &shadow_spec)?;

    // Horizontally centered in the frame; vertically centered in the band
    // below the chrome inset.
    let frame = layout.frame;
    let image_x = frame.x0 + (frame.width() - layout.image_width) / 2.0;
    let image_y = frame.y0 + inset + (frame.height() - inset - layout.image_height) / 2.0;

    let paint = image.paint()?;
    let tr = kurbo::Affine::translate((image_x, image_y)) * kurbo::Affine::scale(layout.scale);
    ctx.set_transform(raster::affine_to_cpu(tr));
    ctx.set_paint(paint);

    let natural_w = f64::from(image.width);
    let natural_h = f64::from(image.height);
    if settings.frame_type == FrameType::None {
        // No chrome bounds the bitmap, so the corner rounding clips the image
        // itself. The clip path lives in natural-image space under the
        // uniform scale, so the radius divides out.
        let rr = kurbo::RoundedRect::new(0.0, 0.0, natural_w, natural_h, radius / layout.scale);
        ctx.fill_path(&raster::shape_to_cpu_path(&rr));
    } else {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, natural_w, natural_h));
    }
    Ok(())
}
