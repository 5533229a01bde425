use kurbo::Rect;

use crate::settings::CanvasSettings;

/// Placement computed from settings plus the source image's natural size.
///
/// Derived fresh on every render; any settings or image change invalidates
/// all of it, so nothing here is cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Frame rectangle (chrome body) in canvas coordinates.
    pub frame: Rect,
    /// Scaled image width in pixels.
    pub image_width: f64,
    /// Scaled image height in pixels.
    pub image_height: f64,
    /// Vertical pixels the chrome reserves before image content.
    pub frame_inset: f64,
    /// Uniform fit-inside scale applied to the natural image size.
    pub scale: f64,
}

/// Resolve frame and image placement.
///
/// Returns `None` when the geometry is degenerate (zero natural size, or a
/// padding/inset combination that leaves no positive content area); callers
/// skip the shadow, chrome, and image layers and keep the background.
pub fn resolve(settings: &CanvasSettings, natural_w: u32, natural_h: u32) -> Option<Layout> {
    if natural_w == 0 || natural_h == 0 {
        return None;
    }

    let canvas_w = f64::from(settings.width);
    let canvas_h = f64::from(settings.height);
    let padding = f64::from(settings.padding);

    let max_content_w = canvas_w - 2.0 * padding;
    let frame_inset = settings.frame_type.content_inset();
    let available_h = canvas_h - 2.0 * padding - frame_inset;

    let scale = (max_content_w / f64::from(natural_w)).min(available_h / f64::from(natural_h));
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }

    let image_width = f64::from(natural_w) * scale;
    let image_height = f64::from(natural_h) * scale;
    let frame_w = image_width;
    let frame_h = image_height + frame_inset;
    let x = (canvas_w - frame_w) / 2.0;
    let y = (canvas_h - frame_h) / 2.0;

    Some(Layout {
        frame: Rect::new(x, y, x + frame_w, y + frame_h),
        image_width,
        image_height,
        frame_inset,
        scale,
    })
}

/// Uniform scale fitting a rendered canvas into a viewport for on-screen
/// preview. Purely a display concern; pixel data is never resampled.
pub fn display_fit_scale(canvas_w: u32, canvas_h: u32, viewport_w: f64, viewport_h: f64) -> f64 {
    if canvas_w == 0 || canvas_h == 0 {
        return 1.0;
    }
    let s = (viewport_w / f64::from(canvas_w)).min(viewport_h / f64::from(canvas_h));
    if !s.is_finite() || s <= 0.0 {
        return 1.0;
    }
    s.min(1.0)
}
