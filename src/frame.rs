//! Device-frame chrome renderers.
//!
//! Each variant paints its decoration around the frame rectangle and returns
//! the vertical content inset at which the screenshot starts. Every painter
//! receives exactly the values it needs; nothing closes over shared render
//! state.

use kurbo::{Circle, Point, Rect, RoundedRect, RoundedRectRadii};

use crate::{
    color::Rgba8,
    error::ScreencraftResult,
    raster, shadow,
    settings::FrameType,
};

/// Traffic-light dot colors, fixed regardless of chrome palette.
const DOT_COLORS: [Rgba8; 3] = [
    Rgba8::rgb(0xff, 0x5f, 0x56),
    Rgba8::rgb(0xff, 0xbd, 0x2e),
    Rgba8::rgb(0x27, 0xc9, 0x3f),
];
const DOT_RADIUS: f64 = 5.0;

const BROWSER_HEADER_H: f64 = 32.0;
const DESKTOP_TITLE_H: f64 = 28.0;
const MOBILE_BEZEL: f64 = 12.0;
const NOTCH_W: f64 = 80.0;
const NOTCH_H: f64 = 24.0;
const NOTCH_RADIUS: f64 = 12.0;

/// Corner rounding and palette selection shared by all chrome painters.
#[derive(Clone, Copy, Debug)]
pub struct ChromeStyle {
    pub corner_radius: f64,
    pub dark_mode: bool,
}

/// Shadow parameters for chrome that paints its own shadow (desktop window
/// body, mobile bezel).
#[derive(Clone, Copy, Debug)]
pub struct ShadowSpec {
    pub enabled: bool,
    pub intensity: f64,
}

impl FrameType {
    /// Paint this frame's chrome into `ctx` and return the content inset.
    ///
    /// `canvas` is the full surface size, needed only to raster internal
    /// shadows at canvas resolution.
    pub fn paint(
        self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: (u32, u32),
        frame: Rect,
        style: &ChromeStyle,
        shadow: &ShadowSpec,
    ) -> ScreencraftResult<f64> {
        match self {
            FrameType::None => Ok(0.0),
            FrameType::Browser => Ok(paint_browser(ctx, frame, style)),
            FrameType::Desktop => paint_desktop(ctx, canvas, frame, style, shadow),
            FrameType::Mobile => paint_mobile(ctx, canvas, frame, style, shadow),
        }
    }
}

fn paint_browser(ctx: &mut vello_cpu::RenderContext, frame: Rect, style: &ChromeStyle) -> f64 {
    let (body, header, url_bar) = if style.dark_mode {
        (
            Rgba8::rgb(0x1e, 0x1e, 0x1e),
            Rgba8::rgb(0x2d, 0x2d, 0x2d),
            Rgba8::rgb(0x1e, 0x1e, 0x1e),
        )
    } else {
        (
            Rgba8::rgb(0xff, 0xff, 0xff),
            Rgba8::rgb(0xf5, 0xf5, 0xf5),
            Rgba8::rgb(0xe5, 0xe5, 0xe5),
        )
    };

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    raster::fill_shape(ctx, &RoundedRect::from_rect(frame, style.corner_radius), body);
    raster::fill_shape(ctx, &top_band(frame, BROWSER_HEADER_H, style.corner_radius), header);
    paint_dots(ctx, frame.x0 + 16.0, frame.y0 + 10.0, 16.0);

    // URL bar needs room for its 80px insets on both sides.
    if frame.width() > 160.0 {
        let bar = Rect::new(
            frame.x0 + 80.0,
            frame.y0 + 6.0,
            frame.x1 - 80.0,
            frame.y0 + 26.0,
        );
        raster::fill_shape(ctx, &RoundedRect::from_rect(bar, 4.0), url_bar);
    }

    BROWSER_HEADER_H
}

fn paint_desktop(
    ctx: &mut vello_cpu::RenderContext,
    canvas: (u32, u32),
    frame: Rect,
    style: &ChromeStyle,
    shadow: &ShadowSpec,
) -> ScreencraftResult<f64> {
    let (body, title_bar) = if style.dark_mode {
        (Rgba8::rgb(0x2d, 0x2d, 0x2d), Rgba8::rgb(0x3d, 0x3d, 0x3d))
    } else {
        (Rgba8::rgb(0xff, 0xff, 0xff), Rgba8::rgb(0xe8, 0xe8, 0xe8))
    };

    let body_shape = RoundedRect::from_rect(frame, style.corner_radius);

    // Shadow belongs to the window body only; painted before it so the title
    // bar and controls land on an unshadowed surface.
    if shadow.enabled {
        let paint = shadow::shadow_paint(canvas.0, canvas.1, body_shape, shadow.intensity)?;
        raster::fill_canvas_with_paint(ctx, paint, canvas.0, canvas.1);
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    raster::fill_shape(ctx, &body_shape, body);
    raster::fill_shape(ctx, &top_band(frame, DESKTOP_TITLE_H, style.corner_radius), title_bar);
    paint_dots(ctx, frame.x0 + 14.0, frame.y0 + 14.0, 14.0);

    Ok(DESKTOP_TITLE_H)
}

fn paint_mobile(
    ctx: &mut vello_cpu::RenderContext,
    canvas: (u32, u32),
    frame: Rect,
    style: &ChromeStyle,
    shadow: &ShadowSpec,
) -> ScreencraftResult<f64> {
    let bezel_color = if style.dark_mode {
        Rgba8::rgb(0x1a, 0x1a, 0x1a)
    } else {
        Rgba8::rgb(0xf0, 0xf0, 0xf0)
    };

    let bezel_rect = frame.inflate(MOBILE_BEZEL, MOBILE_BEZEL);
    let bezel_shape = RoundedRect::from_rect(bezel_rect, style.corner_radius + MOBILE_BEZEL);

    if shadow.enabled {
        let paint = shadow::shadow_paint(canvas.0, canvas.1, bezel_shape, shadow.intensity)?;
        raster::fill_canvas_with_paint(ctx, paint, canvas.0, canvas.1);
    }

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    raster::fill_shape(ctx, &bezel_shape, bezel_color);

    // Notch drawn as an opaque overlay, not an actual cutout; the screenshot
    // later covers its lower half, matching the flat look.
    let notch = Rect::new(
        frame.x0 + (frame.width() - NOTCH_W) / 2.0,
        bezel_rect.y0,
        frame.x0 + (frame.width() + NOTCH_W) / 2.0,
        bezel_rect.y0 + NOTCH_H,
    );
    raster::fill_shape(ctx, &RoundedRect::from_rect(notch, NOTCH_RADIUS), bezel_color);

    // The image fills the full frame rectangle; mobile reserves no band.
    Ok(0.0)
}

/// Header/title band rounded on its top corners only.
fn top_band(frame: Rect, band_h: f64, radius: f64) -> RoundedRect {
    let band = Rect::new(frame.x0, frame.y0, frame.x1, frame.y0 + band_h);
    RoundedRect::from_rect(band, RoundedRectRadii::new(radius, radius, 0.0, 0.0))
}

fn paint_dots(ctx: &mut vello_cpu::RenderContext, first_x: f64, y: f64, spacing: f64) {
    for (i, color) in DOT_COLORS.iter().enumerate() {
        let center = Point::new(first_x + spacing * i as f64, y);
        raster::fill_shape(ctx, &Circle::new(center, DOT_RADIUS), *color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        frame_type: FrameType,
        dark: bool,
        shadow_on: bool,
    ) -> (Vec<u8>, f64) {
        let frame = Rect::new(20.0, 20.0, 140.0, 110.0);
        let style = ChromeStyle {
            corner_radius: 8.0,
            dark_mode: dark,
        };
        let shadow = ShadowSpec {
            enabled: shadow_on,
            intensity: 6.0,
        };

        let mut inset = 0.0;
        let pm = raster::rasterize(160, 160, |ctx| {
            inset = frame_type.paint(ctx, (160, 160), frame, &style, &shadow)?;
            Ok(())
        })
        .unwrap();
        (pm.data_as_u8_slice().to_vec(), inset)
    }

    fn px(data: &[u8], x: usize, y: usize) -> [u8; 4] {
        let idx = (y * 160 + x) * 4;
        [data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]
    }

    #[test]
    fn insets_match_chrome_bands() {
        assert_eq!(render(FrameType::None, false, false).1, 0.0);
        assert_eq!(render(FrameType::Browser, false, false).1, 32.0);
        assert_eq!(render(FrameType::Desktop, false, false).1, 28.0);
        assert_eq!(render(FrameType::Mobile, false, false).1, 0.0);
    }

    #[test]
    fn none_paints_nothing() {
        let (data, _) = render(FrameType::None, false, false);
        assert!(data.iter().all(|&b| b == 0));
    }

    #[test]
    fn browser_header_and_body_use_palette() {
        let (data, _) = render(FrameType::Browser, true, false);
        // Inside the header band, above the dot row.
        assert_eq!(px(&data, 70, 22), [0x2d, 0x2d, 0x2d, 255]);
        // Body below the header.
        assert_eq!(px(&data, 70, 80), [0x1e, 0x1e, 0x1e, 255]);

        let (light, _) = render(FrameType::Browser, false, false);
        assert_eq!(px(&light, 70, 80), [0xff, 0xff, 0xff, 255]);
    }

    #[test]
    fn traffic_dots_are_fixed_across_modes() {
        for dark in [false, true] {
            let (data, _) = render(FrameType::Browser, dark, false);
            // First dot center: (frame.x0 + 16, frame.y0 + 10) = (36, 30).
            assert_eq!(px(&data, 36, 30), [0xff, 0x5f, 0x56, 255], "dark={dark}");
        }
        let (desk, _) = render(FrameType::Desktop, false, false);
        // Desktop first dot: (frame.x0 + 14, frame.y0 + 14) = (34, 34).
        assert_eq!(px(&desk, 34, 34), [0xff, 0x5f, 0x56, 255]);
    }

    #[test]
    fn narrow_browser_frame_skips_url_bar() {
        let style = ChromeStyle {
            corner_radius: 4.0,
            dark_mode: false,
        };
        let frame = Rect::new(10.0, 10.0, 150.0, 80.0); // width 140 < 160
        let pm = raster::rasterize(160, 160, |ctx| {
            paint_browser(ctx, frame, &style);
            Ok(())
        })
        .unwrap();
        let data = pm.data_as_u8_slice();
        // Where the url bar would sit, the header color shows instead.
        let idx = ((18usize) * 160 + 95) * 4;
        assert_eq!(&data[idx..idx + 3], &[0xf5, 0xf5, 0xf5]);
    }

    #[test]
    fn mobile_bezel_extends_beyond_frame() {
        let (data, _) = render(FrameType::Mobile, true, false);
        // 6px outside the frame edge is still bezel.
        assert_eq!(px(&data, 14, 60), [0x1a, 0x1a, 0x1a, 255]);
        // Notch sits centered at the top bezel edge.
        assert_eq!(px(&data, 80, 20), [0x1a, 0x1a, 0x1a, 255]);
    }

    #[test]
    fn desktop_shadow_spills_outside_body() {
        let (with_shadow, _) = render(FrameType::Desktop, false, true);
        let (without, _) = render(FrameType::Desktop, false, false);
        // Just below the body there is shadow energy only in the shadowed render.
        let below = px(&with_shadow, 80, 114);
        assert!(below[3] > 0);
        assert_eq!(px(&without, 80, 114)[3], 0);
    }
}
