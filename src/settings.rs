use crate::{
    color,
    error::{ScreencraftError, ScreencraftResult},
};

/// Largest canvas edge accepted by `validate`, kept well inside the u16
/// surface extent of the CPU raster backend.
pub const MAX_CANVAS_DIM: u32 = 16_384;

/// Largest blur/shadow radius accepted by `validate`. A kernel wider than
/// the canvas can ever be buys nothing and its cost grows without bound.
pub const MAX_EFFECT_RADIUS: f64 = MAX_CANVAS_DIM as f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    Solid,
    Gradient,
    Blurred,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    None,
    Browser,
    Desktop,
    Mobile,
}

impl FrameType {
    /// Vertical pixels reserved by the chrome before image content starts.
    ///
    /// Mobile reserves nothing: its bezel and notch live outside the content
    /// box.
    pub fn content_inset(self) -> f64 {
        match self {
            FrameType::Browser => 32.0,
            FrameType::Desktop => 28.0,
            FrameType::None | FrameType::Mobile => 0.0,
        }
    }

    /// Desktop and mobile chrome paint their own shadow around the window
    /// body / bezel; the pipeline must not add an external one.
    pub fn manages_own_shadow(self) -> bool {
        matches!(self, FrameType::Desktop | FrameType::Mobile)
    }
}

/// Immutable per-render settings record.
///
/// Always fully populated; hosts replace the whole value on every edit rather
/// than merging fields, which keeps the compositor a pure function of
/// `(settings, source)`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub corner_radius: u32,
    pub shadow_intensity: f64,
    pub shadow_enabled: bool,
    pub background_type: BackgroundType,
    pub background_color: String,
    pub gradient_start: String,
    pub gradient_end: String,
    /// Linear gradient axis in degrees; projected onto the canvas via
    /// `(w*cos, h*sin)`.
    pub gradient_direction: f64,
    pub blur_amount: f64,
    pub frame_type: FrameType,
    pub frame_dark_mode: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 560,
            padding: 40,
            corner_radius: 12,
            shadow_intensity: 20.0,
            shadow_enabled: true,
            background_type: BackgroundType::Gradient,
            background_color: "#1e293b".to_string(),
            gradient_start: "#3B82F6".to_string(),
            gradient_end: "#8B5CF6".to_string(),
            gradient_direction: 135.0,
            blur_amount: 20.0,
            frame_type: FrameType::Browser,
            frame_dark_mode: false,
        }
    }
}

impl CanvasSettings {
    pub fn validate(&self) -> ScreencraftResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ScreencraftError::validation(
                "canvas width/height must be > 0",
            ));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(ScreencraftError::validation(format!(
                "canvas width/height must be <= {MAX_CANVAS_DIM}"
            )));
        }
        if !self.shadow_intensity.is_finite()
            || self.shadow_intensity < 0.0
            || self.shadow_intensity > MAX_EFFECT_RADIUS
        {
            return Err(ScreencraftError::validation(format!(
                "shadowIntensity must be in 0..={MAX_EFFECT_RADIUS}"
            )));
        }
        if !self.blur_amount.is_finite()
            || self.blur_amount < 0.0
            || self.blur_amount > MAX_EFFECT_RADIUS
        {
            return Err(ScreencraftError::validation(format!(
                "blurAmount must be in 0..={MAX_EFFECT_RADIUS}"
            )));
        }
        if !self.gradient_direction.is_finite() {
            return Err(ScreencraftError::validation(
                "gradientDirection must be finite",
            ));
        }
        color::parse_hex(&self.background_color)?;
        color::parse_hex(&self.gradient_start)?;
        color::parse_hex(&self.gradient_end)?;
        Ok(())
    }

    /// Replace every field with the built-in defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn apply_canvas_preset(&mut self, preset: &CanvasPreset) {
        self.width = preset.width;
        self.height = preset.height;
    }

    pub fn apply_gradient_preset(&mut self, preset: &GradientPreset) {
        self.gradient_start = preset.start.to_string();
        self.gradient_end = preset.end.to_string();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetCategory {
    ChromeWebStore,
    Social,
    Custom,
}

/// Named output-canvas size, exposed as static reference data for hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasPreset {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub category: PresetCategory,
}

pub const CANVAS_PRESETS: &[CanvasPreset] = &[
    CanvasPreset {
        name: "Chrome Web Store Marquee",
        width: 1400,
        height: 560,
        category: PresetCategory::ChromeWebStore,
    },
    CanvasPreset {
        name: "Chrome Web Store Screenshot",
        width: 1280,
        height: 800,
        category: PresetCategory::ChromeWebStore,
    },
    CanvasPreset {
        name: "Twitter/X Post",
        width: 1200,
        height: 675,
        category: PresetCategory::Social,
    },
    CanvasPreset {
        name: "Instagram Post",
        width: 1080,
        height: 1080,
        category: PresetCategory::Social,
    },
    CanvasPreset {
        name: "Instagram Story",
        width: 1080,
        height: 1920,
        category: PresetCategory::Social,
    },
    CanvasPreset {
        name: "LinkedIn Post",
        width: 1200,
        height: 627,
        category: PresetCategory::Social,
    },
    CanvasPreset {
        name: "Dribbble Shot",
        width: 1600,
        height: 1200,
        category: PresetCategory::Social,
    },
    CanvasPreset {
        name: "Product Hunt",
        width: 1270,
        height: 760,
        category: PresetCategory::Social,
    },
];

/// Named gradient color pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientPreset {
    pub start: &'static str,
    pub end: &'static str,
    pub name: &'static str,
}

pub const GRADIENT_PRESETS: &[GradientPreset] = &[
    GradientPreset {
        start: "#3B82F6",
        end: "#8B5CF6",
        name: "Blue to Purple",
    },
    GradientPreset {
        start: "#10B981",
        end: "#3B82F6",
        name: "Green to Blue",
    },
    GradientPreset {
        start: "#F59E0B",
        end: "#EF4444",
        name: "Amber to Red",
    },
    GradientPreset {
        start: "#EC4899",
        end: "#8B5CF6",
        name: "Pink to Purple",
    },
    GradientPreset {
        start: "#06B6D4",
        end: "#3B82F6",
        name: "Cyan to Blue",
    },
    GradientPreset {
        start: "#84CC16",
        end: "#10B981",
        name: "Lime to Green",
    },
];

/// Case-insensitive canvas preset lookup by display name.
pub fn canvas_preset(name: &str) -> Option<&'static CanvasPreset> {
    CANVAS_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        CanvasSettings::default().validate().unwrap();
    }

    #[test]
    fn reset_is_idempotent() {
        let mut s = CanvasSettings::default();
        s.width = 64;
        s.frame_type = FrameType::Mobile;
        s.reset();
        let once = s.clone();
        s.reset();
        assert_eq!(s, once);
        assert_eq!(s, CanvasSettings::default());
    }

    #[test]
    fn serde_uses_camel_case_field_names() {
        let s = CanvasSettings::default();
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["cornerRadius"], 12);
        assert_eq!(v["backgroundType"], "gradient");
        assert_eq!(v["frameType"], "browser");
        assert_eq!(v["frameDarkMode"], false);

        let back: CanvasSettings = serde_json::from_value(v).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let mut s = CanvasSettings::default();
        s.width = 0;
        assert!(s.validate().is_err());

        let mut s = CanvasSettings::default();
        s.height = MAX_CANVAS_DIM + 1;
        assert!(s.validate().is_err());

        let mut s = CanvasSettings::default();
        s.shadow_intensity = f64::NAN;
        assert!(s.validate().is_err());

        let mut s = CanvasSettings::default();
        s.gradient_start = "#nope".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_caps_effect_radii() {
        let mut s = CanvasSettings::default();
        s.shadow_intensity = 5.0e9;
        assert!(s.validate().is_err());

        let mut s = CanvasSettings::default();
        s.blur_amount = 1.0e8;
        assert!(s.validate().is_err());

        let mut s = CanvasSettings::default();
        s.shadow_intensity = MAX_EFFECT_RADIUS;
        s.blur_amount = MAX_EFFECT_RADIUS;
        s.validate().unwrap();
    }

    #[test]
    fn content_inset_table() {
        assert_eq!(FrameType::None.content_inset(), 0.0);
        assert_eq!(FrameType::Browser.content_inset(), 32.0);
        assert_eq!(FrameType::Desktop.content_inset(), 28.0);
        assert_eq!(FrameType::Mobile.content_inset(), 0.0);
    }

    #[test]
    fn preset_lookup_is_case_insensitive() {
        let p = canvas_preset("chrome web store marquee").unwrap();
        assert_eq!((p.width, p.height), (1400, 560));
        assert!(canvas_preset("no such preset").is_none());
    }

    #[test]
    fn preset_tables_are_complete() {
        assert_eq!(CANVAS_PRESETS.len(), 8);
        assert_eq!(GRADIENT_PRESETS.len(), 6);
        for p in GRADIENT_PRESETS {
            crate::color::parse_hex(p.start).unwrap();
            crate::color::parse_hex(p.end).unwrap();
        }
    }
}
