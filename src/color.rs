use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour themes for the charts
// ---------------------------------------------------------------------------

/// Chart colour theme, user-selectable in the sidebar. Each theme is a
/// single-hue sequential scale sampled from light to dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTheme {
    #[default]
    Blues,
    Greens,
    Reds,
    Purples,
    Greys,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::Blues,
        ColorTheme::Greens,
        ColorTheme::Reds,
        ColorTheme::Purples,
        ColorTheme::Greys,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColorTheme::Blues => "Blues",
            ColorTheme::Greens => "Greens",
            ColorTheme::Reds => "Reds",
            ColorTheme::Purples => "Purples",
            ColorTheme::Greys => "Greys",
        }
    }

    fn hue_saturation(&self) -> (f32, f32) {
        match self {
            ColorTheme::Blues => (215.0, 0.75),
            ColorTheme::Greens => (140.0, 0.6),
            ColorTheme::Reds => (5.0, 0.75),
            ColorTheme::Purples => (280.0, 0.55),
            ColorTheme::Greys => (0.0, 0.0),
        }
    }

    /// Sample the scale at `t` in [0, 1]: 0 is the light end, 1 the dark end.
    pub fn sample(&self, t: f64) -> Color32 {
        let t = t.clamp(0.0, 1.0) as f32;
        let (hue, saturation) = self.hue_saturation();
        let lightness = 0.92 - t * 0.58;
        let hsl = Hsl::new(hue, saturation, lightness);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }

    /// Strong colour from the dark end, for bars and the survived series.
    pub fn accent(&self) -> Color32 {
        self.sample(0.85)
    }

    /// Muted counterpart, for the died series.
    pub fn muted(&self) -> Color32 {
        self.sample(0.35)
    }

    /// Readable text colour on top of a sampled cell.
    pub fn text_on(&self, t: f64) -> Color32 {
        if t < 0.55 {
            Color32::from_gray(25)
        } else {
            Color32::WHITE
        }
    }
}
