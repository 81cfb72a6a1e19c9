use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: hue group → Color32
// ---------------------------------------------------------------------------

/// Maps the hue groups of one chart to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    colors: Vec<Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for `n_groups` hue groups.
    ///
    /// An ungrouped chart (one group) gets a single neutral blue.
    pub fn new(n_groups: usize) -> Self {
        let colors = if n_groups <= 1 {
            vec![Color32::LIGHT_BLUE]
        } else {
            generate_palette(n_groups)
        };
        ColorMap {
            colors,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given group index.
    pub fn color_for(&self, group: usize) -> Color32 {
        self.colors
            .get(group)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (hue label → colour) for the UI.
    pub fn legend_entries<'a>(&self, labels: &'a [String]) -> Vec<(&'a str, Color32)> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.as_str(), self.color_for(i)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Heat map colouring
// ---------------------------------------------------------------------------

/// Sequential light-to-dark colour for `value` within `[lo, hi]`.
///
/// NaN (and a degenerate range) gets a flat grey.
pub fn heat_color(value: f64, lo: f64, hi: f64) -> Color32 {
    if !value.is_finite() {
        return Color32::from_gray(200);
    }
    let t = if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0) as f32
    } else {
        0.5
    };
    let hue = 200.0 + 70.0 * t;
    let lightness = 0.93 - 0.68 * t;
    hsl_to_color32(Hsl::new(hue, 0.55, lightness))
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32
        + 0.587 * background.g() as f32
        + 0.114 * background.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_group_falls_back_to_default() {
        let map = ColorMap::new(3);
        assert_eq!(map.color_for(7), Color32::GRAY);
        let labels = vec!["S".to_string(), "M".to_string()];
        assert_eq!(map.legend_entries(&labels)[1].1, map.color_for(1));
    }

    #[test]
    fn heat_scale_darkens_with_value() {
        let low = heat_color(0.0, 0.0, 1.0);
        let high = heat_color(1.0, 0.0, 1.0);
        assert_eq!(contrast_text(low), Color32::BLACK);
        assert_eq!(contrast_text(high), Color32::WHITE);
        assert_eq!(heat_color(f64::NAN, 0.0, 1.0), Color32::from_gray(200));
    }
}
