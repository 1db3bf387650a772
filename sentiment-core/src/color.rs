//! Score → color mapping.
//!
//! Three scales share the same anchors:
//! - **Signed** (−10..10): red → yellow → green, split at 0.
//! - **Unsigned** (0..10): yellow → green; negative scores clamp to yellow.
//! - **Heatmap** (0..10): red → yellow → green, split at 5.
//!
//! Interpolation is per RGB channel and rounded. Out-of-range scores clamp
//! to the nearest anchor and NaN maps to yellow, so every scale is total.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// `#ff4b4b`
pub const RED: Rgb = Rgb::new(255, 75, 75);
/// `#faca2b`
pub const YELLOW: Rgb = Rgb::new(250, 202, 43);
/// `#09ab3b`
pub const GREEN: Rgb = Rgb::new(9, 171, 59);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `end`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, end: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let channel = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round() as u8
        };
        Rgb::new(
            channel(self.r, end.r),
            channel(self.g, end.g),
            channel(self.b, end.b),
        )
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Which score range a caller's scores live in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// −10..10, red at the bottom.
    #[default]
    Signed,
    /// 0..10, yellow at the bottom.
    Unsigned,
    /// 0..10, red at the bottom.
    Heatmap,
}

impl ColorScale {
    pub fn rgb(&self, score: f64) -> Rgb {
        match self {
            ColorScale::Signed => sentiment_rgb(score),
            ColorScale::Unsigned => health_rgb(score),
            ColorScale::Heatmap => heatmap_rgb(score),
        }
    }

    pub fn color(&self, score: f64) -> String {
        self.rgb(score).to_hex()
    }
}

/// Signed scale as an [`Rgb`].
pub fn sentiment_rgb(score: f64) -> Rgb {
    if score.is_nan() {
        return YELLOW;
    }
    if score < 0.0 {
        RED.lerp(YELLOW, (score + 10.0) / 10.0)
    } else {
        YELLOW.lerp(GREEN, score / 10.0)
    }
}

/// Signed scale: −10 red, 0 yellow, +10 green.
pub fn sentiment_color(score: f64) -> String {
    sentiment_rgb(score).to_hex()
}

/// Unsigned scale as an [`Rgb`].
pub fn health_rgb(score: f64) -> Rgb {
    YELLOW.lerp(GREEN, score / 10.0)
}

/// Unsigned scale: 0 yellow, 10 green.
pub fn health_color(score: f64) -> String {
    health_rgb(score).to_hex()
}

/// Heatmap scale as an [`Rgb`]: the signed scale stretched over 0..10.
pub fn heatmap_rgb(score: f64) -> Rgb {
    sentiment_rgb(score * 2.0 - 10.0)
}

/// Heatmap scale: 0 red, 5 yellow, 10 green.
pub fn heatmap_color(score: f64) -> String {
    heatmap_rgb(score).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_are_exact() {
        assert_eq!(sentiment_color(-10.0), "#ff4b4b");
        assert_eq!(sentiment_color(0.0), "#faca2b");
        assert_eq!(sentiment_color(10.0), "#09ab3b");
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(sentiment_color(-55.0), "#ff4b4b");
        assert_eq!(sentiment_color(1e9), "#09ab3b");
        assert_eq!(sentiment_color(f64::NEG_INFINITY), "#ff4b4b");
        assert_eq!(sentiment_color(f64::INFINITY), "#09ab3b");
        assert_eq!(sentiment_color(f64::NAN), "#faca2b");
    }

    #[test]
    fn midpoints_round_per_channel() {
        // (250 + 9) / 2 = 129.5, (202 + 171) / 2 = 186.5, (43 + 59) / 2 = 51
        assert_eq!(sentiment_rgb(5.0), Rgb::new(130, 187, 51));
        // (255 + 250) / 2 = 252.5, (75 + 202) / 2 = 138.5, (75 + 43) / 2 = 59
        assert_eq!(sentiment_rgb(-5.0), Rgb::new(253, 139, 59));
    }

    #[test]
    fn unsigned_scale_ignores_negatives() {
        assert_eq!(health_color(-3.0), "#faca2b");
        assert_eq!(health_color(0.0), "#faca2b");
        assert_eq!(health_color(10.0), "#09ab3b");
        assert_eq!(health_color(5.0), sentiment_color(5.0));
    }

    #[test]
    fn heatmap_scale_spans_red_to_green() {
        assert_eq!(heatmap_color(0.0), "#ff4b4b");
        assert_eq!(heatmap_color(5.0), "#faca2b");
        assert_eq!(heatmap_color(10.0), "#09ab3b");
        assert_eq!(heatmap_rgb(2.5), sentiment_rgb(-5.0));
        assert_eq!(heatmap_color(-1.0), "#ff4b4b");
        assert_eq!(heatmap_color(f64::NAN), "#faca2b");
    }

    #[test]
    fn color_scale_dispatch() {
        assert_eq!(ColorScale::Signed.color(-10.0), "#ff4b4b");
        assert_eq!(ColorScale::Unsigned.color(-10.0), "#faca2b");
        assert_eq!(ColorScale::Heatmap.color(0.0), "#ff4b4b");
    }

    #[test]
    fn display_matches_hex() {
        assert_eq!(GREEN.to_string(), GREEN.to_hex());
    }
}
