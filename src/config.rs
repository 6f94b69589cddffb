//! Window, brush and output settings parsed from environment variables.

use std::path::PathBuf;

use crate::board::SnapshotTiming;
use crate::error::Error;
use crate::types::{Color, StrokeStyle};

pub const DEFAULT_WINDOW_WIDTH: usize = 800;
pub const DEFAULT_WINDOW_HEIGHT: usize = 600;
pub const DEFAULT_OUTPUT_DIR: &str = "paintings";
pub const DEFAULT_BRUSH_WIDTH: f32 = 20.0;
pub const DEFAULT_BRUSH_COLOR: Color = Color::GRAY;
pub const DEFAULT_BACKGROUND: Color = Color::WHITE;

#[derive(Debug, Clone, PartialEq)]
pub struct PaintConfig {
    pub width: usize,
    pub height: usize,
    pub output_dir: PathBuf,
    pub brush: StrokeStyle,
    pub background: Color,
    pub timing: SnapshotTiming,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            brush: StrokeStyle { width: DEFAULT_BRUSH_WIDTH, color: DEFAULT_BRUSH_COLOR, blur: None },
            background: DEFAULT_BACKGROUND,
            timing: SnapshotTiming::Legacy,
        }
    }
}

impl PaintConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `PAINT_WIDTH` / `PAINT_HEIGHT`: window size, default 800x600
    /// - `PAINT_OUTPUT_DIR`: where PNGs go, default `paintings`
    /// - `PAINT_BRUSH_WIDTH`: default 20
    /// - `PAINT_BRUSH_COLOR`: `#AARRGGBB` or `#RRGGBB`, default gray
    /// - `PAINT_BACKGROUND`: same format, default white
    /// - `PAINT_SNAPSHOT`: `legacy` (default) or `end`
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let width = parse_or("PAINT_WIDTH", &lookup, defaults.width, parse_dimension)?;
        let height = parse_or("PAINT_HEIGHT", &lookup, defaults.height, parse_dimension)?;
        let output_dir = lookup("PAINT_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let brush_width = parse_or("PAINT_BRUSH_WIDTH", &lookup, defaults.brush.width, parse_brush_width)?;
        let brush_color = parse_or("PAINT_BRUSH_COLOR", &lookup, defaults.brush.color, parse_color)?;
        let background = parse_or("PAINT_BACKGROUND", &lookup, defaults.background, parse_color)?;
        let timing = parse_or("PAINT_SNAPSHOT", &lookup, defaults.timing, parse_timing)?;

        Ok(Self {
            width,
            height,
            output_dir,
            brush: StrokeStyle { width: brush_width, color: brush_color, blur: None },
            background,
            timing,
        })
    }
}

fn parse_or<T, F, P>(key: &str, lookup: &F, default: T, parse: P) -> Result<T, Error>
where
    F: Fn(&str) -> Option<String>,
    P: Fn(&str) -> Option<T>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => parse(raw.trim()).ok_or_else(|| Error::Config(format!("{key}: invalid value {raw:?}"))),
    }
}

fn parse_dimension(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|v| (1..=16_384).contains(v))
}

fn parse_brush_width(raw: &str) -> Option<f32> {
    raw.parse::<f32>().ok().filter(|w| w.is_finite() && *w > 0.0)
}

/// `#AARRGGBB` or `#RRGGBB` (opaque). The leading `#` is optional.
pub fn parse_color(raw: &str) -> Option<Color> {
    let hex = raw.strip_prefix('#').unwrap_or(raw);
    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        8 => Some(Color(value)),
        6 => Some(Color(0xFF_00_00_00 | value)),
        _ => None,
    }
}

fn parse_timing(raw: &str) -> Option<SnapshotTiming> {
    match raw.to_ascii_lowercase().as_str() {
        "legacy" | "next-start" => Some(SnapshotTiming::Legacy),
        "end" | "at-end" => Some(SnapshotTiming::AtEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = PaintConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, PaintConfig::default());
        assert_eq!(cfg.brush.width, 20.0);
        assert_eq!(cfg.brush.color, Color(0xFF_88_88_88));
        assert_eq!(cfg.timing, SnapshotTiming::Legacy);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = PaintConfig::from_lookup(lookup(&[
            ("PAINT_WIDTH", "320"),
            ("PAINT_HEIGHT", " 200 "),
            ("PAINT_OUTPUT_DIR", "/tmp/art"),
            ("PAINT_BRUSH_WIDTH", "7.5"),
            ("PAINT_BRUSH_COLOR", "#112233"),
            ("PAINT_BACKGROUND", "80FFFFFF"),
            ("PAINT_SNAPSHOT", "END"),
        ]))
        .unwrap();
        assert_eq!((cfg.width, cfg.height), (320, 200));
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/art"));
        assert_eq!(cfg.brush.width, 7.5);
        assert_eq!(cfg.brush.color, Color(0xFF_11_22_33));
        assert_eq!(cfg.background, Color(0x80_FF_FF_FF));
        assert_eq!(cfg.timing, SnapshotTiming::AtEnd);
    }

    #[test]
    fn bad_values_name_the_variable() {
        for (key, value) in [
            ("PAINT_WIDTH", "0"),
            ("PAINT_HEIGHT", "tall"),
            ("PAINT_BRUSH_WIDTH", "-3"),
            ("PAINT_BRUSH_COLOR", "#12345"),
            ("PAINT_SNAPSHOT", "sometimes"),
        ] {
            let err = PaintConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(err.to_string().contains(key), "{err}");
        }
    }

    #[test]
    fn color_parsing() {
        assert_eq!(parse_color("#FF000000"), Some(Color::BLACK));
        assert_eq!(parse_color("ffffff"), Some(Color::WHITE));
        assert_eq!(parse_color("#GG0000"), None);
        assert_eq!(parse_color(""), None);
    }
}
