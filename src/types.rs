// Core types shared by the recorder, the board and the rasterizer.

/// Packed 0xAARRGGBB color, the same layout brush pickers hand us.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FF_FF_FF);
    pub const BLACK: Color = Color(0xFF_00_00_00);
    pub const GRAY: Color = Color(0xFF_88_88_88);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline] pub fn alpha(self) -> u8 { (self.0 >> 24) as u8 }
    #[inline] pub fn red(self) -> u8 { (self.0 >> 16) as u8 }
    #[inline] pub fn green(self) -> u8 { (self.0 >> 8) as u8 }
    #[inline] pub fn blue(self) -> u8 { self.0 as u8 }

    /// Drop alpha: 0x00RRGGBB, the pixel layout minifb wants.
    #[inline]
    pub fn rgb(self) -> u32 {
        self.0 & 0x00_FF_FF_FF
    }
}

/// How a blurred stroke mask is combined with its sharp original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurStyle {
    /// Fuzzy inside and outside the stroke.
    Normal,
    /// Solid inside, fuzzy outside.
    Solid,
    /// Nothing inside, fuzzy outside.
    Outer,
    /// Fuzzy inside, nothing outside.
    Inner,
}

impl BlurStyle {
    pub fn label(self) -> &'static str {
        match self {
            BlurStyle::Normal => "NORMAL",
            BlurStyle::Solid => "SOLID",
            BlurStyle::Outer => "OUTER",
            BlurStyle::Inner => "INNER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurFilter {
    pub radius: f32,
    pub style: BlurStyle,
}

/// Width, color and optional blur: everything a stroke needs besides its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: Color,
    pub blur: Option<BlurFilter>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self { width: 20.0, color: Color::GRAY, blur: None }
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// Opaque buffer filled with `background`.
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self { width, height, pixels: vec![background.rgb(); width * height] }
    }

    /// Expand to tightly packed RGB8 bytes, row-major (what the PNG encoder wants).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            out.push(((px >> 16) & 0xFF) as u8);
            out.push(((px >> 8) & 0xFF) as u8);
            out.push((px & 0xFF) as u8);
        }
        out
    }
}

/// Coverage in [0,1] per pixel for one stroke, placed at (x0, y0) on the target.
/// Only the stroke's bounding box is allocated.
pub struct Mask {
    pub x0: i32,
    pub y0: i32,
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,   // length = width * height, values clamped to [0.0, 1.0]
}

impl Mask {
    pub fn new(x0: i32, y0: i32, width: usize, height: usize) -> Self {
        Self { x0, y0, width, height, alpha: vec![0.0; width * height] }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
