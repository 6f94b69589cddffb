// The seam between stroke history and pixels.
// Anything that can fill itself and stroke a path can be painted on.

use crate::path::StrokePath;
use crate::raster;
use crate::types::{Color, FrameBuffer, StrokeStyle};

pub trait Surface {
    /// Paint every pixel with `color`.
    fn fill(&mut self, color: Color);
    /// Stroke `path` using `style` (width, color, blur).
    fn draw_stroke(&mut self, path: &StrokePath, style: &StrokeStyle);
}

impl Surface for FrameBuffer {
    fn fill(&mut self, color: Color) {
        self.pixels.fill(color.rgb());
    }

    fn draw_stroke(&mut self, path: &StrokePath, style: &StrokeStyle) {
        raster::draw_stroke(self, path, style);
    }
}
