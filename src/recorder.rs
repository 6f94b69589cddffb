// Turns pointer samples into a smoothed quadratic path, one gesture at a time.
// Visual: small wobbles under TOUCH_TOLERANCE are swallowed, bigger moves become
// curves through the midpoints between samples.

use crate::path::StrokePath;
use crate::types::StrokeStyle;

/// Minimum pointer travel (either axis) before a new curve segment is added.
pub const TOUCH_TOLERANCE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Drawing,
}

/// A finished stroke: path plus the style it was frozen with.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeRecord {
    path: StrokePath,
    style: StrokeStyle,
}

impl StrokeRecord {
    pub fn new(path: StrokePath, style: StrokeStyle) -> Self {
        Self { path, style }
    }

    pub fn path(&self) -> &StrokePath { &self.path }
    pub fn style(&self) -> &StrokeStyle { &self.style }
}

pub struct StrokeRecorder {
    path: Option<StrokePath>, // None until the first gesture, and after clear
    anchor: (f32, f32),       // last accepted sample; the next quad's control point
    phase: GesturePhase,
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self { path: None, anchor: (0.0, 0.0), phase: GesturePhase::Idle }
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The path being built (or finished but not yet archived).
    pub fn path(&self) -> Option<&StrokePath> {
        self.path.as_ref()
    }

    /// Begin a gesture at (x, y), replacing whatever path was held. Callers archive
    /// the old one first with `take_record`.
    pub fn start(&mut self, x: f32, y: f32) {
        let mut fresh = StrokePath::new();
        fresh.move_to(x, y);
        self.anchor = (x, y);
        self.phase = GesturePhase::Drawing;
        self.path = Some(fresh);
    }

    /// Extend the gesture. Returns true if a segment was added.
    pub fn drag(&mut self, x: f32, y: f32) -> bool {
        if self.phase != GesturePhase::Drawing {
            return false;
        }
        let Some(path) = self.path.as_mut() else { return false };

        let (ax, ay) = self.anchor;
        let dx = (x - ax).abs();
        let dy = (y - ay).abs();
        if dx < TOUCH_TOLERANCE && dy < TOUCH_TOLERANCE {
            return false; // jitter
        }

        path.quad_to(ax, ay, (x + ax) / 2.0, (y + ay) / 2.0);
        self.anchor = (x, y);
        true
    }

    /// Finish the gesture with a straight run to (x, y).
    pub fn end(&mut self, x: f32, y: f32) -> bool {
        if self.phase != GesturePhase::Drawing {
            return false;
        }
        self.phase = GesturePhase::Idle;
        match self.path.as_mut() {
            Some(path) => {
                path.line_to(x, y);
                true
            }
            None => false,
        }
    }

    /// Freeze the held path with `style` and release it. Empty paths give nothing.
    pub fn take_record(&mut self, style: &StrokeStyle) -> Option<StrokeRecord> {
        self.path
            .take()
            .filter(|p| !p.is_empty())
            .map(|p| StrokeRecord::new(p, *style))
    }

    /// Drop whatever is in progress.
    pub fn reset(&mut self) {
        self.path = None;
        self.phase = GesturePhase::Idle;
    }
}
