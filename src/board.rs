// Stroke history + live brush. Replays history onto any Surface.
// Visual: what you see each frame is exactly `render` over the background,
// plus the stroke under your finger from `render_preview`.

use tracing::{debug, info, warn};

use crate::recorder::{GesturePhase, StrokeRecord, StrokeRecorder};
use crate::render::Surface;
use crate::types::{BlurFilter, BlurStyle, Color, FrameBuffer, StrokeStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self { phase, x, y }
    }
}

/// When a finished gesture becomes a StrokeRecord, and which brush it gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotTiming {
    /// Archived when the *next* gesture starts, with the brush of that moment.
    #[default]
    Legacy,
    /// Archived on pointer-up, with the brush of that moment.
    AtEnd,
}

pub struct Board {
    strokes: Vec<StrokeRecord>,
    recorder: StrokeRecorder,
    brush: StrokeStyle,
    timing: SnapshotTiming,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(StrokeStyle::default(), SnapshotTiming::default())
    }
}

impl Board {
    pub fn new(brush: StrokeStyle, timing: SnapshotTiming) -> Self {
        Self { strokes: Vec::new(), recorder: StrokeRecorder::new(), brush, timing }
    }

    pub fn strokes(&self) -> &[StrokeRecord] { &self.strokes }
    pub fn brush(&self) -> &StrokeStyle { &self.brush }
    #[cfg(test)]
    pub fn recorder(&self) -> &StrokeRecorder { &self.recorder }

    /// Feed one pointer event. Returns true when the view should repaint.
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        if !event.x.is_finite() || !event.y.is_finite() {
            warn!(?event, "ignoring pointer event with non-finite coordinates");
            return false;
        }
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.x, event.y),
            PointerPhase::Move => self.pointer_move(event.x, event.y),
            PointerPhase::Up => self.pointer_up(event.x, event.y),
        }
        true
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        let brush = self.brush;
        // Under AtEnd the recorder is already empty here unless a gesture never saw pointer-up.
        if let Some(record) = self.recorder.take_record(&brush) {
            self.push(record);
        }
        self.recorder.start(x, y);
        debug!(x, y, "gesture start");
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.recorder.drag(x, y);
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if !self.recorder.end(x, y) {
            return;
        }
        debug!(x, y, "gesture end");
        if self.timing == SnapshotTiming::AtEnd {
            let brush = self.brush;
            if let Some(record) = self.recorder.take_record(&brush) {
                self.push(record);
            }
        }
    }

    /// Archive a finished gesture that is still waiting for the next pointer-down.
    /// Does nothing mid-gesture. Returns true if a record was added.
    pub fn commit_pending(&mut self) -> bool {
        if self.recorder.phase() != GesturePhase::Idle {
            return false;
        }
        let brush = self.brush;
        match self.recorder.take_record(&brush) {
            Some(record) => {
                self.push(record);
                true
            }
            None => false,
        }
    }

    fn push(&mut self, record: StrokeRecord) {
        debug!(
            segments = record.path().segment_count(),
            width = record.style().width,
            color = format_args!("{:#010X}", record.style().color.0),
            "stroke archived"
        );
        self.strokes.push(record);
    }

    pub fn set_brush_width(&mut self, width: f32) {
        if !(width > 0.0) || !width.is_finite() {
            warn!(width, "ignoring non-positive brush width");
            return;
        }
        self.brush.width = width;
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.color = color;
    }

    /// Blur radius follows the brush width at the moment the blur is chosen.
    pub fn set_brush_blur(&mut self, style: Option<BlurStyle>) {
        self.brush.blur = style.map(|style| BlurFilter { radius: self.brush.width, style });
    }

    /// Drop the newest stroke. Empty history is a no-op (returns false).
    pub fn undo(&mut self) -> bool {
        match self.strokes.pop() {
            Some(_) => {
                debug!(remaining = self.strokes.len(), "undo");
                true
            }
            None => false,
        }
    }

    /// Forget every stroke and the gesture in progress. The brush stays.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.recorder.reset();
        info!("board cleared");
    }

    /// Replay history, oldest first, so newer strokes land on top.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for record in &self.strokes {
            surface.draw_stroke(record.path(), record.style());
        }
    }

    /// Draw the path the recorder is holding with the live brush.
    pub fn render_preview<S: Surface + ?Sized>(&self, surface: &mut S) {
        if let Some(path) = self.recorder.path() {
            surface.draw_stroke(path, &self.brush);
        }
    }

    /// Replay history onto a fresh opaque buffer, e.g. for export.
    /// Whatever is still held by the recorder is not part of the image.
    pub fn flatten_to_image(&self, width: usize, height: usize, background: Color) -> FrameBuffer {
        let mut fb = FrameBuffer::new(width, height, background);
        self.render(&mut fb);
        fb
    }
}
