// Open vector paths built from pointer samples.
// A path is a list of commands; tiny-skia turns it into outlines for the rasterizer.

use tiny_skia::{Path, PathBuilder};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo { x: f32, y: f32 },
    QuadTo { x1: f32, y1: f32, x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokePath {
    commands: Vec<PathCmd>,
}

impl StrokePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCmd::MoveTo { x, y });
    }

    /// Curve from the current point through control (x1, y1) to (x, y).
    pub fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.ensure_started(x1, y1);
        self.commands.push(PathCmd::QuadTo { x1, y1, x, y });
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.ensure_started(x, y);
        self.commands.push(PathCmd::LineTo { x, y });
    }

    pub fn commands(&self) -> &[PathCmd] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of drawn segments (everything except move-to).
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| !matches!(c, PathCmd::MoveTo { .. }))
            .count()
    }

    /// Build the tiny-skia path the rasterizer strokes. A lone move-to gives None.
    pub fn to_skia_path(&self) -> Option<Path> {
        let mut pb = PathBuilder::new();
        for cmd in &self.commands {
            match *cmd {
                PathCmd::MoveTo { x, y } => pb.move_to(x, y),
                PathCmd::QuadTo { x1, y1, x, y } => pb.quad_to(x1, y1, x, y),
                PathCmd::LineTo { x, y } => pb.line_to(x, y),
            }
        }
        pb.finish()
    }

    /// The one point every command sits on, for taps that never moved.
    pub fn single_point(&self) -> Option<(f32, f32)> {
        if self.segment_count() == 0 {
            return None;
        }
        let mut points = self.commands.iter().flat_map(|c| match *c {
            PathCmd::MoveTo { x, y } | PathCmd::LineTo { x, y } => [(x, y), (x, y)],
            PathCmd::QuadTo { x1, y1, x, y } => [(x1, y1), (x, y)],
        });
        let first = points.next()?;
        points.all(|p| p == first).then_some(first)
    }

    // Skia treats a leading line/quad as if preceded by move-to(0,0); we'd rather
    // start at the first point we were given.
    fn ensure_started(&mut self, x: f32, y: f32) {
        if self.commands.is_empty() {
            self.commands.push(PathCmd::MoveTo { x, y });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_count_ignores_move_to() {
        let mut p = StrokePath::new();
        p.move_to(0.0, 0.0);
        p.quad_to(1.0, 1.0, 2.0, 2.0);
        p.line_to(3.0, 3.0);
        assert_eq!(p.segment_count(), 2);
        assert_eq!(p.commands().len(), 3);
    }

    #[test]
    fn line_without_move_starts_at_its_own_point() {
        let mut p = StrokePath::new();
        p.line_to(5.0, 6.0);
        assert_eq!(p.commands()[0], PathCmd::MoveTo { x: 5.0, y: 6.0 });
        assert_eq!(p.segment_count(), 1);
    }

    #[test]
    fn skia_path_keeps_every_point() {
        let mut p = StrokePath::new();
        p.move_to(10.0, 10.0);
        p.quad_to(-5.0, 40.0, 20.0, 12.0);
        p.line_to(30.0, 12.0);
        let sk = p.to_skia_path().unwrap();
        assert_eq!(sk.points().len(), 4);
        let b = sk.bounds();
        assert_eq!((b.left(), b.top(), b.right(), b.bottom()), (-5.0, 10.0, 30.0, 40.0));
    }

    #[test]
    fn lone_move_to_has_no_skia_path() {
        let mut p = StrokePath::new();
        assert!(p.to_skia_path().is_none());
        p.move_to(1.0, 2.0);
        assert!(p.to_skia_path().is_none());
    }

    #[test]
    fn tap_is_a_single_point() {
        let mut p = StrokePath::new();
        p.move_to(7.0, 8.0);
        assert_eq!(p.single_point(), None);
        p.line_to(7.0, 8.0);
        assert_eq!(p.single_point(), Some((7.0, 8.0)));
        p.line_to(9.0, 8.0);
        assert_eq!(p.single_point(), None);
    }
}
