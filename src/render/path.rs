//! Path data for surface primitives.
//!
//! A path is an ordered list of move/line/arc/close commands in diagram pixels. An
//! empty path means "draw nothing"; builders return one for every degenerate case.
//! Surfaces decide how to serialize it; [`SvgSurface`](super::SvgSurface) goes
//! through the `svg` crate's path data.

use crate::types::Point;

/// One drawing command, in absolute coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Elliptical arc, with the same parameters as the SVG `A` command
    ArcTo {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl PathCommand {
    /// Point the pen ends on after this command
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
            PathCommand::ArcTo { to, .. } => Some(to),
            PathCommand::Close => None,
        }
    }
}

/// Ordered command list with a fluent builder
///
/// ```
/// use sunpath::render::PathData;
///
/// let wedge = PathData::new()
///     .m(280.0, 280.0)
///     .l(280.0, 550.0)
///     .a(270.0, 270.0, 0.0, false, true, 10.0, 280.0)
///     .z();
/// assert_eq!(wedge.letters(), "MLAZ");
/// assert_eq!(wedge.points().last().map(|p| p.x), Some(10.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to
    pub fn m(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to
    pub fn l(mut self, x: f64, y: f64) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Elliptical arc to
    #[allow(clippy::too_many_arguments)]
    pub fn a(
        mut self,
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) -> Self {
        self.commands.push(PathCommand::ArcTo {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to: Point::new(x, y),
        });
        self
    }

    /// Close path
    pub fn z(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Polyline through `points`: a move to the first, lines to the rest.
    pub fn polyline(points: &[Point]) -> Self {
        let mut iter = points.iter();
        let Some(first) = iter.next() else {
            return Self::new();
        };
        iter.fold(Self::new().m(first.x, first.y), |path, p| path.l(p.x, p.y))
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// End points of every drawing command, in order
    pub fn points(&self) -> Vec<Point> {
        self.commands.iter().filter_map(PathCommand::end_point).collect()
    }

    /// Command letters, handy for checking a path's shape
    pub fn letters(&self) -> String {
        self.commands
            .iter()
            .map(|c| match c {
                PathCommand::MoveTo(_) => 'M',
                PathCommand::LineTo(_) => 'L',
                PathCommand::ArcTo { .. } => 'A',
                PathCommand::Close => 'Z',
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline() {
        let path = PathData::polyline(&[
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.5, 6.0),
        ]);
        assert_eq!(path.letters(), "MLL");
        assert_eq!(path.commands()[2], PathCommand::LineTo(Point::new(5.5, 6.0)));
        assert!(PathData::polyline(&[]).is_empty());
    }

    #[test]
    fn test_points_skip_close() {
        let path = PathData::new()
            .m(0.0, 0.0)
            .l(1.0, 0.0)
            .a(1.0, 1.0, 0.0, false, true, 0.0, 1.0)
            .z();
        assert_eq!(path.len(), 4);
        assert_eq!(
            path.points(),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
        );
    }

    #[test]
    fn test_letters() {
        let wedge = PathData::new()
            .m(280.0, 280.0)
            .l(280.0, 550.0)
            .a(270.0, 270.0, 0.0, false, true, 10.0, 280.0)
            .z();
        insta::assert_snapshot!(wedge.letters(), @"MLAZ");
        insta::assert_snapshot!(PathData::new().letters(), @"");
    }
}
