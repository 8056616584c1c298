use crate::geometry::Point;

/// Press/drag/release tracking shared by the tools whose primitive is
/// defined by two points (the anchor and the release position).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TwoPointGesture {
    anchor: Option<Point>,
}

impl TwoPointGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// Records the anchor on the first press; later presses while the
    /// gesture is open are ignored.
    pub fn press(&mut self, pos: Point) {
        if self.anchor.is_none() {
            self.anchor = Some(pos);
        }
    }

    /// The two defining points for a live preview, if a gesture is open.
    pub fn preview(&self, pos: Point) -> Option<(Point, Point)> {
        self.anchor.map(|anchor| (anchor, pos))
    }

    /// Closes the gesture at `pos`. Returns the two points to commit, or
    /// `None` when there was no gesture or it is degenerate (released on the
    /// anchor).
    pub fn commit(&mut self, pos: Point) -> Option<(Point, Point)> {
        let anchor = self.anchor.take()?;
        if anchor == pos {
            log::debug!("Discarding zero-length gesture at {:?}", pos);
            return None;
        }
        Some((anchor, pos))
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }
}
