use crate::geometry::Point;
use crate::surface::Surface;

use super::{Tool, ToolContext, TwoPointGesture, draw_dot};

/// Straight segments: press sets the start, release commits the segment.
#[derive(Debug, Clone, Default)]
pub struct LineTool {
    gesture: TwoPointGesture,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.gesture.anchor()
    }

    fn draw(surface: &mut dyn Surface, from: Point, to: Point, ctx: &ToolContext<'_>) {
        surface.draw_line(from, to, ctx.foreground, ctx.thickness);
    }
}

impl Tool for LineTool {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn activate(&mut self) {
        self.gesture.reset();
    }

    fn exit(&mut self) {
        self.gesture.reset();
    }

    fn cancel(&mut self) {
        self.gesture.reset();
    }

    fn is_busy(&self) -> bool {
        self.gesture.is_active()
    }

    fn button_down(&mut self, ctx: &ToolContext<'_>, _canvas: &mut dyn Surface) {
        self.gesture.press(ctx.pointer);
    }

    fn button_up(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) {
        if self.gesture.is_active() {
            self.apply(ctx, canvas);
        }
    }

    fn draw_cursor(&self, ctx: &ToolContext<'_>, display: &mut dyn Surface) {
        match self.gesture.preview(ctx.pointer) {
            Some((from, to)) => Self::draw(display, from, to, ctx),
            None => draw_dot(ctx, display),
        }
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        let Some((from, to)) = self.gesture.commit(ctx.pointer) else {
            return false;
        };
        Self::draw(canvas, from, to, ctx);
        true
    }
}
