use crate::geometry::{PixelRect, Point};
use crate::surface::Surface;

use super::{Tool, ToolContext, TwoPointGesture, draw_dot};

/// Axis-aligned rectangles between the press and release corners, in any
/// drag direction. Solid in fill mode.
#[derive(Debug, Clone, Default)]
pub struct RectTool {
    gesture: TwoPointGesture,
}

impl RectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.gesture.anchor()
    }

    /// Rectangle spanned by the anchor and the pointer, normalized to a
    /// top-left corner and non-negative size.
    pub fn bounds(anchor: Point, pointer: Point) -> PixelRect {
        PixelRect::from_corners(anchor, pointer)
    }

    fn draw(surface: &mut dyn Surface, anchor: Point, pointer: Point, ctx: &ToolContext<'_>) {
        surface.draw_rect(Self::bounds(anchor, pointer), ctx.foreground, ctx.shape_thickness());
    }
}

impl Tool for RectTool {
    fn name(&self) -> &'static str {
        "Rect"
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
            Some((anchor, pointer)) => Self::draw(display, anchor, pointer, ctx),
            None => draw_dot(ctx, display),
        }
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        let Some((anchor, pointer)) = self.gesture.commit(ctx.pointer) else {
            return false;
        };
        Self::draw(canvas, anchor, pointer, ctx);
        true
    }
}
