use crate::geometry::{Point, distance};
use crate::surface::Surface;

use super::{Tool, ToolContext, TwoPointGesture, draw_dot};

/// Circles centred on the press position, passing through the release
/// position.
#[derive(Debug, Clone, Default)]
pub struct CircleTool {
    gesture: TwoPointGesture,
}

impl CircleTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.gesture.anchor()
    }

    /// Radius for a circle centred at `center` reaching `pointer`
    pub fn radius(center: Point, pointer: Point) -> f32 {
        distance(center, pointer)
    }

    fn draw(surface: &mut dyn Surface, center: Point, pointer: Point, ctx: &ToolContext<'_>) {
        surface.draw_circle(
            center,
            Self::radius(center, pointer),
            ctx.foreground,
            ctx.shape_thickness(),
        );
    }
}

impl Tool for CircleTool {
    fn name(&self) -> &'static str {
        "Circle"
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
            Some((center, pointer)) => Self::draw(display, center, pointer, ctx),
            None => draw_dot(ctx, display),
        }
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        let Some((center, pointer)) = self.gesture.commit(ctx.pointer) else {
            return false;
        };
        Self::draw(canvas, center, pointer, ctx);
        true
    }
}
