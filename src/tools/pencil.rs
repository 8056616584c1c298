use crate::geometry::Point;
use crate::surface::Surface;

use super::{Tool, ToolContext};

/// Freehand drawing. Marks the canvas on press and keeps stroking while the
/// button is held, joining where the pointer was last frame to where it is
/// now.
#[derive(Debug, Clone, Default)]
pub struct PencilTool {
    // Transient state: a stroke is in progress
    stroking: bool,
}

impl PencilTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start of this frame's segment: the pointer position one frame ago,
    /// or the pointer itself on the press that opens a stroke.
    fn segment_start(&self, ctx: &ToolContext<'_>) -> Point {
        if self.stroking {
            ctx.pointer.offset(-ctx.pointer_delta.x, -ctx.pointer_delta.y)
        } else {
            ctx.pointer
        }
    }
}

impl Tool for PencilTool {
    fn name(&self) -> &'static str {
        "Pencil"
    }

    fn activate(&mut self) {
        self.stroking = false;
    }

    fn exit(&mut self) {
        self.stroking = false;
    }

    fn cancel(&mut self) {
        self.stroking = false;
    }

    fn is_busy(&self) -> bool {
        self.stroking
    }

    fn button_down(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) {
        self.apply(ctx, canvas);
    }

    fn button_up(&mut self, _ctx: &ToolContext<'_>, _canvas: &mut dyn Surface) {
        self.stroking = false;
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        let from = self.segment_start(ctx);
        canvas.draw_line(from, ctx.pointer, ctx.foreground, 1);
        self.stroking = true;
        true
    }
}
