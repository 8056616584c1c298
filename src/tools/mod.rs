use egui::{Color32, Key};

use crate::config::Config;
use crate::font::BitmapFont;
use crate::geometry::Point;
use crate::surface::Surface;

mod circle;
mod gesture;
mod line;
mod pencil;
mod rect;
mod text;

pub use circle::CircleTool;
pub use gesture::TwoPointGesture;
pub use line::LineTool;
pub use pencil::PencilTool;
pub use rect::RectTool;
pub use text::TypeTool;

/// The session state a tool may read while handling input or drawing.
///
/// Built fresh by the session for each call; tools never hold on to it.
#[derive(Debug, Clone, Copy)]
pub struct ToolContext<'a> {
    /// Pointer position in canvas pixels
    pub pointer: Point,
    /// Pointer movement since the previous frame
    pub pointer_delta: Point,
    pub foreground: Color32,
    pub thickness: u32,
    pub fill: bool,
    pub font: &'a BitmapFont,
    /// Blink phase for text cursors
    pub cursor_visible: bool,
}

impl ToolContext<'_> {
    /// Thickness for shape primitives: 0 (solid) in fill mode.
    pub fn shape_thickness(&self) -> u32 {
        if self.fill { 0 } else { self.thickness }
    }
}

/// Something a tool asks the session to do on its behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRequest {
    /// Leave this tool and go back to the previous one
    Exit,
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    /// Return the name of the tool
    fn name(&self) -> &'static str;

    /// Called when the tool becomes the active tool; starts from a clean gesture.
    fn activate(&mut self);

    /// Called when the tool is left; discards any gesture in progress.
    fn exit(&mut self);

    /// Abandons the gesture in progress without committing it.
    fn cancel(&mut self);

    /// True while a gesture is in progress
    fn is_busy(&self) -> bool;

    /// Handle an unmodified key press. Escape cancels by default.
    fn handle_key(&mut self, key: Key) -> Option<ToolRequest> {
        if key == Key::Escape {
            self.cancel();
        }
        None
    }

    /// Handle characters typed while the tool is active.
    fn handle_text(&mut self, _text: &str) {}

    /// Pointer press. Also called once per frame while the button stays held.
    fn button_down(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface);

    /// Pointer release.
    fn button_up(&mut self, _ctx: &ToolContext<'_>, _canvas: &mut dyn Surface) {}

    /// Draws the live cursor or preview onto the display surface. Must never
    /// touch the canvas.
    fn draw_cursor(&self, ctx: &ToolContext<'_>, display: &mut dyn Surface) {
        draw_dot(ctx, display);
    }

    /// Commits the pending primitive to the canvas and resets the gesture.
    /// Returns whether anything was drawn.
    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool;
}

/// One-pixel cursor at the pointer
pub fn draw_dot(ctx: &ToolContext<'_>, surface: &mut dyn Surface) {
    surface.put_pixel(ctx.pointer.x, ctx.pointer.y, ctx.foreground);
}

/// Identifies one of the tools a session owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pencil,
    Line,
    Rect,
    Circle,
    Type,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::Pencil,
        ToolKind::Line,
        ToolKind::Rect,
        ToolKind::Circle,
        ToolKind::Type,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Line => "Line",
            Self::Rect => "Rect",
            Self::Circle => "Circle",
            Self::Type => "Type",
        }
    }

    /// Key that selects this tool together with shift
    pub fn hotkey(self) -> Key {
        match self {
            Self::Pencil => Key::D,
            Self::Line => Key::L,
            Self::Rect => Key::R,
            Self::Circle => Key::C,
            Self::Type => Key::T,
        }
    }

    pub fn from_hotkey(key: Key) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.hotkey() == key)
    }
}

/// Enum representing all available tool types
/// This allows us to avoid using Box<dyn Tool> and simplifies memory management
#[derive(Debug, Clone)]
pub enum ToolType {
    Pencil(PencilTool),
    Line(LineTool),
    Rect(RectTool),
    Circle(CircleTool),
    Type(TypeTool),
}

impl ToolType {
    pub fn new(kind: ToolKind, config: &Config) -> Self {
        match kind {
            ToolKind::Pencil => Self::Pencil(PencilTool::new()),
            ToolKind::Line => Self::Line(LineTool::new()),
            ToolKind::Rect => Self::Rect(RectTool::new()),
            ToolKind::Circle => Self::Circle(CircleTool::new()),
            ToolKind::Type => Self::Type(TypeTool::new(config.drop_first_typed_char)),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Pencil(_) => ToolKind::Pencil,
            Self::Line(_) => ToolKind::Line,
            Self::Rect(_) => ToolKind::Rect,
            Self::Circle(_) => ToolKind::Circle,
            Self::Type(_) => ToolKind::Type,
        }
    }

    pub fn as_type_tool(&self) -> Option<&TypeTool> {
        match self {
            Self::Type(tool) => Some(tool),
            _ => None,
        }
    }

    /// Anchor of the two-point gesture in progress, for the shape tools
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Line(tool) => tool.anchor(),
            Self::Rect(tool) => tool.anchor(),
            Self::Circle(tool) => tool.anchor(),
            Self::Pencil(_) | Self::Type(_) => None,
        }
    }

    fn as_tool(&self) -> &dyn Tool {
        match self {
            Self::Pencil(tool) => tool,
            Self::Line(tool) => tool,
            Self::Rect(tool) => tool,
            Self::Circle(tool) => tool,
            Self::Type(tool) => tool,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            Self::Pencil(tool) => tool,
            Self::Line(tool) => tool,
            Self::Rect(tool) => tool,
            Self::Circle(tool) => tool,
            Self::Type(tool) => tool,
        }
    }
}

impl Tool for ToolType {
    fn name(&self) -> &'static str {
        self.as_tool().name()
    }

    fn activate(&mut self) {
        self.as_tool_mut().activate();
    }

    fn exit(&mut self) {
        self.as_tool_mut().exit();
    }

    fn cancel(&mut self) {
        self.as_tool_mut().cancel();
    }

    fn is_busy(&self) -> bool {
        self.as_tool().is_busy()
    }

    fn handle_key(&mut self, key: Key) -> Option<ToolRequest> {
        self.as_tool_mut().handle_key(key)
    }

    fn handle_text(&mut self, text: &str) {
        self.as_tool_mut().handle_text(text);
    }

    fn button_down(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) {
        self.as_tool_mut().button_down(ctx, canvas);
    }

    fn button_up(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) {
        self.as_tool_mut().button_up(ctx, canvas);
    }

    fn draw_cursor(&self, ctx: &ToolContext<'_>, display: &mut dyn Surface) {
        self.as_tool().draw_cursor(ctx, display);
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        self.as_tool_mut().apply(ctx, canvas)
    }
}
