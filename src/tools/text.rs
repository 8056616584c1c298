use egui::Key;

use crate::geometry::PixelRect;
use crate::surface::Surface;

use super::{Tool, ToolContext, ToolRequest};

/// Typed text stamped onto the canvas with the bitmap font.
///
/// Keystrokes build up a buffer that follows the pointer as a preview; a
/// click writes the buffer at the pointer. Escape throws the buffer away
/// and leaves the tool.
#[derive(Debug, Clone)]
pub struct TypeTool {
    text: String,
    /// Lines in the buffer, always `text` newlines + 1
    rows: u32,
    /// Swallow the first character after activation (the keystroke that
    /// selected the tool may echo as text)
    drop_first_char: bool,
    dropped_first_char: bool,
}

impl TypeTool {
    pub fn new(drop_first_char: bool) -> Self {
        Self {
            text: String::new(),
            rows: 1,
            drop_first_char,
            dropped_first_char: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Characters on the last line of the buffer
    pub fn len_last_row(&self) -> usize {
        self.text.rsplit('\n').next().map_or(0, |line| line.chars().count())
    }

    pub fn push_char(&mut self, c: char) {
        if c == '\n' {
            self.rows += 1;
        }
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        if self.text.pop() == Some('\n') {
            self.rows -= 1;
        }
    }

    fn clear_text(&mut self) {
        self.text.clear();
        self.rows = 1;
    }

    fn init_text(&mut self) {
        self.clear_text();
        self.dropped_first_char = false;
    }

    /// Block cursor cell after the last character of the last line
    fn cursor_rect(&self, ctx: &ToolContext<'_>) -> PixelRect {
        let (w, h) = (ctx.font.char_width(), ctx.font.char_height());
        PixelRect::new(
            ctx.pointer.x + (self.len_last_row() as u32 * w) as i32,
            ctx.pointer.y + ((self.rows - 1) * h) as i32,
            w,
            h,
        )
    }
}

impl Tool for TypeTool {
    fn name(&self) -> &'static str {
        "Type"
    }

    fn activate(&mut self) {
        self.init_text();
    }

    fn exit(&mut self) {
        self.init_text();
    }

    fn cancel(&mut self) {
        self.clear_text();
    }

    fn is_busy(&self) -> bool {
        !self.text.is_empty()
    }

    fn handle_key(&mut self, key: Key) -> Option<ToolRequest> {
        match key {
            Key::Escape => {
                self.clear_text();
                Some(ToolRequest::Exit)
            }
            Key::Enter => {
                self.push_char('\n');
                None
            }
            Key::Backspace => {
                self.backspace();
                None
            }
            _ => None,
        }
    }

    fn handle_text(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            if self.drop_first_char && !self.dropped_first_char {
                self.dropped_first_char = true;
                continue;
            }
            self.push_char(c);
        }
    }

    fn button_down(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) {
        self.apply(ctx, canvas);
    }

    fn draw_cursor(&self, ctx: &ToolContext<'_>, display: &mut dyn Surface) {
        ctx.font.draw(display, &self.text, ctx.pointer.x, ctx.pointer.y);
        if ctx.cursor_visible {
            display.draw_rect(self.cursor_rect(ctx), ctx.foreground, 0);
        }
    }

    fn apply(&mut self, ctx: &ToolContext<'_>, canvas: &mut dyn Surface) -> bool {
        if self.text.is_empty() {
            return false;
        }
        ctx.font.draw(canvas, &self.text, ctx.pointer.x, ctx.pointer.y);
        self.clear_text();
        true
    }
}
