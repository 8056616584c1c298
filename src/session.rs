//! The paint session: owns the canvas and the tools and turns a frame's
//! input into drawing.
//!
//! Each frame runs in a fixed order:
//!
//! 1. `begin_frame` resets the per-frame modifier flags
//! 2. `handle_event` for every input event; commits land on the canvas here
//! 3. `update` repeats `button_down` while the pointer stays held
//! 4. `render` copies the canvas to the display, then draws the tool
//!    preview and the status overlay on top
//!
//! The canvas is therefore complete before it is composited, and previews
//! only ever touch the display.

use egui::{Color32, Key, Modifiers};

use crate::config::Config;
use crate::error::ConfigError;
use crate::font::BitmapFont;
use crate::geometry::Point;
use crate::input::InputEvent;
use crate::palette::Palette;
use crate::surface::{PixelSurface, Surface};
use crate::tools::{Tool, ToolContext, ToolKind, ToolRequest, ToolType};

pub const CTRL_HINT: &str = "CTRL  Q-Quit";
pub const SHIFT_HINT: &str = "SHIFT P-Colour F-Fill +/- Size";
pub const TOOL_HINT: &str = "D-Draw L-Line R-Rect C-Circ T-Text E-Erase";

pub struct Session {
    config: Config,
    canvas: PixelSurface,
    display: PixelSurface,
    font: BitmapFont,
    palette: Palette,
    /// One instance per `ToolKind`, indexed by `ToolKind::index`
    tools: Vec<ToolType>,
    active: ToolKind,
    previous: ToolKind,

    ctrl_down: bool,
    shift_down: bool,
    pointer: Point,
    last_frame_pointer: Point,
    pointer_delta: Point,
    pointer_held: bool,
    pressed_this_frame: bool,
    /// A key press this frame ran a command, so its text echo is not typed
    swallow_text: bool,

    foreground: Color32,
    background: Color32,
    thickness: u32,
    fill: bool,

    running: bool,
    frame: u64,
    blink_frames: u64,
}

impl Session {
    pub fn new(config: Config, font: BitmapFont) -> Result<Self, ConfigError> {
        config.validate()?;

        let palette = Palette::new(config.palette_colors(), font.char_width(), font.char_height())?;
        let background = config.background_color();
        let (width, height) = (config.screen_width, config.screen_height);
        let tools = ToolKind::ALL
            .into_iter()
            .map(|kind| ToolType::new(kind, &config))
            .collect();
        let blink_frames =
            (config.cursor_blink_ms * u64::from(config.refresh_rate_hz) / 1000).max(1);

        let mut session = Self {
            canvas: PixelSurface::new(width, height, background),
            display: PixelSurface::new(width, height, background),
            font,
            palette,
            tools,
            active: ToolKind::Pencil,
            previous: ToolKind::Pencil,
            ctrl_down: false,
            shift_down: false,
            pointer: Point::ZERO,
            last_frame_pointer: Point::ZERO,
            pointer_delta: Point::ZERO,
            pointer_held: false,
            pressed_this_frame: false,
            swallow_text: false,
            foreground: config.foreground_color(),
            background,
            thickness: config.initial_thickness(),
            fill: false,
            running: true,
            frame: 0,
            blink_frames,
            config,
        };
        session.clear_canvas();
        Ok(session)
    }

    /// Runs one whole frame and returns the composited display.
    pub fn frame(&mut self, events: &[InputEvent]) -> &PixelSurface {
        self.begin_frame();
        for event in events {
            self.handle_event(event);
        }
        self.update();
        self.render()
    }

    pub fn begin_frame(&mut self) {
        self.ctrl_down = false;
        self.shift_down = false;
        self.pressed_this_frame = false;
        self.swallow_text = false;
        self.frame += 1;
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved(pos) => self.pointer = *pos,
            InputEvent::PointerPressed => {
                self.pointer_held = true;
                self.pressed_this_frame = true;
                self.with_active_tool(|tool, ctx, canvas| tool.button_down(ctx, canvas));
            }
            InputEvent::PointerReleased => {
                self.pointer_held = false;
                self.with_active_tool(|tool, ctx, canvas| tool.button_up(ctx, canvas));
            }
            InputEvent::Modifiers(modifiers) => self.note_modifiers(*modifiers),
            InputEvent::Key { key, modifiers } => self.handle_key(*key, *modifiers),
            InputEvent::Text(text) => self.handle_text(text),
            InputEvent::Quit => self.quit(),
        }
    }

    /// Per-frame state update after the input has been drained
    pub fn update(&mut self) {
        self.pointer_delta = self.pointer.delta(self.last_frame_pointer);
        self.last_frame_pointer = self.pointer;

        if self.pointer_held && !self.pressed_this_frame {
            self.with_active_tool(|tool, ctx, canvas| tool.button_down(ctx, canvas));
        }
    }

    /// Composites canvas, tool preview and status overlay into the display.
    pub fn render(&mut self) -> &PixelSurface {
        self.display.copy_from(&self.canvas);

        let ctx = ToolContext {
            pointer: self.pointer,
            pointer_delta: self.pointer_delta,
            foreground: self.foreground,
            thickness: self.thickness,
            fill: self.fill,
            font: &self.font,
            cursor_visible: self.cursor_visible(),
        };
        self.tools[self.active.index()].draw_cursor(&ctx, &mut self.display);

        self.draw_overlay();
        &self.display
    }

    fn draw_overlay(&mut self) {
        let coords = format!("{:03},{:03}", self.pointer.x.max(0), self.pointer.y.max(0));
        self.font.draw(&mut self.display, &coords, 0, 0);

        let bottom = self.config.bottom_bar_y();
        if self.ctrl_down {
            self.font.draw(&mut self.display, CTRL_HINT, 0, bottom);
        } else if self.shift_down {
            let above = bottom - self.font.char_height() as i32;
            self.font.draw(&mut self.display, SHIFT_HINT, 0, above);
            self.font.draw(&mut self.display, TOOL_HINT, 0, bottom);
        } else {
            let status = self.status_line();
            self.font.draw(&mut self.display, &status, 0, bottom);
            let strip = self.palette.strip();
            let x = self.display.width() as i32 - strip.width() as i32;
            self.display.blit(strip, strip.bounds(), Point::new(x, bottom), None);
        }
    }

    /// Active tool and brush settings as shown in the status bar
    pub fn status_line(&self) -> String {
        let size = if self.fill {
            "FILL".to_string()
        } else {
            format!("{}PX", self.thickness)
        };
        format!("{} {}", self.active_tool().name(), size)
    }

    fn note_modifiers(&mut self, modifiers: Modifiers) {
        self.ctrl_down |= modifiers.ctrl;
        self.shift_down |= modifiers.shift;
    }

    fn handle_key(&mut self, key: Key, modifiers: Modifiers) {
        self.note_modifiers(modifiers);

        if modifiers.ctrl || modifiers.shift {
            self.swallow_text = self.handle_command(key, modifiers);
            return;
        }

        self.swallow_text = false;
        let request = self.tools[self.active.index()].handle_key(key);
        if let Some(ToolRequest::Exit) = request {
            self.exit_tool();
        }
    }

    fn handle_text(&mut self, text: &str) {
        if self.ctrl_down {
            return;
        }
        if std::mem::take(&mut self.swallow_text) {
            return;
        }
        self.tools[self.active.index()].handle_text(text);
    }

    /// Session hotkeys. Returns whether the key was recognized.
    fn handle_command(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if modifiers.ctrl {
            return match key {
                Key::Q => {
                    self.quit();
                    true
                }
                _ => false,
            };
        }

        if let Some(kind) = ToolKind::from_hotkey(key) {
            self.activate_tool(kind);
            return true;
        }
        match key {
            Key::E => self.clear_canvas(),
            Key::P => self.next_colour(),
            Key::F => self.toggle_fill(),
            Key::Equals | Key::Plus => self.adjust_thickness(1),
            Key::Minus => self.adjust_thickness(-1),
            _ => return false,
        }
        true
    }

    /// Makes `kind` the active tool, remembering the current one so that
    /// `exit_tool` can return to it. Any gesture in progress is dropped.
    pub fn activate_tool(&mut self, kind: ToolKind) {
        self.cancel_tool();
        if kind != self.active {
            self.previous = self.active;
            self.active = kind;
        }
        self.tools[kind.index()].activate();
        log::info!("Tool activated: {}", kind.name());
    }

    /// Leaves the active tool and restores the previous one.
    pub fn exit_tool(&mut self) {
        self.tools[self.active.index()].exit();
        log::info!(
            "Tool exited: {} -> {}",
            self.active.name(),
            self.previous.name()
        );
        self.active = self.previous;
    }

    /// Abandons the active tool's gesture.
    pub fn cancel_tool(&mut self) {
        self.tools[self.active.index()].cancel();
    }

    pub fn clear_canvas(&mut self) {
        self.canvas.fill(self.background);
        log::info!("Canvas erased");
    }

    pub fn next_colour(&mut self) {
        self.foreground = self.palette.next();
        log::info!("Foreground colour: {:?}", self.foreground);
    }

    pub fn toggle_fill(&mut self) {
        self.fill = !self.fill;
        log::info!("Fill mode: {}", self.fill);
    }

    pub fn adjust_thickness(&mut self, step: i32) {
        let max = self.config.max_line_thickness;
        self.thickness = self.thickness.saturating_add_signed(step).clamp(1, max);
        log::info!("Line thickness: {}", self.thickness);
    }

    pub fn quit(&mut self) {
        if self.running {
            log::info!("Quit requested");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn canvas(&self) -> &PixelSurface {
        &self.canvas
    }

    pub fn display(&self) -> &PixelSurface {
        &self.display
    }

    pub fn font(&self) -> &BitmapFont {
        &self.font
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn active_kind(&self) -> ToolKind {
        self.active
    }

    pub fn previous_kind(&self) -> ToolKind {
        self.previous
    }

    pub fn active_tool(&self) -> &ToolType {
        &self.tools[self.active.index()]
    }

    pub fn tool(&self, kind: ToolKind) -> &ToolType {
        &self.tools[kind.index()]
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn pointer_delta(&self) -> Point {
        self.pointer_delta
    }

    pub fn is_pointer_held(&self) -> bool {
        self.pointer_held
    }

    pub fn ctrl_down(&self) -> bool {
        self.ctrl_down
    }

    pub fn shift_down(&self) -> bool {
        self.shift_down
    }

    pub fn foreground(&self) -> Color32 {
        self.foreground
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn fill_mode(&self) -> bool {
        self.fill
    }

    fn cursor_visible(&self) -> bool {
        (self.frame / self.blink_frames) % 2 == 0
    }

    /// Runs `f` against the active tool with a fresh context and the canvas.
    fn with_active_tool<R>(
        &mut self,
        f: impl FnOnce(&mut ToolType, &ToolContext<'_>, &mut dyn Surface) -> R,
    ) -> R {
        let ctx = ToolContext {
            pointer: self.pointer,
            pointer_delta: self.pointer_delta,
            foreground: self.foreground,
            thickness: self.thickness,
            fill: self.fill,
            font: &self.font,
            cursor_visible: self.cursor_visible(),
        };
        let tool = &mut self.tools[self.active.index()];
        f(tool, &ctx, &mut self.canvas)
    }
}
