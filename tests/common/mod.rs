#![allow(dead_code)]

use bitmap_paint::tools::ToolContext;
use bitmap_paint::{BitmapFont, Config, InputEvent, Point, Session};
use egui::Color32;
use image::{Rgba, RgbaImage};

pub const CELL_W: u32 = 7;
pub const CELL_H: u32 = 9;
pub const COLS: u32 = 16;
pub const ROWS: u32 = 6;

pub const FG: Color32 = Color32::WHITE;
pub const BG: Color32 = Color32::from_rgb(0, 64, 128);

/// Colour of the top-left pixel of glyph `c` in the test sheet
pub fn glyph_marker(c: char) -> Color32 {
    Color32::from_rgb(c as u8, 200, 100)
}

/// A 16x6 sheet of 7x9 cells covering ' '..='\x7f'. Each glyph is a solid
/// block with a marker pixel identifying the character; the space glyph
/// is entirely colorkey black.
pub fn test_font() -> BitmapFont {
    let mut sheet = RgbaImage::from_pixel(COLS * CELL_W, ROWS * CELL_H, Rgba([0, 0, 0, 255]));
    for index in 1..COLS * ROWS {
        let (x0, y0) = ((index % COLS) * CELL_W, (index / COLS) * CELL_H);
        for y in y0..y0 + CELL_H {
            for x in x0..x0 + CELL_W {
                sheet.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let marker = glyph_marker(char::from_u32(32 + index).unwrap());
        sheet.put_pixel(x0, y0, Rgba([marker.r(), marker.g(), marker.b(), 255]));
    }
    BitmapFont::from_image(sheet, CELL_W, CELL_H, Some(Color32::BLACK)).unwrap()
}

pub fn test_config() -> Config {
    Config {
        palette: vec![[255, 255, 255], [255, 165, 0], [0, 0, 0]],
        ..Config::default()
    }
}

pub fn test_session() -> Session {
    Session::new(test_config(), test_font()).unwrap()
}

pub fn context(font: &BitmapFont, x: i32, y: i32) -> ToolContext<'_> {
    ToolContext {
        pointer: Point::new(x, y),
        pointer_delta: Point::ZERO,
        foreground: FG,
        thickness: 1,
        fill: false,
        font,
        cursor_visible: true,
    }
}

pub fn moved(x: i32, y: i32) -> InputEvent {
    InputEvent::PointerMoved(Point::new(x, y))
}

/// Number of pixels of `color` on `surface`
pub fn count(surface: &impl bitmap_paint::Surface, color: Color32) -> usize {
    let mut n = 0;
    for y in 0..surface.height() as i32 {
        for x in 0..surface.width() as i32 {
            if surface.pixel(x, y) == Some(color) {
                n += 1;
            }
        }
    }
    n
}
