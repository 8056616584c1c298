//! Monospace bitmap font backed by a glyph sheet.
//!
//! The sheet is a regular grid of `cols x rows` cells. Cell `0` holds the
//! space character and glyphs follow in ASCII order, left to right then top
//! to bottom.

use std::path::Path;

use egui::Color32;
use image::RgbaImage;

use crate::error::FontError;
use crate::geometry::{PixelRect, Point};
use crate::surface::{PixelSurface, Surface};

/// First character stored on the sheet
pub const FIRST_CHAR: char = ' ';

#[derive(Debug, Clone)]
pub struct BitmapFont {
    sheet: PixelSurface,
    char_width: u32,
    char_height: u32,
    cols: u32,
    rows: u32,
    colorkey: Option<Color32>,
}

impl BitmapFont {
    /// Loads a glyph sheet from an image file.
    pub fn from_path(
        path: &Path,
        char_width: u32,
        char_height: u32,
        colorkey: Option<Color32>,
    ) -> Result<Self, FontError> {
        let image = image::open(path)
            .map_err(|source| FontError::Load {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let font = Self::from_image(image, char_width, char_height, colorkey)?;
        log::info!(
            "Loaded font {}: cols, rows == {:?}, {} glyphs",
            path.display(),
            (font.cols, font.rows),
            font.glyph_count()
        );
        Ok(font)
    }

    /// Builds a font from an in-memory sheet. The sheet must be a whole
    /// number of cells in both directions.
    pub fn from_image(
        image: RgbaImage,
        char_width: u32,
        char_height: u32,
        colorkey: Option<Color32>,
    ) -> Result<Self, FontError> {
        if char_width == 0 || char_height == 0 {
            return Err(FontError::ZeroCell {
                width: char_width,
                height: char_height,
            });
        }
        let (sheet_width, sheet_height) = image.dimensions();
        if sheet_width % char_width != 0 || sheet_height % char_height != 0 {
            return Err(FontError::Misaligned {
                sheet_width,
                sheet_height,
                cell_width: char_width,
                cell_height: char_height,
            });
        }
        let cols = sheet_width / char_width;
        let rows = sheet_height / char_height;
        if cols == 0 || rows == 0 {
            return Err(FontError::Empty);
        }

        Ok(Self {
            sheet: PixelSurface::from_image(image),
            char_width,
            char_height,
            cols,
            rows,
            colorkey,
        })
    }

    pub fn char_width(&self) -> u32 {
        self.char_width
    }

    pub fn char_height(&self) -> u32 {
        self.char_height
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn glyph_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Last character with a cell on the sheet
    pub fn last_char(&self) -> char {
        char::from_u32(FIRST_CHAR as u32 + self.glyph_count() - 1).unwrap_or(FIRST_CHAR)
    }

    /// Grid cell `(col, row)` holding `c`, or `None` when the sheet has no
    /// glyph for it.
    pub fn char_to_cell(&self, c: char) -> Option<(u32, u32)> {
        let index = (c as u32).checked_sub(FIRST_CHAR as u32)?;
        if index >= self.glyph_count() {
            return None;
        }
        Some((index % self.cols, index / self.cols))
    }

    /// Pixel region of the sheet holding `c`
    pub fn glyph_rect(&self, c: char) -> Option<PixelRect> {
        let (col, row) = self.char_to_cell(c)?;
        Some(PixelRect::new(
            (col * self.char_width) as i32,
            (row * self.char_height) as i32,
            self.char_width,
            self.char_height,
        ))
    }

    /// Writes `text` with its first cell's top-left at `(x, y)`.
    ///
    /// `'\n'` returns to `x` one cell lower. Characters without a glyph
    /// leave a blank cell.
    pub fn draw(&self, surface: &mut dyn Surface, text: &str, x: i32, y: i32) {
        let mut cursor = Point::new(x, y);
        for c in text.chars() {
            if c == '\n' {
                cursor.x = x;
                cursor.y += self.char_height as i32;
                continue;
            }
            match self.glyph_rect(c) {
                Some(src) => surface.blit(&self.sheet, src, cursor, self.colorkey),
                None => log::debug!("No glyph for {:?}, leaving a blank cell", c),
            }
            cursor.x += self.char_width as i32;
        }
    }

    /// Draws a single line of text horizontally centred on the surface.
    pub fn centre(&self, surface: &mut dyn Surface, text: &str, y: i32) {
        let text_width = (text.chars().count() as u32 * self.char_width) as i32;
        let x = (surface.width() as i32 - text_width) / 2;
        self.draw(surface, text, x, y);
    }
}
