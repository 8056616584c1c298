use egui::Color32;

use crate::error::ConfigError;
use crate::geometry::PixelRect;
use crate::surface::{PixelSurface, Surface};

/// A fixed, non-empty list of selectable colours with a cursor.
///
/// Keeps a pre-rendered swatch strip for the status bar; the strip is
/// rebuilt whenever the selection changes.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color32>,
    index: usize,
    swatch_width: u32,
    swatch_height: u32,
    strip: PixelSurface,
}

impl Palette {
    /// `swatch_width` x `swatch_height` is the on-screen size of one colour,
    /// normally the font's cell size.
    pub fn new(colors: Vec<Color32>, swatch_width: u32, swatch_height: u32) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "palette",
                reason: "needs at least one colour".to_string(),
            });
        }
        let mut palette = Self {
            strip: PixelSurface::new(1, 1, Color32::BLACK),
            colors,
            index: 0,
            swatch_width: swatch_width.max(1),
            swatch_height: swatch_height.max(1),
        };
        palette.rebuild_strip();
        Ok(palette)
    }

    pub fn current(&self) -> Color32 {
        self.colors[self.index]
    }

    /// Advances to the next colour, wrapping at the end, and returns it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Color32 {
        self.index = (self.index + 1) % self.colors.len();
        self.rebuild_strip();
        self.current()
    }

    /// The rendered strip: one swatch per colour, the selected one framed.
    pub fn strip(&self) -> &PixelSurface {
        &self.strip
    }

    fn rebuild_strip(&mut self) {
        // one pixel per colour, magnified to swatch size
        let count = self.colors.len() as u32;
        let mut small = PixelSurface::new(count, 1, Color32::BLACK);
        for (x, color) in self.colors.iter().enumerate() {
            small.put_pixel(x as i32, 0, *color);
        }
        let mut strip = small.scaled(count * self.swatch_width, self.swatch_height);

        let marker = contrast(self.current());
        let frame = PixelRect::new(
            (self.index as u32 * self.swatch_width) as i32,
            0,
            self.swatch_width,
            self.swatch_height,
        );
        strip.draw_rect(frame, marker, 1);
        self.strip = strip;
    }
}

/// Black or white, whichever stands out against `color`
fn contrast(color: Color32) -> Color32 {
    let luma = 299 * u32::from(color.r()) + 587 * u32::from(color.g()) + 114 * u32::from(color.b());
    if luma > 128_000 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
