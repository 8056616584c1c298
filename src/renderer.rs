// src/renderer.rs
use eframe::egui::{self, Color32, Pos2, Rect, TextureHandle, TextureOptions, Vec2};

use crate::geometry::Point;
use crate::surface::{PixelSurface, Surface};

/// Presents the session's display surface inside an egui panel.
///
/// The display is uploaded as a texture each frame and drawn with nearest
/// filtering at the largest whole-number scale that fits the panel.
pub struct Renderer {
    texture: TextureHandle,
    screen_size: Vec2,
    /// Where the display was last drawn, in egui points
    canvas_rect: Option<Rect>,
}

impl Renderer {
    /// Creates the renderer and uploads the first frame.
    ///
    /// Args:
    ///     ctx (egui::Context): The egui context that owns the texture
    ///     display (PixelSurface): The initial display contents
    pub fn new(ctx: &egui::Context, display: &PixelSurface) -> Self {
        Self {
            texture: ctx.load_texture("display", display.to_color_image(), TextureOptions::NEAREST),
            screen_size: Vec2::new(display.width() as f32, display.height() as f32),
            canvas_rect: None,
        }
    }

    /// Largest rect with the display's aspect ratio that fits `available`,
    /// centred. Scales up in whole steps to keep pixels square.
    pub fn fit_rect(&self, available: Rect) -> Rect {
        let fit = (available.width() / self.screen_size.x).min(available.height() / self.screen_size.y);
        let scale = if fit >= 1.0 { fit.floor() } else { fit.max(f32::EPSILON) };
        Rect::from_center_size(available.center(), self.screen_size * scale)
    }

    /// Maps an egui position to display pixels, using the rect the display
    /// was last drawn into.
    pub fn screen_to_canvas(&self, pos: Pos2) -> Point {
        match self.canvas_rect {
            Some(rect) => {
                let scale = rect.width() / self.screen_size.x;
                Point::from(((pos - rect.min) / scale).to_pos2())
            }
            None => Point::from(pos),
        }
    }

    /// Uploads `display` and paints it into `rect`.
    pub fn render(&mut self, painter: &egui::Painter, rect: Rect, display: &PixelSurface) {
        self.texture.set(display.to_color_image(), TextureOptions::NEAREST);
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        painter.image(self.texture.id(), rect, uv, Color32::WHITE);
        self.canvas_rect = Some(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        let ctx = egui::Context::default();
        let display = PixelSurface::new(320, 240, Color32::BLACK);
        Renderer::new(&ctx, &display)
    }

    #[test]
    fn test_fit_rect_uses_whole_scale() {
        let renderer = renderer();
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(1000.0, 800.0));
        let rect = renderer.fit_rect(available);
        assert_eq!(rect.size(), Vec2::new(960.0, 720.0));
        assert_eq!(rect.center(), available.center());
    }

    #[test]
    fn test_fit_rect_shrinks_when_small() {
        let renderer = renderer();
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(160.0, 240.0));
        assert_eq!(renderer.fit_rect(available).size(), Vec2::new(160.0, 120.0));
    }

    #[test]
    fn test_screen_to_canvas() {
        let mut renderer = renderer();
        let ctx = egui::Context::default();
        let rect = Rect::from_min_size(Pos2::new(20.0, 40.0), Vec2::new(640.0, 480.0));
        let painter = egui::Painter::new(ctx, egui::LayerId::background(), rect);
        renderer.render(&painter, rect, &PixelSurface::new(320, 240, Color32::BLACK));

        assert_eq!(renderer.screen_to_canvas(Pos2::new(20.0, 40.0)), Point::new(0, 0));
        assert_eq!(renderer.screen_to_canvas(Pos2::new(41.0, 61.5)), Point::new(10, 10));
        assert_eq!(renderer.screen_to_canvas(Pos2::new(10.0, 40.0)), Point::new(-5, 0));
    }
}
