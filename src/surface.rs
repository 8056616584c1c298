//! Pixel surfaces and the immediate-mode primitives the tools draw with.
//!
//! Every primitive clips against the surface bounds, so off-surface
//! coordinates are silently accepted.

use egui::{Color32, ColorImage};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::geometry::{PixelRect, Point};

/// A 2D pixel-writable target.
///
/// Implementors supply pixel access, `fill` and `blit`; the shape
/// primitives are provided on top of `put_pixel`.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Colour at `(x, y)`, or `None` outside the surface
    fn pixel(&self, x: i32, y: i32) -> Option<Color32>;

    /// Writes a single pixel. Out-of-bounds writes are ignored.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color32);

    /// Fills the whole surface with one colour
    fn fill(&mut self, color: Color32);

    /// Copies `src_rect` of `src` so that its top-left lands on `dest`.
    ///
    /// Source pixels matching `colorkey`, and fully transparent source
    /// pixels, are skipped.
    fn blit(&mut self, src: &PixelSurface, src_rect: PixelRect, dest: Point, colorkey: Option<Color32>);

    fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, self.width(), self.height())
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color32) {
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.put_pixel(x, y, color);
            }
        }
    }

    /// Straight segment from `a` to `b`, both ends inclusive.
    ///
    /// Thickness below 2 gives a one pixel wide line; wider lines stamp a
    /// square pen centred on each step.
    fn draw_line(&mut self, a: Point, b: Point, color: Color32, thickness: u32) {
        // a pen twice the surface's longest side already covers all of it
        let limit = self.width().max(self.height()).saturating_mul(2).saturating_add(1);
        let pen = thickness.clamp(1, limit);
        let lead = -(i32::try_from(pen - 1).unwrap_or(i32::MAX) / 2);

        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        let mut p = a;

        loop {
            if pen == 1 {
                self.put_pixel(p.x, p.y, color);
            } else {
                let corner = Point::new(p.x.saturating_add(lead), p.y.saturating_add(lead));
                self.fill_rect(PixelRect::new(corner.x, corner.y, pen, pen), color);
            }
            if p == b {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                p.x += sx;
            }
            if e2 <= dx {
                err += dx;
                p.y += sy;
            }
        }
    }

    /// Rectangle outline drawn inward from the edges, or solid when
    /// `thickness` is 0 (or too wide to leave a hole).
    fn draw_rect(&mut self, rect: PixelRect, color: Color32, thickness: u32) {
        if rect.is_empty() {
            return;
        }
        let span = thickness.saturating_mul(2);
        if thickness == 0 || span >= rect.width || span >= rect.height {
            self.fill_rect(rect, color);
            return;
        }

        let t = thickness;
        let inner_height = rect.height - 2 * t;
        self.fill_rect(PixelRect::new(rect.x, rect.y, rect.width, t), color);
        self.fill_rect(PixelRect::new(rect.x, rect.bottom() - t as i32, rect.width, t), color);
        self.fill_rect(PixelRect::new(rect.x, rect.y + t as i32, t, inner_height), color);
        self.fill_rect(
            PixelRect::new(rect.right() - t as i32, rect.y + t as i32, t, inner_height),
            color,
        );
    }

    /// Circle around `center`. The radius is rounded to whole pixels; a
    /// `thickness` of 0 fills the disc.
    fn draw_circle(&mut self, center: Point, radius: f32, color: Color32, thickness: u32) {
        let r = radius.round().max(0.0) as i32;
        let outer = (r as f32 + 0.5).powi(2);
        let inner = if thickness == 0 || thickness > r.unsigned_abs() {
            None
        } else {
            Some((r as f32 - thickness as f32 + 0.5).powi(2))
        };

        let bounds = self.bounds();
        let y0 = (center.y - r).max(bounds.y);
        let y1 = (center.y + r).min(bounds.bottom() - 1);
        let x0 = (center.x - r).max(bounds.x);
        let x1 = (center.x + r).min(bounds.right() - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x - center.x) as f32;
                let dy = (y - center.y) as f32;
                let d2 = dx * dx + dy * dy;
                let inside_outer = d2 < outer;
                let outside_inner = inner.is_none_or(|inner| d2 >= inner);
                if inside_outer && outside_inner {
                    self.put_pixel(x, y, color);
                }
            }
        }
    }
}

/// An owned RGBA pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    image: RgbaImage,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32, color: Color32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, to_rgba(color)),
        }
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Nearest-neighbour rescale, keeping hard pixel edges
    pub fn scaled(&self, width: u32, height: u32) -> Self {
        Self {
            image: imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    /// Replaces this surface's contents with `other`'s. Sizes must match.
    pub fn copy_from(&mut self, other: &PixelSurface) {
        debug_assert_eq!(self.image.dimensions(), other.image.dimensions());
        self.image.clone_from(&other.image);
    }

    /// Snapshot for uploading as an egui texture
    pub fn to_color_image(&self) -> ColorImage {
        let size = [self.image.width() as usize, self.image.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, self.image.as_raw())
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.image.width() && (y as u32) < self.image.height()
    }
}

impl Surface for PixelSurface {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Color32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(to_color32(*self.image.get_pixel(x as u32, y as u32)))
    }

    fn put_pixel(&mut self, x: i32, y: i32, color: Color32) {
        if self.in_bounds(x, y) {
            self.image.put_pixel(x as u32, y as u32, to_rgba(color));
        }
    }

    fn fill(&mut self, color: Color32) {
        let rgba = to_rgba(color);
        for pixel in self.image.pixels_mut() {
            *pixel = rgba;
        }
    }

    fn blit(&mut self, src: &PixelSurface, src_rect: PixelRect, dest: Point, colorkey: Option<Color32>) {
        let Some(src_rect) = src_rect.intersect(&src.bounds()) else {
            return;
        };
        for sy in 0..src_rect.height as i32 {
            for sx in 0..src_rect.width as i32 {
                let (x, y) = (dest.x + sx, dest.y + sy);
                if !self.in_bounds(x, y) {
                    continue;
                }
                let pixel = *src.image.get_pixel((src_rect.x + sx) as u32, (src_rect.y + sy) as u32);
                if pixel[3] == 0 || colorkey.is_some_and(|key| matches_key(pixel, key)) {
                    continue;
                }
                self.image.put_pixel(x as u32, y as u32, pixel);
            }
        }
    }
}

fn matches_key(pixel: Rgba<u8>, key: Color32) -> bool {
    pixel[0] == key.r() && pixel[1] == key.g() && pixel[2] == key.b()
}

pub fn to_rgba(color: Color32) -> Rgba<u8> {
    Rgba(color.to_srgba_unmultiplied())
}

pub fn to_color32(pixel: Rgba<u8>) -> Color32 {
    Color32::from_rgba_unmultiplied(pixel[0], pixel[1], pixel[2], pixel[3])
}
