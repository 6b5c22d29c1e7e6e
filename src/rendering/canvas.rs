//! True-color drawing surface shared by all effects during one render.

use map_dither::Rgb;
use tiny_skia::{
    ColorU8, FillRule, FilterQuality, Paint, Path, Pixmap, PixmapPaint, Rect, Stroke, Transform,
};

use crate::error::RenderError;

/// Fixed-size RGBA raster. Starts fully opaque black; its dimensions never
/// change after creation.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::BLACK);
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Paint the whole canvas with one color.
    pub fn fill(&mut self, color: Rgb) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255));
    }

    /// Fill an integer rectangle. Empty or negative sizes draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Rgb) {
        if width <= 0 || height <= 0 {
            return;
        }
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &paint(color, false), Transform::identity(), None);
        }
    }

    pub fn fill_path(&mut self, path: &Path, color: Rgb, anti_alias: bool) {
        self.pixmap.fill_path(
            path,
            &paint(color, anti_alias),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    pub fn stroke_path(&mut self, path: &Path, color: Rgb, width: f32, anti_alias: bool) {
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            path,
            &paint(color, anti_alias),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    /// Overwrite a single pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let i = (y * self.width() + x) as usize;
        self.pixmap.pixels_mut()[i] = ColorU8::from_rgba(color.r, color.g, color.b, 255).premultiply();
    }

    /// Draw `image` stretched to the given box with nearest-neighbour sampling.
    pub fn draw_scaled(&mut self, image: &Pixmap, x: i32, y: i32, width: i32, height: i32) {
        if width <= 0 || height <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let sx = width as f32 / image.width() as f32;
        let sy = height as f32 / image.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, x as f32, y as f32);
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    /// Color at `(x, y)` with alpha dropped.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Rgb::new(c.red(), c.green(), c.blue())
        })
    }

    /// Row-major `0xAARRGGBB` copy of the canvas for quantization.
    pub fn to_argb(&self) -> Vec<u32> {
        self.pixmap
            .pixels()
            .iter()
            .map(|p| {
                let c = p.demultiply();
                map_dither::color::pack(c.alpha(), c.red(), c.green(), c.blue())
            })
            .collect()
    }
}

fn paint(color: Rgb, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = anti_alias;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_opaque_black() {
        let canvas = Canvas::new(3, 2).unwrap();
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 2);
        assert!(canvas.to_argb().iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn test_zero_size_canvas_fails() {
        assert!(matches!(
            Canvas::new(0, 10),
            Err(RenderError::PixmapAllocation)
        ));
    }

    #[test]
    fn test_fill_rect_clips_and_skips_empty() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.fill_rect(2, 2, 10, 10, Rgb::WHITE);
        canvas.fill_rect(0, 0, -1, 2, Rgb::WHITE);
        assert_eq!(canvas.pixel(3, 3), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_set_pixel_ignores_out_of_bounds() {
        let mut canvas = Canvas::new(2, 2).unwrap();
        canvas.set_pixel(1, 0, Rgb::new(10, 20, 30));
        canvas.set_pixel(5, 5, Rgb::WHITE);
        assert_eq!(canvas.pixel(1, 0), Some(Rgb::new(10, 20, 30)));
        assert_eq!(canvas.to_argb()[1], 0xFF0A_141E);
    }

    #[test]
    fn test_draw_scaled_nearest() {
        let mut image = Pixmap::new(1, 1).unwrap();
        image.fill(tiny_skia::Color::from_rgba8(0, 255, 0, 255));
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.draw_scaled(&image, 0, 0, 4, 4);
        assert!(canvas.to_argb().iter().all(|&p| p == 0xFF00_FF00));
    }
}
