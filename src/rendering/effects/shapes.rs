use map_dither::Rgb;
use tiny_skia::{PathBuilder, Rect};

use super::{Args, Effect, EffectContext, EffectError};
use crate::rendering::Canvas;

const YELLOW: Rgb = Rgb::new(255, 255, 0);

/// Border made of four filled rectangles.
pub struct Frame;

impl Effect for Frame {
    fn identifier(&self) -> &'static str {
        "frame"
    }

    fn description(&self) -> &'static str {
        "creates a 4 pixel border around the image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        _ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let args = Args::new(args);
        let color = args.color(0, YELLOW)?;
        let t = args
            .int(1, 4)
            .filter(|t| *t >= 0)
            .ok_or_else(|| EffectError::diagnostic("Error while parsing thickness argument!"))?;

        let (w, h) = (canvas.width() as i32, canvas.height() as i32);
        let t = t.min(w.max(h));
        canvas.fill_rect(0, 0, w, t, color);
        canvas.fill_rect(0, 0, t, h, color);
        canvas.fill_rect(0, h - t, w, t, color);
        canvas.fill_rect(w - t, 0, t, h, color);
        Ok(())
    }
}

/// `<color>,<x>,<y>,<width>,<height>,<hollow?>` shared by circle and rectangle.
struct ShapeArgs {
    color: Rgb,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    hollow: bool,
}

impl ShapeArgs {
    fn parse(args: &[String], canvas: &Canvas, shape: &str) -> Result<Self, EffectError> {
        let args = Args::new(args);
        let color = args.color(0, YELLOW)?;
        let ints = (
            args.int(1, 0),
            args.int(2, 0),
            args.int(3, canvas.width() as i32),
            args.int(4, canvas.height() as i32),
        );
        match ints {
            (Some(x), Some(y), Some(width), Some(height)) => Ok(Self {
                color,
                x,
                y,
                width,
                height,
                hollow: args.len() >= 6,
            }),
            _ => Err(EffectError::diagnostic(format!(
                "Error while parsing {shape} arguments! Remember to use this format: \
                 <color>,<x>,<y>,<width>,<height>,<hollow?>"
            ))),
        }
    }

    fn rect(&self) -> Option<Rect> {
        if self.width <= 0 || self.height <= 0 {
            return None;
        }
        Rect::from_xywh(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

pub struct Circle;

impl Effect for Circle {
    fn identifier(&self) -> &'static str {
        "circle"
    }

    fn description(&self) -> &'static str {
        "places a circle on the image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let shape = ShapeArgs::parse(args, canvas, "circle")?;
        let Some(path) = shape.rect().and_then(PathBuilder::from_oval) else {
            return Ok(());
        };
        if !shape.hollow {
            canvas.fill_path(&path, shape.color, ctx.anti_alias);
        }
        canvas.stroke_path(&path, shape.color, 1.0, ctx.anti_alias);
        Ok(())
    }
}

pub struct Rectangle;

impl Effect for Rectangle {
    fn identifier(&self) -> &'static str {
        "rectangle"
    }

    fn description(&self) -> &'static str {
        "places a rectangle on the image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let shape = ShapeArgs::parse(args, canvas, "rectangle")?;
        if shape.width <= 0 || shape.height <= 0 {
            return Ok(());
        }
        // the outline runs along x+width and y+height, so both variants
        // cover (width+1) x (height+1) pixels
        if !shape.hollow {
            canvas.fill_rect(
                shape.x,
                shape.y,
                shape.width.saturating_add(1),
                shape.height.saturating_add(1),
                shape.color,
            );
            return Ok(());
        }
        let Some(rect) = Rect::from_xywh(
            shape.x as f32 + 0.5,
            shape.y as f32 + 0.5,
            shape.width as f32,
            shape.height as f32,
        ) else {
            return Ok(());
        };
        let path = PathBuilder::from_rect(rect);
        canvas.stroke_path(&path, shape.color, 1.0, ctx.anti_alias);
        Ok(())
    }
}

pub struct Line;

impl Effect for Line {
    fn identifier(&self) -> &'static str {
        "line"
    }

    fn description(&self) -> &'static str {
        "places a line on the image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let args = Args::new(args);
        let color = args.color(0, YELLOW)?;
        let (Some(x1), Some(y1), Some(x2), Some(y2)) =
            (args.int(1, 0), args.int(2, 0), args.int(3, 32), args.int(4, 32))
        else {
            return Err(EffectError::diagnostic(
                "Error while parsing line arguments! Remember to use this format: \
                 <color>,<x1>,<y1>,<x2>,<y2>",
            ));
        };

        if (x1, y1) == (x2, y2) {
            if x1 >= 0 && y1 >= 0 {
                canvas.set_pixel(x1 as u32, y1 as u32, color);
            }
            return Ok(());
        }

        let mut pb = PathBuilder::new();
        pb.move_to(x1 as f32 + 0.5, y1 as f32 + 0.5);
        pb.line_to(x2 as f32 + 0.5, y2 as f32 + 0.5);
        if let Some(path) = pb.finish() {
            canvas.stroke_path(&path, color, 1.0, ctx.anti_alias);
        }
        Ok(())
    }
}
