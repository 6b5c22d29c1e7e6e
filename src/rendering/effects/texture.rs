use super::{Args, Effect, EffectContext, EffectError};
use crate::rendering::textures::TextureError;
use crate::rendering::Canvas;

/// Texture placed at an arbitrary position and size.
pub struct Texture;

impl Effect for Texture {
    fn identifier(&self) -> &'static str {
        "texture"
    }

    fn description(&self) -> &'static str {
        "places a texture on the image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let args = Args::new(args);
        let parsed = (
            args.str(0).filter(|name| !name.is_empty()),
            args.int(1, 0),
            args.int(2, 0),
            args.int(3, canvas.width() as i32),
            args.int(4, canvas.height() as i32),
        );
        let (Some(name), Some(x), Some(y), Some(width), Some(height)) = parsed else {
            return Err(EffectError::diagnostic(
                "Error while parsing texture arguments! Remember to use this format: \
                 <texture>,<x>,<y>,<width>,<height>",
            ));
        };

        let texture = ctx.textures.load(name).map_err(|e| {
            tracing::warn!(%e, "Texture effect failed");
            match e {
                TextureError::NotFound(_) => EffectError::diagnostic(
                    "Specified texture does not exist! Please check your spelling.",
                ),
                TextureError::Unreadable { .. } => EffectError::diagnostic(
                    "Error while loading texture! This might indicate a server issue.",
                ),
            }
        })?;

        canvas.draw_scaled(&texture, x, y, width, height);
        Ok(())
    }
}
