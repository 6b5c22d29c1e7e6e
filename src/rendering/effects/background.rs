use map_dither::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Args, Effect, EffectContext, EffectError};
use crate::rendering::{colors, Canvas};

/// Jitter range for colored noise, exclusive.
const JITTER: u8 = 10;

/// Base of the wood-like noise drawn for `brown`.
const WOOD: Rgb = Rgb::new(120, 78, 44);

pub struct Background;

impl Effect for Background {
    fn identifier(&self) -> &'static str {
        "background"
    }

    fn description(&self) -> &'static str {
        "fills the background with a solid color"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        _ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let color = Args::new(args).color(0, Rgb::BLACK)?;
        canvas.fill(color);
        Ok(())
    }
}

/// Per-pixel noise around a base color.
pub struct BackgroundRandom;

impl Effect for BackgroundRandom {
    fn identifier(&self) -> &'static str {
        "background-random"
    }

    fn description(&self) -> &'static str {
        "sets the background to a random palette of a given color (or a fully random palette)"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let mut rng = match ctx.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let token = Args::new(args).str(0).unwrap_or("");

        let mut noise: Box<dyn FnMut(&mut StdRng) -> Rgb> = match token {
            "" => Box::new(|rng: &mut StdRng| Rgb::new(rng.gen(), rng.gen(), rng.gen())),
            "brown" => Box::new(wood),
            _ => {
                let base = colors::resolve(token, Rgb::BLACK)?;
                Box::new(move |rng: &mut StdRng| {
                    Rgb::new(
                        jitter(base.r, rng),
                        jitter(base.g, rng),
                        jitter(base.b, rng),
                    )
                })
            }
        };

        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                let color = noise(&mut rng);
                canvas.set_pixel(x, y, color);
            }
        }
        Ok(())
    }
}

/// Dark channels drift up, bright channels drift down, so noise never
/// clips.
fn jitter(channel: u8, rng: &mut StdRng) -> u8 {
    let delta = rng.gen_range(0..JITTER);
    if channel < 127 {
        channel.saturating_add(delta)
    } else {
        channel.saturating_sub(delta)
    }
}

/// One shared brightness offset keeps the hue warm, a little extra red
/// gives it grain.
fn wood(rng: &mut StdRng) -> Rgb {
    let shade = rng.gen_range(-14i16..=14);
    let grain = rng.gen_range(0i16..6);
    let channel = |base: u8, extra: i16| (base as i16 + shade + extra).clamp(0, 255) as u8;
    Rgb::new(channel(WOOD.r, grain), channel(WOOD.g, 0), channel(WOOD.b, 0))
}

/// Texture stretched over the whole canvas.
pub struct BackgroundTexture;

impl Effect for BackgroundTexture {
    fn identifier(&self) -> &'static str {
        "background-texture"
    }

    fn description(&self) -> &'static str {
        "sets the background to a texture image"
    }

    fn apply(
        &self,
        canvas: &mut Canvas,
        ctx: &EffectContext<'_>,
        args: &[String],
    ) -> Result<(), EffectError> {
        let name = Args::new(args).str(0).unwrap_or("");
        match ctx.textures.load(name) {
            Ok(texture) => {
                let (w, h) = (canvas.width() as i32, canvas.height() as i32);
                canvas.draw_scaled(&texture, 0, 0, w, h);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(%e, "Background texture failed");
                Err(EffectError::diagnostic(
                    "Error while loading texture! Please check your spelling.",
                ))
            }
        }
    }
}
