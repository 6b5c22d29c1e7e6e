//! Error diffusion kernel and the shared diffusion loop.

use crate::color::{alpha, pack, Rgb};
use crate::palette::Palette;

/// An error diffusion kernel.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries. `dy` is never negative.
    pub entries: &'static [(i32, i32, u8)],
    /// Each neighbour receives `error * weight / divisor`.
    pub divisor: u8,
}

/// Floyd-Steinberg kernel.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Diffuse quantization error over a working copy of `pixels`.
///
/// Pixels are visited in strict raster order. For each one the nearest
/// entry is chosen from the current (already adjusted) value and the
/// error against the entry's *displayed* color is pushed to the in-bounds
/// neighbours named by `kernel`. Every adjusted channel is truncated
/// toward zero and clamped to `[0, 255]` as it is written.
///
/// Transparent pixels become the clear entry and carry no error.
pub fn dither_with_kernel(
    pixels: &[u32],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
) -> Vec<u8> {
    let mut work = pixels.to_vec();
    let mut out = vec![0u8; work.len()];
    let divisor = kernel.divisor as f64;

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let current = work[i];
            let index = palette.find_nearest(current);
            out[i] = index;

            if Palette::is_clear(index) {
                continue;
            }

            let original = Rgb::from_argb(current);
            let shown = palette.displayed(index);
            let error = [
                original.r as i32 - shown.r as i32,
                original.g as i32 - shown.g as i32,
                original.b as i32 - shown.b as i32,
            ];
            if error == [0, 0, 0] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let ni = ny as usize * width + nx as usize;
                work[ni] = apply_error(work[ni], error, weight as f64 / divisor);
            }
        }
    }

    out
}

fn apply_error(argb: u32, error: [i32; 3], factor: f64) -> u32 {
    let c = Rgb::from_argb(argb);
    let adjust = |channel: u8, e: i32| (channel as i32 + (e as f64 * factor) as i32).clamp(0, 255) as u8;
    pack(
        alpha(argb),
        adjust(c.r, error[0]),
        adjust(c.g, error[1]),
        adjust(c.b, error[2]),
    )
}
