use crate::error::{ScreencraftError, ScreencraftResult};

/// Largest kernel radius the convolution will build. Surfaces are capped at
/// u16 extents, so wider kernels cannot arise from valid settings.
pub const MAX_KERNEL_RADIUS: u32 = u16::MAX as u32;

/// Separable Gaussian blur over premultiplied RGBA8 with clamp-to-edge
/// sampling. Radius 0 is the identity.
pub fn blur_premul_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> ScreencraftResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| ScreencraftError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(ScreencraftError::render(
            "blur_premul_rgba8 expects src matching width*height*4",
        ));
    }
    if radius == 0 || width == 0 || height == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    convolve_axis(src, &mut tmp, width, height, &kernel, Axis::X);
    convolve_axis(&tmp, &mut out, width, height, &kernel, Axis::Y);
    Ok(out)
}

/// Blur sigma used for canvas-style blur radii (`filter: blur(r)` and
/// `shadowBlur`), which spread roughly two sigmas per side.
pub fn sigma_for_radius(radius: u32) -> f32 {
    (radius as f32 / 2.0).max(0.5)
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Normalized Q16 fixed-point kernel; weights sum to exactly 1<<16 so a
/// constant image passes through unchanged.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> ScreencraftResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if radius > MAX_KERNEL_RADIUS {
        return Err(ScreencraftError::render(format!(
            "blur radius {radius} exceeds {MAX_KERNEL_RADIUS}"
        )));
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(ScreencraftError::render("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(ScreencraftError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Push rounding residue into the center tap.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn convolve_axis(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32], axis: Axis) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i32 - radius;
                let (sx, sy) = match axis {
                    Axis::X => ((x + d).clamp(0, w - 1), y),
                    Axis::Y => (x, (y + d).clamp(0, h - 1)),
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}
