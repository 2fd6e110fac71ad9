//! Color matrix transforms and source-over compositing of RGBA buffers.
//!
//! Buffers here are straight (non-premultiplied) RGBA, 4 bytes per pixel,
//! row-major.

/// A 5x5 color matrix applied to row vectors `[r, g, b, a, 1]` with channels
/// normalized to `0.0..=1.0`.
///
/// Row 4 holds per-channel offsets. The output channel `j` is
/// `sum_i(in[i] * m[i][j]) + m[4][j]`, clamped to `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    pub m: [[f32; 5]; 5],
}

impl ColorMatrix {
    pub fn identity() -> Self {
        let mut m = [[0.0; 5]; 5];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { m }
    }

    /// Keep color channels and scale alpha by `opacity`.
    pub fn with_opacity(opacity: f32) -> Self {
        let mut matrix = Self::identity();
        matrix.m[3][3] = opacity;
        matrix
    }

    /// Transform one straight RGBA pixel.
    pub fn transform(&self, px: [u8; 4]) -> [u8; 4] {
        let input = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
            px[3] as f32 / 255.0,
            1.0,
        ];
        let mut out = [0u8; 4];
        for (j, channel) in out.iter_mut().enumerate() {
            let v: f32 = (0..5).map(|i| input[i] * self.m[i][j]).sum();
            *channel = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        out
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Draw `src` through `matrix` onto `dst` with source-over blending.
///
/// Both buffers must hold the same number of pixels.
pub fn draw_with_matrix(dst: &mut [u8], src: &[u8], matrix: &ColorMatrix) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let transformed = matrix.transform([s[0], s[1], s[2], s[3]]);
        blend_over(d, transformed);
    }
}

/// Source-over blend of one straight RGBA pixel onto another.
#[inline]
fn blend_over(dst: &mut [u8], src: [u8; 4]) {
    let [src_r, src_g, src_b, src_a] = src;

    // Skip fully transparent pixels
    if src_a == 0 {
        return;
    }

    let src_a_f = src_a as f32 / 255.0;
    let dst_a_f = dst[3] as f32 / 255.0;

    let out_a = src_a_f + dst_a_f * (1.0 - src_a_f);
    if out_a <= 0.0 {
        return;
    }

    let mix = |s: u8, d: u8| {
        ((s as f32 * src_a_f + d as f32 * dst_a_f * (1.0 - src_a_f)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    dst[0] = mix(src_r, dst[0]);
    dst[1] = mix(src_g, dst[1]);
    dst[2] = mix(src_b, dst[2]);
    dst[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_lossless() {
        let m = ColorMatrix::identity();
        for v in [0u8, 1, 74, 75, 128, 199, 254, 255] {
            assert_eq!(m.transform([v, 255 - v, v / 2, 255]), [v, 255 - v, v / 2, 255]);
        }
    }

    #[test]
    fn test_half_opacity() {
        let m = ColorMatrix::with_opacity(0.5);
        assert_eq!(m.transform([181, 0, 0, 255]), [181, 0, 0, 128]);
        assert_eq!(m.transform([0, 0, 0, 255]), [0, 0, 0, 128]);
    }

    #[test]
    fn test_draw_onto_transparent_keeps_color() {
        let src = [0u8, 180, 0, 255, 0, 0, 154, 255];
        let mut dst = [0u8; 8];
        draw_with_matrix(&mut dst, &src, &ColorMatrix::with_opacity(0.5));
        assert_eq!(dst, [0, 180, 0, 128, 0, 0, 154, 128]);
    }

    #[test]
    fn test_draw_over_opaque_blends() {
        let src = [255u8, 0, 0, 255];
        let mut dst = [0u8, 0, 255, 255];
        draw_with_matrix(&mut dst, &src, &ColorMatrix::with_opacity(0.5));
        assert_eq!(dst[3], 255);
        assert!(dst[0] > 120 && dst[0] < 135);
        assert!(dst[2] > 120 && dst[2] < 135);
    }
}
