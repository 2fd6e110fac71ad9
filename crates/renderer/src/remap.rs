//! Gray-level to heat color remapping.
//!
//! After stamping, the working canvas is opaque grayscale: white where no dot
//! landed, darker where dots pile up. The remap table turns each gray level
//! into a heat color in three bands:
//!
//! | Gray levels | Color            | Density |
//! |-------------|------------------|---------|
//! | `0..75`     | `(255 - i, 0, 0)`| high    |
//! | `75..200`   | `(0, 255 - i, 0)`| medium  |
//! | `200..255`  | `(0, 0, i - 100)`| low     |
//!
//! Level 255 (untouched background) is not in the table; it is handled by
//! [`substitute_background`], which only matches exact white.

/// Number of gray levels covered by the table (0..=254).
pub const REMAP_LEVELS: usize = 255;

/// Upper bounds (exclusive) of the red and green bands.
pub const RED_BAND_END: u8 = 75;
pub const GREEN_BAND_END: u8 = 200;

/// Gray level to RGB lookup for levels 0..=254.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable {
    entries: [[u8; 3]; REMAP_LEVELS],
}

impl RemapTable {
    /// Build the red/green/blue heat table.
    pub fn heat() -> Self {
        let mut entries = [[0u8; 3]; REMAP_LEVELS];
        for (i, entry) in entries.iter_mut().enumerate() {
            let i = i as u8;
            *entry = if i < RED_BAND_END {
                [255 - i, 0, 0]
            } else if i < GREEN_BAND_END {
                [0, 255 - i, 0]
            } else {
                [0, 0, i - 100]
            };
        }
        Self { entries }
    }

    /// Color for a gray level, or `None` for 255.
    #[inline]
    pub fn lookup(&self, gray: u8) -> Option<[u8; 3]> {
        self.entries.get(gray as usize).copied()
    }

    /// Recolor every opaque gray pixel in an RGBA buffer.
    ///
    /// Pixels that are not gray (`r == g == b`), not opaque, or at level 255
    /// are left unchanged. Returns the number of pixels recolored.
    pub fn apply(&self, pixels: &mut [u8]) -> usize {
        let mut recolored = 0;
        for px in pixels.chunks_exact_mut(4) {
            if px[3] != 255 || px[0] != px[1] || px[1] != px[2] {
                continue;
            }
            if let Some([r, g, b]) = self.lookup(px[0]) {
                px[0] = r;
                px[1] = g;
                px[2] = b;
                recolored += 1;
            }
        }
        recolored
    }
}

impl Default for RemapTable {
    fn default() -> Self {
        Self::heat()
    }
}

/// Replace exact opaque white with opaque black.
///
/// Near-white pixels at the faint rim of a dot (254 and below) have already
/// been mapped into the blue band and are not touched here; only the
/// untouched background is. Returns the number of pixels replaced.
pub fn substitute_background(pixels: &mut [u8]) -> usize {
    let mut replaced = 0;
    for px in pixels.chunks_exact_mut(4) {
        if *px == [255u8; 4] {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            replaced += 1;
        }
    }
    replaced
}
