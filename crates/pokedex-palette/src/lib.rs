//! Dominant color extraction for artwork images.
//!
//! The estimator works on a downscaled copy of the image, buckets opaque
//! pixels into a 15-bit color space, and returns the average color of the
//! most populous bucket. Buckets that are nearly black or nearly white are
//! ignored unless nothing else remains, so a sprite drawn on a white or
//! transparent background resolves to the color of the creature itself.

use std::collections::HashMap;
use std::fmt;

use image::DynamicImage;
use thiserror::Error;

/// Images larger than this many pixels are downscaled before sampling.
pub const MAX_SAMPLE_AREA: u32 = 112 * 112;

/// Pixels with alpha below this are treated as background.
pub const ALPHA_THRESHOLD: u8 = 128;

const MIN_LIGHTNESS: f32 = 0.05;
const MAX_LIGHTNESS: f32 = 0.95;

#[derive(Error, Debug)]
pub enum PaletteError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xAARRGGBB` with full alpha.
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Lowercase `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// HSL lightness in `0.0..=1.0`.
    pub fn lightness(self) -> f32 {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        (f32::from(max) + f32::from(min)) / (2.0 * 255.0)
    }

    fn is_extreme(self) -> bool {
        let l = self.lightness();
        l <= MIN_LIGHTNESS || l >= MAX_LIGHTNESS
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Bucket {
    count: u64,
    r: u64,
    g: u64,
    b: u64,
}

impl Bucket {
    fn add(&mut self, r: u8, g: u8, b: u8) {
        self.count += 1;
        self.r += u64::from(r);
        self.g += u64::from(g);
        self.b += u64::from(b);
    }

    fn average(&self) -> Rgb {
        // count is never zero for a bucket that exists in the histogram
        let avg = |sum: u64| ((sum + self.count / 2) / self.count) as u8;
        Rgb::new(avg(self.r), avg(self.g), avg(self.b))
    }
}

fn quantize(r: u8, g: u8, b: u8) -> u16 {
    (u16::from(r >> 3) << 10) | (u16::from(g >> 3) << 5) | u16::from(b >> 3)
}

/// Compute the dominant color of a decoded image.
///
/// Returns `None` when the image has no opaque pixels.
pub fn dominant_color(image: &DynamicImage) -> Option<Rgb> {
    let (width, height) = (image.width(), image.height());
    let area = u64::from(width) * u64::from(height);
    if area == 0 {
        return None;
    }

    let sampled;
    let image = if area > u64::from(MAX_SAMPLE_AREA) {
        let scale = (f64::from(MAX_SAMPLE_AREA) / area as f64).sqrt();
        let w = ((f64::from(width) * scale).ceil() as u32).max(1);
        let h = ((f64::from(height) * scale).ceil() as u32).max(1);
        sampled = image.thumbnail(w, h);
        &sampled
    } else {
        image
    };

    let mut histogram: HashMap<u16, Bucket> = HashMap::new();
    for pixel in image.to_rgba8().pixels() {
        let [r, g, b, a] = pixel.0;
        if a < ALPHA_THRESHOLD {
            continue;
        }
        histogram.entry(quantize(r, g, b)).or_default().add(r, g, b);
    }

    let most_populous = |filter_extremes: bool| {
        histogram
            .iter()
            .filter(|(_, bucket)| !filter_extremes || !bucket.average().is_extreme())
            // lower key wins ties so the result is stable across runs
            .max_by(|(ka, a), (kb, b)| a.count.cmp(&b.count).then(kb.cmp(ka)))
            .map(|(_, bucket)| bucket.average())
    };

    most_populous(true).or_else(|| most_populous(false))
}

/// Decode encoded image bytes (PNG, JPEG, WebP) and compute the dominant color.
pub fn dominant_color_from_bytes(bytes: &[u8]) -> Result<Option<Rgb>, PaletteError> {
    let image = image::load_from_memory(bytes)?;
    Ok(dominant_color(&image))
}
