//! Artwork color resolution.
//!
//! Decoding and histogramming run on tokio's blocking pool; results come back
//! to the awaiting task, so callbacks run where the request was made.

use pokedex_palette::{Rgb, dominant_color_from_bytes};

use crate::error::{PokedexError, Result};

/// Dominant color of encoded image bytes, `None` if the image has no opaque
/// pixels.
pub async fn dominant_color(image: Vec<u8>) -> Result<Option<Rgb>> {
    tokio::task::spawn_blocking(move || dominant_color_from_bytes(&image))
        .await
        .map_err(|e| PokedexError::Other(format!("color extraction task failed: {e}")))?
        .map_err(PokedexError::from)
}

/// One-shot: invoke `callback` with the dominant color, or not at all.
pub async fn resolve_artwork_color<F>(image: Vec<u8>, callback: F)
where
    F: FnOnce(Rgb),
{
    match dominant_color(image).await {
        Ok(Some(color)) => callback(color),
        Ok(None) => tracing::debug!("artwork has no opaque pixels"),
        Err(e) => tracing::warn!("Could not resolve artwork color: {e}"),
    }
}
