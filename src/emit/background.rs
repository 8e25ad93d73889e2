use std::io::Cursor;

use crate::foundation::{
    core::Rgb,
    error::{LecternError, LecternResult},
};

/// Rows in an embedded gradient image; containers stretch it over the page.
pub const GRADIENT_ROWS: u32 = 256;

/// Vertical `top`→`bottom` blend, `width`×`height` pixels.
pub fn gradient_image(top: Rgb, bottom: Rgb, width: u32, height: u32) -> image::RgbImage {
    let span = f64::from(height.saturating_sub(1).max(1));
    image::RgbImage::from_fn(width.max(1), height.max(1), |_, y| {
        let c = top.lerp(bottom, f64::from(y) / span);
        image::Rgb([c.r, c.g, c.b])
    })
}

/// PNG bytes of a one-pixel-wide gradient strip.
pub fn gradient_png(top: Rgb, bottom: Rgb) -> LecternResult<Vec<u8>> {
    encode_png(&gradient_image(top, bottom, 1, GRADIENT_ROWS))
}

/// Raw RGB8 samples of the gradient strip (for containers that embed pixels directly).
pub fn gradient_samples(top: Rgb, bottom: Rgb) -> Vec<u8> {
    gradient_image(top, bottom, 1, GRADIENT_ROWS).into_raw()
}

pub(crate) fn encode_png<P, C>(img: &image::ImageBuffer<P, C>) -> LecternResult<Vec<u8>>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .map_err(|e| LecternError::emit(format!("png encode: {e}")))?;
    Ok(out.into_inner())
}

#[cfg(test)]
#[path = "../../tests/unit/emit/background.rs"]
mod tests;
