use crate::foundation::core::{Rgb, rgb};

/// Near-white candidate for text on dark backgrounds.
pub const LIGHT_TEXT: Rgb = rgb(0xFFFFFF);
/// Near-black candidate for text on light backgrounds.
pub const DARK_TEXT: Rgb = rgb(0x111111);
/// Default minimum contrast ratio (WCAG AA for body text).
pub const DEFAULT_MIN_CONTRAST: f64 = 4.5;

/// Relative luminance (sRGB, BT.709 weights).
pub fn relative_luminance(c: Rgb) -> f64 {
    fn linear(channel: u8) -> f64 {
        let c = f64::from(channel) / 255.0;
        if c <= 0.040_45 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126_f64.mul_add(
        linear(c.r),
        0.7152_f64.mul_add(linear(c.g), 0.0722 * linear(c.b)),
    )
}

/// Contrast ratio between two colors, `1.0..=21.0`, symmetric.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Outcome of [`pick_text_color`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContrastChoice {
    /// Chosen text color.
    pub color: Rgb,
    /// Its contrast ratio against the background.
    pub ratio: f64,
    /// `false` when neither candidate reached the minimum and the better one was returned anyway.
    pub meets_minimum: bool,
}

/// Pick whichever candidate reads best on `background`.
///
/// A qualifying candidate always wins over a non-qualifying one; among qualifying (or among
/// non-qualifying) candidates the higher ratio wins. Never fails.
pub fn pick_text_color(background: Rgb, light: Rgb, dark: Rgb, min_ratio: f64) -> ContrastChoice {
    let rl = contrast_ratio(background, light);
    let rd = contrast_ratio(background, dark);
    let ok_l = rl >= min_ratio;
    let ok_d = rd >= min_ratio;

    let (color, ratio) = match (ok_l, ok_d) {
        (true, false) => (light, rl),
        (false, true) => (dark, rd),
        _ if rl >= rd => (light, rl),
        _ => (dark, rd),
    };

    let meets_minimum = ok_l || ok_d;
    if !meets_minimum {
        tracing::warn!(
            background = %background,
            chosen = %color,
            ratio,
            min_ratio,
            "no text color candidate meets the contrast minimum"
        );
    }
    ContrastChoice {
        color,
        ratio,
        meets_minimum,
    }
}

/// [`pick_text_color`] with the standard near-white/near-black candidates.
pub fn readable_text_on(background: Rgb, min_ratio: f64) -> ContrastChoice {
    pick_text_color(background, LIGHT_TEXT, DARK_TEXT, min_ratio)
}

#[cfg(test)]
#[path = "../../tests/unit/theme/contrast.rs"]
mod tests;
