//! Deterministic advance-width tables.
//!
//! Widths are the standard PDF base-14 metrics (units per 1000 em) for Helvetica,
//! Helvetica-Bold and Courier. The PDF emitter draws with exactly these faces, so a measured
//! line is also the drawn line.

/// Typographic role of a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Headings (bold face).
    Title,
    /// Running text.
    #[default]
    Body,
    /// Monospace.
    Mono,
}

/// Measures the advance width of a single line of text.
pub trait TextMeasure: Send + Sync {
    /// Width in points of `text` set in `role` at `size` points.
    fn measure(&self, text: &str, role: FontRole, size: f64) -> f64;
}

/// Measurement with the built-in base-14 tables.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMetrics;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const COURIER_ADVANCE: u16 = 600;

fn char_units(c: char, role: FontRole) -> u16 {
    if role == FontRole::Mono {
        return COURIER_ADVANCE;
    }
    let bold = role == FontRole::Title;
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match c {
        ' '..='~' => table[(c as usize) - 32],
        '\u{a0}' => 278,
        '\u{2022}' => 350,
        '\u{2026}' | '\u{2014}' => 1000,
        '\u{2013}' => 556,
        '\u{b7}' => 278,
        '\u{2018}' | '\u{2019}' => {
            if bold {
                278
            } else {
                222
            }
        }
        '\u{201c}' | '\u{201d}' => {
            if bold {
                500
            } else {
                333
            }
        }
        _ => {
            if bold {
                611
            } else {
                556
            }
        }
    }
}

impl TextMeasure for StandardMetrics {
    fn measure(&self, text: &str, role: FontRole, size: f64) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(char_units(c, role))).sum();
        f64::from(units) * size / 1000.0
    }
}
