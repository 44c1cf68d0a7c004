use crate::config::{Size, SizeUnit};

pub const DEFAULT_DPI: f64 = 96.0;

/// Screen resolution used to turn physical sizes into pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dpi {
    pub x: f64,
    pub y: f64,
}

impl Dpi {
    pub fn uniform(dpi: f64) -> Self {
        Self { x: dpi, y: dpi }
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self::uniform(DEFAULT_DPI)
    }
}

/// Convert to pixels at `dpi` dots per inch.
pub fn to_pixels(size: Size, dpi: f64) -> f64 {
    match size.unit {
        SizeUnit::Millimeter => dpi / 25.4 * size.value,
        SizeUnit::Point => dpi / 72.0 * size.value,
        SizeUnit::Pixel => size.value,
    }
}
