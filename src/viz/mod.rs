// ============================================================
// Layer 7 — Visualization
// ============================================================
// Renders PNG diagnostics for recorded sequences:
//   - per-axis coordinate traces with their frequency spectra
//   - the 2-D head trajectory with start/end markers
//
// These images are for eyeballing the data, not for the model.

/// Frequency spectrum computation
pub mod fft;
/// PNG plot rendering
pub mod plot;

use image::Rgb;

/// Common color definitions
pub mod colors {
    use image::Rgb;

    pub const GREEN: Rgb<u8> = Rgb([0, 200, 83]);
    pub const RED: Rgb<u8> = Rgb([255, 68, 68]);
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const LIGHT_GRAY: Rgb<u8> = Rgb([200, 200, 200]);
    pub const BLUE: Rgb<u8> = Rgb([33, 150, 243]);
    pub const ORANGE: Rgb<u8> = Rgb([255, 152, 0]);
}

/// Plot configuration
#[derive(Debug, Clone)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub line_color: Rgb<u8>,
    pub margin: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            background: colors::WHITE,
            line_color: colors::BLUE,
            margin: 10,
        }
    }
}

impl PlotConfig {
    pub fn with_line_color(mut self, color: Rgb<u8>) -> Self {
        self.line_color = color;
        self
    }
}
