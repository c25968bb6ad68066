// ============================================================
// Layer 7 — Plot Renderer
// ============================================================
// Minimal line-plot rendering straight onto an RgbImage. No
// plotting framework, just scaled polylines, which is all the
// diagnostics need.

use image::{Rgb, RgbImage};

use super::{colors, PlotConfig};
use crate::data::feature::CoordSeq;

/// Render a 1-D series (a coordinate trace or a spectrum) as a
/// polyline against the sample index.
pub fn render_series(values: &[f32], cfg: &PlotConfig) -> RgbImage {
    let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);
    if values.len() < 2 {
        return img;
    }

    let (min, max) = min_max(values);
    let span = if max > min { max - min } else { 1.0 };

    let plot_w = (cfg.width - 2 * cfg.margin) as f32;
    let plot_h = (cfg.height - 2 * cfg.margin) as f32;

    let project = |i: usize, v: f32| -> (i64, i64) {
        let x = cfg.margin as f32 + i as f32 / (values.len() - 1) as f32 * plot_w;
        // Image y grows downward, plot y grows upward
        let y = cfg.margin as f32 + (1.0 - (v - min) / span) * plot_h;
        (x as i64, y as i64)
    };

    for i in 0..values.len() - 1 {
        let (x0, y0) = project(i, values[i]);
        let (x1, y1) = project(i + 1, values[i + 1]);
        draw_line(&mut img, x0, y0, x1, y1, cfg.line_color);
    }

    img
}

/// Render the 2-D path of a sequence. The start of the path gets a
/// green marker and the end a red one so direction is readable.
pub fn render_trajectory(coords: &CoordSeq, cfg: &PlotConfig) -> RgbImage {
    let mut img = RgbImage::from_pixel(cfg.width, cfg.height, cfg.background);
    if coords.len() < 2 {
        return img;
    }

    let xs: Vec<f32> = coords.iter().map(|p| p[0]).collect();
    let ys: Vec<f32> = coords.iter().map(|p| p[1]).collect();
    let (min_x, max_x) = min_max(&xs);
    let (min_y, max_y) = min_max(&ys);
    let span_x = if max_x > min_x { max_x - min_x } else { 1.0 };
    let span_y = if max_y > min_y { max_y - min_y } else { 1.0 };

    let plot_w = (cfg.width - 2 * cfg.margin) as f32;
    let plot_h = (cfg.height - 2 * cfg.margin) as f32;

    let project = |p: [f32; 2]| -> (i64, i64) {
        let x = cfg.margin as f32 + (p[0] - min_x) / span_x * plot_w;
        let y = cfg.margin as f32 + (1.0 - (p[1] - min_y) / span_y) * plot_h;
        (x as i64, y as i64)
    };

    for pair in coords.windows(2) {
        let (x0, y0) = project(pair[0]);
        let (x1, y1) = project(pair[1]);
        draw_line(&mut img, x0, y0, x1, y1, cfg.line_color);
    }

    let (sx, sy) = project(coords[0]);
    let (ex, ey) = project(coords[coords.len() - 1]);
    draw_marker(&mut img, sx, sy, colors::GREEN);
    draw_marker(&mut img, ex, ey, colors::RED);

    img
}

/// Stack four panels into a 2x2 grid.
pub fn compose_grid(panels: [&RgbImage; 4]) -> RgbImage {
    let w = panels[0].width();
    let h = panels[0].height();
    let mut grid = RgbImage::from_pixel(2 * w, 2 * h, colors::WHITE);

    for (i, panel) in panels.iter().enumerate() {
        let ox = (i as u32 % 2) * w;
        let oy = (i as u32 / 2) * h;
        for (x, y, px) in panel.enumerate_pixels() {
            if x < w && y < h {
                grid.put_pixel(ox + x, oy + y, *px);
            }
        }
    }

    grid
}

/// Bresenham line, clipped to the image bounds.
fn draw_line(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// 5x5 filled square marker centred on (cx, cy).
fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, color: Rgb<u8>) {
    for dy in -2..=2 {
        for dx in -2..=2 {
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn min_max(values: &[f32]) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_has_line_pixels() {
        let cfg = PlotConfig::default();
        let values: Vec<f32> = (0..50).map(|i| (i as f32 * 0.3).sin()).collect();
        let img = render_series(&values, &cfg);

        let painted = img.pixels().filter(|p| **p == cfg.line_color).count();
        assert!(painted > 100, "only {painted} line pixels");
    }

    #[test]
    fn test_trajectory_has_markers() {
        let cfg = PlotConfig::default();
        let coords: CoordSeq = (0..30).map(|i| [i as f32 * 0.01, 0.5]).collect();
        let img = render_trajectory(&coords, &cfg);

        assert!(img.pixels().any(|p| *p == colors::GREEN));
        assert!(img.pixels().any(|p| *p == colors::RED));
    }

    #[test]
    fn test_short_series_is_blank() {
        let cfg = PlotConfig::default();
        let img = render_series(&[0.5], &cfg);
        assert!(img.pixels().all(|p| *p == cfg.background));
    }

    #[test]
    fn test_grid_dimensions() {
        let cfg = PlotConfig::default();
        let panel = RgbImage::from_pixel(cfg.width, cfg.height, colors::WHITE);
        let grid = compose_grid([&panel, &panel, &panel, &panel]);
        assert_eq!(grid.width(), 2 * cfg.width);
        assert_eq!(grid.height(), 2 * cfg.height);
    }
}
