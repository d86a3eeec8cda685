// ─────────────────────────────────────────────────────────────────────
// SCPN NUFFT Check — Figures
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Minimal raster figures: panels side by side on one RGB canvas, saved
//! as PNG. No text is drawn; panel titles belong in the JSON report.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use ndarray::Array2;
use nufft_types::config::PlotConfig;
use nufft_types::error::{NufftError, NufftResult};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([0x26, 0x26, 0x26]);
const BASELINE: Rgb<u8> = Rgb([0x66, 0x66, 0x66]);
const MISSING: Rgb<u8> = Rgb([255, 255, 255]);

/// Matplotlib's default qualitative cycle.
pub const TAB10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Viridis anchors at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// Piecewise-linear viridis for `t` in `[0, 1]` (clamped).
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let i = (pos.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = pos - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let mix = |c: usize| (a[c] as f64 + frac * (b[c] as f64 - a[c] as f64)).round() as u8;
    Rgb([mix(0), mix(1), mix(2)])
}

/// Pixel rectangle a panel draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelArea {
    pub x0: u32,
    pub y0: u32,
    pub width: u32,
    pub height: u32,
}

impl PanelArea {
    fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x0 as i64
            && y >= self.y0 as i64
            && x < (self.x0 + self.width) as i64
            && y < (self.y0 + self.height) as i64
    }

    fn put(&self, canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
        if self.contains(x, y) {
            canvas.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Pixel column of `v` on `[lo, hi]`.
    fn column(&self, v: f64, lo: f64, hi: f64) -> i64 {
        let frac = if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
        self.x0 as i64 + (frac * (self.width - 1) as f64).round() as i64
    }

    /// Pixel row of `v` on `[lo, hi]`, larger values higher up.
    fn row(&self, v: f64, lo: f64, hi: f64) -> i64 {
        let frac = if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
        (self.y0 + self.height - 1) as i64 - (frac * (self.height - 1) as f64).round() as i64
    }
}

pub trait Panel {
    fn draw(&self, canvas: &mut RgbImage, area: PanelArea);
}

/// Bresenham segment, clipped to `area`.
fn draw_line(
    canvas: &mut RgbImage,
    area: PanelArea,
    (mut x0, mut y0): (i64, i64),
    (x1, y1): (i64, i64),
    color: Rgb<u8>,
) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        area.put(canvas, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Columns of a matrix as stacked traces: column `i` is drawn at
/// `column / 2 + i` against `x`, over a grey baseline at `i`.
#[derive(Debug, Clone, Copy)]
pub struct LinePanel<'a> {
    x: &'a [f64],
    matrix: &'a Array2<f64>,
}

impl<'a> LinePanel<'a> {
    pub fn new(x: &'a [f64], matrix: &'a Array2<f64>) -> NufftResult<Self> {
        if matrix.nrows() != x.len() {
            return Err(NufftError::DimensionMismatch {
                expected: x.len(),
                got: matrix.nrows(),
            });
        }
        Ok(LinePanel { x, matrix })
    }

    fn offset_value(&self, r: usize, c: usize) -> f64 {
        self.matrix[[r, c]] / 2.0 + c as f64
    }
}

impl Panel for LinePanel<'_> {
    fn draw(&self, canvas: &mut RgbImage, area: PanelArea) {
        let (rows, cols) = self.matrix.dim();
        if rows == 0 || cols == 0 {
            return;
        }
        let Some((x_lo, x_hi)) = finite_range(self.x.iter().copied()) else {
            return;
        };
        let traces = (0..cols).flat_map(|c| (0..rows).map(move |r| (r, c)));
        let (mut y_lo, mut y_hi) = finite_range(traces.map(|(r, c)| self.offset_value(r, c)))
            .unwrap_or((0.0, 0.0));
        y_lo = y_lo.min(0.0);
        y_hi = y_hi.max((cols - 1) as f64);
        let pad = 0.05 * (y_hi - y_lo).max(1.0);
        let (y_lo, y_hi) = (y_lo - pad, y_hi + pad);

        let left = area.column(x_lo, x_lo, x_hi);
        let right = area.column(x_hi, x_lo, x_hi);
        for c in 0..cols {
            let y = area.row(c as f64, y_lo, y_hi);
            draw_line(canvas, area, (left, y), (right, y), BASELINE);
        }

        for c in 0..cols {
            let [r, g, b] = TAB10[c % TAB10.len()];
            let color = Rgb([r, g, b]);
            let mut previous: Option<(i64, i64)> = None;
            for row in 0..rows {
                let (xv, yv) = (self.x[row], self.offset_value(row, c));
                if !xv.is_finite() || !yv.is_finite() {
                    previous = None;
                    continue;
                }
                let point = (area.column(xv, x_lo, x_hi), area.row(yv, y_lo, y_hi));
                match previous {
                    Some(p) => draw_line(canvas, area, p, point, color),
                    None => area.put(canvas, point.0, point.1, color),
                }
                previous = Some(point);
            }
        }
    }
}

/// `imshow`-style matrix image, stretched to the panel, colour scaled to
/// the matrix min/max.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapPanel<'a> {
    matrix: &'a Array2<f64>,
}

impl<'a> HeatmapPanel<'a> {
    pub fn new(matrix: &'a Array2<f64>) -> Self {
        HeatmapPanel { matrix }
    }
}

impl Panel for HeatmapPanel<'_> {
    fn draw(&self, canvas: &mut RgbImage, area: PanelArea) {
        let (rows, cols) = self.matrix.dim();
        if rows == 0 || cols == 0 {
            return;
        }
        let (lo, hi) = finite_range(self.matrix.iter().copied()).unwrap_or((0.0, 0.0));
        for py in 0..area.height {
            let r = (py as usize * rows) / area.height as usize;
            for px in 0..area.width {
                let c = (px as usize * cols) / area.width as usize;
                let v = self.matrix[[r, c]];
                let color = if !v.is_finite() {
                    MISSING
                } else if hi > lo {
                    viridis((v - lo) / (hi - lo))
                } else {
                    viridis(0.5)
                };
                canvas.put_pixel(area.x0 + px, area.y0 + py, color);
            }
        }
    }
}

/// A row of equally sized panels.
#[derive(Debug, Clone)]
pub struct Figure {
    canvas: RgbImage,
    panel_width: u32,
    panel_height: u32,
    margin: u32,
    n_panels: usize,
}

impl Figure {
    pub fn new(panel_width: u32, panel_height: u32, n_panels: usize) -> NufftResult<Self> {
        if panel_width == 0 || panel_height == 0 || n_panels == 0 {
            return Err(NufftError::Render(format!(
                "empty figure: {n_panels} panels of {panel_width}x{panel_height} px"
            )));
        }
        let width = u32::try_from(n_panels)
            .ok()
            .and_then(|n| n.checked_mul(panel_width))
            .ok_or_else(|| NufftError::Render(format!("figure too wide: {n_panels} panels")))?;
        Ok(Figure {
            canvas: RgbImage::from_pixel(width, panel_height, BACKGROUND),
            panel_width,
            panel_height,
            margin: 0,
            n_panels,
        })
    }

    pub fn from_config(plot: &PlotConfig, n_panels: usize) -> NufftResult<Self> {
        Ok(Self::new(plot.panel_width, plot.panel_height, n_panels)?.with_margin(plot.margin))
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Inner drawing area of panel `index`, inside the margin and frame.
    pub fn area(&self, index: usize) -> NufftResult<PanelArea> {
        if index >= self.n_panels {
            return Err(NufftError::Render(format!(
                "panel {index} out of range for {} panels",
                self.n_panels
            )));
        }
        let inset = u64::from(self.margin) + 1;
        if 2 * inset >= u64::from(self.panel_width)
            || 2 * inset >= u64::from(self.panel_height)
        {
            return Err(NufftError::Render(format!(
                "margin {} leaves no room in a {}x{} panel",
                self.margin, self.panel_width, self.panel_height
            )));
        }
        // inset < panel_width / 2 here, so it fits in u32.
        let inset = inset as u32;
        Ok(PanelArea {
            x0: index as u32 * self.panel_width + inset,
            y0: inset,
            width: self.panel_width - 2 * inset,
            height: self.panel_height - 2 * inset,
        })
    }

    pub fn draw(&mut self, index: usize, panel: &dyn Panel) -> NufftResult<()> {
        let area = self.area(index)?;
        self.draw_frame(area);
        panel.draw(&mut self.canvas, area);
        Ok(())
    }

    fn draw_frame(&mut self, area: PanelArea) {
        let outer = PanelArea {
            x0: area.x0 - 1,
            y0: area.y0 - 1,
            width: area.width + 2,
            height: area.height + 2,
        };
        let (l, t) = (outer.x0 as i64, outer.y0 as i64);
        let (r, b) = (l + outer.width as i64 - 1, t + outer.height as i64 - 1);
        for (p, q) in [((l, t), (r, t)), ((r, t), (r, b)), ((r, b), (l, b)), ((l, b), (l, t))] {
            draw_line(&mut self.canvas, outer, p, q, FRAME);
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> NufftResult<()> {
        self.canvas
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| NufftError::Render(e.to_string()))
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_empty_figure_rejected() {
        assert!(matches!(Figure::new(100, 100, 0), Err(NufftError::Render(_))));
        assert!(Figure::new(0, 100, 2).is_err());
    }

    #[test]
    fn test_panel_areas_tile_horizontally() {
        let fig = Figure::new(100, 80, 3).unwrap().with_margin(4);
        assert_eq!((fig.width(), fig.height()), (300, 80));
        let a = fig.area(1).unwrap();
        assert_eq!(a, PanelArea { x0: 105, y0: 5, width: 90, height: 70 });
        assert!(fig.area(3).is_err());
        let tight = Figure::new(10, 10, 1).unwrap().with_margin(5);
        assert!(tight.area(0).is_err());
        let huge = Figure::new(10, 10, 1).unwrap().with_margin(u32::MAX);
        assert!(matches!(huge.area(0), Err(NufftError::Render(_))));
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), Rgb(VIRIDIS[0]));
        assert_eq!(viridis(1.0), Rgb(VIRIDIS[4]));
        assert_eq!(viridis(2.0), Rgb(VIRIDIS[4]));
        assert_eq!(viridis(0.5), Rgb(VIRIDIS[2]));
    }

    #[test]
    fn test_line_panel_shape_check() {
        let m = Array2::<f64>::zeros((3, 2));
        assert!(LinePanel::new(&[0.0, 1.0], &m).is_err());
    }

    #[test]
    fn test_line_panel_draws_baselines_and_traces() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let m = array![[0.0, 1.0], [0.5, 0.0], [0.0, -1.0], [-0.5, 0.0]];
        let mut fig = Figure::new(120, 90, 1).unwrap().with_margin(2);
        fig.draw(0, &LinePanel::new(&x, &m).unwrap()).unwrap();
        let pixels: Vec<Rgb<u8>> = fig.canvas().pixels().copied().collect();
        assert!(pixels.contains(&BASELINE));
        assert!(pixels.contains(&Rgb(TAB10[0])));
        assert!(pixels.contains(&Rgb(TAB10[1])));
        assert!(pixels.contains(&FRAME));
    }

    #[test]
    fn test_heatmap_scales_to_min_max() {
        let m = array![[0.0, 1.0], [1.0, 0.0]];
        let mut fig = Figure::new(40, 40, 1).unwrap();
        fig.draw(0, &HeatmapPanel::new(&m)).unwrap();
        let area = fig.area(0).unwrap();
        assert_eq!(*fig.canvas().get_pixel(area.x0, area.y0), viridis(0.0));
        assert_eq!(
            *fig.canvas().get_pixel(area.x0 + area.width - 1, area.y0),
            viridis(1.0)
        );
    }

    #[test]
    fn test_constant_and_non_finite_heatmap() {
        let m = array![[2.0, f64::NAN]];
        let mut fig = Figure::new(20, 20, 1).unwrap();
        fig.draw(0, &HeatmapPanel::new(&m)).unwrap();
        let area = fig.area(0).unwrap();
        assert_eq!(*fig.canvas().get_pixel(area.x0, area.y0), viridis(0.5));
        assert_eq!(
            *fig.canvas().get_pixel(area.x0 + area.width - 1, area.y0),
            MISSING
        );
    }

    #[test]
    fn test_save_writes_decodable_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let m = array![[1.0, 2.0], [3.0, 4.0]];
        let mut fig = Figure::from_config(&PlotConfig::default(), 2).unwrap();
        fig.draw(0, &HeatmapPanel::new(&m)).unwrap();
        fig.draw(1, &LinePanel::new(&[0.0, 1.0], &m).unwrap()).unwrap();
        fig.save(&path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (500, 500));
    }
}
