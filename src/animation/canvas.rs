//! Rasterisation of the heatmap background and population markers.

use image::{Rgb, RgbImage};

use crate::compute::Surface;
use crate::schema::{Bounds, RenderConfig};

/// Fill colour of an individual's marker.
pub const MARKER_COLOR: Rgb<u8> = Rgb([255, 165, 0]);

/// Viridis colormap sampled at nine evenly spaced stops.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// Map `t` in [0, 1] onto the viridis colormap.
pub fn viridis(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - lo as f64;

    let mut out = [0u8; 3];
    for (c, v) in out.iter_mut().enumerate() {
        let a = VIRIDIS[lo][c] as f64;
        let b = VIRIDIS[lo + 1][c] as f64;
        *v = (a + (b - a) * frac).round() as u8;
    }
    Rgb(out)
}

/// Pixel geometry shared by every frame of an animation.
#[derive(Debug, Clone, Copy)]
pub struct Canvas {
    bounds: Bounds,
    width: u32,
    height: u32,
    marker_radius: u32,
}

impl Canvas {
    pub fn new(bounds: Bounds, width: u32, height: u32, marker_radius: u32) -> Self {
        Self {
            bounds,
            width,
            height,
            marker_radius,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(
            config.bounds,
            config.width,
            config.height,
            config.marker_radius,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Continuous pixel position of a point; y grows downwards.
    #[inline]
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let span = self.bounds.span();
        (
            (x - self.bounds.min) / span * self.width as f64,
            (self.bounds.max - y) / span * self.height as f64,
        )
    }

    /// Draw `surface` as a heatmap filling the whole canvas.
    ///
    /// Each pixel takes the nearest grid sample, with the top row of pixels
    /// showing `y = bounds.max`.
    pub fn draw_heatmap(&self, surface: &Surface) -> RgbImage {
        let n = surface.resolution();
        let last = n.saturating_sub(1);
        let (w, h) = (self.width as f64, self.height as f64);

        let columns: Vec<usize> = (0..self.width)
            .map(|px| (((px as f64 + 0.5) / w * n as f64) as usize).min(last))
            .collect();

        RgbImage::from_fn(self.width, self.height, |px, py| {
            let j = (((h - py as f64 - 0.5) / h * n as f64) as usize).min(last);
            viridis(surface.normalized(columns[px as usize], j))
        })
    }

    /// Stamp a filled marker for every point onto `image`.
    ///
    /// Markers are clipped to the canvas; non-finite points are skipped.
    pub fn draw_markers(&self, image: &mut RgbImage, points: &[(f64, f64)]) {
        let r = self.marker_radius as f64;
        let r2 = r * r;

        for &(x, y) in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let (cx, cy) = self.to_pixel(x, y);

            let x0 = (cx - r).floor().max(0.0);
            let x1 = (cx + r).ceil().min(self.width as f64 - 1.0);
            let y0 = (cy - r).floor().max(0.0);
            let y1 = (cy + r).ceil().min(self.height as f64 - 1.0);
            if x0 > x1 || y0 > y1 {
                continue;
            }

            for py in y0 as u32..=y1 as u32 {
                for px in x0 as u32..=x1 as u32 {
                    let dx = px as f64 + 0.5 - cx;
                    let dy = py as f64 + 0.5 - cy;
                    if dx * dx + dy * dy <= r2 {
                        image.put_pixel(px, py, MARKER_COLOR);
                    }
                }
            }
        }
    }
}
