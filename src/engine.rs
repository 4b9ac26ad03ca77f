//! Escape-time field generation
//!
//! The viewer drives the generator through the `FractalEngine` trait and only
//! ever reads the resulting grids and bounds; it never looks inside the
//! iteration. `MandelbrotEngine` is the production implementation.

/// Rectangle of the complex plane currently visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_re: f64,
    pub min_im: f64,
    pub max_re: f64,
    pub max_im: f64,
}

/// Contract between the viewer and a field generator.
///
/// `generate` is blocking and recomputes the whole field in place; there are
/// no partial results and no cancellation. The grids returned by `counts` and
/// `hues` are `width * height` in row-major order and are only valid until
/// the next `generate` call overwrites them.
pub trait FractalEngine {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Visible plane rectangle derived from the current center and zoom.
    fn bounds(&self) -> Bounds;

    fn set_center(&mut self, center: (f64, f64));
    fn scale_zoom(&mut self, factor: f64);
    fn zoom(&self) -> f64;
    fn set_max_iterations(&mut self, n: u32);

    /// Recompute the entire field for the current view. Blocks the caller.
    fn generate(&mut self);

    /// Per-pixel iteration counts, capped at the current budget.
    fn counts(&self) -> &[u32];

    /// Per-pixel smoothed escape values, normalized to [0, 1].
    fn hues(&self) -> &[f64];
}

/// Plane span of the shorter axis at zoom 1. Covers the full set with margin.
const BASE_SPAN: f64 = 3.0;

/// Classic escape-time Mandelbrot generator.
///
/// Grids are allocated once at construction and overwritten wholesale by
/// each `generate` call; they are never resized.
pub struct MandelbrotEngine {
    width: u32,
    height: u32,
    center: (f64, f64),
    zoom: f64,
    max_iterations: u32,
    counts: Vec<u32>,
    hues: Vec<f64>,
}

impl MandelbrotEngine {
    pub fn new(width: u32, height: u32, center: (f64, f64)) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!("field dimensions must be nonzero: {}x{}", width, height));
        }
        let pixel_count = (width * height) as usize;
        Ok(Self {
            width,
            height,
            center,
            zoom: 1.0,
            max_iterations: 1000,
            counts: vec![0; pixel_count],
            hues: vec![0.0; pixel_count],
        })
    }
}

impl FractalEngine for MandelbrotEngine {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn bounds(&self) -> Bounds {
        // The shorter axis spans BASE_SPAN / zoom; the longer axis is scaled
        // by the aspect ratio so pixels stay square.
        let short = f64::from(self.width.min(self.height));
        let span = BASE_SPAN / self.zoom;
        let re_span = span * f64::from(self.width) / short;
        let im_span = span * f64::from(self.height) / short;
        Bounds {
            min_re: self.center.0 - re_span / 2.0,
            min_im: self.center.1 - im_span / 2.0,
            max_re: self.center.0 + re_span / 2.0,
            max_im: self.center.1 + im_span / 2.0,
        }
    }

    fn set_center(&mut self, center: (f64, f64)) {
        self.center = center;
    }

    fn scale_zoom(&mut self, factor: f64) {
        self.zoom *= factor;
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn set_max_iterations(&mut self, n: u32) {
        self.max_iterations = n;
    }

    fn generate(&mut self) {
        let bounds = self.bounds();
        // Row 0 maps to min_im: rows grow downward and imaginary values grow
        // with them. The click resolution in the controller relies on the
        // same orientation.
        let re_step = (bounds.max_re - bounds.min_re) / f64::from(self.width);
        let im_step = (bounds.max_im - bounds.min_im) / f64::from(self.height);
        let max_iter = self.max_iterations;
        let ln2 = std::f64::consts::LN_2;

        let mut idx = 0;
        for py in 0..self.height {
            let ci = bounds.min_im + f64::from(py) * im_step;
            for px in 0..self.width {
                let cr = bounds.min_re + f64::from(px) * re_step;

                // Cardioid check: points inside the main cardioid never escape
                let q = (cr - 0.25) * (cr - 0.25) + ci * ci;
                if q * (q + (cr - 0.25)) <= 0.25 * ci * ci {
                    self.counts[idx] = max_iter;
                    self.hues[idx] = 0.0;
                    idx += 1;
                    continue;
                }
                // Period-2 bulb check
                if (cr + 1.0) * (cr + 1.0) + ci * ci <= 0.0625 {
                    self.counts[idx] = max_iter;
                    self.hues[idx] = 0.0;
                    idx += 1;
                    continue;
                }

                let mut zr = 0.0_f64;
                let mut zi = 0.0_f64;
                let mut zr2 = 0.0_f64;
                let mut zi2 = 0.0_f64;
                let mut iter = 0u32;

                while zr2 + zi2 <= 4.0 && iter < max_iter {
                    zi = 2.0 * zr * zi + ci;
                    zr = zr2 - zi2 + cr;
                    zr2 = zr * zr;
                    zi2 = zi * zi;
                    iter += 1;
                }

                if iter >= max_iter {
                    self.counts[idx] = max_iter;
                    self.hues[idx] = 0.0;
                } else {
                    // Smooth escape value: fractional iteration count,
                    // normalized by the budget so hue stays in [0, 1]
                    let modulus = (zr2 + zi2).sqrt();
                    let smooth = f64::from(iter) + 1.0 - modulus.ln().ln() / ln2;
                    self.counts[idx] = iter;
                    self.hues[idx] = (smooth / f64::from(max_iter)).clamp(0.0, 1.0);
                }

                idx += 1;
            }
        }
    }

    fn counts(&self) -> &[u32] {
        &self.counts
    }

    fn hues(&self) -> &[f64] {
        &self.hues
    }
}
