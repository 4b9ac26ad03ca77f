//! View state and click-to-zoom control
//!
//! `ZoomController` owns the accumulated view (center, zoom, iteration
//! budget) and runs the regeneration state machine: a primary click arms a
//! pending regeneration, and the next tick resolves it against the engine's
//! current bounds, updates the view, and drives a blocking regeneration.

use crate::engine::FractalEngine;
use crate::mapping::AxisMapper;

/// Accumulated view parameters. Zoom and iteration budget only ever grow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: (f64, f64),
    pub zoom: f64,
    pub iterations: u32,
}

/// Regeneration state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for a click
    Idle,
    /// A click was captured; regeneration runs on the next tick
    Pending { x: i32, y: i32 },
    /// Regeneration in flight; new clicks are dropped
    Regenerating,
}

/// Summary of a completed regeneration, for the status line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegenReport {
    pub center: (f64, f64),
    pub zoom: f64,
    pub iterations: u32,
}

impl RegenReport {
    /// Human-readable location, e.g. `(-0.5 + 0.25i) at 25x`. The sign of
    /// the imaginary part is folded into the operator for readability.
    pub fn describe(&self) -> String {
        let op = if self.center.1 < 0.0 { "-" } else { "+" };
        format!(
            "({} {} {}i) at {}x",
            self.center.0,
            op,
            self.center.1.abs(),
            self.zoom
        )
    }
}

pub struct ZoomController {
    view: ViewState,
    state: State,
    zoom_factor: f64,
    iteration_step: u32,
}

impl ZoomController {
    /// `zoom_factor` multiplies the zoom on every accepted click and must be
    /// greater than one; `iteration_step` is added to the budget each click.
    pub fn new(initial: ViewState, zoom_factor: f64, iteration_step: u32) -> Result<Self, String> {
        if zoom_factor <= 1.0 {
            return Err(format!("zoom factor must be > 1, got {}", zoom_factor));
        }
        if initial.zoom <= 0.0 {
            return Err(format!("initial zoom must be positive, got {}", initial.zoom));
        }
        if initial.iterations == 0 {
            return Err("initial iteration budget must be nonzero".to_string());
        }
        Ok(Self {
            view: initial,
            state: State::Idle,
            zoom_factor,
            iteration_step,
        })
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// True when a captured click is waiting for the next tick
    pub fn has_pending(&self) -> bool {
        matches!(self.state, State::Pending { .. })
    }

    /// Capture a primary-button press. Only accepted while idle; a press
    /// while a regeneration is pending or in flight is dropped.
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        match self.state {
            State::Idle => {
                self.state = State::Pending { x, y };
                true
            },
            State::Pending { .. } | State::Regenerating => false,
        }
    }

    /// Run one controller tick. If a click is pending, resolve it against the
    /// engine's current bounds, advance the view, and regenerate the field
    /// (blocking). Returns a report when a regeneration completed.
    pub fn tick(&mut self, engine: &mut dyn FractalEngine) -> Result<Option<RegenReport>, String> {
        let State::Pending { x, y } = self.state else {
            return Ok(None);
        };
        self.state = State::Regenerating;

        // Resolve against the bounds the click was made in, before any
        // mutation moves them.
        let bounds = engine.bounds();
        let re_axis = AxisMapper::new(engine.width(), bounds.min_re, bounds.max_re)?;
        let im_axis = AxisMapper::new(engine.height(), bounds.min_im, bounds.max_im)?;
        let center = (re_axis.to_plane(x), im_axis.to_plane(y));

        self.view.center = center;
        self.view.zoom *= self.zoom_factor;
        self.view.iterations += self.iteration_step;

        engine.set_center(center);
        engine.scale_zoom(self.zoom_factor);
        engine.set_max_iterations(self.view.iterations);
        engine.generate();

        self.state = State::Idle;
        Ok(Some(RegenReport {
            center,
            zoom: self.view.zoom,
            iterations: self.view.iterations,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Bounds;

    /// Records contract calls instead of computing anything.
    struct StubEngine {
        width: u32,
        height: u32,
        center: (f64, f64),
        zoom: f64,
        max_iterations: u32,
        generate_calls: u32,
        counts: Vec<u32>,
        hues: Vec<f64>,
    }

    impl StubEngine {
        fn new(width: u32, height: u32, center: (f64, f64)) -> Self {
            Self {
                width,
                height,
                center,
                zoom: 1.0,
                max_iterations: 1000,
                generate_calls: 0,
                counts: vec![0; (width * height) as usize],
                hues: vec![0.0; (width * height) as usize],
            }
        }
    }

    impl FractalEngine for StubEngine {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn bounds(&self) -> Bounds {
            // Square window: 3.0 plane units per axis at zoom 1
            let half = 1.5 / self.zoom;
            Bounds {
                min_re: self.center.0 - half,
                min_im: self.center.1 - half,
                max_re: self.center.0 + half,
                max_im: self.center.1 + half,
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
            self.generate_calls += 1;
        }

        fn counts(&self) -> &[u32] {
            &self.counts
        }

        fn hues(&self) -> &[f64] {
            &self.hues
        }
    }

    fn controller() -> ZoomController {
        ZoomController::new(
            ViewState {
                center: (-0.5, 0.0),
                zoom: 1.0,
                iterations: 1000,
            },
            10.0,
            1000,
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_construction() {
        let view = ViewState {
            center: (0.0, 0.0),
            zoom: 1.0,
            iterations: 1000,
        };
        assert!(ZoomController::new(view, 1.0, 1000).is_err());
        assert!(ZoomController::new(view, 0.5, 1000).is_err());
        assert!(ZoomController::new(ViewState { zoom: 0.0, ..view }, 10.0, 1000).is_err());
        assert!(ZoomController::new(ViewState { iterations: 0, ..view }, 10.0, 1000).is_err());
    }

    #[test]
    fn test_idle_tick_does_nothing() {
        let mut engine = StubEngine::new(500, 500, (-0.5, 0.0));
        let mut ctrl = controller();
        assert_eq!(ctrl.tick(&mut engine).unwrap(), None);
        assert_eq!(engine.generate_calls, 0);
    }

    #[test]
    fn test_center_click_scenario() {
        // 500x500, center (-0.5, 0), budget 1000, step 1000, factor 10:
        // clicking the exact center keeps the center, multiplies zoom by 10,
        // raises the budget to 2000, and triggers exactly one regeneration.
        let mut engine = StubEngine::new(500, 500, (-0.5, 0.0));
        let mut ctrl = controller();

        assert!(ctrl.press(250, 250));
        let report = ctrl.tick(&mut engine).unwrap().unwrap();

        assert!((report.center.0 - -0.5).abs() < 1e-9);
        assert!(report.center.1.abs() < 1e-9);
        assert_eq!(report.zoom, 10.0);
        assert_eq!(report.iterations, 2000);
        assert_eq!(engine.generate_calls, 1);
        assert_eq!(engine.max_iterations, 2000);
        assert_eq!(engine.zoom, 10.0);
        assert!((engine.center.0 - -0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_and_budget_grow_monotonically() {
        let mut engine = StubEngine::new(500, 500, (-0.5, 0.0));
        let mut ctrl = controller();

        for n in 1..=4u32 {
            assert!(ctrl.press(250, 250));
            ctrl.tick(&mut engine).unwrap().unwrap();
            assert_eq!(ctrl.view().zoom, 10.0_f64.powi(n as i32));
            assert_eq!(ctrl.view().iterations, 1000 + n * 1000);
        }
        assert_eq!(engine.generate_calls, 4);
    }

    #[test]
    fn test_off_center_click_moves_center() {
        let mut engine = StubEngine::new(500, 500, (-0.5, 0.0));
        let mut ctrl = controller();

        // Pixel (0, 0) is the top-left corner of the visible rectangle
        assert!(ctrl.press(0, 0));
        let report = ctrl.tick(&mut engine).unwrap().unwrap();
        assert!((report.center.0 - -2.0).abs() < 1e-9);
        assert!((report.center.1 - -1.5).abs() < 1e-9);
    }

    #[test]
    fn test_second_click_while_busy_is_dropped() {
        let mut engine = StubEngine::new(500, 500, (-0.5, 0.0));
        let mut ctrl = controller();

        assert!(ctrl.press(250, 250));
        assert!(!ctrl.press(0, 0), "second click must be dropped");

        let report = ctrl.tick(&mut engine).unwrap().unwrap();
        // Only the first click took effect
        assert!((report.center.0 - -0.5).abs() < 1e-9);
        assert_eq!(engine.generate_calls, 1);
        assert_eq!(ctrl.view().zoom, 10.0);
        assert_eq!(ctrl.view().iterations, 2000);

        // Back to idle: the next click is accepted again
        assert!(ctrl.press(100, 100));
    }

    #[test]
    fn test_report_sign_annotation() {
        let above = RegenReport {
            center: (-0.5, 0.25),
            zoom: 10.0,
            iterations: 2000,
        };
        let below = RegenReport {
            center: (-0.5, -0.25),
            zoom: 10.0,
            iterations: 2000,
        };
        assert_eq!(above.describe(), "(-0.5 + 0.25i) at 10x");
        assert_eq!(below.describe(), "(-0.5 - 0.25i) at 10x");
    }
}
