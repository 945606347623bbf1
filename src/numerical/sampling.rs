//! Tabulation of a function on a uniform grid, the data behind function plots.
//!
//! Points where the function cannot be evaluated, is not finite, or exceeds the clipping
//! magnitude of the window are left out, so a plot simply shows a gap there.
use crate::numerical::interpolation::InterpolationPoint;
use crate::symbolic::symbolic_lambdify::NumericFunction;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionPoint {
    pub x: f64,
    pub y: f64,
}

/// Uniform grid start, start + step, ... up to end (inclusive)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingWindow {
    pub start: f64,
    pub end: f64,
    pub step: f64,
    /// points with |y| at or above this value are dropped
    pub clip: Option<f64>,
}

impl SamplingWindow {
    pub fn new(start: f64, end: f64, step: f64) -> Self {
        Self {
            start,
            end,
            step,
            clip: None,
        }
    }

    pub fn with_clip(mut self, clip: f64) -> Self {
        self.clip = Some(clip);
        self
    }

    /// [-20, 20] with step 0.5, |y| < 1e6
    pub fn root_finding() -> Self {
        Self::new(-20.0, 20.0, 0.5).with_clip(1e6)
    }

    /// [-5, 5] with step 0.25
    pub fn fixed_point() -> Self {
        Self::new(-5.0, 5.0, 0.25)
    }

    /// [a - 0.1 r, b + 0.1 r] with r = max(10, b - a) in 100 steps of r
    pub fn trapezoid(a: f64, b: f64) -> Self {
        let range = (b - a).max(10.0);
        Self::new(a - 0.1 * range, b + 0.1 * range, range / 100.0)
    }

    /// [min x - 0.2 range, max x + 0.2 range] with step range/40
    pub fn interpolation(points: &[InterpolationPoint]) -> Self {
        let min = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let range = max - min;
        Self::new(min - 0.2 * range, max + 0.2 * range, range / 40.0)
    }

    /// grid abscissas; empty for a degenerate window
    pub fn abscissas(&self) -> Vec<f64> {
        if !(self.step > 0.0) || !self.start.is_finite() || !self.end.is_finite() {
            return Vec::new();
        }
        if self.end < self.start {
            return Vec::new();
        }
        // tolerance so that the end point survives rounding of (end - start)/step
        let count = ((self.end - self.start) / self.step + 1e-9).floor() as usize + 1;
        (0..count)
            .map(|i| self.start + i as f64 * self.step)
            .collect()
    }
}

/// Samples `f` on the window, skipping points that fail or are out of range.
pub fn sample_function<F: NumericFunction + ?Sized>(
    f: &F,
    window: &SamplingWindow,
) -> Vec<FunctionPoint> {
    let grid = window.abscissas();
    let total = grid.len();
    let points: Vec<FunctionPoint> = grid
        .into_iter()
        .filter_map(|x| match f.evaluate(x) {
            Ok(y) if y.is_finite() => Some(FunctionPoint { x, y }),
            _ => None,
        })
        .filter(|point| window.clip.is_none_or(|clip| point.y.abs() < clip))
        .collect();
    debug!(
        "sampled {}: {} of {} points kept",
        f.name(),
        points.len(),
        total
    );
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::interpolation::{NewtonPolynomial, quadratic_interpolation};
    use crate::symbolic::parse_expr::parse_function;
    use approx::assert_relative_eq;

    #[test]
    fn test_presets() {
        assert_eq!(SamplingWindow::root_finding().abscissas().len(), 81);
        assert_eq!(SamplingWindow::fixed_point().abscissas().len(), 41);
        let window = SamplingWindow::trapezoid(0.0, 1.0);
        assert_relative_eq!(window.start, -1.0);
        assert_relative_eq!(window.end, 2.0);
        assert_relative_eq!(window.step, 0.1);
        assert_eq!(window.abscissas().len(), 31);
        let window = SamplingWindow::trapezoid(0.0, 50.0);
        assert_relative_eq!(window.start, -5.0);
        assert_relative_eq!(window.step, 0.5);
    }

    #[test]
    fn test_sampling_skips_domain_errors() {
        let f = parse_function("sqrt(x)").unwrap();
        let points = sample_function(&f, &SamplingWindow::fixed_point());
        // only x >= 0 survive
        assert_eq!(points.len(), 21);
        assert!(points.iter().all(|p| p.x >= 0.0));
        assert_relative_eq!(points.last().unwrap().y, 5f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_sampling_clips_large_values() {
        let f = parse_function("exp(x)").unwrap();
        let points = sample_function(&f, &SamplingWindow::root_finding());
        // e^13.5 < 1e6 < e^14
        assert!(points.iter().all(|p| p.y < 1e6));
        assert_relative_eq!(points.last().unwrap().x, 13.5);
    }

    #[test]
    fn test_sampling_interpolant() {
        let nodes = [
            InterpolationPoint::new(1.0, 1.0),
            InterpolationPoint::new(3.0, 9.0),
            InterpolationPoint::new(5.0, 25.0),
        ];
        let window = SamplingWindow::interpolation(&nodes);
        assert_relative_eq!(window.start, 0.2);
        assert_relative_eq!(window.end, 5.8);
        assert_relative_eq!(window.step, 0.1);
        let result = quadratic_interpolation(&nodes, 2.0).unwrap();
        let points = sample_function(&result.polynomial, &window);
        assert_eq!(points.len(), window.abscissas().len());
        for p in points {
            assert_relative_eq!(p.y, p.x * p.x, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_degenerate_window_is_empty() {
        let single = [InterpolationPoint::new(1.0, 1.0)];
        let window = SamplingWindow::interpolation(&single);
        let polynomial = NewtonPolynomial::from_points(&single).unwrap();
        assert!(sample_function(&polynomial, &window).is_empty());
        assert!(SamplingWindow::new(1.0, 0.0, 0.1).abscissas().is_empty());
    }
}
