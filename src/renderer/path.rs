//! Polyline element with float widths and arbitrary dash patterns
//!
//! Plotters' dashed series only repeat one dash/gap pair; the house patterns
//! mix several (`4,1,1,1,1,1`), so the dashes are cut here in backend units.

use plotters_backend::{BackendCoord, DrawingBackend, DrawingErrorKind};
use plotters::element::{Drawable, PointCollection};
use plotters::style::ShapeStyle;

/// A polyline drawn with an optional dash pattern
///
/// `C` is the coordinate type of the points: data coordinates for series,
/// [`BackendCoord`] for legend samples.
#[derive(Clone)]
pub struct StyledPath<C> {
    points: Vec<C>,
    style: ShapeStyle,
    /// Alternating on/off lengths in backend units
    dashes: Option<Vec<f64>>,
}

impl<C> StyledPath<C> {
    pub fn new(points: Vec<C>, style: ShapeStyle, dashes: Option<Vec<f64>>) -> Self {
        Self {
            points,
            style,
            dashes,
        }
    }
}

impl<'a, C> PointCollection<'a, C> for &'a StyledPath<C> {
    type Point = &'a C;
    type IntoIter = &'a [C];

    fn point_iter(self) -> &'a [C] {
        &self.points
    }
}

impl<C, DB: DrawingBackend> Drawable<DB> for StyledPath<C> {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        points: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        match &self.dashes {
            None => backend.draw_path(points, &self.style),
            Some(pattern) => {
                let points: Vec<BackendCoord> = points.collect();
                for run in dash_runs(&points, pattern) {
                    backend.draw_path(run, &self.style)?;
                }
                Ok(())
            }
        }
    }
}

/// Split a polyline into the visible runs of a dash pattern
///
/// Runs keep the polyline's corners. An odd-length pattern is repeated once so
/// that on and off lengths alternate; an unusable pattern draws solid.
pub fn dash_runs(points: &[BackendCoord], pattern: &[f64]) -> Vec<Vec<BackendCoord>> {
    let total: f64 = pattern.iter().sum();
    if pattern.is_empty() || !total.is_finite() || total <= 0.0 || pattern.iter().any(|d| *d < 0.0) {
        return vec![points.to_vec()];
    }
    let pattern: Vec<f64> = if pattern.len() % 2 == 1 {
        pattern.iter().chain(pattern).copied().collect()
    } else {
        pattern.to_vec()
    };

    let mut runs = vec![];
    let mut current: Vec<BackendCoord> = vec![];
    let mut slot = 0;
    let mut remaining = pattern[0];

    for pair in points.windows(2) {
        let (ax, ay) = (pair[0].0 as f64, pair[0].1 as f64);
        let (dx, dy) = (pair[1].0 as f64 - ax, pair[1].1 as f64 - ay);
        let length = dx.hypot(dy);
        let at = |t: f64| {
            (
                (ax + dx * t / length).round() as i32,
                (ay + dy * t / length).round() as i32,
            )
        };

        let mut pos = 0.0;
        while pos < length {
            let step = remaining.min(length - pos);
            let on = slot % 2 == 0;
            if on {
                if current.is_empty() {
                    current.push(at(pos));
                }
                current.push(at(pos + step));
            }
            pos += step;
            remaining -= step;
            if remaining <= 1e-9 {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                }
                current.clear();
                slot = (slot + 1) % pattern.len();
                remaining = pattern[slot];
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}
