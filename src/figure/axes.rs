//! Plot areas and the lines drawn in them

use crate::stylesheet::DashPattern;

use super::types::{Point, Rgb};
use super::GridSpan;

/// Visual attributes assigned to a line by the styling engine
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Rgb,
    pub width: f64,
    /// Absolute dash lengths in points; `None` is solid
    pub dashes: DashPattern,
    /// Higher values are drawn on top
    pub zorder: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            width: 1.0,
            dashes: None,
            zorder: 2.0,
        }
    }
}

/// A plotted sequence of points
///
/// Non-finite coordinates split the line into separate segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    points: Vec<Point>,
    label: Option<String>,
    explicit_color: Option<Rgb>,
    pub style: LineStyle,
}

impl Line {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            label: None,
            explicit_color: None,
            style: LineStyle::default(),
        }
    }

    /// Set the legend label
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Pin a colour that the colour pass will not override
    pub fn color(&mut self, color: Rgb) -> &mut Self {
        self.explicit_color = Some(color);
        self.style.color = color;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn explicit_color(&self) -> Option<Rgb> {
        self.explicit_color
    }

    /// Continuous runs of finite points
    pub fn segments(&self) -> impl Iterator<Item = &[Point]> {
        self.points
            .split(|p| !p.is_finite())
            .filter(|run| !run.is_empty())
    }
}

/// Where a legend box is anchored inside its axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLocation {
    /// Corner with the least overlap with plotted data
    Best,
    UpperRight,
    UpperLeft,
    LowerLeft,
    LowerRight,
}

/// Legend request passed to the styling engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Legend {
    /// Never draw a legend
    Hidden,
    /// `Best` for plots with more than one line, otherwise hidden
    #[default]
    Auto,
    At(LegendLocation),
}

/// Resolved legend box state
#[derive(Debug, Clone, PartialEq)]
pub struct LegendBox {
    pub location: LegendLocation,
    pub frame_alpha: f64,
    pub edge_color: Rgb,
    pub edge_width: f64,
    pub visible: bool,
}

/// Grid line appearance
#[derive(Debug, Clone, PartialEq)]
pub struct GridStyle {
    pub line_width: f64,
    pub alpha: f64,
}

impl GridStyle {
    pub fn is_visible(&self) -> bool {
        self.alpha > 0.0 && self.line_width > 0.0
    }
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            line_width: 0.5,
            alpha: 0.0,
        }
    }
}

/// A plot area holding an ordered sequence of lines
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub(crate) span: GridSpan,
    pub lines: Vec<Line>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub legend: Option<LegendBox>,
    pub grid: GridStyle,
    /// Opacity of the white plot background
    pub patch_alpha: f64,
}

/// Fraction of the data range added on each side when limits are automatic
const AUTO_MARGIN: f64 = 0.05;

impl Axes {
    pub(crate) fn new(span: GridSpan) -> Self {
        Self {
            span,
            lines: vec![],
            title: None,
            xlabel: None,
            ylabel: None,
            xlim: None,
            ylim: None,
            legend: None,
            grid: GridStyle::default(),
            patch_alpha: 1.0,
        }
    }

    /// Grid cells this axes occupies
    pub fn span(&self) -> GridSpan {
        self.span
    }

    /// Add a line through `(xs[i], ys[i])`, truncated to the shorter input
    pub fn plot(&mut self, xs: &[f64], ys: &[f64]) -> &mut Line {
        let points = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| Point::new(x, y))
            .collect();
        self.lines.push(Line::new(points));
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    /// Add a line against the sample index
    pub fn plot_values(&mut self, ys: &[f64]) -> &mut Line {
        let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
        self.plot(&xs, ys)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.xlabel = Some(label.into());
        self
    }

    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) -> &mut Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) -> &mut Self {
        self.ylim = Some((min, max));
        self
    }

    /// Number of lines carrying a legend label
    pub fn labelled_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.label.is_some()).count()
    }

    /// Visible x and y ranges: explicit limits, else padded data bounds
    ///
    /// Both ranges are finite with a finite, positive span. Explicit limits
    /// that are not are ignored.
    pub fn view_limits(&self) -> ((f64, f64), (f64, f64)) {
        let finite = || {
            self.lines
                .iter()
                .flat_map(|l| l.points.iter())
                .filter(|p| p.is_finite())
        };
        let x = usable(self.xlim)
            .or_else(|| extent(finite().map(|p| p.x)).map(|(lo, hi)| padded(lo, hi)))
            .unwrap_or((0.0, 1.0));
        let y = usable(self.ylim)
            .or_else(|| extent(finite().map(|p| p.y)).map(|(lo, hi)| padded(lo, hi)))
            .unwrap_or((0.0, 1.0));
        (x, y)
    }
}

fn usable(limits: Option<(f64, f64)>) -> Option<(f64, f64)> {
    limits.filter(|(lo, hi)| lo.is_finite() && hi.is_finite() && hi > lo && (hi - lo).is_finite())
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        None => Some((v, v)),
    })
}

/// Data range widened by the auto margin, clamped so the span stays finite
fn padded(min: f64, max: f64) -> (f64, f64) {
    let range = max - min;
    if !range.is_finite() {
        return (min / 2.0, max / 2.0);
    }
    let margin = if range > 0.0 {
        range * AUTO_MARGIN
    } else if min == 0.0 {
        0.5
    } else {
        min.abs() * AUTO_MARGIN
    };
    let (lo, hi) = (min - margin, max + margin);
    if (hi - lo).is_finite() {
        (lo, hi)
    } else if range > 0.0 {
        (min, max)
    } else if min > 0.0 {
        (min - margin, max)
    } else {
        (min, max + margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> Axes {
        Axes::new(GridSpan::cell(0, 0))
    }

    #[test]
    fn test_plot_truncates_to_shorter() {
        let mut a = axes();
        a.plot(&[0.0, 1.0, 2.0], &[5.0, 6.0]);
        assert_eq!(a.lines[0].points().len(), 2);
    }

    #[test]
    fn test_line_builder() {
        let mut a = axes();
        a.plot(&[0.0], &[0.0]).label("first").color(Rgb::WHITE);
        let line = &a.lines[0];
        assert_eq!(line.label_text(), Some("first"));
        assert_eq!(line.explicit_color(), Some(Rgb::WHITE));
        assert_eq!(a.labelled_lines(), 1);
    }

    #[test]
    fn test_segments_split_on_nan() {
        let mut a = axes();
        a.plot(&[0.0, 1.0, f64::NAN, 3.0, 4.0], &[0.0, 1.0, f64::NAN, 3.0, 4.0]);
        let segments: Vec<_> = a.lines[0].segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1][0], Point::new(3.0, 3.0));
    }

    #[test]
    fn test_view_limits_padded() {
        let mut a = axes();
        a.plot(&[0.0, 10.0], &[-1.0, 1.0]);
        let ((x0, x1), (y0, y1)) = a.view_limits();
        assert!((x0 + 0.5).abs() < 1e-12);
        assert!((x1 - 10.5).abs() < 1e-12);
        assert!((y0 + 1.1).abs() < 1e-12);
        assert!((y1 - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_view_limits_explicit_and_flat() {
        let mut a = axes();
        a.plot(&[0.0, 1.0], &[2.0, 2.0]);
        a.set_xlim(-5.0, 5.0);
        let ((x0, x1), (y0, y1)) = a.view_limits();
        assert_eq!((x0, x1), (-5.0, 5.0));
        assert!(y0 < 2.0 && y1 > 2.0);
    }

    #[test]
    fn test_huge_values_keep_finite_limits() {
        let mut a = axes();
        a.plot_values(&[0.0, f64::MAX]);
        a.plot(&[-f64::MAX, f64::MAX], &[f64::MAX, f64::MAX]);
        let ((x0, x1), (y0, y1)) = a.view_limits();
        for (lo, hi) in [(x0, x1), (y0, y1)] {
            assert!(lo.is_finite() && hi.is_finite());
            assert!(hi > lo);
            assert!((hi - lo).is_finite());
        }
    }

    #[test]
    fn test_unusable_explicit_limits_ignored() {
        let mut a = axes();
        a.plot(&[0.0, 10.0], &[0.0, 1.0]);
        a.set_xlim(3.0, 3.0);
        a.set_ylim(f64::NEG_INFINITY, 1.0);
        let ((x0, x1), (y0, _)) = a.view_limits();
        assert!((x0 + 0.5).abs() < 1e-12);
        assert!((x1 - 10.5).abs() < 1e-12);
        assert!(y0.is_finite());
    }

    #[test]
    fn test_empty_axes_limits() {
        assert_eq!(axes().view_limits(), ((0.0, 1.0), (0.0, 1.0)));
    }
}
