//! House styling engine
//!
//! Line appearance is a pure function of the line's position in its axes and
//! the style offset, so a given line always receives the same colour, dash
//! pattern and width regardless of what else is plotted.

use crate::figure::{Axes, Figure, GridStyle, Legend, LegendBox, LegendLocation, LineStyle, Rgb};
use crate::stylesheet::HouseStyle;

const LEGEND_EDGE_WIDTH: f64 = 0.3;

/// Parameters for one styling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleOptions {
    /// Colour screen style; `false` is black-and-white print style
    pub color: bool,
    /// Advance the dash pattern with every line instead of every palette cycle
    pub dashes_interleaved: bool,
    pub legend: Legend,
    /// Shift applied to style-table indexing
    pub style_offset: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::color()
    }
}

impl StyleOptions {
    /// Screen style: palette colours and interleaved dashes
    pub fn color() -> Self {
        Self {
            color: true,
            dashes_interleaved: true,
            legend: Legend::Auto,
            style_offset: 0,
        }
    }

    /// Print style: black lines distinguished by dashes only
    pub fn mono() -> Self {
        Self {
            color: false,
            ..Self::color()
        }
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_style_offset(mut self, offset: usize) -> Self {
        self.style_offset = offset;
        self
    }

    pub fn with_dashes_interleaved(mut self, interleaved: bool) -> Self {
        self.dashes_interleaved = interleaved;
        self
    }
}

/// Palette slot for the line at `index`
pub fn color_index(index: usize, options: &StyleOptions, house: &HouseStyle) -> usize {
    (index + options.style_offset) % house.palette.len()
}

/// Dash/width table slot for the line at `index`
///
/// Non-interleaved mode keeps one dash pattern for a whole run of palette
/// colours before advancing.
pub fn dash_index(index: usize, options: &StyleOptions, house: &HouseStyle) -> usize {
    if options.dashes_interleaved {
        (index + options.style_offset) % house.dashes.len()
    } else {
        (index / house.palette.len()) % house.dashes.len()
    }
}

/// Draw order for the line at `index` of `line_count`; earlier lines sit on top
pub fn zorder(index: usize, line_count: usize) -> f64 {
    2.5 - index as f64 / line_count.max(1) as f64
}

/// Compute the full style for one line
pub fn line_style(
    index: usize,
    line_count: usize,
    explicit_color: Option<Rgb>,
    options: &StyleOptions,
    house: &HouseStyle,
) -> LineStyle {
    let color = if options.color {
        explicit_color.unwrap_or(house.palette[color_index(index, options, house)])
    } else {
        Rgb::BLACK
    };

    let dash = dash_index(index, options, house);
    let power = if options.color {
        house.color_width_power
    } else {
        house.mono_width_power
    };
    let exponent = i32::try_from(index).unwrap_or(i32::MAX);
    let width = house.width_multiplier * power.powi(exponent) * house.line_widths[dash];

    let dashes = house.dashes[dash]
        .as_ref()
        .map(|pattern| pattern.iter().map(|d| d * width).collect());

    LineStyle {
        color,
        width,
        dashes,
        zorder: zorder(index, line_count),
    }
}

/// Style every line, legend and grid of one axes in place
pub fn style_axes(axes: &mut Axes, options: &StyleOptions, house: &HouseStyle) {
    let count = axes.lines.len();
    for (index, line) in axes.lines.iter_mut().enumerate() {
        line.style = line_style(index, count, line.explicit_color(), options, house);
    }

    let location = match options.legend {
        Legend::Hidden => None,
        Legend::Auto if count > 1 => Some(LegendLocation::Best),
        Legend::Auto => None,
        Legend::At(location) => Some(location),
    };
    axes.legend = location.map(|location| LegendBox {
        location,
        frame_alpha: if options.color { 0.9 } else { 1.0 },
        edge_color: Rgb::BLACK,
        edge_width: LEGEND_EDGE_WIDTH,
        visible: axes.labelled_lines() > 0,
    });

    if options.color {
        axes.patch_alpha = 0.7;
        axes.grid = GridStyle {
            line_width: 0.5,
            alpha: if house.strong_grid { 0.4 } else { 0.15 },
        };
    } else {
        axes.patch_alpha = 1.0;
        axes.grid = if house.strong_grid {
            GridStyle {
                line_width: 0.1,
                alpha: 1.0,
            }
        } else {
            GridStyle {
                line_width: axes.grid.line_width,
                alpha: 0.0,
            }
        };
    }
}

/// Apply a styling pass to a whole figure
///
/// Colour mode leaves the figure background transparent; print mode fills it.
pub fn apply_style(figure: &mut Figure, options: &StyleOptions, house: &HouseStyle) {
    figure.fill_background = !options.color;
    for axes in figure.all_axes_mut() {
        style_axes(axes, options, house);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::Preset;

    fn figure_with_lines(n: usize) -> Figure {
        let (mut figure, id) = Figure::single(Preset::Small);
        let axes = figure.axes_mut(id).unwrap();
        for i in 0..n {
            axes.plot(&[0.0, 1.0], &[i as f64, i as f64 + 1.0])
                .label(format!("line {}", i));
        }
        figure
    }

    #[test]
    fn test_first_line_style() {
        let house = HouseStyle::default();
        let style = line_style(0, 1, None, &StyleOptions::color(), &house);
        assert_eq!(style.color, house.palette[0]);
        assert_eq!(style.width, 1.0);
        assert_eq!(style.dashes, None);
        assert_eq!(style.zorder, 2.5);
    }

    #[test]
    fn test_dashes_scaled_by_width() {
        let house = HouseStyle::default();
        let style = line_style(1, 2, None, &StyleOptions::color(), &house);
        let width = 0.97 * 1.3;
        assert!((style.width - width).abs() < 1e-12);
        let dashes = style.dashes.unwrap();
        assert!((dashes[0] - 1.2 * width).abs() < 1e-12);
        assert!((dashes[1] - 1.2 * width).abs() < 1e-12);
    }

    #[test]
    fn test_mono_is_black_with_steeper_decay() {
        let house = HouseStyle::default();
        let style = line_style(2, 3, Some(Rgb::WHITE), &StyleOptions::mono(), &house);
        assert_eq!(style.color, Rgb::BLACK);
        assert!((style.width - 0.93f64.powi(2) * 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_explicit_colour_kept_in_colour_mode() {
        let house = HouseStyle::default();
        let pinned = Rgb::new(1, 2, 3);
        let style = line_style(0, 1, Some(pinned), &StyleOptions::color(), &house);
        assert_eq!(style.color, pinned);
    }

    #[test]
    fn test_style_offset_shifts_colour_and_dash() {
        let house = HouseStyle::default();
        let options = StyleOptions::color().with_style_offset(2);
        assert_eq!(color_index(0, &options, &house), 2);
        assert_eq!(dash_index(0, &options, &house), 2);
        assert_eq!(color_index(5, &options, &house), 1);
    }

    #[test]
    fn test_non_interleaved_ignores_offset() {
        let house = HouseStyle::default();
        let options = StyleOptions::color()
            .with_dashes_interleaved(false)
            .with_style_offset(3);
        assert_eq!(dash_index(5, &options, &house), 0);
        assert_eq!(dash_index(6, &options, &house), 1);
    }

    #[test]
    fn test_auto_legend_single_line_hidden() {
        let house = HouseStyle::default();
        let mut figure = figure_with_lines(1);
        apply_style(&mut figure, &StyleOptions::color(), &house);
        assert_eq!(figure.all_axes()[0].legend, None);
    }

    #[test]
    fn test_auto_legend_multi_line_best() {
        let house = HouseStyle::default();
        let mut figure = figure_with_lines(3);
        apply_style(&mut figure, &StyleOptions::color(), &house);
        let legend = figure.all_axes()[0].legend.clone().unwrap();
        assert_eq!(legend.location, LegendLocation::Best);
        assert_eq!(legend.frame_alpha, 0.9);
        assert_eq!(legend.edge_width, 0.3);
        assert!(legend.visible);
    }

    #[test]
    fn test_empty_legend_hidden() {
        let house = HouseStyle::default();
        let (mut figure, id) = Figure::single(Preset::Small);
        figure.axes_mut(id).unwrap().plot(&[0.0], &[0.0]);
        let options = StyleOptions::color().with_legend(Legend::At(LegendLocation::UpperLeft));
        apply_style(&mut figure, &options, &house);
        let legend = figure.all_axes()[0].legend.clone().unwrap();
        assert!(!legend.visible);
    }

    #[test]
    fn test_background_and_grid() {
        let house = HouseStyle::default();
        let mut figure = figure_with_lines(2);
        apply_style(&mut figure, &StyleOptions::color(), &house);
        assert!(!figure.fill_background);
        assert_eq!(figure.all_axes()[0].patch_alpha, 0.7);
        assert_eq!(figure.all_axes()[0].grid.alpha, 0.15);

        apply_style(&mut figure, &StyleOptions::mono(), &house);
        assert!(figure.fill_background);
        assert_eq!(figure.all_axes()[0].patch_alpha, 1.0);
        assert!(!figure.all_axes()[0].grid.is_visible());
    }

    #[test]
    fn test_strong_grid() {
        let house = HouseStyle {
            strong_grid: true,
            ..HouseStyle::default()
        };
        let mut figure = figure_with_lines(2);
        apply_style(&mut figure, &StyleOptions::color(), &house);
        assert_eq!(figure.all_axes()[0].grid.alpha, 0.4);
        apply_style(&mut figure, &StyleOptions::mono(), &house);
        assert_eq!(figure.all_axes()[0].grid, GridStyle { line_width: 0.1, alpha: 1.0 });
    }
}
