//! Chart rendering options

/// Render units per point used unless configured otherwise
pub const DEFAULT_SCALE: u32 = 10;

/// Options for drawing figures through the plotters backend
///
/// Plotters works in whole backend units, so figures are laid out on a grid
/// `scale` times finer than a point. Fractional line widths and dash lengths
/// keep their proportions that way; the SVG header maps the grid back to
/// points.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Backend units per point
    pub scale: u32,
    /// Outer padding in points around each plot region when the figure uses
    /// tight layout; loose layouts use twice this
    pub tight_pad: f64,
    /// Upper bound on tick labels per axis
    pub tick_labels: usize,
    /// Emit `<?xml ...?>` before the root element
    pub xml_declaration: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            tight_pad: 6.0,
            tick_labels: 6,
            xml_declaration: true,
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the render resolution; zero is treated as one
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn with_tight_pad(mut self, pad: f64) -> Self {
        self.tight_pad = pad;
        self
    }

    pub fn with_tick_labels(mut self, count: usize) -> Self {
        self.tick_labels = count;
        self
    }

    pub fn with_xml_declaration(mut self, declaration: bool) -> Self {
        self.xml_declaration = declaration;
        self
    }

    /// Convert a length in points to whole backend units
    pub fn units(&self, points: f64) -> u32 {
        let units = (points * self.scale as f64).round();
        if units.is_finite() && units > 0.0 {
            units.min(u32::MAX as f64) as u32
        } else {
            0
        }
    }

    /// Like [`ChartConfig::units`], but never thinner than one unit
    pub fn stroke(&self, points: f64) -> u32 {
        self.units(points).max(1)
    }
}
