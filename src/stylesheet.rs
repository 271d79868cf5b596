//! House style for article charts
//!
//! The house style holds the lookup tables the styling engine cycles through
//! (colour palette, dash patterns, line widths) plus font and grid settings.
//! A default style is embedded; custom styles are loaded from TOML and any
//! section they omit falls back to the default.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::figure::Rgb;

/// Errors that can occur when loading or parsing a house style
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid colour '{0}' (expected #RRGGBB)")]
    InvalidColor(String),
    #[error("Invalid stylesheet: {0}")]
    Invalid(String),
}

/// A dash pattern in units of line width; `None` is a solid line
pub type DashPattern = Option<Vec<f64>>;

/// Lookup tables and settings shared by every styled chart
#[derive(Debug, Clone, PartialEq)]
pub struct HouseStyle {
    /// Optional name for the style
    pub name: Option<String>,
    /// Line colours, cycled by style index
    pub palette: Vec<Rgb>,
    /// Dash patterns, paired index-for-index with `line_widths`
    pub dashes: Vec<DashPattern>,
    /// Base line widths for each dash pattern
    pub line_widths: Vec<f64>,
    /// Overall width multiplier
    pub width_multiplier: f64,
    /// Per-line width decay in colour mode
    pub color_width_power: f64,
    /// Per-line width decay in monochrome mode
    pub mono_width_power: f64,
    /// Font families in preference order
    pub font_family: Vec<String>,
    /// Base font size in points
    pub font_size: f64,
    /// Draw a more prominent grid
    pub strong_grid: bool,
}

#[derive(Deserialize)]
struct TomlHouseStyle {
    metadata: Option<TomlMetadata>,
    palette: Option<TomlPalette>,
    lines: Option<TomlLines>,
    font: Option<TomlFont>,
    grid: Option<TomlGrid>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize)]
struct TomlPalette {
    colors: Vec<String>,
}

#[derive(Deserialize)]
struct TomlLines {
    dashes: Option<Vec<Vec<f64>>>,
    widths: Option<Vec<f64>>,
    width_multiplier: Option<f64>,
    color_width_power: Option<f64>,
    mono_width_power: Option<f64>,
}

#[derive(Deserialize)]
struct TomlFont {
    family: Option<Vec<String>>,
    size: Option<f64>,
}

#[derive(Deserialize)]
struct TomlGrid {
    strong: Option<bool>,
}

/// Default house style
const DEFAULT_STYLE: &str = r##"
[metadata]
name = "article"

[palette]
colors = ["#0000E6", "#CC0000", "#00CC00", "#806600", "#E69900", "#CC00CC"]

[lines]
# An empty pattern is a solid line
dashes = [
    [],
    [1.2, 1.2],
    [2.8, 1.6],
    [5.0, 4.0],
    [4.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [10.0, 3.0],
    [4.0, 2.0, 1.0, 2.0],
]
widths = [1.0, 1.3, 1.3, 1.3, 1.3, 1.3, 1.5]
width_multiplier = 1.0
color_width_power = 0.97
mono_width_power = 0.93

[font]
family = ["Arial", "DejaVu Sans", "Bitstream Vera Sans"]
size = 12.0

[grid]
strong = false
"##;

impl HouseStyle {
    /// Load a house style from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a house style from a TOML string, filling gaps from the default
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        Self::merge(Self::builtin()?, toml::from_str(content)?)
    }

    fn builtin() -> Result<Self, StylesheetError> {
        let empty = HouseStyle {
            name: None,
            palette: vec![],
            dashes: vec![],
            line_widths: vec![],
            width_multiplier: 1.0,
            color_width_power: 1.0,
            mono_width_power: 1.0,
            font_family: vec![],
            font_size: 12.0,
            strong_grid: false,
        };
        Self::merge(empty, toml::from_str(DEFAULT_STYLE)?)
    }

    fn merge(mut base: HouseStyle, parsed: TomlHouseStyle) -> Result<Self, StylesheetError> {
        if let Some(name) = parsed.metadata.and_then(|m| m.name) {
            base.name = Some(name);
        }
        if let Some(palette) = parsed.palette {
            base.palette = palette
                .colors
                .iter()
                .map(|c| Rgb::from_hex(c).ok_or_else(|| StylesheetError::InvalidColor(c.clone())))
                .collect::<Result<_, _>>()?;
        }
        if let Some(lines) = parsed.lines {
            if let Some(dashes) = lines.dashes {
                base.dashes = dashes
                    .into_iter()
                    .map(|d| if d.is_empty() { None } else { Some(d) })
                    .collect();
            }
            if let Some(widths) = lines.widths {
                base.line_widths = widths;
            }
            if let Some(m) = lines.width_multiplier {
                base.width_multiplier = m;
            }
            if let Some(p) = lines.color_width_power {
                base.color_width_power = p;
            }
            if let Some(p) = lines.mono_width_power {
                base.mono_width_power = p;
            }
        }
        if let Some(font) = parsed.font {
            if let Some(family) = font.family {
                base.font_family = family;
            }
            if let Some(size) = font.size {
                base.font_size = size;
            }
        }
        if let Some(strong) = parsed.grid.and_then(|g| g.strong) {
            base.strong_grid = strong;
        }
        base.validate()?;
        Ok(base)
    }

    /// Check that the lookup tables can be cycled through
    pub fn validate(&self) -> Result<(), StylesheetError> {
        if self.palette.is_empty() {
            return Err(StylesheetError::Invalid("palette is empty".into()));
        }
        if self.dashes.is_empty() {
            return Err(StylesheetError::Invalid("dash table is empty".into()));
        }
        if self.dashes.len() != self.line_widths.len() {
            return Err(StylesheetError::Invalid(format!(
                "{} dash patterns but {} line widths",
                self.dashes.len(),
                self.line_widths.len()
            )));
        }
        let bad_dash = self
            .dashes
            .iter()
            .flatten()
            .flatten()
            .any(|d| !d.is_finite() || *d < 0.0);
        if bad_dash {
            return Err(StylesheetError::Invalid(
                "dash lengths must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }

    /// CSS `font-family` value for the configured fonts
    pub fn font_family_css(&self) -> String {
        let mut families: Vec<String> = self
            .font_family
            .iter()
            .map(|f| {
                if f.contains(' ') {
                    format!("'{}'", f)
                } else {
                    f.clone()
                }
            })
            .collect();
        families.push("sans-serif".to_string());
        families.join(", ")
    }
}

impl Default for HouseStyle {
    fn default() -> Self {
        Self::builtin().expect("Default house style should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let style = HouseStyle::default();
        assert_eq!(style.palette.len(), 6);
        assert_eq!(style.dashes.len(), 7);
        assert_eq!(style.line_widths.len(), 7);
        assert_eq!(style.dashes[0], None);
        assert_eq!(style.dashes[1], Some(vec![1.2, 1.2]));
        assert_eq!(style.palette[0], Rgb::new(0, 0, 230));
        assert_eq!(style.palette[3], Rgb::new(128, 102, 0));
        assert!(!style.strong_grid);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let style = HouseStyle::from_str(
            r##"
[metadata]
name = "print"

[grid]
strong = true
"##,
        )
        .expect("Should parse");
        assert_eq!(style.name.as_deref(), Some("print"));
        assert!(style.strong_grid);
        assert_eq!(style.palette, HouseStyle::default().palette);
        assert_eq!(style.font_size, 12.0);
    }

    #[test]
    fn test_palette_override() {
        let style = HouseStyle::from_str(
            r##"
[palette]
colors = ["#112233", "#445566"]
"##,
        )
        .expect("Should parse");
        assert_eq!(style.palette, vec![Rgb::new(0x11, 0x22, 0x33), Rgb::new(0x44, 0x55, 0x66)]);
    }

    #[test]
    fn test_invalid_colour() {
        let result = HouseStyle::from_str(
            r##"
[palette]
colors = ["blue"]
"##,
        );
        assert!(matches!(result, Err(StylesheetError::InvalidColor(_))));
    }

    #[test]
    fn test_mismatched_tables() {
        let result = HouseStyle::from_str(
            r##"
[lines]
widths = [1.0]
"##,
        );
        assert!(matches!(result, Err(StylesheetError::Invalid(_))));
    }

    #[test]
    fn test_negative_dash_rejected() {
        let result = HouseStyle::from_str(
            r##"
[lines]
dashes = [[], [2.0, -1.0]]
widths = [1.0, 1.0]
"##,
        );
        assert!(matches!(result, Err(StylesheetError::Invalid(_))));
    }

    #[test]
    fn test_validate_hand_built_style() {
        let mut style = HouseStyle::default();
        assert!(style.validate().is_ok());
        style.line_widths.pop();
        assert!(matches!(style.validate(), Err(StylesheetError::Invalid(_))));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = HouseStyle::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(StylesheetError::ParseError(_))));
    }

    #[test]
    fn test_font_family_css() {
        let style = HouseStyle::default();
        assert_eq!(
            style.font_family_css(),
            "Arial, 'DejaVu Sans', 'Bitstream Vera Sans', sans-serif"
        );
    }
}
