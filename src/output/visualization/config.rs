//! Plot configuration shared across visualization modules
//!
//! One structure configures scene frames, the stage figure and the static
//! charts. Constructors set sensible axis ranges and titles per plot kind.

use plotters::prelude::*;

/// Dentin fill (moccasin)
pub const DENTIN_COLOR: RGBColor = RGBColor(255, 228, 181);
/// Healthy enamel fill (whitesmoke)
pub const ENAMEL_COLOR: RGBColor = RGBColor(245, 245, 245);
/// Enamel fill once erosion has started
pub const ERODED_ENAMEL_COLOR: RGBColor = RGBColor(232, 232, 232);
/// Coating fill (skyblue)
pub const COATING_COLOR: RGBColor = RGBColor(135, 206, 235);
/// Ion marker color
pub const ION_COLOR: RGBColor = RGBColor(30, 144, 255);

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use enamel_rs::output::visualization::PlotConfig;
///
/// let mut config = PlotConfig::frame();
/// config.width = 1280;
/// config.show_legend = false;
///
/// assert_eq!(config.x_range, (-3.0, 3.0));
/// ```
#[derive(Clone, Debug)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1000)
    pub width: u32,

    /// Image height in pixels (default: 600)
    pub height: u32,

    /// Plot title; scene frames use the snapshot title when empty
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: auto-set by plot type)
    pub ylabel: String,

    /// Horizontal axis range
    pub x_range: (f64, f64),

    /// Vertical axis range
    pub y_range: (f64, f64),

    /// Attacking acid color (default: RED)
    pub acid_color: RGBColor,

    /// Resistance-test acid color (default: dark orange)
    pub reservoir_acid_color: RGBColor,

    /// Particle marker radius in pixels (default: 3)
    pub marker_size: u32,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines and axes (default: true, scenes turn it off)
    pub show_grid: bool,

    /// Draw the series legend (default: true)
    pub show_legend: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            x_range: (0.0, 1.0),
            y_range: (0.0, 1.0),
            acid_color: RED,
            reservoir_acid_color: RGBColor(255, 140, 0),
            marker_size: 3,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            show_legend: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Scene frames: tooth cross-section, no axes
    ///
    /// The title is left empty so each frame shows its snapshot title.
    pub fn frame() -> Self {
        Self {
            title: String::new(),
            x_range: (-3.0, 3.0),
            y_range: (-2.0, 4.0),
            show_grid: false,
            ..Self::default()
        }
    }

    /// Three-panel stage figure
    pub fn stages() -> Self {
        Self {
            width: 1500,
            height: 500,
            ..Self::frame()
        }
    }

    /// Relative solubility against pH
    pub fn solubility(title: impl IntoOptionalTitle) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Enamel Erosion Cause: Solubility vs pH".to_string()),
            xlabel: "pH (basic <- -> acidic)".to_string(),
            ylabel: "Relative Solubility".to_string(),
            x_range: (3.0, 8.0),
            y_range: (0.0, 100.0),
            ..Self::default()
        }
    }

    /// Coating effectiveness bar chart
    pub fn comparison(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1200,
            height: 700,
            title: title.into_optional_title().unwrap_or_else(|| {
                "Coating Material Protection Effectiveness Comparison".to_string()
            }),
            xlabel: "Coating Material Type".to_string(),
            ylabel: "Effectiveness Index (%)".to_string(),
            y_range: (0.0, 100.0),
            ..Self::default()
        }
    }

    /// Coating property radar chart
    pub fn compatibility(title: impl IntoOptionalTitle) -> Self {
        Self {
            width: 1000,
            height: 1000,
            title: title.into_optional_title().unwrap_or_else(|| {
                "Chemical Compatibility Comparison by Coating Material".to_string()
            }),
            x_range: (-1.35, 1.35),
            y_range: (-1.35, 1.35),
            show_grid: false,
            ..Self::default()
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
