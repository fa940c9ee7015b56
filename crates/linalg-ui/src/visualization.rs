//! Vector plots as scene descriptions
//!
//! One or two vectors are drawn as arrows from the origin. With a 3D
//! charting host the scene is a set of traces inside a fixed cube; without
//! one it is a list of 2D canvas draw commands using the first two
//! components. Hosts turn the scene into pixels.

use crate::config::ClientConfig;
use crate::theme::Theme;
use serde::Serialize;
use serde_json::Value;
use std::f64::consts::FRAC_PI_6;

/// Arrow colours for vector 1 and vector 2
pub const VECTOR_COLORS: [&str; 2] = ["#667eea", "#764ba2"];

/// Arrowhead side length in pixels
pub const ARROW_LENGTH: f64 = 15.0;

/// Grid lines drawn on each side of the origin
const GRID_LINES: i32 = 10;

/// What the host can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotCapability {
    /// Interactive 3D chart available
    #[default]
    Rich3d,
    /// Plain 2D canvas only
    Canvas2d,
}

/// A 2D point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position, growing downwards
    pub y: f64,
}

impl Point {
    /// Creates a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One arrow in the 3D plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace3d {
    /// Legend name
    pub name: String,
    /// Line and marker colour
    pub color: String,
    /// Start and end x
    pub x: [f64; 2],
    /// Start and end y
    pub y: [f64; 2],
    /// Start and end z
    pub z: [f64; 2],
}

/// 3D plot inside a fixed cube
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot3d {
    /// Chart title
    pub title: String,
    /// One trace per vector
    pub traces: Vec<Trace3d>,
    /// Range shared by all three axes
    pub axis_range: [f64; 2],
    /// Background colour
    pub paper_color: String,
    /// Title and legend colour
    pub font_color: String,
    /// Axis colour
    pub axis_color: String,
}

/// Canvas drawing primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Filled rectangle
    FillRect {
        /// Top-left corner
        origin: Point,
        /// Width
        width: f64,
        /// Height
        height: f64,
        /// Fill colour
        color: String,
    },
    /// Stroked segment
    Line {
        /// Start
        from: Point,
        /// End
        to: Point,
        /// Stroke colour
        color: String,
        /// Stroke width
        width: f64,
    },
    /// Filled closed polygon
    FillPolygon {
        /// Vertices
        points: Vec<Point>,
        /// Fill colour
        color: String,
    },
    /// Text label
    Text {
        /// Baseline start
        at: Point,
        /// Label text
        text: String,
        /// Fill colour
        color: String,
        /// CSS font
        font: String,
    },
}

/// 2D canvas scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasScene {
    /// Canvas width
    pub width: f64,
    /// Canvas height
    pub height: f64,
    /// Commands in paint order
    pub commands: Vec<DrawCommand>,
}

/// Content of the visualization area
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    /// "Enter a vector above and click Visualize"
    #[default]
    Placeholder,
    /// 3D chart
    Plot3d(Plot3d),
    /// 2D canvas
    Canvas(CanvasScene),
}

struct CanvasPalette {
    background: &'static str,
    grid: &'static str,
    axis: &'static str,
}

const fn canvas_palette(theme: Theme) -> CanvasPalette {
    if theme.is_dark() {
        CanvasPalette {
            background: "#1e293b",
            grid: "#334155",
            axis: "#94a3b8",
        }
    } else {
        CanvasPalette {
            background: "#fafafa",
            grid: "#e2e8f0",
            axis: "#475569",
        }
    }
}

/// Numeric components of a parsed vector; non-numbers count as 0
#[must_use]
pub fn components(value: &Value) -> Vec<f64> {
    value
        .as_array()
        .map(|items| items.iter().map(|v| v.as_f64().unwrap_or(0.0)).collect())
        .unwrap_or_default()
}

fn component(vector: &[f64], index: usize) -> f64 {
    vector.get(index).copied().unwrap_or(0.0)
}

/// Builds the scene for up to two vectors
#[must_use]
pub fn render(
    capability: PlotCapability,
    vectors: &[Vec<f64>],
    theme: Theme,
    config: &ClientConfig,
) -> Scene {
    match capability {
        PlotCapability::Rich3d => Scene::Plot3d(plot_3d(vectors, theme, config.plot_range)),
        PlotCapability::Canvas2d => Scene::Canvas(canvas_2d(vectors, theme, config)),
    }
}

/// 3D traces from the origin; missing components are 0
#[must_use]
pub fn plot_3d(vectors: &[Vec<f64>], theme: Theme, range: f64) -> Plot3d {
    let traces = vectors
        .iter()
        .zip(VECTOR_COLORS)
        .enumerate()
        .map(|(i, (v, color))| Trace3d {
            name: format!("Vector {}", i + 1),
            color: color.to_string(),
            x: [0.0, component(v, 0)],
            y: [0.0, component(v, 1)],
            z: [0.0, component(v, 2)],
        })
        .collect();

    let dark = theme.is_dark();
    Plot3d {
        title: "Vector Visualization".to_string(),
        traces,
        axis_range: [-range, range],
        paper_color: if dark { "#1e293b" } else { "#ffffff" }.to_string(),
        font_color: if dark { "#f1f5f9" } else { "#1e293b" }.to_string(),
        axis_color: if dark { "#94a3b8" } else { "#64748b" }.to_string(),
    }
}

/// 2D projection on a gridded canvas centred on the origin
#[must_use]
pub fn canvas_2d(vectors: &[Vec<f64>], theme: Theme, config: &ClientConfig) -> CanvasScene {
    let (width, height, scale) = (config.canvas_width, config.canvas_height, config.canvas_scale);
    let center = Point::new(width / 2.0, height / 2.0);
    let palette = canvas_palette(theme);
    let mut commands = vec![DrawCommand::FillRect {
        origin: Point::new(0.0, 0.0),
        width,
        height,
        color: palette.background.to_string(),
    }];

    for i in -GRID_LINES..=GRID_LINES {
        let offset = f64::from(i) * scale;
        commands.push(line(
            Point::new(center.x + offset, 0.0),
            Point::new(center.x + offset, height),
            palette.grid,
            1.0,
        ));
        commands.push(line(
            Point::new(0.0, center.y + offset),
            Point::new(width, center.y + offset),
            palette.grid,
            1.0,
        ));
    }

    commands.push(line(
        Point::new(0.0, center.y),
        Point::new(width, center.y),
        palette.axis,
        2.0,
    ));
    commands.push(line(
        Point::new(center.x, 0.0),
        Point::new(center.x, height),
        palette.axis,
        2.0,
    ));

    for (i, (v, color)) in vectors.iter().zip(VECTOR_COLORS).enumerate() {
        let dx = component(v, 0) * scale;
        let dy = -component(v, 1) * scale;
        draw_arrow(&mut commands, center, dx, dy, color, &format!("V{}", i + 1));
    }

    let font = "14px Inter, sans-serif".to_string();
    commands.push(DrawCommand::Text {
        at: Point::new(width - 20.0, center.y - 10.0),
        text: "X".to_string(),
        color: palette.axis.to_string(),
        font: font.clone(),
    });
    commands.push(DrawCommand::Text {
        at: Point::new(center.x + 10.0, 20.0),
        text: "Y".to_string(),
        color: palette.axis.to_string(),
        font,
    });

    CanvasScene {
        width,
        height,
        commands,
    }
}

fn line(from: Point, to: Point, color: &str, width: f64) -> DrawCommand {
    DrawCommand::Line {
        from,
        to,
        color: color.to_string(),
        width,
    }
}

fn draw_arrow(
    commands: &mut Vec<DrawCommand>,
    start: Point,
    dx: f64,
    dy: f64,
    color: &str,
    label: &str,
) {
    let end = Point::new(start.x + dx, start.y + dy);
    commands.push(line(start, end, color, 3.0));
    commands.push(DrawCommand::FillPolygon {
        points: arrow_head(end, dy.atan2(dx), ARROW_LENGTH).to_vec(),
        color: color.to_string(),
    });
    commands.push(DrawCommand::Text {
        at: Point::new(end.x + 10.0, end.y - 10.0),
        text: label.to_string(),
        color: color.to_string(),
        font: "bold 14px Inter, sans-serif".to_string(),
    });
}

/// Triangle at `tip` pointing along `angle`, sides at ±30°
#[must_use]
pub fn arrow_head(tip: Point, angle: f64, length: f64) -> [Point; 3] {
    let side = |theta: f64| Point::new(tip.x - length * theta.cos(), tip.y - length * theta.sin());
    [tip, side(angle - FRAC_PI_6), side(angle + FRAC_PI_6)]
}
