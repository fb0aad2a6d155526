use serde::{Deserialize, Deserializer, Serialize, de};

use crate::error::DrawError;
use crate::geometry::Point;

pub type Color = [f32; 4];

pub const BLACK: Color = [0.0, 0.0, 0.0, 1.0];
pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Line,
    Rectangle,
    Circle,
    Arrow,
    Brush,
    Text,
    Eraser,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Line,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Arrow,
        Tool::Brush,
        Tool::Text,
        Tool::Eraser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Line => "line",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Arrow => "arrow",
            Tool::Brush => "brush",
            Tool::Text => "text",
            Tool::Eraser => "eraser",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Style read from the tool settings when an element is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Color,
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub size: Option<f32>,
}

impl Style {
    pub fn new(stroke: Color) -> Self {
        Self {
            stroke,
            fill: None,
            size: None,
        }
    }
}

/// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
pub fn parse_color(text: &str) -> Result<Color, DrawError> {
    let invalid = || DrawError::InvalidColor(text.to_string());
    let hex = text.trim().strip_prefix('#').ok_or_else(invalid)?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => hex.to_string(),
        _ => return Err(invalid()),
    };
    let mut channels = [1.0; 4];
    for (i, channel) in channels.iter_mut().enumerate().take(expanded.len() / 2) {
        let byte = u8::from_str_radix(expanded.get(i * 2..i * 2 + 2).ok_or_else(invalid)?, 16)
            .map_err(|_| invalid())?;
        *channel = byte as f32 / 255.0;
    }
    Ok(channels)
}

/// Like [`parse_color`], but `"none"` (or an empty string) means no fill.
pub fn parse_fill(text: &str) -> Result<Option<Color>, DrawError> {
    match text.trim() {
        "" | "none" | "transparent" => Ok(None),
        other => parse_color(other).map(Some),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgba(Color),
}

/// Accepts either a hex string or an `[r, g, b, a]` array.
pub fn deserialize_color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    match ColorRepr::deserialize(deserializer)? {
        ColorRepr::Hex(text) => parse_color(&text).map_err(de::Error::custom),
        ColorRepr::Rgba(color) => Ok(color),
    }
}

/// Like [`deserialize_color`], with `null` or `"none"` meaning no fill.
pub fn deserialize_fill<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Color>, D::Error> {
    match Option::<ColorRepr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(ColorRepr::Hex(text)) => parse_fill(&text).map_err(de::Error::custom),
        Some(ColorRepr::Rgba(color)) => Ok(Some(color)),
    }
}

/// Renderable geometry baked from an element's anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line {
        start: Point,
        end: Point,
    },
    /// `size` keeps the sign of the drag direction.
    Rectangle {
        position: Point,
        size: [f32; 2],
    },
    Ellipse {
        center: Point,
        radii: [f32; 2],
    },
    Arrow {
        start: Point,
        end: Point,
        heads: [Point; 2],
    },
}

impl Shape {
    /// Straight segments making up the outline. Empty for ellipses.
    pub fn segments(&self) -> Vec<[Point; 2]> {
        match *self {
            Shape::Line { start, end } => vec![[start, end]],
            Shape::Rectangle { position, size } => {
                let corners = rectangle_corners(position, size);
                (0..4).map(|i| [corners[i], corners[(i + 1) % 4]]).collect()
            }
            Shape::Ellipse { .. } => Vec::new(),
            Shape::Arrow { start, end, heads } => {
                vec![[start, end], [heads[0], end], [heads[1], end]]
            }
        }
    }
}

pub fn rectangle_corners(position: Point, size: [f32; 2]) -> [Point; 4] {
    [
        position,
        [position[0] + size[0], position[1]],
        [position[0] + size[0], position[1] + size[1]],
        [position[0], position[1] + size[1]],
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub shape: Shape,
    pub stroke: Color,
    pub fill: Option<Color>,
    pub stroke_width: f32,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    Line(ShapeDescriptor),
    Rectangle(ShapeDescriptor),
    Circle(ShapeDescriptor),
    Arrow(ShapeDescriptor),
    Brush {
        points: Vec<Point>,
        outline: Vec<Point>,
    },
    Text {
        content: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    pub id: usize,
    pub start: Point,
    pub end: Point,
    pub stroke: Color,
    pub fill: Option<Color>,
    pub size: Option<f32>,
    pub kind: ElementKind,
}

impl DrawingElement {
    pub fn tool(&self) -> Tool {
        match self.kind {
            ElementKind::Line(_) => Tool::Line,
            ElementKind::Rectangle(_) => Tool::Rectangle,
            ElementKind::Circle(_) => Tool::Circle,
            ElementKind::Arrow(_) => Tool::Arrow,
            ElementKind::Brush { .. } => Tool::Brush,
            ElementKind::Text { .. } => Tool::Text,
        }
    }

    pub fn shape(&self) -> Option<&ShapeDescriptor> {
        match &self.kind {
            ElementKind::Line(shape)
            | ElementKind::Rectangle(shape)
            | ElementKind::Circle(shape)
            | ElementKind::Arrow(shape) => Some(shape),
            ElementKind::Brush { .. } | ElementKind::Text { .. } => None,
        }
    }

    pub fn style(&self) -> Style {
        Style {
            stroke: self.stroke,
            fill: self.fill,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#ffffff").unwrap(), WHITE);
        assert_eq!(parse_color("#000").unwrap(), BLACK);
        let c = parse_color("#ff000080").unwrap();
        assert!((c[0] - 1.0).abs() < 0.001);
        assert!((c[3] - 128.0 / 255.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_color_rejects_garbage() {
        assert!(parse_color("red").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#gggggg").is_err());
    }

    #[test]
    fn test_parse_fill_none() {
        assert_eq!(parse_fill("none").unwrap(), None);
        assert_eq!(parse_fill("#fff").unwrap(), Some(WHITE));
    }

    #[test]
    fn test_rectangle_segments_close_the_outline() {
        let shape = Shape::Rectangle {
            position: [0.0, 0.0],
            size: [-10.0, 5.0],
        };
        let segments = shape.segments();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0][1], [-10.0, 0.0]);
        assert_eq!(segments[3][1], [0.0, 0.0]);
    }
}
