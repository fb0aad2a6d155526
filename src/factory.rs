use crate::brush::{self, BrushOptions};
use crate::drawing::{DrawingElement, ElementKind, Shape, ShapeDescriptor, Style, Tool};
use crate::error::DrawError;
use crate::geometry::{PI, Point, arrow_heads, midpoint};

pub const ARROW_HEAD_LENGTH: f32 = 20.0;
pub const ARROW_HEAD_ANGLE: f32 = PI / 6.0;

pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;
pub const DEFAULT_BRUSH_SIZE: f32 = 8.0;
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

pub fn default_size(tool: Tool) -> f32 {
    match tool {
        Tool::Brush => DEFAULT_BRUSH_SIZE,
        Tool::Text => DEFAULT_FONT_SIZE,
        Tool::Line | Tool::Rectangle | Tool::Circle | Tool::Arrow | Tool::Eraser => {
            DEFAULT_STROKE_WIDTH
        }
    }
}

fn shape_for(tool: Tool, start: Point, end: Point) -> Option<Shape> {
    match tool {
        Tool::Line => Some(Shape::Line { start, end }),
        Tool::Rectangle => Some(Shape::Rectangle {
            position: start,
            size: [end[0] - start[0], end[1] - start[1]],
        }),
        Tool::Circle => Some(Shape::Ellipse {
            center: midpoint(start, end),
            radii: [
                (end[0] - start[0]).abs() / 2.0,
                (end[1] - start[1]).abs() / 2.0,
            ],
        }),
        Tool::Arrow => Some(Shape::Arrow {
            start,
            end,
            heads: arrow_heads(start, end, ARROW_HEAD_LENGTH, ARROW_HEAD_ANGLE),
        }),
        Tool::Brush | Tool::Text | Tool::Eraser => None,
    }
}

fn descriptor(id: usize, shape: Shape, style: &Style, tool: Tool) -> ShapeDescriptor {
    ShapeDescriptor {
        shape,
        stroke: style.stroke,
        fill: style.fill,
        stroke_width: style.size.unwrap_or_else(|| default_size(tool)),
        seed: id as u64 + 1,
    }
}

fn brush_outline(points: &[Point], size: Option<f32>) -> Vec<Point> {
    brush::outline(
        points,
        &BrushOptions::new(size.unwrap_or(DEFAULT_BRUSH_SIZE)),
    )
}

/// Creates an element of the given tool between two anchors.
pub fn create_element(
    id: usize,
    tool: Tool,
    start: Point,
    end: Point,
    style: &Style,
) -> Result<DrawingElement, DrawError> {
    let shaped = |tool: Tool| {
        shape_for(tool, start, end)
            .map(|shape| descriptor(id, shape, style, tool))
            .ok_or(DrawError::UnsupportedKind(tool))
    };
    let kind = match tool {
        Tool::Line => ElementKind::Line(shaped(tool)?),
        Tool::Rectangle => ElementKind::Rectangle(shaped(tool)?),
        Tool::Circle => ElementKind::Circle(shaped(tool)?),
        Tool::Arrow => ElementKind::Arrow(shaped(tool)?),
        Tool::Brush => {
            let points = vec![start];
            let outline = brush_outline(&points, style.size);
            ElementKind::Brush { points, outline }
        }
        Tool::Text => ElementKind::Text {
            content: String::new(),
        },
        Tool::Eraser => return Err(DrawError::UnsupportedKind(tool)),
    };

    Ok(DrawingElement {
        id,
        start,
        end,
        stroke: style.stroke,
        fill: style.fill,
        size: style.size,
        kind,
    })
}

/// Moves the in-progress end of an element to `point`.
///
/// Shapes get a freshly built descriptor from the unchanged start anchor,
/// brushes gain a sample and their whole outline is rebuilt. Text elements
/// have no drag geometry and are left alone.
pub fn update_element(element: &mut DrawingElement, point: Point) {
    let tool = element.tool();
    let style = element.style();
    let id = element.id;
    let start = element.start;
    match &mut element.kind {
        ElementKind::Line(shape)
        | ElementKind::Rectangle(shape)
        | ElementKind::Circle(shape)
        | ElementKind::Arrow(shape) => {
            if let Some(fresh) = shape_for(tool, start, point) {
                *shape = descriptor(id, fresh, &style, tool);
            }
            element.end = point;
        }
        ElementKind::Brush { points, outline } => {
            points.push(point);
            *outline = brush_outline(points, style.size);
            element.end = point;
        }
        ElementKind::Text { .. } => {}
    }
}
