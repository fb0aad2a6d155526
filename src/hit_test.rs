use crate::drawing::{DrawingElement, ElementKind, Shape};
use crate::factory::DEFAULT_FONT_SIZE;
use crate::geometry::{Point, ellipse_points, near_polyline, near_segment, point_in_polygon};

pub const ERASE_TOLERANCE: f32 = 1.0;

const ELLIPSE_SEGMENTS: usize = 64;
/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.2;

pub fn is_near(element: &DrawingElement, point: Point) -> bool {
    is_near_with(element, point, ERASE_TOLERANCE)
}

pub fn is_near_with(element: &DrawingElement, point: Point, tolerance: f32) -> bool {
    match &element.kind {
        ElementKind::Line(d) | ElementKind::Rectangle(d) | ElementKind::Arrow(d) => d
            .shape
            .segments()
            .iter()
            .any(|[a, b]| near_segment(*a, *b, point, tolerance)),
        ElementKind::Circle(d) => match d.shape {
            Shape::Ellipse { center, radii } => near_polyline(
                &ellipse_points(center, radii, ELLIPSE_SEGMENTS),
                point,
                tolerance,
            ),
            ref other => other
                .segments()
                .iter()
                .any(|[a, b]| near_segment(*a, *b, point, tolerance)),
        },
        ElementKind::Brush { outline, .. } => point_in_polygon(point, outline),
        ElementKind::Text { content } => {
            let (min, max) = text_bounds(element.start, content, element.size);
            point[0] >= min[0] && point[0] <= max[0] && point[1] >= min[1] && point[1] <= max[1]
        }
    }
}

/// Estimated box of a text element, anchored at its top-left corner.
pub fn text_bounds(anchor: Point, content: &str, size: Option<f32>) -> (Point, Point) {
    let size = size.unwrap_or(DEFAULT_FONT_SIZE);
    let lines: Vec<&str> = content.split('\n').collect();
    let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let width = widest as f32 * size * GLYPH_WIDTH;
    let height = lines.len() as f32 * size * LINE_HEIGHT;
    (anchor, [anchor[0] + width, anchor[1] + height])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{BLACK, Style, Tool};
    use crate::factory::{create_element, update_element};

    fn element(tool: Tool, start: Point, end: Point) -> DrawingElement {
        create_element(0, tool, start, end, &Style::new(BLACK)).unwrap()
    }

    #[test]
    fn test_line_hit() {
        let line = element(Tool::Line, [0.0, 0.0], [100.0, 100.0]);
        assert!(is_near(&line, [50.0, 50.0]));
        assert!(!is_near(&line, [1050.0, 50.0]));
        assert!(!is_near(&line, [50.0, 70.0]));
    }

    #[test]
    fn test_rectangle_hits_edges_only() {
        let rect = element(Tool::Rectangle, [0.0, 0.0], [100.0, 50.0]);
        assert!(is_near(&rect, [50.0, 0.0]));
        assert!(is_near(&rect, [100.0, 25.0]));
        assert!(is_near(&rect, [50.0, 50.0]));
        assert!(is_near(&rect, [0.0, 25.0]));
        assert!(!is_near(&rect, [50.0, 25.0]));
    }

    #[test]
    fn test_arrow_hits_heads() {
        let arrow = element(Tool::Arrow, [0.0, 0.0], [100.0, 0.0]);
        assert!(is_near(&arrow, [50.0, 0.0]));
        // midway along the upper head stroke
        let head = [(82.679 + 100.0) / 2.0, 5.0];
        assert!(is_near(&arrow, head) || is_near(&arrow, [head[0], -5.0]));
        assert!(!is_near(&arrow, [90.0, 30.0]));
    }

    #[test]
    fn test_circle_hits_boundary() {
        let circle = element(Tool::Circle, [0.0, 0.0], [100.0, 60.0]);
        assert!(is_near(&circle, [100.0, 30.0]));
        assert!(is_near(&circle, [50.0, 0.0]));
        assert!(!is_near(&circle, [50.0, 30.0]));
    }

    #[test]
    fn test_brush_hits_inside_outline() {
        let mut brush = element(Tool::Brush, [0.0, 0.0], [0.0, 0.0]);
        for i in 1..=20 {
            update_element(&mut brush, [i as f32 * 5.0, 0.0]);
        }
        assert!(is_near(&brush, [50.0, 0.0]));
        assert!(is_near(&brush, [50.0, 1.0]));
        assert!(!is_near(&brush, [50.0, 40.0]));
    }

    #[test]
    fn test_text_box() {
        let mut text = element(Tool::Text, [10.0, 10.0], [10.0, 10.0]);
        text.kind = ElementKind::Text {
            content: "hello".to_string(),
        };
        text.size = Some(20.0);
        assert!(is_near(&text, [20.0, 20.0]));
        assert!(is_near(&text, [65.0, 30.0]));
        assert!(!is_near(&text, [5.0, 20.0]));
        assert!(!is_near(&text, [80.0, 20.0]));
    }

    #[test]
    fn test_wider_tolerance() {
        let line = element(Tool::Line, [0.0, 0.0], [100.0, 0.0]);
        assert!(!is_near(&line, [50.0, 10.0]));
        assert!(is_near_with(&line, [50.0, 10.0], 3.0));
    }

    #[test]
    fn test_text_bounds_multiline() {
        let (min, max) = text_bounds([0.0, 0.0], "ab\nabcd", Some(10.0));
        assert_eq!(min, [0.0, 0.0]);
        assert!((max[0] - 24.0).abs() < 0.001);
        assert!((max[1] - 24.0).abs() < 0.001);
    }
}
