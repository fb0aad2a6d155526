use crate::drawing::{Color, DrawingElement, ElementKind, Shape, ShapeDescriptor, rectangle_corners};
use crate::factory::DEFAULT_FONT_SIZE;
use crate::geometry::{Point, ellipse_points};
use crate::rough::{RoughGenerator, RoughOptions};

/// Something the element list can be painted onto.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    /// Draws `text` with the top of the first line at `position[1]`.
    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: Color);
}

pub struct Renderer {
    pub background: Color,
    pub rough: RoughOptions,
}

impl Renderer {
    pub fn new(background: Color, rough: RoughOptions) -> Self {
        Self { background, rough }
    }

    /// Clears `surface` and paints every element in list order.
    pub fn render(&self, elements: &[DrawingElement], surface: &mut dyn Surface) {
        surface.clear(self.background);
        for element in elements {
            self.draw_element(element, surface);
        }
        log::trace!("rendered {} elements", elements.len());
    }

    fn draw_element(&self, element: &DrawingElement, surface: &mut dyn Surface) {
        match &element.kind {
            ElementKind::Line(shape)
            | ElementKind::Rectangle(shape)
            | ElementKind::Circle(shape)
            | ElementKind::Arrow(shape) => self.draw_shape(shape, surface),
            ElementKind::Brush { outline, .. } => surface.fill_polygon(outline, element.stroke),
            ElementKind::Text { content } => {
                if !content.is_empty() {
                    surface.draw_text(
                        content,
                        element.start,
                        element.size.unwrap_or(DEFAULT_FONT_SIZE),
                        element.stroke,
                    );
                }
            }
        }
    }

    fn draw_shape(&self, descriptor: &ShapeDescriptor, surface: &mut dyn Surface) {
        if let Some(fill) = descriptor.fill {
            match descriptor.shape {
                Shape::Rectangle { position, size } => {
                    surface.fill_polygon(&rectangle_corners(position, size), fill)
                }
                Shape::Ellipse { center, radii } => {
                    surface.fill_polygon(&ellipse_points(center, radii, 64), fill)
                }
                Shape::Line { .. } | Shape::Arrow { .. } => {}
            }
        }

        let mut generator = RoughGenerator::new(descriptor.seed, self.rough.clone());
        for stroke in generator.shape(&descriptor.shape) {
            surface.stroke_polyline(&stroke, descriptor.stroke, descriptor.stroke_width);
        }
    }
}
