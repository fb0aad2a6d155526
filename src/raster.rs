use std::io::Cursor;
use std::path::Path;

use ab_glyph::{Font, FontArc, ScaleFont, point};
use image::{ImageOutputFormat, Rgba, RgbaImage};

use crate::drawing::Color;
use crate::error::DrawError;
use crate::geometry::{Point, bounds};
use crate::renderer::Surface;

pub struct RasterSurface {
    image: RgbaImage,
    font: Option<FontArc>,
}

fn to_rgba(color: Color) -> [f32; 4] {
    color.map(|c| c.clamp(0.0, 1.0))
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq < 1e-6 {
        0.0
    } else {
        (((p[0] - a[0]) * dx + (p[1] - a[1]) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a[0] + dx * t, a[1] + dy * t);
    ((p[0] - cx).powi(2) + (p[1] - cy).powi(2)).sqrt()
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
            font: None,
        }
    }

    pub fn load_font(&mut self, path: &Path) -> Result<(), DrawError> {
        let bytes = std::fs::read(path)?;
        self.font = Some(FontArc::try_from_vec(bytes)?);
        log::info!("loaded font {}", path.display());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, DrawError> {
        let mut bytes = Cursor::new(Vec::new());
        self.image.write_to(&mut bytes, ImageOutputFormat::Png)?;
        Ok(bytes.into_inner())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), DrawError> {
        std::fs::write(path, self.encode_png()?)?;
        log::info!(
            "exported {}x{} canvas to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }

    /// Source-over blend of `color` at `coverage` into one pixel.
    fn blend(&mut self, x: i64, y: i64, color: [f32; 4], coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = color[3] * coverage.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let Rgba(dst) = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_alpha = dst[3] as f32 / 255.0;
        let out_alpha = alpha + dst_alpha * (1.0 - alpha);
        for i in 0..3 {
            let d = dst[i] as f32 / 255.0;
            let c = if out_alpha > 0.0 {
                (color[i] * alpha + d * dst_alpha * (1.0 - alpha)) / out_alpha
            } else {
                0.0
            };
            dst[i] = (c * 255.0).round() as u8;
        }
        dst[3] = (out_alpha * 255.0).round() as u8;
    }

    /// Pixel range covering `min..=max`, clipped to the image.
    fn span(&self, min: Point, max: Point) -> Option<(i64, i64, i64, i64)> {
        let x0 = (min[0].floor() as i64).max(0);
        let y0 = (min[1].floor() as i64).max(0);
        let x1 = (max[0].ceil() as i64).min(self.width() as i64 - 1);
        let y1 = (max[1].ceil() as i64).min(self.height() as i64 - 1);
        (x0 <= x1 && y0 <= y1).then_some((x0, y0, x1, y1))
    }

    fn stroke_segment(&mut self, a: Point, b: Point, color: [f32; 4], width: f32) {
        let half = (width / 2.0).max(0.5);
        let min = [a[0].min(b[0]) - half - 1.0, a[1].min(b[1]) - half - 1.0];
        let max = [a[0].max(b[0]) + half + 1.0, a[1].max(b[1]) + half + 1.0];
        let Some((x0, y0, x1, y1)) = self.span(min, max) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let center = [x as f32 + 0.5, y as f32 + 0.5];
                let d = distance_to_segment(center, a, b);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self, color: Color) {
        let [r, g, b, a] = to_rgba(color).map(|c| (c * 255.0).round() as u8);
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([r, g, b, a]);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f32) {
        let color = to_rgba(color);
        match points {
            [] => {}
            [single] => self.stroke_segment(*single, *single, color, width),
            _ => {
                for pair in points.windows(2) {
                    self.stroke_segment(pair[0], pair[1], color, width);
                }
            }
        }
    }

    /// Non-zero scanline fill sampled at pixel centers.
    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.len() < 3 {
            return;
        }
        let color = to_rgba(color);
        let Some((min, max)) = bounds(points) else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.span(min, max) else {
            return;
        };

        let mut crossings: Vec<(f32, i32)> = Vec::new();
        for y in y0..=y1 {
            let sy = y as f32 + 0.5;
            crossings.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a[1] <= sy) != (b[1] <= sy) {
                    let t = (sy - a[1]) / (b[1] - a[1]);
                    let winding = if b[1] > a[1] { 1 } else { -1 };
                    crossings.push((a[0] + t * (b[0] - a[0]), winding));
                }
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let start = ((pair[0].0 - 0.5).ceil() as i64).max(x0);
                let end = ((pair[1].0 - 0.5).floor() as i64).min(x1);
                for x in start..=end {
                    self.blend(x, y, color, 1.0);
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, position: Point, size: f32, color: Color) {
        let Some(font) = self.font.clone() else {
            log::warn!("no font loaded, skipping text {:?}", text);
            return;
        };
        let color = to_rgba(color);
        let scaled = font.as_scaled(size);
        let line_height = scaled.height() + scaled.line_gap();

        for (row, line) in text.split('\n').enumerate() {
            let baseline = position[1] + scaled.ascent() + row as f32 * line_height;
            let mut caret = position[0];
            let mut previous = None;
            for ch in line.chars() {
                let id = scaled.glyph_id(ch);
                if let Some(prev) = previous {
                    caret += scaled.kern(prev, id);
                }
                let glyph = id.with_scale_and_position(size, point(caret, baseline));
                caret += scaled.h_advance(id);
                previous = Some(id);

                let Some(outlined) = font.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    self.blend(
                        bounds.min.x as i64 + gx as i64,
                        bounds.min.y as i64 + gy as i64,
                        color,
                        coverage,
                    );
                });
            }
        }
    }
}
