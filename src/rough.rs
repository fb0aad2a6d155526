use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::drawing::{Shape, rectangle_corners};
use crate::geometry::{PI, Point, TAU, distance};

#[derive(Debug, Clone)]
pub struct RoughOptions {
    pub roughness: f32,
    pub bowing: f32,
    pub max_randomness_offset: f32,
    pub curve_step_count: u32,
    pub disable_multi_stroke: bool,
}

impl Default for RoughOptions {
    fn default() -> Self {
        Self {
            roughness: 1.0,
            bowing: 1.0,
            max_randomness_offset: 2.0,
            curve_step_count: 32,
            disable_multi_stroke: false,
        }
    }
}

pub struct RoughGenerator {
    rng: StdRng,
    options: RoughOptions,
}

impl RoughGenerator {
    pub fn new(seed: u64, options: RoughOptions) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            options,
        }
    }

    fn random(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn offset(&mut self, min: f32, max: f32, gain: f32) -> f32 {
        self.options.roughness * gain * (self.random() * (max - min) + min)
    }

    fn jitter(&mut self, x: f32, gain: f32) -> f32 {
        self.offset(-x, x, gain)
    }

    /// Strokes for a whole shape. Each inner vector is one polyline.
    pub fn shape(&mut self, shape: &Shape) -> Vec<Vec<Point>> {
        match *shape {
            Shape::Line { start, end } => self.line(start, end),
            Shape::Rectangle { position, size } => self.rectangle(position, size),
            Shape::Ellipse { center, radii } => self.ellipse(center, radii),
            Shape::Arrow { start, end, heads } => {
                let mut strokes = self.line(start, end);
                for head in heads {
                    strokes.extend(self.line(head, end));
                }
                strokes
            }
        }
    }

    /// One or two wobbly passes over a straight segment.
    pub fn line(&mut self, start: Point, end: Point) -> Vec<Vec<Point>> {
        let mut strokes = vec![self.single_line(start, end)];
        if !self.options.disable_multi_stroke {
            strokes.push(self.single_line(start, end));
        }
        strokes
    }

    fn single_line(&mut self, start: Point, end: Point) -> Vec<Point> {
        let length = distance(start, end);
        let gain = if length < 200.0 {
            1.0
        } else if length > 500.0 {
            0.4
        } else {
            -0.0016668 * length + 1.233334
        };

        let mut offset = self.options.max_randomness_offset;
        if offset * offset * 100.0 > length * length {
            offset = length / 10.0;
        }

        let diverge = 0.2 + self.random() * 0.2;
        let bow = self.options.bowing * self.options.max_randomness_offset / 200.0;
        let mid_x = bow * (end[1] - start[1]);
        let mid_y = bow * (start[0] - end[0]);
        let mid_x = mid_x + self.jitter(mid_x, gain);
        let mid_y = mid_y + self.jitter(mid_y, gain);

        let p0 = [
            start[0] + self.jitter(offset, gain),
            start[1] + self.jitter(offset, gain),
        ];
        let cp1 = [
            mid_x + start[0] + (end[0] - start[0]) * diverge + self.jitter(offset, gain),
            mid_y + start[1] + (end[1] - start[1]) * diverge + self.jitter(offset, gain),
        ];
        let cp2 = [
            mid_x + start[0] + 2.0 * (end[0] - start[0]) * diverge + self.jitter(offset, gain),
            mid_y + start[1] + 2.0 * (end[1] - start[1]) * diverge + self.jitter(offset, gain),
        ];
        let p3 = [
            end[0] + self.jitter(offset, gain),
            end[1] + self.jitter(offset, gain),
        ];

        let mut points = vec![p0];
        points.extend(bezier(p0, cp1, cp2, p3, 10));
        points
    }

    pub fn rectangle(&mut self, position: Point, size: [f32; 2]) -> Vec<Vec<Point>> {
        let corners = rectangle_corners(position, size);
        (0..4)
            .flat_map(|i| self.line(corners[i], corners[(i + 1) % 4]))
            .collect()
    }

    pub fn ellipse(&mut self, center: Point, radii: [f32; 2]) -> Vec<Vec<Point>> {
        let [rx, ry] = radii;
        let variation = (self.random() * 4.0) as u32;
        let steps = (self.options.curve_step_count + variation).clamp(16, 48);
        let increment = TAU / steps as f32;

        let rx1 = rx + self.jitter(rx * 0.02, 1.0);
        let ry1 = ry + self.jitter(ry * 0.02, 1.0);
        let overlap = increment * self.offset(0.05, 0.1, 1.0);
        let mut strokes = vec![self.ellipse_pass(center, [rx1, ry1], increment, 1.0, overlap, steps)];

        if !self.options.disable_multi_stroke {
            let roughness = self.options.roughness;
            self.options.roughness = roughness * 0.8;
            let rx2 = rx + self.jitter(rx * 0.01, 1.0);
            let ry2 = ry + self.jitter(ry * 0.01, 1.0);
            let overlap = increment * self.offset(0.02, 0.05, 1.0);
            strokes.push(self.ellipse_pass(center, [rx2, ry2], increment, 0.5, overlap, steps));
            self.options.roughness = roughness;
        }
        strokes
    }

    fn ellipse_pass(
        &mut self,
        center: Point,
        radii: [f32; 2],
        increment: f32,
        spread: f32,
        overlap: f32,
        steps: u32,
    ) -> Vec<Point> {
        let [rx, ry] = radii;
        let mut points = Vec::with_capacity(steps as usize + 4);

        if self.options.roughness == 0.0 {
            let mut angle = 0.0;
            while angle <= TAU + increment * 0.5 {
                points.push([center[0] + rx * angle.cos(), center[1] + ry * angle.sin()]);
                angle += increment;
            }
            return points;
        }

        let start = self.jitter(0.1, 1.0) - PI / 2.0;
        let scale = 0.98 + self.random() * 0.04;
        points.push([
            self.jitter(spread * 0.3, 1.0) + center[0] + scale * rx * (start - increment).cos(),
            self.jitter(spread * 0.3, 1.0) + center[1] + scale * ry * (start - increment).sin(),
        ]);

        let end = TAU + start + overlap;
        let mut angle = start;
        let mut step = 0;
        while angle < end {
            let progress = step as f32 / steps as f32;
            let wave = (progress * PI * 3.0).sin() * 0.01 + (progress * PI * 5.0).cos() * 0.005;
            let modifier = (1.0 + wave + self.jitter(0.02, 1.0)).clamp(0.95, 1.05);

            let prx = (rx * modifier + self.jitter(rx * 0.01, 1.0)).clamp(rx * 0.92, rx * 1.08);
            let pry = (ry * modifier + self.jitter(ry * 0.01, 1.0)).clamp(ry * 0.92, ry * 1.08);
            points.push([
                self.jitter(spread * 0.2, 1.0) + center[0] + prx * angle.cos(),
                self.jitter(spread * 0.2, 1.0) + center[1] + pry * angle.sin(),
            ]);

            angle += increment * (0.95 + self.random() * 0.1);
            step += 1;
        }

        let tail = 0.96 + self.random() * 0.08;
        let tail_angle = start + TAU + overlap * 0.5;
        points.push([
            self.jitter(spread * 0.5, 1.0) + center[0] + tail * rx * tail_angle.cos(),
            self.jitter(spread * 0.5, 1.0) + center[1] + tail * ry * tail_angle.sin(),
        ]);
        points
    }
}

fn bezier(p0: Point, p1: Point, p2: Point, p3: Point, segments: u32) -> Vec<Point> {
    (1..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            [
                a * p0[0] + b * p1[0] + c * p2[0] + d * p3[0],
                a * p0[1] + b * p1[1] + c * p2[1] + d * p3[1],
            ]
        })
        .collect()
}
