use crate::geometry::{PI, Point, distance, ellipse_points};

#[derive(Debug, Clone, Copy)]
pub struct BrushOptions {
    pub size: f32,
    /// How much fast movement narrows the stroke, 0 keeps a constant width.
    pub thinning: f32,
    /// Fraction of each new sample that is pulled toward the previous one.
    pub streamline: f32,
    pub cap_segments: usize,
}

impl BrushOptions {
    pub fn new(size: f32) -> Self {
        Self {
            size: size.max(1.0),
            thinning: 0.5,
            streamline: 0.5,
            cap_segments: 8,
        }
    }
}

fn lerp(a: Point, b: Point, t: f32) -> Point {
    [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
}

fn normalize(v: Point) -> Option<Point> {
    let len = (v[0] * v[0] + v[1] * v[1]).sqrt();
    (len > f32::EPSILON).then(|| [v[0] / len, v[1] / len])
}

fn streamlined(points: &[Point], streamline: f32) -> Vec<Point> {
    let t = 1.0 - streamline.clamp(0.0, 0.95);
    let mut out = Vec::with_capacity(points.len());
    let mut prev = points[0];
    out.push(prev);
    for (i, &p) in points.iter().enumerate().skip(1) {
        // the last sample is kept exact so the stroke ends under the pointer
        prev = if i == points.len() - 1 { p } else { lerp(prev, p, t) };
        out.push(prev);
    }
    out
}

fn radii(points: &[Point], options: &BrushOptions) -> Vec<f32> {
    let half = options.size / 2.0;
    let mut pressure = 1.0f32;
    let mut out = Vec::with_capacity(points.len());
    for i in 0..points.len() {
        if i > 0 {
            let speed = (distance(points[i - 1], points[i]) / options.size).min(1.0);
            let target = 1.0 - speed;
            pressure += (target - pressure) * 0.3;
        }
        let r = half * (1.0 - options.thinning * (1.0 - pressure));
        out.push(r.max(half * 0.25));
    }
    out
}

fn arc(center: Point, radius: f32, from: f32, segments: usize, out: &mut Vec<Point>) {
    for step in 1..segments {
        let a = from - PI * step as f32 / segments as f32;
        out.push([center[0] + radius * a.cos(), center[1] + radius * a.sin()]);
    }
}

/// Closed polygon around the sampled points. A single sample (or a stroke
/// that never moved) yields a dot of the brush size.
pub fn outline(points: &[Point], options: &BrushOptions) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let segments = options.cap_segments.max(2);

    let samples = streamlined(points, options.streamline);
    let mut directions: Vec<Option<Point>> = (0..samples.len())
        .map(|i| {
            let a = samples[i.saturating_sub(1)];
            let b = samples[(i + 1).min(samples.len() - 1)];
            normalize([b[0] - a[0], b[1] - a[1]])
        })
        .collect();

    if directions.iter().all(Option::is_none) {
        let r = options.size / 2.0;
        let mut dot = ellipse_points(first, [r, r], segments * 2);
        dot.pop();
        return dot;
    }

    // fill gaps left by repeated samples with the nearest known direction
    let mut last = directions.iter().flatten().next().copied();
    for dir in directions.iter_mut() {
        match dir {
            Some(d) => last = Some(*d),
            None => *dir = last,
        }
    }

    let radii = radii(&samples, options);
    let mut left = Vec::with_capacity(samples.len());
    let mut right = Vec::with_capacity(samples.len());
    for ((p, dir), r) in samples.iter().zip(&directions).zip(&radii) {
        let [dx, dy] = dir.unwrap_or([1.0, 0.0]);
        let normal = [-dy, dx];
        left.push([p[0] + normal[0] * r, p[1] + normal[1] * r]);
        right.push([p[0] - normal[0] * r, p[1] - normal[1] * r]);
    }

    let angle_of = |dir: Option<Point>| {
        let [dx, dy] = dir.unwrap_or([1.0, 0.0]);
        dx.atan2(-dy)
    };

    let last_index = samples.len() - 1;
    let mut polygon = Vec::with_capacity(samples.len() * 2 + segments * 2);
    polygon.extend(left.iter().copied());
    arc(
        samples[last_index],
        radii[last_index],
        angle_of(directions[last_index]),
        segments,
        &mut polygon,
    );
    polygon.extend(right.iter().rev().copied());
    arc(
        samples[0],
        radii[0],
        angle_of(directions[0]) - PI,
        segments,
        &mut polygon,
    );
    polygon
}
