pub type Point = [f32; 2];

pub const PI: f32 = std::f32::consts::PI;
pub const TAU: f32 = std::f32::consts::TAU;

pub fn distance(a: Point, b: Point) -> f32 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}

pub fn midpoint(a: Point, b: Point) -> Point {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// How much longer the detour `start -> point -> end` is than the segment itself.
/// Zero when the point lies on the segment, growing as it moves away.
pub fn segment_slack(start: Point, end: Point, point: Point) -> f32 {
    distance(start, point) + distance(point, end) - distance(start, end)
}

pub fn near_segment(start: Point, end: Point, point: Point, tolerance: f32) -> bool {
    segment_slack(start, end, point) < tolerance
}

pub fn near_polyline(points: &[Point], point: Point, tolerance: f32) -> bool {
    points
        .windows(2)
        .any(|pair| near_segment(pair[0], pair[1], point, tolerance))
}

/// End points of the two arrowhead strokes for an arrow pointing at `tip`.
///
/// Each head is `head_length` away from the tip, rotated `spread` radians
/// either side of the reversed shaft direction.
pub fn arrow_heads(tail: Point, tip: Point, head_length: f32, spread: f32) -> [Point; 2] {
    let angle = (tip[1] - tail[1]).atan2(tip[0] - tail[0]);
    let back = angle + PI;
    let head = |a: f32| [tip[0] + head_length * a.cos(), tip[1] + head_length * a.sin()];
    [head(back - spread), head(back + spread)]
}

/// Closed polygon approximating an axis-aligned ellipse. The first point is
/// repeated at the end.
pub fn ellipse_points(center: Point, radii: [f32; 2], segments: usize) -> Vec<Point> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let angle = TAU * i as f32 / segments as f32;
            [
                center[0] + radii[0] * angle.cos(),
                center[1] + radii[1] * angle.sin(),
            ]
        })
        .collect()
}

/// Non-zero winding containment test.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut winding = 0i32;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        let side = (b[0] - a[0]) * (point[1] - a[1]) - (point[0] - a[0]) * (b[1] - a[1]);
        if a[1] <= point[1] {
            if b[1] > point[1] && side > 0.0 {
                winding += 1;
            }
        } else if b[1] <= point[1] && side < 0.0 {
            winding -= 1;
        }
    }
    winding != 0
}

/// Axis-aligned bounds as `(min, max)`. Returns `None` for an empty slice.
pub fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(min, max), p| {
        (
            [min[0].min(p[0]), min[1].min(p[1])],
            [max[0].max(p[0]), max[1].max(p[1])],
        )
    }))
}
