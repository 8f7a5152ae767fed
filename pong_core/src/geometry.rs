use glam::Vec2;

/// Line segment between two points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vertical segment at `x` spanning `top..=top + length`
    pub fn vertical(x: f32, top: f32, length: f32) -> Self {
        Self::new(Vec2::new(x, top), Vec2::new(x, top + length))
    }

    pub fn intersects(&self, other: &Segment) -> bool {
        segments_intersect(self.start, self.end, other.start, other.end)
    }
}

/// Parametric segment intersection test.
///
/// Segment `p1..p2` meets `p3..p4` when both interpolation factors lie in
/// `[0, 1]`. Parallel and collinear segments have no unique crossing point
/// and are reported as not intersecting.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d12 = p2 - p1;
    let d34 = p4 - p3;
    let d31 = p1 - p3;

    let denom = d34.y * d12.x - d34.x * d12.y;
    if denom == 0.0 {
        return false;
    }

    let ua = (d34.x * d31.y - d34.y * d31.x) / denom;
    let ub = (d12.x * d31.y - d12.y * d31.x) / denom;

    if !ua.is_finite() || !ub.is_finite() {
        return false;
    }

    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}
