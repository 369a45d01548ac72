use cgmath::*;

/// Loose float comparison for accumulated per-tick values.
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

/// Axis-aligned rectangle in level pixel space. Y grows downward, so `top()` is the origin's y
/// and `bottom()` is `origin.y + extent.y`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub origin: Point2<f32>,
    pub extent: Vector2<f32>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            origin: point2(0.0, 0.0),
            extent: vec2(0.0, 0.0),
        }
    }
}

impl Bounds {
    pub fn new(origin: Point2<f32>, extent: Vector2<f32>) -> Self {
        Self { origin, extent }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(point2(x, y), vec2(w, h))
    }

    pub fn left(&self) -> f32 {
        self.origin.x
    }
    pub fn right(&self) -> f32 {
        self.origin.x + self.extent.x
    }
    pub fn top(&self) -> f32 {
        self.origin.y
    }
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.extent.y
    }
    pub fn width(&self) -> f32 {
        self.extent.x
    }
    pub fn height(&self) -> f32 {
        self.extent.y
    }
    pub fn center(&self) -> Point2<f32> {
        self.origin + self.extent * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.extent.x <= 0.0 || self.extent.y <= 0.0
    }

    pub fn offset(&self, by: Vector2<f32>) -> Bounds {
        Bounds::new(self.origin + by, self.extent)
    }

    /// True iff the two rectangles share a region of positive area. Rectangles which merely
    /// touch along an edge or at a corner do not intersect, and empty rectangles never do.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

#[cfg(test)]
mod bounds_tests {
    use super::*;

    #[test]
    fn edges_are_y_down() {
        let b = Bounds::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(b.left(), 10.0);
        assert_eq!(b.right(), 40.0);
        assert_eq!(b.top(), 20.0);
        assert_eq!(b.bottom(), 60.0);
        assert_eq!(b.center(), point2(25.0, 40.0));
    }

    #[test]
    fn intersects_requires_positive_overlap() {
        let a = Bounds::from_xywh(0.0, 0.0, 10.0, 10.0);

        assert!(a.intersects(&Bounds::from_xywh(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&Bounds::from_xywh(2.0, 2.0, 2.0, 2.0)));

        // shared edge, shared corner, and disjoint
        assert!(!a.intersects(&Bounds::from_xywh(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.intersects(&Bounds::from_xywh(10.0, 10.0, 10.0, 10.0)));
        assert!(!a.intersects(&Bounds::from_xywh(30.0, 30.0, 1.0, 1.0)));

        // empty rects never collide, even when inside
        assert!(!a.intersects(&Bounds::from_xywh(5.0, 5.0, 0.0, 3.0)));
    }
}
