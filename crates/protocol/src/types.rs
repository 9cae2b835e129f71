use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in logical pixels (page coordinates unless noted).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Area, treating negative extents as empty.
    pub fn area(&self) -> f64 {
        self.w.max(0.0) * self.h.max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Overlapping region, or `None` when the rectangles do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }

    /// Fraction of `self` that lies inside `viewport`, in `[0, 1]`.
    ///
    /// An empty rectangle never intersects anything and yields `0.0`.
    pub fn intersection_ratio(&self, viewport: &Rect) -> f64 {
        let area = self.area();
        if area <= 0.0 {
            return 0.0;
        }
        self.intersect(viewport)
            .map_or(0.0, |overlap| (overlap.area() / area).clamp(0.0, 1.0))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }
}

/// The visible window onto the page: scroll offset plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            dpr: 1.0,
        }
    }

    pub fn scrolled_to(self, y: f64) -> Self {
        Self { y, ..self }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_fully_inside() {
        let region = Rect::new(0.0, 100.0, 100.0, 100.0);
        let vp = Rect::new(0.0, 0.0, 800.0, 600.0);
        assert_eq!(region.intersection_ratio(&vp), 1.0);
    }

    #[test]
    fn ratio_partially_scrolled_in() {
        // Bottom quarter of the viewport covers the top quarter of the region.
        let region = Rect::new(0.0, 500.0, 100.0, 400.0);
        let vp = Rect::new(0.0, 0.0, 100.0, 600.0);
        assert!((region.intersection_ratio(&vp) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ratio_disjoint_and_empty() {
        let region = Rect::new(0.0, 700.0, 100.0, 100.0);
        let vp = Rect::new(0.0, 0.0, 100.0, 600.0);
        assert_eq!(region.intersection_ratio(&vp), 0.0);
        assert_eq!(Rect::new(0.0, 0.0, 0.0, 10.0).intersection_ratio(&vp), 0.0);
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersect(&b).is_none());
    }

    #[test]
    fn viewport_rect_follows_scroll() {
        let vp = Viewport::new(800.0, 600.0).scrolled_to(250.0);
        assert_eq!(vp.rect(), Rect::new(0.0, 250.0, 800.0, 600.0));
    }
}
