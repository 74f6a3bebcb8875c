use macroquad::math::Rect;

// strict: boxes that only share an edge do not touch. Rect::overlaps is
// inclusive and would report a player resting on a platform every frame.
pub fn aabb_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

pub trait Bounded {
    fn bounds(&self) -> Rect;

    fn midpoint(&self) -> (f32, f32) {
        let r = self.bounds();
        (r.x + r.w / 2.0, r.y + r.h / 2.0)
    }
}

pub fn touches<A: Bounded + ?Sized, B: Bounded + ?Sized>(a: &A, b: &B) -> bool {
    aabb_overlap(&a.bounds(), &b.bounds())
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_touch() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(aabb_overlap(&a, &b));
        assert!(aabb_overlap(&b, &a));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let floor = Rect::new(0.0, 550.0, 200.0, 50.0);
        let resting = Rect::new(50.0, 512.0, 16.0, 38.0);
        assert!(!aabb_overlap(&resting, &floor));

        let beside = Rect::new(200.0, 550.0, 10.0, 10.0);
        assert!(!aabb_overlap(&floor, &beside));
    }

    #[test]
    fn midpoint_is_box_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(Bounded::midpoint(&r), (25.0, 40.0));
    }
}
