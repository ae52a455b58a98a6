//! Collision detection between entities
//!
//! Plain AABB overlap on each entity's rectangle. No rotation, no pixel masks.
//! The checks only report; the caller decides what a hit means (collect, catch).

use super::rect::Rect;

/// Check whether two rectangles intersect
///
/// Shared edges don't count: the intersection must have positive area.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}

/// Index of the first rectangle in `others` that overlaps `subject`
///
/// Iteration order is the slice order, so when several overlap the lowest
/// index wins.
pub fn first_overlap<'a, I>(subject: &Rect, others: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    others.into_iter().position(|other| overlaps(subject, other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_partial() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let b = Rect::new(40.0, 50.0, 60.0, 60.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 64.0, 64.0);
        let right = Rect::new(64.0, 0.0, 60.0, 60.0);
        let below = Rect::new(0.0, 64.0, 60.0, 60.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn test_first_overlap_lowest_index_wins() {
        let player = Rect::new(100.0, 100.0, 64.0, 64.0);
        let others = [
            Rect::new(500.0, 500.0, 60.0, 60.0),
            Rect::new(120.0, 120.0, 60.0, 60.0),
            Rect::new(110.0, 110.0, 60.0, 60.0),
        ];
        assert_eq!(first_overlap(&player, &others), Some(1));
        assert_eq!(first_overlap(&player, &others[..1]), None);
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            ax in -100.0f32..900.0, ay in -100.0f32..900.0,
            bx in -100.0f32..900.0, by in -100.0f32..900.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_overlap_matches_shared_point(
            ax in 0.0f32..200.0, ay in 0.0f32..200.0,
            bx in 0.0f32..200.0, by in 0.0f32..200.0,
        ) {
            let a = Rect::new(ax, ay, 64.0, 64.0);
            let b = Rect::new(bx, by, 60.0, 60.0);
            // The centre of the intersection box lies in both when they overlap
            if overlaps(&a, &b) {
                let cx = (a.left().max(b.left()) + a.right().min(b.right())) / 2.0;
                let cy = (a.top().max(b.top()) + a.bottom().min(b.bottom())) / 2.0;
                let p = glam::Vec2::new(cx, cy);
                prop_assert!(a.contains_point(p) && b.contains_point(p));
            }
        }
    }
}
