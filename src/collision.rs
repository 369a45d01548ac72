use cgmath::*;

use crate::geom::Bounds;

/// One face of an axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// The four-way classification of a contact between two rectangles, from the point of view
/// of the first. More than one flag may be set for diagonal contacts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sides {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl Sides {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn count(&self) -> usize {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .filter(|f| **f)
            .count()
    }

    pub fn contains(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
            Side::Top => self.top,
            Side::Bottom => self.bottom,
        }
    }
}

/// Classifies which faces of `a` are touched by `b`. Each face is tested with a one pixel
/// thick probe lying just outside it; probes are inset by one pixel on the perpendicular axis
/// so that a touch exactly at a shared corner reports nothing.
pub fn sides_of(a: &Bounds, b: &Bounds) -> Sides {
    let left = Bounds::from_xywh(a.left() - 1.0, a.top() + 1.0, 1.0, a.height() - 2.0);
    let right = Bounds::from_xywh(a.right(), a.top() + 1.0, 1.0, a.height() - 2.0);
    let top = Bounds::from_xywh(a.left() + 1.0, a.top() - 1.0, a.width() - 2.0, 1.0);
    let bottom = Bounds::from_xywh(a.left() + 1.0, a.bottom(), a.width() - 2.0, 1.0);

    Sides {
        left: left.intersects(b),
        right: right.intersects(b),
        top: top.intersects(b),
        bottom: bottom.intersects(b),
    }
}

/// Penetration depth of the two rectangles along each axis, zero where they don't overlap.
pub fn overlap(a: &Bounds, b: &Bounds) -> Vector2<f32> {
    vec2(
        (a.right().min(b.right()) - a.left().max(b.left())).max(0.0),
        (a.bottom().min(b.bottom()) - a.top().max(b.top())).max(0.0),
    )
}

/// Reduces the side flags of `a` touched by `b` to the single face the contact most plausibly
/// happened across. Bodies overlapping at a vertical offset raise a top or bottom flag along
/// with left or right; the shallower penetration axis decides which pair is meant.
/// Returns None when `b` touches no face of `a`.
pub fn dominant_side(a: &Bounds, b: &Bounds) -> Option<Side> {
    let sides = sides_of(a, b);
    if !sides.any() {
        return None;
    }

    let depth = overlap(a, b);
    let (a_center, b_center) = (a.center(), b.center());

    let vertical = || {
        if sides.top && sides.bottom {
            Some(if b_center.y < a_center.y {
                Side::Top
            } else {
                Side::Bottom
            })
        } else if sides.top {
            Some(Side::Top)
        } else if sides.bottom {
            Some(Side::Bottom)
        } else {
            None
        }
    };

    let horizontal = || {
        if sides.left && sides.right {
            Some(if b_center.x < a_center.x {
                Side::Left
            } else {
                Side::Right
            })
        } else if sides.left {
            Some(Side::Left)
        } else if sides.right {
            Some(Side::Right)
        } else {
            None
        }
    };

    if depth.y < depth.x {
        vertical().or_else(horizontal)
    } else {
        horizontal().or_else(vertical)
    }
}

/// True iff nothing in `static_tiles` is directly beneath `bounds`.
pub fn should_fall(bounds: &Bounds, static_tiles: &[Bounds]) -> bool {
    !static_tiles.iter().any(|t| sides_of(bounds, t).bottom)
}

/// The one predicate deciding whether a player/enemy contact is a downward stomp. The enemy
/// uses it to decide it was squashed, the player uses it to decide it was *not* hurt; sharing
/// it keeps the two sides from ever disagreeing about the same contact.
pub fn is_stomp(player: &Bounds, enemy: &Bounds) -> bool {
    dominant_side(enemy, player) == Some(Side::Top)
}
