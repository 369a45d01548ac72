use cgmath::*;

use crate::{
    collision::{dominant_side, Side},
    entity::{Body, Contact},
    geom::Bounds,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn invert(&self) -> Facing {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// -1 for left, +1 for right
    pub fn sign(&self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// Pool items (the level's single coin & mushroom) are created once, hidden at `home`, and
/// reused each time a question block releases one.
#[derive(Debug, Clone, PartialEq)]
pub struct PooledTraits {
    pub home: Point2<f32>,
}

/// Returns a pool item to its hidden, inactive resting configuration.
pub fn park(body: &mut Body) {
    if let Some(home) = body.pooled().map(|p| p.home) {
        body.position = home;
    }
    body.active = false;
    body.dy = 0.0;
    body.velocity = 0.0;
    body.facing = Facing::Right;
    body.clear_collisions();
}

/// Wakes a hidden pool item at `position`.
pub fn unpark(body: &mut Body, position: Point2<f32>) {
    body.position = position;
    body.dy = 0.0;
    body.velocity = 0.0;
    body.active = true;
    body.clear_collisions();
}

// ---------------------------------------------------------------------------------------------------------------------

// Resolution helpers for contacts with solid tiles.

/// If `tile` is beneath the body, rest the body on the tile's top.
pub fn land(body: &mut Body, tile: &Bounds) -> bool {
    if dominant_side(&body.bounds(), tile) == Some(Side::Bottom) {
        body.position.y = tile.top() - body.height();
        true
    } else {
        false
    }
}

/// If `tile` is above the body, snap the body's head to the tile's underside.
pub fn bump_head(body: &mut Body, tile: &Bounds) -> bool {
    if dominant_side(&body.bounds(), tile) == Some(Side::Top) {
        body.position.y = tile.bottom();
        true
    } else {
        false
    }
}

/// If `tile` is beside the body, push the body out to the tile's near edge. Returns the side
/// of the body which was blocked.
pub fn block_laterally(body: &mut Body, tile: &Bounds) -> Option<Side> {
    match dominant_side(&body.bounds(), tile) {
        Some(Side::Left) => {
            body.position.x = tile.right();
            Some(Side::Left)
        }
        Some(Side::Right) => {
            body.position.x = tile.left() - body.width();
            Some(Side::Right)
        }
        _ => None,
    }
}

/// Contacts which are solid tiles rather than other entities.
pub fn tile_contacts(contacts: &[Contact]) -> impl Iterator<Item = &Contact> {
    contacts.iter().filter(|c| c.class.is_tile())
}

/// The contact with the player, if any.
pub fn player_contact(contacts: &[Contact]) -> Option<&Contact> {
    contacts
        .iter()
        .find(|c| c.class == crate::entities::EntityClass::Player)
}

// ---------------------------------------------------------------------------------------------------------------------

/// A short rise-and-return displacement played by blocks when struck from below.
/// The profile is a triangle: up to `height` at the halfway point, then back down.
#[derive(Debug, Clone, Copy)]
pub struct Bump {
    origin_y: f32,
    height: f32,
    duration: f32,
    elapsed: f32,
}

impl Bump {
    pub fn new(origin_y: f32, height: f32, duration: f32) -> Self {
        Self {
            origin_y,
            height,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn origin_y(&self) -> f32 {
        self.origin_y
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advances the animation, returning the y the block should sit at.
    pub fn update(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.duration <= 0.0 || self.is_complete() {
            return self.origin_y;
        }
        let t = self.elapsed / self.duration;
        let lift = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        self.origin_y - lift * self.height
    }
}

#[cfg(test)]
mod util_tests {
    use super::*;
    use crate::{entities::EntityClass, entity::Traits};

    fn body(x: f32, y: f32) -> Body {
        Body::new(
            1,
            EntityClass::Goomba,
            point2(x, y),
            (50, 50),
            [0, 0, 0],
            Traits::Inert,
        )
    }

    #[test]
    fn land_snaps_to_tile_top() {
        let mut b = body(100.0, 105.0);
        let floor = Bounds::from_xywh(100.0, 150.0, 50.0, 50.0);
        assert!(land(&mut b, &floor));
        assert_eq!(b.position.y, 100.0);

        // tile to the side is not a floor
        let mut b = body(100.0, 100.0);
        let wall = Bounds::from_xywh(145.0, 100.0, 50.0, 50.0);
        assert!(!land(&mut b, &wall));
        assert_eq!(b.position.y, 100.0);
    }

    #[test]
    fn lateral_block_snaps_outside_tile() {
        let mut b = body(100.0, 100.0);
        let wall = Bounds::from_xywh(145.0, 100.0, 50.0, 50.0);
        assert_eq!(block_laterally(&mut b, &wall), Some(Side::Right));
        assert_eq!(b.position.x, 95.0);

        let mut b = body(100.0, 100.0);
        let wall = Bounds::from_xywh(55.0, 100.0, 50.0, 50.0);
        assert_eq!(block_laterally(&mut b, &wall), Some(Side::Left));
        assert_eq!(b.position.x, 105.0);
    }

    #[test]
    fn bump_head_snaps_below_ceiling() {
        let mut b = body(100.0, 145.0);
        let ceiling = Bounds::from_xywh(100.0, 100.0, 50.0, 50.0);
        assert!(bump_head(&mut b, &ceiling));
        assert_eq!(b.position.y, 150.0);
    }

    #[test]
    fn bump_rises_then_returns_exactly() {
        let mut bump = Bump::new(200.0, 10.0, 100.0);
        assert_eq!(bump.update(50.0), 190.0);
        assert!(bump.update(25.0) > 190.0);
        assert_eq!(bump.update(1000.0), 200.0);
        assert!(bump.is_complete());
    }

    #[test]
    fn park_restores_home_configuration() {
        let home = point2(-100.0, -100.0);
        let mut b = Body::new(
            2,
            EntityClass::Coin,
            point2(300.0, 50.0),
            (50, 50),
            [0, 0, 0],
            Traits::Pooled(PooledTraits { home }),
        );
        b.dy = 0.4;
        b.velocity = 0.1;
        b.facing = Facing::Left;

        park(&mut b);
        assert_eq!(b.position, home);
        assert!(!b.active);
        assert_eq!(b.dy, 0.0);
        assert_eq!(b.velocity, 0.0);
        assert_eq!(b.facing, Facing::Right);
    }
}
