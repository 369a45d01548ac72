//! Behavior shared by the walking enemies. A patrolling enemy sleeps until the player comes
//! within range, then walks in its facing direction, reversing at walls and falling off ledges.
//! Goomba & Koopa supply their own "stomped" state.

use cgmath::*;
use tracing::debug;

use crate::{
    collision::{is_stomp, should_fall, Side},
    config::SimConfig,
    constants::colors::Color,
    entity::{Body, Context, Contact, Traits},
    events::Event,
    physics,
    state::{State, StateId, StateMachine},
};

use super::{
    util::{block_laterally, land, player_contact, tile_contacts, Facing},
    EntityClass,
};

// ---------------------------------------------------------------------------------------------------------------------

pub const WAIT: StateId = "wait";
pub const MOVE: StateId = "move";
pub const FALL: StateId = "fall";
pub const STOMPED: StateId = "stomped";
pub const SHELL_MOVE: StateId = "shellMove";
pub const DEAD: StateId = "dead";

#[derive(Debug, Clone, PartialEq)]
pub struct PatrolTraits {
    /// The enemy wakes once the player's left edge passes this x
    pub spawn_x: f32,
    /// Monotonic; set on waking
    pub spawned: bool,
    /// Koopa only: withdrawn into its shell
    pub shell: bool,
    /// Remaining time a freshly kicked shell is harmless
    pub kick_grace: f32,
}

pub fn new_body(
    entity_id: u32,
    class: EntityClass,
    position: Point2<f32>,
    color: Color,
    config: &SimConfig,
) -> Body {
    let mut body = Body::new(
        entity_id,
        class,
        position,
        (config.tile_size, config.tile_size),
        color,
        Traits::Patrol(PatrolTraits {
            spawn_x: position.x - config.enemy_trigger_lead(),
            spawned: false,
            shell: false,
            kick_grace: 0.0,
        }),
    );
    body.facing = Facing::Left;
    body.active = false;
    body
}

/// The states every patrolling enemy has, resting in "wait". Callers add "stomped".
pub fn machine() -> StateMachine {
    StateMachine::new(WAIT)
        .with(WAIT, Wait)
        .with(MOVE, Walk { shell: false })
        .with(FALL, Fall)
        .with(DEAD, Dead)
}

fn is_shell(body: &Body) -> bool {
    body.patrol().map_or(false, |p| p.shell)
}

fn walk_speed(body: &Body, config: &SimConfig) -> f32 {
    if is_shell(body) {
        config.shell_speed
    } else {
        config.enemy_speed
    }
}

/// True if the player's snapshot in `body`'s contact list landed on top of it.
pub fn was_stomped(body: &Body, contacts: &[Contact]) -> bool {
    player_contact(contacts).map_or(false, |pc| is_stomp(&pc.bounds, &body.bounds()))
}

/// Walkers reverse when the side they were heading into is blocked.
pub fn turn_at_walls(body: &mut Body, contacts: &[Contact]) {
    for tile in tile_contacts(contacts) {
        let ahead = match block_laterally(body, &tile.bounds) {
            Some(Side::Left) => body.facing == Facing::Left,
            Some(Side::Right) => body.facing == Facing::Right,
            _ => false,
        };
        if ahead {
            body.facing = body.facing.invert();
        }
    }
}

/// True once the body has dropped entirely below the level.
pub fn fell_out(body: &Body, ctx: &Context) -> bool {
    let level = ctx.peek.level_bounds;
    !level.is_empty() && body.bounds().top() > level.bottom()
}

// ---------------------------------------------------------------------------------------------------------------------

struct Wait;

impl State for Wait {
    fn execute(&mut self, body: &mut Body, ctx: &mut Context, _dt: f32) -> Option<StateId> {
        body.clear_collisions();

        let spawn_x = body.patrol().map(|p| p.spawn_x)?;
        let player = ctx.peek.player?;
        if player.bounds.left() > spawn_x {
            if let Some(p) = body.patrol_mut() {
                p.spawned = true;
            }
            body.active = true;
            debug!(
                entity_id = body.id,
                "{:?} activated at {:?}", body.class, body.position
            );
            ctx.dispatcher
                .entity_to_global(body.id, Event::EnemyActivated);
            Some(MOVE)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// Ground locomotion. As "move" this is the enemy's walk; as "shellMove" it's a kicked shell.
pub struct Walk {
    pub shell: bool,
}

impl State for Walk {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        if self.shell {
            if let Some(p) = body.patrol_mut() {
                p.kick_grace = ctx.config.shell_kick_grace_duration;
            }
        }
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        if let Some(p) = body.patrol_mut() {
            p.kick_grace = (p.kick_grace - dt).max(0.0);
        }

        let contacts = body.take_collisions();
        if was_stomped(body, &contacts) {
            return Some(STOMPED);
        }

        turn_at_walls(body, &contacts);

        if should_fall(&body.bounds(), &ctx.peek.solid_tiles) {
            return Some(FALL);
        }

        let dx = body.facing.sign() * walk_speed(body, ctx.config) * dt;
        body.translate(dx, 0.0);
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Fall;

impl State for Fall {
    fn enter(&mut self, body: &mut Body, _ctx: &mut Context) {
        body.dy = 0.0;
        body.velocity = 0.0;
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if was_stomped(body, &contacts) {
            return Some(STOMPED);
        }

        let mut landed = false;
        for tile in tile_contacts(&contacts) {
            if land(body, &tile.bounds) {
                landed = true;
            }
        }
        if landed {
            body.dy = 0.0;
            body.velocity = 0.0;
            return Some(if is_shell(body) { SHELL_MOVE } else { MOVE });
        }
        turn_at_walls(body, &contacts);

        let dx = body.facing.sign() * walk_speed(body, ctx.config);
        physics::step(body, dx, dt, ctx.config.gravity, ctx.config.max_velocity);

        if fell_out(body, ctx) {
            debug!(entity_id = body.id, "{:?} fell out of the level", body.class);
            return Some(DEAD);
        }
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// Terminal. The level drops the entity after the current update pass.
pub struct Dead;

impl State for Dead {
    fn enter(&mut self, body: &mut Body, _ctx: &mut Context) {
        body.removed = true;
        body.active = false;
    }

    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, _dt: f32) -> Option<StateId> {
        body.clear_collisions();
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod patrol_tests {
    use super::*;
    use crate::{
        entities::{goomba, player},
        entity::testing::{tile_contact, Harness},
        geom::Bounds,
    };

    const DT: f32 = 16.0;

    fn player_at(harness: &mut Harness, x: f32) {
        harness.set_player(Bounds::from_xywh(x, 250.0, 50.0, 50.0));
    }

    #[test]
    fn waits_until_player_passes_spawn_x() {
        let mut harness = Harness::default();
        let lead = harness.config.enemy_trigger_lead();
        let mut goomba = goomba::new(1, point2(500.0 + lead, 250.0), &harness.config);
        assert_eq!(goomba.body.patrol().unwrap().spawn_x, 500.0);

        player_at(&mut harness, 400.0);
        for _ in 0..10 {
            harness.tick(&mut goomba, DT);
        }
        assert_eq!(goomba.current_state(), WAIT);
        assert!(!goomba.body.patrol().unwrap().spawned);
        assert!(!goomba.body.active);

        player_at(&mut harness, 501.0);
        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), MOVE);
        assert!(goomba.body.patrol().unwrap().spawned);
        assert!(goomba.body.active);
        assert_eq!(harness.events(), vec![Event::EnemyActivated]);
    }

    #[test]
    fn waits_forever_without_a_player() {
        let mut harness = Harness::default();
        let mut goomba = goomba::new(1, point2(100.0, 250.0), &harness.config);
        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), WAIT);
    }

    #[test]
    fn walker_reverses_at_wall() {
        let mut harness = Harness::default();
        harness.set_tiles(vec![Bounds::from_xywh(0.0, 300.0, 500.0, 50.0)]);
        let mut goomba = goomba::new(1, point2(100.0, 250.0), &harness.config);
        goomba.change_state(MOVE, &mut harness.ctx()).unwrap();
        assert_eq!(goomba.body.facing, Facing::Left);

        let wall = Bounds::from_xywh(55.0, 250.0, 50.0, 50.0);
        goomba
            .body
            .add_collision(tile_contact(9, EntityClass::Pipe, wall));
        harness.tick(&mut goomba, DT);

        assert_eq!(goomba.body.facing, Facing::Right);
        assert!(goomba.body.position.x > 105.0);
        assert_eq!(goomba.current_state(), MOVE);
    }

    #[test]
    fn walker_falls_off_ledge_then_lands() {
        let mut harness = Harness::default();
        harness.set_tiles(vec![Bounds::from_xywh(300.0, 300.0, 50.0, 50.0)]);
        let mut goomba = goomba::new(1, point2(100.0, 250.0), &harness.config);
        goomba.change_state(MOVE, &mut harness.ctx()).unwrap();

        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), FALL);

        goomba.body.position.y = 255.0;
        let floor = Bounds::from_xywh(100.0, 300.0, 50.0, 50.0);
        goomba
            .body
            .add_collision(tile_contact(9, EntityClass::GroundBlock, floor));
        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), MOVE);
        assert_eq!(goomba.body.position.y, 250.0);
    }

    #[test]
    fn falling_out_of_the_level_removes() {
        let mut harness = Harness::default();
        harness.peek.level_bounds = Bounds::from_xywh(0.0, 0.0, 1000.0, 400.0);
        let mut goomba = goomba::new(1, point2(100.0, 395.0), &harness.config);
        goomba.change_state(FALL, &mut harness.ctx()).unwrap();
        goomba.body.dy = 1.0;

        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), DEAD);
        assert!(goomba.body.removed);
        assert!(!goomba.is_alive());
    }

    #[test]
    fn player_on_top_stomps() {
        let mut harness = Harness::default();
        let mut goomba = goomba::new(1, point2(100.0, 250.0), &harness.config);
        goomba.change_state(MOVE, &mut harness.ctx()).unwrap();

        let p = player::new(0, point2(100.0, 205.0), &harness.config);
        goomba.body.add_collision(p.contact());
        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), STOMPED);
    }

    #[test]
    fn player_at_side_does_not_stomp() {
        let mut harness = Harness::default();
        harness.set_tiles(vec![Bounds::from_xywh(0.0, 300.0, 500.0, 50.0)]);
        let mut goomba = goomba::new(1, point2(100.0, 250.0), &harness.config);
        goomba.change_state(MOVE, &mut harness.ctx()).unwrap();

        let p = player::new(0, point2(60.0, 250.0), &harness.config);
        goomba.body.add_collision(p.contact());
        harness.tick(&mut goomba, DT);
        assert_eq!(goomba.current_state(), MOVE);
    }
}
