use cgmath::*;
use tracing::debug;

use crate::{
    collision::should_fall,
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Contact, Entity, Traits},
    events::Event,
    geom::Bounds,
    physics,
    state::{State, StateError, StateId, StateMachine},
};

use super::{
    patrol::{fell_out, turn_at_walls},
    question_block::Contents,
    util::{land, park, player_contact, tile_contacts, unpark, PooledTraits},
    EntityClass,
};

pub const SPAWN: StateId = "spawn";
pub const MOVE: StateId = "move";
pub const FALL: StateId = "fall";

/// The level's single mushroom, created hidden at the pool home.
pub fn new(entity_id: u32, config: &SimConfig) -> Entity {
    let home = config.pool_home();
    let mut body = Body::new(
        entity_id,
        EntityClass::Mushroom,
        home,
        (config.tile_size, config.tile_size),
        colors::MUSHROOM,
        Traits::Pooled(PooledTraits { home }),
    );
    park(&mut body);

    let machine = StateMachine::new(SPAWN)
        .with(SPAWN, Spawn { target_y: home.y })
        .with(MOVE, Roam)
        .with(FALL, Fall);
    Entity::new(body, machine)
}

/// Brings the mushroom out of `block`: it rises out of the block's top, then walks off.
pub fn activate(
    mushroom: &mut Entity,
    block: &Bounds,
    ctx: &mut Context,
) -> Result<(), StateError> {
    unpark(&mut mushroom.body, block.origin);
    mushroom.change_state(SPAWN, ctx)
}

/// Player contact from any side consumes the mushroom, returning it to the pool. Walking into
/// it counts the same as landing on it. Returns true if so.
fn check_for_pickup(body: &mut Body, contacts: &[Contact], ctx: &mut Context) -> bool {
    if player_contact(contacts).is_some() {
        debug!(entity_id = body.id, "Mushroom collected at {:?}", body.position);
        ctx.dispatcher.entity_to_global(
            body.id,
            Event::ItemCollected {
                contents: Contents::Mushroom,
            },
        );
        park(body);
        true
    } else {
        false
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// Hidden while parked. Once woken it rises one body height, ignoring the block it's emerging
/// from, then starts walking.
struct Spawn {
    target_y: f32,
}

impl State for Spawn {
    fn enter(&mut self, body: &mut Body, _ctx: &mut Context) {
        self.target_y = body.position.y - body.height();
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        body.clear_collisions();
        if !body.active {
            return None;
        }

        let rise = ctx.config.mushroom_rise_speed * dt;
        body.position.y = (body.position.y - rise).max(self.target_y);
        if body.position.y <= self.target_y {
            Some(MOVE)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Roam;

impl State for Roam {
    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if check_for_pickup(body, &contacts, ctx) {
            return Some(SPAWN);
        }

        turn_at_walls(body, &contacts);

        if should_fall(&body.bounds(), &ctx.peek.solid_tiles) {
            return Some(FALL);
        }

        let dx = body.facing.sign() * ctx.config.mushroom_speed * dt;
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
        if check_for_pickup(body, &contacts, ctx) {
            return Some(SPAWN);
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
            return Some(MOVE);
        }
        turn_at_walls(body, &contacts);

        let dx = body.facing.sign() * ctx.config.mushroom_speed;
        physics::step(body, dx, dt, ctx.config.gravity, ctx.config.max_velocity);

        if fell_out(body, ctx) {
            park(body);
            return Some(SPAWN);
        }
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
mod mushroom_tests {
    use super::*;
    use crate::{
        entities::{player, util::Facing},
        entity::testing::Harness,
    };

    #[test]
    fn rises_out_of_block_then_walks() {
        let mut harness = Harness::default();
        let block = Bounds::from_xywh(300.0, 200.0, 50.0, 50.0);
        harness.set_tiles(vec![block]);
        let mut mushroom = new(1, &harness.config);
        assert!(!mushroom.body.active);

        activate(&mut mushroom, &block, &mut harness.ctx()).unwrap();
        assert!(mushroom.body.active);
        assert_eq!(mushroom.body.position, point2(300.0, 200.0));

        let mut ticks = 0;
        while mushroom.current_state() == SPAWN {
            harness.tick(&mut mushroom, 16.0);
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(mushroom.current_state(), MOVE);
        assert_eq!(mushroom.body.position.y, 150.0);

        harness.tick(&mut mushroom, 16.0);
        assert_eq!(mushroom.current_state(), MOVE);
        assert!(mushroom.body.position.x > 300.0);
    }

    #[test]
    fn landing_on_it_also_collects() {
        let mut harness = Harness::default();
        let block = Bounds::from_xywh(300.0, 200.0, 50.0, 50.0);
        let mut mushroom = new(1, &harness.config);
        activate(&mut mushroom, &block, &mut harness.ctx()).unwrap();
        mushroom.change_state(MOVE, &mut harness.ctx()).unwrap();
        mushroom.body.position = point2(300.0, 150.0);

        let p = player::new(0, point2(300.0, 105.0), &harness.config);
        mushroom.body.add_collision(p.contact());
        harness.tick(&mut mushroom, 16.0);

        assert_eq!(mushroom.current_state(), SPAWN);
        assert!(!mushroom.body.active);
        assert_eq!(
            harness.events(),
            vec![Event::ItemCollected {
                contents: Contents::Mushroom
            }]
        );
    }

    #[test]
    fn pool_round_trip_restores_initial_configuration() {
        let mut harness = Harness::default();
        let block = Bounds::from_xywh(300.0, 200.0, 50.0, 50.0);
        harness.set_tiles(vec![block]);
        let mut mushroom = new(1, &harness.config);
        let initial_position = mushroom.body.position;
        let initial_facing = mushroom.body.facing;

        activate(&mut mushroom, &block, &mut harness.ctx()).unwrap();
        mushroom.change_state(MOVE, &mut harness.ctx()).unwrap();
        mushroom.body.position = point2(300.0, 150.0);
        mushroom.body.facing = Facing::Left;

        let p = player::new(0, point2(270.0, 150.0), &harness.config);
        mushroom.body.add_collision(p.contact());
        harness.tick(&mut mushroom, 16.0);

        assert_eq!(mushroom.current_state(), SPAWN);
        assert_eq!(mushroom.body.position, initial_position);
        assert_eq!(mushroom.body.facing, initial_facing);
        assert!(!mushroom.body.active);
        assert_eq!(mushroom.body.dy, 0.0);
        assert_eq!(mushroom.body.velocity, 0.0);
        assert!(!mushroom.body.has_collision());
        assert_eq!(
            harness.events(),
            vec![Event::ItemCollected {
                contents: Contents::Mushroom
            }]
        );

        // parked mushrooms stay put
        harness.tick(&mut mushroom, 16.0);
        assert_eq!(mushroom.body.position, initial_position);
    }

    #[test]
    fn falling_out_of_the_level_parks() {
        let mut harness = Harness::default();
        harness.peek.level_bounds = Bounds::from_xywh(0.0, 0.0, 1000.0, 400.0);
        let mut mushroom = new(1, &harness.config);
        mushroom.body.active = true;
        mushroom.body.position = point2(100.0, 395.0);
        mushroom.change_state(FALL, &mut harness.ctx()).unwrap();
        mushroom.body.dy = 1.0;

        harness.tick(&mut mushroom, 16.0);
        assert_eq!(mushroom.current_state(), SPAWN);
        assert!(!mushroom.body.active);
        assert_eq!(mushroom.body.position, harness.config.pool_home());
    }
}
