use cgmath::*;
use tracing::info;

use crate::{
    collision::{is_stomp, should_fall},
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Contact, Entity, Traits},
    events::Event,
    input::Action,
    physics,
    state::{State, StateId, StateMachine},
};

use super::{
    util::{block_laterally, bump_head, land, tile_contacts, Facing},
    EntityClass,
};

// ---------------------------------------------------------------------------------------------------------------------

pub const IDLE: StateId = "idle";
pub const MOVE: StateId = "move";
pub const JUMP: StateId = "jump";
pub const FALL: StateId = "fall";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTraits {
    pub is_dead: bool,
}

pub fn new(entity_id: u32, position: Point2<f32>, config: &SimConfig) -> Entity {
    let body = Body::new(
        entity_id,
        EntityClass::Player,
        position,
        (config.tile_size, config.tile_size),
        colors::PLAYER,
        Traits::Player(PlayerTraits::default()),
    );
    let machine = StateMachine::new(IDLE)
        .with(IDLE, Idle)
        .with(MOVE, Move { run: false })
        .with(JUMP, Jump { dx: 0.0 })
        .with(FALL, Fall { dx: 0.0 });
    Entity::new(body, machine)
}

// ---------------------------------------------------------------------------------------------------------------------

/// Any touch from a harmful enemy which isn't a stomp kills the player. Returns true if so.
fn check_for_death(body: &mut Body, contacts: &[Contact], ctx: &mut Context) -> bool {
    let bounds = body.bounds();
    let fatal = contacts
        .iter()
        .find(|c| c.harmful && !is_stomp(&bounds, &c.bounds));

    if let Some(c) = fatal {
        info!(
            entity_id = body.id,
            "Player killed by {:?} ({}) at {:?}", c.class, c.entity_id, body.position
        );
        if let Some(p) = body.player_mut() {
            p.is_dead = true;
        }
        ctx.dispatcher.entity_to_global(body.id, Event::PlayerDied);
        true
    } else {
        false
    }
}

/// Horizontal speed, doubled while running.
fn speed(ctx: &Context) -> f32 {
    if ctx.input.is_active(Action::Run) {
        ctx.config.player_speed * ctx.config.run_speed_multiplier
    } else {
        ctx.config.player_speed
    }
}

/// Airborne gravity, slightly damped while running.
fn airborne_gravity(ctx: &Context) -> f32 {
    if ctx.input.is_active(Action::Run) {
        ctx.config.gravity * ctx.config.run_gravity_damping
    } else {
        ctx.config.gravity
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Idle;

impl State for Idle {
    fn execute(&mut self, body: &mut Body, ctx: &mut Context, _dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if check_for_death(body, &contacts, ctx) {
            return None;
        }

        if should_fall(&body.bounds(), &ctx.peek.solid_tiles) {
            return Some(FALL);
        }

        if ctx.input.is_active(Action::Jump) {
            return Some(JUMP);
        }

        match ctx.input.horizontal_axis() {
            d if d < 0 => {
                body.facing = Facing::Left;
                Some(MOVE)
            }
            d if d > 0 => {
                body.facing = Facing::Right;
                Some(MOVE)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Move {
    run: bool,
}

impl State for Move {
    fn enter(&mut self, _body: &mut Body, _ctx: &mut Context) {
        self.run = false;
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if check_for_death(body, &contacts, ctx) {
            return None;
        }

        // walked into a wall
        for tile in tile_contacts(&contacts) {
            block_laterally(body, &tile.bounds);
        }

        if should_fall(&body.bounds(), &ctx.peek.solid_tiles) {
            return Some(FALL);
        }

        if ctx.input.is_active(Action::Jump) {
            return Some(JUMP);
        }

        self.run = ctx.input.is_active(Action::Run);
        let axis = ctx.input.horizontal_axis();
        if axis == 0 {
            return Some(IDLE);
        }

        let speed = if self.run {
            ctx.config.player_speed * ctx.config.run_speed_multiplier
        } else {
            ctx.config.player_speed
        };
        body.translate(axis as f32 * speed * dt, 0.0);
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Jump {
    dx: f32,
}

impl State for Jump {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        body.dy = 0.0;
        body.velocity = ctx.config.jump_velocity;
        self.dx = 0.0;
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if check_for_death(body, &contacts, ctx) {
            return None;
        }

        let mut hit_ceiling = false;
        for tile in tile_contacts(&contacts) {
            if bump_head(body, &tile.bounds) {
                hit_ceiling = true;
            } else {
                block_laterally(body, &tile.bounds);
            }
        }
        if hit_ceiling {
            body.dy = 0.0;
            body.velocity = 0.0;
            return Some(FALL);
        }

        // air control; dx holds its last value when no direction is held
        let axis = ctx.input.horizontal_axis();
        if axis != 0 {
            self.dx = axis as f32 * speed(ctx);
        }

        physics::integrate_vertical(body, airborne_gravity(ctx), ctx.config.max_velocity);

        if body.velocity >= 0.0 {
            Some(FALL)
        } else {
            let dy = body.dy;
            body.translate(self.dx * dt, dy * dt);
            None
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

struct Fall {
    dx: f32,
}

impl State for Fall {
    fn enter(&mut self, _body: &mut Body, _ctx: &mut Context) {
        self.dx = 0.0;
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if check_for_death(body, &contacts, ctx) {
            return None;
        }

        let axis = ctx.input.horizontal_axis();
        if axis != 0 {
            self.dx = axis as f32 * speed(ctx);
        }

        let mut landed = false;
        for tile in tile_contacts(&contacts) {
            if land(body, &tile.bounds) {
                landed = true;
            } else if !bump_head(body, &tile.bounds) {
                block_laterally(body, &tile.bounds);
            }
        }
        if landed {
            body.dy = 0.0;
            body.velocity = 0.0;
            return Some(IDLE);
        }

        let bounds = body.bounds();
        let stomped = contacts
            .iter()
            .any(|c| c.harmful && is_stomp(&bounds, &c.bounds));
        if stomped {
            body.dy = 0.0;
            body.velocity = ctx.config.stomp_bounce_velocity;
        }

        physics::step(
            body,
            self.dx,
            dt,
            airborne_gravity(ctx),
            ctx.config.max_velocity,
        );
        None
    }
}

// ---------------------------------------------------------------------------------------------------------------------
