use cgmath::*;
use tracing::debug;

use crate::{
    collision::{dominant_side, Side},
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Entity},
    events::Event,
    state::{State, StateId},
};

use super::{
    patrol::{self, Walk, MOVE, SHELL_MOVE, STOMPED},
    util::{player_contact, Facing},
    EntityClass,
};

pub fn new(entity_id: u32, position: Point2<f32>, config: &SimConfig) -> Entity {
    let body = patrol::new_body(
        entity_id,
        EntityClass::Koopa,
        position,
        colors::KOOPA,
        config,
    );
    let machine = patrol::machine()
        .with(STOMPED, Shell { elapsed: 0.0 })
        .with(SHELL_MOVE, Walk { shell: true });
    Entity::new(body, machine)
}

/// Withdrawn into its shell and at rest. The player kicks it by touching a side, and standing
/// on it keeps it from coming back out.
struct Shell {
    elapsed: f32,
}

impl State for Shell {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        self.elapsed = 0.0;
        if let Some(p) = body.patrol_mut() {
            p.shell = true;
            p.kick_grace = 0.0;
        }
        body.color = colors::SHELL;

        debug!(entity_id = body.id, "Koopa stomped at {:?}", body.position);
        ctx.dispatcher.entity_to_global(body.id, Event::EnemyStomped);
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if let Some(pc) = player_contact(&contacts) {
            // a kick sends the shell away from the side it was touched on
            match dominant_side(&body.bounds(), &pc.bounds) {
                Some(Side::Left) => {
                    body.facing = Facing::Right;
                    return Some(SHELL_MOVE);
                }
                Some(Side::Right) => {
                    body.facing = Facing::Left;
                    return Some(SHELL_MOVE);
                }
                Some(Side::Top) => self.elapsed = 0.0,
                _ => {}
            }
        }

        self.elapsed += dt;
        if self.elapsed >= ctx.config.shell_recovery_duration {
            if let Some(p) = body.patrol_mut() {
                p.shell = false;
            }
            body.color = colors::KOOPA;
            return Some(MOVE);
        }
        None
    }
}
