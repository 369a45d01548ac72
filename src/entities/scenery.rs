use cgmath::*;

use crate::{
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Entity, Traits},
    state::{State, StateId, StateMachine},
};

use super::EntityClass;

pub const IDLE: StateId = "idle";

/// Ground & pipe tiles. Solid, and otherwise inert.
pub fn new(
    class: EntityClass,
    entity_id: u32,
    position: Point2<f32>,
    config: &SimConfig,
) -> Entity {
    let color = match class {
        EntityClass::Pipe => colors::PIPE,
        _ => colors::GROUND,
    };
    let body = Body::new(
        entity_id,
        class,
        position,
        (config.tile_size, config.tile_size),
        color,
        Traits::Inert,
    );
    Entity::new(body, StateMachine::new(IDLE).with(IDLE, Idle))
}

struct Idle;

impl State for Idle {
    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, _dt: f32) -> Option<StateId> {
        body.clear_collisions();
        None
    }
}
