use cgmath::*;

use crate::{
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Entity, Traits},
    state::{State, StateId, StateMachine},
};

use super::{question_block::struck_from_below, util::Bump, EntityClass};

pub const IDLE: StateId = "idle";
pub const HIT_LIGHT: StateId = "hitLight";

pub fn new(entity_id: u32, position: Point2<f32>, config: &SimConfig) -> Entity {
    let body = Body::new(
        entity_id,
        EntityClass::BrickBlock,
        position,
        (config.tile_size, config.tile_size),
        colors::BRICK,
        Traits::Inert,
    );
    let machine = StateMachine::new(IDLE)
        .with(IDLE, Idle)
        .with(HIT_LIGHT, HitLight { bump: None });
    Entity::new(body, machine)
}

struct Idle;

impl State for Idle {
    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, _dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        if struck_from_below(body, &contacts) {
            Some(HIT_LIGHT)
        } else {
            None
        }
    }
}

/// Bumps up and back, then rests again.
struct HitLight {
    bump: Option<Bump>,
}

impl State for HitLight {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        self.bump = Some(Bump::new(
            body.position.y,
            ctx.config.bump_height,
            ctx.config.bump_duration,
        ));
    }

    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, dt: f32) -> Option<StateId> {
        body.clear_collisions();
        match &mut self.bump {
            Some(bump) => {
                body.position.y = bump.update(dt);
                if bump.is_complete() {
                    Some(IDLE)
                } else {
                    None
                }
            }
            None => Some(IDLE),
        }
    }

    fn exit(&mut self, body: &mut Body, _ctx: &mut Context) {
        if let Some(bump) = self.bump.take() {
            body.position.y = bump.origin_y();
        }
        body.clear_collisions();
    }
}

#[cfg(test)]
mod brick_block_tests {
    use super::*;
    use crate::{entities::player, entity::testing::Harness};

    #[test]
    fn bumps_then_rests_at_origin() {
        let mut harness = Harness::default();
        let mut brick = new(1, point2(100.0, 100.0), &harness.config);

        let p = player::new(0, point2(100.0, 145.0), &harness.config);
        brick.body.add_collision(p.contact());
        harness.tick(&mut brick, 16.0);
        assert_eq!(brick.current_state(), HIT_LIGHT);

        harness.tick(&mut brick, 16.0);
        assert!(brick.body.position.y < 100.0);

        let mut ticks = 0;
        while brick.current_state() == HIT_LIGHT {
            harness.tick(&mut brick, 16.0);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(brick.current_state(), IDLE);
        assert_eq!(brick.body.position.y, 100.0);

        // bricks can be bumped again
        brick.body.add_collision(p.contact());
        harness.tick(&mut brick, 16.0);
        assert_eq!(brick.current_state(), HIT_LIGHT);
    }
}
