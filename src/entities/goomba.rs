use cgmath::*;
use tracing::debug;

use crate::{
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Entity},
    events::Event,
    state::{State, StateId},
};

use super::{
    patrol::{self, DEAD, STOMPED},
    EntityClass,
};

pub fn new(entity_id: u32, position: Point2<f32>, config: &SimConfig) -> Entity {
    let body = patrol::new_body(
        entity_id,
        EntityClass::Goomba,
        position,
        colors::GOOMBA,
        config,
    );
    let machine = patrol::machine().with(STOMPED, Squished { elapsed: 0.0 });
    Entity::new(body, machine)
}

/// Flattened underfoot. Lingers briefly, then dies.
struct Squished {
    elapsed: f32,
}

impl State for Squished {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        self.elapsed = 0.0;

        // halve height, keeping the feet where they were
        let bottom = body.bounds().bottom();
        body.size.y = (body.size.y / 2).max(1);
        body.position.y = bottom - body.height();
        body.color = colors::GOOMBA_SQUISHED;

        debug!(entity_id = body.id, "Goomba stomped at {:?}", body.position);
        ctx.dispatcher.entity_to_global(body.id, Event::EnemyStomped);
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        body.clear_collisions();
        self.elapsed += dt;
        if self.elapsed >= ctx.config.squish_duration {
            Some(DEAD)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod goomba_tests {
    use super::*;
    use crate::entity::testing::Harness;

    #[test]
    fn squish_keeps_feet_planted_then_dies() {
        let mut harness = Harness::default();
        let mut goomba = new(1, point2(100.0, 250.0), &harness.config);
        goomba.change_state(patrol::MOVE, &mut harness.ctx()).unwrap();
        goomba.change_state(STOMPED, &mut harness.ctx()).unwrap();

        assert_eq!(goomba.body.bounds().bottom(), 300.0);
        assert_eq!(goomba.body.height(), 25.0);
        assert_eq!(harness.events(), vec![Event::EnemyStomped]);
        assert!(!goomba.is_harmful());

        let squish = harness.config.squish_duration;
        harness.tick(&mut goomba, squish - 1.0);
        assert_eq!(goomba.current_state(), STOMPED);
        harness.tick(&mut goomba, 1.0);
        assert_eq!(goomba.current_state(), DEAD);
        assert!(goomba.body.removed);
    }
}
