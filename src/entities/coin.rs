use cgmath::*;

use crate::{
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Entity, Traits},
    events::Event,
    geom::Bounds,
    state::{State, StateError, StateId, StateMachine},
};

use super::{
    question_block::Contents,
    util::{park, unpark, PooledTraits},
    EntityClass,
};

pub const UNUSED: StateId = "unused";
pub const IDLE: StateId = "idle";

/// The level's single coin, created hidden at the pool home.
pub fn new(entity_id: u32, config: &SimConfig) -> Entity {
    let home = config.pool_home();
    let mut body = Body::new(
        entity_id,
        EntityClass::Coin,
        home,
        (config.tile_size, config.tile_size),
        colors::COIN,
        Traits::Pooled(PooledTraits { home }),
    );
    park(&mut body);

    let machine = StateMachine::new(UNUSED)
        .with(UNUSED, Unused)
        .with(IDLE, Idle { elapsed: 0.0 });
    Entity::new(body, machine)
}

/// Pops the coin out of the top of `block`.
pub fn activate(coin: &mut Entity, block: &Bounds, ctx: &mut Context) -> Result<(), StateError> {
    let position = point2(block.left(), block.top() - coin.body.height());
    unpark(&mut coin.body, position);
    coin.change_state(IDLE, ctx)
}

struct Unused;

impl State for Unused {
    fn enter(&mut self, body: &mut Body, _ctx: &mut Context) {
        park(body);
    }

    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, _dt: f32) -> Option<StateId> {
        body.clear_collisions();
        None
    }
}

/// Coins from blocks are collected the moment they appear; the rise is just for show.
struct Idle {
    elapsed: f32,
}

impl State for Idle {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        self.elapsed = 0.0;
        ctx.dispatcher.entity_to_global(
            body.id,
            Event::ItemCollected {
                contents: Contents::Coin,
            },
        );
    }

    fn execute(&mut self, body: &mut Body, ctx: &mut Context, dt: f32) -> Option<StateId> {
        body.clear_collisions();
        self.elapsed += dt;
        if self.elapsed >= ctx.config.coin_duration {
            return Some(UNUSED);
        }
        body.translate(0.0, -ctx.config.coin_rise_speed * dt);
        None
    }
}
