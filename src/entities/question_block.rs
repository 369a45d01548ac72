use cgmath::*;
use tracing::debug;

use crate::{
    collision::{dominant_side, Side},
    config::SimConfig,
    constants::colors,
    entity::{Body, Context, Contact, Entity, Traits},
    events::Event,
    state::{State, StateId, StateMachine},
};

use super::{
    util::{player_contact, Bump},
    EntityClass,
};

pub const IDLE: StateId = "idle";
pub const HIT: StateId = "hit";

/// What a question block releases when hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contents {
    Coin,
    Mushroom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBlockTraits {
    /// Once set, never cleared
    pub used: bool,
    pub contents: Contents,
}

pub fn new(
    entity_id: u32,
    position: Point2<f32>,
    contents: Contents,
    config: &SimConfig,
) -> Entity {
    let body = Body::new(
        entity_id,
        EntityClass::QuestionBlock,
        position,
        (config.tile_size, config.tile_size),
        colors::QUESTION,
        Traits::QuestionBlock(QuestionBlockTraits {
            used: false,
            contents,
        }),
    );
    let machine = StateMachine::new(IDLE)
        .with(IDLE, Idle)
        .with(HIT, Hit { bump: None });
    Entity::new(body, machine)
}

/// True if the player's snapshot struck the block from beneath.
pub fn struck_from_below(block: &Body, contacts: &[Contact]) -> bool {
    player_contact(contacts).map_or(false, |pc| {
        dominant_side(&block.bounds(), &pc.bounds) == Some(Side::Bottom)
    })
}

struct Idle;

impl State for Idle {
    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, _dt: f32) -> Option<StateId> {
        let contacts = body.take_collisions();
        let used = body.question_block().map_or(true, |q| q.used);
        if !used && struck_from_below(body, &contacts) {
            Some(HIT)
        } else {
            None
        }
    }
}

/// Spent. Releases the contents on the first entry only, and never leaves.
struct Hit {
    bump: Option<Bump>,
}

impl State for Hit {
    fn enter(&mut self, body: &mut Body, ctx: &mut Context) {
        let block = body.bounds();
        let id = body.id;
        if let Some(q) = body.question_block_mut() {
            if !q.used {
                q.used = true;
                debug!(entity_id = id, "Question block releasing {:?}", q.contents);
                ctx.dispatcher.entity_to_global(
                    id,
                    Event::SpawnItem {
                        contents: q.contents,
                        block,
                    },
                );
            }
        }
        body.color = colors::QUESTION_USED;
        self.bump = Some(Bump::new(
            body.position.y,
            ctx.config.bump_height,
            ctx.config.bump_duration,
        ));
    }

    fn execute(&mut self, body: &mut Body, _ctx: &mut Context, dt: f32) -> Option<StateId> {
        body.clear_collisions();
        if let Some(bump) = &mut self.bump {
            body.position.y = bump.update(dt);
            if bump.is_complete() {
                self.bump = None;
            }
        }
        None
    }
}
