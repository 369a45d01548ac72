use cgmath::Point2;

use crate::{config::SimConfig, entity::Entity};

pub mod brick_block;
pub mod coin;
pub mod goomba;
pub mod koopa;
pub mod mushroom;
pub mod patrol;
pub mod player;
pub mod question_block;
pub mod scenery;
pub mod util;

use question_block::Contents;

/// Tag for each kind of entity the level can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Player,
    Goomba,
    Koopa,
    Mushroom,
    Coin,
    BrickBlock,
    QuestionBlock,
    GroundBlock,
    Pipe,
}

impl EntityClass {
    /// Tiles are static and solid; everything else is dynamic.
    pub fn is_tile(&self) -> bool {
        matches!(
            self,
            EntityClass::BrickBlock
                | EntityClass::QuestionBlock
                | EntityClass::GroundBlock
                | EntityClass::Pipe
        )
    }

    pub fn is_enemy(&self) -> bool {
        matches!(self, EntityClass::Goomba | EntityClass::Koopa)
    }

    pub fn is_item(&self) -> bool {
        matches!(self, EntityClass::Mushroom | EntityClass::Coin)
    }
}

/// Builds the entity for a map placement. `contents` is only meaningful for question blocks,
/// which default to holding a coin.
pub fn instantiate(
    class: EntityClass,
    contents: Option<Contents>,
    entity_id: u32,
    position: Point2<f32>,
    config: &SimConfig,
) -> Entity {
    match class {
        EntityClass::Player => player::new(entity_id, position, config),
        EntityClass::Goomba => goomba::new(entity_id, position, config),
        EntityClass::Koopa => koopa::new(entity_id, position, config),
        EntityClass::Mushroom => mushroom::new(entity_id, config),
        EntityClass::Coin => coin::new(entity_id, config),
        EntityClass::BrickBlock => brick_block::new(entity_id, position, config),
        EntityClass::QuestionBlock => question_block::new(
            entity_id,
            position,
            contents.unwrap_or(Contents::Coin),
            config,
        ),
        EntityClass::GroundBlock | EntityClass::Pipe => {
            scenery::new(class, entity_id, position, config)
        }
    }
}
