use crate::{entities::question_block::Contents, geom::Bounds};

/// An Event payload for Message
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Sent by a QuestionBlock to the level when first hit, requesting its
    /// contents be shown above `block`.
    SpawnItem { contents: Contents, block: Bounds },

    /// Sent by a pool item when the player picks it up
    ItemCollected { contents: Contents },

    /// Sent by an enemy when the player first comes within range and it starts patrolling
    EnemyActivated,

    /// Sent by an enemy when squashed (or knocked into its shell) by the player
    EnemyStomped,

    /// Sent by the player when it touches a harmful enemy
    PlayerDied,
}
