use std::fmt::Debug;

use cgmath::*;
use tracing::debug;

use crate::{
    config::SimConfig,
    constants::colors::Color,
    entities::{
        patrol::{self, PatrolTraits},
        player::PlayerTraits,
        question_block::QuestionBlockTraits,
        util::{Facing, PooledTraits},
        EntityClass,
    },
    event_dispatch::Dispatcher,
    geom::Bounds,
    input::InputState,
    state::{StateError, StateId, StateMachine},
};

// ---------------------------------------------------------------------------------------------------------------------

/// Hands out level-unique entity ids, in construction order.
pub struct IdVendor {
    current_id: u32,
}

impl Default for IdVendor {
    fn default() -> Self {
        IdVendor { current_id: 0 }
    }
}

impl IdVendor {
    pub fn next_id(&mut self) -> u32 {
        let r = self.current_id;
        self.current_id += 1;
        r
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// States can't reach into the Level, so the Level hands them this read-only summary, taken
/// once at the start of each frame. Enemies watch the player to know when to wake, and grounded
/// states look through the solid tiles for footing.
#[derive(Clone, Debug, Default)]
pub struct WorldPeek {
    pub player: Option<PlayerPeek>,
    pub solid_tiles: Vec<Bounds>,
    pub level_bounds: Bounds,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPeek {
    pub entity_id: u32,
    pub bounds: Bounds,
}

/// Everything a state may read or send while it runs.
pub struct Context<'a> {
    pub config: &'a SimConfig,
    pub input: &'a InputState,
    pub peek: &'a WorldPeek,
    pub dispatcher: &'a mut Dispatcher,
}

// ---------------------------------------------------------------------------------------------------------------------

/// Per-kind data which only some entities carry.
#[derive(Clone, Debug, PartialEq)]
pub enum Traits {
    Inert,
    Player(PlayerTraits),
    Patrol(PatrolTraits),
    QuestionBlock(QuestionBlockTraits),
    Pooled(PooledTraits),
}

/// What an entity knows about something it touched. The detector records a snapshot of the
/// other party as it was at detection time; states resolve against that snapshot on the
/// following frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    pub entity_id: u32,
    pub class: EntityClass,
    pub bounds: Bounds,
    /// True for an enemy which hurts the player on touch
    pub harmful: bool,
}

impl Contact {
    pub fn new(body: &Body, harmful: bool) -> Self {
        Self {
            entity_id: body.id,
            class: body.class,
            bounds: body.bounds(),
            harmful,
        }
    }
}

/// The positioned, sized, colored physical part of an entity that states operate on.
#[derive(Clone, Debug)]
pub struct Body {
    pub id: u32,
    pub class: EntityClass,
    pub position: Point2<f32>,
    pub size: Vector2<u32>,
    pub color: Color,
    pub facing: Facing,
    /// vertical velocity accumulator
    pub dy: f32,
    /// per-tick vertical acceleration
    pub velocity: f32,
    /// inactive bodies are neither drawn nor collided with
    pub active: bool,
    /// set to request removal from the level once the current update pass completes
    pub removed: bool,
    pub traits: Traits,
    contacts: Vec<Contact>,
    has_collision: bool,
}

impl Body {
    pub fn new(
        id: u32,
        class: EntityClass,
        position: Point2<f32>,
        size: (u32, u32),
        color: Color,
        traits: Traits,
    ) -> Self {
        Self {
            id,
            class,
            position,
            size: vec2(size.0, size.1),
            color,
            facing: Facing::Right,
            dy: 0.0,
            velocity: 0.0,
            active: true,
            removed: false,
            traits,
            contacts: vec![],
            has_collision: false,
        }
    }

    /// The bounding rect, derived from position & size each time it's asked for.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, vec2(self.size.x as f32, self.size.y as f32))
    }

    pub fn width(&self) -> f32 {
        self.size.x as f32
    }

    pub fn height(&self) -> f32 {
        self.size.y as f32
    }

    /// Moves the body, turning it to face the direction of horizontal travel.
    /// The player can't leave the level past its left edge.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        if dx < 0.0 {
            self.facing = Facing::Left;
        } else if dx > 0.0 {
            self.facing = Facing::Right;
        }

        self.position.x += dx;
        if self.class == EntityClass::Player && self.position.x < 0.0 {
            self.position.x = 0.0;
        }
        self.position.y += dy;
    }

    pub fn add_collision(&mut self, contact: Contact) {
        self.contacts.push(contact);
        self.has_collision = true;
    }

    pub fn has_collision(&self) -> bool {
        self.has_collision
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Drains the collision list for resolution.
    pub fn take_collisions(&mut self) -> Vec<Contact> {
        self.has_collision = false;
        std::mem::take(&mut self.contacts)
    }

    pub fn clear_collisions(&mut self) {
        self.contacts.clear();
        self.has_collision = false;
    }

    pub fn player(&self) -> Option<&PlayerTraits> {
        match &self.traits {
            Traits::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerTraits> {
        match &mut self.traits {
            Traits::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn patrol(&self) -> Option<&PatrolTraits> {
        match &self.traits {
            Traits::Patrol(p) => Some(p),
            _ => None,
        }
    }

    pub fn patrol_mut(&mut self) -> Option<&mut PatrolTraits> {
        match &mut self.traits {
            Traits::Patrol(p) => Some(p),
            _ => None,
        }
    }

    pub fn question_block(&self) -> Option<&QuestionBlockTraits> {
        match &self.traits {
            Traits::QuestionBlock(q) => Some(q),
            _ => None,
        }
    }

    pub fn question_block_mut(&mut self) -> Option<&mut QuestionBlockTraits> {
        match &mut self.traits {
            Traits::QuestionBlock(q) => Some(q),
            _ => None,
        }
    }

    pub fn pooled(&self) -> Option<&PooledTraits> {
        match &self.traits {
            Traits::Pooled(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_dead_player(&self) -> bool {
        self.player().map_or(false, |p| p.is_dead)
    }
}

// ---------------------------------------------------------------------------------------------------------------------

/// An Entity is a Body driven by its state machine.
pub struct Entity {
    pub body: Body,
    machine: StateMachine,
}

impl Entity {
    pub fn new(body: Body, machine: StateMachine) -> Self {
        debug_assert!(machine.contains(machine.current()));
        Self { body, machine }
    }

    pub fn id(&self) -> u32 {
        self.body.id
    }

    pub fn class(&self) -> EntityClass {
        self.body.class
    }

    pub fn current_state(&self) -> StateId {
        self.machine.current()
    }

    pub fn previous_state(&self) -> StateId {
        self.machine.previous()
    }

    /// The only sanctioned way to move an entity between states. An unknown id leaves the
    /// entity untouched and reports why.
    pub fn change_state(&mut self, id: StateId, ctx: &mut Context) -> Result<(), StateError> {
        self.machine.transition(&mut self.body, id, ctx)
    }

    /// Runs one tick of the current state and performs whatever transition it asked for.
    pub fn update(&mut self, dt: f32, ctx: &mut Context) {
        if let Some(next) = self.machine.execute(&mut self.body, ctx, dt) {
            if let Err(e) = self.machine.transition(&mut self.body, next, ctx) {
                debug!(entity_id = self.body.id, "Ignoring transition: {}", e);
            }
        }
    }

    /// An entity is updated so long as it hasn't been removed, and isn't a dead player.
    pub fn is_alive(&self) -> bool {
        !self.body.removed && !self.body.is_dead_player()
    }

    pub fn is_collidable(&self) -> bool {
        self.is_alive() && self.body.active
    }

    pub fn is_visible(&self) -> bool {
        !self.body.removed && self.body.active
    }

    /// True for an awake enemy in a state which hurts the player on touch.
    pub fn is_harmful(&self) -> bool {
        if !self.body.class.is_enemy() || !self.body.active {
            return false;
        }
        let grace = self.body.patrol().map_or(0.0, |p| p.kick_grace);
        grace <= 0.0
            && matches!(
                self.current_state(),
                patrol::MOVE | patrol::FALL | patrol::SHELL_MOVE
            )
    }

    /// Snapshot of this entity for another entity's collision list.
    pub fn contact(&self) -> Contact {
        Contact::new(&self.body, self.is_harmful())
    }
}

impl Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Entity id: {} class: {:?} state: {} position: {:?}]",
            self.id(),
            self.class(),
            self.current_state(),
            self.body.position
        )
    }
}

// ---------------------------------------------------------------------------------------------------------------------

#[cfg(test)]
pub mod testing {
    use super::*;
    use crate::{events::Event, input::Action};

    /// Owns everything a Context borrows, so states can be driven one tick at a time.
    #[derive(Default)]
    pub struct Harness {
        pub config: SimConfig,
        pub input: InputState,
        pub peek: WorldPeek,
        pub dispatcher: Dispatcher,
    }

    impl Harness {
        pub fn ctx(&mut self) -> Context<'_> {
            Context {
                config: &self.config,
                input: &self.input,
                peek: &self.peek,
                dispatcher: &mut self.dispatcher,
            }
        }

        pub fn hold(&mut self, actions: &[Action]) {
            self.input.update(actions);
        }

        pub fn set_tiles(&mut self, tiles: Vec<Bounds>) {
            self.peek.solid_tiles = tiles;
        }

        pub fn set_player(&mut self, bounds: Bounds) {
            self.peek.player = Some(PlayerPeek {
                entity_id: 0,
                bounds,
            });
        }

        pub fn contact_for(&self, body: &Body) -> Contact {
            Contact::new(body, false)
        }

        pub fn tick(&mut self, entity: &mut Entity, dt: f32) {
            entity.update(dt, &mut self.ctx());
        }

        pub fn events(&mut self) -> Vec<Event> {
            self.dispatcher.drain().into_iter().map(|m| m.event).collect()
        }
    }

    /// A static tile snapshot as the collision detector would record it.
    pub fn tile_contact(id: u32, class: EntityClass, bounds: Bounds) -> Contact {
        Contact {
            entity_id: id,
            class,
            bounds,
            harmful: false,
        }
    }
}

#[cfg(test)]
mod body_tests {
    use super::*;

    fn body(class: EntityClass) -> Body {
        Body::new(
            1,
            class,
            point2(10.0, 20.0),
            (50, 40),
            [0, 0, 0],
            Traits::Inert,
        )
    }

    #[test]
    fn bounds_follow_position_and_size() {
        let mut b = body(EntityClass::Goomba);
        assert_eq!(b.bounds(), Bounds::from_xywh(10.0, 20.0, 50.0, 40.0));

        b.translate(5.0, -5.0);
        assert_eq!(b.bounds(), Bounds::from_xywh(15.0, 15.0, 50.0, 40.0));

        b.size = vec2(50, 20);
        assert_eq!(b.bounds().bottom(), 35.0);
    }

    #[test]
    fn translate_updates_facing_from_dx_sign() {
        let mut b = body(EntityClass::Goomba);
        b.translate(-1.0, 0.0);
        assert_eq!(b.facing, Facing::Left);
        b.translate(0.0, 3.0);
        assert_eq!(b.facing, Facing::Left);
        b.translate(2.0, 0.0);
        assert_eq!(b.facing, Facing::Right);
    }

    #[test]
    fn only_player_is_clamped_at_left_edge() {
        let mut p = body(EntityClass::Player);
        p.translate(-100.0, 0.0);
        assert_eq!(p.position.x, 0.0);

        let mut g = body(EntityClass::Goomba);
        g.translate(-100.0, 0.0);
        assert_eq!(g.position.x, -90.0);
    }

    #[test]
    fn collision_flag_tracks_list() {
        let mut b = body(EntityClass::Goomba);
        let other = body(EntityClass::GroundBlock);
        assert!(!b.has_collision());

        // the same pair may be reported twice in a frame
        b.add_collision(Contact::new(&other, false));
        b.add_collision(Contact::new(&other, false));
        assert!(b.has_collision());
        assert_eq!(b.contacts().len(), 2);

        let taken = b.take_collisions();
        assert_eq!(taken.len(), 2);
        assert!(!b.has_collision());
        assert!(b.contacts().is_empty());
    }
}
