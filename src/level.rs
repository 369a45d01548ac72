use std::path::Path;

use anyhow::Result;
use cgmath::*;
use tracing::{debug, info, warn};

use crate::{
    config::SimConfig,
    entities::{self, coin, mushroom, question_block::Contents, EntityClass},
    entity::{Body, Context, Contact, Entity, IdVendor, PlayerPeek, WorldPeek},
    event_dispatch::{Dispatcher, Message, MessageHandler},
    events::Event,
    geom::Bounds,
    input::InputState,
    map::Map,
};

/// Running totals for the session, fed by level events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub coins: u32,
    pub mushrooms: u32,
    pub stomps: u32,
    pub enemies_activated: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    PlayerDied,
    PlayerFellOut,
    NoPlayer,
}

pub struct Level {
    config: SimConfig,
    tiles: Vec<Entity>,
    entities: Vec<Entity>,
    player_id: Option<u32>,
    coin_id: u32,
    mushroom_id: u32,
    dispatcher: Dispatcher,
    tally: Tally,
    bounds: Bounds,
    frame: u64,
}

impl Level {
    pub fn load(path: &Path, config: SimConfig) -> Result<Level> {
        let map = Map::load(path)?;
        Ok(Level::new(&map, config))
    }

    /// Builds the level for a parsed map. Tiles keep map order; the pool items are appended
    /// after everything the map placed.
    pub fn new(map: &Map, config: SimConfig) -> Level {
        let mut ids = IdVendor::default();
        let mut tiles = vec![];
        let mut entities = vec![];
        let mut player_id = None;
        let tile_size = config.tile_size as f32;

        for placement in &map.placements {
            let position = point2(
                placement.column as f32 * tile_size,
                placement.row as f32 * tile_size,
            );

            if placement.class == EntityClass::Player && player_id.is_some() {
                warn!(
                    "Ignoring extra player at column {} row {}",
                    placement.column, placement.row
                );
                continue;
            }

            let id = ids.next_id();
            let entity =
                entities::instantiate(placement.class, placement.contents, id, position, &config);

            if placement.class == EntityClass::Player {
                player_id = Some(id);
            }

            if placement.class.is_tile() {
                tiles.push(entity);
            } else {
                entities.push(entity);
            }
        }

        let coin_id = ids.next_id();
        entities.push(coin::new(coin_id, &config));
        let mushroom_id = ids.next_id();
        entities.push(mushroom::new(mushroom_id, &config));

        let bounds = Bounds::from_xywh(
            0.0,
            0.0,
            map.columns as f32 * tile_size,
            map.rows as f32 * tile_size,
        );

        info!(
            "Loaded level {} x {} tiles: {} tiles, {} entities, player: {}",
            map.columns,
            map.rows,
            tiles.len(),
            entities.len(),
            player_id.is_some()
        );

        Level {
            config,
            tiles,
            entities,
            player_id,
            coin_id,
            mushroom_id,
            dispatcher: Dispatcher::default(),
            tally: Tally::default(),
            bounds,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn tiles(&self) -> &[Entity] {
        &self.tiles
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> Option<&Entity> {
        let id = self.player_id?;
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn find(&self, entity_id: u32) -> Option<&Entity> {
        self.tiles
            .iter()
            .chain(self.entities.iter())
            .find(|e| e.id() == entity_id)
    }

    pub fn status(&self) -> GameStatus {
        match self.player() {
            None => GameStatus::NoPlayer,
            Some(p) if p.body.is_dead_player() => GameStatus::PlayerDied,
            Some(p) if p.body.bounds().top() > self.bounds.bottom() => GameStatus::PlayerFellOut,
            Some(_) => GameStatus::Running,
        }
    }

    /// Everything to draw this frame, tiles first.
    pub fn drawables(&self) -> impl Iterator<Item = &Body> {
        self.tiles
            .iter()
            .chain(self.entities.iter())
            .filter(|e| e.is_visible())
            .map(|e| &e.body)
    }

    fn peek(&self) -> WorldPeek {
        WorldPeek {
            player: self.player().filter(|p| p.is_alive()).map(|p| PlayerPeek {
                entity_id: p.id(),
                bounds: p.body.bounds(),
            }),
            solid_tiles: self.tiles.iter().map(|t| t.body.bounds()).collect(),
            level_bounds: self.bounds,
        }
    }

    /// Advances the simulation one frame: tiles, then live entities, then deferred removal
    /// and queued events, and finally collision detection for the next frame to resolve.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let peek = self.peek();
        {
            let mut ctx = Context {
                config: &self.config,
                input,
                peek: &peek,
                dispatcher: &mut self.dispatcher,
            };

            for tile in self.tiles.iter_mut() {
                tile.update(dt, &mut ctx);
            }
            for entity in self.entities.iter_mut().filter(|e| e.is_alive()) {
                entity.update(dt, &mut ctx);
            }
        }

        let before = self.entities.len();
        self.entities.retain(|e| !e.body.removed);
        if self.entities.len() != before {
            debug!("Removed {} entities", before - self.entities.len());
        }

        // handling a message can send more (e.g. a coin announcing its collection)
        while !self.dispatcher.is_empty() {
            let messages = self.dispatcher.drain();
            Dispatcher::dispatch(&messages, self);
        }

        self.check_collisions();
        self.frame += 1;
    }

    /// Records every overlapping (entity, player) and (entity, tile) pair in both parties'
    /// collision lists. Each side receives a snapshot of the other as it is right now.
    pub fn check_collisions(&mut self) {
        let player_index = match self.player_id {
            Some(id) => self
                .entities
                .iter()
                .position(|e| e.id() == id && e.is_collidable()),
            None => None,
        };
        let player_snapshot = player_index.map(|i| self.entities[i].contact());
        let tile_snapshots: Vec<Contact> = self.tiles.iter().map(|t| t.contact()).collect();
        let snapshots: Vec<Option<Contact>> = self
            .entities
            .iter()
            .map(|e| {
                if e.is_collidable() {
                    Some(e.contact())
                } else {
                    None
                }
            })
            .collect();

        let mut for_player = vec![];
        let mut for_tiles = vec![];

        for (i, entity) in self.entities.iter_mut().enumerate() {
            let snapshot = match snapshots[i] {
                Some(s) => s,
                None => continue,
            };

            if let Some(player) = player_snapshot {
                if Some(i) != player_index && snapshot.bounds.intersects(&player.bounds) {
                    entity.body.add_collision(player);
                    for_player.push(snapshot);
                }
            }

            for (j, tile) in tile_snapshots.iter().enumerate() {
                if snapshot.bounds.intersects(&tile.bounds) {
                    entity.body.add_collision(*tile);
                    for_tiles.push((j, snapshot));
                }
            }
        }

        if let Some(i) = player_index {
            for contact in for_player {
                self.entities[i].body.add_collision(contact);
            }
        }
        for (j, contact) in for_tiles {
            self.tiles[j].body.add_collision(contact);
        }
    }

    fn spawn_item(&mut self, contents: Contents, block: &Bounds) {
        let id = match contents {
            Contents::Coin => self.coin_id,
            Contents::Mushroom => self.mushroom_id,
        };

        let Level {
            config,
            entities,
            dispatcher,
            ..
        } = self;

        let item = match entities.iter_mut().find(|e| e.id() == id) {
            Some(item) => item,
            None => return,
        };
        if item.body.active {
            debug!(entity_id = id, "{:?} is already out, not spawning", contents);
            return;
        }

        let peek = WorldPeek::default();
        let input = InputState::default();
        let mut ctx = Context {
            config,
            input: &input,
            peek: &peek,
            dispatcher,
        };
        let result = match contents {
            Contents::Coin => coin::activate(item, block, &mut ctx),
            Contents::Mushroom => mushroom::activate(item, block, &mut ctx),
        };
        match result {
            Ok(()) => debug!(entity_id = id, "Spawned {:?} at {:?}", contents, block.origin),
            Err(e) => debug!(entity_id = id, "Unable to spawn {:?}: {}", contents, e),
        }
    }
}

impl MessageHandler for Level {
    fn handle_message(&mut self, message: &Message) {
        match &message.event {
            Event::SpawnItem { contents, block } => self.spawn_item(*contents, block),
            Event::ItemCollected { contents } => match contents {
                Contents::Coin => self.tally.coins += 1,
                Contents::Mushroom => self.tally.mushrooms += 1,
            },
            Event::EnemyActivated => self.tally.enemies_activated += 1,
            Event::EnemyStomped => self.tally.stomps += 1,
            Event::PlayerDied => info!(
                entity_id = message.sender_entity_id,
                "Player died on frame {}", self.frame
            ),
        }
    }
}
