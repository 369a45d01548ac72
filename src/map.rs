use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::entities::{question_block::Contents, EntityClass};

/// One non-empty cell of a level map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub class: EntityClass,
    /// Only set for question blocks
    pub contents: Option<Contents>,
    pub column: u32,
    pub row: u32,
}

/// A level described as a grid of characters, one per tile:
///
/// ```text
/// ' '  empty
/// g    ground
/// m    player
/// b    brick block
/// q -  question block holding a coin
/// 1    question block holding a mushroom
/// p    pipe
/// @    goomba
/// #    koopa
/// ```
#[derive(Clone, Debug, Default)]
pub struct Map {
    pub placements: Vec<Placement>,
    /// Width of the longest row
    pub columns: u32,
    pub rows: u32,
}

fn classify(c: char) -> Option<(EntityClass, Option<Contents>)> {
    match c {
        'g' => Some((EntityClass::GroundBlock, None)),
        'm' => Some((EntityClass::Player, None)),
        'b' => Some((EntityClass::BrickBlock, None)),
        'q' | '-' => Some((EntityClass::QuestionBlock, Some(Contents::Coin))),
        '1' => Some((EntityClass::QuestionBlock, Some(Contents::Mushroom))),
        'p' => Some((EntityClass::Pipe, None)),
        '@' => Some((EntityClass::Goomba, None)),
        '#' => Some((EntityClass::Koopa, None)),
        _ => None,
    }
}

impl Map {
    /// Parses a level grid. Rows may be ragged, and unrecognized characters are skipped.
    pub fn parse(text: &str) -> Map {
        let mut map = Map::default();

        for (row, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            let mut columns = 0;
            for (column, c) in line.chars().enumerate() {
                columns = column + 1;
                if c == ' ' {
                    continue;
                }
                match classify(c) {
                    Some((class, contents)) => map.placements.push(Placement {
                        class,
                        contents,
                        column: column as u32,
                        row: row as u32,
                    }),
                    None => trace!("Skipping unrecognized map cell {:?} at {}, {}", c, column, row),
                }
            }
            map.columns = map.columns.max(columns as u32);
            map.rows = row as u32 + 1;
        }

        map
    }

    pub fn load(path: &Path) -> Result<Map> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read level file {}", path.display()))?;
        Ok(Map::parse(&text))
    }
}
