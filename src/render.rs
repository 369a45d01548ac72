use std::fmt;

use crate::{
    camera::Camera,
    constants::colors::{self, Color},
    geom::Bounds,
    level::Level,
};

/// Whatever the simulation is drawn onto. Rects arrive in screen space.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: &Bounds, color: Color);
}

/// Draws the level as seen by `camera`: background, then tiles, then entities.
pub fn draw(level: &Level, camera: &Camera, renderer: &mut dyn Renderer) {
    renderer.clear(colors::SKY);
    let viewport = camera.viewport();
    for body in level.drawables() {
        let bounds = body.bounds();
        if bounds.intersects(&viewport) {
            renderer.fill_rect(&camera.project(&bounds), body.color);
        }
    }
}

// ---------------------------------------------------------------------------------------------------------------------

fn glyph(color: Color) -> char {
    match color {
        colors::SKY => ' ',
        colors::PLAYER => 'M',
        colors::GROUND => '=',
        colors::BRICK => 'B',
        colors::QUESTION => '?',
        colors::QUESTION_USED => 'X',
        colors::PIPE => 'P',
        colors::GOOMBA | colors::GOOMBA_SQUISHED => 'g',
        colors::KOOPA => 'k',
        colors::SHELL => 's',
        colors::MUSHROOM => '^',
        colors::COIN => '$',
        _ => '*',
    }
}

/// A character grid, one cell per `cell_size` square of screen.
pub struct TextCanvas {
    columns: usize,
    rows: usize,
    cell_size: f32,
    cells: Vec<char>,
}

impl TextCanvas {
    pub fn new(width: u32, height: u32, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        let columns = ((width + cell_size - 1) / cell_size) as usize;
        let rows = ((height + cell_size - 1) / cell_size) as usize;
        Self {
            columns,
            rows,
            cell_size: cell_size as f32,
            cells: vec![' '; columns * rows],
        }
    }

    pub fn get(&self, column: usize, row: usize) -> Option<char> {
        if column < self.columns && row < self.rows {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }
}

impl Renderer for TextCanvas {
    fn clear(&mut self, color: Color) {
        let c = glyph(color);
        for cell in self.cells.iter_mut() {
            *cell = c;
        }
    }

    /// Marks every cell whose center lies inside `rect`.
    fn fill_rect(&mut self, rect: &Bounds, color: Color) {
        let c = glyph(color);
        for row in 0..self.rows {
            let y = (row as f32 + 0.5) * self.cell_size;
            if y < rect.top() || y >= rect.bottom() {
                continue;
            }
            for column in 0..self.columns {
                let x = (column as f32 + 0.5) * self.cell_size;
                if x >= rect.left() && x < rect.right() {
                    self.cells[row * self.columns + column] = c;
                }
            }
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1)) {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::{config::SimConfig, map::Map};

    #[test]
    fn canvas_fills_cells_by_center() {
        let mut canvas = TextCanvas::new(200, 100, 50);
        canvas.clear(colors::SKY);
        canvas.fill_rect(&Bounds::from_xywh(50.0, 50.0, 50.0, 50.0), colors::PLAYER);
        assert_eq!(canvas.get(1, 1), Some('M'));
        assert_eq!(canvas.get(0, 1), Some(' '));
        assert_eq!(canvas.get(2, 0), Some(' '));
        assert_eq!(canvas.get(4, 0), None);
    }

    #[test]
    fn draws_entities_over_tiles_with_camera_offset() {
        let level = Level::new(&Map::parse("    \n  m \ngggg\n"), SimConfig::default());
        let mut camera = Camera::new(level.config());
        camera.position.x = 50.0;

        let mut canvas = TextCanvas::new(200, 150, 50);
        draw(&level, &camera, &mut canvas);

        assert_eq!(canvas.get(1, 1), Some('M'));
        assert_eq!(canvas.get(0, 2), Some('='));
        assert_eq!(canvas.to_string(), "\n M\n===\n");
    }
}
