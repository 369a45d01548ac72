use cgmath::*;

use crate::{config::SimConfig, geom::Bounds, level::Level};

/// Horizontal-scrolling viewport. The camera holds still until the player reaches the middle
/// of the screen, then follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point2<f32>,
    pub viewport_size: Vector2<f32>,
}

impl Camera {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            position: point2(0.0, 0.0),
            viewport_size: vec2(config.screen_width as f32, config.screen_height as f32),
        }
    }

    /// Recenters on `player`. Nothing happens without one.
    pub fn follow(&mut self, player: Option<&Bounds>, config: &SimConfig) {
        let player = match player {
            Some(p) => p,
            None => return,
        };
        let half_screen = config.screen_width as f32 / 2.0;
        self.position.x = if player.left() < half_screen {
            0.0
        } else {
            player.left() - half_screen + config.tile_size as f32 / 2.0
        };
    }

    pub fn update(&mut self, level: &Level) {
        let player = level.player().map(|p| p.body.bounds());
        self.follow(player.as_ref(), level.config());
    }

    pub fn viewport(&self) -> Bounds {
        Bounds::new(self.position, self.viewport_size)
    }

    /// Level to screen space.
    pub fn project(&self, bounds: &Bounds) -> Bounds {
        bounds.offset(-self.position.to_vec())
    }
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn holds_until_player_reaches_middle() {
        let config = SimConfig::default();
        let mut camera = Camera::new(&config);

        camera.follow(Some(&Bounds::from_xywh(600.0, 0.0, 50.0, 50.0)), &config);
        assert_eq!(camera.position.x, 0.0);

        camera.follow(Some(&Bounds::from_xywh(1000.0, 0.0, 50.0, 50.0)), &config);
        assert_eq!(camera.position.x, 1000.0 - 640.0 + 25.0);

        camera.follow(None, &config);
        assert_eq!(camera.position.x, 385.0);
    }

    #[test]
    fn projects_into_screen_space() {
        let config = SimConfig::default();
        let mut camera = Camera::new(&config);
        camera.position = point2(100.0, 0.0);
        assert_eq!(
            camera.project(&Bounds::from_xywh(150.0, 20.0, 50.0, 50.0)),
            Bounds::from_xywh(50.0, 20.0, 50.0, 50.0)
        );
    }
}
