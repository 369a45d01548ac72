use crate::constants::*;

/// Tunables for a simulation run. Threaded through Level construction and handed to every
/// state via `entity::Context`, so nothing reads ambient globals.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub tile_size: u32,
    pub screen_width: u32,
    pub screen_height: u32,

    pub gravity: f32,
    pub max_velocity: f32,

    pub player_speed: f32,
    pub jump_velocity: f32,
    pub run_speed_multiplier: f32,
    pub run_gravity_damping: f32,
    pub stomp_bounce_velocity: f32,

    pub enemy_speed: f32,
    pub shell_speed: f32,
    pub shell_recovery_duration: f32,
    pub shell_kick_grace_duration: f32,
    pub squish_duration: f32,

    pub mushroom_speed: f32,
    pub mushroom_rise_speed: f32,
    pub coin_duration: f32,
    pub coin_rise_speed: f32,

    pub bump_height: f32,
    pub bump_duration: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,
            max_velocity: MAX_VELOCITY,
            player_speed: PLAYER_SPEED,
            jump_velocity: JUMP_VELOCITY,
            run_speed_multiplier: RUN_SPEED_MULTIPLIER,
            run_gravity_damping: RUN_GRAVITY_DAMPING,
            stomp_bounce_velocity: STOMP_BOUNCE_VELOCITY,
            enemy_speed: ENEMY_SPEED,
            shell_speed: SHELL_SPEED,
            shell_recovery_duration: SHELL_RECOVERY_DURATION,
            shell_kick_grace_duration: SHELL_KICK_GRACE_DURATION,
            squish_duration: SQUISH_DURATION,
            mushroom_speed: MUSHROOM_SPEED,
            mushroom_rise_speed: MUSHROOM_RISE_SPEED,
            coin_duration: COIN_DURATION,
            coin_rise_speed: COIN_RISE_SPEED,
            bump_height: BUMP_HEIGHT,
            bump_duration: BUMP_DURATION,
        }
    }
}

impl SimConfig {
    /// Horizontal distance ahead of an enemy at which the player wakes it; half a screen,
    /// which is roughly when the enemy scrolls into view.
    pub fn enemy_trigger_lead(&self) -> f32 {
        self.screen_width as f32 / 2.0
    }

    /// Where pool items (the shared coin & mushroom) wait while hidden.
    pub fn pool_home(&self) -> cgmath::Point2<f32> {
        let t = self.tile_size as f32;
        cgmath::point2(-2.0 * t, -2.0 * t)
    }
}
