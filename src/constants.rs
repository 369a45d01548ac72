// Tuned against the 1-1 layout in res/ (and fiddling).
// Units are pixels & milliseconds unless otherwise specified.
// Velocities are pixels per millisecond.

pub const TILE_SIZE: u32 = 50;
pub const SCREEN_WIDTH: u32 = 1280;
pub const SCREEN_HEIGHT: u32 = 720;

// Gravity is a per-tick constant, deliberately not scaled by frame delta
pub const GRAVITY: f32 = 0.02;
pub const MAX_VELOCITY: f32 = 1.0;

pub const PLAYER_SPEED: f32 = 0.5;
pub const JUMP_VELOCITY: f32 = -0.2;
pub const RUN_SPEED_MULTIPLIER: f32 = 2.0;
pub const RUN_GRAVITY_DAMPING: f32 = 0.9;
pub const STOMP_BOUNCE_VELOCITY: f32 = -0.15;

pub const ENEMY_SPEED: f32 = 0.1;
pub const SHELL_SPEED: f32 = 0.6;
pub const SHELL_RECOVERY_DURATION: f32 = 5000.0;
pub const SHELL_KICK_GRACE_DURATION: f32 = 200.0;
pub const SQUISH_DURATION: f32 = 500.0;

pub const MUSHROOM_SPEED: f32 = 0.15;
pub const MUSHROOM_RISE_SPEED: f32 = 0.05;
pub const COIN_DURATION: f32 = 600.0;
pub const COIN_RISE_SPEED: f32 = 0.2;

pub const BUMP_HEIGHT: f32 = 10.0;
pub const BUMP_DURATION: f32 = 150.0;

pub const DEFAULT_FRAME_DT: f32 = 16.0;

pub mod colors {
    pub type Color = [u8; 3];

    pub const SKY: Color = [135, 206, 250];
    pub const PLAYER: Color = [255, 255, 255];
    pub const GROUND: Color = [160, 82, 45];
    pub const BRICK: Color = [205, 133, 63];
    pub const QUESTION: Color = [255, 215, 0];
    pub const QUESTION_USED: Color = [139, 69, 19];
    pub const PIPE: Color = [0, 255, 0];
    pub const GOOMBA: Color = [128, 0, 0];
    pub const GOOMBA_SQUISHED: Color = [90, 0, 0];
    pub const KOOPA: Color = [0, 128, 0];
    pub const SHELL: Color = [0, 100, 100];
    pub const MUSHROOM: Color = [255, 0, 0];
    pub const COIN: Color = [255, 223, 0];
}
