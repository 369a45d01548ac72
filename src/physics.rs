//! Vertical integration shared by every falling or jumping state.
//!
//! Semi-implicit Euler with a velocity cap. The cap is tested against the accumulator *before*
//! this tick's acceleration is added, and gravity is a per-tick constant which is not scaled by
//! the frame delta. Both are load-bearing for reproducible jump arcs & fall speeds.

use crate::entity::Body;

/// Advances `body.dy` and `body.velocity` by one tick.
pub fn integrate_vertical(body: &mut Body, gravity: f32, max_velocity: f32) {
    if body.dy >= max_velocity {
        body.dy = max_velocity;
    } else {
        body.dy += body.velocity;
    }
    body.velocity += gravity;
}

/// Integrates one tick, then applies the frame-delta scaled displacement.
pub fn step(body: &mut Body, dx: f32, dt: f32, gravity: f32, max_velocity: f32) {
    integrate_vertical(body, gravity, max_velocity);
    let dy = body.dy;
    body.translate(dx * dt, dy * dt);
}

#[cfg(test)]
mod physics_tests {
    use super::*;
    use crate::{entities::EntityClass, entity::Traits, geom::approx_eq};
    use cgmath::point2;

    fn body() -> Body {
        Body::new(
            1,
            EntityClass::Goomba,
            point2(0.0, 0.0),
            (50, 50),
            [0, 0, 0],
            Traits::Inert,
        )
    }

    #[test]
    fn clamp_holds_dy_at_max_without_overshoot() {
        let mut b = body();
        b.dy = 1.0;
        b.velocity = 0.5;
        integrate_vertical(&mut b, 0.02, 1.0);
        assert_eq!(b.dy, 1.0);
        assert!(approx_eq(b.velocity, 0.52));

        // already beyond the cap is pulled back to it exactly
        b.dy = 3.0;
        integrate_vertical(&mut b, 0.02, 1.0);
        assert_eq!(b.dy, 1.0);
        assert!(approx_eq(b.velocity, 0.54));
    }

    #[test]
    fn below_cap_accumulates_previous_velocity() {
        let mut b = body();
        b.dy = 0.0;
        b.velocity = 0.1;
        integrate_vertical(&mut b, 0.02, 1.0);
        assert!(approx_eq(b.dy, 0.1));
        assert!(approx_eq(b.velocity, 0.12));
    }

    #[test]
    fn step_scales_displacement_but_not_gravity_by_dt() {
        let mut a = body();
        let mut b = body();
        a.velocity = 0.1;
        b.velocity = 0.1;

        step(&mut a, 0.5, 10.0, 0.02, 1.0);
        step(&mut b, 0.5, 20.0, 0.02, 1.0);

        assert!(approx_eq(a.velocity, b.velocity));
        assert!(approx_eq(a.position.x, 5.0));
        assert!(approx_eq(b.position.x, 10.0));
        assert!(approx_eq(a.position.y, 1.0));
        assert!(approx_eq(b.position.y, 2.0));
    }
}
