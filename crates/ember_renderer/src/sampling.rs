//! Rejection samplers shared by materials and the camera.
//!
//! Randomness is always drawn from an explicitly passed generator; nothing
//! in the crate touches a global RNG, so concurrent use only needs one
//! generator per worker.

use ember_math::Vec3;
use rand::{Rng, RngCore};

/// Draw a uniform value in [0, 1).
#[inline]
pub fn uniform(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Sample a random point inside the unit sphere.
///
/// Rejection sampling: draw uniformly in the cube [-1,1]^3 and redraw while
/// the point falls outside the sphere. The accepted point is returned as-is
/// (not normalized); callers add it to a normal to get the diffuse bounce
/// distribution.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            uniform(rng) * 2.0 - 1.0,
            uniform(rng) * 2.0 - 1.0,
            uniform(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a random point inside the unit disk (z = 0).
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(uniform(rng) * 2.0 - 1.0, uniform(rng) * 2.0 - 1.0, 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
