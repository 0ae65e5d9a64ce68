//! Camera for ray generation.
//!
//! Maps normalized image-plane coordinates (s, t) in [0,1] x [0,1] to
//! world-space rays, optionally jittering the ray origin over a lens disk
//! for depth of field. All state is derived at construction and never
//! mutated afterwards.

use crate::sampling::random_in_unit_disk;
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    // Lens basis, used only when lens_radius > 0
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    /// Create a camera looking from `look_from` toward `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees, `aspect` the
    /// width/height ratio of the image. This variant is a pinhole: every
    /// ray starts exactly at `look_from`.
    pub fn look_at(look_from: Vec3, look_at: Vec3, vup: Vec3, vfov: f32, aspect: f32) -> Self {
        Self::build(look_from, look_at, vup, vfov, aspect, 0.0, 1.0)
    }

    /// Create a thin-lens camera with depth of field.
    ///
    /// Rays originate on a disk of diameter `aperture` around `look_from`;
    /// only points at `focus_dist` along the view direction stay sharp.
    pub fn thin_lens(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        Self::build(look_from, look_at, vup, vfov, aspect, aperture, focus_dist)
    }

    fn build(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan() * focus_dist;
        let half_width = aspect * half_height;

        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        let origin = look_from;
        Self {
            origin,
            lower_left_corner: origin - half_width * u - half_height * v - focus_dist * w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            u,
            v,
            lens_radius: aperture / 2.0,
        }
    }

    /// Generate a ray through image-plane coordinates (s, t).
    ///
    /// (0, 0) is the lower-left corner of the image plane, (1, 1) the
    /// upper-right. Pinhole cameras draw no lens sample.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }
}

impl Default for Camera {
    /// The fixed-window pinhole camera: a 4x2 view plane one unit in front
    /// of the origin, looking down -Z.
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            lower_left_corner: Vec3::new(-2.0, -1.0, -1.0),
            horizontal: Vec3::new(4.0, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0, 0.0),
            u: Vec3::X,
            v: Vec3::Y,
            lens_radius: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_camera_center_ray() {
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(42);

        // Center of the image plane is straight down -Z
        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_default_camera_corners() {
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.0, 0.0, &mut rng);
        assert!((ray.direction() - Vec3::new(-2.0, -1.0, -1.0)).length() < 1e-6);

        let ray = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((ray.direction() - Vec3::new(2.0, 1.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_look_at_faces_target() {
        let camera = Camera::look_at(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            2.0,
        );
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(0.0, 0.0, 1.0));
        assert!((ray.direction().normalize() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_vfov_scales_window() {
        // At vfov 90 and focus 1, the half height is tan(45) = 1
        let camera = Camera::look_at(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let top = camera.get_ray(0.5, 1.0, &mut rng);
        assert!((top.direction() - Vec3::new(0.0, 1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_thin_lens_jitters_origin() {
        let camera = Camera::thin_lens(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            1.0,
            2.0,
            1.0,
        );
        let mut rng = StdRng::seed_from_u64(42);

        // With aperture 2 the origins spread over a unit disk around the
        // camera center but never beyond the lens radius.
        let mut saw_offset = false;
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            let offset = ray.origin() - Vec3::ZERO;
            assert!(offset.length() < 1.0);
            if offset.length() > 1e-3 {
                saw_offset = true;
            }
        }
        assert!(saw_offset, "lens sampling should move the ray origin");
    }

    #[test]
    fn test_thin_lens_focus_plane_sharp() {
        // Rays through the same (s, t) must converge on the focus plane.
        let camera = Camera::thin_lens(
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            90.0,
            1.0,
            1.0,
            3.0,
        );
        let mut rng = StdRng::seed_from_u64(42);

        let mut target = None;
        for _ in 0..10 {
            let ray = camera.get_ray(0.25, 0.75, &mut rng);
            // The focus plane sits at z = -3
            let t = -3.0 / ray.direction().z;
            let p = ray.at(t);
            match target {
                None => target = Some(p),
                Some(q) => assert!((p - q).length() < 1e-4),
            }
        }
    }
}
