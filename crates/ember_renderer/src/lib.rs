//! Ember - CPU path tracing core.
//!
//! A Monte Carlo path tracer for a single offline batch render: implicit
//! surfaces behind the [`Hittable`] trait, surface scattering behind the
//! [`Material`] trait, a thin-lens [`Camera`], and a recursive radiance
//! estimator driven by [`render`].

mod camera;
mod hittable;
mod material;
pub mod output;
mod renderer;
mod sampling;
pub mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Color, Dielectric, Lambertian, Material, Metal};
pub use renderer::{ray_color, render, render_pixel, ImageBuffer, RenderConfig, T_MIN};
pub use scene::{load_scene, random_scene, SceneError, SceneFile};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};
