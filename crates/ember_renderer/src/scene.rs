//! Scene construction.
//!
//! Two ways to populate a world: a declarative JSON description of surface
//! records, and the procedural cover-scene builder. Either way the core
//! consumes only the resulting object graph; materials are built once and
//! handed to primitives as shared handles.

use crate::sampling::uniform;
use crate::{Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("scene parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A material record in a scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialRecord {
    Lambertian { albedo: [f32; 3] },
    Metal { albedo: [f32; 3], fuzz: f32 },
    Dielectric { ref_idx: f32 },
}

impl MaterialRecord {
    fn build(&self) -> Arc<dyn Material> {
        match *self {
            MaterialRecord::Lambertian { albedo } => Arc::new(Lambertian::new(Vec3::from(albedo))),
            MaterialRecord::Metal { albedo, fuzz } => {
                Arc::new(Metal::new(Vec3::from(albedo), fuzz))
            }
            MaterialRecord::Dielectric { ref_idx } => Arc::new(Dielectric::new(ref_idx)),
        }
    }
}

/// A primitive record in a scene description.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SurfaceRecord {
    Sphere {
        center: [f32; 3],
        radius: f32,
        material: MaterialRecord,
    },
}

/// A complete scene description file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub surfaces: Vec<SurfaceRecord>,
}

impl SceneFile {
    /// Build the object graph this description names.
    pub fn build(&self) -> HittableList {
        let mut world = HittableList::new();
        for surface in &self.surfaces {
            match surface {
                SurfaceRecord::Sphere {
                    center,
                    radius,
                    material,
                } => {
                    world.add(Box::new(Sphere::new(
                        Vec3::from(*center),
                        *radius,
                        material.build(),
                    )));
                }
            }
        }
        world
    }
}

/// Load and build a scene from a JSON description file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<HittableList, SceneError> {
    let text = fs::read_to_string(path)?;
    let file: SceneFile = serde_json::from_str(&text)?;
    log::info!("loaded scene with {} surfaces", file.surfaces.len());
    Ok(file.build())
}

/// Build the procedural cover scene.
///
/// A large gray ground sphere, a grid of small spheres with randomly chosen
/// materials (80% diffuse, 15% metal, 5% glass), and three hero spheres.
pub fn random_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Vec3::new(0.5, 0.5, 0.5))),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = uniform(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * uniform(rng),
                0.2,
                b as f32 + 0.9 * uniform(rng),
            );
            // Keep the area around the metal hero sphere clear
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = Vec3::new(
                    uniform(rng) * uniform(rng),
                    uniform(rng) * uniform(rng),
                    uniform(rng) * uniform(rng),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Vec3::new(
                    0.5 * (1.0 + uniform(rng)),
                    0.5 * (1.0 + uniform(rng)),
                    0.5 * (1.0 + uniform(rng)),
                );
                Arc::new(Metal::new(albedo, 0.5 * uniform(rng)))
            } else {
                Arc::new(Dielectric::new(1.5))
            };

            world.add(Box::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Box::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Vec3::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Vec3::new(0.7, 0.6, 0.5), 0.0)),
    )));

    log::info!("built procedural scene with {} surfaces", world.len());
    world
}
