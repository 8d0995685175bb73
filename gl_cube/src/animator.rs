//! Per-tick model-view-projection for the spinning cube.
//!
//! Everything here is pure: the only state is the number of ticks seen so
//! far, and every matrix is derived from it and the surface's aspect ratio.

use glarea::glam::{Mat4, Vec3};

pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 10.0;

pub const EYE: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const TARGET: Vec3 = Vec3::new(0.0, 0.0, -4.0);
pub const UP: Vec3 = Vec3::Y;
pub const CUBE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -4.0);

/// Degrees of rotation per 1000 units of counter.
const DEGREES_PER_THOUSAND: f64 = 45.0;

/// Multiplies left to right, starting from identity.
pub fn compose(transforms: &[Mat4]) -> Mat4 {
    transforms
        .iter()
        .fold(Mat4::IDENTITY, |combined, transform| combined * *transform)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transforms {
    pub projection: Mat4,
    pub view: Mat4,
    pub translation: Mat4,
    pub rotation: Mat4,
}

impl Transforms {
    /// The order the chain must be multiplied in.
    pub fn in_order(&self) -> [Mat4; 4] {
        [self.projection, self.view, self.translation, self.rotation]
    }
}

#[derive(Debug, Clone)]
pub struct Animator {
    ticks: u64,
    step: f64,
}

impl Animator {
    pub fn new(step: f64) -> Self {
        Animator { ticks: 0, step }
    }

    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn counter(&self) -> f64 {
        self.ticks as f64 * self.step
    }

    /// Grows without bound, like the counter.
    pub fn angle_degrees(&self) -> f64 {
        self.counter() / 1000.0 * DEGREES_PER_THOUSAND
    }

    /// Reduced to one turn before narrowing, so `f32` precision holds no
    /// matter how long the counter has been running.
    pub fn angle_radians(&self) -> f32 {
        (self.angle_degrees() % 360.0).to_radians() as f32
    }

    pub fn transforms(&self, aspect_ratio: f32) -> Transforms {
        Transforms {
            projection: Mat4::perspective_rh_gl(
                FIELD_OF_VIEW_DEGREES.to_radians(),
                aspect_ratio,
                Z_NEAR,
                Z_FAR,
            ),
            view: Mat4::look_at_rh(EYE, TARGET, UP),
            translation: Mat4::from_translation(CUBE_OFFSET),
            rotation: Mat4::from_rotation_y(self.angle_radians()),
        }
    }

    pub fn mvp(&self, aspect_ratio: f32) -> Mat4 {
        compose(&self.transforms(aspect_ratio).in_order())
    }
}
