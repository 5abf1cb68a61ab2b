use crate::{camera::Camera, math::Vec3, render::EntityId, transform::Transform};

/// One slot of the player table.
///
/// The slot index is the player's identity; an inactive slot keeps its last
/// state until the next `create_player`.
#[derive(Debug, Clone, Default)]
pub struct Player {
    pub(crate) active: bool,
    pub(crate) grounded: bool,
    /// Per-frame displacement.
    pub(crate) velocity: Vec3,
    pub(crate) transform: Transform,
    pub(crate) camera: Camera,
    pub(crate) entity: Option<EntityId>,
}

impl Player {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[inline]
    pub fn entity(&self) -> Option<EntityId> {
        self.entity
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }
}
