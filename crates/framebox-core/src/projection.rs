//! Local-to-world projection.
//!
//! Every box and socket goes through the same pipeline: uniform scale, then
//! an optional horizontal mirror about the local origin, then translation by
//! the owner's world position. Nothing here mutates the stored local data.
//!
//! The 3D variants serve 2D-in-3D scenes where X is horizontal and Z is up;
//! the Y (depth) axis plays no part in hit detection.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::Box2D;
use crate::hitbox::{Hitbox, Socket};

/// Where and how a frame is placed in the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Owner's world position
    pub position: Vec2,
    /// Facing left (mirror horizontally)
    pub flip_x: bool,
    /// Uniform scale, expected finite and usually > 0
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            flip_x: false,
            scale: 1.0,
        }
    }
}

impl Placement {
    /// Creates an unflipped, unscaled placement at a position.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self {
            position,
            flip_x: false,
            scale: 1.0,
        }
    }

    /// Creates a placement from all three inputs.
    #[must_use]
    pub const fn new(position: Vec2, flip_x: bool, scale: f32) -> Self {
        Self {
            position,
            flip_x,
            scale,
        }
    }

    /// Sets the flip flag.
    #[must_use]
    pub const fn with_flip(mut self, flip_x: bool) -> Self {
        self.flip_x = flip_x;
        self
    }

    /// Sets the scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }
}

/// Placement with a 3D world position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement3D {
    /// Owner's world position
    pub position: Vec3,
    /// Facing left (mirror horizontally)
    pub flip_x: bool,
    /// Uniform scale
    pub scale: f32,
}

impl Default for Placement3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            flip_x: false,
            scale: 1.0,
        }
    }
}

impl Placement3D {
    /// Creates a placement from all three inputs.
    #[must_use]
    pub const fn new(position: Vec3, flip_x: bool, scale: f32) -> Self {
        Self {
            position,
            flip_x,
            scale,
        }
    }

    /// Drops the depth axis: X stays horizontal, Z becomes vertical.
    #[must_use]
    pub fn to_2d(self) -> Placement {
        Placement {
            position: Vec2::new(self.position.x, self.position.z),
            flip_x: self.flip_x,
            scale: self.scale,
        }
    }
}

impl From<Placement3D> for Placement {
    fn from(placement: Placement3D) -> Self {
        placement.to_2d()
    }
}

/// Projects a hitbox into world space.
#[must_use]
pub fn project_hitbox(hitbox: &Hitbox, placement: Placement) -> Box2D {
    let scale = placement.scale;
    let mut x = hitbox.x as f32 * scale;
    let y = hitbox.y as f32 * scale;
    let w = hitbox.width as f32 * scale;
    let h = hitbox.height as f32 * scale;

    if placement.flip_x {
        // mirror about the local origin; the trailing edge becomes -x
        x = -(x + w);
    }

    let min = placement.position + Vec2::new(x, y);
    Box2D::new(min, min + Vec2::new(w, h))
}

/// Projects a hitbox using a 3D world position (X and Z).
#[must_use]
pub fn project_hitbox_3d(hitbox: &Hitbox, placement: Placement3D) -> Box2D {
    project_hitbox(hitbox, placement.to_2d())
}

/// Projects a socket into world space.
#[must_use]
pub fn project_socket(socket: &Socket, placement: Placement) -> Vec2 {
    let mut x = socket.x as f32 * placement.scale;
    let y = socket.y as f32 * placement.scale;

    if placement.flip_x {
        x = -x;
    }

    placement.position + Vec2::new(x, y)
}

/// Projects a socket using a 3D world position.
///
/// The result keeps the world position's Y untouched and puts the projected
/// 2D point into X and Z.
#[must_use]
pub fn project_socket_3d(socket: &Socket, placement: Placement3D) -> Vec3 {
    let point = project_socket(socket, placement.to_2d());
    Vec3::new(point.x, placement.position.y, point.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_projection() {
        let hitbox = Hitbox::hurtbox(3, -7, 12, 20);
        let world = project_hitbox(&hitbox, Placement::default());
        assert_eq!(world.min, Vec2::new(3.0, -7.0));
        assert_eq!(world.max, Vec2::new(15.0, 13.0));
    }

    #[test]
    fn test_translation() {
        let hitbox = Hitbox::hurtbox(5, 5, 10, 10);
        let world = project_hitbox(&hitbox, Placement::at(Vec2::new(100.0, 50.0)));
        assert_eq!(world.min, Vec2::new(105.0, 55.0));
        assert_eq!(world.max, Vec2::new(115.0, 65.0));
    }

    #[test]
    fn test_flip_mirrors_about_origin() {
        let hitbox = Hitbox::attack(0, 0, 10, 5, 1, 1);
        let placement = Placement::at(Vec2::new(100.0, 0.0)).with_flip(true);
        let world = project_hitbox(&hitbox, placement);
        assert_eq!(world.min, Vec2::new(90.0, 0.0));
        assert_eq!(world.max, Vec2::new(100.0, 5.0));
    }

    #[test]
    fn test_flip_offset_box() {
        // local x = 20..35 becomes -35..-20
        let hitbox = Hitbox::attack(20, 10, 15, 8, 0, 0);
        let world = project_hitbox(&hitbox, Placement::default().with_flip(true));
        assert_eq!(world.min, Vec2::new(-35.0, 10.0));
        assert_eq!(world.max, Vec2::new(-20.0, 18.0));
    }

    #[test]
    fn test_scale_applies_to_position_and_extent() {
        let hitbox = Hitbox::hurtbox(2, 4, 10, 6);
        let placement = Placement::new(Vec2::new(1.0, 1.0), false, 2.0);
        let world = project_hitbox(&hitbox, placement);
        assert_eq!(world.min, Vec2::new(5.0, 9.0));
        assert_eq!(world.max, Vec2::new(25.0, 21.0));
    }

    #[test]
    fn test_scale_then_flip() {
        let hitbox = Hitbox::hurtbox(2, 0, 10, 6);
        let placement = Placement::new(Vec2::ZERO, true, 2.0);
        let world = project_hitbox(&hitbox, placement);
        assert_eq!(world.min, Vec2::new(-24.0, 0.0));
        assert_eq!(world.max, Vec2::new(-4.0, 12.0));
    }

    #[test]
    fn test_zero_scale_collapses_to_point() {
        let hitbox = Hitbox::hurtbox(5, 5, 10, 10);
        let world = project_hitbox(&hitbox, Placement::new(Vec2::new(7.0, 8.0), false, 0.0));
        assert_eq!(world.min, Vec2::new(7.0, 8.0));
        assert_eq!(world.max, Vec2::new(7.0, 8.0));
        assert!(!world.intersects(&world));
    }

    #[test]
    fn test_hitbox_3d_uses_x_and_z() {
        let hitbox = Hitbox::hurtbox(0, 0, 10, 10);
        let placement = Placement3D::new(Vec3::new(10.0, 999.0, 20.0), false, 1.0);
        let world = project_hitbox_3d(&hitbox, placement);
        assert_eq!(world.min, Vec2::new(10.0, 20.0));
        assert_eq!(world.max, Vec2::new(20.0, 30.0));
    }

    #[test]
    fn test_socket_projection() {
        let socket = Socket::new("hand", 6, -3);
        let plain = project_socket(&socket, Placement::at(Vec2::new(10.0, 10.0)));
        assert_eq!(plain, Vec2::new(16.0, 7.0));

        // a point has no width term when mirrored
        let flipped = project_socket(&socket, Placement::new(Vec2::new(10.0, 10.0), true, 2.0));
        assert_eq!(flipped, Vec2::new(-2.0, 4.0));
    }

    #[test]
    fn test_socket_3d_keeps_depth() {
        let socket = Socket::new("hand", 6, -3);
        let placement = Placement3D::new(Vec3::new(10.0, -42.5, 10.0), true, 1.0);
        let world = project_socket_3d(&socket, placement);
        assert_eq!(world, Vec3::new(4.0, -42.5, 7.0));
    }

    #[test]
    fn test_projection_leaves_local_data_alone() {
        let hitbox = Hitbox::attack(1, 2, 3, 4, 5, 6);
        let before = hitbox;
        let _ = project_hitbox(&hitbox, Placement::new(Vec2::new(9.0, 9.0), true, 3.0));
        assert_eq!(hitbox, before);
    }
}
