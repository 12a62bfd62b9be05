//! Local-space hitboxes and sockets.
//!
//! Everything here is authored in a frame's local pixel space with integer
//! coordinates. Scale, flip and world position are applied later by the
//! projector and never written back.

use serde::{Deserialize, Serialize};

/// Role of a hitbox within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum HitboxType {
    /// Deals damage to hurtboxes.
    #[default]
    Attack,
    /// Can receive damage.
    Hurtbox,
    /// Body/pushbox, ignored by hit detection.
    Collision,
}

impl HitboxType {
    /// All hitbox types, in declaration order.
    pub const ALL: [Self; 3] = [Self::Attack, Self::Hurtbox, Self::Collision];

    /// Display name of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Attack => "Attack",
            Self::Hurtbox => "Hurtbox",
            Self::Collision => "Collision",
        }
    }

    /// Parses a type name, ignoring case.
    ///
    /// Never fails: anything that is not "hurtbox" or "collision" is an
    /// attack box.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("hurtbox") {
            Self::Hurtbox
        } else if name.eq_ignore_ascii_case("collision") {
            Self::Collision
        } else {
            Self::Attack
        }
    }
}

impl std::fmt::Display for HitboxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for HitboxType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<String> for HitboxType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<HitboxType> for &'static str {
    fn from(ty: HitboxType) -> Self {
        ty.as_str()
    }
}

/// A typed rectangle in a frame's local space.
///
/// `damage` and `knockback` only mean something for [`HitboxType::Attack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hitbox {
    /// Role of this box
    #[serde(rename = "type")]
    pub hitbox_type: HitboxType,
    /// Local X of the top-left corner
    pub x: i32,
    /// Local Y of the top-left corner
    pub y: i32,
    /// Width, never negative
    pub width: i32,
    /// Height, never negative
    pub height: i32,
    /// Damage dealt on hit
    #[serde(default)]
    pub damage: i32,
    /// Knockback applied on hit
    #[serde(default)]
    pub knockback: i32,
}

impl Hitbox {
    /// Creates a hitbox with no combat values.
    #[must_use]
    pub const fn new(hitbox_type: HitboxType, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            hitbox_type,
            x,
            y,
            width,
            height,
            damage: 0,
            knockback: 0,
        }
    }

    /// Creates an attack box.
    #[must_use]
    pub const fn attack(x: i32, y: i32, width: i32, height: i32, damage: i32, knockback: i32) -> Self {
        Self {
            hitbox_type: HitboxType::Attack,
            x,
            y,
            width,
            height,
            damage,
            knockback,
        }
    }

    /// Creates a hurtbox.
    #[must_use]
    pub const fn hurtbox(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(HitboxType::Hurtbox, x, y, width, height)
    }

    /// Creates a collision box.
    #[must_use]
    pub const fn collision(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(HitboxType::Collision, x, y, width, height)
    }

    /// Sets the combat values.
    #[must_use]
    pub const fn with_combat(mut self, damage: i32, knockback: i32) -> Self {
        self.damage = damage;
        self.knockback = knockback;
        self
    }

    /// Checks if this box has the given type.
    #[must_use]
    pub fn is(&self, hitbox_type: HitboxType) -> bool {
        self.hitbox_type == hitbox_type
    }

    /// Checks if the box encloses no area.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// A named attachment point in a frame's local space.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Socket {
    /// Socket name, matched case-insensitively
    pub name: String,
    /// Local X
    pub x: i32,
    /// Local Y
    pub y: i32,
}

impl Socket {
    /// Creates a socket.
    #[must_use]
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Checks the socket name, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}
