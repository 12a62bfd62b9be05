//! Frame and animation containers.
//!
//! Frames and animations are plain values. Once the import layer has built
//! them they are read-only inputs to projection and hit detection. Name
//! lookups are linear scans, case-insensitive, first match wins, so
//! duplicate names resolve to the earliest entry in source order.

use serde::{Deserialize, Serialize};

use crate::hitbox::{Hitbox, HitboxType, Socket};

/// One keyframe's hitboxes and sockets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Frame name (unique names expected, not enforced)
    pub name: String,
    /// Boxes in authoring order
    #[serde(default)]
    pub hitboxes: Vec<Hitbox>,
    /// Sockets in authoring order
    #[serde(default)]
    pub sockets: Vec<Socket>,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hitboxes: Vec::new(),
            sockets: Vec::new(),
        }
    }

    /// Adds a hitbox.
    #[must_use]
    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitboxes.push(hitbox);
        self
    }

    /// Adds a socket.
    #[must_use]
    pub fn with_socket(mut self, socket: Socket) -> Self {
        self.sockets.push(socket);
        self
    }

    /// Iterates over the boxes of one type, in authoring order.
    pub fn hitboxes_of_type(&self, hitbox_type: HitboxType) -> impl Iterator<Item = &Hitbox> + '_ {
        self.hitboxes.iter().filter(move |h| h.is(hitbox_type))
    }

    /// Copies out the boxes of one type, in authoring order.
    #[must_use]
    pub fn collect_hitboxes_of_type(&self, hitbox_type: HitboxType) -> Vec<Hitbox> {
        self.hitboxes_of_type(hitbox_type).copied().collect()
    }

    /// All attack boxes.
    #[must_use]
    pub fn attack_hitboxes(&self) -> Vec<Hitbox> {
        self.collect_hitboxes_of_type(HitboxType::Attack)
    }

    /// All hurtboxes.
    #[must_use]
    pub fn hurtboxes(&self) -> Vec<Hitbox> {
        self.collect_hitboxes_of_type(HitboxType::Hurtbox)
    }

    /// All collision boxes.
    #[must_use]
    pub fn collision_boxes(&self) -> Vec<Hitbox> {
        self.collect_hitboxes_of_type(HitboxType::Collision)
    }

    /// Checks if any box has the given type.
    #[must_use]
    pub fn has_type(&self, hitbox_type: HitboxType) -> bool {
        self.hitboxes.iter().any(|h| h.is(hitbox_type))
    }

    /// Checks if the frame can hit anything.
    #[must_use]
    pub fn has_attack_hitboxes(&self) -> bool {
        self.has_type(HitboxType::Attack)
    }

    /// Checks if the frame can be hit.
    #[must_use]
    pub fn has_hurtboxes(&self) -> bool {
        self.has_type(HitboxType::Hurtbox)
    }

    /// Checks if the frame carries any boxes or sockets at all.
    #[must_use]
    pub fn has_any_data(&self) -> bool {
        !self.hitboxes.is_empty() || !self.sockets.is_empty()
    }

    /// Finds a socket by name, ignoring case.
    #[must_use]
    pub fn find_socket(&self, name: &str) -> Option<&Socket> {
        self.sockets.iter().find(|s| s.is_named(name))
    }
}

/// Opaque reference to the sprite sequence an animation was authored against.
///
/// Only identity matters: the core carries it but never resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteRef(String);

impl SpriteRef {
    /// Creates a reference from a resource path or name.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SpriteRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, ordered sequence of frames.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Animation {
    /// Animation name
    pub name: String,
    /// Linked sprite sequence, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<SpriteRef>,
    /// Frames in playback order
    #[serde(default)]
    pub frames: Vec<Frame>,
}

impl Animation {
    /// Creates an empty animation.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sprite: None,
            frames: Vec::new(),
        }
    }

    /// Sets the linked sprite sequence.
    #[must_use]
    pub fn with_sprite(mut self, sprite: SpriteRef) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Adds a frame.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Gets a frame by index.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Gets a frame by name, ignoring case.
    #[must_use]
    pub fn frame_by_name(&self, name: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Checks the animation name, ignoring case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_frame() -> Frame {
        Frame::new("punch_2")
            .with_hitbox(Hitbox::hurtbox(0, 0, 20, 40))
            .with_hitbox(Hitbox::attack(20, 10, 15, 8, 12, 4))
            .with_hitbox(Hitbox::collision(2, 0, 16, 40))
            .with_hitbox(Hitbox::attack(30, 5, 5, 5, 3, 1))
            .with_socket(Socket::new("fist", 34, 14))
    }

    #[test]
    fn test_hitboxes_of_type_preserves_order() {
        let frame = mixed_frame();
        let attacks = frame.attack_hitboxes();
        assert_eq!(attacks.len(), 2);
        assert_eq!(attacks[0].damage, 12);
        assert_eq!(attacks[1].damage, 3);

        assert_eq!(frame.hurtboxes().len(), 1);
        assert_eq!(frame.collision_boxes().len(), 1);
        assert_eq!(frame.hitboxes_of_type(HitboxType::Hurtbox).count(), 1);
    }

    #[test]
    fn test_has_type() {
        let frame = mixed_frame();
        assert!(frame.has_attack_hitboxes());
        assert!(frame.has_hurtboxes());
        assert!(frame.has_type(HitboxType::Collision));

        let idle = Frame::new("idle").with_hitbox(Hitbox::hurtbox(0, 0, 10, 10));
        assert!(!idle.has_attack_hitboxes());
        assert!(idle.attack_hitboxes().is_empty());
    }

    #[test]
    fn test_has_any_data() {
        assert!(!Frame::new("blank").has_any_data());
        assert!(Frame::new("s").with_socket(Socket::new("a", 0, 0)).has_any_data());
        assert!(Frame::new("h").with_hitbox(Hitbox::hurtbox(0, 0, 1, 1)).has_any_data());
    }

    #[test]
    fn test_find_socket_first_match_ignoring_case() {
        let frame = Frame::new("f")
            .with_socket(Socket::new("Muzzle", 1, 1))
            .with_socket(Socket::new("muzzle", 2, 2));

        let socket = frame.find_socket("MUZZLE").unwrap();
        assert_eq!((socket.x, socket.y), (1, 1));
        assert!(frame.find_socket("grip").is_none());
    }

    #[test]
    fn test_animation_frame_lookup() {
        let anim = Animation::new("Jab")
            .with_frame(Frame::new("startup"))
            .with_frame(mixed_frame())
            .with_frame(Frame::new("Startup").with_socket(Socket::new("x", 0, 0)));

        assert_eq!(anim.frame_count(), 3);
        assert_eq!(anim.frame(1).unwrap().name, "punch_2");
        assert!(anim.frame(3).is_none());

        // first match wins on duplicate names
        let startup = anim.frame_by_name("STARTUP").unwrap();
        assert!(!startup.has_any_data());
        assert!(anim.frame_by_name("recovery").is_none());
        assert!(anim.is_named("jab"));
    }

    #[test]
    fn test_sprite_ref_is_opaque() {
        let anim = Animation::new("Walk").with_sprite(SpriteRef::new("/Game/Hero/FB_Walk"));
        assert_eq!(anim.sprite.as_ref().map(SpriteRef::as_str), Some("/Game/Hero/FB_Walk"));
        assert_eq!(anim.sprite.unwrap().to_string(), "/Game/Hero/FB_Walk");
    }

    #[test]
    fn test_frame_serde_defaults() {
        let frame: Frame = serde_json::from_str(r#"{ "name": "empty" }"#).unwrap();
        assert!(frame.hitboxes.is_empty());
        assert!(frame.sockets.is_empty());

        let json = serde_json::to_string(&mixed_frame()).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mixed_frame());
    }
}
