//! Static world fixtures

pub mod colliders;

pub use colliders::{Collider, ColliderLayout, Colliders, RoomSpec};
