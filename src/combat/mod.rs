//! Melee combat
//!
//! Raw damage only: `defense` is carried on every entity but nothing here
//! subtracts it.

pub mod resolution;

pub use resolution::{
    apply_damage, probe_positions, resolve_attack, AttackReport, DamageOutcome, ProbeHit,
};
