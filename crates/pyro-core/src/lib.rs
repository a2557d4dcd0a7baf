//! Pyro Core - Foundational types for the Pyro firework simulator
//!
//! This crate provides the types every other Pyro crate depends on:
//! - `InstanceId` - Stable effect-instance identifiers
//! - `ContentHash` - SHA-256 seed derivation
//! - `Vec3`, `Color` - Spatial and colour types
//! - `EffectKind`, `EffectInstance` - The effect catalog and placed instances
//! - Error types and Result alias

mod effect;
mod error;
mod hash;
mod id;
mod types;

pub use effect::{
    authentic, clamp_position, EffectInstance, EffectKind, EffectPreset, ShellProfile, ShellSize,
    ShellSpec, Strategy, TierScale, STAGE_BOUNDS,
};
pub use error::{PyroError, Result};
pub use hash::ContentHash;
pub use id::InstanceId;
pub use types::{Color, Vec3};
