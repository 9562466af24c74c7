//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only from the string hash, never from time or OS entropy
//! - Stable iteration order (generation order of each collection)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hash;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, rectangles_overlap};
pub use hash::{StringHash, fingerprint, hash, unit};
pub use state::{Alien, Bullet, Player, Shield, Shooter, World};
pub use tick::{PIPELINE, Stage, TickInput, transition};
