//! Inputs the simulation consumes but does not own.
//!
//! - [`Mulberry32`]: the seeded generator every random decision flows through
//! - [`ItemCatalog`]: read-only item definitions, supplied by content packs
//! - [`EnemySpawner`]: injected population strategy for newly visited levels
mod items;
mod rng;
mod spawner;

pub use items::{ItemCatalog, ItemDefinition, ItemId, ItemKind, StatModifier};
pub use rng::{Mulberry32, advance_seed};
pub use spawner::{EnemySpawner, StatSpawner};
