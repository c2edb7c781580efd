//! # tensegrity-blueprint
//!
//! An engine-agnostic structure builder for tensegrity robots. Describe an
//! assembly as tagged [`Node`]s and tagged [`Pair`]s in a [`Structure`], either
//! from a JSON [`Description`] or in code, optionally [`replicate`] a unit into a
//! chain of segments, and realize it against a [`BuildSpec`] into rods and
//! cable actuators held by a [`TensegrityModel`].
//!
//! Builders are chosen by tag: a pair tagged `"inner left muscle"` is built by
//! the most specific registered builder whose tags it contains, e.g.
//! `"left muscle"` over `"muscle"`. The same token-subset rule drives
//! [`TensegrityModel::find`] and the [`ComponentLocator`].

pub mod component;
pub mod config;
pub mod description;
pub mod error;
pub mod locator;
pub mod model;
pub mod node;
pub mod presets;
pub mod realizer;
pub mod registry;
pub mod replicate;
pub mod structure;
pub mod tags;
pub mod world;

pub use component::*;
pub use config::*;
pub use description::Description;
pub use error::{Result, StructureError};
pub use locator::*;
pub use model::*;
pub use node::*;
pub use realizer::*;
pub use registry::*;
pub use replicate::*;
pub use structure::*;
pub use tags::*;
pub use world::*;
