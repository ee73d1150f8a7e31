//! Core types and traits for the Brushfire distance map.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! abstractions shared by every other crate in the workspace: the map
//! configuration and its validation errors, the polymorphic
//! [`DistanceField`] interface that collision and planning code consumes,
//! the [`PropagationObserver`] hook, and per-batch [`UpdateReport`]s.
//!
//! World-frame points are [`glam::DVec3`]; grid cells are [`glam::IVec3`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod field;
pub mod observer;
pub mod report;

pub use config::{cells_along, DistanceMapConfig};
pub use error::{Axis, ConfigError};
pub use field::DistanceField;
pub use observer::{NoopObserver, PropagationObserver};
pub use report::{CellChange, UpdateReport};

pub use glam::{DVec3, IVec3};
