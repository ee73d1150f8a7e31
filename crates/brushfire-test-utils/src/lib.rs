//! Test utilities for Brushfire development.
//!
//! - [`ReferenceDistanceMap`]: brute-force [`DistanceField`] oracle.
//! - [`RecordingObserver`]: captures propagation callbacks.
//! - [`fixtures`]: unit-resolution configs, seeded obstacle clouds, and
//!   field comparison.
//!
//! [`DistanceField`]: brushfire_core::DistanceField

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod observer;
pub mod reference;

pub use observer::RecordingObserver;
pub use reference::ReferenceDistanceMap;
