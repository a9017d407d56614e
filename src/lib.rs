//! Capacitive force-grid touch clustering.
//!
//! One detection samples every cell of the grid through a [`ForceSensor`],
//! groups activated cells into clusters, ranks them by force and reports the
//! strongest ones as touches with an 8.8 fixed-point centroid. Force from
//! every cluster that did not make the cut is folded into an overflow slot.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod cluster;
pub mod config;
pub mod detector;
pub mod rank;
pub mod report;
pub mod sensor;

pub use cluster::{Cluster, ClusterMode, Window};
pub use config::{ConfigError, GridConfig};
pub use detector::TouchDetector;
pub use report::{Touch, TouchReport};
pub use sensor::{ForceGrid, ForceSensor};
