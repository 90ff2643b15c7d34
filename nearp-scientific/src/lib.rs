//! Scientific crate contains logic to read benchmark instances of arc routing problems and to write
//! their solutions.
//!
//!
//! # Supported formats
//!
//! - **nearp**: node, edge and arc routing instances with `ReN.`, `ReE.`, `EDGE`, `ReA.` and `ARC` sections
//! - **nearptp**: the same problem with turn penalties: `NODES`, `EDGES`, `ARCS` and `TURNS` tables

#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub(crate) mod helpers;

#[cfg(test)]
#[path = "../tests/integration/known_problems_test.rs"]
mod known_problems_test;

pub use nearp_core as core;

pub mod common;
pub mod nearp;
pub mod nearptp;
