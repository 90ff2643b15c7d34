//! A crate with command line extensions for the NEARP formulation solver: configuration file,
//! instance formats and instance statistics.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod extensions;
