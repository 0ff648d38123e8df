//! Focal length and gear statistics for a local photo folder.
//!
//! The pipeline is: [`library::load_library`] reads EXIF metadata from every
//! image, a [`filter::PhotoFilter`] narrows the set, and
//! [`stats::build_chart`] turns the remaining photos into labeled counts.

pub mod cli;
pub mod config;
pub mod filter;
pub mod library;
pub mod logging;
pub mod metadata;
pub mod photo;
pub mod report;
pub mod scanner;
pub mod serve;
pub mod stats;
