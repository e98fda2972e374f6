//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the pipeline:
//! - Color values and the fixed material palette
//! - Math types and bounding volumes
//! - Logging utilities

pub mod color;
pub mod math;
pub mod logging;
