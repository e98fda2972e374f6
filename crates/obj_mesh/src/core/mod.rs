//! # Core Module
//!
//! Shared configuration types used by the loader and by applications that
//! consume its buffers.

pub mod config;

pub use config::{
    ApplicationConfig,
    AssetConfig,
    ColorPolicy,
    EngineConfig,
    ViewerConfig,
};
