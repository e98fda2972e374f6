//! Material libraries
//!
//! MTL files are parsed into [`MtlData`] definitions, which a [`ColorPolicy`]
//! then turns into the name → color [`MaterialTable`] used by the mesh builder.
//!
//! [`ColorPolicy`]: crate::core::ColorPolicy

pub mod mtl_parser;
pub mod material_table;

pub use mtl_parser::{MtlParser, MtlData, MtlError};
pub use material_table::MaterialTable;
