//! Material name → color table

use std::collections::HashMap;

use crate::assets::{AssetSource, LoadError};
use crate::core::ColorPolicy;
use crate::foundation::color::Color;

use super::mtl_parser::{MtlData, MtlParser};

/// Colors for every material declared by one material library
///
/// A table lives for a single load and is replaced wholesale whenever the OBJ
/// file names another library.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    colors: HashMap<String, Color>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Open, parse and resolve a material library
    pub fn load(
        source: &dyn AssetSource,
        library: &str,
        policy: ColorPolicy,
    ) -> Result<Self, LoadError> {
        let reader = source.open(library)?;
        let definitions = MtlParser::parse(reader).map_err(|source| LoadError::Material {
            library: library.to_string(),
            source,
        })?;

        let table = Self::from_definitions(definitions, policy);
        log::debug!(
            "Loaded {} material(s) from '{}' ({:?})",
            table.len(),
            library,
            policy
        );
        Ok(table)
    }

    /// Resolve parsed definitions with `policy`
    ///
    /// Later definitions of the same name replace earlier ones.
    pub fn from_definitions<I>(definitions: I, policy: ColorPolicy) -> Self
    where
        I: IntoIterator<Item = MtlData>,
    {
        let mut table = Self::new();
        for definition in definitions {
            let color = Self::resolve(&definition, policy);
            if table.insert(definition.name.clone(), color).is_some() {
                log::warn!("Material '{}' declared more than once, keeping the last", definition.name);
            }
        }
        table
    }

    /// Color a single definition
    pub fn resolve(definition: &MtlData, policy: ColorPolicy) -> Color {
        match policy {
            ColorPolicy::NameOverride => Color::for_material_name(&definition.name),
            ColorPolicy::Diffuse => definition.diffuse.unwrap_or(Color::NEUTRAL_GRAY),
        }
    }

    /// Add or replace a material, returning the previous color
    pub fn insert(&mut self, name: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(name.into(), color)
    }

    /// Color of a material
    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    /// Whether a material is defined
    pub fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    /// Number of materials
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table has no materials
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Material names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.colors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetError, MemoryAssets};
    use crate::assets::materials::MtlError;

    const LIBRARY: &str = "\
newmtl grass
Kd 0.9 0.9 0.9
newmtl earth
Kd 0.1 0.2 0.3
newmtl water
Kd 0.0 0.0 1.0
";

    #[test]
    fn test_name_override_ignores_diffuse() {
        let assets = MemoryAssets::new().with_file("world.mtl", LIBRARY);
        let table = MaterialTable::load(&assets, "world.mtl", ColorPolicy::NameOverride).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("grass"), Some(Color::new(0.0, 140.0 / 255.0, 20.0 / 255.0)));
        assert_eq!(table.get("earth"), Some(Color::new(78.0 / 255.0, 32.0 / 255.0, 20.0 / 255.0)));
        assert_eq!(table.get("water"), Some(Color::new(0.5, 0.5, 0.5)));
        assert_eq!(table.get("lava"), None);
    }

    #[test]
    fn test_diffuse_policy_uses_kd() {
        let assets = MemoryAssets::new().with_file("world.mtl", LIBRARY);
        let table = MaterialTable::load(&assets, "world.mtl", ColorPolicy::Diffuse).unwrap();

        assert_eq!(table.get("grass"), Some(Color::new(0.9, 0.9, 0.9)));
        assert_eq!(table.get("water"), Some(Color::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_material_without_kd_is_registered() {
        let definitions = vec![MtlData::new("grass"), MtlData::new("plain")];

        let table = MaterialTable::from_definitions(definitions.clone(), ColorPolicy::NameOverride);
        assert_eq!(table.get("grass"), Some(Color::GRASS));
        assert_eq!(table.get("plain"), Some(Color::NEUTRAL_GRAY));

        let table = MaterialTable::from_definitions(definitions, ColorPolicy::Diffuse);
        assert_eq!(table.get("grass"), Some(Color::NEUTRAL_GRAY));
    }

    #[test]
    fn test_duplicate_definition_last_wins() {
        let mut first = MtlData::new("stone");
        first.diffuse = Some(Color::new(1.0, 0.0, 0.0));
        let mut second = MtlData::new("stone");
        second.diffuse = Some(Color::new(0.0, 1.0, 0.0));

        let table = MaterialTable::from_definitions([first, second], ColorPolicy::Diffuse);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("stone"), Some(Color::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_missing_library_is_fatal() {
        let assets = MemoryAssets::new();
        let err = MaterialTable::load(&assets, "missing.mtl", ColorPolicy::NameOverride).unwrap_err();
        assert!(matches!(err, LoadError::Asset(AssetError::NotFound(_))));
    }

    #[test]
    fn test_malformed_library_names_the_file() {
        let assets = MemoryAssets::new().with_file("bad.mtl", "newmtl grass\nKd x y z\n");
        let err = MaterialTable::load(&assets, "bad.mtl", ColorPolicy::NameOverride).unwrap_err();
        match err {
            LoadError::Material { library, source } => {
                assert_eq!(library, "bad.mtl");
                assert!(matches!(source, MtlError::ParseError { line: 2, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_names_sorted() {
        let table = MaterialTable::from_definitions(
            [MtlData::new("water"), MtlData::new("earth"), MtlData::new("grass")],
            ColorPolicy::NameOverride,
        );
        assert_eq!(table.names(), ["earth", "grass", "water"]);
    }
}
