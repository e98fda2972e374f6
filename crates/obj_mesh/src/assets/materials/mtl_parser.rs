//! MTL (Material Template Library) file parser
//!
//! Parses the parts of a Wavefront .mtl file that matter for flat vertex
//! colors: material declarations (`newmtl`) and diffuse colors (`Kd`).
//! Other directives are skipped.

use std::io::BufRead;

use thiserror::Error;

use crate::foundation::color::Color;

/// MTL parsing errors
///
/// `line` is 1-based.
#[derive(Error, Debug)]
pub enum MtlError {
    /// Reading the file failed part way
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric value could not be parsed
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// Line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A directive is malformed or out of place
    #[error("Invalid format on line {line}: {message}")]
    InvalidFormat {
        /// Line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// Parsed MTL material data
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Diffuse color (Kd), if the material declares one
    pub diffuse: Option<Color>,
}

impl MtlData {
    /// Material with no diffuse color yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            diffuse: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL text into material definitions, in declaration order
    pub fn parse_str(contents: &str) -> Result<Vec<MtlData>, MtlError> {
        Self::parse(contents.as_bytes())
    }

    /// Parse MTL lines from a reader into material definitions, in declaration order
    ///
    /// Duplicate names are kept; the table builder decides which one wins.
    pub fn parse<R: BufRead>(reader: R) -> Result<Vec<MtlData>, MtlError> {
        let mut materials = Vec::new();
        let mut current_material: Option<MtlData> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_num = index + 1;
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            match command {
                "newmtl" => {
                    if let Some(mat) = current_material.take() {
                        materials.push(mat);
                    }

                    let name = tokens.next().ok_or_else(|| MtlError::InvalidFormat {
                        line: line_num,
                        message: "newmtl missing material name".to_string(),
                    })?;
                    current_material = Some(MtlData::new(name));
                }

                "Kd" => {
                    let mat = current_material.as_mut().ok_or_else(|| MtlError::InvalidFormat {
                        line: line_num,
                        message: "Kd before any newmtl".to_string(),
                    })?;
                    mat.diffuse = Some(Self::parse_color(&mut tokens, line_num, "Kd")?);
                }

                // Ka, Ks, Ns, d, illum, map_* and friends carry nothing we use
                other => log::trace!("Line {}: ignoring MTL directive '{}'", line_num, other),
            }
        }

        if let Some(mat) = current_material {
            materials.push(mat);
        }

        Ok(materials)
    }

    /// Parse an RGB color from three tokens
    fn parse_color<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Color, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Color::new(r, g, b))
    }

    /// Parse a single finite f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, MtlError>
    where
        I: Iterator<Item = &'a str>,
    {
        let token = tokens.next().ok_or_else(|| MtlError::InvalidFormat {
            line: line_num,
            message: format!("{command} missing value"),
        })?;
        token
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| MtlError::ParseError {
                line: line_num,
                message: format!("{command} invalid float value '{token}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r#"
# Blender MTL File: 'earth_1111.blend'
# Material Count: 1

newmtl grass
Ns 96.078431
Ka 1.000000 1.000000 1.000000
Kd 0.000000 0.548000 0.078000
Ks 0.500000 0.500000 0.500000
d 1.000000
illum 2
"#;

        let materials = MtlParser::parse_str(mtl_content).unwrap();
        assert_eq!(materials.len(), 1);
        assert_eq!(materials[0].name, "grass");
        assert_eq!(materials[0].diffuse, Some(Color::new(0.0, 0.548, 0.078)));
    }

    #[test]
    fn test_parse_multiple_materials_in_order() {
        let mtl_content = r#"
newmtl earth
Kd 0.3 0.1 0.1

newmtl grass
Kd 0.0 1.0 0.0

newmtl bare
"#;

        let materials = MtlParser::parse_str(mtl_content).unwrap();
        let names: Vec<&str> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["earth", "grass", "bare"]);
        assert_eq!(materials[2].diffuse, None);
    }

    #[test]
    fn test_malformed_kd_is_fatal() {
        let err = MtlParser::parse_str("newmtl grass\nKd 0.1 oops 0.3\n").unwrap_err();
        assert!(matches!(err, MtlError::ParseError { line: 2, .. }));

        let err = MtlParser::parse_str("newmtl grass\nKd 0.1 0.2\n").unwrap_err();
        assert!(matches!(err, MtlError::InvalidFormat { line: 2, .. }));
    }

    #[test]
    fn test_kd_before_newmtl_is_fatal() {
        let err = MtlParser::parse_str("Kd 1 1 1\nnewmtl grass\n").unwrap_err();
        assert!(matches!(err, MtlError::InvalidFormat { line: 1, .. }));
    }

    #[test]
    fn test_newmtl_requires_name() {
        let err = MtlParser::parse_str("# header\nnewmtl\n").unwrap_err();
        assert!(matches!(err, MtlError::InvalidFormat { line: 2, .. }));
    }

    #[test]
    fn test_unknown_directives_ignored() {
        let materials = MtlParser::parse_str("newmtl stone\nmap_Kd stone.png\nTr 0.5\nKe 0 0 0\n").unwrap();
        assert_eq!(materials, vec![MtlData::new("stone")]);
    }
}
