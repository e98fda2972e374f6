//! OBJ record parser
//!
//! Turns single lines of a Wavefront OBJ file into typed [`ObjRecord`]s. Only
//! the subset needed for flat-colored triangle meshes is understood: vertex
//! positions, triangular faces, `usemtl` and `mtllib`. Every other directive
//! is reported as [`ObjRecord::Ignored`] so newer files still load.

use thiserror::Error;

use crate::scene::Position;

/// OBJ parsing errors
///
/// `line` is 1-based.
#[derive(Error, Debug)]
pub enum ObjError {
    /// Reading the file failed part way
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A numeric field could not be parsed
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// Line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// A directive has the wrong shape
    #[error("Invalid format on line {line}: {message}")]
    InvalidFormat {
        /// Line number
        line: usize,
        /// What went wrong
        message: String,
    },
}

/// One classified OBJ line
#[derive(Debug, Clone, PartialEq)]
pub enum ObjRecord<'a> {
    /// Blank line or `#` comment
    Comment,
    /// `mtllib <file>`
    MaterialLibrary(&'a str),
    /// `v <x> <y> <z>`
    Vertex(Position),
    /// `usemtl <name>`
    UseMaterial(&'a str),
    /// `f <a> <b> <c>` with 0-based vertex indices
    Face([u32; 3]),
    /// Any directive this loader does not use, e.g. `vn`, `vt`, `o`, `s`
    Ignored(&'a str),
}

/// OBJ line parser
pub struct ObjLoader;

impl ObjLoader {
    /// Classify one line and extract its fields
    ///
    /// `line_num` is 1-based and only used for error messages.
    pub fn parse_line(line: &str, line_num: usize) -> Result<ObjRecord<'_>, ObjError> {
        // Drop trailing comments before tokenizing
        let data = line.split('#').next().unwrap_or_default().trim();
        if data.is_empty() {
            return Ok(ObjRecord::Comment);
        }

        let mut tokens = data.split_whitespace();
        let Some(command) = tokens.next() else {
            return Ok(ObjRecord::Comment);
        };

        match command {
            "v" => Self::parse_position(&mut tokens, line_num).map(ObjRecord::Vertex),
            "f" => Self::parse_face(tokens, line_num).map(ObjRecord::Face),
            "usemtl" => Self::parse_name(&mut tokens, line_num, "usemtl").map(ObjRecord::UseMaterial),
            "mtllib" => {
                let library = Self::parse_name(&mut tokens, line_num, "mtllib")?;
                let extra: Vec<&str> = tokens.collect();
                if !extra.is_empty() {
                    log::warn!(
                        "Line {}: only the first material library is used, ignoring {:?}",
                        line_num,
                        extra
                    );
                }
                Ok(ObjRecord::MaterialLibrary(library))
            }
            other => Ok(ObjRecord::Ignored(other)),
        }
    }

    /// Parse the three coordinates of a `v` line
    ///
    /// A trailing homogeneous `w` component is accepted and ignored.
    fn parse_position<'a, I>(tokens: &mut I, line_num: usize) -> Result<Position, ObjError>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut coords = [0.0_f32; 3];
        for (axis, coord) in ["x", "y", "z"].iter().zip(coords.iter_mut()) {
            let token = tokens.next().ok_or_else(|| ObjError::InvalidFormat {
                line: line_num,
                message: format!("vertex missing {axis} coordinate"),
            })?;
            *coord = Self::parse_f32(token, line_num, axis)?;
        }
        Ok(Position::from(coords))
    }

    /// Parse the corners of an `f` line into 0-based indices
    fn parse_face<'a, I>(tokens: I, line_num: usize) -> Result<[u32; 3], ObjError>
    where
        I: Iterator<Item = &'a str>,
    {
        let corners = tokens
            .map(|token| Self::parse_corner(token, line_num))
            .collect::<Result<Vec<_>, _>>()?;

        <[u32; 3]>::try_from(corners).map_err(|corners| ObjError::InvalidFormat {
            line: line_num,
            message: format!("face must have exactly 3 corners, found {}", corners.len()),
        })
    }

    /// Parse one face corner (`i`, `i/t`, `i//n` or `i/t/n`)
    ///
    /// Only the geometric index is read. OBJ indices are 1-based.
    pub fn parse_corner(token: &str, line_num: usize) -> Result<u32, ObjError> {
        let index_str = token.split('/').next().unwrap_or_default();
        let index: u32 = index_str.parse().map_err(|_| ObjError::ParseError {
            line: line_num,
            message: format!("invalid vertex index '{index_str}' in corner '{token}' (relative indices are not supported)"),
        })?;

        index.checked_sub(1).ok_or_else(|| ObjError::InvalidFormat {
            line: line_num,
            message: format!("vertex index 0 in corner '{token}', OBJ indices start at 1"),
        })
    }

    /// Parse the single name argument of `usemtl` / `mtllib`
    fn parse_name<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<&'a str, ObjError>
    where
        I: Iterator<Item = &'a str>,
    {
        tokens.next().ok_or_else(|| ObjError::InvalidFormat {
            line: line_num,
            message: format!("{command} missing name"),
        })
    }

    fn parse_f32(token: &str, line_num: usize, axis: &str) -> Result<f32, ObjError> {
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ObjError::ParseError {
                line: line_num,
                message: format!("invalid vertex {axis} '{token}'"),
            }),
        }
    }
}
