//! Scene assembly
//!
//! Drives the OBJ record parser across a whole file and collects the vertex
//! store, the face list and the material table into a [`Scene`].

use std::io::BufRead;

use crate::assets::{AssetSource, LoadError, MaterialTable, ObjError, ObjLoader, ObjRecord};
use crate::core::ColorPolicy;

use super::{Face, Scene};

/// Builds a [`Scene`] from an OBJ file
///
/// Material libraries named by `mtllib` are opened through the same
/// [`AssetSource`] as the OBJ file itself.
pub struct SceneAssembler<'a> {
    source: &'a dyn AssetSource,
    color_policy: ColorPolicy,
}

impl<'a> SceneAssembler<'a> {
    /// Create an assembler reading from `source`
    pub fn new(source: &'a dyn AssetSource, color_policy: ColorPolicy) -> Self {
        Self { source, color_policy }
    }

    /// Open and read the OBJ asset `name`
    pub fn assemble(&self, name: &str) -> Result<Scene, LoadError> {
        let reader = self.source.open(name)?;
        self.assemble_reader(reader, name)
    }

    /// Read OBJ lines from `reader`
    ///
    /// `file` names the input in error messages.
    pub fn assemble_reader<R: BufRead>(&self, reader: R, file: &str) -> Result<Scene, LoadError> {
        let obj_error = |source: ObjError| LoadError::Obj {
            file: file.to_string(),
            source,
        };

        let mut scene = Scene::new();
        let mut current_material: Option<String> = None;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| obj_error(ObjError::Io(e)))?;
            let line_num = index + 1;

            match ObjLoader::parse_line(&line, line_num).map_err(obj_error)? {
                ObjRecord::Comment => {}
                ObjRecord::Ignored(command) => {
                    log::trace!("{}:{}: ignoring '{}'", file, line_num, command);
                }
                ObjRecord::MaterialLibrary(library) => {
                    scene.materials = MaterialTable::load(self.source, library, self.color_policy)?;
                    scene.material_libraries.push(library.to_string());
                }
                ObjRecord::Vertex(position) => scene.vertices.push(position),
                ObjRecord::UseMaterial(name) => current_material = Some(name.to_string()),
                ObjRecord::Face(corners) => {
                    scene.faces.push(Face::new(corners, current_material.clone()));
                }
            }
        }

        log::info!(
            "Assembled '{}': {} vertices, {} faces, {} materials",
            file,
            scene.vertex_count(),
            scene.face_count(),
            scene.materials.len()
        );
        Ok(scene)
    }
}
