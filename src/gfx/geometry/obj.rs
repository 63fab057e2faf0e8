//! # OBJ Geometry Import
//!
//! Reads the line-oriented OBJ geometry format into a flat, triangle-expanded
//! vertex stream. Every face reference is expanded on its own: no vertex is
//! shared between faces and nothing is deduplicated.
//!
//! Recognized records:
//!
//! - `v x y z` - position
//! - `vn x y z` - normal
//! - `vt u v` - texture coordinate, stored as `(u, 1.0 - v)`
//! - `f a b c ...` - face, each reference `pos[/tex][/norm]` with 1-based indices
//! - `mtllib file` - companion material library
//!
//! Anything else is skipped. A reference whose index is missing, malformed
//! or out of range yields a zero attribute for that vertex; the import keeps
//! going and only counts it in [`ImportStats::unresolved_references`].

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    error::{ImportError, ImportResult},
    gfx::scene::{object::Mesh, vertex::Vertex},
};

/// One slot of a face reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexSlot {
    /// Slot omitted (`1//3`) or not written at all (`1`).
    #[default]
    Absent,
    /// 1-based index as written in the file. May still be out of range.
    Index(i64),
    /// Slot present but not an integer.
    Invalid,
}

impl IndexSlot {
    fn parse(token: Option<&str>) -> Self {
        match token {
            None | Some("") => IndexSlot::Absent,
            Some(text) => text
                .parse::<i64>()
                .map(IndexSlot::Index)
                .unwrap_or(IndexSlot::Invalid),
        }
    }

    /// Resolves the slot against a table, `None` when it cannot be resolved.
    fn lookup<T: Copy>(self, table: &[T]) -> Option<T> {
        match self {
            IndexSlot::Index(index) if index >= 1 => table.get((index - 1) as usize).copied(),
            _ => None,
        }
    }
}

/// A single `pos[/tex][/norm]` vertex reference of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceRef {
    pub position: IndexSlot,
    pub tex_coord: IndexSlot,
    pub normal: IndexSlot,
}

impl FaceRef {
    /// Parses one reference token such as `3`, `3/1`, `3//2` or `3/1/2`.
    pub fn parse(token: &str) -> Self {
        let mut parts = token.split('/');
        Self {
            position: IndexSlot::parse(parts.next()),
            tex_coord: IndexSlot::parse(parts.next()),
            normal: IndexSlot::parse(parts.next()),
        }
    }
}

/// A triangle: three references in winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRecord {
    pub refs: [FaceRef; 3],
}

impl FaceRecord {
    /// Parses the references of an `f` line (without the `f` keyword).
    ///
    /// Polygons with more than three references are fan-triangulated. Lines
    /// with fewer than three references produce no triangles.
    pub fn parse_line(rest: &str) -> Vec<FaceRecord> {
        let refs: Vec<FaceRef> = rest.split_whitespace().map(FaceRef::parse).collect();
        if refs.len() < 3 {
            return Vec::new();
        }

        (1..refs.len() - 1)
            .map(|i| FaceRecord {
                refs: [refs[0], refs[i], refs[i + 1]],
            })
            .collect()
    }
}

/// Counters gathered during an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub positions: usize,
    pub normals: usize,
    pub tex_coords: usize,
    /// Number of `f` lines that produced at least one triangle.
    pub faces: usize,
    pub triangles: usize,
    /// Written sub-indices that were malformed or out of range, plus
    /// references without a usable position.
    pub unresolved_references: usize,
}

/// Result of importing an OBJ file.
#[derive(Debug, Clone, Default)]
pub struct ObjMesh {
    vertices: Vec<Vertex>,
    material_library: Option<String>,
    source_dir: Option<PathBuf>,
    stats: ImportStats,
}

impl ObjMesh {
    /// The expanded vertex stream, three vertices per triangle in file order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Index buffer for indexed draws: `0..vertex_count`, never deduplicated.
    pub fn indices(&self) -> Vec<u32> {
        (0..self.vertices.len() as u32).collect()
    }

    pub fn stats(&self) -> ImportStats {
        self.stats
    }

    /// Material library named by `mtllib`, as written in the file.
    pub fn material_library(&self) -> Option<&str> {
        self.material_library.as_deref()
    }

    /// Material library path resolved next to the OBJ file it came from.
    pub fn material_path(&self) -> Option<PathBuf> {
        let library = self.material_library.as_ref()?;
        Some(match &self.source_dir {
            Some(dir) => dir.join(library),
            None => PathBuf::from(library),
        })
    }

    /// Converts into the renderer-facing mesh.
    pub fn into_mesh(self) -> Mesh {
        Mesh::new(self.vertices)
    }
}

#[derive(Default)]
struct ObjTables {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
}

/// Parses up to `N` floats; missing or malformed components are `0.0`.
fn parse_floats<const N: usize>(rest: &str) -> [f32; N] {
    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(rest.split_whitespace()) {
        *value = token.parse().unwrap_or(0.0);
    }
    values
}

/// Parses OBJ text from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> std::io::Result<ObjMesh> {
    let mut tables = ObjTables::default();
    let mut mesh = ObjMesh::default();

    // Decoded lossily: stray non-UTF-8 bytes in comments or names are not errors
    for line in reader.split(b'\n') {
        let line = line?;
        let line = String::from_utf8_lossy(&line);
        let line = line.trim();
        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match keyword {
            "v" => tables.positions.push(parse_floats::<3>(rest)),
            "vn" => tables.normals.push(parse_floats::<3>(rest)),
            "vt" => {
                let [u, v] = parse_floats::<2>(rest);
                tables.tex_coords.push([u, 1.0 - v]);
            }
            "f" => {
                let triangles = FaceRecord::parse_line(rest);
                if triangles.is_empty() {
                    debug!("Skipping face with fewer than three references: {:?}", line);
                    continue;
                }
                mesh.stats.faces += 1;
                for triangle in triangles {
                    for face_ref in triangle.refs {
                        let vertex = resolve(&tables, face_ref, &mut mesh.stats);
                        mesh.vertices.push(vertex);
                    }
                    mesh.stats.triangles += 1;
                }
            }
            "mtllib" => {
                let library = rest.trim();
                if !library.is_empty() {
                    mesh.material_library = Some(library.to_string());
                }
            }
            _ => (),
        }
    }

    mesh.stats.positions = tables.positions.len();
    mesh.stats.normals = tables.normals.len();
    mesh.stats.tex_coords = tables.tex_coords.len();

    if mesh.stats.unresolved_references > 0 {
        debug!(
            "{} face references could not be resolved and were zeroed",
            mesh.stats.unresolved_references
        );
    }

    Ok(mesh)
}

fn resolve(tables: &ObjTables, face_ref: FaceRef, stats: &mut ImportStats) -> Vertex {
    let mut unresolved = false;

    let position = face_ref.position.lookup(&tables.positions);
    unresolved |= position.is_none();

    let tex_coord = face_ref.tex_coord.lookup(&tables.tex_coords);
    unresolved |= tex_coord.is_none() && face_ref.tex_coord != IndexSlot::Absent;

    let normal = face_ref.normal.lookup(&tables.normals);
    unresolved |= normal.is_none() && face_ref.normal != IndexSlot::Absent;

    if unresolved {
        stats.unresolved_references += 1;
    }

    Vertex {
        position: position.unwrap_or_default(),
        normal: normal.unwrap_or_default(),
        tex_coord: tex_coord.unwrap_or_default(),
    }
}

/// Loads an OBJ file from disk.
pub fn load_obj(path: impl AsRef<Path>) -> ImportResult<ObjMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut mesh = parse_obj(BufReader::new(file)).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    mesh.source_dir = path.parent().map(Path::to_path_buf);

    debug!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.stats.triangles
    );
    Ok(mesh)
}

/// Loads an OBJ file, falling back to an empty mesh when it cannot be read.
pub fn load_obj_or_empty(path: impl AsRef<Path>) -> ObjMesh {
    load_obj(path).unwrap_or_else(|e| {
        warn!("{}; continuing with an empty mesh", e);
        ObjMesh::default()
    })
}
