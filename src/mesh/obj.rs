use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::Context as _;

use crate::{
    foundation::error::{RtnprError, RtnprResult},
    mesh::model::Mesh,
};

const NOT_A_TRIANGLE_MESH: &str = "model is not a triangle mesh";

/// Load a triangle-only OBJ file.
///
/// Only `v x y z` and `f i j k` records are read; comment lines (`#`), blank lines and every other
/// directive (`vn`, `vt`, `g`, `usemtl`, ...) are skipped. A `v` or `f` record with anything other
/// than three fields fails with [`RtnprError::MalformedMesh`]; polygons are never triangulated.
/// Face indices are 1-based in the file and 0-based in the returned [`Mesh`].
#[tracing::instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_obj(path: impl AsRef<Path>) -> RtnprResult<Mesh> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(RtnprError::FileNotFound(path.to_path_buf()));
    }
    if !has_obj_extension(path) {
        return Err(RtnprError::UnsupportedFormat(path.to_path_buf()));
    }

    let f = File::open(path).with_context(|| format!("open mesh '{}'", path.display()))?;
    let mesh = parse_obj(BufReader::new(f))?;

    tracing::info!(
        vertices = mesh.vertices().len(),
        faces = mesh.faces().len(),
        "loaded mesh with {} vertices and {} faces",
        mesh.vertices().len(),
        mesh.faces().len()
    );
    Ok(mesh)
}

fn has_obj_extension(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "obj")
}

/// Parse OBJ text from any buffered reader. See [`load_obj`] for the accepted dialect.
pub fn parse_obj(reader: impl BufRead) -> RtnprResult<Mesh> {
    let mut vertices: Vec<[f32; 3]> = Vec::new();
    let mut faces_1based: Vec<(usize, [i64; 3])> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("read mesh line {line_no}"))?;
        if line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(&marker) = tokens.first() else {
            continue;
        };
        if marker != "v" && marker != "f" {
            continue;
        }
        if tokens.len() != 4 {
            return Err(RtnprError::malformed(line_no, NOT_A_TRIANGLE_MESH));
        }

        if marker == "v" {
            vertices.push([
                parse_field(tokens[1], line_no)?,
                parse_field(tokens[2], line_no)?,
                parse_field(tokens[3], line_no)?,
            ]);
        } else {
            faces_1based.push((
                line_no,
                [
                    parse_field(tokens[1], line_no)?,
                    parse_field(tokens[2], line_no)?,
                    parse_field(tokens[3], line_no)?,
                ],
            ));
        }
    }

    let n = vertices.len() as i64;
    let mut faces = Vec::with_capacity(faces_1based.len());
    for (line_no, f) in faces_1based {
        let mut tri = [0u32; 3];
        for (dst, &i) in tri.iter_mut().zip(f.iter()) {
            if i < 1 || i > n {
                return Err(RtnprError::malformed(
                    line_no,
                    format!("face index {i} out of range 1..={n}"),
                ));
            }
            *dst = (i - 1) as u32;
        }
        faces.push(tri);
    }

    Mesh::new(vertices, faces)
        .ok_or_else(|| RtnprError::malformed(0, "face index out of range (unexpected)"))
}

fn parse_field<T: std::str::FromStr>(token: &str, line_no: usize) -> RtnprResult<T> {
    token
        .parse()
        .map_err(|_| RtnprError::malformed(line_no, format!("invalid numeric field '{token}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/mesh/obj.rs"]
mod tests;
