//! Wavefront OBJ format support.
//!
//! Reads and writes polygon meshes with per-corner texture coordinates.
//! Every `o` statement starts a new [`MeshObject`]; faces that appear before
//! the first `o` belong to an object named after the file. Normals, groups,
//! materials and smoothing groups are ignored on load and not written.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::{Point2, Point3};

use crate::error::{Result, TexelError};
use crate::mesh::{build_from_polygons, to_polygons, Corner, MeshIndex, MeshObject, PolyMesh};

/// One face corner as written in the file: global vertex and texcoord indices.
type RawCorner = (usize, Option<usize>);

#[derive(Debug, Default)]
struct RawObject {
    name: String,
    faces: Vec<Vec<RawCorner>>,
}

/// Load all objects from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use texelkit::io::obj;
/// use texelkit::mesh::{MeshObject, PolyMesh};
///
/// let objects: Vec<MeshObject<PolyMesh>> = obj::load("scene.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>, I: MeshIndex>(path: P) -> Result<Vec<MeshObject<PolyMesh<I>>>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let default_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Object");
    read(BufReader::new(file), path, default_name)
}

/// Parse OBJ data from a reader.
///
/// `path` is only used in error messages. `default_name` names the object
/// collecting faces that precede the first `o` statement.
pub fn read<R: BufRead, I: MeshIndex>(
    reader: R,
    path: &Path,
    default_name: &str,
) -> Result<Vec<MeshObject<PolyMesh<I>>>> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut tex_coords: Vec<Point2<f64>> = Vec::new();
    let mut objects: Vec<RawObject> = vec![RawObject {
        name: default_name.to_string(),
        faces: Vec::new(),
    }];

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();
        let bad_line =
            |what: &str| TexelError::load(path, format!("line {}: {}", line_no + 1, what));

        match keyword {
            "v" => {
                let [x, y, z] =
                    parse_floats::<3>(&args, 3).ok_or_else(|| bad_line("bad vertex"))?;
                positions.push(Point3::new(x, y, z));
            }
            "vt" => {
                // `v` is optional and defaults to 0.
                let [u, v] = parse_floats::<2>(&args, 1)
                    .ok_or_else(|| bad_line("bad texture coordinate"))?;
                tex_coords.push(Point2::new(u, v));
            }
            "o" => {
                let name = if args.is_empty() {
                    format!("{}.{:03}", default_name, objects.len())
                } else {
                    args.join(" ")
                };
                objects.push(RawObject {
                    name,
                    faces: Vec::new(),
                });
            }
            "f" => {
                let face = args
                    .iter()
                    .map(|token| parse_corner(token, positions.len(), tex_coords.len()))
                    .collect::<Option<Vec<RawCorner>>>()
                    .ok_or_else(|| bad_line("bad face index"))?;
                if let Some(current) = objects.last_mut() {
                    current.faces.push(face);
                }
            }
            _ => {}
        }
    }

    let result: Vec<MeshObject<PolyMesh<I>>> = objects
        .into_iter()
        .filter(|o| !o.faces.is_empty())
        .map(|o| build_object(o, &positions, &tex_coords))
        .collect::<Result<_>>()?;

    if result.is_empty() {
        return Err(TexelError::EmptyMesh);
    }

    Ok(result)
}

/// Parse up to `N` finite floats, requiring at least `required` of them.
/// Missing trailing values are 0.
fn parse_floats<const N: usize>(args: &[&str], required: usize) -> Option<[f64; N]> {
    if args.len() < required {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, s) in out.iter_mut().zip(args) {
        let x: f64 = s.parse().ok()?;
        if !x.is_finite() {
            return None;
        }
        *slot = x;
    }
    Some(out)
}

/// Resolve a 1-based or negative (relative) OBJ index against `count` elements.
fn resolve_index(s: &str, count: usize) -> Option<usize> {
    let i: i64 = s.parse().ok()?;
    let resolved = if i > 0 {
        usize::try_from(i - 1).ok()?
    } else if i < 0 {
        count.checked_sub(usize::try_from(-i).ok()?)?
    } else {
        return None;
    };
    (resolved < count).then_some(resolved)
}

/// Parse a face corner: `v`, `v/vt`, `v/vt/vn` or `v//vn`.
fn parse_corner(token: &str, num_positions: usize, num_tex_coords: usize) -> Option<RawCorner> {
    let mut fields = token.split('/');
    let vi = resolve_index(fields.next()?, num_positions)?;
    let vti = match fields.next() {
        Some(s) if !s.is_empty() => Some(resolve_index(s, num_tex_coords)?),
        _ => None,
    };
    Some((vi, vti))
}

fn build_object<I: MeshIndex>(
    raw: RawObject,
    positions: &[Point3<f64>],
    tex_coords: &[Point2<f64>],
) -> Result<MeshObject<PolyMesh<I>>> {
    // OBJ vertex indices are global; renumber the ones this object uses.
    let mut local: HashMap<usize, usize> = HashMap::new();
    let mut local_positions: Vec<Point3<f64>> = Vec::new();
    let mut polygons: Vec<Vec<Corner>> = Vec::with_capacity(raw.faces.len());

    for (fi, face) in raw.faces.iter().enumerate() {
        let mut polygon = Vec::with_capacity(face.len());
        for &(vi, vti) in face {
            let Some(ti) = vti else {
                return Err(TexelError::MissingUvLayer {
                    object: raw.name,
                    face: fi,
                });
            };
            let lv = *local.entry(vi).or_insert_with(|| {
                local_positions.push(positions[vi]);
                local_positions.len() - 1
            });
            polygon.push((lv, tex_coords[ti]));
        }
        polygons.push(polygon);
    }

    let mesh = build_from_polygons(&local_positions, &polygons)?;
    Ok(MeshObject::new(raw.name, mesh))
}

/// Save objects to an OBJ file.
///
/// Each loop gets its own `vt` entry, so UV seams survive the round trip.
pub fn save<P: AsRef<Path>, I: MeshIndex>(objects: &[MeshObject<PolyMesh<I>>], path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write(objects, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write objects as OBJ text.
pub fn write<W: Write, I: MeshIndex>(objects: &[MeshObject<PolyMesh<I>>], writer: &mut W) -> Result<()> {
    writeln!(writer, "# Generated by texelkit")?;

    let mut vertex_offset = 1;
    let mut uv_offset = 1;

    for obj in objects {
        let (positions, polygons) = to_polygons(&obj.mesh);

        writeln!(writer, "o {}", obj.name)?;
        if let Some(density) = obj.texel_density() {
            writeln!(writer, "# texel density {:.4} px/unit", density)?;
        }
        for p in &positions {
            writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
        }
        for polygon in &polygons {
            for (_, uv) in polygon {
                writeln!(writer, "vt {} {}", uv.x, uv.y)?;
            }
        }

        let mut next_uv = uv_offset;
        for polygon in &polygons {
            write!(writer, "f")?;
            for &(vi, _) in polygon {
                write!(writer, " {}/{}", vi + vertex_offset, next_uv)?;
                next_uv += 1;
            }
            writeln!(writer)?;
        }

        vertex_offset += positions.len();
        uv_offset = next_uv;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::texel::estimate_density;
    use crate::mesh::FaceId;
    use std::io::Cursor;

    const TWO_OBJECTS: &str = "\
# two quads
o Floor
v 0 0 0
v 2 0 0
v 2 2 0
v 0 2 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
o Wall
v 0 0 1
v 1 0 1
v 1 0 2
vt 0.25 0.25
vt 0.75 0.25
vt 0.25 0.75
vn 0 -1 0
f -3/-3/1 -2/-2/1 -1/-1/1
";

    fn parse(text: &str) -> Result<Vec<MeshObject<PolyMesh>>> {
        read(Cursor::new(text), Path::new("test.obj"), "test")
    }

    #[test]
    fn test_read_objects() {
        let objects = parse(TWO_OBJECTS).unwrap();
        assert_eq!(objects.len(), 2);

        assert_eq!(objects[0].name, "Floor");
        assert_eq!(objects[0].mesh.num_vertices(), 4);
        assert_eq!(objects[0].mesh.num_faces(), 1);
        assert_eq!(objects[0].mesh.num_loops(), 4);

        // Wall uses negative indices and gets its own local vertices.
        assert_eq!(objects[1].name, "Wall");
        assert_eq!(objects[1].mesh.num_vertices(), 3);
        assert!(objects[1].mesh.is_valid());

        // Floor: area 4, UV area 1 -> 1 / sqrt(4) at 100 px.
        let density = estimate_density(&objects[0].mesh, 100.0).unwrap();
        assert!((density - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_faces_before_first_object_use_default_name() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let objects = parse(text).unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "test");
    }

    #[test]
    fn test_missing_uvs_rejected() {
        let text = "o Bare\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(
            err,
            TexelError::MissingUvLayer { ref object, face: 0 } if object == "Bare"
        ));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let text = "v 0 0 0\nv 1 0 0\nvt 0 0\nf 1/1 2/1 3/1\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, TexelError::LoadError { .. }));
        assert!(err.to_string().contains("line 4"));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let text = "o A\nv nan 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let err = parse(text).unwrap_err();
        assert!(matches!(err, TexelError::LoadError { .. }));
        assert!(err.to_string().contains("line 2"));

        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt inf 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let err = parse(text).unwrap_err();
        assert!(err.to_string().contains("line 4"));

        assert!(parse("v 1e309 0 0\n").is_err());
    }

    #[test]
    fn test_single_component_texcoord() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";
        let objects = parse(text).unwrap();
        let uvs: Vec<_> = objects[0].mesh.face_uvs(FaceId::new(0)).collect();
        assert_eq!(uvs[0], Point2::new(0.5, 0.0));
    }

    #[test]
    fn test_no_faces_is_empty_mesh() {
        let err = parse("v 0 0 0\nvt 0 0\n").unwrap_err();
        assert!(matches!(err, TexelError::EmptyMesh));
    }

    #[test]
    fn test_write_then_read_keeps_uvs() {
        let objects = parse(TWO_OBJECTS).unwrap();

        let mut buffer = Vec::new();
        write(&objects, &mut buffer).unwrap();
        let reread = parse(std::str::from_utf8(&buffer).unwrap()).unwrap();

        assert_eq!(reread.len(), objects.len());
        for (a, b) in objects.iter().zip(&reread) {
            assert_eq!(a.name, b.name);
            assert_eq!(to_polygons(&a.mesh), to_polygons(&b.mesh));
        }
    }

    #[test]
    fn test_resolve_index() {
        assert_eq!(resolve_index("1", 3), Some(0));
        assert_eq!(resolve_index("-1", 3), Some(2));
        assert_eq!(resolve_index("0", 3), None);
        assert_eq!(resolve_index("4", 3), None);
        assert_eq!(resolve_index("-4", 3), None);
        assert_eq!(resolve_index("x", 3), None);
    }
}
