use std::{
    fmt::{self, Write},
    path::Path,
    sync::Arc,
};

use glam::{vec2, Vec2, Vec3};

use crate::{
    element::{Corner, Face, Handle},
    error::Error,
    mesh::{Attributes, Mesh},
};

/// Index offsets applied when writing several meshes into one file.
#[derive(Clone, Copy, Default)]
struct Offsets {
    position: usize,
    texcoord: usize,
    normal: usize,
}

impl Mesh {
    /// Write this mesh in the Wavefront obj format.
    ///
    /// Coordinates are written with six decimal places, so reading the text
    /// back only reproduces values that are exact at that precision. Counts
    /// and face indices always survive.
    pub fn write_obj(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(
            w,
            "# v: {}, vt: {}, vn: {}, f: {}",
            self.num_positions(),
            self.num_texcoords(),
            self.num_normals(),
            self.num_faces()
        )?;
        writeln!(w)?;
        writeln!(w, "o {}", self.name)?;
        writeln!(w)?;
        self.write_obj_body(w, Offsets::default())
    }

    fn write_obj_body(&self, w: &mut impl Write, offsets: Offsets) -> fmt::Result {
        for p in self.positions() {
            writeln!(w, "v {:.6} {:.6} {:.6}", p.x, p.y, p.z)?;
        }
        writeln!(w)?;
        for t in self.texcoords() {
            writeln!(w, "vt {:.6} {:.6}", t.x, t.y)?;
        }
        writeln!(w)?;
        for n in self.normals() {
            writeln!(w, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        }
        writeln!(w)?;
        for face in self.faces() {
            write!(w, "f")?;
            for c in face {
                write!(
                    w,
                    " {}/{}/{}",
                    c.position.index() as usize + offsets.position + 1,
                    c.texcoord.index() as usize + offsets.texcoord + 1,
                    c.normal.index() as usize + offsets.normal + 1
                )?;
            }
            writeln!(w)?;
        }
        writeln!(w)
    }

    /// This mesh as text in the Wavefront obj format.
    pub fn to_obj_string(&self) -> String {
        let mut out = String::new();
        // Writing into a string can't fail.
        let _ = self.write_obj(&mut out);
        out
    }

    /// Write this mesh to an obj file.
    pub fn save_obj(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        std::fs::write(path.as_ref(), self.to_obj_string())?;
        log::info!("Saved {} to {:?}", self.name, path.as_ref());
        Ok(())
    }

    /// Load all the models of an obj file with `tobj`, one mesh per model.
    /// Faces are not triangulated. Models without texture coordinates or
    /// normals get a single placeholder texture coordinate at the center of
    /// the texture and an up normal.
    ///
    /// Models are split on `o` as well as `g`, and no missing index flags are
    /// reported. Use [`ObjReader`] for group merging, attribute pooling and
    /// the missing index report.
    pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<Mesh>, Error> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            single_index: false,
            triangulate: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        let (models, _) = tobj::load_obj(path, &options).map_err(|e| Error::ObjLoadFailed {
            path: path.to_path_buf(),
            reason: format!("{}", e),
        })?;
        let meshes = models
            .into_iter()
            .map(mesh_from_tobj)
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("Loaded {} meshes from {:?}", meshes.len(), path);
        Ok(meshes)
    }
}

fn mesh_from_tobj(model: tobj::Model) -> Result<Mesh, Error> {
    let name = model.name;
    let mesh = model.mesh;
    if mesh.positions.len() % 3 != 0
        || mesh.normals.len() % 3 != 0
        || mesh.texcoords.len() % 2 != 0
    {
        return Err(Error::IncorrectNumberOfCoordinates(name));
    }
    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Vec3::new(p[0], p[1], p[2]))
        .collect();
    let mut texcoords: Vec<Vec2> = mesh
        .texcoords
        .chunks_exact(2)
        .map(|t| vec2(t[0], t[1]))
        .collect();
    if texcoords.is_empty() {
        texcoords.push(Vec2::splat(0.5));
    }
    let mut normals: Vec<Vec3> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| Vec3::new(n[0], n[1], n[2]))
        .collect();
    if normals.is_empty() {
        normals.push(Vec3::Z);
    }
    // No arities means all faces are triangles.
    let arities = if mesh.face_arities.is_empty() {
        vec![3u32; mesh.indices.len() / 3]
    } else {
        mesh.face_arities
    };
    let mut faces = Vec::with_capacity(arities.len());
    let mut start = 0usize;
    for size in arities {
        let range = start..(start + size as usize);
        start = range.end;
        faces.push(
            range
                .map(|k| {
                    Corner::new(
                        mesh.indices[k].into(),
                        mesh.texcoord_indices.get(k).copied().unwrap_or(0).into(),
                        mesh.normal_indices.get(k).copied().unwrap_or(0).into(),
                    )
                })
                .collect(),
        );
    }
    Mesh::from_parts(&name, positions, texcoords, normals, faces)
}

/// Write several meshes into one obj file. Each mesh becomes a group, and
/// the attributes of every mesh are written out in full, so meshes that share
/// their attributes will have them duplicated in the file.
pub fn write_meshes(meshes: &[Mesh], w: &mut impl Write) -> fmt::Result {
    let total = meshes.iter().fold([0usize; 4], |acc, m| {
        [
            acc[0] + m.num_positions(),
            acc[1] + m.num_texcoords(),
            acc[2] + m.num_normals(),
            acc[3] + m.num_faces(),
        ]
    });
    writeln!(
        w,
        "# v: {}, vt: {}, vn: {}, f: {}",
        total[0], total[1], total[2], total[3]
    )?;
    writeln!(w)?;
    let mut offsets = Offsets::default();
    for mesh in meshes {
        writeln!(w, "g {}", mesh.name())?;
        writeln!(w)?;
        mesh.write_obj_body(w, offsets)?;
        offsets.position += mesh.num_positions();
        offsets.texcoord += mesh.num_texcoords();
        offsets.normal += mesh.num_normals();
    }
    Ok(())
}

/// Several meshes as one obj file. See [`write_meshes`].
pub fn meshes_to_obj_string(meshes: &[Mesh]) -> String {
    let mut out = String::new();
    let _ = write_meshes(meshes, &mut out);
    out
}

/// Reads meshes from Wavefront obj text.
///
/// Only polygonal geometry is read: positions, texture coordinates, normals,
/// faces, objects and groups. Material library and material names are
/// recorded but not loaded. Every group becomes its own mesh. If `pool` is
/// true, all the meshes share one attribute store. Otherwise each mesh gets
/// its own copy of the attributes, which is then cleaned.
#[derive(Debug, Clone, Default)]
pub struct ObjReader {
    pool: bool,
}

/// The result of reading obj text.
#[derive(Debug, Clone, Default)]
pub struct ObjImport {
    pub meshes: Vec<Mesh>,
    /// The file named by the `mtllib` directive.
    pub material_library: Option<String>,
    /// Material names used by the `usemtl` directives, in order of first use.
    pub materials: Vec<String>,
    /// At least one face corner was missing a position index.
    pub missing_positions: bool,
    /// At least one face corner was missing a texture coordinate index.
    pub missing_texcoords: bool,
    /// At least one face corner was missing a normal index.
    pub missing_normals: bool,
}

/// A face as read from the file, with zero based indices that are not yet
/// checked against the attribute collections.
struct RawFace<'a> {
    line: usize,
    text: &'a str,
    corners: Vec<[i64; 3]>,
}

struct Group<'a> {
    /// `None` for the faces before the first group.
    name: Option<String>,
    faces: Vec<RawFace<'a>>,
}

/// Rest of the line after the directive.
fn directive_arg<'a>(line: &'a str, directive: &str) -> &'a str {
    line[directive.len()..].trim()
}

fn parse_f32(token: Option<&str>, line: usize) -> f32 {
    match token.map(str::parse::<f32>) {
        Some(Ok(v)) => v,
        _ => {
            log::warn!(
                "Line {}: cannot read a number from {:?}, using 0",
                line,
                token.unwrap_or("")
            );
            0.0
        }
    }
}

impl ObjReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the meshes should share one attribute store.
    pub fn pool(mut self, pool: bool) -> Self {
        self.pool = pool;
        self
    }

    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<ObjImport, Error> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.parse(&text)
    }

    pub fn parse(&self, text: &str) -> Result<ObjImport, Error> {
        let mut result = ObjImport::default();
        let mut attribs = Attributes::default();
        let mut object_name: Option<String> = None;
        let mut groups: Vec<Group> = Vec::new();
        let mut current: Option<usize> = None;
        let mut has_groups = false;
        for (lnum, line) in text.lines().enumerate() {
            let lnum = lnum + 1;
            let line = line.trim();
            let mut tokens = line.split_whitespace();
            let Some(directive) = tokens.next() else {
                continue;
            };
            match directive {
                "v" => {
                    let p = Vec3::new(
                        parse_f32(tokens.next(), lnum),
                        parse_f32(tokens.next(), lnum),
                        parse_f32(tokens.next(), lnum),
                    );
                    attribs.positions.push(p);
                }
                "vt" => {
                    let t = vec2(parse_f32(tokens.next(), lnum), parse_f32(tokens.next(), lnum));
                    attribs.texcoords.push(t);
                }
                "vn" => {
                    let n = Vec3::new(
                        parse_f32(tokens.next(), lnum),
                        parse_f32(tokens.next(), lnum),
                        parse_f32(tokens.next(), lnum),
                    );
                    attribs.normals.push(n);
                }
                "o" => object_name = Some(directive_arg(line, directive).to_string()),
                "g" => {
                    has_groups = true;
                    let name = match directive_arg(line, directive) {
                        "" => format!("Group{}", groups.len()),
                        name => name.to_string(),
                    };
                    let found = groups
                        .iter()
                        .position(|g| g.name.as_deref() == Some(name.as_str()));
                    current = Some(match found {
                        Some(i) => i,
                        None => {
                            groups.push(Group {
                                name: Some(name),
                                faces: Vec::new(),
                            });
                            groups.len() - 1
                        }
                    });
                }
                "mtllib" => {
                    result.material_library = Some(directive_arg(line, directive).to_string())
                }
                "usemtl" => {
                    let name = directive_arg(line, directive);
                    if !result.materials.iter().any(|m| m == name) {
                        result.materials.push(name.to_string());
                    }
                }
                "f" => {
                    let face = self.parse_face(tokens, lnum, line, &attribs, &mut result)?;
                    if face.corners.len() < 3 {
                        log::warn!(
                            "Line {}: skipping a face with {} corners",
                            lnum,
                            face.corners.len()
                        );
                        continue;
                    }
                    let gi = *current.get_or_insert_with(|| {
                        groups.push(Group {
                            name: None,
                            faces: Vec::new(),
                        });
                        groups.len() - 1
                    });
                    groups[gi].faces.push(face);
                }
                _ => {} // Comments, and directives we don't support.
            }
        }
        // Placeholders for collections that faces may refer to.
        if groups.iter().any(|g| !g.faces.is_empty()) {
            if attribs.positions.is_empty() {
                attribs.positions.push(Vec3::ZERO);
            }
            if attribs.texcoords.is_empty() {
                attribs.texcoords.push(Vec2::splat(0.5));
            }
            if attribs.normals.is_empty() {
                attribs.normals.push(Vec3::Z);
            }
        }
        let default_name = object_name.unwrap_or_else(|| "Mesh".to_string());
        if groups.is_empty() {
            groups.push(Group {
                name: None,
                faces: Vec::new(),
            });
        }
        let attribs = Arc::new(attribs);
        for group in groups {
            let name = group.name.unwrap_or_else(|| default_name.clone());
            let faces = group
                .faces
                .into_iter()
                .map(|f| resolve_face(f, &attribs))
                .collect::<Result<Vec<_>, _>>()?;
            let mesh = if self.pool || !has_groups {
                Mesh::with_shared_attributes(&name, Arc::clone(&attribs), faces)
            } else {
                let mut mesh = Mesh::from_parts_unchecked(&name, (*attribs).clone(), faces);
                mesh.clean();
                mesh
            };
            result.meshes.push(mesh);
        }
        log::info!(
            "Read {} meshes from obj: {} positions, {} texcoords, {} normals. \
             Material library: {:?}, materials: {:?}. \
             Missing indices: positions {}, texcoords {}, normals {}",
            result.meshes.len(),
            attribs.positions.len(),
            attribs.texcoords.len(),
            attribs.normals.len(),
            result.material_library,
            result.materials,
            result.missing_positions,
            result.missing_texcoords,
            result.missing_normals
        );
        Ok(result)
    }

    /// Read the corners of a face. Relative indices are resolved against the
    /// attributes read so far.
    fn parse_face<'a>(
        &self,
        tokens: std::str::SplitWhitespace<'_>,
        line: usize,
        text: &'a str,
        attribs: &Attributes,
        result: &mut ObjImport,
    ) -> Result<RawFace<'a>, Error> {
        let lens = [
            attribs.positions.len() as i64,
            attribs.texcoords.len() as i64,
            attribs.normals.len() as i64,
        ];
        let mut corners = Vec::new();
        for token in tokens {
            let mut parts = token.split('/');
            let mut corner = [0i64; 3];
            for (k, idx) in corner.iter_mut().enumerate() {
                let missing = match parts.next() {
                    None | Some("") => true,
                    Some(part) => match part.parse::<i64>() {
                        Ok(0) => {
                            return Err(Error::FaceIndexOutOfBounds {
                                line,
                                token: token.to_string(),
                            })
                        }
                        Ok(i) if i > 0 => {
                            *idx = i - 1;
                            false
                        }
                        Ok(i) => {
                            *idx = lens[k] + i;
                            false
                        }
                        Err(_) => {
                            log::warn!("Line {}: cannot read an index from {:?}", line, token);
                            true
                        }
                    },
                };
                if missing {
                    match k {
                        0 => result.missing_positions = true,
                        1 => result.missing_texcoords = true,
                        _ => result.missing_normals = true,
                    }
                }
            }
            corners.push(corner);
        }
        Ok(RawFace {
            line,
            text,
            corners,
        })
    }
}

/// Check the indices of the face against the attributes.
fn resolve_face(face: RawFace<'_>, attribs: &Attributes) -> Result<Face, Error> {
    let lens = [
        attribs.positions.len() as i64,
        attribs.texcoords.len() as i64,
        attribs.normals.len() as i64,
    ];
    let out_of_bounds = |j: usize| Error::FaceIndexOutOfBounds {
        line: face.line,
        token: face
            .text
            .split_whitespace()
            .nth(j + 1)
            .unwrap_or_default()
            .to_string(),
    };
    face.corners
        .iter()
        .enumerate()
        .map(|(j, idx)| {
            if idx.iter().zip(lens).all(|(i, len)| (0..len).contains(i)) {
                Ok(Corner::from([idx[0] as u32, idx[1] as u32, idx[2] as u32]))
            } else {
                Err(out_of_bounds(j))
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    use glam::{vec2, vec3, Vec2, Vec3};

    use super::{meshes_to_obj_string, ObjReader};
    use crate::{
        element::Handle,
        error::Error,
        mesh::Mesh,
        primitive::{PolyType, UvProfile},
    };

    /// Path in the temp directory, unique to this test binary.
    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("polyedit_{}_{}", std::process::id(), name))
    }

    #[test]
    fn t_export_format() {
        let cube = Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace);
        let text = cube.to_obj_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# v: 8, vt: 4, vn: 6, f: 6");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "o Cube");
        assert!(lines.contains(&"v -0.500000 -0.500000 -0.500000"));
        assert!(lines.contains(&"vt 1.000000 0.000000"));
        assert!(lines.contains(&"vn -1.000000 0.000000 0.000000"));
        assert!(lines.contains(&"f 3/1/1 1/2/1 2/3/1 4/4/1"));
        assert_eq!(lines.iter().filter(|l| l.starts_with("f ")).count(), 6);
    }

    #[test]
    fn t_round_trip() {
        let mut mesh = Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace);
        mesh.subdiv_faces_center();
        mesh.clean();
        let import = ObjReader::new()
            .parse(&mesh.to_obj_string())
            .expect("Cannot parse obj");
        assert_eq!(import.meshes.len(), 1);
        let mut copy = import.meshes[0].clone();
        assert_eq!(copy.name(), "Cube");
        copy.clean();
        assert_eq!(copy.positions(), mesh.positions());
        assert_eq!(copy.texcoords(), mesh.texcoords());
        assert_eq!(copy.normals(), mesh.normals());
        assert_eq!(copy.num_faces(), mesh.num_faces());
        assert!(!import.missing_positions && !import.missing_texcoords && !import.missing_normals);
    }

    const GROUPED: &str = "\
# Three groups.
mtllib scene.mtl
o Scene
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1
g first
usemtl red
f 1/1/1 3/1/1 4/1/1
g second
usemtl blue
f -5/1/1 -4/1/1 -1/1/1
g first
usemtl red
f 2/1/1 3/1/1 5/1/1
";

    #[test]
    fn t_groups_pooled() {
        let import = ObjReader::new().pool(true).parse(GROUPED).expect("Cannot parse");
        let names: Vec<&str> = import.meshes.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Scene", "first", "second"]);
        let counts: Vec<usize> = import.meshes.iter().map(|m| m.num_faces()).collect();
        assert_eq!(counts, vec![1, 2, 1]);
        assert!(import.meshes[1].shares_attributes(&import.meshes[2]));
        assert_eq!(import.meshes[2].num_positions(), 5);
        let second = import.meshes[2].face_vertices(0).unwrap();
        assert_eq!(second[2].position, vec3(0.0, 0.0, 1.0));
        assert_eq!(import.material_library.as_deref(), Some("scene.mtl"));
        assert_eq!(import.materials, vec!["red", "blue"]);
        for mesh in &import.meshes {
            mesh.check().expect("Invalid mesh");
        }
    }

    #[test]
    fn t_groups_unpooled() {
        let mut import = ObjReader::new().parse(GROUPED).expect("Cannot parse");
        assert_eq!(import.meshes.len(), 3);
        assert!(!import.meshes[1].shares_attributes(&import.meshes[2]));
        assert_eq!(import.meshes[2].num_positions(), 3);
        assert_eq!(import.meshes[1].num_positions(), 5);
        // Editing one mesh doesn't affect the others.
        let before = import.meshes[0].clone();
        import.meshes[1].translate(Vec3::ONE);
        assert_eq!(import.meshes[0], before);
    }

    #[test]
    fn t_missing_indices_and_placeholders() {
        let text = "v 0 0 0\nv 1 oops 0\nv 0 1 0\nf 1 2 3\n";
        let import = ObjReader::new().parse(text).expect("Cannot parse");
        assert!(!import.missing_positions);
        assert!(import.missing_texcoords);
        assert!(import.missing_normals);
        let mesh = &import.meshes[0];
        assert_eq!(mesh.name(), "Mesh");
        assert_eq!(mesh.texcoords(), &[vec2(0.5, 0.5)]);
        assert_eq!(mesh.normals(), &[Vec3::Z]);
        assert_eq!(mesh.positions()[1], vec3(1.0, 0.0, 0.0));
        mesh.check().expect("Invalid mesh");

        let import = ObjReader::new()
            .parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n")
            .expect("Cannot parse");
        assert!(import.missing_texcoords && !import.missing_normals);
        assert_eq!(import.meshes[0].texcoords(), &[Vec2::splat(0.5)]);

        // An unreadable index is treated as missing.
        let import = ObjReader::new()
            .parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvn 0 0 1\nf 1/x/1 2/2/1 3/1/1\n")
            .expect("Cannot parse");
        assert!(import.missing_texcoords);
        assert!(!import.missing_positions && !import.missing_normals);
        let mesh = &import.meshes[0];
        mesh.check().expect("Invalid mesh");
        let face = mesh.face(0).unwrap();
        assert_eq!(face.corner(0).texcoord.index(), 0);
        assert_eq!(face.corner(1).texcoord.index(), 1);
        assert_eq!(face.corner(0).position.index(), 0);
    }

    #[test]
    fn t_out_of_bounds() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 9/1\n";
        match ObjReader::new().parse(text) {
            Err(Error::FaceIndexOutOfBounds { line, token }) => {
                assert_eq!(line, 5);
                assert_eq!(token, "9/1");
            }
            other => panic!("Expected an error, got {:?}", other.map(|i| i.meshes.len())),
        }
        assert!(matches!(
            ObjReader::new().parse("v 0 0 0\nf 0 1 1\n"),
            Err(Error::FaceIndexOutOfBounds { line: 2, .. })
        ));
        assert!(matches!(
            ObjReader::new().parse("v 0 0 0\nf -2 1 1\n"),
            Err(Error::FaceIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn t_empty_text() {
        let import = ObjReader::new().parse("# nothing\n\n").expect("Cannot parse");
        assert_eq!(import.meshes.len(), 1);
        assert_eq!(import.meshes[0].num_faces(), 0);
        assert_eq!(import.meshes[0].num_positions(), 0);
    }

    #[test]
    fn t_write_meshes_groups() {
        let meshes = vec![
            Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace),
            Mesh::tetrahedron(),
        ];
        let text = meshes_to_obj_string(&meshes);
        let import = ObjReader::new().pool(true).parse(&text).expect("Cannot parse");
        let names: Vec<&str> = import.meshes.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Cube", "Tetrahedron"]);
        assert_eq!(import.meshes[1].num_faces(), 4);
        assert_eq!(import.meshes[1].num_positions(), 12);
        let tet = import.meshes[1].face_vertices(0).unwrap();
        let expected = meshes[1].face_vertices(0).unwrap();
        for (a, b) in tet.iter().zip(&expected) {
            assert!(a.position.abs_diff_eq(b.position, 1e-5));
        }
    }

    #[test]
    fn t_save_and_load() {
        let path = temp_path("save_and_load.obj");
        let mut cube = Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace);
        cube.clean();
        cube.save_obj(&path).expect("Cannot save");
        let meshes = Mesh::load_obj(&path).expect("Cannot load");
        assert_eq!(meshes.len(), 1);
        let loaded = &meshes[0];
        loaded.check().expect("Invalid mesh");
        assert_eq!(loaded.name(), "Cube");
        assert_eq!(loaded.num_faces(), 6);
        assert!(loaded.faces().iter().all(|f| f.degree() == 4));
        assert_eq!(loaded.num_positions(), 8);
        assert_eq!(loaded.calc_bounds(), cube.calc_bounds());
        let mut outward = 0;
        for i in 0..6 {
            let n = loaded.calc_face_normal(i).unwrap();
            let c = loaded.calc_face_centroid(i).unwrap();
            assert_eq!(loaded.vertex(i, 0).unwrap().normal, n);
            if n.dot(c) > 0.0 {
                outward += 1;
            }
        }
        assert_eq!(outward, 6);
        let import = ObjReader::new().read_file(&path).expect("Cannot read");
        assert_eq!(import.meshes[0].num_faces(), 6);
        std::fs::remove_file(&path).expect("Cannot remove file");
    }

    #[test]
    fn t_load_placeholders() {
        let path = temp_path("load_placeholders.obj");
        std::fs::write(
            &path,
            "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no b\nv 0 0 1\nv 1 0 1\nv 1 1 1\nv 0 1 1\nf 4 5 6 7\n",
        )
        .expect("Cannot write file");
        let meshes = Mesh::load_obj(&path).expect("Cannot load");
        std::fs::remove_file(&path).expect("Cannot remove file");
        let names: Vec<&str> = meshes.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(meshes[0].faces()[0].degree(), 3);
        assert_eq!(meshes[1].faces()[0].degree(), 4);
        for mesh in &meshes {
            assert_eq!(mesh.normals(), &[Vec3::Z]);
            assert_eq!(mesh.texcoords(), &[vec2(0.5, 0.5)]);
            mesh.check().expect("Invalid mesh");
        }
        assert!(matches!(
            Mesh::load_obj(temp_path("does_not_exist.obj")),
            Err(Error::ObjLoadFailed { .. })
        ));
    }
}
