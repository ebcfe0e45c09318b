use std::{collections::HashSet, sync::Arc};

use glam::{Vec2, Vec3};

use crate::{
    element::{Corner, Edge, Face, Handle, Vertex, FH, NH, PH, TH},
    error::Error,
    math,
};

/// The three attribute collections of a mesh. Each collection is a dense list
/// of values addressed by the handles stored in the corners of the faces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub positions: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
    pub normals: Vec<Vec3>,
}

impl Attributes {
    pub fn with_capacity(npos: usize, ntex: usize, nnorm: usize) -> Self {
        Attributes {
            positions: Vec::with_capacity(npos),
            texcoords: Vec::with_capacity(ntex),
            normals: Vec::with_capacity(nnorm),
        }
    }

    pub fn push_position(&mut self, p: Vec3) -> PH {
        self.positions.push(p);
        ((self.positions.len() - 1) as u32).into()
    }

    pub fn push_texcoord(&mut self, t: Vec2) -> TH {
        self.texcoords.push(t);
        ((self.texcoords.len() - 1) as u32).into()
    }

    pub fn push_normal(&mut self, n: Vec3) -> NH {
        self.normals.push(n);
        ((self.normals.len() - 1) as u32).into()
    }

    /// Append all three attributes of the vertex, and return the corner
    /// referring to them.
    pub fn push_vertex(&mut self, v: &Vertex) -> Corner {
        Corner::new(
            self.push_position(v.position),
            self.push_texcoord(v.texcoord),
            self.push_normal(v.normal),
        )
    }

    pub fn position(&self, p: PH) -> Vec3 {
        self.positions[p.index() as usize]
    }

    pub fn texcoord(&self, t: TH) -> Vec2 {
        self.texcoords[t.index() as usize]
    }

    pub fn normal(&self, n: NH) -> Vec3 {
        self.normals[n.index() as usize]
    }

    /// Look up the attribute values of a corner. Panics if any of the handles
    /// are out of bounds, as that means the mesh is corrupt.
    pub fn resolve(&self, c: Corner) -> Vertex {
        Vertex {
            position: self.position(c.position),
            texcoord: self.texcoord(c.texcoord),
            normal: self.normal(c.normal),
        }
    }

    pub(crate) fn resolve_face(&self, face: &Face) -> Vec<Vertex> {
        face.corners().iter().map(|c| self.resolve(*c)).collect()
    }
}

/// Polygon mesh made of an attribute store and a face table.
///
/// Faces are loops of [`Corner`]s, and every corner refers to one position,
/// one texture coordinate and one normal. After every public operation, all
/// handles stored in the faces are valid indices into the attribute store.
///
/// The attribute store is reference counted. Meshes produced by cloning, or by
/// pooled obj import, share their attributes until one of them is edited, at
/// which point the editing mesh gets its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub(crate) name: String,
    pub(crate) attribs: Arc<Attributes>,
    pub(crate) faces: Vec<Face>,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    pub fn new() -> Self {
        Self::with_name("Mesh")
    }

    pub fn with_name(name: &str) -> Self {
        Mesh {
            name: name.to_string(),
            attribs: Arc::new(Attributes::default()),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from its parts. The faces are checked, and an error is
    /// returned if any face is degenerate or refers to attributes that don't
    /// exist.
    pub fn from_parts(
        name: &str,
        positions: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, Error> {
        let mesh = Self::from_parts_unchecked(
            name,
            Attributes {
                positions,
                texcoords,
                normals,
            },
            faces,
        );
        mesh.check()?;
        Ok(mesh)
    }

    pub(crate) fn from_parts_unchecked(name: &str, attribs: Attributes, faces: Vec<Face>) -> Self {
        Mesh {
            name: name.to_string(),
            attribs: Arc::new(attribs),
            faces,
        }
    }

    pub(crate) fn with_shared_attributes(
        name: &str,
        attribs: Arc<Attributes>,
        faces: Vec<Face>,
    ) -> Self {
        Mesh {
            name: name.to_string(),
            attribs,
            faces,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn num_positions(&self) -> usize {
        self.attribs.positions.len()
    }

    pub fn num_texcoords(&self) -> usize {
        self.attribs.texcoords.len()
    }

    pub fn num_normals(&self) -> usize {
        self.attribs.normals.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attribs
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.attribs.positions
    }

    pub fn texcoords(&self) -> &[Vec2] {
        &self.attribs.texcoords
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.attribs.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Handles of all the faces, in face table order.
    pub fn face_handles(&self) -> impl Iterator<Item = FH> + use<> {
        (0..self.faces.len() as u32).map(FH::from)
    }

    /// Mutable access to the attributes. If the attributes are shared with
    /// other meshes, they are copied first.
    pub(crate) fn attribs_mut(&mut self) -> &mut Attributes {
        Arc::make_mut(&mut self.attribs)
    }

    /// Check if this mesh shares its attribute store with `other`.
    pub fn shares_attributes(&self, other: &Mesh) -> bool {
        Arc::ptr_eq(&self.attribs, &other.attribs)
    }

    /// Wrap a signed face index into the range of the face table. Returns
    /// `None` only if the mesh has no faces.
    pub fn wrap_face_index(&self, i: isize) -> Option<usize> {
        match self.faces.len() {
            0 => None,
            n => Some(i.rem_euclid(n as isize) as usize),
        }
    }

    /// The face at the wrapped index `i`, so that `-1` is the last face.
    pub fn face(&self, i: isize) -> Option<&Face> {
        self.wrap_face_index(i).map(|i| &self.faces[i])
    }

    /// The attribute values of the corners of the face at the wrapped index
    /// `i`.
    pub fn face_vertices(&self, i: isize) -> Option<Vec<Vertex>> {
        self.face(i).map(|f| self.attribs.resolve_face(f))
    }

    /// The attribute values of corner `j` of face `i`. Both indices wrap.
    pub fn vertex(&self, i: isize, j: isize) -> Option<Vertex> {
        let face = self.face(i)?;
        let j = face.wrap_index(j)?;
        Some(self.attribs.resolve(face.corner(j)))
    }

    /// The edges of the face at the wrapped index `i`, following its winding.
    pub fn face_edges(&self, i: isize) -> Option<Vec<Edge>> {
        let face = self.face(i)?;
        Some(
            face.edges()
                .map(|(a, b)| Edge {
                    origin: self.attribs.resolve(a),
                    dest: self.attribs.resolve(b),
                })
                .collect(),
        )
    }

    /// All distinct combinations of attribute values referenced by the faces,
    /// in order of first appearance.
    pub fn unique_vertices(&self) -> Vec<Vertex> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for c in self.faces.iter().flat_map(|f| f.corners().iter()) {
            let v = self.attribs.resolve(*c);
            let key = (
                v.position.to_array().map(f32::to_bits),
                v.texcoord.to_array().map(f32::to_bits),
                v.normal.to_array().map(f32::to_bits),
            );
            if seen.insert(key) {
                out.push(v);
            }
        }
        out
    }

    /// Centroid of the positions of the face at the wrapped index `i`.
    pub fn calc_face_centroid(&self, i: isize) -> Option<Vec3> {
        let face = self.face(i)?;
        Some(face_centroid(&self.attribs, face))
    }

    /// Unit normal of the face at the wrapped index `i`, computed from its
    /// positions with Newell's method. Degenerate faces have a zero normal.
    pub fn calc_face_normal(&self, i: isize) -> Option<Vec3> {
        let face = self.face(i)?;
        Some(math::normalize_or(
            face_newell_normal(&self.attribs, face),
            Vec3::ZERO,
        ))
    }

    /// Append a face. The face is checked before it is added.
    pub fn push_face(&mut self, face: Face) -> Result<FH, Error> {
        let fh: FH = (self.faces.len() as u32).into();
        check_face(&self.attribs, fh, &face)?;
        self.faces.push(face);
        Ok(fh)
    }

    /// Check that every face has at least 3 corners, and every corner refers
    /// to existing attributes.
    pub fn check(&self) -> Result<(), Error> {
        for (fi, face) in self.faces.iter().enumerate() {
            check_face(&self.attribs, (fi as u32).into(), face)?;
        }
        Ok(())
    }
}

pub(crate) fn face_centroid(attribs: &Attributes, face: &Face) -> Vec3 {
    let total = face
        .corners()
        .iter()
        .fold(Vec3::ZERO, |total, c| total + attribs.position(c.position));
    total / (face.degree().max(1) as f32)
}

pub(crate) fn face_newell_normal(attribs: &Attributes, face: &Face) -> Vec3 {
    math::newell_normal(face.corners().iter().map(|c| attribs.position(c.position)))
}

fn check_face(attribs: &Attributes, fh: FH, face: &Face) -> Result<(), Error> {
    if face.degree() < 3 {
        return Err(Error::DegenerateFace(fh, face.degree()));
    }
    for (ci, c) in face.corners().iter().enumerate() {
        if c.position.index() as usize >= attribs.positions.len() {
            return Err(Error::PositionOutOfBounds {
                face: fh,
                corner: ci,
                index: c.position.index(),
                len: attribs.positions.len(),
            });
        }
        if c.texcoord.index() as usize >= attribs.texcoords.len() {
            return Err(Error::TexCoordOutOfBounds {
                face: fh,
                corner: ci,
                index: c.texcoord.index(),
                len: attribs.texcoords.len(),
            });
        }
        if c.normal.index() as usize >= attribs.normals.len() {
            return Err(Error::NormalOutOfBounds {
                face: fh,
                corner: ci,
                index: c.normal.index(),
                len: attribs.normals.len(),
            });
        }
    }
    Ok(())
}
