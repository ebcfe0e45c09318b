use std::sync::Arc;

use glam::{vec2, Vec3};

use crate::{
    element::{Corner, Face, Vertex, TH},
    math::{self, EPSILON},
    mesh::{face_newell_normal, Attributes, Mesh},
};

/// Appends a unit square to the texture coordinates, and returns the corners
/// of the square in counter-clockwise order starting at the origin.
fn push_unit_square(attribs: &mut Attributes) -> [TH; 4] {
    [
        attribs.push_texcoord(vec2(0.0, 0.0)),
        attribs.push_texcoord(vec2(1.0, 0.0)),
        attribs.push_texcoord(vec2(1.0, 1.0)),
        attribs.push_texcoord(vec2(0.0, 1.0)),
    ]
}

/// Center of the face, as the mean of all its corners.
fn push_center(attribs: &mut Attributes, verts: &[Vertex]) -> Corner {
    let center = Vertex::mean(verts);
    attribs.push_vertex(&center)
}

/// One midpoint per edge. Midpoint `j` lies on the edge from corner `j` to
/// corner `j + 1`.
fn push_midpoints(attribs: &mut Attributes, verts: &[Vertex]) -> Vec<Corner> {
    let n = verts.len();
    (0..n)
        .map(|j| attribs.push_vertex(&verts[j].midpoint(&verts[(j + 1) % n])))
        .collect()
}

fn inset(attribs: &mut Attributes, face: &Face, fac: f32) -> Vec<Face> {
    if fac >= 1.0 {
        return fan(attribs, face);
    }
    let verts = attribs.resolve_face(face);
    let center = Vertex::mean(&verts);
    let inner: Vec<Corner> = verts
        .iter()
        .map(|v| attribs.push_vertex(&v.lerp(&center, fac)))
        .collect();
    let outer = face.corners();
    let n = outer.len();
    let mut out: Vec<Face> = (0..n)
        .map(|j| {
            let k = (j + 1) % n;
            Face::new(vec![outer[j], outer[k], inner[k], inner[j]])
        })
        .collect();
    out.push(Face::new(inner));
    out
}

fn extrude(attribs: &mut Attributes, face: &Face, fill_cap: bool, depth: f32, taper: f32) -> Vec<Face> {
    let taper = taper.max(EPSILON);
    let verts = attribs.resolve_face(face);
    let center = Vertex::mean(&verts);
    let offset = center.normal * depth;
    let outer = face.corners();
    let n = outer.len();
    let mut out = Vec::with_capacity(n + 2);
    if fill_cap {
        let flipped = attribs.push_normal(-center.normal);
        out.push(
            outer
                .iter()
                .rev()
                .map(|c| Corner::new(c.position, c.texcoord, flipped))
                .collect(),
        );
    }
    let top: Vec<Corner> = verts
        .iter()
        .zip(outer)
        .map(|(v, c)| {
            let p = center.position + (v.position - center.position) * taper + offset;
            Corner::new(attribs.push_position(p), c.texcoord, c.normal)
        })
        .collect();
    out.push(Face::new(top.clone()));
    let uvs = push_unit_square(attribs);
    for j in 0..n {
        let k = (j + 1) % n;
        let positions = [outer[j].position, outer[k].position, top[k].position, top[j].position];
        let normal = math::normalize_or(
            math::newell_normal(positions.iter().map(|p| attribs.position(*p))),
            center.normal,
        );
        let nh = attribs.push_normal(normal);
        out.push(
            positions
                .iter()
                .zip(uvs)
                .map(|(p, t)| Corner::new(*p, t, nh))
                .collect(),
        );
    }
    out
}

fn center_quads(attribs: &mut Attributes, face: &Face) -> Vec<Face> {
    let verts = attribs.resolve_face(face);
    let center = push_center(attribs, &verts);
    let mids = push_midpoints(attribs, &verts);
    let outer = face.corners();
    let n = outer.len();
    (0..n)
        .map(|j| {
            let k = (j + 1) % n;
            Face::new(vec![center, mids[j], outer[k], mids[k]])
        })
        .collect()
}

fn fan(attribs: &mut Attributes, face: &Face) -> Vec<Face> {
    let verts = attribs.resolve_face(face);
    let center = push_center(attribs, &verts);
    face.edges()
        .map(|(a, b)| Face::new(vec![center, a, b]))
        .collect()
}

fn inscribe(attribs: &mut Attributes, face: &Face) -> Vec<Face> {
    let verts = attribs.resolve_face(face);
    let mids = push_midpoints(attribs, &verts);
    let outer = face.corners();
    let n = outer.len();
    let mut out: Vec<Face> = (0..n)
        .map(|j| {
            let k = (j + 1) % n;
            Face::new(vec![mids[j], outer[k], mids[k]])
        })
        .collect();
    out.push(Face::new(mids));
    out
}

fn triangle_fan(face: &Face) -> Vec<Face> {
    let c = face.corners();
    if c.len() <= 3 {
        return vec![face.clone()];
    }
    (1..(c.len() - 1))
        .map(|i| Face::new(vec![c[0], c[i], c[i + 1]]))
        .collect()
}

/// Topological editors. Faces and edges are addressed with signed indices
/// that wrap around, so `-1` is the last face, and every editor is a no-op on
/// a mesh without faces. New attributes are always appended, existing ones
/// are never modified or removed; use [`Mesh::clean`] to compact the mesh
/// afterwards.
impl Mesh {
    /// Replace the face at index `i` with the faces produced by `op`.
    fn edit_face<F>(&mut self, i: isize, op: F)
    where
        F: FnOnce(&mut Attributes, &Face) -> Vec<Face>,
    {
        let Some(i) = self.wrap_face_index(i) else {
            return;
        };
        let attribs = Arc::make_mut(&mut self.attribs);
        let replacement = op(attribs, &self.faces[i]);
        self.faces.splice(i..(i + 1), replacement);
    }

    /// Replace every face with the faces produced by `op`. The replacements
    /// are computed against the original faces and collected into a new face
    /// table, so every original face is visited exactly once.
    fn edit_faces<F>(&mut self, name: &str, mut op: F)
    where
        F: FnMut(&mut Attributes, &Face) -> Vec<Face>,
    {
        if self.faces.is_empty() {
            return;
        }
        let attribs = Arc::make_mut(&mut self.attribs);
        let before = std::mem::take(&mut self.faces);
        let mut after = Vec::with_capacity(before.len() * 4);
        for face in &before {
            after.extend(op(attribs, face));
        }
        log::debug!(
            "{}: {} faces -> {} faces in {}",
            name,
            before.len(),
            after.len(),
            self.name
        );
        self.faces = after;
    }

    /// Inset the face toward its center. A factor of zero or less does
    /// nothing, and a factor of one or more collapses the face into a
    /// triangle fan, same as [`Mesh::subdiv_face_fan`]. Otherwise the face is
    /// replaced by a ring of quads around a smaller copy of itself.
    pub fn inset_face(&mut self, face: isize, fac: f32) {
        if fac > 0.0 {
            self.edit_face(face, |attribs, f| inset(attribs, f, fac));
        }
    }

    /// Extrude the face along its average normal by `depth`. The extruded
    /// face is scaled by `taper` about its center.
    ///
    /// The face is replaced by the extruded face followed by one side quad
    /// per edge. If `fill_cap` is true, the original face is kept with its
    /// winding reversed, ahead of the extruded face, to close the bottom.
    pub fn extrude_face(&mut self, face: isize, fill_cap: bool, depth: f32, taper: f32) {
        self.edit_face(face, |attribs, f| extrude(attribs, f, fill_cap, depth, taper));
    }

    /// Split the face into quads around its center, one per corner.
    pub fn subdiv_face_center(&mut self, face: isize) {
        self.edit_face(face, center_quads);
    }

    /// Split the face into triangles around its center, one per edge.
    pub fn subdiv_face_fan(&mut self, face: isize) {
        self.edit_face(face, fan);
    }

    /// Split the face into a corner triangle per corner, around a polygon
    /// inscribed through the midpoints of the edges.
    pub fn subdiv_face_inscribe(&mut self, face: isize) {
        self.edit_face(face, inscribe);
    }

    /// Insert `cuts` evenly spaced corners along an edge of the face. Edge
    /// `j` runs from corner `j` to corner `j + 1`. Only this face gets the
    /// new corners; neighboring faces that share the edge are left as they
    /// are.
    pub fn subdiv_edge(&mut self, face: isize, edge: isize, cuts: usize) {
        if cuts < 1 {
            return;
        }
        let Some(i) = self.wrap_face_index(face) else {
            return;
        };
        let Some(j) = self.faces[i].wrap_index(edge) else {
            return;
        };
        let attribs = Arc::make_mut(&mut self.attribs);
        let f = &mut self.faces[i];
        let n = f.degree();
        let a = attribs.resolve(f.corner(j));
        let b = attribs.resolve(f.corner((j + 1) % n));
        let denom = (cuts + 1) as f32;
        let corners: Vec<Corner> = (1..=cuts)
            .map(|k| attribs.push_vertex(&a.lerp(&b, k as f32 / denom)))
            .collect();
        f.insert_corners(j + 1, corners);
    }

    /// Extrude an edge of the face sideways, away from the face, into a new
    /// quad. The quad is offset by `amount` times the length of the edge and
    /// inserted right after the face. Does nothing if `amount` is zero or the
    /// edge has no length.
    pub fn extrude_edge(&mut self, face: isize, edge: isize, amount: f32) {
        if amount == 0.0 {
            return;
        }
        let Some(i) = self.wrap_face_index(face) else {
            return;
        };
        let Some(j) = self.faces[i].wrap_index(edge) else {
            return;
        };
        let attribs = Arc::make_mut(&mut self.attribs);
        let f = &self.faces[i];
        let ca = f.corner(j);
        let cb = f.corner((j + 1) % f.degree());
        let (pa, pb) = (attribs.position(ca.position), attribs.position(cb.position));
        let len = pa.distance(pb);
        if len < EPSILON {
            return;
        }
        let fallback = math::normalize_or(face_newell_normal(attribs, f), Vec3::Z);
        let normal = math::normalize_or(attribs.normal(ca.normal) + attribs.normal(cb.normal), fallback);
        let offset = ((pb - pa) / len).cross(normal) * amount * len;
        let uvs = push_unit_square(attribs);
        let quad = Face::new(vec![
            Corner::new(attribs.push_position(pa + offset), uvs[0], ca.normal),
            Corner::new(attribs.push_position(pb + offset), uvs[1], cb.normal),
            Corner::new(cb.position, uvs[2], cb.normal),
            Corner::new(ca.position, uvs[3], ca.normal),
        ]);
        self.faces.insert(i + 1, quad);
    }

    /// Inset every face. See [`Mesh::inset_face`].
    pub fn inset_faces(&mut self, fac: f32) {
        if fac > 0.0 {
            self.edit_faces("Inset", |attribs, f| inset(attribs, f, fac));
        }
    }

    /// Extrude every face. See [`Mesh::extrude_face`].
    pub fn extrude_faces(&mut self, fill_cap: bool, depth: f32, taper: f32) {
        self.edit_faces("Extrude", |attribs, f| {
            extrude(attribs, f, fill_cap, depth, taper)
        });
    }

    pub fn subdiv_faces_center(&mut self) {
        self.edit_faces("Center subdivision", center_quads);
    }

    pub fn subdiv_faces_fan(&mut self) {
        self.edit_faces("Fan subdivision", fan);
    }

    pub fn subdiv_faces_inscribe(&mut self) {
        self.edit_faces("Inscribed subdivision", inscribe);
    }

    /// Flip the winding of the face. Stored normals are not changed.
    pub fn reverse_face(&mut self, face: isize) {
        if let Some(i) = self.wrap_face_index(face) {
            self.faces[i].reverse();
        }
    }

    pub fn reverse_faces(&mut self) {
        for f in self.faces.iter_mut() {
            f.reverse();
        }
    }

    /// Split the face into a fan of triangles around its first corner. No new
    /// attributes are created.
    pub fn triangulate_face(&mut self, face: isize) {
        if let Some(i) = self.wrap_face_index(face) {
            let tris = triangle_fan(&self.faces[i]);
            self.faces.splice(i..(i + 1), tris);
        }
    }

    pub fn triangulate(&mut self) {
        let before = std::mem::take(&mut self.faces);
        self.faces = before.iter().flat_map(triangle_fan).collect();
    }
}

#[cfg(test)]
mod test {
    use glam::{vec3, Vec3};

    use crate::{
        element::Handle,
        macros::{assert_f32_eq, assert_vec3_eq},
        mesh::{test::unit_quad, Mesh},
        primitive::{PolyType, UvProfile},
    };

    fn cube() -> Mesh {
        Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace)
    }

    fn degrees(mesh: &Mesh) -> Vec<usize> {
        mesh.faces().iter().map(|f| f.degree()).collect()
    }

    #[test]
    fn t_inset_face() {
        let mut mesh = unit_quad();
        mesh.inset_face(0, 0.25);
        mesh.check().expect("Invalid mesh");
        assert_eq!(degrees(&mesh), vec![4; 5]);
        assert_eq!(mesh.num_positions(), 8);
        let inner = mesh.face_vertices(-1).expect("No face");
        assert_vec3_eq!(inner[0].position, vec3(-0.375, -0.375, 0.0));
        assert_vec3_eq!(inner[2].position, vec3(0.375, 0.375, 0.0));
        // The boundary quads keep the winding of the original face.
        for i in 0..5 {
            assert_vec3_eq!(mesh.calc_face_normal(i).unwrap(), Vec3::Z);
        }
    }

    #[test]
    fn t_inset_limits() {
        let mut mesh = unit_quad();
        mesh.inset_face(0, 0.0);
        mesh.inset_face(0, -1.0);
        assert_eq!(mesh, unit_quad());
        mesh.inset_face(0, 1.0);
        let mut fan = unit_quad();
        fan.subdiv_face_fan(0);
        assert_eq!(mesh, fan);
        assert_eq!(degrees(&mesh), vec![3; 4]);
    }

    #[test]
    fn t_extrude_face() {
        let mut mesh = unit_quad();
        mesh.extrude_face(0, false, 1.0, 1.0);
        mesh.check().expect("Invalid mesh");
        assert_eq!(mesh.num_faces(), 5);
        assert_vec3_eq!(mesh.calc_face_centroid(0).unwrap(), vec3(0.0, 0.0, 1.0));
        assert_vec3_eq!(mesh.calc_face_normal(0).unwrap(), Vec3::Z);
        // The first side wall is on the edge from corner 0 to 1, facing -Y.
        let side = mesh.face_vertices(1).unwrap();
        for v in &side {
            assert_vec3_eq!(v.normal, Vec3::NEG_Y);
        }
        assert_vec3_eq!(mesh.calc_face_normal(1).unwrap(), Vec3::NEG_Y);
        for i in 1..5 {
            let centroid = mesh.calc_face_centroid(i).unwrap();
            let normal = mesh.calc_face_normal(i).unwrap();
            assert!(normal.dot(centroid - vec3(0.0, 0.0, 0.5)) > 0.0);
        }
    }

    #[test]
    fn t_extrude_face_capped() {
        let mut mesh = unit_quad();
        mesh.extrude_face(-1, true, 2.0, 0.5);
        mesh.check().expect("Invalid mesh");
        assert_eq!(mesh.num_faces(), 6);
        // The cap is the original face, reversed.
        assert_vec3_eq!(mesh.calc_face_normal(0).unwrap(), Vec3::NEG_Z);
        assert_vec3_eq!(mesh.vertex(0, 0).unwrap().normal, Vec3::NEG_Z);
        assert_vec3_eq!(mesh.calc_face_centroid(0).unwrap(), Vec3::ZERO);
        // Tapered top.
        let top = mesh.face_vertices(1).unwrap();
        assert_vec3_eq!(top[0].position, vec3(-0.25, -0.25, 2.0));
        let (lo, hi) = mesh.calc_bounds().unwrap();
        assert_vec3_eq!(lo, vec3(-0.5, -0.5, 0.0));
        assert_vec3_eq!(hi, vec3(0.5, 0.5, 2.0));
    }

    #[test]
    fn t_extrude_faces() {
        let mut mesh = cube();
        mesh.extrude_faces(false, 0.5, 1.0);
        mesh.check().expect("Invalid mesh");
        assert_eq!(mesh.num_faces(), 6 * 5);
        let mut mesh = cube();
        mesh.extrude_faces(true, 0.5, 1.0);
        assert_eq!(mesh.num_faces(), 6 * 6);
        mesh.check().expect("Invalid mesh");
    }

    #[test]
    fn t_subdivision_counts() {
        let mut mesh = cube();
        mesh.subdiv_faces_center();
        assert_eq!(degrees(&mesh), vec![4; 24]);
        mesh.check().expect("Invalid mesh");

        let mut mesh = cube();
        mesh.subdiv_faces_fan();
        assert_eq!(degrees(&mesh), vec![3; 24]);
        mesh.check().expect("Invalid mesh");

        let mut mesh = Mesh::dodecahedron(PolyType::Ngon);
        mesh.subdiv_faces_inscribe();
        assert_eq!(mesh.num_faces(), 12 * 6);
        assert_eq!(&degrees(&mesh)[..6], &[3, 3, 3, 3, 3, 5]);
        mesh.check().expect("Invalid mesh");
    }

    #[test]
    fn t_subdiv_keeps_winding() {
        let mut mesh = cube();
        mesh.subdiv_faces_center();
        mesh.subdiv_faces_inscribe();
        for i in 0..mesh.num_faces() as isize {
            let normal = mesh.calc_face_normal(i).unwrap();
            let centroid = mesh.calc_face_centroid(i).unwrap();
            assert!(normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn t_single_face_subdivision() {
        let mut mesh = cube();
        let first = mesh.face(0).cloned();
        mesh.subdiv_face_center(-1);
        assert_eq!(mesh.num_faces(), 9);
        assert_eq!(mesh.face(0).cloned(), first);
        let center = mesh.vertex(5, 0).unwrap();
        assert_vec3_eq!(center.position, vec3(0.0, 0.0, 0.5));
        assert_vec3_eq!(center.normal, Vec3::Z);
    }

    #[test]
    fn t_bulk_matches_single() {
        let mut bulk = cube();
        bulk.inset_faces(0.3);
        let mut single = cube();
        for k in 0..6 {
            single.inset_face(k * 5, 0.3);
        }
        assert_eq!(bulk, single);

        let mut bulk = cube();
        bulk.extrude_faces(true, 0.4, 0.6);
        let mut single = cube();
        for k in 0..6 {
            single.extrude_face(k * 6, true, 0.4, 0.6);
        }
        assert_eq!(bulk, single);

        let mut bulk = cube();
        bulk.subdiv_faces_inscribe();
        let mut single = cube();
        for k in 0..6 {
            single.subdiv_face_inscribe(k * 5);
        }
        assert_eq!(bulk, single);
    }

    #[test]
    fn t_subdiv_edge() {
        let mut mesh = unit_quad();
        mesh.subdiv_edge(0, 0, 0);
        assert_eq!(mesh, unit_quad());
        mesh.subdiv_edge(0, 4, 3);
        mesh.check().expect("Invalid mesh");
        let verts = mesh.face_vertices(0).unwrap();
        assert_eq!(verts.len(), 7);
        let xs: Vec<f32> = verts[..5].iter().map(|v| v.position.x).collect();
        for (x, expected) in xs.iter().zip([-0.5, -0.25, 0.0, 0.25, 0.5]) {
            assert_f32_eq!(*x, expected);
        }
        assert_f32_eq!(verts[2].texcoord.x, 0.5);
        // Wrapped edge index, last edge back to the first corner.
        mesh.subdiv_edge(0, -1, 1);
        let verts = mesh.face_vertices(0).unwrap();
        assert_eq!(verts.len(), 8);
        assert_vec3_eq!(verts[7].position, vec3(-0.5, 0.0, 0.0));
    }

    #[test]
    fn t_extrude_edge() {
        let mut mesh = unit_quad();
        mesh.extrude_edge(0, 0, 0.0);
        assert_eq!(mesh, unit_quad());
        mesh.extrude_edge(0, 0, 1.0);
        mesh.check().expect("Invalid mesh");
        assert_eq!(mesh.num_faces(), 2);
        let quad = mesh.face_vertices(1).unwrap();
        assert_vec3_eq!(quad[0].position, vec3(-0.5, -1.5, 0.0));
        assert_vec3_eq!(quad[1].position, vec3(0.5, -1.5, 0.0));
        assert_vec3_eq!(quad[2].position, vec3(0.5, -0.5, 0.0));
        assert_vec3_eq!(mesh.calc_face_normal(1).unwrap(), Vec3::Z);
        // The new quad shares the positions of the source edge.
        let face = mesh.face(1).unwrap();
        assert_eq!(face.corner(3).position.index(), 0);
    }

    #[test]
    fn t_extrude_edge_follows_source() {
        let mut mesh = cube();
        let before: Vec<_> = mesh.faces().to_vec();
        mesh.extrude_edge(2, 0, 0.5);
        mesh.check().expect("Invalid mesh");
        assert_eq!(mesh.num_faces(), 7);
        assert_eq!(mesh.faces()[..3], before[..3]);
        assert_eq!(mesh.faces()[4..], before[3..]);
        // The new quad sits right after face 2 and ends on its first edge.
        let src = &before[2];
        let quad = mesh.face(3).unwrap();
        assert_eq!(quad.degree(), 4);
        assert_eq!(quad.corner(2).position, src.corner(1).position);
        assert_eq!(quad.corner(3).position, src.corner(0).position);
    }

    #[test]
    fn t_reverse_and_triangulate() {
        let mut mesh = cube();
        mesh.reverse_face(2);
        assert!(mesh.calc_face_normal(2).unwrap().dot(mesh.calc_face_centroid(2).unwrap()) < 0.0);
        mesh.reverse_faces();
        mesh.reverse_face(2);
        for i in 0..6 {
            assert!(mesh.calc_face_normal(i).unwrap().dot(mesh.calc_face_centroid(i).unwrap()) < 0.0);
        }
        let mut mesh = Mesh::polygon(6, PolyType::Ngon);
        mesh.triangulate_face(0);
        assert_eq!(degrees(&mesh), vec![3; 4]);
        let mut mesh = cube();
        let npos = mesh.num_positions();
        mesh.triangulate();
        assert_eq!(degrees(&mesh), vec![3; 12]);
        assert_eq!(mesh.num_positions(), npos);
    }

    #[test]
    fn t_empty_mesh_edits() {
        let mut mesh = Mesh::new();
        mesh.inset_face(0, 0.5);
        mesh.extrude_face(3, true, 1.0, 1.0);
        mesh.subdiv_face_center(-1);
        mesh.subdiv_edge(0, 0, 2);
        mesh.extrude_edge(0, 0, 1.0);
        mesh.subdiv_faces_fan();
        mesh.triangulate_face(0);
        assert_eq!(mesh, Mesh::new());
    }
}
