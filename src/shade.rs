use std::sync::Arc;

use glam::Vec3;

use crate::{element::Handle, mesh::face_newell_normal, mesh::Mesh};

impl Mesh {
    /// Give the face a flat normal computed from its positions. The normal is
    /// appended, and all corners of the face are bound to it. Faces with no
    /// area are left as they are.
    pub fn shade_flat_face(&mut self, face: isize) {
        let Some(i) = self.wrap_face_index(face) else {
            return;
        };
        let Some(normal) = face_newell_normal(&self.attribs, &self.faces[i]).try_normalize() else {
            return;
        };
        let nh = self.attribs_mut().push_normal(normal);
        for c in self.faces[i].corners_mut() {
            c.normal = nh;
        }
    }

    /// Flat shade every face. See [`Mesh::shade_flat_face`].
    pub fn shade_flat(&mut self) {
        for i in 0..self.faces.len() {
            self.shade_flat_face(i as isize);
        }
    }

    /// Replace the normals with one smooth normal per position, and bind every
    /// corner to the normal of its position.
    ///
    /// The normal of a position is the sum over all the corners at that
    /// position, of the cross product of the two edges meeting at the corner.
    /// The cross products are not normalized before summing, so larger faces
    /// contribute more. Positions not used by any face get `+Z`.
    pub fn shade_smooth(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.num_positions()];
        {
            let attribs = &self.attribs;
            for face in &self.faces {
                let c = face.corners();
                let n = c.len();
                for j in 0..n {
                    let cur = attribs.position(c[j].position);
                    let next = attribs.position(c[(j + 1) % n].position);
                    let prev = attribs.position(c[(j + n - 1) % n].position);
                    accum[c[j].position.index() as usize] += (next - cur).cross(prev - cur);
                }
            }
        }
        let normals: Vec<Vec3> = accum
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
            .collect();
        Arc::make_mut(&mut self.attribs).normals = normals;
        for c in self.faces.iter_mut().flat_map(|f| f.corners_mut().iter_mut()) {
            c.normal = c.position.index().into();
        }
    }
}
