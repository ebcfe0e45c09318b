use glam::{Affine3A, Mat3, Quat, Vec3};

use crate::{
    math::{self, EPSILON},
    mesh::Mesh,
};

/// Push the magnitude of `x` to at least `EPSILON`, keeping its sign.
fn clamp_away_from_zero(x: f32) -> f32 {
    if x.abs() >= EPSILON {
        x
    } else if x.is_sign_negative() {
        -EPSILON
    } else {
        EPSILON
    }
}

impl Mesh {
    pub fn translate(&mut self, v: Vec3) {
        for p in self.attribs_mut().positions.iter_mut() {
            *p += v;
        }
    }

    /// Scale uniformly about the origin. A factor of zero would collapse the
    /// mesh, so it is replaced with `EPSILON`.
    pub fn scale(&mut self, s: f32) {
        self.scale_by(Vec3::splat(s));
    }

    /// Scale about the origin, by a different factor along each axis.
    pub fn scale_by(&mut self, v: Vec3) {
        let v = Vec3::new(
            clamp_away_from_zero(v.x),
            clamp_away_from_zero(v.y),
            clamp_away_from_zero(v.z),
        );
        for p in self.attribs_mut().positions.iter_mut() {
            *p *= v;
        }
    }

    /// Rotate positions and normals by `angle` radians around `axis`. A
    /// degenerate axis leaves the mesh untouched.
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        if let Some(axis) = axis.try_normalize() {
            self.rotate_by(Quat::from_axis_angle(axis, angle));
        }
    }

    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate_by(Quat::from_rotation_x(angle));
    }

    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_by(Quat::from_rotation_y(angle));
    }

    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate_by(Quat::from_rotation_z(angle));
    }

    fn rotate_by(&mut self, q: Quat) {
        let attribs = self.attribs_mut();
        for p in attribs.positions.iter_mut() {
            *p = q * *p;
        }
        for n in attribs.normals.iter_mut() {
            *n = q * *n;
        }
    }

    /// Apply an affine transformation. Normals are transformed by the inverse
    /// transpose of the linear part and normalized again. If the matrix is
    /// singular, the normals are left as they are.
    pub fn transform(&mut self, xform: &Affine3A) {
        let linear = Mat3::from(xform.matrix3);
        let det = linear.determinant();
        let normal_xform = (det.abs() > EPSILON).then(|| linear.inverse().transpose());
        let attribs = self.attribs_mut();
        for p in attribs.positions.iter_mut() {
            *p = xform.transform_point3(*p);
        }
        if let Some(nx) = normal_xform {
            for n in attribs.normals.iter_mut() {
                *n = math::normalize_or(nx * *n, *n);
            }
        }
    }

    /// Axis aligned bounding box of the positions, as `(min, max)`. Returns
    /// `None` if the mesh has no positions.
    pub fn calc_bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions().iter();
        let first = *iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }

    /// Size of the bounding box along each axis.
    pub fn calc_dimensions(&self) -> Vec3 {
        self.calc_bounds()
            .map(|(lo, hi)| hi - lo)
            .unwrap_or(Vec3::ZERO)
    }

    /// Move the mesh so its bounding box is centered at the origin.
    pub fn to_origin(&mut self) {
        if let Some((lo, hi)) = self.calc_bounds() {
            self.translate((lo + hi) * -0.5);
        }
    }

    /// Center the mesh at the origin and scale it uniformly so that its
    /// largest dimension spans from -0.5 to 0.5.
    pub fn reframe(&mut self) {
        let Some((lo, hi)) = self.calc_bounds() else {
            return;
        };
        let center = (lo + hi) * 0.5;
        let extent = (hi - lo).max_element();
        let scale = if extent > EPSILON { 1.0 / extent } else { 1.0 };
        for p in self.attribs_mut().positions.iter_mut() {
            *p = (*p - center) * scale;
        }
        log::debug!("Reframed {} by a factor of {}", self.name, scale);
    }
}

#[cfg(test)]
mod test {
    use std::f32::consts::FRAC_PI_2;

    use glam::{vec3, Affine3A, Vec3};

    use crate::{
        macros::{assert_f32_eq, assert_vec3_eq},
        mesh::{test::unit_quad, Mesh},
        primitive::{PolyType, UvProfile},
    };

    #[test]
    fn t_translate_and_bounds() {
        let mut mesh = Mesh::cube(0.5, PolyType::Quad, UvProfile::PerFace);
        mesh.translate(vec3(1.0, 2.0, 3.0));
        let (lo, hi) = mesh.calc_bounds().expect("No positions");
        assert_vec3_eq!(lo, vec3(0.5, 1.5, 2.5));
        assert_vec3_eq!(hi, vec3(1.5, 2.5, 3.5));
        assert_vec3_eq!(mesh.calc_dimensions(), Vec3::ONE);
        assert!(Mesh::new().calc_bounds().is_none());
        assert_eq!(Mesh::new().calc_dimensions(), Vec3::ZERO);
    }

    #[test]
    fn t_scale_clamps_zero() {
        let mut mesh = unit_quad();
        mesh.scale(0.0);
        assert!(mesh.positions().iter().all(|p| p.x != 0.0));
        mesh.scale_by(vec3(-2.0, 1.0, 1.0));
        assert!(mesh.positions()[0].x > 0.0);
    }

    #[test]
    fn t_rotate_turns_normals() {
        let mut mesh = unit_quad();
        mesh.rotate_x(FRAC_PI_2);
        assert_vec3_eq!(mesh.normals()[0], Vec3::NEG_Y);
        assert_vec3_eq!(mesh.positions()[2], vec3(0.5, 0.0, 0.5));
        let mut mesh = unit_quad();
        mesh.rotate(FRAC_PI_2, Vec3::X * 3.0);
        assert_vec3_eq!(mesh.normals()[0], Vec3::NEG_Y);
        // Degenerate axis.
        let mut mesh = unit_quad();
        mesh.rotate(1.0, Vec3::ZERO);
        assert_eq!(mesh, unit_quad());
    }

    #[test]
    fn t_transform_normals() {
        let mut mesh = unit_quad();
        mesh.rotate_z(0.3);
        mesh.transform(&Affine3A::from_scale(vec3(2.0, 1.0, 0.5)));
        assert_vec3_eq!(mesh.normals()[0], Vec3::Z);
        assert_vec3_eq!(mesh.calc_face_normal(0).unwrap(), Vec3::Z);
        assert_f32_eq!(mesh.normals()[0].length(), 1.0);
    }

    #[test]
    fn t_reframe() {
        let mut mesh = Mesh::cube(2.0, PolyType::Quad, UvProfile::PerFace);
        mesh.scale_by(vec3(1.0, 0.5, 0.25));
        mesh.translate(vec3(5.0, -3.0, 1.0));
        mesh.reframe();
        let (lo, hi) = mesh.calc_bounds().unwrap();
        assert_vec3_eq!(lo, vec3(-0.5, -0.25, -0.125));
        assert_vec3_eq!(hi, vec3(0.5, 0.25, 0.125));

        let mut mesh = unit_quad();
        mesh.translate(vec3(3.0, 3.0, 3.0));
        mesh.to_origin();
        let (lo, hi) = mesh.calc_bounds().unwrap();
        assert_vec3_eq!(lo + hi, Vec3::ZERO);
    }
}
