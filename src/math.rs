use std::cmp::Ordering;

use glam::{Vec2, Vec3};

use crate::element::Vertex;

/// Smallest magnitude accepted for sizes, radii, depths and scale factors.
pub const EPSILON: f32 = 1e-6;

/// Lexicographic total ordering of 2D vectors.
pub(crate) fn cmp_vec2(a: Vec2, b: Vec2) -> Ordering {
    a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y))
}

/// Lexicographic total ordering of 3D vectors, x first.
pub(crate) fn cmp_vec3(a: Vec3, b: Vec3) -> Ordering {
    a.x.total_cmp(&b.x)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.z.total_cmp(&b.z))
}

/// Ordering of 3D vectors by z first, then y, then x.
pub(crate) fn cmp_vec3_zyx(a: Vec3, b: Vec3) -> Ordering {
    a.z.total_cmp(&b.z)
        .then_with(|| a.y.total_cmp(&b.y))
        .then_with(|| a.x.total_cmp(&b.x))
}

/// Normalize `v`, or return `fallback` if `v` has no usable direction.
pub(crate) fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Unnormalized polygon normal using Newell's method. The magnitude is twice
/// the area of the polygon when it is planar.
pub(crate) fn newell_normal(points: impl IntoIterator<Item = Vec3>) -> Vec3 {
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Vec3::ZERO;
    };
    let mut total = Vec3::ZERO;
    let mut prev = first;
    let mut accum = |pc: Vec3, pn: Vec3| {
        let (a, b) = (pc - pn, pc + pn);
        total += Vec3::new(a.y * b.z, a.z * b.x, a.x * b.y);
    };
    for p in iter {
        accum(prev, p);
        prev = p;
    }
    accum(prev, first);
    total
}

impl Vertex {
    /// Linear interpolation of all attributes. The interpolated normal is
    /// normalized again, falling back to the normal of `self` when the
    /// interpolation cancels out.
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: self.position.lerp(other.position, t),
            texcoord: self.texcoord.lerp(other.texcoord, t),
            normal: normalize_or(self.normal.lerp(other.normal, t), self.normal),
        }
    }

    /// Mean of two vertices. Computed symmetrically so that the midpoint of
    /// `(a, b)` is bit-identical to the midpoint of `(b, a)`.
    pub fn midpoint(&self, other: &Vertex) -> Vertex {
        Vertex {
            position: (self.position + other.position) * 0.5,
            texcoord: (self.texcoord + other.texcoord) * 0.5,
            normal: normalize_or(self.normal + other.normal, self.normal),
        }
    }

    /// Mean of the vertices. Positions and texture coordinates are averaged
    /// arithmetically, normals are averaged and normalized. If the normals
    /// cancel out, the Newell normal of the positions is used, and `+Z` if
    /// that is degenerate too.
    pub fn mean(verts: &[Vertex]) -> Vertex {
        if verts.is_empty() {
            return Vertex {
                position: Vec3::ZERO,
                texcoord: Vec2::splat(0.5),
                normal: Vec3::Z,
            };
        }
        let denom = verts.len() as f32;
        let (position, texcoord, normal) = verts.iter().fold(
            (Vec3::ZERO, Vec2::ZERO, Vec3::ZERO),
            |(p, t, n), v| (p + v.position, t + v.texcoord, n + v.normal),
        );
        let normal = match normal.try_normalize() {
            Some(n) => n,
            None => normalize_or(newell_normal(verts.iter().map(|v| v.position)), Vec3::Z),
        };
        Vertex {
            position: position / denom,
            texcoord: texcoord / denom,
            normal,
        }
    }
}
