use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{vec2, vec3, Vec2, Vec3};

use crate::{
    element::{Corner, Face, Handle},
    math::{self, EPSILON},
    mesh::{Attributes, Mesh},
};

/// The kind of polygons a generator should produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum PolyType {
    /// Polygons with any number of corners.
    #[default]
    Ngon,
    /// Quadrilaterals where the topology allows it, otherwise n-gons.
    Quad,
    /// Triangles only.
    Tri,
}

/// Texture coordinate layouts for the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UvProfile {
    /// Every face maps to the full unit square.
    #[default]
    PerFace,
    /// The faces are unfolded into a cross shaped net.
    Cross,
}

/// Circumradius of the platonic solids and the UV sphere.
const SOLID_RADIUS: f32 = 0.5;

/// Build a mesh out of generated parts. The generators below are expected to
/// only produce valid faces.
fn assemble(name: &str, attribs: Attributes, faces: Vec<Face>) -> Mesh {
    let mesh = Mesh::from_parts_unchecked(name, attribs, faces);
    debug_assert!(mesh.check().is_ok(), "Generated an invalid mesh");
    log::debug!(
        "Generated {}: {} positions, {} texcoords, {} normals, {} faces",
        name,
        mesh.num_positions(),
        mesh.num_texcoords(),
        mesh.num_normals(),
        mesh.num_faces()
    );
    mesh
}

/// Push a polygon given as parallel index lists, either as one face or as a
/// triangle fan depending on `poly`.
fn push_polygon(faces: &mut Vec<Face>, corners: &[Corner], poly: PolyType) {
    match poly {
        PolyType::Tri if corners.len() > 3 => {
            for i in 1..(corners.len() - 1) {
                faces.push(Face::new(vec![corners[0], corners[i], corners[i + 1]]));
            }
        }
        _ => faces.push(Face::new(corners.to_vec())),
    }
}

/// Texture coordinates of a regular polygon inscribed in the unit square,
/// with the first corner at the top.
fn regular_polygon_uvs(n: usize) -> impl Iterator<Item = Vec2> {
    (0..n).map(move |k| {
        let theta = FRAC_PI_2 + TAU * (k as f32) / (n as f32);
        vec2(0.5 + 0.5 * theta.cos(), 0.5 + 0.5 * theta.sin())
    })
}

/// Shared implementation for the platonic solids. `unit_positions` lie on the
/// unit sphere. Every face gets its own flat normal, and all faces share the
/// texture coordinates of a regular polygon.
fn platonic(name: &str, unit_positions: &[[f32; 3]], faces: &[&[u32]], poly: PolyType) -> Mesh {
    let degree = faces.first().map(|f| f.len()).unwrap_or(3);
    let mut attribs = Attributes::with_capacity(unit_positions.len(), degree, faces.len());
    attribs.positions.extend(
        unit_positions
            .iter()
            .map(|p| Vec3::from_array(*p) * SOLID_RADIUS),
    );
    attribs.texcoords.extend(regular_polygon_uvs(degree));
    let mut out = Vec::with_capacity(faces.len());
    let mut corners = Vec::with_capacity(degree);
    for fvs in faces {
        let normal = math::normalize_or(
            math::newell_normal(fvs.iter().map(|&v| attribs.positions[v as usize])),
            Vec3::Z,
        );
        let nh = attribs.push_normal(normal);
        corners.clear();
        corners.extend(
            fvs.iter()
                .enumerate()
                .map(|(k, &v)| Corner::new(v.into(), (k as u32).into(), nh)),
        );
        push_polygon(&mut out, &corners, poly);
    }
    assemble(name, attribs, out)
}

/// Primitive solids. All of them are centered at the origin, use `+Z` as up,
/// and wind their faces counter-clockwise when seen from the outside.
impl Mesh {
    /// Makes a cube spanning from `-size` to `size` along every axis, with
    /// the following topology.
    ///
    ///  ```text
    ///       3-----------7
    ///      /|          /|
    ///     / |         / |
    ///    1-----------5  |
    ///    |  |        |  |
    ///    |  2--------|--6
    ///    | /         | /
    ///    |/          |/
    ///    0-----------4
    ///  ```
    ///
    /// The cube has 8 positions and 6 normals. It has 6 quads, or 12
    /// triangles when `poly` is [`PolyType::Tri`]. With
    /// [`UvProfile::PerFace`] it has 4 texture coordinates, and 14 with
    /// [`UvProfile::Cross`].
    pub fn cube(size: f32, poly: PolyType, profile: UvProfile) -> Mesh {
        const CUBE_POS: [[f32; 3]; 8] = [
            [-1.0, -1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
        ];
        const CUBE_NORMALS: [Vec3; 6] = [
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::X,
            Vec3::NEG_Y,
            Vec3::NEG_Z,
            Vec3::Z,
        ];
        // Corners of every face, starting at the bottom left when seen from
        // the outside. The last entry is the normal index.
        const CUBE_FACES: [([u32; 4], u32); 6] = [
            ([2, 0, 1, 3], 0),
            ([6, 2, 3, 7], 1),
            ([4, 6, 7, 5], 2),
            ([0, 4, 5, 1], 3),
            ([0, 2, 6, 4], 4),
            ([5, 7, 3, 1], 5),
        ];
        // Texture coordinates of the cross net, indexed by face.
        const CROSS_UVS: [[u32; 4]; 6] = [
            [3, 4, 9, 8],
            [2, 3, 8, 7],
            [1, 2, 7, 6],
            [0, 1, 6, 5],
            [12, 13, 2, 1],
            [6, 7, 11, 10],
        ];
        let size = size.abs().max(EPSILON);
        let mut attribs = Attributes::with_capacity(8, 14, 6);
        attribs
            .positions
            .extend(CUBE_POS.iter().map(|p| Vec3::from_array(*p) * size));
        attribs.normals.extend_from_slice(&CUBE_NORMALS);
        match profile {
            UvProfile::PerFace => attribs.texcoords.extend_from_slice(&[
                vec2(0.0, 0.0),
                vec2(1.0, 0.0),
                vec2(1.0, 1.0),
                vec2(0.0, 1.0),
            ]),
            UvProfile::Cross => {
                for v in [1.0 / 3.0, 2.0 / 3.0] {
                    attribs
                        .texcoords
                        .extend((0..5).map(|i| vec2(i as f32 * 0.25, v)));
                }
                attribs.texcoords.extend_from_slice(&[
                    vec2(0.25, 1.0),
                    vec2(0.5, 1.0),
                    vec2(0.25, 0.0),
                    vec2(0.5, 0.0),
                ]);
            }
        }
        let mut faces = Vec::with_capacity(12);
        for (fi, (fvs, ni)) in CUBE_FACES.iter().enumerate() {
            let uvs = match profile {
                UvProfile::PerFace => [0, 1, 2, 3],
                UvProfile::Cross => CROSS_UVS[fi],
            };
            let corners: [Corner; 4] =
                std::array::from_fn(|k| Corner::new(fvs[k].into(), uvs[k].into(), ni.into()));
            push_polygon(&mut faces, &corners, poly);
        }
        assemble("Cube", attribs, faces)
    }

    /// Create a tetrahedron centered at the origin. The vertices lie on a
    /// sphere of radius 0.5. It has 4 positions, 4 normals and 4 triangles.
    pub fn tetrahedron() -> Mesh {
        let a = 1.0f32 / 3.0;
        let b = (8.0f32 / 9.0).sqrt();
        let c = (2.0f32 / 9.0).sqrt();
        let d = (2.0f32 / 3.0).sqrt();
        platonic(
            "Tetrahedron",
            &[[0.0, 0.0, 1.0], [-c, d, -a], [-c, -d, -a], [b, 0.0, -a]],
            &[&[0, 1, 2], &[0, 2, 3], &[0, 3, 1], &[3, 2, 1]],
            PolyType::Tri,
        )
    }

    /// Create an octahedron centered at the origin. The vertices lie on a
    /// sphere of radius 0.5. It has 6 positions, 8 normals and 8 triangles.
    pub fn octahedron() -> Mesh {
        platonic(
            "Octahedron",
            &[
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 0.0, -1.0],
            ],
            &[
                &[0, 4, 3],
                &[1, 4, 0],
                &[2, 4, 1],
                &[3, 4, 2],
                &[3, 5, 0],
                &[0, 5, 1],
                &[1, 5, 2],
                &[2, 5, 3],
            ],
            PolyType::Tri,
        )
    }

    /// Create an icosahedron centered at the origin. The vertices lie on a
    /// sphere of radius 0.5. It has 12 positions, 20 normals and 20
    /// triangles.
    pub fn icosahedron() -> Mesh {
        const A: f32 = 0.525_731_1;
        const B: f32 = 0.850_650_8;
        platonic(
            "Icosahedron",
            &[
                [0.0, A, -B],
                [A, B, 0.0],
                [-A, B, 0.0],
                [0.0, A, B],
                [0.0, -A, B],
                [-B, 0.0, A],
                [0.0, -A, -B],
                [B, 0.0, -A],
                [B, 0.0, A],
                [-B, 0.0, -A],
                [A, -B, 0.0],
                [-A, -B, 0.0],
            ],
            &[
                &[2, 1, 0],
                &[1, 2, 3],
                &[5, 4, 3],
                &[4, 8, 3],
                &[7, 6, 0],
                &[6, 9, 0],
                &[11, 10, 4],
                &[10, 11, 6],
                &[9, 5, 2],
                &[5, 9, 11],
                &[8, 7, 1],
                &[7, 8, 10],
                &[2, 5, 3],
                &[8, 1, 3],
                &[9, 2, 0],
                &[1, 7, 0],
                &[11, 9, 6],
                &[7, 10, 6],
                &[5, 11, 4],
                &[10, 8, 4],
            ],
            PolyType::Tri,
        )
    }

    /// Create a dodecahedron centered at the origin. The vertices lie on a
    /// sphere of radius 0.5. It has 20 positions and 12 normals, and 12
    /// pentagons, or 36 triangles when `poly` is [`PolyType::Tri`].
    pub fn dodecahedron(poly: PolyType) -> Mesh {
        const A: f32 = 0.356_822_1;
        const B: f32 = 0.934_172_4;
        const C: f32 = 0.577_350_3;
        platonic(
            "Dodecahedron",
            &[
                [0.0, B, -A],
                [0.0, B, A],
                [-A, 0.0, B],
                [A, 0.0, B],
                [A, 0.0, -B],
                [-A, 0.0, -B],
                [0.0, -B, A],
                [0.0, -B, -A],
                [-B, A, 0.0],
                [-B, -A, 0.0],
                [B, A, 0.0],
                [B, -A, 0.0],
                [-C, C, C],
                [C, C, C],
                [-C, C, -C],
                [C, C, -C],
                [-C, -C, -C],
                [C, -C, -C],
                [-C, -C, C],
                [C, -C, C],
            ],
            &[
                &[15, 4, 5, 14, 0],
                &[15, 0, 1, 13, 10],
                &[14, 8, 12, 1, 0],
                &[13, 1, 12, 2, 3],
                &[19, 3, 2, 18, 6],
                &[18, 2, 12, 8, 9],
                &[17, 7, 16, 5, 4],
                &[17, 4, 15, 10, 11],
                &[19, 11, 10, 13, 3],
                &[16, 9, 8, 14, 5],
                &[19, 6, 7, 17, 11],
                &[18, 9, 16, 7, 6],
            ],
            poly,
        )
    }

    /// Create a UV sphere of radius 0.5 with `longitudes` sectors around the
    /// `Z` axis and `latitudes` bands from pole to pole. Both counts are
    /// clamped to at least 3.
    ///
    /// The sphere has `2 + longitudes * (latitudes - 1)` positions, one normal
    /// per position, and `(longitudes + 1) * (latitudes + 1)` texture
    /// coordinates. The polar bands are triangle fans; the other bands are
    /// quads, or pairs of triangles when `poly` is [`PolyType::Tri`].
    pub fn uv_sphere(longitudes: usize, latitudes: usize, poly: PolyType) -> Mesh {
        let lons = longitudes.max(3);
        let lats = latitudes.max(3);
        let nrings = lats - 1;
        let npos = 2 + lons * nrings;
        let mut attribs = Attributes::with_capacity(npos, (lons + 1) * (lats + 1), npos);
        // Positions, and normals with the same indices.
        attribs.positions.push(vec3(0.0, 0.0, SOLID_RADIUS));
        for i in 1..lats {
            let (sin_theta, cos_theta) = (PI * i as f32 / lats as f32).sin_cos();
            for j in 0..lons {
                let (sin_phi, cos_phi) = (TAU * j as f32 / lons as f32).sin_cos();
                attribs.positions.push(
                    vec3(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta) * SOLID_RADIUS,
                );
            }
        }
        attribs.positions.push(vec3(0.0, 0.0, -SOLID_RADIUS));
        let normals: Vec<Vec3> = attribs
            .positions
            .iter()
            .map(|p| math::normalize_or(*p, Vec3::Z))
            .collect();
        attribs.normals = normals;
        for i in 0..=lats {
            let v = 1.0 - i as f32 / lats as f32;
            attribs
                .texcoords
                .extend((0..=lons).map(|j| vec2(j as f32 / lons as f32, v)));
        }
        let south = (npos - 1) as u32;
        // Position of ring `i` (1 based), sector `j`.
        let pos = |i: usize, j: usize| (1 + (i - 1) * lons + (j % lons)) as u32;
        let uv = |i: usize, j: usize| (i * (lons + 1) + j) as u32;
        let corner = |p: u32, t: u32| Corner::new(p.into(), t.into(), p.into());
        let mut faces = Vec::new();
        for j in 0..lons {
            faces.push(Face::new(vec![
                corner(pos(1, j), uv(1, j)),
                corner(pos(1, j + 1), uv(1, j + 1)),
                corner(0, uv(0, j)),
            ]));
        }
        for i in 1..nrings {
            for j in 0..lons {
                let corners = [
                    corner(pos(i + 1, j), uv(i + 1, j)),
                    corner(pos(i + 1, j + 1), uv(i + 1, j + 1)),
                    corner(pos(i, j + 1), uv(i, j + 1)),
                    corner(pos(i, j), uv(i, j)),
                ];
                push_polygon(&mut faces, &corners, poly);
            }
        }
        for j in 0..lons {
            faces.push(Face::new(vec![
                corner(south, uv(lats, j)),
                corner(pos(nrings, j + 1), uv(nrings, j + 1)),
                corner(pos(nrings, j), uv(nrings, j)),
            ]));
        }
        assemble("Sphere", attribs, faces)
    }

    /// Create a cylinder around the `Z` axis with the given radius and depth,
    /// with its base at `-depth / 2` and its top at `depth / 2`.
    ///
    /// The cylinder has `2 * sectors` positions and one smooth normal per
    /// sector. The side is made of quads, or pairs of triangles when `poly`
    /// is [`PolyType::Tri`]. If `fill_cap` is true, two cap polygons and two
    /// cap normals are added; the caps are triangle fans when `poly` is
    /// [`PolyType::Tri`].
    pub fn cylinder(
        sectors: usize,
        fill_cap: bool,
        radius: f32,
        depth: f32,
        poly: PolyType,
    ) -> Mesh {
        let s = sectors.max(3);
        let radius = radius.abs().max(EPSILON);
        let half = depth.abs().max(EPSILON) * 0.5;
        let mut attribs = Attributes::with_capacity(2 * s, 3 * s + 2, s + 2);
        let dirs: Vec<Vec2> = (0..s)
            .map(|j| {
                let (sin, cos) = (TAU * j as f32 / s as f32).sin_cos();
                vec2(cos, sin)
            })
            .collect();
        for z in [-half, half] {
            attribs
                .positions
                .extend(dirs.iter().map(|d| (*d * radius).extend(z)));
        }
        attribs.normals.extend(dirs.iter().map(|d| d.extend(0.0)));
        for v in [0.0, 1.0] {
            attribs
                .texcoords
                .extend((0..=s).map(|j| vec2(j as f32 / s as f32, v)));
        }
        let mut faces = Vec::new();
        for j in 0..s {
            let k = (j + 1) % s;
            let corners = [
                Corner::from([j as u32, j as u32, j as u32]),
                Corner::from([k as u32, (j + 1) as u32, k as u32]),
                Corner::from([(s + k) as u32, (s + 2 + j) as u32, k as u32]),
                Corner::from([(s + j) as u32, (s + 1 + j) as u32, j as u32]),
            ];
            push_polygon(&mut faces, &corners, poly);
        }
        if fill_cap {
            let uv_start = attribs.texcoords.len() as u32;
            attribs
                .texcoords
                .extend(dirs.iter().map(|d| Vec2::splat(0.5) + *d * 0.5));
            let top = attribs.push_normal(Vec3::Z);
            let bottom = attribs.push_normal(Vec3::NEG_Z);
            let top_corners: Vec<Corner> = (0..s)
                .map(|j| Corner::new(((s + j) as u32).into(), (uv_start + j as u32).into(), top))
                .collect();
            let bottom_corners: Vec<Corner> = (0..s)
                .rev()
                .map(|j| Corner::new((j as u32).into(), (uv_start + j as u32).into(), bottom))
                .collect();
            push_polygon(&mut faces, &top_corners, poly);
            push_polygon(&mut faces, &bottom_corners, poly);
        }
        assemble("Cylinder", attribs, faces)
    }

    /// Create a cone around the `Z` axis with the given base radius and
    /// depth. The base is at `-depth / 2` and the apex at `depth / 2`.
    ///
    /// The cone has `sectors + 1` positions and `sectors` side triangles. The
    /// side has `2 * sectors` normals: one per base corner and one per apex
    /// corner. If `fill_cap` is true, the base is closed with one polygon and
    /// one more normal; the base is a triangle fan when `poly` is
    /// [`PolyType::Tri`].
    pub fn cone(sectors: usize, fill_cap: bool, radius: f32, depth: f32, poly: PolyType) -> Mesh {
        let s = sectors.max(3);
        let radius = radius.abs().max(EPSILON);
        let depth = depth.abs().max(EPSILON);
        let half = depth * 0.5;
        let mut attribs = Attributes::with_capacity(s + 1, 3 * s + 1, 2 * s + 1);
        let dir = |t: f32| {
            let (sin, cos) = (TAU * t / s as f32).sin_cos();
            vec2(cos, sin)
        };
        // Normal of the slanted side, in the direction `d`.
        let slant = |d: Vec2| math::normalize_or((d * depth).extend(radius), Vec3::Z);
        attribs
            .positions
            .extend((0..s).map(|j| (dir(j as f32) * radius).extend(-half)));
        let apex = attribs.push_position(vec3(0.0, 0.0, half));
        attribs.normals.extend((0..s).map(|j| slant(dir(j as f32))));
        attribs
            .normals
            .extend((0..s).map(|j| slant(dir(j as f32 + 0.5))));
        attribs
            .texcoords
            .extend((0..=s).map(|j| vec2(j as f32 / s as f32, 0.0)));
        attribs
            .texcoords
            .extend((0..s).map(|j| vec2((j as f32 + 0.5) / s as f32, 1.0)));
        let mut faces = Vec::with_capacity(2 * s);
        for j in 0..s {
            let k = (j + 1) % s;
            faces.push(Face::new(vec![
                Corner::from([j as u32, j as u32, j as u32]),
                Corner::from([k as u32, (j + 1) as u32, k as u32]),
                Corner::new(apex, ((s + 1 + j) as u32).into(), ((s + j) as u32).into()),
            ]));
        }
        if fill_cap {
            let uv_start = attribs.texcoords.len() as u32;
            attribs
                .texcoords
                .extend((0..s).map(|j| Vec2::splat(0.5) + dir(j as f32) * 0.5));
            let bottom = attribs.push_normal(Vec3::NEG_Z);
            let corners: Vec<Corner> = (0..s)
                .rev()
                .map(|j| Corner::new((j as u32).into(), (uv_start + j as u32).into(), bottom))
                .collect();
            push_polygon(&mut faces, &corners, poly);
        }
        assemble("Cone", attribs, faces)
    }

    /// Create a torus around the `Z` axis, with a major radius of 0.5 and a
    /// tube radius of `thickness`, clamped to `[EPSILON, 0.5]`.
    ///
    /// The torus has `sectors * panels` positions with one normal each, and
    /// `(sectors + 1) * (panels + 1)` texture coordinates. It has
    /// `sectors * panels` quads, or twice as many triangles when `poly` is
    /// [`PolyType::Tri`].
    pub fn torus(sectors: usize, panels: usize, thickness: f32, poly: PolyType) -> Mesh {
        const MAJOR: f32 = 0.5;
        let s = sectors.max(3);
        let p = panels.max(3);
        let minor = thickness.abs().clamp(EPSILON, MAJOR);
        let mut attribs = Attributes::with_capacity(s * p, (s + 1) * (p + 1), s * p);
        for i in 0..s {
            let (sin_phi, cos_phi) = (TAU * i as f32 / s as f32).sin_cos();
            let radial = vec3(cos_phi, sin_phi, 0.0);
            for j in 0..p {
                let (sin_theta, cos_theta) = (TAU * j as f32 / p as f32).sin_cos();
                let normal = radial * cos_theta + Vec3::Z * sin_theta;
                attribs.positions.push(radial * MAJOR + normal * minor);
                attribs.normals.push(normal);
            }
        }
        for i in 0..=s {
            attribs
                .texcoords
                .extend((0..=p).map(|j| vec2(i as f32 / s as f32, j as f32 / p as f32)));
        }
        let pos = |i: usize, j: usize| ((i % s) * p + (j % p)) as u32;
        let uv = |i: usize, j: usize| (i * (p + 1) + j) as u32;
        let corner = |i: usize, j: usize| Corner::new(pos(i, j).into(), uv(i, j).into(), pos(i, j).into());
        let mut faces = Vec::new();
        for i in 0..s {
            for j in 0..p {
                let corners = [
                    corner(i, j),
                    corner(i + 1, j),
                    corner(i + 1, j + 1),
                    corner(i, j + 1),
                ];
                push_polygon(&mut faces, &corners, poly);
            }
        }
        assemble("Torus", attribs, faces)
    }

    /// Create a unit square in the `XY` plane facing `+Z`. It has 4
    /// positions, 4 texture coordinates and 1 normal, and one quad or two
    /// triangles.
    pub fn square(poly: PolyType) -> Mesh {
        let attribs = Attributes {
            positions: vec![
                vec3(-0.5, -0.5, 0.0),
                vec3(0.5, -0.5, 0.0),
                vec3(0.5, 0.5, 0.0),
                vec3(-0.5, 0.5, 0.0),
            ],
            texcoords: vec![
                vec2(0.0, 0.0),
                vec2(1.0, 0.0),
                vec2(1.0, 1.0),
                vec2(0.0, 1.0),
            ],
            normals: vec![Vec3::Z],
        };
        let corners: Vec<Corner> = (0..4u32).map(|i| Corner::from([i, i, 0])).collect();
        let mut faces = Vec::with_capacity(2);
        push_polygon(&mut faces, &corners, poly);
        assemble("Square", attribs, faces)
    }

    /// Create a regular polygon with a circumradius of 0.5 in the `XY` plane,
    /// facing `+Z`. With [`PolyType::Tri`] the polygon is a fan of triangles
    /// around an added center vertex, otherwise it is one n-gon.
    pub fn polygon(sectors: usize, poly: PolyType) -> Mesh {
        let s = sectors.max(3);
        let mut attribs = Attributes::with_capacity(s + 1, s + 1, 1);
        attribs.texcoords.extend(regular_polygon_uvs(s));
        attribs.positions.extend(
            attribs
                .texcoords
                .iter()
                .map(|t| (*t - Vec2::splat(0.5)).extend(0.0)),
        );
        let nh = attribs.push_normal(Vec3::Z);
        let ring: Vec<Corner> = (0..s as u32)
            .map(|i| Corner::new(i.into(), i.into(), nh))
            .collect();
        let faces = match poly {
            PolyType::Tri => {
                let center = Corner::new(
                    attribs.push_position(Vec3::ZERO),
                    attribs.push_texcoord(Vec2::splat(0.5)),
                    nh,
                );
                (0..s)
                    .map(|j| Face::new(vec![center, ring[j], ring[(j + 1) % s]]))
                    .collect()
            }
            PolyType::Quad | PolyType::Ngon => vec![Face::new(ring)],
        };
        assemble("Polygon", attribs, faces)
    }

    /// Project this mesh onto a sphere of the given radius, returning a new
    /// mesh. Normals are replaced by the directions of the positions from the
    /// origin, one normal per position.
    pub fn cast_to_sphere(&self, radius: f32) -> Mesh {
        let (positions, normals) = sphere_projection(self.positions(), radius);
        let faces = self
            .faces
            .iter()
            .map(|f| {
                f.corners()
                    .iter()
                    .map(|c| Corner::new(c.position, c.texcoord, c.position.index().into()))
                    .collect()
            })
            .collect();
        let attribs = Attributes {
            positions,
            texcoords: self.texcoords().to_vec(),
            normals,
        };
        Mesh::from_parts_unchecked(&self.name, attribs, faces)
    }

    /// Project this mesh onto a sphere of the given radius, in place. The
    /// normal collection is replaced by one normal per position, and every
    /// corner's normal handle is rewritten to match its position handle.
    pub fn cast_to_sphere_in_place(&mut self, radius: f32) {
        let (positions, normals) = sphere_projection(self.positions(), radius);
        {
            let attribs = self.attribs_mut();
            attribs.positions = positions;
            attribs.normals = normals;
        }
        for c in self.faces.iter_mut().flat_map(|f| f.corners_mut().iter_mut()) {
            c.normal = c.position.index().into();
        }
    }
}

/// Positions moved onto the sphere, and their unit directions. Positions at
/// the origin stay there, with an up normal.
fn sphere_projection(positions: &[Vec3], radius: f32) -> (Vec<Vec3>, Vec<Vec3>) {
    let radius = radius.abs().max(EPSILON);
    positions
        .iter()
        .map(|p| match p.try_normalize() {
            Some(n) => (n * radius, n),
            None => (Vec3::ZERO, Vec3::Z),
        })
        .unzip()
}
