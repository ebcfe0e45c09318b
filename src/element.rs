use std::fmt::{Debug, Display};

/**
 * All handles into a mesh implement this trait. They are identified by their
 * index into the collection they refer to.
 */
pub trait Handle {
    /**
     * The index of the element.
     */
    fn index(&self) -> u32;
}

macro_rules! handle_type {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name {
            idx: u32,
        }

        impl Handle for $name {
            fn index(&self) -> u32 {
                self.idx
            }
        }

        impl From<u32> for $name {
            fn from(idx: u32) -> Self {
                $name { idx }
            }
        }

        impl From<&u32> for $name {
            fn from(idx: &u32) -> Self {
                $name { idx: *idx }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.idx)
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.idx)
            }
        }
    };
}

handle_type!(PH, "Position handle.");
handle_type!(TH, "Texture coordinate handle.");
handle_type!(NH, "Normal handle.");
handle_type!(FH, "Face handle.");

/// One corner of a polygon. Each of the three handles indexes its own
/// attribute collection, so the same position can be paired with different
/// texture coordinates and normals in different corners.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Corner {
    pub position: PH,
    pub texcoord: TH,
    pub normal: NH,
}

impl Corner {
    pub fn new(position: PH, texcoord: TH, normal: NH) -> Self {
        Corner {
            position,
            texcoord,
            normal,
        }
    }

    /// Corner whose three handles share the same index.
    pub fn uniform(idx: u32) -> Self {
        Corner::new(idx.into(), idx.into(), idx.into())
    }
}

impl From<[u32; 3]> for Corner {
    fn from([p, t, n]: [u32; 3]) -> Self {
        Corner::new(p.into(), t.into(), n.into())
    }
}

/// A polygon, as an ordered loop of corners. The order of the corners
/// determines the winding, and the front side of the polygon by the right
/// hand rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Face {
    corners: Vec<Corner>,
}

impl Face {
    pub fn new(corners: Vec<Corner>) -> Self {
        Face { corners }
    }

    pub fn with_capacity(n: usize) -> Self {
        Face {
            corners: Vec::with_capacity(n),
        }
    }

    /// Number of corners.
    pub fn degree(&self) -> usize {
        self.corners.len()
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn corners_mut(&mut self) -> &mut [Corner] {
        &mut self.corners
    }

    pub fn corner(&self, i: usize) -> Corner {
        self.corners[i]
    }

    pub fn push(&mut self, c: Corner) {
        self.corners.push(c);
    }

    pub(crate) fn insert_corners(&mut self, at: usize, corners: impl IntoIterator<Item = Corner>) {
        self.corners.splice(at..at, corners);
    }

    pub fn reverse(&mut self) {
        self.corners.reverse();
    }

    /// Iterate over the edges of the face as pairs of consecutive corners,
    /// wrapping around from the last corner to the first.
    pub fn edges(&self) -> impl Iterator<Item = (Corner, Corner)> + use<'_> {
        let n = self.corners.len();
        (0..n).map(move |i| (self.corners[i], self.corners[(i + 1) % n]))
    }

    /// Wrap a signed corner index into the range of this face.
    pub fn wrap_index(&self, i: isize) -> Option<usize> {
        match self.corners.len() {
            0 => None,
            n => Some(i.rem_euclid(n as isize) as usize),
        }
    }
}

impl From<Vec<Corner>> for Face {
    fn from(corners: Vec<Corner>) -> Self {
        Face { corners }
    }
}

impl<const N: usize> From<[[u32; 3]; N]> for Face {
    fn from(corners: [[u32; 3]; N]) -> Self {
        corners.into_iter().map(Corner::from).collect()
    }
}

impl FromIterator<Corner> for Face {
    fn from_iter<T: IntoIterator<Item = Corner>>(iter: T) -> Self {
        Face {
            corners: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Face {
    type Item = &'a Corner;
    type IntoIter = std::slice::Iter<'a, Corner>;

    fn into_iter(self) -> Self::IntoIter {
        self.corners.iter()
    }
}

/// The attribute values a corner resolves to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    pub position: glam::Vec3,
    pub texcoord: glam::Vec2,
    pub normal: glam::Vec3,
}

/// An edge of a face, from `origin` to `dest` following the winding.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Edge {
    pub origin: Vertex,
    pub dest: Vertex,
}

impl Edge {
    pub fn vector(&self) -> glam::Vec3 {
        self.dest.position - self.origin.position
    }

    pub fn length(&self) -> f32 {
        self.vector().length()
    }
}

#[cfg(test)]
mod test {
    use super::{Corner, Face, Handle, FH, PH};

    #[test]
    fn t_handle_display() {
        let p: PH = 4u32.into();
        assert_eq!(p.index(), 4);
        assert_eq!(format!("{p}"), "PH(4)");
        assert_eq!(format!("{:?}", FH::from(2u32)), "FH(2)");
    }

    #[test]
    fn t_face_edges_wrap() {
        let face = Face::from([[0, 0, 0], [1, 1, 0], [2, 2, 0]]);
        let edges: Vec<_> = face
            .edges()
            .map(|(a, b)| (a.position.index(), b.position.index()))
            .collect();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn t_face_wrap_index() {
        let face: Face = (0..5).map(Corner::uniform).collect();
        assert_eq!(face.wrap_index(-1), Some(4));
        assert_eq!(face.wrap_index(7), Some(2));
        assert_eq!(Face::default().wrap_index(0), None);
    }
}
