use std::{cmp::Ordering, sync::Arc};

use glam::Vec3;

use crate::{
    element::Handle,
    math,
    mesh::{face_centroid, Attributes, Mesh},
};

/// Sorted, deduplicated copy of the values referenced by `indices`.
fn compact<T, F>(values: &[T], indices: impl Iterator<Item = u32>, cmp: F) -> Vec<T>
where
    T: Copy,
    F: Fn(T, T) -> Ordering,
{
    let mut used = vec![false; values.len()];
    for i in indices {
        used[i as usize] = true;
    }
    let mut out: Vec<T> = values
        .iter()
        .zip(used)
        .filter_map(|(v, u)| u.then_some(*v))
        .collect();
    out.sort_by(|a, b| cmp(*a, *b));
    out.dedup_by(|a, b| cmp(*a, *b) == Ordering::Equal);
    out
}

/// Position of `value` in the sorted list `sorted`. The value must be present.
fn remap<T, F>(sorted: &[T], value: T, cmp: F) -> u32
where
    T: Copy,
    F: Fn(T, T) -> Ordering,
{
    match sorted.binary_search_by(|probe| cmp(*probe, value)) {
        Ok(i) => i as u32,
        Err(_) => panic!("Referenced attribute missing from the compacted list"),
    }
}

impl Mesh {
    /// Compact the mesh. Attributes that no face refers to are removed, and
    /// attributes that are exactly equal are merged. The remaining attributes
    /// are sorted, and so are the faces, by the z, then y, then x coordinates
    /// of their centroids. Cleaning an already clean mesh does nothing.
    pub fn clean(&mut self) {
        let (positions, texcoords, normals) = {
            let attribs = &self.attribs;
            let corners = || self.faces.iter().flat_map(|f| f.corners().iter());
            (
                compact(
                    &attribs.positions,
                    corners().map(|c| c.position.index()),
                    math::cmp_vec3,
                ),
                compact(
                    &attribs.texcoords,
                    corners().map(|c| c.texcoord.index()),
                    math::cmp_vec2,
                ),
                compact(
                    &attribs.normals,
                    corners().map(|c| c.normal.index()),
                    math::cmp_vec3,
                ),
            )
        };
        let old = Arc::clone(&self.attribs);
        for c in self.faces.iter_mut().flat_map(|f| f.corners_mut().iter_mut()) {
            c.position = remap(&positions, old.position(c.position), math::cmp_vec3).into();
            c.texcoord = remap(&texcoords, old.texcoord(c.texcoord), math::cmp_vec2).into();
            c.normal = remap(&normals, old.normal(c.normal), math::cmp_vec3).into();
        }
        log::debug!(
            "Cleaned {}: positions {} -> {}, texcoords {} -> {}, normals {} -> {}",
            self.name,
            old.positions.len(),
            positions.len(),
            old.texcoords.len(),
            texcoords.len(),
            old.normals.len(),
            normals.len()
        );
        drop(old);
        self.attribs = Arc::new(Attributes {
            positions,
            texcoords,
            normals,
        });
        let attribs = &self.attribs;
        self.faces.sort_by_cached_key(|f| CentroidKey(face_centroid(attribs, f)));
    }
}

/// Sorting key for faces.
struct CentroidKey(Vec3);

impl PartialEq for CentroidKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CentroidKey {}

impl PartialOrd for CentroidKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CentroidKey {
    fn cmp(&self, other: &Self) -> Ordering {
        math::cmp_vec3_zyx(self.0, other.0)
    }
}
