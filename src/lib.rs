/*!
An indexed polygon mesh library for procedurally authoring and editing solid
and surface geometry.

# Overview

+ A [`Mesh`] is an attribute store made of three independent collections:
  positions, texture coordinates and normals, and a face table. Each face is
  a loop of [`Corner`]s, and each corner holds one handle into each of the
  three collections. So a position shared by several faces can have a
  different texture coordinate and normal in each of them.

+ Meshes are created with primitive generators such as [`Mesh::cube`],
  [`Mesh::uv_sphere`] and [`Mesh::torus`], from raw parts with
  [`Mesh::from_parts`], or by reading Wavefront obj files with
  [`ObjReader`] or [`Mesh::load_obj`].

+ Topological editors modify meshes in place: [`Mesh::inset_face`],
  [`Mesh::extrude_face`], [`Mesh::extrude_edge`], [`Mesh::subdiv_edge`] and
  the three face subdivisions, along with bulk variants that edit every face.
  Faces and edges are addressed with signed indices that wrap around, and
  parameters are clamped, so editing never fails.

+ Editors only ever append attributes. [`Mesh::clean`] removes the attributes
  no face refers to, merges duplicates and sorts the mesh.

+ [`Mesh::shade_flat`] and [`Mesh::shade_smooth`] recompute normals.

+ The attribute store is reference counted and copied on write. Cloning a
  mesh, or reading several groups from an obj file with pooling enabled,
  produces meshes that share their attributes until they are edited.
*/

mod clean;
mod edit;
mod element;
mod error;
mod macros;
mod math;
mod mesh;
mod obj;
mod primitive;
mod shade;
mod transform;

pub use element::{Corner, Edge, Face, Handle, Vertex, FH, NH, PH, TH};
pub use error::Error;
pub use math::EPSILON;
pub use mesh::{Attributes, Mesh};
pub use obj::{meshes_to_obj_string, write_meshes, ObjImport, ObjReader};
pub use primitive::{PolyType, UvProfile};
