//! Scene types for the 3MF model document
//!
//! The model is assembled once per conversion run: one [`Object`] per input
//! part, a single shared [`BaseMaterialGroup`] holding the part colors, and a
//! [`Build`] listing the objects to place.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Core 3MF model namespace
pub const CORE_XMLNS: &str = "http://schemas.microsoft.com/3dmanufacturing/core/2015/02";

/// Materials & Properties extension namespace
pub const MATERIAL_XMLNS: &str = "http://schemas.microsoft.com/3dmanufacturing/material/2015/02";

/// Resource identity of the single base material group
pub const BASE_MATERIALS_ID: usize = 1;

/// First object identity; identity 1 is taken by the material group
pub const FIRST_OBJECT_ID: usize = 2;

/// A 3D vertex with x, y, z coordinates in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Bitwise lookup key; two vertices share a table entry only when their
    /// coordinate tuples are bit-for-bit equal.
    fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

/// A triangle defined by three indices into its mesh's vertex table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    /// Index of first vertex
    pub v1: usize,
    /// Index of second vertex
    pub v2: usize,
    /// Index of third vertex
    pub v3: usize,
}

impl Triangle {
    /// Create a new triangle
    pub fn new(v1: usize, v2: usize, v3: usize) -> Self {
        Self { v1, v2, v3 }
    }
}

/// An indexed triangle mesh
///
/// Vertices are pairwise distinct as raw coordinate tuples; triangle indices
/// always reference this mesh's own vertex table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Unique vertices in first-seen order
    pub vertices: Vec<Vertex>,
    /// Triangles as index triplets into `vertices`
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mesh with pre-allocated capacity
    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Build an indexed mesh from an unindexed triangle sequence.
    ///
    /// STL stores three loose corner points per triangle with no shared-vertex
    /// information. Each corner is looked up in a transient value→index map
    /// and appended to the vertex table on first sight, so emitted indices
    /// follow first-seen order. Equality is exact on the coordinate bits; no
    /// epsilon tolerance is applied, so corners differing by floating-point
    /// noise stay distinct entries.
    pub fn from_unindexed<I>(triangles: I) -> Self
    where
        I: IntoIterator<Item = [Vertex; 3]>,
    {
        let iter = triangles.into_iter();
        let (lower, _) = iter.size_hint();
        let mut mesh = Mesh::with_capacity(lower.saturating_mul(3), lower);
        let mut table: HashMap<[u64; 3], usize> = HashMap::with_capacity(lower);

        for corners in iter {
            let mut indices = [0usize; 3];
            for (slot, corner) in indices.iter_mut().zip(corners) {
                *slot = match table.entry(corner.bits()) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        let index = mesh.vertices.len();
                        mesh.vertices.push(corner);
                        *entry.insert(index)
                    }
                };
            }
            mesh.triangles
                .push(Triangle::new(indices[0], indices[1], indices[2]));
        }

        mesh
    }
}

/// Individual base material within the base material group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseMaterial {
    /// Material name
    pub name: String,
    /// Display color, carried verbatim as supplied (expected `#RRGGBB`)
    ///
    /// The string is not validated; a malformed value passes through into the
    /// package unchanged.
    pub displaycolor: String,
}

impl BaseMaterial {
    /// Create a new base material
    pub fn new(name: String, displaycolor: String) -> Self {
        Self { name, displaycolor }
    }
}

/// The material registry: one base material per distinct display color
///
/// Serialized as a single `m:basematerials` resource with identity
/// [`BASE_MATERIALS_ID`]. Registration order is first-seen order and fixes
/// each color's index for the lifetime of the scene.
#[derive(Debug, Clone, Default)]
pub struct BaseMaterialGroup {
    /// Base materials in registration order
    pub materials: Vec<BaseMaterial>,
    by_color: HashMap<String, usize>,
}

impl BaseMaterialGroup {
    /// Create a new empty group
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up or assign the material index for a display color.
    ///
    /// A repeated color returns its existing index and leaves the recorded
    /// name untouched; the first part to introduce a color names it.
    pub fn register(&mut self, color: &str, name: &str) -> usize {
        if let Some(&index) = self.by_color.get(color) {
            return index;
        }
        let index = self.materials.len();
        self.materials
            .push(BaseMaterial::new(name.to_string(), color.to_string()));
        self.by_color.insert(color.to_string(), index);
        index
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// True if no material has been registered
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// One mesh-bearing resource: a converted part
#[derive(Debug, Clone)]
pub struct Object {
    /// Object identity, unique within the package and disjoint from
    /// [`BASE_MATERIALS_ID`]
    pub id: usize,
    /// Display name shown by slicers
    pub name: String,
    /// Index into the base material group
    pub pindex: usize,
    /// The part's indexed mesh
    pub mesh: Mesh,
}

impl Object {
    /// Create a new object
    pub fn new(id: usize, name: String, pindex: usize, mesh: Mesh) -> Self {
        Self {
            id,
            name,
            pindex,
            mesh,
        }
    }
}

/// An item to be built, referencing an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildItem {
    /// Reference to object identity
    pub objectid: usize,
}

impl BuildItem {
    /// Create a new build item
    pub fn new(objectid: usize) -> Self {
        Self { objectid }
    }
}

/// Build section listing the objects to place, in input order
#[derive(Debug, Clone, Default)]
pub struct Build {
    /// List of items to build
    pub items: Vec<BuildItem>,
}

impl Build {
    /// Create a new empty build section
    pub fn new() -> Self {
        Self::default()
    }
}

/// Complete multi-part model document
#[derive(Debug, Clone)]
pub struct Model {
    /// Unit of measurement
    pub unit: String,
    /// Shared material registry
    pub materials: BaseMaterialGroup,
    /// Mesh-bearing objects in input-part order
    pub objects: Vec<Object>,
    /// Build specification
    pub build: Build,
}

impl Model {
    /// Create a new empty model in millimeters
    pub fn new() -> Self {
        Self {
            unit: "millimeter".to_string(),
            materials: BaseMaterialGroup::new(),
            objects: Vec::new(),
            build: Build::new(),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: Vertex, b: Vertex, c: Vertex) -> [Vertex; 3] {
        [a, b, c]
    }

    #[test]
    fn test_shared_edge_dedup() {
        // Two triangles sharing an edge: 6 corners, 4 distinct points
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(10.0, 0.0, 0.0);
        let c = Vertex::new(0.0, 10.0, 0.0);
        let d = Vertex::new(10.0, 10.0, 0.0);

        let mesh = Mesh::from_unindexed(vec![tri(a, b, c), tri(b, d, c)]);

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangles.len(), 2);
        assert_eq!(mesh.triangles[0], Triangle::new(0, 1, 2));
        assert_eq!(mesh.triangles[1], Triangle::new(1, 3, 2));
    }

    #[test]
    fn test_dedup_is_exact_not_tolerant() {
        let a = Vertex::new(1.0, 2.0, 3.0);
        let jittered = Vertex::new(1.0 + f64::EPSILON, 2.0, 3.0);
        let b = Vertex::new(4.0, 5.0, 6.0);

        let mesh = Mesh::from_unindexed(vec![tri(a, jittered, b)]);

        // Noise-separated corners remain distinct entries
        assert_eq!(mesh.vertices.len(), 3);
    }

    #[test]
    fn test_reindexing_is_idempotent() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(1.0, 0.0, 0.0);
        let c = Vertex::new(0.0, 1.0, 0.0);
        let d = Vertex::new(1.0, 1.0, 0.0);
        let mesh = Mesh::from_unindexed(vec![tri(a, b, c), tri(b, d, c)]);

        // Expand back to a soup and re-index
        let soup: Vec<[Vertex; 3]> = mesh
            .triangles
            .iter()
            .map(|t| {
                [
                    mesh.vertices[t.v1],
                    mesh.vertices[t.v2],
                    mesh.vertices[t.v3],
                ]
            })
            .collect();
        let again = Mesh::from_unindexed(soup);

        assert_eq!(again, mesh);
    }

    #[test]
    fn test_degenerate_triangles_pass_through() {
        let a = Vertex::new(0.0, 0.0, 0.0);
        let b = Vertex::new(1.0, 0.0, 0.0);

        let mesh = Mesh::from_unindexed(vec![tri(a, a, b)]);

        assert_eq!(mesh.vertices.len(), 2);
        assert_eq!(mesh.triangles[0], Triangle::new(0, 0, 1));
    }

    #[test]
    fn test_register_assigns_sequential_indices() {
        let mut group = BaseMaterialGroup::new();
        assert_eq!(group.register("#F5F5F0", "Sign Base"), 0);
        assert_eq!(group.register("#1A1A1A", "Sign Text"), 1);
        assert_eq!(group.register("#FF0000", "Accent"), 2);
        assert_eq!(group.len(), 3);
    }

    #[test]
    fn test_register_first_name_wins() {
        let mut group = BaseMaterialGroup::new();
        assert_eq!(group.register("#1A1A1A", "Sign Text"), 0);
        assert_eq!(group.register("#1A1A1A", "Stand"), 0);
        assert_eq!(group.len(), 1);
        assert_eq!(group.materials[0].name, "Sign Text");
    }

    #[test]
    fn test_register_keeps_color_verbatim() {
        let mut group = BaseMaterialGroup::new();
        // Malformed hex is passed through, not rejected
        group.register("not-a-color", "Odd One");
        assert_eq!(group.materials[0].displaycolor, "not-a-color");
    }
}
