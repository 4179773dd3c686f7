//! Property-based tests for the decode/dedup pipeline
//!
//! These generate random triangle soups and verify the vertex-table
//! invariants hold across a wide range of inputs.

use std::collections::HashSet;

use proptest::prelude::*;
use stl3mf::{Mesh, Vertex};

/// Generate a corner point on a small grid so corners actually collide and
/// exercise the deduplication path.
fn corner_strategy() -> impl Strategy<Value = Vertex> {
    (0i32..4, 0i32..4, 0i32..4)
        .prop_map(|(x, y, z)| Vertex::new(f64::from(x), f64::from(y), f64::from(z)))
}

fn soup_strategy() -> impl Strategy<Value = Vec<[Vertex; 3]>> {
    prop::collection::vec(proptest::array::uniform3(corner_strategy()), 0..64)
}

fn expand(mesh: &Mesh) -> Vec<[Vertex; 3]> {
    mesh.triangles
        .iter()
        .map(|t| {
            [
                mesh.vertices[t.v1],
                mesh.vertices[t.v2],
                mesh.vertices[t.v3],
            ]
        })
        .collect()
}

proptest! {
    /// N input triangles yield exactly N triangles and at most 3N vertices.
    #[test]
    fn indexing_preserves_triangle_count(soup in soup_strategy()) {
        let mesh = Mesh::from_unindexed(soup.clone());
        prop_assert_eq!(mesh.triangles.len(), soup.len());
        prop_assert!(mesh.vertices.len() <= soup.len() * 3);
    }

    /// Every emitted index stays within the mesh's own vertex table.
    #[test]
    fn indices_stay_in_range(soup in soup_strategy()) {
        let mesh = Mesh::from_unindexed(soup);
        for triangle in &mesh.triangles {
            prop_assert!(triangle.v1 < mesh.vertices.len());
            prop_assert!(triangle.v2 < mesh.vertices.len());
            prop_assert!(triangle.v3 < mesh.vertices.len());
        }
    }

    /// Vertex table entries are pairwise distinct as raw coordinate tuples.
    #[test]
    fn vertex_table_has_no_duplicates(soup in soup_strategy()) {
        let mesh = Mesh::from_unindexed(soup);
        let distinct: HashSet<[u64; 3]> = mesh
            .vertices
            .iter()
            .map(|v| [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()])
            .collect();
        prop_assert_eq!(distinct.len(), mesh.vertices.len());
    }

    /// Expanding an indexed mesh back to a soup loses nothing.
    #[test]
    fn indexing_preserves_geometry(soup in soup_strategy()) {
        let mesh = Mesh::from_unindexed(soup.clone());
        prop_assert_eq!(expand(&mesh), soup);
    }

    /// Re-indexing an already deduplicated mesh is a no-op.
    #[test]
    fn reindexing_is_idempotent(soup in soup_strategy()) {
        let mesh = Mesh::from_unindexed(soup);
        let again = Mesh::from_unindexed(expand(&mesh));
        prop_assert_eq!(again, mesh);
    }
}
