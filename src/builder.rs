//! Scene assembly from part descriptions
//!
//! One conversion run turns an ordered part list into a finished [`Model`]:
//! each part is decoded, indexed, and attached to a freshly numbered object
//! referencing its registered color. Parts whose sources are missing or
//! undecodable are skipped with a warning and contribute nothing — no object,
//! no identity, no build item — so the surviving objects keep their relative
//! input order.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{BuildItem, FIRST_OBJECT_ID, Mesh, Model, Object};
use crate::stl;

/// Description of one input part: a mesh source plus its display properties
#[derive(Debug, Clone)]
pub struct Part {
    /// Path to the STL source file
    pub source: PathBuf,
    /// Display color as a hex string of the form `#RRGGBB`, passed through
    /// unvalidated
    pub color: String,
    /// Human-readable part name
    pub name: String,
}

impl Part {
    /// Create a new part description
    pub fn new(
        source: impl Into<PathBuf>,
        color: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            color: color.into(),
            name: name.into(),
        }
    }
}

/// Assemble a model from an ordered part list.
///
/// Object identities start at [`FIRST_OBJECT_ID`] and increase monotonically
/// over the parts that survive decoding; material indices are assigned in
/// first-seen color order. Returns [`Error::EmptyInput`] when no part
/// produces an object.
pub(crate) fn build_model(parts: &[Part]) -> Result<Model> {
    let mut model = Model::new();
    let mut next_id = FIRST_OBJECT_ID;

    for part in parts {
        let soup = match stl::load_triangles(&part.source) {
            Ok(soup) => soup,
            Err(err) if err.is_part_local() => {
                warn!(part = %part.name, "{err}, skipping");
                continue;
            }
            Err(err) => return Err(err),
        };

        let mesh = Mesh::from_unindexed(soup);
        let pindex = model.materials.register(&part.color, &part.name);

        debug!(
            part = %part.name,
            id = next_id,
            vertices = mesh.vertices.len(),
            triangles = mesh.triangles.len(),
            pindex,
            "assembled object"
        );

        model
            .objects
            .push(Object::new(next_id, part.name.clone(), pindex, mesh));
        model.build.items.push(BuildItem::new(next_id));
        next_id += 1;
    }

    if model.objects.is_empty() {
        return Err(Error::EmptyInput);
    }

    Ok(model)
}
