//! # stl3mf
//!
//! Convert a set of independently exported STL part files into a single
//! multi-part, multi-color 3MF package ready for slicer software.
//!
//! 3MF files are ZIP-based containers following the Open Packaging
//! Conventions (OPC) standard and holding an XML model document. Each input
//! part is decoded from STL, its vertices deduplicated into an indexed mesh,
//! and attached to an object referencing a shared material table built from
//! the part colors.
//!
//! ## Features
//!
//! - Pure Rust implementation with no unsafe code
//! - Binary and ASCII STL decoding with exact vertex deduplication
//! - One shared material entry per distinct part color
//! - Conformant OPC container output (manifest, relationships, model)
//!
//! ## Example
//!
//! ```no_run
//! use stl3mf::{Model, Part};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let parts = [
//!     Part::new("sign_plate.stl", "#F5F5F0", "Sign Base"),
//!     Part::new("sign_elements.stl", "#1A1A1A", "Sign Text"),
//! ];
//!
//! let model = Model::from_parts(&parts)?;
//! model.write_to_file("sign_multicolor.3mf")?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod error;
pub mod model;
pub mod opc;
pub mod stl;
mod writer;

pub use builder::Part;
pub use error::{Error, Result};
pub use model::{
    BASE_MATERIALS_ID, BaseMaterial, BaseMaterialGroup, Build, BuildItem, FIRST_OBJECT_ID, Mesh,
    Model, Object, Triangle, Vertex,
};

impl Model {
    /// Assemble a model from an ordered part list
    ///
    /// Each part's STL source is decoded and deduplicated into one object;
    /// parts whose sources are missing or undecodable are skipped with a
    /// warning. Object identities start at 2 (identity 1 is the material
    /// collection) and follow input order over the surviving parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] when the list is empty or every part
    /// was skipped.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stl3mf::{Model, Part};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let model = Model::from_parts(&[Part::new("stand.stl", "#1A1A1A", "Stand")])?;
    /// println!("Model contains {} objects", model.objects.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_parts(parts: &[Part]) -> Result<Self> {
        builder::build_model(parts)
    }

    /// Write a 3MF package to a writer
    ///
    /// Serializes the model document to XML and wraps it, together with the
    /// fixed manifest and relationship entries, into a ZIP archive written
    /// to `writer`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use stl3mf::{Model, Part};
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let model = Model::from_parts(&[Part::new("stand.stl", "#1A1A1A", "Stand")])?;
    /// let cursor = model.to_writer(Cursor::new(Vec::new()))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_writer<W: std::io::Write + std::io::Seek>(&self, writer: W) -> Result<W> {
        let mut xml_buffer = Vec::new();
        writer::write_model_xml(self, &mut xml_buffer)?;
        let model_xml = String::from_utf8(xml_buffer)
            .map_err(|e| Error::xml_write(format!("Failed to convert XML to UTF-8: {}", e)))?;

        opc::create_package(writer, &model_xml)
    }

    /// Write a 3MF package to a file path
    ///
    /// Convenience method that creates the file and writes the package to
    /// it. Creation and write failures surface as [`Error::Write`] naming
    /// the destination.
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.to_writer(file)?;
        Ok(())
    }
}
