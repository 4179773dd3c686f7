//! OPC (Open Packaging Conventions) packaging for 3MF output
//!
//! 3MF files are ZIP archives following the OPC standard. The package this
//! crate produces holds exactly three entries: the content-type manifest,
//! the package relationships, and the model document.

use crate::error::{Error, Result};

/// Main 3D model file path within the 3MF archive
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Content types file path
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Relationships file path
pub const RELS_PATH: &str = "_rels/.rels";

/// Fixed content-type manifest declaring the relationships and 3D-model types
const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

/// Fixed relationship descriptor pointing at the model document
const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

/// Create a 3MF package (ZIP archive) from model document XML
///
/// Writes the three fixed entries with standard deflate compression:
/// - `[Content_Types].xml`
/// - `_rels/.rels`
/// - `3D/3dmodel.model`
///
/// # Returns
///
/// Returns the writer after finishing the ZIP archive
pub fn create_package<W: std::io::Write + std::io::Seek>(writer: W, model_xml: &str) -> Result<W> {
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    zip.start_file(CONTENT_TYPES_PATH, options)
        .map_err(|e| Error::xml_write(format!("Failed to create Content_Types file: {}", e)))?;
    zip.write_all(CONTENT_TYPES.as_bytes())
        .map_err(|e| Error::xml_write(format!("Failed to write Content_Types: {}", e)))?;

    zip.start_file(RELS_PATH, options)
        .map_err(|e| Error::xml_write(format!("Failed to create relationships file: {}", e)))?;
    zip.write_all(RELS.as_bytes())
        .map_err(|e| Error::xml_write(format!("Failed to write relationships: {}", e)))?;

    zip.start_file(MODEL_PATH, options)
        .map_err(|e| Error::xml_write(format!("Failed to create model file: {}", e)))?;
    zip.write_all(model_xml.as_bytes())
        .map_err(|e| Error::xml_write(format!("Failed to write model XML: {}", e)))?;

    let writer = zip
        .finish()
        .map_err(|e| Error::xml_write(format!("Failed to finalize ZIP archive: {}", e)))?;

    Ok(writer)
}
