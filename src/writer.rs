//! XML writing for the 3MF model document
//!
//! Serializes a [`Model`] into the `3D/3dmodel.model` part content: one
//! `m:basematerials` collection, one `object` per part, and the `build`
//! listing. The namespace URIs, element and attribute names, and nesting are
//! the compatibility contract with slicer consumers; indentation is cosmetic.

use crate::error::{Error, Result};
use crate::model::{
    BASE_MATERIALS_ID, BaseMaterialGroup, Build, CORE_XMLNS, MATERIAL_XMLNS, Mesh, Model, Object,
};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::io::Write as IoWrite;

/// Write a Model to XML format
///
/// Generates the 3dmodel.model file content.
pub(crate) fn write_model_xml<W: IoWrite>(model: &Model, writer: W) -> Result<()> {
    let mut xml_writer = Writer::new_with_indent(writer, b' ', 2);

    xml_writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| Error::xml_write(format!("Failed to write XML declaration: {}", e)))?;

    let mut model_elem = BytesStart::new("model");
    model_elem.push_attribute(("unit", model.unit.as_str()));
    model_elem.push_attribute(("xml:lang", "en-US"));
    model_elem.push_attribute(("xmlns", CORE_XMLNS));
    model_elem.push_attribute(("xmlns:m", MATERIAL_XMLNS));

    xml_writer
        .write_event(Event::Start(model_elem))
        .map_err(|e| Error::xml_write(format!("Failed to write model element: {}", e)))?;

    write_resources(&mut xml_writer, model)?;
    write_build(&mut xml_writer, &model.build)?;

    xml_writer
        .write_event(Event::End(BytesEnd::new("model")))
        .map_err(|e| Error::xml_write(format!("Failed to close model element: {}", e)))?;

    Ok(())
}

/// Write resources section
fn write_resources<W: IoWrite>(writer: &mut Writer<W>, model: &Model) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to write resources element: {}", e)))?;

    if !model.materials.is_empty() {
        write_base_materials(writer, &model.materials)?;
    }

    for object in &model.objects {
        write_object(writer, object)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("resources")))
        .map_err(|e| Error::xml_write(format!("Failed to close resources element: {}", e)))?;

    Ok(())
}

/// Write the base material group
fn write_base_materials<W: IoWrite>(
    writer: &mut Writer<W>,
    group: &BaseMaterialGroup,
) -> Result<()> {
    let mut elem = BytesStart::new("m:basematerials");
    elem.push_attribute(("id", BASE_MATERIALS_ID.to_string().as_str()));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write basematerials element: {}", e)))?;

    for material in &group.materials {
        let mut mat_elem = BytesStart::new("m:base");
        mat_elem.push_attribute(("name", material.name.as_str()));
        // The color string is emitted exactly as the caller supplied it
        mat_elem.push_attribute(("displaycolor", material.displaycolor.as_str()));

        writer
            .write_event(Event::Empty(mat_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write base material: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("m:basematerials")))
        .map_err(|e| Error::xml_write(format!("Failed to close basematerials element: {}", e)))?;

    Ok(())
}

/// Write an object
fn write_object<W: IoWrite>(writer: &mut Writer<W>, object: &Object) -> Result<()> {
    let mut elem = BytesStart::new("object");
    elem.push_attribute(("id", object.id.to_string().as_str()));
    elem.push_attribute(("type", "model"));
    elem.push_attribute(("name", object.name.as_str()));
    elem.push_attribute(("pid", BASE_MATERIALS_ID.to_string().as_str()));
    elem.push_attribute(("pindex", object.pindex.to_string().as_str()));

    writer
        .write_event(Event::Start(elem))
        .map_err(|e| Error::xml_write(format!("Failed to write object element: {}", e)))?;

    write_mesh(writer, &object.mesh)?;

    writer
        .write_event(Event::End(BytesEnd::new("object")))
        .map_err(|e| Error::xml_write(format!("Failed to close object element: {}", e)))?;

    Ok(())
}

/// Write a mesh
fn write_mesh<W: IoWrite>(writer: &mut Writer<W>, mesh: &Mesh) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to write mesh element: {}", e)))?;

    writer
        .write_event(Event::Start(BytesStart::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to write vertices element: {}", e)))?;

    for vertex in &mesh.vertices {
        let mut v_elem = BytesStart::new("vertex");
        // Fixed six-decimal formatting, part of the output contract
        v_elem.push_attribute(("x", format!("{:.6}", vertex.x).as_str()));
        v_elem.push_attribute(("y", format!("{:.6}", vertex.y).as_str()));
        v_elem.push_attribute(("z", format!("{:.6}", vertex.z).as_str()));

        writer
            .write_event(Event::Empty(v_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write vertex: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("vertices")))
        .map_err(|e| Error::xml_write(format!("Failed to close vertices element: {}", e)))?;

    writer
        .write_event(Event::Start(BytesStart::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to write triangles element: {}", e)))?;

    for triangle in &mesh.triangles {
        let mut t_elem = BytesStart::new("triangle");
        t_elem.push_attribute(("v1", triangle.v1.to_string().as_str()));
        t_elem.push_attribute(("v2", triangle.v2.to_string().as_str()));
        t_elem.push_attribute(("v3", triangle.v3.to_string().as_str()));

        writer
            .write_event(Event::Empty(t_elem))
            .map_err(|e| Error::xml_write(format!("Failed to write triangle: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("triangles")))
        .map_err(|e| Error::xml_write(format!("Failed to close triangles element: {}", e)))?;

    writer
        .write_event(Event::End(BytesEnd::new("mesh")))
        .map_err(|e| Error::xml_write(format!("Failed to close mesh element: {}", e)))?;

    Ok(())
}

/// Write build section
fn write_build<W: IoWrite>(writer: &mut Writer<W>, build: &Build) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to write build element: {}", e)))?;

    for item in &build.items {
        let mut elem = BytesStart::new("item");
        elem.push_attribute(("objectid", item.objectid.to_string().as_str()));

        writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::xml_write(format!("Failed to write item: {}", e)))?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("build")))
        .map_err(|e| Error::xml_write(format!("Failed to close build element: {}", e)))?;

    Ok(())
}
