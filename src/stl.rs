//! STL mesh source decoding
//!
//! STL files carry an unindexed triangle soup: three loose corner points per
//! triangle, no shared-vertex information and no color data. The decoder
//! accepts both encodings and hands the soup to
//! [`Mesh::from_unindexed`](crate::model::Mesh::from_unindexed) for indexing.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector (ignored)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (ignored)
//! end
//! ```
//!
//! # Format Detection
//!
//! ASCII files start with "solid"; some binary exporters also put "solid" in
//! the header, so a "solid" prefix only counts as ASCII when the header
//! region is free of NUL bytes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::Vertex;

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Load the triangle soup from an STL file.
///
/// A nonexistent path is the soft [`Error::MissingSource`]; a present but
/// unrecognizable or truncated file is [`Error::Decode`].
pub fn load_triangles<P: AsRef<Path>>(path: P) -> Result<Vec<[Vertex; 3]>> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::MissingSource(path.to_path_buf())
        } else {
            Error::Io(e)
        }
    })?;

    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    decode_triangles(&data, path)
}

/// Decode the triangle soup from raw STL bytes.
///
/// `origin` names the source in decode errors.
pub fn decode_triangles(data: &[u8], origin: &Path) -> Result<Vec<[Vertex; 3]>> {
    if data.len() < 6 {
        return Err(Error::decode(origin, "file too small to be valid STL"));
    }

    if is_ascii_stl(data) {
        decode_ascii(data, origin)
    } else {
        decode_binary(data, origin)
    }
}

/// Check whether the bytes look like an ASCII solid.
///
/// Binary headers that happen to start with "solid" typically contain NUL
/// bytes in the remaining header region.
fn is_ascii_stl(data: &[u8]) -> bool {
    let head = &data[..data.len().min(HEADER_SIZE)];
    let text = String::from_utf8_lossy(head);
    text.trim_start().starts_with("solid") && !head.contains(&0)
}

fn decode_binary(data: &[u8], origin: &Path) -> Result<Vec<[Vertex; 3]>> {
    if data.len() < HEADER_SIZE + 4 {
        return Err(Error::decode(origin, "missing binary STL header"));
    }

    let declared = u32::from_le_bytes([
        data[HEADER_SIZE],
        data[HEADER_SIZE + 1],
        data[HEADER_SIZE + 2],
        data[HEADER_SIZE + 3],
    ]) as usize;

    let body = &data[HEADER_SIZE + 4..];
    let available = body.len() / TRIANGLE_SIZE;
    if available < declared {
        return Err(Error::decode(
            origin,
            format!("expected {declared} triangle records, payload holds {available}"),
        ));
    }

    let mut soup = Vec::with_capacity(declared);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(declared) {
        // The 12-byte normal is skipped; only the three corner points matter.
        soup.push([
            read_corner(&record[12..24]),
            read_corner(&record[24..36]),
            read_corner(&record[36..48]),
        ]);
    }

    debug!(
        source = %origin.display(),
        triangles = soup.len(),
        "decoded binary STL"
    );
    Ok(soup)
}

/// Read a corner point from 12 bytes (3 little-endian f32s).
///
/// STL stores f32; widening to the f64 model coordinates is lossless, so
/// bitwise vertex identity survives the conversion.
fn read_corner(buf: &[u8]) -> Vertex {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vertex::new(f64::from(x), f64::from(y), f64::from(z))
}

fn decode_ascii(data: &[u8], origin: &Path) -> Result<Vec<[Vertex; 3]>> {
    let text = std::str::from_utf8(data)
        .map_err(|_| Error::decode(origin, "ASCII solid contains invalid UTF-8"))?;

    let mut soup = Vec::new();
    let mut corners: Vec<Vertex> = Vec::with_capacity(3);
    let mut in_loop = false;

    for line in text.lines() {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            continue;
        };

        match keyword {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let mut coords = [0.0f64; 3];
                for coord in &mut coords {
                    let word = words.next().ok_or_else(|| {
                        Error::decode(origin, "vertex line with fewer than 3 coordinates")
                    })?;
                    *coord = word.parse().map_err(|_| {
                        Error::decode(origin, format!("malformed coordinate '{word}'"))
                    })?;
                }
                corners.push(Vertex::new(coords[0], coords[1], coords[2]));
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if corners.len() == 3 {
                    soup.push([corners[0], corners[1], corners[2]]);
                }
                corners.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    debug!(
        source = %origin.display(),
        triangles = soup.len(),
        "decoded ASCII STL"
    );
    Ok(soup)
}

/// Build binary STL bytes from corner triplets. Test fixture helper.
#[cfg(test)]
pub(crate) fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
    let mut data = vec![0u8; HEADER_SIZE];
    data.extend_from_slice(&(triangles.len() as u32).to_le_bytes());
    for corners in triangles {
        data.extend_from_slice(&[0u8; 12]); // normal
        for corner in corners {
            for coord in corner {
                data.extend_from_slice(&coord.to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes()); // attribute count
    }
    data
}
