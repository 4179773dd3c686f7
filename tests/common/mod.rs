//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use stl3mf::{Model, Part};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Two triangles sharing an edge: 6 corners, 4 distinct points.
pub const QUAD: [[[f32; 3]; 3]; 2] = [
    [[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]],
    [[10.0, 0.0, 0.0], [10.0, 10.0, 0.0], [0.0, 10.0, 0.0]],
];

/// A single triangle.
pub const TRIANGLE: [[[f32; 3]; 3]; 1] =
    [[[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]]];

/// Build binary STL bytes from corner triplets.
pub fn binary_stl(triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
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

/// Write a binary STL fixture into `dir` and return its path.
pub fn write_stl(dir: &Path, name: &str, triangles: &[[[f32; 3]; 3]]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, binary_stl(triangles)).unwrap();
    path
}

/// Convert parts and return the packaged bytes.
pub fn package(parts: &[Part]) -> Vec<u8> {
    let model = Model::from_parts(parts).expect("Failed to assemble model");
    let cursor = model
        .to_writer(Cursor::new(Vec::new()))
        .expect("Failed to write package");
    cursor.into_inner()
}

/// List the entry names of a packaged archive.
pub fn entry_names(package: &[u8]) -> Vec<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).expect("Failed to open package");
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

/// Read one archive entry as text.
pub fn read_entry(package: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(package)).expect("Failed to open package");
    let mut entry = archive.by_name(name).expect("Missing package entry");
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}
