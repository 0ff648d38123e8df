//! Test fixtures: minimal JPEG files carrying an EXIF block.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Minimal valid JPEG after the SOI marker: a 1x1 baseline image
const JPEG_BODY: &[u8] = &[
    0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06, 0x05, 0x08, 0x07, 0x07, 0x07,
    0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B, 0x0C, 0x19, 0x12, 0x13, 0x0F,
    0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20, 0x24, 0x2E, 0x27, 0x20, 0x22,
    0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31, 0x34, 0x34, 0x34, 0x1F, 0x27,
    0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF, 0xC0, 0x00, 0x0B, 0x08, 0x00,
    0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00, 0x1F, 0x00, 0x00, 0x01, 0x05,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0xFF, 0xC4, 0x00, 0xB5, 0x10,
    0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05, 0x04, 0x04, 0x00, 0x00, 0x01,
    0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21, 0x31, 0x41, 0x06, 0x13, 0x51,
    0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08, 0x23, 0x42, 0xB1, 0xC1, 0x15,
    0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A, 0x16, 0x17, 0x18, 0x19, 0x1A,
    0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x43, 0x44,
    0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0x63,
    0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A,
    0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98,
    0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0xAA, 0xB2, 0xB3, 0xB4, 0xB5,
    0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xCA, 0xD2,
    0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7,
    0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA, 0xFF, 0xDA,
    0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5, 0xDB, 0x20, 0xA8, 0xF1, 0x4A,
    0x28, 0xA0, 0x02, 0x80, 0x0A, 0x28, 0x03, 0xFF, 0xD9,
];

// TIFF field types
const ASCII: u16 = 2;
const SHORT: u16 = 3;
const LONG: u16 = 4;
const RATIONAL: u16 = 5;

/// EXIF values to embed in a test image
#[derive(Debug, Clone, Default)]
pub struct Exif<'a> {
    pub make: Option<&'a str>,
    pub model: Option<&'a str>,
    pub lens: Option<&'a str>,
    /// Focal length in tenths of a millimeter
    pub focal_length_tenths: Option<u32>,
    pub focal_length_35mm: Option<u16>,
    pub iso: Option<u16>,
    pub taken_at: Option<&'a str>,
}

enum Value {
    Ascii(String),
    Short(u16),
    Long(u32),
    Rational(u32, u32),
}

impl Value {
    fn encode(&self) -> (u16, u32, Vec<u8>) {
        match self {
            Value::Ascii(s) => {
                let mut bytes = s.as_bytes().to_vec();
                bytes.push(0);
                (ASCII, bytes.len() as u32, bytes)
            }
            Value::Short(v) => (SHORT, 1, v.to_le_bytes().to_vec()),
            Value::Long(v) => (LONG, 1, v.to_le_bytes().to_vec()),
            Value::Rational(n, d) => {
                let mut bytes = n.to_le_bytes().to_vec();
                bytes.extend_from_slice(&d.to_le_bytes());
                (RATIONAL, 1, bytes)
            }
        }
    }
}

/// Serialize one IFD that starts at `offset` within the TIFF block, with
/// out-of-line values placed right after it.
fn write_ifd(entries: &[(u16, Value)], offset: usize) -> Vec<u8> {
    let data_start = offset + 2 + entries.len() * 12 + 4;
    let mut head = Vec::new();
    let mut data = Vec::new();

    head.extend_from_slice(&(entries.len() as u16).to_le_bytes());
    for (tag, value) in entries {
        let (kind, count, mut bytes) = value.encode();
        head.extend_from_slice(&tag.to_le_bytes());
        head.extend_from_slice(&kind.to_le_bytes());
        head.extend_from_slice(&count.to_le_bytes());
        if bytes.len() <= 4 {
            bytes.resize(4, 0);
            head.extend_from_slice(&bytes);
        } else {
            let pos = (data_start + data.len()) as u32;
            head.extend_from_slice(&pos.to_le_bytes());
            data.extend_from_slice(&bytes);
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    head.extend_from_slice(&0u32.to_le_bytes());
    head.extend_from_slice(&data);
    head
}

/// Build a little-endian TIFF block with IFD0 and an Exif sub-IFD
fn tiff(exif: &Exif) -> Vec<u8> {
    let mut ifd0 = Vec::new();
    if let Some(make) = exif.make {
        ifd0.push((0x010F, Value::Ascii(make.to_string())));
    }
    if let Some(model) = exif.model {
        ifd0.push((0x0110, Value::Ascii(model.to_string())));
    }

    let mut sub = Vec::new();
    if let Some(iso) = exif.iso {
        sub.push((0x8827, Value::Short(iso)));
    }
    if let Some(taken_at) = exif.taken_at {
        sub.push((0x9003, Value::Ascii(taken_at.to_string())));
    }
    if let Some(tenths) = exif.focal_length_tenths {
        sub.push((0x920A, Value::Rational(tenths, 10)));
    }
    if let Some(fl35) = exif.focal_length_35mm {
        sub.push((0xA405, Value::Short(fl35)));
    }
    if let Some(lens) = exif.lens {
        sub.push((0xA434, Value::Ascii(lens.to_string())));
    }

    // IFD0 size is known before the pointer value is filled in
    ifd0.push((0x8769, Value::Long(0)));
    let ifd0_len = write_ifd(&ifd0, 8).len();
    let sub_offset = 8 + ifd0_len;
    if let Some(last) = ifd0.last_mut() {
        last.1 = Value::Long(sub_offset as u32);
    }

    let mut out = vec![b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    out.extend(write_ifd(&ifd0, 8));
    out.extend(write_ifd(&sub, sub_offset));
    out
}

/// Write a JPEG whose APP1 segment carries the given EXIF values
pub fn write_jpeg(path: &Path, exif: &Exif) {
    let tiff = tiff(exif);
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = (2 + 6 + tiff.len()) as u16;
    bytes.extend_from_slice(&segment_len.to_be_bytes());
    bytes.extend_from_slice(b"Exif\0\0");
    bytes.extend_from_slice(&tiff);
    bytes.extend_from_slice(JPEG_BODY);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(path, bytes).expect("Failed to write test image");
}

/// JPEG from a full-frame body with only a physical focal length
pub fn write_full_frame(path: &Path, model: &str, focal_length: u32) {
    write_jpeg(
        path,
        &Exif {
            make: Some("SONY"),
            model: Some(model),
            focal_length_tenths: Some(focal_length * 10),
            ..Default::default()
        },
    );
}
