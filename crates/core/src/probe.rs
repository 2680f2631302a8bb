//! Header-only image dimension probing.
//!
//! Reads just enough of a PNG/JPEG/GIF/BMP header to find the pixel
//! dimensions, so cataloguing a folder never pulls in a full decoder.
//! Probing never fails: any unsupported format, truncated header, or I/O
//! error yields `(0, 0)`, which the catalog stores as "size unknown".

use std::fs::File;
use std::io::{BufReader, Cursor, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

const PNG_MAGIC: &[u8; 8] = b"\x89PNG\r\n\x1a\n";

/// Bytes sniffed up front; enough for every fixed-offset format.
const SNIFF_LEN: usize = 26;

/// Probe an on-disk file. `(0, 0)` when the file cannot be opened.
pub fn probe_file(path: &Path) -> (u32, u32) {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "size probe could not open file");
            return (0, 0);
        }
    };
    probe_reader(&mut BufReader::new(file))
}

/// Probe an in-memory byte slice.
pub fn probe_bytes(bytes: &[u8]) -> (u32, u32) {
    probe_reader(&mut Cursor::new(bytes))
}

fn probe_reader<R: Read>(reader: &mut R) -> (u32, u32) {
    let mut header = [0u8; SNIFF_LEN];
    let n = read_up_to(reader, &mut header);
    let header = &header[..n];

    if header.len() >= 24 && &header[..8] == PNG_MAGIC {
        // IHDR is mandatory as the first chunk; anything else is malformed.
        if &header[12..16] != b"IHDR" {
            return (0, 0);
        }
        let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
        let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
        return (width, height);
    }

    if header.len() >= 2 && header[0..2] == [0xFF, 0xD8] {
        // The sniff buffer already consumed part of the marker stream.
        let rest = Cursor::new(header[2..].to_vec()).chain(reader);
        return jpeg_dimensions(rest).unwrap_or((0, 0));
    }

    if header.len() >= 10 && (&header[..6] == b"GIF87a" || &header[..6] == b"GIF89a") {
        let width = u16::from_le_bytes([header[6], header[7]]) as u32;
        let height = u16::from_le_bytes([header[8], header[9]]) as u32;
        return (width, height);
    }

    if header.len() >= 26 && &header[..2] == b"BM" {
        let width = u32::from_le_bytes([header[18], header[19], header[20], header[21]]);
        let height = u32::from_le_bytes([header[22], header[23], header[24], header[25]]);
        return (width, height);
    }

    (0, 0)
}

/// Scan JPEG markers for a start-of-frame segment (SOF0–SOF3), which carries
/// the frame height and width. `None` on EOF or a malformed marker stream.
fn jpeg_dimensions<R: Read>(mut reader: R) -> Option<(u32, u32)> {
    let mut b = read_u8(&mut reader)?;
    while b != 0xFF {
        b = read_u8(&mut reader)?;
    }
    while b == 0xFF {
        let marker = read_u8(&mut reader)?;
        if (0xC0..=0xC3).contains(&marker) {
            // 2-byte length and 1-byte precision precede the dimensions.
            let mut seg = [0u8; 7];
            reader.read_exact(&mut seg).ok()?;
            let height = u16::from_be_bytes([seg[3], seg[4]]) as u32;
            let width = u16::from_be_bytes([seg[5], seg[6]]) as u32;
            return Some((width, height));
        }
        let length = read_u16_be(&mut reader)? as u64;
        skip_bytes(&mut reader, length.saturating_sub(2))?;
        b = read_u8(&mut reader)?;
    }
    None
}

fn read_u8<R: Read>(reader: &mut R) -> Option<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf).ok()?;
    Some(buf[0])
}

fn read_u16_be<R: Read>(reader: &mut R) -> Option<u16> {
    let mut buf = [0u8; 2];
    reader.read_exact(&mut buf).ok()?;
    Some(u16::from_be_bytes(buf))
}

fn skip_bytes<R: Read>(reader: &mut R, n: u64) -> Option<()> {
    let copied = std::io::copy(&mut reader.by_ref().take(n), &mut std::io::sink()).ok()?;
    (copied == n).then_some(())
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    filled
}
