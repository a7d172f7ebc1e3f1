//! Info command implementation.

use oxilzss_archive::complzss::HEADER_LEN;
use oxilzss_archive::{ComplzssHeader, ContainerFormat};
use oxilzss_codec::{StreamStats, inspect};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Header fields for JSON output.
#[derive(Debug, Serialize)]
struct HeaderInfo {
    offset: usize,
    checksum: u32,
    uncompressed_size: u32,
    compressed_size: u32,
}

/// Token statistics for JSON output.
#[derive(Debug, Serialize)]
struct StreamInfo {
    literals: usize,
    references: usize,
    matched_bytes: usize,
    control_bytes: usize,
    consumed: usize,
    decoded_size: usize,
    average_match: f64,
}

impl From<&StreamStats> for StreamInfo {
    fn from(stats: &StreamStats) -> Self {
        Self {
            literals: stats.literals,
            references: stats.references,
            matched_bytes: stats.matched_bytes,
            control_bytes: stats.control_bytes,
            consumed: stats.consumed,
            decoded_size: stats.decoded_len(),
            average_match: stats.average_match(),
        }
    }
}

#[derive(Debug, Serialize)]
struct FileInfo {
    file: String,
    size: usize,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<HeaderInfo>,
    stream: StreamInfo,
}

pub fn cmd_info(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let format = ContainerFormat::detect(&data);

    let (header, payload) = match format {
        ContainerFormat::Complzss { offset } => {
            let header = ComplzssHeader::parse(&data[offset..])?;
            let body = &data[offset + HEADER_LEN..];
            let payload = &body[..body.len().min(header.compressed_size as usize)];
            if payload.len() < header.compressed_size as usize {
                log::warn!(
                    "payload truncated: header records {} bytes, {} present",
                    header.compressed_size,
                    payload.len()
                );
            }
            (Some((offset, header)), payload)
        }
        ContainerFormat::Raw => (None, data.as_slice()),
    };

    let stats = inspect(payload);

    if json {
        let info = FileInfo {
            file: file.display().to_string(),
            size: data.len(),
            format: format.name(),
            header: header.map(|(offset, h)| HeaderInfo {
                offset,
                checksum: h.checksum,
                uncompressed_size: h.uncompressed_size,
                compressed_size: h.compressed_size,
            }),
            stream: StreamInfo::from(&stats),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("File Information");
    println!("================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", data.len());
    println!("Format: {}", format);

    if let Some((_, h)) = header {
        println!();
        println!("complzss Header:");
        println!("  Checksum: {:#010x}", h.checksum);
        println!("  Uncompressed size: {} bytes", h.uncompressed_size);
        println!("  Compressed size: {} bytes", h.compressed_size);
        if h.uncompressed_size > 0 {
            println!("  Ratio: {:.1}%", h.ratio() * 100.0);
        }
    }

    println!();
    println!("Stream:");
    println!("  Literals: {}", stats.literals);
    println!("  References: {}", stats.references);
    println!("  Matched bytes: {}", stats.matched_bytes);
    println!("  Control bytes: {}", stats.control_bytes);
    println!("  Decoded size: {} bytes", stats.decoded_len());
    if stats.references > 0 {
        println!("  Average match: {:.2} bytes", stats.average_match());
    }

    Ok(())
}
