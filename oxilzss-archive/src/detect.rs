//! Container auto-detection.
//!
//! A complzss header is not always at offset 0: firmware images often carry
//! their own wrapper around it. Detection therefore scans for the magic
//! instead of only checking the first bytes.
//!
//! The magic alone is not enough. A raw stream whose input began with
//! `complzss` carries those bytes as eight literals right after its first
//! control byte, so a candidate only counts when its recorded payload fits
//! in the bytes that follow the header.

use crate::complzss::{ComplzssHeader, HEADER_LEN, locate};

/// Layout of a compressed payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// complzss header found at `offset`.
    Complzss {
        /// Byte offset of the header within the input.
        offset: usize,
    },
    /// Bare token stream with no header.
    Raw,
}

impl ContainerFormat {
    /// Detect the layout of `data`.
    ///
    /// Returns the first header whose payload fits in the input. Magic
    /// matches that cannot hold a full header and payload are skipped.
    pub fn detect(data: &[u8]) -> Self {
        let mut start = 0;
        while let Some(found) = locate(&data[start..]) {
            let offset = start + found;
            if Self::is_plausible(&data[offset..]) {
                return Self::Complzss { offset };
            }
            log::debug!("complzss: ignoring magic at {:#x}", offset);
            start = offset + 1;
        }
        Self::Raw
    }

    fn is_plausible(candidate: &[u8]) -> bool {
        ComplzssHeader::parse(candidate)
            .is_ok_and(|header| header.payload_fits(candidate.len() - HEADER_LEN))
    }

    /// Check if a header was found.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Complzss { .. })
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Complzss { .. } => "complzss",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complzss { offset: 0 } => write!(f, "complzss"),
            Self::Complzss { offset } => write!(f, "complzss (header at {:#x})", offset),
            Self::Raw => write!(f, "raw LZSS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::complzss::{ContainerOptions, pack};

    #[test]
    fn test_detect_at_start() {
        let packed = pack(b"payload", ContainerOptions::default()).unwrap();
        assert_eq!(
            ContainerFormat::detect(&packed),
            ContainerFormat::Complzss { offset: 0 }
        );
    }

    #[test]
    fn test_detect_after_prefix() {
        let mut data = b"IM4P....".to_vec();
        data.extend(pack(b"payload", ContainerOptions::default()).unwrap());

        let format = ContainerFormat::detect(&data);
        assert_eq!(format, ContainerFormat::Complzss { offset: 8 });
        assert!(format.is_container());
        assert_eq!(format.to_string(), "complzss (header at 0x8)");
    }

    #[test]
    fn test_detect_raw() {
        let format = ContainerFormat::detect(&[0x01, b'a']);
        assert_eq!(format, ContainerFormat::Raw);
        assert!(!format.is_container());
        assert_eq!(format.name(), "raw");
    }

    #[test]
    fn test_truncated_header_is_raw() {
        assert_eq!(ContainerFormat::detect(b"xxcomplzss"), ContainerFormat::Raw);
    }

    #[test]
    fn test_oversized_payload_is_skipped() {
        let header = ComplzssHeader {
            compressed_size: 1000,
            ..ComplzssHeader::default()
        };
        let mut data = header.to_bytes().to_vec();
        data.extend_from_slice(&[0u8; 999]);
        assert_eq!(ContainerFormat::detect(&data), ContainerFormat::Raw);

        data.push(0);
        assert_eq!(
            ContainerFormat::detect(&data),
            ContainerFormat::Complzss { offset: 0 }
        );
    }

    #[test]
    fn test_skips_to_later_header() {
        // A bogus header claiming a huge payload, then a real container.
        let bogus = ComplzssHeader {
            compressed_size: u32::MAX,
            ..ComplzssHeader::default()
        };
        let mut data = bogus.to_bytes().to_vec();
        data.extend(pack(b"payload", ContainerOptions::default()).unwrap());

        assert_eq!(
            ContainerFormat::detect(&data),
            ContainerFormat::Complzss { offset: HEADER_LEN }
        );
    }
}
