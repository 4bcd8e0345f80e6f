//! Utility module
//!
//! This module provides common utilities and helper functions used
//! throughout the library.

/// Formats a frame for debug logs: one row of 16 hex-encoded bytes per line,
/// prefixed with the row offset
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(row, chunk)| format!("{:08x}  {}", row * 16, hex::encode(chunk)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump() {
        let bytes = [
            0x17, 0x94, 0x00, 0x00, 0x2d, 0x55, 0x39, 0x19, 0xc0, 0xa8, 0x00, 0x00, 0xff, 0xff,
            0xff, 0x00, 0x41, 0x42,
        ];

        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "00000000  179400002d553919c0a80000ffffff00");
        assert_eq!(lines[1], "00000010  4142");
    }

    #[test]
    fn test_hex_dump_frame() {
        let mut frame = [0u8; 64];
        frame[0] = 0x17;
        frame[1] = 0x82;

        let dump = hex_dump(&frame);
        assert_eq!(dump.lines().count(), 4);
        assert!(dump.starts_with("00000000  1782"));
        assert!(dump.ends_with(&format!("00000030  {}", "0".repeat(32))));
    }

    #[test]
    fn test_hex_dump_empty() {
        assert_eq!(hex_dump(&[]), "");
    }
}
