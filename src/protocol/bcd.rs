//! Binary-coded decimal packing for date and time fields
//!
//! Each byte carries two decimal digits, the first digit of the pair in the
//! high nibble.

use crate::core::{Error, Result};

/// Packs an even-length string of decimal digits into BCD bytes
pub fn encode(digits: &str) -> Result<Vec<u8>> {
    if digits.len() % 2 != 0 {
        return Err(Error::format(format!(
            "BCD input '{}' has odd length {}",
            digits,
            digits.len()
        )));
    }

    digits
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let hi = digit(pair[0], digits)?;
            let lo = digit(pair[1], digits)?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

/// Unpacks BCD bytes into a string of decimal digits
pub fn decode(bytes: &[u8]) -> Result<String> {
    let mut digits = String::with_capacity(bytes.len() * 2);

    for &byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            if nibble > 9 {
                return Err(Error::format(format!(
                    "invalid BCD byte {:02x}",
                    byte
                )));
            }
            digits.push(char::from(b'0' + nibble));
        }
    }

    Ok(digits)
}

fn digit(c: u8, input: &str) -> Result<u8> {
    if c.is_ascii_digit() {
        Ok(c - b'0')
    } else {
        Err(Error::format(format!(
            "BCD input '{}' contains non-digit '{}'",
            input,
            char::from(c)
        )))
    }
}
