use p256::elliptic_curve::bigint::{Encoding, U256};
use p256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use p256::EncodedPoint;

use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::error::{FormatError, Result};

pub const COORDINATE_SIZE: usize = 32;

/// A P-256 curve point. `prefix` records the SEC1 leading byte of the
/// encoding the key was decoded from (2/3 compressed, 4 uncompressed);
/// it is metadata only and never participates in comparisons.
#[derive(Debug, Clone)]
pub struct PublicKey {
    pub x: U256,
    pub y: U256,
    pub prefix: Option<u8>,
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for PublicKey {}

impl PublicKey {
    pub fn from_hex(value: &str) -> Result<Self> {
        decode_public_key(&hex_to_bytes(value)?)
    }

    /// Uncompressed SEC1 hex (`0x04 || X || Y`).
    pub fn to_hex(&self) -> String {
        bytes_to_hex(&encode_public_key(self, false))
    }
}

/// Decode a SEC1 public key. Accepts 65 bytes (`0x04 || X || Y`), 64 bytes
/// (`X || Y`, no prefix), or 33 bytes (`0x02/0x03 || X`, decompressed via
/// the curve equation).
pub fn decode_public_key(bytes: &[u8]) -> Result<PublicKey> {
    match bytes.len() {
        65 => {
            if bytes[0] != 0x04 {
                return Err(FormatError::PublicKeyPrefix(bytes[0]));
            }
            Ok(PublicKey {
                x: coordinate(&bytes[1..33]),
                y: coordinate(&bytes[33..65]),
                prefix: Some(0x04),
            })
        }
        64 => Ok(PublicKey {
            x: coordinate(&bytes[0..32]),
            y: coordinate(&bytes[32..64]),
            prefix: None,
        }),
        33 => {
            if bytes[0] != 0x02 && bytes[0] != 0x03 {
                return Err(FormatError::PublicKeyPrefix(bytes[0]));
            }
            let point =
                EncodedPoint::from_bytes(bytes).map_err(|_| FormatError::InvalidPoint)?;
            // Decompression solves the curve equation for Y; fails off-curve.
            let key = Option::<p256::PublicKey>::from(p256::PublicKey::from_encoded_point(
                &point,
            ))
            .ok_or(FormatError::InvalidPoint)?;
            let uncompressed = key.to_encoded_point(false);
            Ok(PublicKey {
                x: coordinate(uncompressed.x().ok_or(FormatError::InvalidPoint)?),
                y: coordinate(uncompressed.y().ok_or(FormatError::InvalidPoint)?),
                prefix: Some(bytes[0]),
            })
        }
        n => Err(FormatError::PublicKeyLength(n)),
    }
}

/// Serialize a public key to SEC1 bytes. Compressed output recomputes the
/// prefix from Y's parity (0x02 even, 0x03 odd) rather than reusing the
/// stored one; uncompressed output always carries 0x04.
pub fn encode_public_key(key: &PublicKey, compressed: bool) -> Vec<u8> {
    let x = key.x.to_be_bytes();
    if compressed {
        let parity_odd = key.y.to_be_bytes()[COORDINATE_SIZE - 1] & 1 == 1;
        let mut out = Vec::with_capacity(1 + COORDINATE_SIZE);
        out.push(if parity_odd { 0x03 } else { 0x02 });
        out.extend_from_slice(&x);
        out
    } else {
        let mut out = Vec::with_capacity(1 + 2 * COORDINATE_SIZE);
        out.push(0x04);
        out.extend_from_slice(&x);
        out.extend_from_slice(&key.y.to_be_bytes());
        out
    }
}

fn coordinate(bytes: &[u8]) -> U256 {
    let mut buf = [0u8; COORDINATE_SIZE];
    buf.copy_from_slice(bytes);
    U256::from_be_bytes(buf)
}
