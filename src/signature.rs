use p256::elliptic_curve::bigint::{Encoding, U256};

use crate::error::{FormatError, Result};

/// P-256 group order n.
pub const ORDER: U256 =
    U256::from_be_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551");
/// floor(n / 2), the top of the low-S half.
const ORDER_HALF: U256 =
    U256::from_be_hex("7fffffff800000007fffffffffffffffde737d56d38bcf4279dce5617e3192a8");

pub const SCALAR_SIZE: usize = 32;

/// An ECDSA signature over P-256, held in canonical low-S form by every
/// constructor in this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: U256,
    pub s: U256,
}

impl Signature {
    /// Collapse `(r, s)` / `(r, n-s)` malleability: if `s > n/2`, replace it
    /// with `n - s`. Idempotent.
    pub fn normalized(self) -> Self {
        if self.s > ORDER_HALF {
            Signature {
                r: self.r,
                s: ORDER.wrapping_sub(&self.s),
            }
        } else {
            self
        }
    }

    fn checked(r: U256, s: U256) -> Result<Self> {
        if r == U256::ZERO || r >= ORDER || s == U256::ZERO || s >= ORDER {
            return Err(FormatError::ScalarOutOfRange);
        }
        Ok(Signature { r, s }.normalized())
    }
}

/// Parse a DER `SEQUENCE { INTEGER r, INTEGER s }` as emitted by platform
/// authenticators and normalize to low-S.
///
/// DER prepends a 0x00 pad byte to an integer whose high bit is set; the
/// parser detects the pad by inspecting the first content byte and then
/// takes the 32-byte scalar window that follows. `r` must be exactly 32
/// significant bytes; `s` runs to the end of the buffer (up to 32 bytes,
/// left-padded). Long-form DER lengths are not supported.
pub fn parse_der_signature(bytes: &[u8]) -> Result<Signature> {
    // Shortest accepted shape: tag, len, r tag, r len, first r byte.
    if bytes.len() < 5 {
        return Err(FormatError::SignatureTruncated(bytes.len()));
    }
    if bytes[0] != 0x30 {
        return Err(FormatError::Der("missing SEQUENCE tag"));
    }
    if bytes[2] != 0x02 {
        return Err(FormatError::Der("missing INTEGER tag for r"));
    }

    let r_start = if bytes[4] == 0x00 { 5 } else { 4 };
    let r_end = r_start + SCALAR_SIZE;
    // r window plus s's tag, length and at least one content byte.
    if bytes.len() < r_end + 3 {
        return Err(FormatError::SignatureTruncated(bytes.len()));
    }
    if bytes[r_end] != 0x02 {
        return Err(FormatError::Der("missing INTEGER tag for s"));
    }

    let s_start = if bytes[r_end + 2] == 0x00 {
        r_end + 3
    } else {
        r_end + 2
    };
    if bytes.len() <= s_start || bytes.len() - s_start > SCALAR_SIZE {
        return Err(FormatError::Der("s length out of range"));
    }

    let r = scalar(&bytes[r_start..r_end])?;
    let s = scalar(&bytes[s_start..])?;
    Signature::checked(r, s)
}

/// Parse the raw IEEE P1363 `r || s` form produced by WebCrypto-style
/// signers and normalize to low-S.
pub fn parse_raw_signature(bytes: &[u8; 2 * SCALAR_SIZE]) -> Result<Signature> {
    let r = scalar(&bytes[..SCALAR_SIZE])?;
    let s = scalar(&bytes[SCALAR_SIZE..])?;
    Signature::checked(r, s)
}

/// Minimal DER encoding of a signature: leading zeros stripped, a 0x00 pad
/// prepended to any integer whose high bit is set.
pub fn encode_der_signature(signature: &Signature) -> Vec<u8> {
    let r_der = der_integer(&signature.r.to_be_bytes());
    let s_der = der_integer(&signature.s.to_be_bytes());
    let inner_len = (r_der.len() + s_der.len()) as u8;
    let mut out = vec![0x30u8, inner_len];
    out.extend_from_slice(&r_der);
    out.extend_from_slice(&s_der);
    out
}

fn der_integer(n: &[u8]) -> Vec<u8> {
    let n: Vec<u8> = n.iter().skip_while(|&&b| b == 0).copied().collect();
    let n = if n.is_empty() { vec![0u8] } else { n };
    let pad = n[0] & 0x80 != 0;
    let mut out = vec![0x02u8, n.len() as u8 + pad as u8];
    if pad {
        out.push(0);
    }
    out.extend_from_slice(&n);
    out
}

/// Big-endian scalar of up to 32 bytes, left-padded.
fn scalar(bytes: &[u8]) -> Result<U256> {
    if bytes.len() > SCALAR_SIZE {
        return Err(FormatError::Der("integer wider than 32 bytes"));
    }
    let mut buf = [0u8; SCALAR_SIZE];
    buf[SCALAR_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(U256::from_be_bytes(buf))
}
