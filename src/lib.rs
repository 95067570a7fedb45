//! Parsing, encoding and verification of WebAuthn P-256 (secp256r1)
//! assertion signatures: SEC1 public key codec, DER signature parsing with
//! low-S normalization, assembly of the signed message from
//! `authenticatorData || SHA256(clientDataJSON)`, and verification by
//! public-key recovery over both parities.
//!
//! Credential creation/request plumbing and the host credential API are out
//! of scope; this crate only consumes the byte buffers an authenticator
//! returns.

pub mod encoding;
pub mod error;
pub mod message;
pub mod public_key;
pub mod signature;
pub mod verify;

pub use encoding::{bytes_to_hex, hex_to_bytes};
pub use error::{FormatError, Result};
pub use message::{authenticator_data, client_data_json, message_hash, WebAuthnSignature};
pub use public_key::{decode_public_key, encode_public_key, PublicKey};
pub use signature::{
    encode_der_signature, parse_der_signature, parse_raw_signature, Signature,
};
pub use verify::{verify, verify_prehash};
