//! Property-based tests for the codec laws: hex and SEC1 round trips,
//! low-S idempotence, DER parse/encode agreement with the RustCrypto
//! encoder, and sign/verify through public-key recovery.

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::SigningKey;
use p256::elliptic_curve::bigint::{Encoding, U256};
use proptest::prelude::*;

use webauthn_p256::signature::ORDER;
use webauthn_p256::{
    bytes_to_hex, decode_public_key, encode_der_signature, encode_public_key, hex_to_bytes,
    message_hash, parse_der_signature, parse_raw_signature, verify_prehash, Signature,
};

/// 32-byte scalars guaranteed nonzero, below the group order, and with a
/// nonzero top byte (the DER parser's fixed 32-byte window for r assumes
/// full-width scalars, as real P-256 signatures have with overwhelming
/// probability).
fn full_width_scalar() -> impl Strategy<Value = [u8; 32]> {
    (1u8..=0xfe, any::<[u8; 31]>()).prop_map(|(top, rest)| {
        let mut buf = [0u8; 32];
        buf[0] = top;
        buf[1..].copy_from_slice(&rest);
        buf
    })
}

fn signing_key() -> impl Strategy<Value = SigningKey> {
    full_width_scalar().prop_filter_map("secret must be a valid scalar", |bytes| {
        SigningKey::from_bytes(&bytes.into()).ok()
    })
}

proptest! {
    #[test]
    fn hex_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        let hex = bytes_to_hex(&bytes);
        prop_assert_eq!(hex_to_bytes(&hex).unwrap(), bytes);
    }

    #[test]
    fn public_key_roundtrip(sk in signing_key()) {
        let uncompressed = sk.verifying_key().to_encoded_point(false);
        let key = decode_public_key(uncompressed.as_bytes()).unwrap();

        prop_assert_eq!(encode_public_key(&key, false), uncompressed.as_bytes());

        let compressed = encode_public_key(&key, true);
        let expected = sk.verifying_key().to_encoded_point(true);
        prop_assert_eq!(compressed.as_slice(), expected.as_bytes());
        let reparsed = decode_public_key(&compressed).unwrap();
        prop_assert_eq!(&reparsed, &key);

        // The prefixless 64-byte form decodes to the same point.
        let bare = decode_public_key(&uncompressed.as_bytes()[1..]).unwrap();
        prop_assert_eq!(&bare, &key);
    }

    #[test]
    fn low_s_normalization_laws(r in full_width_scalar(), s in full_width_scalar()) {
        let sig = Signature { r: U256::from_be_bytes(r), s: U256::from_be_bytes(s) };
        let normalized = sig.clone().normalized();
        // Idempotent, and an involution against the high-S twin.
        prop_assert_eq!(normalized.clone().normalized(), normalized.clone());
        let twin = Signature { r: normalized.r, s: ORDER.wrapping_sub(&normalized.s) };
        prop_assert_eq!(twin.normalized(), normalized);
    }

    #[test]
    fn der_roundtrip(r in full_width_scalar(), s in full_width_scalar()) {
        let sig = Signature { r: U256::from_be_bytes(r), s: U256::from_be_bytes(s) }.normalized();
        let der = encode_der_signature(&sig);
        prop_assert_eq!(parse_der_signature(&der).unwrap(), sig);
    }

    #[test]
    fn der_parse_agrees_with_rustcrypto_encoder(sk in signing_key(), msg in any::<[u8; 32]>()) {
        let sig: p256::ecdsa::Signature = sk.sign_prehash(&msg).unwrap();
        let raw = sig.to_bytes();
        // Fixed-window precondition: r must be 32 significant bytes.
        prop_assume!(raw[0] != 0);
        let parsed = parse_der_signature(sig.to_der().as_bytes()).unwrap();
        let mut raw_buf = [0u8; 64];
        raw_buf.copy_from_slice(&raw);
        prop_assert_eq!(parsed, parse_raw_signature(&raw_buf).unwrap());
    }

    #[test]
    fn sign_verify_roundtrip(sk in signing_key(), auth_data in proptest::collection::vec(any::<u8>(), 37..64), client_data in "\\{\"type\":\"webauthn.get\",\"challenge\":\"[A-Za-z0-9_-]{43}\"\\}") {
        let hash = message_hash(&auth_data, &client_data);
        let sig: p256::ecdsa::Signature = sk.sign_prehash(&hash).unwrap();
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&sig.to_bytes());
        let parsed = parse_raw_signature(&raw).unwrap();

        let uncompressed = sk.verifying_key().to_encoded_point(false);
        let key = decode_public_key(uncompressed.as_bytes()).unwrap();
        prop_assert!(verify_prehash(&key, &parsed, &hash));

        // Any other key must not verify.
        let other = SigningKey::from_bytes(&[0x42u8; 32].into()).unwrap();
        let other_key = decode_public_key(other.verifying_key().to_encoded_point(false).as_bytes()).unwrap();
        prop_assume!(other_key != key);
        prop_assert!(!verify_prehash(&other_key, &parsed, &hash));
    }
}
