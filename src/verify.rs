use ecdsa::RecoveryId;
use p256::ecdsa::{Signature as EcdsaSignature, VerifyingKey};
use p256::elliptic_curve::bigint::Encoding;

use crate::message::{self, WebAuthnSignature};
use crate::public_key::PublicKey;
use crate::signature::Signature;

/// Verify a WebAuthn assertion signature: assemble the signed message from
/// the carried authenticator data and client data, then check the
/// signature against the claimed public key.
pub fn verify(public_key: &PublicKey, signature: &WebAuthnSignature) -> bool {
    let hash = message::message_hash(
        &signature.authenticator_data,
        &signature.client_data_json,
    );
    verify_prehash(public_key, &signature.signature, &hash)
}

/// Verify a signature over an already-computed 32-byte message hash.
///
/// A candidate key is recovered from `(r, s, hash)` for each recovery
/// parity and compared coordinate-for-coordinate against the claimed key,
/// so the caller never has to know which parity the authenticator used.
/// A parity that yields no valid curve point is skipped; a non-match is a
/// normal `false`, never an error.
pub fn verify_prehash(
    public_key: &PublicKey,
    signature: &Signature,
    message_hash: &[u8; 32],
) -> bool {
    let sig = match EcdsaSignature::from_scalars(
        signature.r.to_be_bytes(),
        signature.s.to_be_bytes(),
    ) {
        Ok(sig) => sig,
        // Out-of-range scalars can never match any key.
        Err(_) => return false,
    };

    let x = public_key.x.to_be_bytes();
    let y = public_key.y.to_be_bytes();

    for parity in [0u8, 1] {
        let Some(recovery_id) = RecoveryId::from_byte(parity) else {
            continue;
        };
        let candidate =
            match VerifyingKey::recover_from_prehash(message_hash, &sig, recovery_id) {
                Ok(key) => key,
                Err(_) => {
                    tracing::trace!(parity, "no recoverable public key for parity");
                    continue;
                }
            };
        let point = candidate.to_encoded_point(false);
        if point.x().is_some_and(|b| b[..] == x) && point.y().is_some_and(|b| b[..] == y) {
            tracing::trace!(parity, "recovered key matches claimed public key");
            return true;
        }
    }
    false
}
