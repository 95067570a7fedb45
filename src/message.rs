use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::error::{FormatError, Result};
use crate::signature::Signature;

/// Authenticator data flags: user present.
pub const FLAG_UP: u8 = 0x01;
/// Authenticator data flags: user verified.
pub const FLAG_UV: u8 = 0x04;

/// A signature together with the WebAuthn assertion context it was produced
/// in. `challenge_index` / `type_index` are the byte offsets of the literal
/// `"challenge"` / `"type"` substrings inside `client_data_json`, so an
/// external verifier can locate the fields without a JSON parser. The
/// carried bytes must be passed through unmodified from the authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebAuthnSignature {
    pub signature: Signature,
    pub authenticator_data: Vec<u8>,
    pub client_data_json: String,
    pub challenge_index: usize,
    pub type_index: usize,
    pub user_verification_required: Option<bool>,
}

impl WebAuthnSignature {
    /// Wrap a signature with its assertion context, locating the
    /// `"challenge"` and `"type"` field offsets in the client data.
    pub fn new(
        signature: Signature,
        authenticator_data: Vec<u8>,
        client_data_json: String,
    ) -> Result<Self> {
        let challenge_index = client_data_json
            .find("\"challenge\"")
            .ok_or(FormatError::MissingClientDataField("challenge"))?;
        let type_index = client_data_json
            .find("\"type\"")
            .ok_or(FormatError::MissingClientDataField("type"))?;
        Ok(WebAuthnSignature {
            signature,
            authenticator_data,
            client_data_json,
            challenge_index,
            type_index,
            user_verification_required: None,
        })
    }
}

/// The exact byte string a WebAuthn authenticator signs, hashed once more:
/// `SHA256(authenticatorData || SHA256(clientDataJSON))`.
pub fn message_hash(authenticator_data: &[u8], client_data_json: &str) -> [u8; 32] {
    let client_data_hash = Sha256::digest(client_data_json.as_bytes());
    let mut hasher = Sha256::new();
    hasher.update(authenticator_data);
    hasher.update(client_data_hash);
    hasher.finalize().into()
}

/// Client data JSON for an assertion, with the challenge in base64url
/// without padding. Field order matches what browsers emit, so the
/// `"type"` / `"challenge"` offsets are stable.
pub fn client_data_json(challenge: &[u8], origin: &str, cross_origin: bool) -> String {
    format!(
        "{{\"type\":\"webauthn.get\",\"challenge\":\"{}\",\"origin\":\"{}\",\"crossOrigin\":{}}}",
        URL_SAFE_NO_PAD.encode(challenge),
        origin,
        cross_origin,
    )
}

/// Assertion-shaped authenticator data: `SHA256(rpId) || flags || signCount`.
/// The relying-party id is an explicit parameter; there is no implicit
/// process-wide default.
pub fn authenticator_data(rp_id: &str, flags: u8, sign_count: u32) -> Vec<u8> {
    let rp_id_hash: [u8; 32] = Sha256::digest(rp_id.as_bytes()).into();
    let mut data = Vec::with_capacity(37);
    data.extend_from_slice(&rp_id_hash);
    data.push(flags);
    data.extend_from_slice(&sign_count.to_be_bytes());
    data
}
