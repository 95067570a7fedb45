#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Hex: missing 0x prefix")]
    MissingHexPrefix,
    #[error("Hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("Public key: invalid length {0}, expected 33, 64 or 65 bytes")]
    PublicKeyLength(usize),
    #[error("Public key: invalid SEC1 prefix {0:#04x}")]
    PublicKeyPrefix(u8),
    #[error("Public key: point is not on the curve")]
    InvalidPoint,
    #[error("Signature: DER buffer truncated at {0} bytes")]
    SignatureTruncated(usize),
    #[error("Signature: malformed DER: {0}")]
    Der(&'static str),
    #[error("Signature: scalar out of range [1, n-1]")]
    ScalarOutOfRange,
    #[error("Client data: missing {0:?} field")]
    MissingClientDataField(&'static str),
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
