//! NIP (Numer Identyfikacji Podatkowej) format validation.

use thiserror::Error;

const NIP_LEN: usize = 10;
const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Why a NIP failed format validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NipError {
    #[error("must be exactly 10 digits, got {0} characters")]
    Length(usize),
    #[error("must contain digits only")]
    NonDigit,
    #[error("check digit does not match")]
    CheckDigit,
}

/// Validate a NIP: exactly ten ASCII digits, the last being the
/// modulo-11 check digit of the first nine.
///
/// Separators such as dashes are rejected, not stripped.
pub fn validate_nip(nip: &str) -> Result<(), NipError> {
    let len = nip.chars().count();
    if len != NIP_LEN {
        return Err(NipError::Length(len));
    }
    if !nip.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NipError::NonDigit);
    }

    let digits: Vec<u32> = nip.bytes().map(|b| u32::from(b - b'0')).collect();
    let sum: u32 = digits
        .iter()
        .zip(NIP_WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    let check = sum % 11;

    // A remainder of 10 is never issued.
    if check == 10 || check != digits[9] {
        return Err(NipError::CheckDigit);
    }
    Ok(())
}

/// Whether `nip` is a well-formed NIP.
pub fn is_valid_nip(nip: &str) -> bool {
    validate_nip(nip).is_ok()
}
