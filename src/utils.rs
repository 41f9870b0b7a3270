use base64::{
    Engine, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
    },
};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{mail::MailError, types::Uid};

// RFC 3501 5.1.3: base64 with ',' instead of '/', no padding
const MUTF7: GeneralPurpose = GeneralPurpose::new(
    &alphabet::IMAP_MUTF7,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Parses a comma separated UID list such as `"130, 131,"`.
///
/// Blank segments are ignored. Every other segment must be a positive
/// integer, and at least one UID must remain.
pub fn parse_uids(input: &str) -> Result<Vec<Uid>, MailError> {
    let uids = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<Uid>()
                .ok()
                .filter(|uid| *uid > 0)
                .ok_or_else(|| MailError::InvalidUid(s.to_string()))
        })
        .collect::<Result<Vec<Uid>, MailError>>()?;

    if uids.is_empty() {
        return Err(MailError::NoUids);
    }
    Ok(uids)
}

/// Decodes an IMAP modified UTF-7 mailbox name (`gel&APY-scht` → `gelöscht`).
///
/// Names that are not valid modified UTF-7 are returned unchanged.
pub fn decode_modified_utf7(name: &str) -> String {
    let mut decoded = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(start) = rest.find('&') {
        decoded.push_str(&rest[..start]);
        let shifted = &rest[start + 1..];
        let Some(end) = shifted.find('-') else {
            return name.to_string();
        };

        let encoded = &shifted[..end];
        if encoded.is_empty() {
            decoded.push('&');
        } else {
            match decode_utf16_base64(encoded) {
                Some(text) => decoded.push_str(&text),
                None => return name.to_string(),
            }
        }
        rest = &shifted[end + 1..];
    }

    decoded.push_str(rest);
    decoded
}

fn decode_utf16_base64(encoded: &str) -> Option<String> {
    let bytes = MUTF7.decode(encoded).ok()?;
    if bytes.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}
