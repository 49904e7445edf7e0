// Bearer token decoding
//
// The payload segment is read for display and routing only. The signature is
// not checked; protected endpoints verify it server side.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::role::Role;
use crate::session::Identity;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode the identity claims carried by `token`.
///
/// The subject comes from `sub`, falling back to `email`. A missing `role`
/// claim yields [`Role::Student`].
pub fn decode(token: &str) -> Result<Identity, DecodeError> {
    let payload = token.split('.').nth(1).ok_or(DecodeError::Malformed)?;
    let bytes = decode_segment(payload)?;
    let text = String::from_utf8(bytes)?;
    let claims: Value = serde_json::from_str(&text)?;
    let claims = claims.as_object().ok_or(DecodeError::NotAnObject)?;

    let email = string_claim(claims, "sub")
        .or_else(|| string_claim(claims, "email"))
        .ok_or(DecodeError::MissingSubject)?;

    let role = match claims.get("role") {
        None | Some(Value::Null) => Role::Student,
        Some(Value::String(s)) if s.is_empty() => Role::Student,
        Some(Value::String(s)) => s
            .parse()
            .map_err(|_| DecodeError::UnknownRole(s.clone()))?,
        Some(other) => return Err(DecodeError::UnknownRole(other.to_string())),
    };

    Ok(Identity::new(email, role))
}

/// JWTs use unpadded base64url; tokens from older issuers use the standard alphabet.
fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD_LENIENT
        .decode(segment)
        .or_else(|_| URL_SAFE_LENIENT.decode(segment))
}

fn string_claim<'a>(claims: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    claims
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}
