//! Unverified claim decoding for access tokens.
//!
//! The diagnostics service issues JWTs whose payload carries a `role`
//! claim. The client decodes it WITHOUT verifying the signature, so the
//! result is a display hint only and must never feed an authorization
//! decision; the server enforces access on every request regardless.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::error::AuthError;
use crate::Result;

/// Role assigned when the token payload carries no `role` claim.
pub const DEFAULT_ROLE: &str = "guest";

#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    role: Option<String>,
}

/// Decode the `role` claim from a JWT access token.
///
/// Splits the token into its dot-separated segments, base64-decodes the
/// middle (payload) segment and reads the `role` string, defaulting to
/// [`DEFAULT_ROLE`] when the claim is absent.
///
/// # Errors
///
/// Returns [`AuthError::ClaimDecode`] when the token does not have three
/// segments, the payload is not valid base64, or the decoded payload is
/// not a JSON object. Callers must abort login on this error so that no
/// partial credential is stored.
pub fn decode_role(access_token: &str) -> Result<String> {
    let segments: Vec<&str> = access_token.split('.').collect();
    let [_, payload, _] = segments.as_slice() else {
        return Err(AuthError::ClaimDecode {
            reason: "token does not have three segments".to_string(),
        }
        .into());
    };

    // Tokens are base64url without padding, but tolerate padded input.
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::ClaimDecode {
            reason: format!("payload is not valid base64: {}", e),
        })?;

    let claims: TokenClaims = serde_json::from_slice(&bytes).map_err(|e| {
        AuthError::ClaimDecode {
            reason: format!("payload is not valid JSON: {}", e),
        }
    })?;

    Ok(claims.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        format!("header.{}.signature", encoded)
    }

    #[test]
    fn decodes_role_claim() {
        let token = token_with_payload(r#"{"role":"admin"}"#);
        assert_eq!(decode_role(&token).unwrap(), "admin");
    }

    #[test]
    fn missing_role_defaults_to_guest() {
        let token = token_with_payload("{}");
        assert_eq!(decode_role(&token).unwrap(), "guest");
    }

    #[test]
    fn tolerates_padded_payload() {
        let padded = base64::engine::general_purpose::STANDARD.encode(r#"{"role":"seller"}"#);
        let token = format!("h.{}.s", padded);
        assert_eq!(decode_role(&token).unwrap(), "seller");
    }

    #[test]
    fn rejects_token_without_three_segments() {
        assert!(decode_role("not-a-jwt").is_err());
        assert!(decode_role("only.two").is_err());
        assert!(decode_role("one.two.three.four").is_err());
    }

    #[test]
    fn rejects_non_base64_payload() {
        assert!(decode_role("h.!!not-base64!!.s").is_err());
    }

    #[test]
    fn rejects_non_json_payload() {
        let encoded = URL_SAFE_NO_PAD.encode("not json");
        let token = format!("h.{}.s", encoded);
        assert!(decode_role(&token).is_err());
    }
}
