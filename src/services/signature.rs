//! Custom-action signature verification.
//!
//! Frame.io signs each callback with HMAC-SHA256 over
//! `"v0:{timestamp}:{body}"` and sends the hex digest as
//! `X-Frameio-Signature: v0=<hex>`. Verification fails closed on a
//! missing or stale timestamp and on any digest mismatch.

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Maximum accepted clock skew between the callback timestamp and now.
const MAX_SKEW_SECONDS: i64 = 300;

/// Verify a callback against the shared signing secret.
///
/// `timestamp` and `signature` are the raw header values; `body` is the
/// undecoded request body.
pub fn verify(
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    secret: &str,
) -> Result<()> {
    verify_at(timestamp, signature, body, secret, Utc::now().timestamp())
}

/// Verification against an explicit clock, used by `verify` and tests.
pub fn verify_at(
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    secret: &str,
    now: i64,
) -> Result<()> {
    let timestamp = timestamp.ok_or_else(|| {
        tracing::warn!("Callback rejected: missing timestamp header");
        Error::SignatureRejected("missing timestamp".into())
    })?;

    let ts: i64 = timestamp.parse().map_err(|_| {
        tracing::warn!(timestamp = %timestamp, "Callback rejected: unparsable timestamp");
        Error::SignatureRejected("unparsable timestamp".into())
    })?;

    if (now - ts).abs() > MAX_SKEW_SECONDS {
        tracing::warn!(
            timestamp = ts,
            now = now,
            "Callback rejected: timestamp outside freshness window"
        );
        return Err(Error::SignatureRejected("stale timestamp".into()));
    }

    let signature = signature.ok_or_else(|| {
        tracing::warn!("Callback rejected: missing signature header");
        Error::SignatureRejected("missing signature".into())
    })?;

    let digest = signature.strip_prefix("v0=").ok_or_else(|| {
        tracing::warn!("Callback rejected: invalid signature format");
        Error::SignatureRejected("invalid signature format".into())
    })?;

    let expected = hex::decode(digest)
        .map_err(|_| Error::SignatureRejected("invalid signature hex".into()))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| Error::SignatureRejected("invalid secret".into()))?;
    mac.update(format!("v0:{}:", timestamp).as_bytes());
    mac.update(body);

    mac.verify_slice(&expected).map_err(|_| {
        tracing::warn!("Callback rejected: signature mismatch");
        Error::SignatureRejected("signature mismatch".into())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(timestamp: i64, body: &[u8], secret: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("v0:{}:", timestamp).as_bytes());
        mac.update(body);
        format!("v0={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn check(ts: i64, sig: &str, body: &[u8], secret: &str, now: i64) -> Result<()> {
        let ts = ts.to_string();
        verify_at(Some(ts.as_str()), Some(sig), body, secret, now)
    }

    #[test]
    fn accepts_valid_signature() {
        let now = 1_700_000_000;
        let body = br#"{"type":"import-export"}"#;
        let sig = sign(now, body, "secret");
        assert!(check(now, &sig, body, "secret", now).is_ok());
    }

    #[test]
    fn accepts_within_freshness_window() {
        let now = 1_700_000_000;
        let ts = now - 299;
        let sig = sign(ts, b"payload", "secret");
        assert!(check(ts, &sig, b"payload", "secret", now).is_ok());
    }

    #[test]
    fn rejects_stale_timestamp() {
        let now = 1_700_000_000;
        let ts = now - 301;
        let sig = sign(ts, b"payload", "secret");
        assert!(check(ts, &sig, b"payload", "secret", now).is_err());
    }

    #[test]
    fn rejects_future_timestamp() {
        let now = 1_700_000_000;
        let ts = now + 301;
        let sig = sign(ts, b"payload", "secret");
        assert!(check(ts, &sig, b"payload", "secret", now).is_err());
    }

    #[test]
    fn rejects_missing_headers() {
        let now = 1_700_000_000;
        assert!(verify_at(None, Some("v0=00"), b"x", "secret", now).is_err());
        assert!(verify_at(Some("1700000000"), None, b"x", "secret", now).is_err());
    }

    #[test]
    fn rejects_tampered_body() {
        let now = 1_700_000_000;
        let sig = sign(now, b"payload", "secret");
        assert!(check(now, &sig, b"paymoad", "secret", now).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let now = 1_700_000_000;
        let sig = sign(now, b"payload", "secret");
        assert!(check(now, &sig, b"payload", "other", now).is_err());
    }

    #[test]
    fn rejects_bad_prefix() {
        let now = 1_700_000_000;
        let sig = sign(now, b"payload", "secret").replace("v0=", "sha256=");
        assert!(check(now, &sig, b"payload", "secret", now).is_err());
    }
}
