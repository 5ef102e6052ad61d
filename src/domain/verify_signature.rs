use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Maximum distance, in seconds, between the server clock and the request timestamp.
pub const MAX_REQUEST_AGE: u64 = 60 * 5;

const VERSION: &str = "v0";

/// The parts of an inbound request needed to verify it came from slack.
#[derive(Debug, Clone, Copy)]
pub struct VerificationInput<'a> {
    pub request_timestamp: i64,
    pub signature: &'a str,
    pub body: &'a [u8],
    pub server_time: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    TimestampInvalid,
    SignatureInvalid,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TimestampInvalid => write!(f, "Request timestamp is invalid."),
            Error::SignatureInvalid => write!(f, "Signature is invalid."),
        }
    }
}

impl std::error::Error for Error {}

/// Checks slack request signatures against a single signing secret.
///
/// The secret is keyed into the MAC once at construction and cannot be changed
/// afterwards. One verifier can be shared by every request task.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: Hmac<Sha256>,
}

impl SignatureVerifier {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mac = Hmac::<Sha256>::new_from_slice(secret.as_ref())
            .expect("HMAC can take key of any size");
        Self { mac }
    }

    /// Accepts the request or tells which of the two checks rejected it.
    ///
    /// The timestamp is checked first, so a stale request never reaches the MAC.
    pub fn verify(&self, input: &VerificationInput) -> Result<(), Error> {
        // verify that the timestamp does not differ from local time by more than five minutes
        if input.server_time.abs_diff(input.request_timestamp) > MAX_REQUEST_AGE {
            log::trace!(
                "request is too old: timestamp={},server_time={}",
                input.request_timestamp,
                input.server_time
            );
            return Err(Error::TimestampInvalid);
        }

        let expected_signature = self.sign(input.request_timestamp, input.body);

        // match the two signatures
        if !bool::from(
            expected_signature
                .as_bytes()
                .ct_eq(input.signature.as_bytes()),
        ) {
            log::trace!("signature mismatch");
            return Err(Error::SignatureInvalid);
        }

        log::debug!("signature verified");
        Ok(())
    }

    /// Computes the `v0=<hex>` signature slack would send for this timestamp and body.
    pub fn sign(&self, timestamp: i64, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(format!("{}:{}:", VERSION, timestamp).as_bytes());
        mac.update(body);
        let result = mac.finalize().into_bytes();
        format!("{}={}", VERSION, hex::encode(result))
    }
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Reads the timestamp header as seconds since epoch.
///
/// Anything that is not a plain integer becomes `0`, which is always outside the
/// accepted window. That includes exponent and decimal forms such as `1e5`.
pub fn parse_timestamp(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}
