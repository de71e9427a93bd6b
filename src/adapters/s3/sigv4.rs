//! AWS Signature Version 4 query-string presigning.
//!
//! Implements the subset S3 object operations need: single path segment
//! hierarchy, `host` as the only signed header, unsigned payload.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Inputs for one presigned URL.
pub(crate) struct PresignRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Object key without a leading slash.
    pub key: &'a str,
    pub region: &'a str,
    pub access_key_id: &'a str,
    pub secret_access_key: &'a str,
    pub expires_secs: u64,
    pub now: DateTime<Utc>,
}

/// Produces a presigned `https://` URL for the request.
pub(crate) fn presign_url(req: &PresignRequest<'_>) -> String {
    let amz_date = req.now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = req.now.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/s3/aws4_request", date, req.region);
    let credential = format!("{}/{}", req.access_key_id, scope);

    let canonical_uri = format!("/{}", uri_encode(req.key, false));
    // Already in lexicographic order.
    let canonical_query = format!(
        "X-Amz-Algorithm={}&X-Amz-Credential={}&X-Amz-Date={}&X-Amz-Expires={}&X-Amz-SignedHeaders=host",
        ALGORITHM,
        uri_encode(&credential, true),
        amz_date,
        req.expires_secs,
    );

    let canonical_request = format!(
        "{}\n{}\n{}\nhost:{}\n\nhost\nUNSIGNED-PAYLOAD",
        req.method, canonical_uri, canonical_query, req.host,
    );

    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes())),
    );

    let signing_key = derive_signing_key(req.secret_access_key, &date, req.region);
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    format!(
        "https://{}{}?{}&X-Amz-Signature={}",
        req.host, canonical_uri, canonical_query, signature,
    )
}

fn derive_signing_key(secret: &str, date: &str, region: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, b"s3");
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// RFC 3986 percent-encoding as SigV4 requires: unreserved characters pass
/// through, `/` passes only when it separates path segments.
fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            b'/' if !encode_slash => out.push('/'),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
