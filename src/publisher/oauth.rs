//! OAuth 1.0a request signing (HMAC-SHA1)
//!
//! Builds the `Authorization` header for Twitter API requests signed with
//! user-context credentials. Only the oauth_* protocol parameters enter
//! the signature base string: the tweet payload is a JSON body, which is
//! excluded from signing per the OAuth 1.0a spec.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::TwitterCredentials;

type HmacSha1 = Hmac<Sha1>;

// RFC 3986 unreserved characters stay literal; everything else is encoded
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string per RFC 3986 as required by OAuth 1.0a
pub fn percent_encode(input: &str) -> String {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).to_string()
}

/// Generate a random 32-character alphanumeric nonce
pub fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Build a signed `Authorization` header value for one request
///
/// `method` is the uppercase HTTP method and `url` the full request URL
/// without query parameters.
pub fn authorization_header(
    method: &str,
    url: &str,
    credentials: &TwitterCredentials,
    nonce: &str,
    timestamp: &str,
) -> String {
    // Protocol parameters, already in lexicographic order
    let params: [(&str, &str); 6] = [
        ("oauth_consumer_key", &credentials.api_key),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", timestamp),
        ("oauth_token", &credentials.access_token),
        ("oauth_version", "1.0"),
    ];

    let param_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method,
        percent_encode(url),
        percent_encode(&param_string)
    );

    let signing_key = format!(
        "{}&{}",
        percent_encode(&credentials.api_secret),
        percent_encode(&credentials.access_secret)
    );

    let mut mac =
        HmacSha1::new_from_slice(signing_key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base_string.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    let mut header_params: Vec<(&str, String)> = params
        .iter()
        .map(|(k, v)| (*k, (*v).to_string()))
        .collect();
    header_params.push(("oauth_signature", signature));
    header_params.sort_by(|a, b| a.0.cmp(b.0));

    let rendered = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {rendered}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> TwitterCredentials {
        TwitterCredentials {
            api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            api_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    #[test]
    fn test_percent_encode_unreserved_passthrough() {
        assert_eq!(percent_encode("Az09-._~"), "Az09-._~");
    }

    #[test]
    fn test_percent_encode_reserved() {
        assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(percent_encode("https://api.twitter.com/2/tweets"),
            "https%3A%2F%2Fapi.twitter.com%2F2%2Ftweets");
    }

    #[test]
    fn test_percent_encode_utf8() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_nonce_shape() {
        let n = nonce();
        assert_eq!(n.len(), 32);
        assert!(n.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_nonce_uniqueness() {
        assert_ne!(nonce(), nonce());
    }

    #[test]
    fn test_header_contains_all_protocol_params() {
        let header = authorization_header(
            "POST",
            "https://api.twitter.com/2/tweets",
            &test_credentials(),
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            "1318622958",
        );

        assert!(header.starts_with("OAuth "));
        for key in [
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_token",
            "oauth_version",
        ] {
            assert!(header.contains(key), "missing {key} in {header}");
        }
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_version=\"1.0\""));
    }

    #[test]
    fn test_header_is_deterministic_for_fixed_inputs() {
        let creds = test_credentials();
        let a = authorization_header("POST", "https://api.twitter.com/2/tweets", &creds, "n", "1");
        let b = authorization_header("POST", "https://api.twitter.com/2/tweets", &creds, "n", "1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_depends_on_url() {
        let creds = test_credentials();
        let a = authorization_header("POST", "https://api.twitter.com/2/tweets", &creds, "n", "1");
        let b = authorization_header("POST", "https://example.com/2/tweets", &creds, "n", "1");
        assert_ne!(a, b);
    }
}
