use crate::constants::{OAUTH_ENCODE_SET, OAUTH_VERSION};
use crate::credential::Credential;
use percent_encoding::utf8_percent_encode;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::signature::{SignatureEncoding, Signer as _};
use rsa::RsaPrivateKey;
use sha1::Sha1;
use std::fmt;
use xerosign_core::hash::{base64_encode, base64_hmac_sha1};
use xerosign_core::time::unix_timestamp;
use xerosign_core::{Error, Result};

/// The OAuth 1.0a signature method an application signs with.
///
/// Which one applies is decided by the app trust model: public apps use
/// HMAC-SHA1 keyed on the consumer secret, private and partner apps use
/// RSA-SHA1 keyed on their private key certificate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureMethod {
    /// HMAC-SHA1, keyed on consumer secret and token secret.
    #[default]
    HmacSha1,
    /// RSA-SHA1, keyed on the application's private key certificate.
    RsaSha1,
}

impl SignatureMethod {
    /// The wire name of this method, as sent in `oauth_signature_method`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::RsaSha1 => "RSA-SHA1",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The key material handed to a [`TokenSign`] implementation.
///
/// HMAC-SHA1 uses `consumer_secret` plus the `token_secret` of whichever
/// token is in play; RSA-SHA1 uses the PEM `private_key` instead.
pub struct SigningKeys<'a> {
    /// Consumer secret of the application.
    pub consumer_secret: &'a str,
    /// Secret of the token being exchanged or used, if any.
    pub token_secret: Option<&'a str>,
    /// PEM content of the RSA private key, for RSA-SHA1.
    pub private_key: Option<&'a str>,
}

impl<'a> SigningKeys<'a> {
    /// Keys for HMAC-SHA1 signing.
    pub fn hmac(consumer_secret: &'a str, token_secret: Option<&'a str>) -> Self {
        Self {
            consumer_secret,
            token_secret,
            private_key: None,
        }
    }

    /// Keys for RSA-SHA1 signing.
    pub fn rsa(consumer_secret: &'a str, private_key: &'a str) -> Self {
        Self {
            consumer_secret,
            token_secret: None,
            private_key: Some(private_key),
        }
    }
}

/// TokenSign computes an OAuth 1.0a signature over a base string.
///
/// The default implementation is [`CryptoTokenSigner`]; tests substitute
/// deterministic fakes to keep the token-exchange flow hermetic.
pub trait TokenSign: std::fmt::Debug + Send + Sync + 'static {
    /// Sign `base_string` with `keys` using `method`.
    fn sign(
        &self,
        method: SignatureMethod,
        base_string: &str,
        keys: &SigningKeys<'_>,
    ) -> Result<String>;
}

/// The production [`TokenSign`] implementation.
///
/// HMAC-SHA1 per RFC 5849 Section 3.4.2, RSA-SHA1 (PKCS#1 v1.5) per
/// Section 3.4.3. Accepts both PKCS#8 and PKCS#1 PEM private keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoTokenSigner;

impl TokenSign for CryptoTokenSigner {
    fn sign(
        &self,
        method: SignatureMethod,
        base_string: &str,
        keys: &SigningKeys<'_>,
    ) -> Result<String> {
        match method {
            SignatureMethod::HmacSha1 => {
                let key = format!(
                    "{}&{}",
                    percent_encode(keys.consumer_secret),
                    percent_encode(keys.token_secret.unwrap_or(""))
                );
                Ok(base64_hmac_sha1(key.as_bytes(), base_string.as_bytes()))
            }
            SignatureMethod::RsaSha1 => {
                let pem = keys.private_key.ok_or_else(|| {
                    Error::config_invalid("RSA-SHA1 signing requires a private key")
                })?;
                let key = RsaPrivateKey::from_pkcs8_pem(pem)
                    .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
                    .map_err(|e| {
                        Error::config_invalid("failed to parse RSA private key").with_source(e)
                    })?;
                let signing_key = SigningKey::<Sha1>::new(key);
                let signature = signing_key.sign(base_string.as_bytes());
                Ok(base64_encode(&signature.to_bytes()))
            }
        }
    }
}

/// Percent-encode with the RFC 3986 unreserved set OAuth requires.
pub(crate) fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, &OAUTH_ENCODE_SET).to_string()
}

/// Sign a base string for `cred`, picking the key material its signature
/// method needs.
pub(crate) fn sign_credential(
    signer: &dyn TokenSign,
    cred: &Credential,
    base_string: &str,
    token_secret: Option<&str>,
) -> Result<String> {
    match cred.signature_method {
        SignatureMethod::HmacSha1 => signer.sign(
            cred.signature_method,
            base_string,
            &SigningKeys::hmac(&cred.consumer_secret, token_secret),
        ),
        SignatureMethod::RsaSha1 => {
            let pem = cred
                .private_key
                .as_deref()
                .ok_or_else(|| Error::config_invalid("RSA-SHA1 signing requires a private key"))?;
            signer.sign(
                cred.signature_method,
                base_string,
                &SigningKeys::rsa(&cred.consumer_secret, pem),
            )
        }
    }
}

/// The `oauth_*` protocol parameter set for one signed request.
///
/// Every request gets a fresh nonce and timestamp; the caller adds the
/// token and verifier when the flow has them.
pub(crate) struct OAuthParams {
    pairs: Vec<(String, String)>,
}

impl OAuthParams {
    pub fn new(consumer_key: &str, method: SignatureMethod) -> Self {
        let pairs = vec![
            ("oauth_consumer_key".to_string(), consumer_key.to_string()),
            ("oauth_nonce".to_string(), nonce()),
            (
                "oauth_signature_method".to_string(),
                method.as_str().to_string(),
            ),
            (
                "oauth_timestamp".to_string(),
                unix_timestamp().to_string(),
            ),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];

        Self { pairs }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.pairs
            .push(("oauth_token".to_string(), token.to_string()));
        self
    }

    pub fn with_verifier(mut self, verifier: &str) -> Self {
        self.pairs
            .push(("oauth_verifier".to_string(), verifier.to_string()));
        self
    }

    /// Build the signature base string per RFC 5849 Section 3.4.1.
    ///
    /// `base_url` must not carry a query string; request query parameters
    /// go through `extra` so they participate in the sorted parameter set.
    pub fn base_string(&self, method: &str, base_url: &str, extra: &[(String, String)]) -> String {
        let mut params: Vec<(String, String)> = self
            .pairs
            .iter()
            .chain(extra.iter())
            .map(|(k, v)| (percent_encode(k), percent_encode(v)))
            .collect();
        params.sort();

        let param_string = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        format!(
            "{}&{}&{}",
            method,
            percent_encode(base_url),
            percent_encode(&param_string)
        )
    }

    /// Serialize the parameter set plus signature as an `Authorization`
    /// header value.
    pub fn authorization_header(&self, signature: &str) -> String {
        let mut header = String::from("OAuth ");
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                header.push_str(", ");
            }
            header.push_str(k);
            header.push_str("=\"");
            header.push_str(&percent_encode(v));
            header.push('"');
        }
        header.push_str(", oauth_signature=\"");
        header.push_str(&percent_encode(signature));
        header.push('"');

        header
    }
}

/// Cryptographically random, unique per request.
fn nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference request from the OAuth Core 1.0 spec, Appendix A.5.
    const REFERENCE_BASE_STRING: &str = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";

    fn reference_params() -> OAuthParams {
        OAuthParams {
            pairs: vec![
                (
                    "oauth_consumer_key".to_string(),
                    "dpf43f3p2l4k3l03".to_string(),
                ),
                ("oauth_nonce".to_string(), "kllo9940pd9333jh".to_string()),
                (
                    "oauth_signature_method".to_string(),
                    "HMAC-SHA1".to_string(),
                ),
                ("oauth_timestamp".to_string(), "1191242096".to_string()),
                ("oauth_version".to_string(), "1.0".to_string()),
            ],
        }
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("abcXYZ019-._~"), "abcXYZ019-._~");
        assert_eq!(percent_encode("hello world"), "hello%20world");
        assert_eq!(percent_encode("a+b/c=d&e"), "a%2Bb%2Fc%3Dd%26e");
    }

    #[test]
    fn test_base_string_matches_reference() {
        let params = reference_params().with_token("nnch734d00sl2jdk");
        let extra = vec![
            ("file".to_string(), "vacation.jpg".to_string()),
            ("size".to_string(), "original".to_string()),
        ];

        let base_string = params.base_string("GET", "http://photos.example.net/photos", &extra);
        assert_eq!(base_string, REFERENCE_BASE_STRING);
    }

    #[test]
    fn test_hmac_sha1_matches_reference() {
        let keys = SigningKeys::hmac("kd94hf93k423kf44", Some("pfkkdhi9sl3r4s00"));
        let signature = CryptoTokenSigner
            .sign(SignatureMethod::HmacSha1, REFERENCE_BASE_STRING, &keys)
            .unwrap();

        assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    }

    #[test]
    fn test_rsa_sha1_requires_private_key() {
        let keys = SigningKeys::hmac("secret", None);
        let err = CryptoTokenSigner
            .sign(SignatureMethod::RsaSha1, "base", &keys)
            .unwrap_err();

        assert_eq!(err.kind(), xerosign_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_rsa_sha1_rejects_garbage_pem() {
        let keys = SigningKeys::rsa("secret", "not a pem at all");
        let err = CryptoTokenSigner
            .sign(SignatureMethod::RsaSha1, "base", &keys)
            .unwrap_err();

        assert_eq!(err.kind(), xerosign_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_authorization_header() {
        let header = reference_params().authorization_header("sig+with/reserved=");

        assert!(header.starts_with("OAuth oauth_consumer_key=\"dpf43f3p2l4k3l03\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.ends_with("oauth_signature=\"sig%2Bwith%2Freserved%3D\""));
    }

    #[test]
    fn test_nonce_is_fresh_per_request() {
        let a = nonce();
        let b = nonce();

        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
