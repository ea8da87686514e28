use crate::core::errors::ExchangeError;
use crate::core::kernel::{SignatureResult, Signer};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HMAC-SHA256 request signer holding the session's credentials
pub struct BinanceSigner {
    api_key: Secret<String>,
    secret_key: Secret<String>,
}

impl BinanceSigner {
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
        }
    }

    /// Hex-encoded HMAC-SHA256 of `payload` under the secret key
    pub fn generate_signature(&self, payload: &str) -> Result<String, ExchangeError> {
        if self.secret_key.expose_secret().is_empty() {
            return Err(ExchangeError::AuthError("Secret key is empty".to_string()));
        }
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Failed to create HMAC: {}", e)))?;
        mac.update(payload.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn key_header(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(
            API_KEY_HEADER.to_string(),
            self.api_key.expose_secret().clone(),
        );
        headers
    }
}

impl Signer for BinanceSigner {
    fn sign_request(
        &self,
        _method: &str,
        _endpoint: &str,
        query_string: &str,
        timestamp: u64,
    ) -> SignatureResult {
        let full_query = if query_string.is_empty() {
            format!("timestamp={}", timestamp)
        } else {
            format!("{}&timestamp={}", query_string, timestamp)
        };

        let signature = self.generate_signature(&full_query)?;

        let params = vec![
            ("timestamp".to_string(), timestamp.to_string()),
            ("signature".to_string(), signature),
        ];

        Ok((self.key_header(), params))
    }

    fn api_key_headers(&self) -> Result<HashMap<String, String>, ExchangeError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ExchangeError::AuthError("API key is empty".to_string()));
        }
        Ok(self.key_header())
    }
}
