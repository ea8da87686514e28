use crate::core::errors::ExchangeError;
use std::collections::HashMap;

/// Result type for signing operations: (headers, `query_params`)
pub type SignatureResult = Result<(HashMap<String, String>, Vec<(String, String)>), ExchangeError>;

/// Signer trait for request authentication
///
/// Implementations hold the account credentials and know how a given
/// exchange expects them to be attached to a request.
pub trait Signer: Send + Sync {
    /// Sign a request and return headers and query parameters
    ///
    /// # Arguments
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `endpoint` - API endpoint path
    /// * `query_string` - Encoded query string (without leading '?')
    /// * `timestamp` - Request timestamp in milliseconds
    ///
    /// # Returns
    /// Tuple of (headers, extra query params). The extra params are appended
    /// after `query_string`, in order.
    fn sign_request(
        &self,
        method: &str,
        endpoint: &str,
        query_string: &str,
        timestamp: u64,
    ) -> SignatureResult;

    /// Headers identifying the account without signing the request
    fn api_key_headers(&self) -> Result<HashMap<String, String>, ExchangeError>;
}
