use binance_endpoint::core::config::ExchangeConfig;
use binance_endpoint::core::errors::ExchangeError;
use binance_endpoint::core::kernel::{
    ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, Security,
};
use binance_endpoint::exchanges::binance::{build_endpoint, BinanceSigner, OrderBookOptions};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "test_api_key";
const SECRET: &str = "test_secret_key";

fn rest_client(server: &MockServer, with_signer: bool) -> ReqwestRest {
    let mut builder =
        RestClientBuilder::new(RestClientConfig::new(server.uri(), "binance".to_string()));
    if with_signer {
        builder = builder.with_signer(Arc::new(BinanceSigner::new(
            API_KEY.to_string(),
            SECRET.to_string(),
        )));
    }
    builder.build().unwrap()
}

async fn only_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

fn header_value<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|value| value.to_str().ok())
}

#[cfg(test)]
mod signed_request_tests {
    use super::*;

    #[tokio::test]
    async fn test_signed_get_appends_timestamp_and_signature() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/openOrders"))
            .and(query_param("symbol", "LTCBTC"))
            .and(header("X-MBX-APIKEY", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let rest = rest_client(&server, true);
        let body = rest
            .get(
                "/api/v3/openOrders",
                &[("symbol", "LTCBTC")],
                Security::Signed,
            )
            .await
            .unwrap();
        assert_eq!(body, json!([]));

        let request = only_request(&server).await;
        let query = request.url.query().unwrap().to_string();
        let (signed_part, signature) = query.rsplit_once("&signature=").unwrap();

        assert!(signed_part.starts_with("symbol=LTCBTC&timestamp="));
        let signer = BinanceSigner::new(API_KEY.to_string(), SECRET.to_string());
        assert_eq!(signer.generate_signature(signed_part).unwrap(), signature);
    }

    #[tokio::test]
    async fn test_signed_post_keeps_params_in_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v3/order"))
            .and(query_param("timeInForce", "GTC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"orderId": 28})))
            .mount(&server)
            .await;

        let rest = rest_client(&server, true);
        let body = rest
            .post(
                "/api/v3/order",
                &[("symbol", "LTCBTC"), ("timeInForce", "GTC"), ("type", "LIMIT")],
                Security::Signed,
            )
            .await
            .unwrap();

        assert_eq!(body["orderId"], 28);
        let request = only_request(&server).await;
        assert!(request.body.is_empty());
    }

    #[tokio::test]
    async fn test_signed_without_credentials_is_auth_error() {
        let server = MockServer::start().await;

        let rest = rest_client(&server, false);
        let result = rest.get("/api/v3/account", &[], Security::Signed).await;

        assert!(matches!(result, Err(ExchangeError::AuthError(_))));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod api_key_request_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_put_sends_key_without_signature() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/userDataStream"))
            .and(query_param("listenKey", "abc123"))
            .and(header("X-MBX-APIKEY", API_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let rest = rest_client(&server, true);
        rest.put(
            "/api/v1/userDataStream",
            &[("listenKey", "abc123")],
            Security::ApiKey,
        )
        .await
        .unwrap();

        let request = only_request(&server).await;
        assert_eq!(request.url.query(), Some("listenKey=abc123"));
    }

    #[tokio::test]
    async fn test_public_get_has_no_key_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let rest = rest_client(&server, true);
        rest.get("/api/v1/ping", &[], Security::None).await.unwrap();

        let request = only_request(&server).await;
        assert!(header_value(&request, "X-MBX-APIKEY").is_none());
        assert_eq!(request.url.query(), None);
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/depth"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"code": -1121, "msg": "Invalid symbol."})),
            )
            .mount(&server)
            .await;

        let rest = rest_client(&server, false);
        let result = rest
            .get("/api/v1/depth", &[("symbol", "NOPE")], Security::None)
            .await;

        match result {
            Err(ExchangeError::ApiError { code, message }) => {
                assert_eq!(code, 400);
                assert!(message.contains("Invalid symbol."));
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/ping"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let rest = rest_client(&server, false);
        let result = rest.get("/api/v1/ping", &[], Security::None).await;

        assert!(matches!(result, Err(ExchangeError::JsonError(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // nothing listens on the discard port
        let rest = RestClientBuilder::new(RestClientConfig::new(
            "http://127.0.0.1:9".to_string(),
            "binance".to_string(),
        ))
        .build()
        .unwrap();

        let result = rest.get("/api/v1/ping", &[], Security::None).await;

        assert!(matches!(result, Err(ExchangeError::HttpError(_))));
    }

    #[tokio::test]
    async fn test_endpoint_collapses_failures_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/depth"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = ExchangeConfig::read_only().base_url(server.uri());
        let endpoint = build_endpoint(config).unwrap();

        assert!(endpoint
            .order_book("BTCUSDT", OrderBookOptions::default())
            .await
            .is_none());
        // no credentials configured, so nothing signed reaches the server
        assert!(endpoint.my_account().await.is_none());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn test_time_through_built_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/time"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"serverTime": 1_499_827_319_559_i64})),
            )
            .mount(&server)
            .await;

        let config = ExchangeConfig::new(API_KEY.to_string(), SECRET.to_string())
            .base_url(server.uri());
        let endpoint = build_endpoint(config).unwrap();

        assert_eq!(endpoint.time().await, Some(1_499_827_319_559));
    }

    #[tokio::test]
    async fn test_listen_key_through_built_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/userDataStream"))
            .and(header("X-MBX-APIKEY", API_KEY))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"listenKey": "pqia91ma19a5"})),
            )
            .mount(&server)
            .await;

        let config = ExchangeConfig::new(API_KEY.to_string(), SECRET.to_string())
            .base_url(server.uri());
        let endpoint = build_endpoint(config).unwrap();

        assert_eq!(endpoint.listen_key().await.as_deref(), Some("pqia91ma19a5"));
    }

    #[tokio::test]
    async fn test_api_key_without_secret_allows_user_stream_calls() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/userDataStream"))
            .and(header("X-MBX-APIKEY", API_KEY))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"listenKey": "abc123"})),
            )
            .mount(&server)
            .await;

        let config = ExchangeConfig::new(API_KEY.to_string(), String::new()).base_url(server.uri());
        let endpoint = build_endpoint(config).unwrap();

        assert_eq!(endpoint.listen_key().await.as_deref(), Some("abc123"));
        // signing needs the secret, so this never leaves the client
        assert!(endpoint.my_account().await.is_none());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}
