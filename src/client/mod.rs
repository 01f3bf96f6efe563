//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    ApiErrorCode, AuthenticationId, CodeDigits, CustomerId, ValidationError, Verification,
    VerificationCode, VerifyRequest,
};

const DEFAULT_CALL_ENDPOINT: &str = "https://api.telesign.com/1.x/verify/call";
const DEFAULT_SMS_ENDPOINT: &str = "https://api.telesign.com/1.x/verify/sms";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: std::fmt::Debug + Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// TeleSign account credentials.
///
/// Immutable for the lifetime of a client instance; supplied at construction
/// and never mutated.
pub struct Credentials {
    customer_id: CustomerId,
    authentication_id: AuthenticationId,
}

impl Credentials {
    /// Create validated credentials from a customer id and authentication id.
    pub fn new(
        customer_id: impl Into<String>,
        authentication_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            customer_id: CustomerId::new(customer_id)?,
            authentication_id: AuthenticationId::new(authentication_id)?,
        })
    }

    fn push_form_params(&self, params: &mut Vec<(String, String)>) {
        params.push((
            CustomerId::FIELD.to_owned(),
            self.customer_id.as_str().to_owned(),
        ));
        params.push((
            AuthenticationId::FIELD.to_owned(),
            self.authentication_id.as_str().to_owned(),
        ));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TelesignClient`].
///
/// This error preserves:
/// - construction failures (malformed endpoint, transport setup),
/// - HTTP-level failures (non-2xx status or transport failures),
/// - API-level failures (`APIError.Code != 0`, verbatim and unmapped),
/// - validation/parse failures.
pub enum TelesignError {
    /// An endpoint override could not be parsed as a URL. Fatal to client
    /// construction; no request was attempted.
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// TeleSign returned a non-zero `APIError.Code`. The code and message are
    /// passed through verbatim; callers needing code-specific behavior must
    /// inspect them themselves.
    #[error("API error: {code:?} {message:?}")]
    Api {
        code: ApiErrorCode,
        message: Option<String>,
    },

    /// Response body could not be parsed as the expected envelope.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The envelope reported success but carried no `ReferenceID`.
    #[error("success response is missing ReferenceID")]
    MissingReferenceId,

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TelesignClient`].
///
/// Use this when you need to customize the endpoints, timeout, user-agent, or
/// the generated code width.
pub struct TelesignClientBuilder {
    credentials: Credentials,
    call_endpoint: String,
    sms_endpoint: String,
    code_digits: CodeDigits,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TelesignClientBuilder {
    /// Create a builder with the default endpoints, 4-digit codes, and no
    /// timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            call_endpoint: DEFAULT_CALL_ENDPOINT.to_owned(),
            sms_endpoint: DEFAULT_SMS_ENDPOINT.to_owned(),
            code_digits: CodeDigits::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override both TeleSign endpoint URLs (`verify/call` and `verify/sms`)
    /// at once.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.call_endpoint = endpoint.clone();
        self.sms_endpoint = endpoint;
        self
    }

    /// Override the TeleSign endpoint URL for `verify/call`.
    pub fn call_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.call_endpoint = endpoint.into();
        self
    }

    /// Override the TeleSign endpoint URL for `verify/sms`.
    pub fn sms_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.sms_endpoint = endpoint.into();
        self
    }

    /// Set the width of generated verification codes (default 4 digits).
    pub fn code_digits(mut self, digits: CodeDigits) -> Self {
        self.code_digits = digits;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TelesignClient`].
    ///
    /// Fails immediately when an endpoint override is not a valid URL or the
    /// HTTP client cannot be constructed; a client that failed to build must
    /// not be used for requests.
    pub fn build(self) -> Result<TelesignClient, TelesignError> {
        for endpoint in [&self.call_endpoint, &self.sms_endpoint] {
            Url::parse(endpoint).map_err(|source| TelesignError::InvalidEndpoint {
                url: endpoint.clone(),
                source,
            })?;
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TelesignError::Transport(Box::new(err)))?;

        Ok(TelesignClient {
            credentials: self.credentials,
            call_endpoint: self.call_endpoint,
            sms_endpoint: self.sms_endpoint,
            code_digits: self.code_digits,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level TeleSign phone-verification client.
///
/// This type generates a short verification code locally, submits it to
/// TeleSign for delivery, and returns the code together with TeleSign's
/// reference id. By default it uses:
/// - `https://api.telesign.com/1.x/verify/call` for voice delivery
/// - `https://api.telesign.com/1.x/verify/sms` for SMS delivery
///
/// The client holds no mutable state and may be shared (or cloned cheaply)
/// across concurrent callers. Each operation is exactly one request/response
/// round trip; there is no retry.
#[derive(Debug)]
pub struct TelesignClient {
    credentials: Credentials,
    call_endpoint: String,
    sms_endpoint: String,
    code_digits: CodeDigits,
    http: Arc<dyn HttpTransport>,
}

impl TelesignClient {
    /// Create a client using the default endpoints.
    ///
    /// For more customization, use [`TelesignClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            call_endpoint: DEFAULT_CALL_ENDPOINT.to_owned(),
            sms_endpoint: DEFAULT_SMS_ENDPOINT.to_owned(),
            code_digits: CodeDigits::default(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> TelesignClientBuilder {
        TelesignClientBuilder::new(credentials)
    }

    /// Deliver a verification code by voice call.
    ///
    /// Side effect: the destination phone rings. Do not invoke speculatively
    /// or repeatedly without user intent.
    ///
    /// Errors:
    /// - [`TelesignError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`TelesignError::Api`] when TeleSign reports a non-zero error code,
    /// - [`TelesignError::Transport`] / [`TelesignError::Parse`] for
    ///   network and decoding failures.
    pub async fn request_call(
        &self,
        request: VerifyRequest,
    ) -> Result<Verification, TelesignError> {
        self.dispatch(&self.call_endpoint, &request).await
    }

    /// Deliver a verification code by SMS.
    ///
    /// Identical contract to [`TelesignClient::request_call`]; only the
    /// delivery channel differs.
    pub async fn request_sms(
        &self,
        request: VerifyRequest,
    ) -> Result<Verification, TelesignError> {
        self.dispatch(&self.sms_endpoint, &request).await
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        request: &VerifyRequest,
    ) -> Result<Verification, TelesignError> {
        let code = VerificationCode::generate(self.code_digits, &mut rand::thread_rng());

        let mut params = Vec::<(String, String)>::new();
        self.credentials.push_form_params(&mut params);
        params.extend(crate::transport::encode_verify_form(request, &code));

        let response = self
            .http
            .post_form(endpoint, params)
            .await
            .map_err(TelesignError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(TelesignError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let parsed = crate::transport::decode_verify_json_response(&response.body)
            .map_err(|err| TelesignError::Parse(Box::new(err)))?;

        if !parsed.error_code.is_success() {
            return Err(TelesignError::Api {
                code: parsed.error_code,
                message: parsed.error_message,
            });
        }

        let reference_id = parsed
            .reference_id
            .ok_or(TelesignError::MissingReferenceId)?;

        Ok(Verification { code, reference_id })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{CountryCode, Language, RawPhoneNumber, VerifyOptions};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_params: Vec<(String, String)>,
        calls: usize,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_params: Vec::new(),
                    calls: 0,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            (state.last_url.clone(), state.last_params.clone())
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            params: Vec<(String, String)>,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_params = params;
                    state.calls += 1;
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn param(params: &[(String, String)], key: &str) -> Option<String> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn make_client(transport: FakeTransport) -> TelesignClient {
        TelesignClient {
            credentials: Credentials::new("cust", "secret").unwrap(),
            call_endpoint: "https://example.invalid/verify/call".to_owned(),
            sms_endpoint: "https://example.invalid/verify/sms".to_owned(),
            code_digits: CodeDigits::default(),
            http: Arc::new(transport),
        }
    }

    fn us_request() -> VerifyRequest {
        VerifyRequest::new(
            CountryCode::new("1").unwrap(),
            RawPhoneNumber::new("5551234567").unwrap(),
            VerifyOptions::default(),
        )
    }

    #[tokio::test]
    async fn request_call_includes_credentials_and_parses_ok_response() {
        let json = r#"
        {
          "APIError": { "Code": 0, "Message": "" },
          "ReferenceID": "R123"
        }
        "#;

        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let result = client.request_call(us_request()).await.unwrap();
        assert_eq!(result.reference_id.as_str(), "R123");
        assert_eq!(result.code.as_str().len(), 4);
        let value: u32 = result.code.as_str().parse().unwrap();
        assert!((1000..=9999).contains(&value));

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/verify/call"));
        assert_param(&params, "CustomerID", "cust");
        assert_param(&params, "AuthenticationID", "secret");
        assert_param(&params, "CountryCode", "1");
        assert_param(&params, "PhoneNumber", "5551234567");
        assert_eq!(
            param(&params, "VerificationCode").as_deref(),
            Some(result.code.as_str()),
            "submitted code must match the returned code"
        );
        assert_eq!(param(&params, "Message"), None);
    }

    #[tokio::test]
    async fn request_sms_uses_sms_endpoint_and_sends_language() {
        let json = r#"
        {
          "APIError": { "Code": 0, "Message": "" },
          "ReferenceID": "R456"
        }
        "#;

        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let request = VerifyRequest::new(
            CountryCode::new("61").unwrap(),
            RawPhoneNumber::new("412345678").unwrap(),
            VerifyOptions {
                language: Some(Language::new("australian").unwrap()),
            },
        );
        let result = client.request_sms(request).await.unwrap();
        assert_eq!(result.reference_id.as_str(), "R456");

        let (url, params) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/verify/sms"));
        assert_param(&params, "CountryCode", "61");
        assert_param(&params, "PhoneNumber", "412345678");
        assert_param(&params, "Message", "australian");
    }

    #[tokio::test]
    async fn both_operations_map_non_zero_code_to_api_error() {
        let json = r#"
        {
          "APIError": { "Code": 50, "Message": "Invalid phone number" }
        }
        "#;

        for op in ["call", "sms"] {
            let transport = FakeTransport::new(200, json);
            let client = make_client(transport);

            let err = match op {
                "call" => client.request_call(us_request()).await.unwrap_err(),
                _ => client.request_sms(us_request()).await.unwrap_err(),
            };
            match err {
                TelesignError::Api { code, message } => {
                    assert_eq!(code.as_i32(), 50);
                    assert_eq!(message.as_deref(), Some("Invalid phone number"));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn each_logical_call_makes_exactly_one_request() {
        let json = r#"{ "APIError": { "Code": 50, "Message": "Invalid phone number" } }"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        client.request_call(us_request()).await.unwrap_err();
        assert_eq!(transport.calls(), 1, "no retry on API failure");

        client.request_sms(us_request()).await.unwrap_err();
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn request_call_maps_non_success_http_status() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);

        let err = client.request_call(us_request()).await.unwrap_err();
        assert!(matches!(
            err,
            TelesignError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn request_call_maps_empty_http_body_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);

        let err = client.request_call(us_request()).await.unwrap_err();
        assert!(matches!(
            err,
            TelesignError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[tokio::test]
    async fn request_call_maps_invalid_json_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.request_call(us_request()).await.unwrap_err();
        assert!(matches!(err, TelesignError::Parse(_)));
    }

    #[tokio::test]
    async fn success_without_reference_id_is_an_error() {
        let json = r#"{ "APIError": { "Code": 0, "Message": "" } }"#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport);

        let err = client.request_call(us_request()).await.unwrap_err();
        assert!(matches!(err, TelesignError::MissingReferenceId));
    }

    #[tokio::test]
    async fn code_digits_override_changes_generated_width() {
        let json = r#"
        {
          "APIError": { "Code": 0 },
          "ReferenceID": "R789"
        }
        "#;

        let transport = FakeTransport::new(200, json);
        let mut client = make_client(transport.clone());
        client.code_digits = CodeDigits::new(6).unwrap();

        let result = client.request_sms(us_request()).await.unwrap();
        assert_eq!(result.code.as_str().len(), 6);

        let (_, params) = transport.last_request();
        assert_eq!(
            param(&params, "VerificationCode").as_deref(),
            Some(result.code.as_str())
        );
    }

    #[test]
    fn credentials_constructor_validates_inputs() {
        assert!(Credentials::new("   ", "secret").is_err());
        assert!(Credentials::new("cust", "").is_err());
        assert!(Credentials::new("cust", "secret").is_ok());
    }

    #[test]
    fn builder_endpoint_overrides_are_applied() {
        let credentials = Credentials::new("cust", "secret").unwrap();
        let client = TelesignClient::builder(credentials.clone())
            .endpoint("https://example.invalid/all")
            .build()
            .unwrap();
        assert_eq!(client.call_endpoint, "https://example.invalid/all");
        assert_eq!(client.sms_endpoint, "https://example.invalid/all");

        let client = TelesignClient::builder(credentials)
            .call_endpoint("https://example.invalid/verify/call")
            .sms_endpoint("https://example.invalid/verify/sms")
            .build()
            .unwrap();
        assert_eq!(client.call_endpoint, "https://example.invalid/verify/call");
        assert_eq!(client.sms_endpoint, "https://example.invalid/verify/sms");
    }

    #[test]
    fn builder_rejects_malformed_endpoint() {
        let credentials = Credentials::new("cust", "secret").unwrap();
        let err = TelesignClient::builder(credentials)
            .endpoint("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, TelesignError::InvalidEndpoint { .. }));
    }
}
