use serde::Deserialize;

use crate::domain::{
    ApiErrorCode, CountryCode, Language, RawPhoneNumber, ReferenceId, VerificationCode,
    VerifyRequest, VerifyResponse,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contains invalid reference id: {value:?}")]
    InvalidReferenceId { value: String },
}

#[derive(Debug, Clone, Deserialize)]
struct VerifyJsonResponse {
    #[serde(rename = "APIError")]
    api_error: ApiErrorJson,
    #[serde(rename = "ReferenceID", default)]
    reference_id: Option<TransportReferenceId>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorJson {
    #[serde(rename = "Code")]
    code: i32,
    #[serde(rename = "Message", default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
// TeleSign is not consistent about the reference id's JSON type; both the
// string and numeric forms appear in the wild.
enum TransportReferenceId {
    String(String),
    Number(serde_json::Number),
}

impl TransportReferenceId {
    fn into_string(self) -> String {
        match self {
            Self::String(value) => value,
            Self::Number(value) => value.to_string(),
        }
    }
}

pub fn encode_verify_form(
    request: &VerifyRequest,
    code: &VerificationCode,
) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();

    params.push((
        CountryCode::FIELD.to_owned(),
        request.country_code().as_str().to_owned(),
    ));
    params.push((
        RawPhoneNumber::FIELD.to_owned(),
        request.phone_number().raw().to_owned(),
    ));
    params.push((VerificationCode::FIELD.to_owned(), code.as_str().to_owned()));
    if let Some(language) = request.options().language.as_ref() {
        params.push((Language::FIELD.to_owned(), language.as_str().to_owned()));
    }

    params
}

pub fn decode_verify_json_response(json: &str) -> Result<VerifyResponse, TransportError> {
    let parsed: VerifyJsonResponse = serde_json::from_str(json)?;

    let reference_id = parsed
        .reference_id
        .map(|value| {
            let value = value.into_string();
            ReferenceId::new(value.clone())
                .map_err(|_| TransportError::InvalidReferenceId { value })
        })
        .transpose()?;

    Ok(VerifyResponse {
        error_code: ApiErrorCode::new(parsed.api_error.code),
        error_message: parsed.api_error.message,
        reference_id,
    })
}
