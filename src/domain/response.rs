use crate::domain::code::VerificationCode;
use crate::domain::value::{ApiErrorCode, ReferenceId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded TeleSign response envelope, before the success check.
pub struct VerifyResponse {
    pub error_code: ApiErrorCode,
    pub error_message: Option<String>,
    pub reference_id: Option<ReferenceId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a successful verification request.
///
/// Only constructed when the envelope's `APIError.Code` equals 0.
pub struct Verification {
    /// The code delivered to the phone. Compare the user's later input
    /// against this value; this crate does not store it.
    pub code: VerificationCode,
    /// TeleSign's correlation token for this delivery attempt.
    pub reference_id: ReferenceId,
}
