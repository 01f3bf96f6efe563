//! Typed Rust client for the TeleSign phone-verification API.
//!
//! The client generates a short numeric verification code locally, asks
//! TeleSign to deliver it to a phone number by voice call or SMS, and returns
//! the code together with TeleSign's reference id. The design is three thin
//! layers: a domain layer of strong types, a transport layer for wire-format
//! details, and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use telesign::{
//!     CountryCode, Credentials, RawPhoneNumber, TelesignClient, VerifyOptions, VerifyRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), telesign::TelesignError> {
//!     let client = TelesignClient::new(Credentials::new("customer-id", "auth-id")?);
//!     let request = VerifyRequest::new(
//!         CountryCode::new("1")?,
//!         RawPhoneNumber::new("5551234567")?,
//!         VerifyOptions::default(),
//!     );
//!     let verification = client.request_sms(request).await?;
//!     println!(
//!         "sent code {} (reference {})",
//!         verification.code,
//!         verification.reference_id.as_str()
//!     );
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, TelesignClient, TelesignClientBuilder, TelesignError};
pub use domain::{
    ApiErrorCode, AuthenticationId, CodeDigits, CountryCode, CustomerId, Language, PhoneNumber,
    RawPhoneNumber, ReferenceId, ValidationError, Verification, VerificationCode, VerifyOptions,
    VerifyRequest,
};
