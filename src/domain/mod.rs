//! Domain layer: strong types with validation and invariants (no I/O).

mod code;
mod request;
mod response;
mod validation;
mod value;

pub use code::{CodeDigits, VerificationCode};
pub use request::{VerifyOptions, VerifyRequest};
pub use response::{Verification, VerifyResponse};
pub use validation::ValidationError;
pub use value::{
    ApiErrorCode, AuthenticationId, CountryCode, CustomerId, Language, PhoneNumber, RawPhoneNumber,
    ReferenceId,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_id_rejects_empty() {
        assert!(matches!(
            CustomerId::new("   "),
            Err(ValidationError::Empty {
                field: CustomerId::FIELD
            })
        ));
    }

    #[test]
    fn authentication_id_rejects_empty() {
        assert!(matches!(
            AuthenticationId::new(""),
            Err(ValidationError::Empty {
                field: AuthenticationId::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_trims() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::AU), " 0412345678 ").unwrap();
        assert_eq!(pn.raw(), "0412345678");
        assert_eq!(pn.e164(), "+61412345678");
    }

    #[test]
    fn code_digits_range_is_enforced() {
        assert!(CodeDigits::new(0).is_err());
        assert!(CodeDigits::new(1).is_ok());
        assert!(CodeDigits::new(9).is_ok());
        assert!(CodeDigits::new(10).is_err());
    }

    #[test]
    fn verify_request_carries_optional_language() {
        let request = VerifyRequest::new(
            CountryCode::new("61").unwrap(),
            RawPhoneNumber::new("412345678").unwrap(),
            VerifyOptions {
                language: Some(Language::new("australian").unwrap()),
            },
        );
        assert_eq!(
            request.options().language.as_ref().map(Language::as_str),
            Some("australian")
        );
    }
}
