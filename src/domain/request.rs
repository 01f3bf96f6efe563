use crate::domain::value::{CountryCode, Language, PhoneNumber, RawPhoneNumber};

#[derive(Debug, Clone, Default)]
/// Optional parameters shared by the call and SMS verification requests.
pub struct VerifyOptions {
    /// Language hint for the spoken or texted message (`Message`). When
    /// absent, the service uses its default (US English).
    pub language: Option<Language>,
}

#[derive(Debug, Clone)]
/// A single verification delivery request.
///
/// The same request shape serves both delivery channels; the channel is
/// chosen by calling [`TelesignClient::request_call`](crate::TelesignClient::request_call)
/// or [`TelesignClient::request_sms`](crate::TelesignClient::request_sms).
/// Built fresh per call and not retained by the client.
pub struct VerifyRequest {
    country_code: CountryCode,
    phone_number: RawPhoneNumber,
    options: VerifyOptions,
}

impl VerifyRequest {
    /// Build a request from an explicit country calling code and national
    /// phone number. No normalization is applied; malformed numbers surface
    /// as API errors from the service.
    pub fn new(
        country_code: CountryCode,
        phone_number: RawPhoneNumber,
        options: VerifyOptions,
    ) -> Self {
        Self {
            country_code,
            phone_number,
            options,
        }
    }

    /// Build a request from a parsed E.164 number, splitting it into the
    /// country calling code and national number the service expects.
    pub fn from_parsed(number: &PhoneNumber, options: VerifyOptions) -> Self {
        Self {
            country_code: number.country_code(),
            phone_number: number.national_number(),
            options,
        }
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    pub fn phone_number(&self) -> &RawPhoneNumber {
        &self.phone_number
    }

    pub fn options(&self) -> &VerifyOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_values_verbatim() {
        let request = VerifyRequest::new(
            CountryCode::new("1").unwrap(),
            RawPhoneNumber::new("5551234567").unwrap(),
            VerifyOptions::default(),
        );
        assert_eq!(request.country_code().as_str(), "1");
        assert_eq!(request.phone_number().raw(), "5551234567");
        assert!(request.options().language.is_none());
    }

    #[test]
    fn from_parsed_splits_e164() {
        let parsed = PhoneNumber::parse(None, "+61412345678").unwrap();
        let request = VerifyRequest::from_parsed(&parsed, VerifyOptions::default());
        assert_eq!(request.country_code().as_str(), "61");
        assert_eq!(request.phone_number().raw(), "412345678");
    }
}
