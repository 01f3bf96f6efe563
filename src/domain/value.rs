use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// TeleSign customer id.
///
/// Invariant: non-empty after trimming.
pub struct CustomerId(String);

impl CustomerId {
    /// Request field name used by TeleSign (`CustomerID`).
    pub const FIELD: &'static str = "CustomerID";

    /// Create a validated [`CustomerId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated customer id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// TeleSign authentication id.
///
/// Invariant: non-empty after trimming.
pub struct AuthenticationId(String);

impl AuthenticationId {
    /// Request field name used by TeleSign (`AuthenticationID`).
    pub const FIELD: &'static str = "AuthenticationID";

    /// Create a validated [`AuthenticationId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated authentication id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Country calling code as sent to TeleSign (`CountryCode`), e.g. `"1"` for
/// the USA or `"61"` for Australia.
///
/// Invariant: non-empty after trimming. No further validation is performed;
/// the remote service rejects unroutable codes with an API error.
pub struct CountryCode(String);

impl CountryCode {
    /// Request field name used by TeleSign (`CountryCode`).
    pub const FIELD: &'static str = "CountryCode";

    /// Create a validated (non-empty) country calling code.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the country calling code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to TeleSign (`PhoneNumber`), without the
/// country calling code.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you
/// want E.164 parsing, use [`PhoneNumber`] and
/// [`VerifyRequest::from_parsed`](crate::VerifyRequest::from_parsed).
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Request field name used by TeleSign (`PhoneNumber`).
    pub const FIELD: &'static str = "PhoneNumber";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to TeleSign.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }

    /// Country calling code of the parsed number, e.g. `"1"` or `"61"`.
    pub fn country_code(&self) -> CountryCode {
        CountryCode(self.parsed.code().value().to_string())
    }

    /// National significant number, without the country calling code.
    pub fn national_number(&self) -> RawPhoneNumber {
        RawPhoneNumber(self.parsed.national().value().to_string())
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Verification message language hint (`Message`), e.g. `"australian"` or
/// `"englishuk"`. See the TeleSign docs for the accepted values.
///
/// Invariant: non-empty after trimming.
pub struct Language(String);

impl Language {
    /// Request field name used by TeleSign (`Message`).
    pub const FIELD: &'static str = "Message";

    /// Create a validated [`Language`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated language hint.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// TeleSign reference id (`ReferenceID`) issued for a delivery attempt.
///
/// Opaque correlation token, usable for later status lookup on the TeleSign
/// side. Invariant: non-empty after trimming.
pub struct ReferenceId(String);

impl ReferenceId {
    /// Response field name used by TeleSign (`ReferenceID`).
    pub const FIELD: &'static str = "ReferenceID";

    /// Create a validated [`ReferenceId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated reference id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// TeleSign API error code embedded in the response envelope.
///
/// `0` means success; any other value is a vendor error code. The value is
/// preserved as-is and never remapped by this crate.
pub struct ApiErrorCode(i32);

impl ApiErrorCode {
    /// The success sentinel (`Code == 0`).
    pub const SUCCESS: Self = Self(0);

    /// Construct an error code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by TeleSign.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns `true` when this code equals the success sentinel.
    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }
}
