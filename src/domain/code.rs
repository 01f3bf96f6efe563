use rand::Rng;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Number of digits in a generated verification code.
///
/// Invariant: `1..=9`. TeleSign's verification flow uses 4 digits; the width
/// is kept configurable via [`TelesignClientBuilder::code_digits`](crate::TelesignClientBuilder::code_digits).
pub struct CodeDigits(u8);

impl CodeDigits {
    /// Minimum allowed width.
    pub const MIN: u8 = 1;
    /// Maximum allowed width.
    pub const MAX: u8 = 9;

    /// Create a validated digit width.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::CodeDigitsOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying width.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for CodeDigits {
    fn default() -> Self {
        Self(4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Locally generated verification code (`VerificationCode`).
///
/// A decimal numeral of exactly the requested width, first digit nonzero.
/// Short-lived and single-use; this crate never stores it — the caller
/// compares it against the user-supplied code later.
pub struct VerificationCode(String);

impl VerificationCode {
    /// Request field name used by TeleSign (`VerificationCode`).
    pub const FIELD: &'static str = "VerificationCode";

    /// Draw a code of `digits` decimal digits from `rng`.
    ///
    /// The value is uniform over `[10^(digits-1), 10^digits - 1]`, which
    /// guarantees the fixed width without leading zeros. The source does not
    /// need to be cryptographically secure: codes are short-lived and
    /// single-use.
    pub fn generate(digits: CodeDigits, rng: &mut impl Rng) -> Self {
        let low = 10u32.pow(u32::from(digits.value()) - 1);
        let high = low * 10 - 1;
        Self(rng.gen_range(low..=high).to_string())
    }

    /// Borrow the code as a decimal numeral.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
