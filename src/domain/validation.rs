use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    CodeDigitsOutOfRange { min: u8, max: u8, actual: u8 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::CodeDigitsOutOfRange { min, max, actual } => {
                write!(
                    f,
                    "code digit width out of range: {actual} (expected {min}..={max})"
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}
