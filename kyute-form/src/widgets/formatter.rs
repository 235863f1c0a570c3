use std::{error::Error, fmt::Display, str::FromStr};

/// Validation result.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    /// The input is valid.
    Valid,
    /// The input is invalid.
    Invalid,
    /// The input is invalid as-is, but possibly because the user hasn't finished inputting the value.
    Incomplete,
}

/// Formats, validates, and parses text input.
pub trait Formatter<T> {
    /// Formats the given value.
    fn format(&self, value: &T) -> String;

    /// Validates the given input.
    fn validate_partial_input(&self, text: &str) -> ValidationResult;

    /// Parses the given input.
    fn parse(&self, text: &str) -> Result<T, anyhow::Error>;
}

/// Formatter using the `FromStr` and `Display` traits.
#[derive(Copy, Clone, Debug, Default)]
pub struct DisplayFormatter;

impl<T> Formatter<T> for DisplayFormatter
where
    T: Display + FromStr,
    <T as FromStr>::Err: Error + Send + Sync + 'static,
{
    fn format(&self, value: &T) -> String {
        format!("{}", value)
    }

    fn validate_partial_input(&self, text: &str) -> ValidationResult {
        match text.parse::<T>() {
            Ok(_) => ValidationResult::Valid,
            Err(_) => ValidationResult::Invalid,
        }
    }

    fn parse(&self, text: &str) -> Result<T, anyhow::Error> {
        Ok(text.parse::<T>()?)
    }
}

/// Formatter for floating-point values.
#[derive(Copy, Clone, Debug)]
pub struct FloatingPointNumberFormatter {
    precision: usize,
}

impl FloatingPointNumberFormatter {
    /// Creates a new instance of this formatter.
    ///
    /// # Arguments
    /// * precision the maximum number of digits to print after the dot
    pub fn new(precision: usize) -> FloatingPointNumberFormatter {
        FloatingPointNumberFormatter { precision }
    }
}

macro_rules! impl_float_formatter {
    ($t:ty) => {
        impl Formatter<$t> for FloatingPointNumberFormatter {
            fn format(&self, value: &$t) -> String {
                format!("{:.*}", self.precision, value)
            }

            fn validate_partial_input(&self, text: &str) -> ValidationResult {
                match text.trim().parse::<$t>() {
                    Ok(_) => ValidationResult::Valid,
                    // a sign or a trailing exponent marker may still become a number
                    Err(_) if text.ends_with(['-', '+', 'e', 'E']) => ValidationResult::Incomplete,
                    Err(_) => ValidationResult::Invalid,
                }
            }

            fn parse(&self, text: &str) -> Result<$t, anyhow::Error> {
                Ok(text.trim().parse::<$t>()?)
            }
        }
    };
}

impl_float_formatter!(f32);
impl_float_formatter!(f64);
