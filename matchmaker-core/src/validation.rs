//! Parsing of raw year/model/mileage text into a [`Vehicle`].

use crate::model::{Miles, Vehicle};

/// Highest odometer reading accepted from the form.
pub const MAX_MILEAGE: Miles = 500_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inclusive range of accepted model years.
pub struct YearRange {
    /// Oldest accepted year.
    pub min: u16,
    /// Newest accepted year.
    pub max: u16,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 1984,
            max: 2026,
        }
    }
}

impl YearRange {
    /// Check whether `year` lies inside the range.
    #[must_use]
    pub fn contains(self, year: f64) -> bool {
        year >= f64::from(self.min) && year <= f64::from(self.max)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// User-facing reasons a vehicle form was rejected.
pub enum ValidationError {
    /// Year field left blank.
    #[error("Please enter a vehicle year.")]
    MissingYear,
    /// Year field is not a whole number.
    #[error("Please enter a valid year.")]
    InvalidYear,
    /// Year outside the accepted range.
    #[error("Please enter a year between {min} and {max}.")]
    YearOutOfRange {
        /// Oldest accepted year.
        min: u16,
        /// Newest accepted year.
        max: u16,
    },
    /// No model chosen.
    #[error("Please select a model.")]
    MissingModel,
    /// Mileage field left blank.
    #[error("Please enter the current mileage.")]
    MissingMileage,
    /// Mileage unreadable, negative, or above [`MAX_MILEAGE`].
    #[error("Please enter a valid mileage.")]
    InvalidMileage,
}

#[derive(Debug, Clone, Copy)]
/// Unparsed form contents.
pub struct RawVehicleInput<'a> {
    /// Year text.
    pub year: &'a str,
    /// Model text.
    pub model: &'a str,
    /// Mileage text.
    pub mileage: &'a str,
}

/// Parse the year field.
///
/// # Errors
///
/// Returns [`ValidationError::MissingYear`], [`ValidationError::InvalidYear`]
/// or [`ValidationError::YearOutOfRange`].
pub fn parse_year_input(raw: &str, years: YearRange) -> Result<u16, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingYear);
    }

    // Accepts anything that reads as a whole number, e.g. "2018.0", "2e3" or "0x7E2".
    let year = parse_number(trimmed)
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .ok_or(ValidationError::InvalidYear)?;

    if !years.contains(year) {
        return Err(ValidationError::YearOutOfRange {
            min: years.min,
            max: years.max,
        });
    }

    Ok(whole_year(year))
}

/// Validate the whole form, checking year, then model, then mileage.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_vehicle_inputs(
    raw: RawVehicleInput<'_>,
    years: YearRange,
) -> Result<Vehicle, ValidationError> {
    let year = parse_year_input(raw.year, years)?;

    let model = raw.model.trim();
    if model.is_empty() {
        return Err(ValidationError::MissingModel);
    }

    let mileage_text = raw.mileage.trim();
    if mileage_text.is_empty() {
        return Err(ValidationError::MissingMileage);
    }

    let mileage = parse_leading_integer(mileage_text)
        .and_then(|value| Miles::try_from(value).ok())
        .filter(|value| *value <= MAX_MILEAGE)
        .ok_or(ValidationError::InvalidMileage)?;

    Ok(Vehicle {
        year,
        model: model.to_owned(),
        mileage,
    })
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "callers pass a whole number already checked against a u16 year range"
)]
fn whole_year(year: f64) -> u16 {
    year as u16
}

/// Read a decimal number, or an unsigned `0x`, `0o` or `0b` integer literal.
fn parse_number(text: &str) -> Option<f64> {
    let literal = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| {
            let (head, digits) = text.split_at_checked(prefix.len())?;
            head.eq_ignore_ascii_case(prefix).then_some((digits, radix))
        });

    match literal {
        Some((digits, radix)) => {
            if digits.starts_with('+') {
                return None;
            }
            u32::from_str_radix(digits, radix).ok().map(f64::from)
        }
        None => text.parse::<f64>().ok(),
    }
}

/// Read an optionally signed run of leading digits, ignoring whatever follows.
fn parse_leading_integer(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = unsigned
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let value = unsigned.get(..end)?.parse::<i64>().ok()?;

    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn input<'a>(year: &'a str, model: &'a str, mileage: &'a str) -> RawVehicleInput<'a> {
        RawVehicleInput {
            year,
            model,
            mileage,
        }
    }

    #[rstest]
    #[case("", "Camry", "1000", ValidationError::MissingYear)]
    #[case("   ", "Camry", "1000", ValidationError::MissingYear)]
    #[case("20x0", "Camry", "1000", ValidationError::InvalidYear)]
    #[case("2018.5", "Camry", "1000", ValidationError::InvalidYear)]
    #[case("0x", "Camry", "1000", ValidationError::InvalidYear)]
    #[case("0x+7E2", "Camry", "1000", ValidationError::InvalidYear)]
    #[case("1983", "Camry", "1000", ValidationError::YearOutOfRange { min: 1984, max: 2026 })]
    #[case("2027", "Camry", "1000", ValidationError::YearOutOfRange { min: 1984, max: 2026 })]
    #[case("2018", "", "1000", ValidationError::MissingModel)]
    #[case("2018", "  ", "1000", ValidationError::MissingModel)]
    #[case("2018", "Camry", "", ValidationError::MissingMileage)]
    #[case("2018", "Camry", "abc", ValidationError::InvalidMileage)]
    #[case("2018", "Camry", "-1", ValidationError::InvalidMileage)]
    #[case("2018", "Camry", "500001", ValidationError::InvalidMileage)]
    #[case("", "", "", ValidationError::MissingYear)]
    fn rejects_bad_input(
        #[case] year: &str,
        #[case] model: &str,
        #[case] mileage: &str,
        #[case] expected: ValidationError,
    ) {
        let result = validate_vehicle_inputs(input(year, model, mileage), YearRange::default());
        assert_eq!(result, Err(expected), "input {year:?}/{model:?}/{mileage:?}");
    }

    #[rstest]
    #[case("2018", " Camry ", "12000", 2018, "Camry", 12000)]
    #[case(" 1984 ", "RAV4", "0", 1984, "RAV4", 0)]
    #[case("2026", "Prius", "500000", 2026, "Prius", 500_000)]
    #[case("2018.0", "Tacoma", "12k", 2018, "Tacoma", 12)]
    #[case("2020", "4Runner", "+75000", 2020, "4Runner", 75000)]
    #[case("0x7E2", "Camry", "1000", 2018, "Camry", 1000)]
    #[case("0b11111100010", "Camry", "1000", 2018, "Camry", 1000)]
    fn accepts_good_input(
        #[case] year: &str,
        #[case] model: &str,
        #[case] mileage: &str,
        #[case] expected_year: u16,
        #[case] expected_model: &str,
        #[case] expected_mileage: Miles,
    ) {
        let vehicle = validate_vehicle_inputs(input(year, model, mileage), YearRange::default());
        assert_eq!(
            vehicle,
            Ok(Vehicle {
                year: expected_year,
                model: expected_model.to_owned(),
                mileage: expected_mileage,
            }),
            "input {year:?}/{model:?}/{mileage:?}"
        );
    }

    #[test]
    fn out_of_range_message_names_the_bounds() {
        let years = YearRange { min: 1990, max: 2030 };
        let error = parse_year_input("1989", years).expect_err("too old");
        assert_eq!(
            error.to_string(),
            "Please enter a year between 1990 and 2030.",
            "message uses the configured range"
        );
        assert_eq!(parse_year_input("2030", years), Ok(2030), "upper bound inclusive");
    }

    #[test]
    fn leading_integer_parsing() {
        assert_eq!(parse_leading_integer("123abc"), Some(123), "suffix ignored");
        assert_eq!(parse_leading_integer("-42"), Some(-42), "sign kept");
        assert_eq!(parse_leading_integer("x1"), None, "no leading digits");
        assert_eq!(parse_leading_integer("-"), None, "sign alone");
    }
}
