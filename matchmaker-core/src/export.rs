//! Display formatting and the plain-text service quote.

use std::fmt;

use chrono::NaiveDate;

use crate::model::{Priority, Recommendation, Vehicle};
use crate::selection::Selection;

/// Price as shown to customers: `FREE` for zero, otherwise dollars and cents.
#[must_use]
pub fn format_price(amount: f64) -> String {
    if amount == 0.0 {
        "FREE".to_owned()
    } else {
        format!("${amount:.2}")
    }
}

/// Mileage with comma thousands separators, e.g. `125,000`.
#[must_use]
pub fn format_miles<T: Into<i128>>(miles: T) -> String {
    let value: i128 = miles.into();
    let digits = value.unsigned_abs().to_string();

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        formatted.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}

/// When a recommendation is due, relative to the current mileage.
#[must_use]
pub fn due_label(recommendation: &Recommendation) -> String {
    if recommendation.overdue {
        format!("OVERDUE - Due at {} mi", format_miles(recommendation.due))
    } else {
        format!(
            "Due in {} mi (at {} mi)",
            format_miles(recommendation.miles_until),
            format_miles(recommendation.due)
        )
    }
}

/// Count shown next to a priority heading, e.g. `1 service` or `3 services`.
#[must_use]
pub fn service_count_label(count: usize) -> String {
    let noun = if count == 1 { "service" } else { "services" };
    format!("{count} {noun}")
}

/// Plain-text quote listing the selected services for a vehicle.
pub struct Quote<'a> {
    /// Services to list.
    pub selection: &'a Selection,
    /// Vehicle the quote is for.
    pub vehicle: &'a Vehicle,
    /// Manufacturer shown next to the model.
    pub make: &'a str,
    /// Day the quote was generated.
    pub date: NaiveDate,
}

impl fmt::Display for Quote<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "=== RECOMMENDED SERVICES ===")?;
        writeln!(
            formatter,
            "Vehicle: {} {} {}",
            self.vehicle.year, self.make, self.vehicle.model
        )?;
        writeln!(formatter, "Mileage: {} mi", format_miles(self.vehicle.mileage))?;
        writeln!(formatter, "Date: {}", self.date.format("%Y-%m-%d"))?;
        writeln!(formatter)?;

        for priority in Priority::ALL {
            let mut services = self
                .selection
                .iter()
                .filter(|recommendation| recommendation.priority == priority)
                .peekable();
            if services.peek().is_none() {
                continue;
            }

            writeln!(formatter, "{} PRIORITY:", priority.as_str().to_uppercase())?;
            for service in services {
                writeln!(
                    formatter,
                    "  ☐ {} - {} ({}h)",
                    service.service,
                    format_price(service.price),
                    service.labor_hours
                )?;
            }
            writeln!(formatter)?;
        }

        let totals = self.selection.totals();
        writeln!(formatter)?;
        writeln!(
            formatter,
            "TOTAL: ${:.2} | {:.1} hours labor",
            totals.price, totals.labor_hours
        )?;
        writeln!(formatter)?;
        write!(formatter, "Generated by Maintenance Matchmaker")
    }
}

/// Render the quote for `selection` as text ready to paste or save.
#[must_use]
pub fn build_export_text(
    selection: &Selection,
    vehicle: &Vehicle,
    make: &str,
    date: NaiveDate,
) -> String {
    Quote {
        selection,
        vehicle,
        make,
        date,
    }
    .to_string()
}
