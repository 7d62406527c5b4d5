//! Services picked by the user and their running totals.

use crate::model::{Recommendation, ServiceKey};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
/// Aggregate over the selected services.
pub struct Totals {
    /// Number of selected services.
    pub count: usize,
    /// Summed price in dollars.
    pub price: f64,
    /// Summed labor hours.
    pub labor_hours: f64,
}

#[derive(Debug, Clone, Default)]
/// Selected recommendations keyed by [`ServiceKey`], in selection order.
pub struct Selection {
    entries: Vec<(ServiceKey, Recommendation)>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the selection state of `recommendation`; returns whether it is now selected.
    pub fn toggle(&mut self, recommendation: &Recommendation) -> bool {
        let key = recommendation.key();
        if self.remove(&key) {
            return false;
        }
        self.entries.push((key, recommendation.clone()));
        true
    }

    /// Drop the entry for `key`; returns whether one was present.
    pub fn remove(&mut self, key: &ServiceKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(selected, _)| selected != key);
        self.entries.len() != before
    }

    /// Whether the service identified by `key` is selected.
    #[must_use]
    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.entries.iter().any(|(selected, _)| selected == key)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of selected services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected recommendations in the order they were picked.
    pub fn iter(&self) -> impl Iterator<Item = &Recommendation> {
        self.entries.iter().map(|(_, recommendation)| recommendation)
    }

    /// Count, price and labor summed over the selection.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.iter().fold(Totals::default(), |totals, recommendation| Totals {
            count: totals.count + 1,
            price: totals.price + recommendation.price,
            labor_hours: totals.labor_hours + recommendation.labor_hours,
        })
    }
}
