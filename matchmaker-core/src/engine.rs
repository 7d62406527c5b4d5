//! Pure recommendation derivation over a maintenance schedule.

use std::collections::HashMap;

use crate::model::{
    IntervalTable, Miles, Priority, Recommendation, RecommendationSet, Schedule, ServiceKey,
};
use crate::ports::ScheduleError;

/// Look-ahead window used when the caller does not pick one.
pub const DEFAULT_LOOK_AHEAD: Miles = 5000;

/// Mileage of the next service interval after `mileage`.
///
/// Inside the table this is the smallest base interval strictly greater than
/// `mileage`. Past the last interval the mileage is rounded up to a multiple
/// of the smallest base interval, which leaves an exact multiple unchanged:
/// with a 5000 step, 121000 yields 125000 and 125000 yields 125000 again.
///
/// # Errors
///
/// Returns [`ScheduleError::NoIntervals`] when the base table is empty and
/// [`ScheduleError::InvalidInterval`] when the smallest interval is zero.
pub fn find_next_interval(schedule: &Schedule, mileage: Miles) -> Result<u64, ScheduleError> {
    if let Some(next) = schedule
        .base_intervals()
        .find(|interval| mileage < *interval)
    {
        return Ok(u64::from(next));
    }

    let step = schedule
        .base_intervals()
        .next()
        .ok_or(ScheduleError::NoIntervals)?;
    if step == 0 {
        return Err(ScheduleError::InvalidInterval { interval: step });
    }

    let step = u64::from(step);
    Ok(u64::from(mileage).div_ceil(step) * step)
}

/// Services due or coming up for `model` at `current_mileage`, bucketed by priority.
///
/// A service at interval `I` is included when
/// `current_mileage + look_ahead >= I`, which covers overdue services too.
/// Model-specific add-ons are merged into the same buckets after the base
/// services; an unknown model simply contributes nothing. Within a bucket
/// each service name appears once, at its earliest interval, and buckets are
/// ordered by interval with discovery order kept for ties.
#[must_use]
pub fn calculate_recommendations(
    schedule: &Schedule,
    model: &str,
    current_mileage: Miles,
    look_ahead: Miles,
) -> RecommendationSet {
    let mut recommendations = RecommendationSet::default();
    let horizon = u64::from(current_mileage) + u64::from(look_ahead);

    collect_due(&schedule.intervals, current_mileage, horizon, &mut recommendations);
    if let Some(block) = schedule.model_block(model) {
        collect_due(block, current_mileage, horizon, &mut recommendations);
    }

    for priority in Priority::ALL {
        let bucket = recommendations.bucket_mut(priority);
        keep_earliest_per_service(bucket);
        bucket.sort_by_key(|recommendation| recommendation.interval);
    }

    recommendations
}

/// Identity used to track a selected recommendation across re-renders.
///
/// Only the service name and interval take part; price, hours and priority
/// do not.
#[must_use]
pub fn make_service_key(recommendation: &Recommendation) -> ServiceKey {
    ServiceKey(format!(
        "{}@@{}",
        recommendation.service, recommendation.interval
    ))
}

fn collect_due(
    table: &IntervalTable,
    current_mileage: Miles,
    horizon: u64,
    recommendations: &mut RecommendationSet,
) {
    // Keys are ascending, so the first interval past the horizon ends the scan.
    let due = table
        .iter()
        .take_while(|(interval, _)| u64::from(**interval) <= horizon);

    for (interval, services) in due {
        for definition in services {
            recommendations
                .bucket_mut(definition.priority)
                .push(Recommendation::due_at(definition, *interval, current_mileage));
        }
    }
}

fn keep_earliest_per_service(bucket: &mut Vec<Recommendation>) {
    let mut kept: Vec<Recommendation> = Vec::with_capacity(bucket.len());
    let mut positions: HashMap<String, usize> = HashMap::new();

    for recommendation in bucket.drain(..) {
        if let Some(&position) = positions.get(&recommendation.service) {
            if let Some(existing) = kept.get_mut(position)
                && recommendation.interval < existing.interval
            {
                *existing = recommendation;
            }
            continue;
        }
        positions.insert(recommendation.service.clone(), kept.len());
        kept.push(recommendation);
    }

    *bucket = kept;
}
