//! Rankings over interactions and places

use std::collections::HashMap;

use chrono::Duration;

use super::distance::distance_km;
use crate::entities::{Interaction, InteractionKind, LocationRecord, Place};
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendScore {
    pub user_id: Snowflake,
    pub interactions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendTime {
    pub user_id: Snowflake,
    pub time_together: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaceScore {
    pub place: Place,
    /// Number of reference locations within the radius
    pub visits: usize,
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

/// Count interactions per other party, most frequent first.
///
/// Every interaction where `user_id` is initiator or partner counts, whatever
/// its kind. Ties go to the lower user id.
pub fn rank_by_interaction_count(
    user_id: Snowflake,
    interactions: &[Interaction],
    limit: Option<usize>,
) -> Vec<FriendScore> {
    let mut counts: HashMap<Snowflake, usize> = HashMap::new();
    for other in interactions.iter().filter_map(|i| i.other_party(user_id)) {
        *counts.entry(other).or_default() += 1;
    }

    let mut ranked: Vec<FriendScore> = counts
        .into_iter()
        .map(|(user_id, interactions)| FriendScore {
            user_id,
            interactions,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.interactions
            .cmp(&a.interactions)
            .then(a.user_id.cmp(&b.user_id))
    });
    truncate(ranked, limit)
}

/// Sum closed physical sessions per other party, longest first.
/// Open sessions are not counted until they end.
pub fn rank_by_time_together(
    user_id: Snowflake,
    interactions: &[Interaction],
    limit: Option<usize>,
) -> Vec<FriendTime> {
    let mut totals: HashMap<Snowflake, Duration> = HashMap::new();
    for interaction in interactions
        .iter()
        .filter(|i| i.kind == InteractionKind::Physical)
    {
        let (Some(other), Some(duration)) = (interaction.other_party(user_id), interaction.duration())
        else {
            continue;
        };
        let total = totals.entry(other).or_insert_with(Duration::zero);
        *total += duration;
    }

    let mut ranked: Vec<FriendTime> = totals
        .into_iter()
        .map(|(user_id, time_together)| FriendTime {
            user_id,
            time_together,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.time_together
            .cmp(&a.time_together)
            .then(a.user_id.cmp(&b.user_id))
    });
    truncate(ranked, limit)
}

/// Count the reference locations within `radius_km` (inclusive) of each
/// place. Places with no visits are dropped; ties go to the lower place id.
pub fn rank_places_by_proximity(
    places: &[Place],
    references: &[LocationRecord],
    radius_km: f64,
    limit: Option<usize>,
) -> Vec<PlaceScore> {
    let mut ranked: Vec<PlaceScore> = places
        .iter()
        .filter_map(|place| {
            let visits = references
                .iter()
                .filter(|r| distance_km(place.coordinate, r.coordinate) <= radius_km)
                .count();
            (visits > 0).then(|| PlaceScore {
                place: place.clone(),
                visits,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.visits.cmp(&a.visits).then(a.place.id.cmp(&b.place.id)));
    truncate(ranked, limit)
}
