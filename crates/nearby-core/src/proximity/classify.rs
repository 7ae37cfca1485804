use serde::{Deserialize, Serialize};

use super::distance::distance_km;
use crate::entities::LocationRecord;
use crate::value_objects::{Coordinate, Snowflake};

/// Distance bands used to classify a pair of users
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Strictly closer than this is "near"
    pub near_km: f64,
    /// This close or closer is "together"
    pub together_km: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            near_km: 3.0,
            together_km: 0.2,
        }
    }
}

impl Thresholds {
    /// Classify a distance. Distances are compared at metre resolution so
    /// that floating point noise does not move a pair across a band edge.
    pub fn classify(&self, distance_km: f64) -> Proximity {
        let d = round_to_metres(distance_km);
        if d <= self.together_km {
            Proximity::Together
        } else if d < self.near_km {
            Proximity::Near
        } else {
            Proximity::Far
        }
    }
}

fn round_to_metres(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

/// Spatial relationship between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proximity {
    Together,
    Near,
    Far,
}

impl Proximity {
    /// Together also counts as near
    #[inline]
    pub fn is_near(self) -> bool {
        matches!(self, Self::Together | Self::Near)
    }

    #[inline]
    pub fn is_together(self) -> bool {
        matches!(self, Self::Together)
    }
}

/// A followed user's last known position relative to an origin
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub user_id: Snowflake,
    pub coordinate: Coordinate,
    pub distance_km: f64,
    pub proximity: Proximity,
}

/// Result of classifying every followed user against one origin
#[derive(Debug, Clone, Default)]
pub struct Classification {
    sightings: Vec<Sighting>,
}

impl Classification {
    pub fn sightings(&self) -> &[Sighting] {
        &self.sightings
    }

    /// Users strictly within the near band (together included)
    pub fn near(&self) -> impl Iterator<Item = &Sighting> {
        self.sightings.iter().filter(|s| s.proximity.is_near())
    }

    pub fn together(&self) -> impl Iterator<Item = &Sighting> {
        self.sightings.iter().filter(|s| s.proximity.is_together())
    }

    /// Users outside the together band
    pub fn apart(&self) -> impl Iterator<Item = &Sighting> {
        self.sightings.iter().filter(|s| !s.proximity.is_together())
    }

    pub fn any_near(&self) -> bool {
        self.near().next().is_some()
    }

    pub fn get(&self, user_id: Snowflake) -> Option<&Sighting> {
        self.sightings.iter().find(|s| s.user_id == user_id)
    }

    pub fn len(&self) -> usize {
        self.sightings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.is_empty()
    }
}

/// Classify the last known locations of followed users against `origin`,
/// closest first.
pub fn classify(
    origin: Coordinate,
    locations: &[LocationRecord],
    thresholds: &Thresholds,
) -> Classification {
    let mut sightings: Vec<Sighting> = locations
        .iter()
        .map(|record| {
            let distance = distance_km(origin, record.coordinate);
            Sighting {
                user_id: record.user_id,
                coordinate: record.coordinate,
                distance_km: distance,
                proximity: thresholds.classify(distance),
            }
        })
        .collect();

    sightings.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    Classification { sightings }
}
