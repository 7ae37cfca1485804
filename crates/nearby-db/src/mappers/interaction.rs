//! Interaction entity <-> model mapper

use nearby_core::entities::{Interaction, InteractionKind};
use nearby_core::value_objects::{Coordinate, Snowflake};

use crate::models::InteractionModel;

/// The table's CHECK constraint only admits known kinds; anything else is
/// treated as a point event so it can never look like an open session.
fn parse_interaction_kind(kind: &str) -> InteractionKind {
    kind.parse().unwrap_or(InteractionKind::Call)
}

/// Convert InteractionKind enum to database string
pub fn interaction_kind_to_str(kind: InteractionKind) -> &'static str {
    kind.as_str()
}

impl From<InteractionModel> for Interaction {
    fn from(model: InteractionModel) -> Self {
        Interaction {
            id: Snowflake::new(model.id),
            initiator_id: Snowflake::new(model.initiator_id),
            partner_id: Snowflake::new(model.partner_id),
            coordinate: Coordinate::new(model.latitude, model.longitude),
            kind: parse_interaction_kind(&model.kind),
            started_at: model.started_at,
            ended_at: model.ended_at,
        }
    }
}

/// Column values for inserting an interaction
pub struct InteractionInsert {
    pub id: i64,
    pub initiator_id: i64,
    pub partner_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: &'static str,
}

impl InteractionInsert {
    pub fn new(interaction: &Interaction) -> Self {
        Self {
            id: interaction.id.into_inner(),
            initiator_id: interaction.initiator_id.into_inner(),
            partner_id: interaction.partner_id.into_inner(),
            latitude: interaction.coordinate.latitude,
            longitude: interaction.coordinate.longitude,
            kind: interaction_kind_to_str(interaction.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_entity() {
        let model = InteractionModel {
            id: 1,
            initiator_id: 2,
            partner_id: 3,
            latitude: 44.8,
            longitude: 20.4,
            kind: "physical".to_string(),
            started_at: Utc::now(),
            ended_at: None,
        };
        let interaction = Interaction::from(model);
        assert_eq!(interaction.kind, InteractionKind::Physical);
        assert!(interaction.is_open());
        assert_eq!(interaction.coordinate, Coordinate::new(44.8, 20.4));
    }

    #[test]
    fn test_unknown_kind_is_never_open() {
        assert_eq!(parse_interaction_kind("visit"), InteractionKind::Call);
    }
}
