use crate::types::WorkoutId;
use thiserror::Error;

/// Alert shown when the position request fails.
pub const LOCATION_ALERT: &str = "Could not get your location";
/// Alert shown when a submitted form does not validate.
pub const INVALID_INPUT_ALERT: &str = "Inputs have to be positive numbers!";

/// Failures the controller can run into. None of them is fatal; the worst
/// case is a session without a map.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AppError {
    /// Position request denied, timed out or unsupported. Not retried.
    #[error("geolocation unavailable: {0}")]
    GeolocationUnavailable(String),

    /// Form values rejected; the form stays open and nothing is committed.
    #[error("invalid workout input: {field} = {raw:?}")]
    InvalidWorkoutInput { field: &'static str, raw: String },

    /// Stored workouts absent or malformed; treated as an empty list.
    #[error("could not read stored workouts: {0}")]
    PersistenceRead(String),

    #[error("could not store workouts: {0}")]
    PersistenceWrite(String),

    /// Recentre request for an id that is not in memory.
    #[error("no workout with id {0}")]
    LookupMiss(WorkoutId),

    /// A map-dependent action was attempted before a map exists.
    #[error("map not ready")]
    MapNotReady,

    /// Form submitted without a map click to attach it to.
    #[error("no map location selected")]
    NoPendingClick,
}

impl AppError {
    /// Text for the blocking alert surface, if this error is user-visible.
    pub const fn alert_text(&self) -> Option<&'static str> {
        match self {
            Self::GeolocationUnavailable(_) => Some(LOCATION_ALERT),
            Self::InvalidWorkoutInput { .. } => Some(INVALID_INPUT_ALERT),
            Self::PersistenceWrite(_) => Some("Could not save your workouts"),
            Self::PersistenceRead(_)
            | Self::LookupMiss(_)
            | Self::MapNotReady
            | Self::NoPendingClick => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_user_facing_errors_have_alerts() {
        assert_eq!(
            AppError::GeolocationUnavailable("denied".into()).alert_text(),
            Some(LOCATION_ALERT)
        );
        let invalid = AppError::InvalidWorkoutInput {
            field: "distance",
            raw: "-5".into(),
        };
        assert_eq!(invalid.alert_text(), Some(INVALID_INPUT_ALERT));
        assert_eq!(invalid.to_string(), "invalid workout input: distance = \"-5\"");
        assert_eq!(AppError::PersistenceRead("eof".into()).alert_text(), None);
        assert_eq!(AppError::LookupMiss(WorkoutId::from("x")).alert_text(), None);
    }
}
