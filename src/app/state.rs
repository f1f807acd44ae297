use crate::types::{Coords, WorkoutId, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AppState {
    /// May stay here forever if the provider never answers.
    #[default]
    AwaitingPosition,
    /// Geolocation failed; no map for the rest of the session.
    Mapless,
    AwaitingFormInput,
    /// Form shown for the most recent map click.
    FormOpen { pending: Coords },
}

impl AppState {
    pub const fn has_map(&self) -> bool {
        matches!(self, Self::AwaitingFormInput | Self::FormOpen { .. })
    }

    pub const fn pending(&self) -> Option<Coords> {
        match self {
            Self::FormOpen { pending } => Some(*pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// `session` is the generation the request was issued in.
    PositionAcquired { session: u64, at: Coords },
    PositionFailed { session: u64, reason: String },
    MapClicked(Coords),
    TypeChanged(WorkoutKind),
    FormSubmitted,
    WorkoutSelected(WorkoutId),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StateEvent {
    PositionAcquired,
    PositionFailed,
    MapClicked(Coords),
    /// A submission passed validation and was committed.
    WorkoutRecorded,
    Reset,
}

pub struct StateMachine;

impl StateMachine {
    /// Returns the state after `event`. Events that make no sense in the
    /// current state leave it unchanged.
    pub fn process_event(current: AppState, event: StateEvent) -> AppState {
        match (current, event) {
            (_, StateEvent::Reset) => AppState::AwaitingPosition,

            (AppState::AwaitingPosition, StateEvent::PositionAcquired) => {
                AppState::AwaitingFormInput
            }
            (AppState::AwaitingPosition, StateEvent::PositionFailed) => AppState::Mapless,

            // A new click replaces any pending one.
            (
                AppState::AwaitingFormInput | AppState::FormOpen { .. },
                StateEvent::MapClicked(at),
            ) => AppState::FormOpen { pending: at },

            (AppState::FormOpen { .. }, StateEvent::WorkoutRecorded) => {
                AppState::AwaitingFormInput
            }

            (state, _) => state,
        }
    }
}
