use crate::types::{Coords, WorkoutId, WorkoutKind};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    id: WorkoutId,
    #[serde(rename = "date")]
    created_at: DateTime<Utc>,
    coords: Coords,
    /// km
    distance: f64,
    /// min
    duration: f64,
    description: String,
    #[serde(flatten)]
    metrics: Metrics,
}

/// Per-variant payload, tagged by `type` in the persisted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Metrics {
    Running {
        /// steps per minute
        cadence: f64,
        /// min/km
        pace: f64,
    },
    Cycling {
        /// m, may be negative
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// km/h
        speed: f64,
    },
}

impl Metrics {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

pub fn calc_pace(distance_km: f64, duration_min: f64) -> f64 {
    duration_min / distance_km
}

pub fn calc_speed(distance_km: f64, duration_min: f64) -> f64 {
    distance_km / (duration_min / 60.0)
}

/// `"<Label> on <Month> <day>"`, from the creation date.
pub fn describe(kind: WorkoutKind, created_at: DateTime<Utc>) -> String {
    let month = MONTHS[created_at.month0() as usize];
    format!("{} on {month} {}", kind.label(), created_at.day())
}

impl Workout {
    pub fn running(coords: Coords, distance: f64, duration: f64, cadence: f64) -> Self {
        Self::running_at(Utc::now(), coords, distance, duration, cadence)
    }

    pub fn cycling(coords: Coords, distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self::cycling_at(Utc::now(), coords, distance, duration, elevation_gain)
    }

    pub fn running_at(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Self {
        let pace = calc_pace(distance, duration);
        Self::build(
            created_at,
            coords,
            distance,
            duration,
            Metrics::Running { cadence, pace },
        )
    }

    pub fn cycling_at(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Self {
        let speed = calc_speed(distance, duration);
        Self::build(
            created_at,
            coords,
            distance,
            duration,
            Metrics::Cycling {
                elevation_gain,
                speed,
            },
        )
    }

    fn build(
        created_at: DateTime<Utc>,
        coords: Coords,
        distance: f64,
        duration: f64,
        metrics: Metrics,
    ) -> Self {
        Self {
            id: WorkoutId::generate(),
            created_at,
            coords,
            distance,
            duration,
            description: describe(metrics.kind(), created_at),
            metrics,
        }
    }

    pub const fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub const fn coords(&self) -> Coords {
        self.coords
    }

    pub const fn distance_km(&self) -> f64 {
        self.distance
    }

    pub const fn duration_min(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.metrics.kind()
    }

    pub const fn pace_min_per_km(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Running { pace, .. } => Some(pace),
            Metrics::Cycling { .. } => None,
        }
    }

    pub const fn speed_km_per_h(&self) -> Option<f64> {
        match self.metrics {
            Metrics::Cycling { speed, .. } => Some(speed),
            Metrics::Running { .. } => None,
        }
    }
}
