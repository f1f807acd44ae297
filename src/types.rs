use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Geographic position in degrees. Persisted as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for [f64; 2] {
    fn from(c: Coords) -> Self {
        [c.lat, c.lng]
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses `LAT,LNG`.
impl FromStr for Coords {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG, got {s:?}"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("bad latitude {lat:?}: {e}"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|e| format!("bad longitude {lng:?}: {e}"))?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(format!("coordinates must be finite: {s:?}"));
        }
        Ok(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Value used by the type selector and the persisted `type` tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(format!("unknown workout type {other:?} (expected running|cycling)")),
        }
    }
}

/// Opaque workout key, shared by the in-memory list and rendered entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    /// Fresh random id; unique even for workouts created in the same clock tick.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WorkoutId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_serialize_as_pair() {
        let c = Coords::new(51.5, -0.1);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[51.5,-0.1]");
        let back: Coords = serde_json::from_str("[51.5,-0.1]").unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn coords_parse_from_cli_text() {
        assert_eq!("51.5, -0.1".parse::<Coords>(), Ok(Coords::new(51.5, -0.1)));
        assert!("51.5".parse::<Coords>().is_err());
        assert!("north,-0.1".parse::<Coords>().is_err());
        assert!("NaN,1".parse::<Coords>().is_err());
    }

    #[test]
    fn kind_round_trips_through_selector_value() {
        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
            assert_eq!(kind.as_str().parse::<WorkoutKind>(), Ok(kind));
        }
        assert!("swimming".parse::<WorkoutKind>().is_err());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let a = WorkoutId::generate();
        let b = WorkoutId::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
    }
}
