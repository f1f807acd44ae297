use crate::error::AppError;
use crate::types::{Coords, WorkoutKind};
use crate::workout::{Workout, calc_pace, calc_speed};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::Elevation => "elevation",
        }
    }
}

/// Converts field text the way a browser's unary plus does: blank is 0,
/// `0x`/`0o`/`0b` prefixes are unsigned integers, anything unparsable is NaN.
pub fn parse_number(raw: &str) -> f64 {
    let t = raw.trim();
    if t.is_empty() {
        return 0.0;
    }

    let radix = match t.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return t.parse::<f64>().unwrap_or(f64::NAN),
    };
    let digits = &t[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return f64::NAN;
    }
    u128::from_str_radix(digits, radix).map_or(f64::NAN, |v| v as f64)
}

/// Validated form values, ready to become a [`Workout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDraft {
    Running {
        distance: f64,
        duration: f64,
        cadence: f64,
    },
    Cycling {
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    },
}

impl WorkoutDraft {
    pub const fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn build(self, coords: Coords) -> Workout {
        match self {
            Self::Running {
                distance,
                duration,
                cadence,
            } => Workout::running(coords, distance, duration, cadence),
            Self::Cycling {
                distance,
                duration,
                elevation_gain,
            } => Workout::cycling(coords, distance, duration, elevation_gain),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkoutForm {
    kind: WorkoutKind,
    distance: String,
    duration: String,
    cadence: String,
    elevation: String,
    hidden: bool,
    focused: Option<Field>,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
            hidden: true,
            focused: None,
        }
    }
}

impl WorkoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub const fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub const fn focused(&self) -> Option<Field> {
        self.focused
    }

    /// Reveal the form with the distance input focused.
    pub fn show(&mut self) {
        self.hidden = false;
        self.focused = Some(Field::Distance);
    }

    pub fn hide(&mut self) {
        self.hidden = true;
        self.focused = None;
    }

    /// Type selector change. Only switches which extra field is shown;
    /// typed values are kept.
    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.kind = kind;
    }

    /// The one of cadence/elevation currently shown.
    pub const fn visible_extra_field(&self) -> Field {
        match self.kind {
            WorkoutKind::Running => Field::Cadence,
            WorkoutKind::Cycling => Field::Elevation,
        }
    }

    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::Distance | Field::Duration => true,
            Field::Cadence | Field::Elevation => field == self.visible_extra_field(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    pub fn clear_inputs(&mut self) {
        for f in [
            Field::Distance,
            Field::Duration,
            Field::Cadence,
            Field::Elevation,
        ] {
            self.slot_mut(f).clear();
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Distance => &mut self.distance,
            Field::Duration => &mut self.duration,
            Field::Cadence => &mut self.cadence,
            Field::Elevation => &mut self.elevation,
        }
    }

    /// Reads the fields for the selected type and checks them.
    ///
    /// Every read value must be finite. Distance, duration and cadence must
    /// also be strictly positive; elevation may be zero or negative. The
    /// derived pace or speed must come out finite too.
    pub fn validate(&self) -> Result<WorkoutDraft, AppError> {
        let distance = self.read(Field::Distance, true)?;
        let duration = self.read(Field::Duration, true)?;

        let (draft, derived, divisor) = match self.kind {
            WorkoutKind::Running => (
                WorkoutDraft::Running {
                    distance,
                    duration,
                    cadence: self.read(Field::Cadence, true)?,
                },
                calc_pace(distance, duration),
                Field::Distance,
            ),
            WorkoutKind::Cycling => (
                WorkoutDraft::Cycling {
                    distance,
                    duration,
                    elevation_gain: self.read(Field::Elevation, false)?,
                },
                calc_speed(distance, duration),
                Field::Duration,
            ),
        };

        if !derived.is_finite() {
            return Err(self.rejected(divisor));
        }
        Ok(draft)
    }

    fn rejected(&self, field: Field) -> AppError {
        AppError::InvalidWorkoutInput {
            field: field.name(),
            raw: self.value(field).to_string(),
        }
    }

    fn read(&self, field: Field, positive: bool) -> Result<f64, AppError> {
        let v = parse_number(self.value(field));
        if !v.is_finite() || (positive && v <= 0.0) {
            return Err(self.rejected(field));
        }
        Ok(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(kind: WorkoutKind, d: &str, t: &str, extra: &str) -> WorkoutForm {
        let mut f = WorkoutForm::new();
        f.select_kind(kind);
        f.set(Field::Distance, d);
        f.set(Field::Duration, t);
        f.set(f.visible_extra_field(), extra);
        f
    }

    fn rejected_field(f: &WorkoutForm) -> &'static str {
        match f.validate() {
            Err(AppError::InvalidWorkoutInput { field, .. }) => field,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn parse_number_follows_unary_plus() {
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("  12.5 "), 12.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert!(parse_number("ten").is_nan());
        assert!(!parse_number("inf").is_finite());
    }

    #[test]
    fn parse_number_reads_radix_prefixes() {
        assert_eq!(parse_number("0x10"), 16.0);
        assert_eq!(parse_number("0B101"), 5.0);
        assert_eq!(parse_number("0o7"), 7.0);
        assert!(parse_number("0x").is_nan());
        assert!(parse_number("0x+1").is_nan());
        assert!(parse_number("-0x10").is_nan());
        assert!(parse_number("0b12").is_nan());
    }

    #[test]
    fn overflowing_derived_metric_is_rejected() {
        // 1 km in 1e-320 min: speed overflows to infinity.
        assert_eq!(
            rejected_field(&filled(WorkoutKind::Cycling, "1", "1e-320", "0")),
            "duration"
        );
        // Pace overflows the other way round.
        assert_eq!(
            rejected_field(&filled(WorkoutKind::Running, "1e-320", "1", "170")),
            "distance"
        );
        assert!(filled(WorkoutKind::Cycling, "1", "1e-300", "0").validate().is_ok());
    }

    #[test]
    fn starts_hidden_with_cadence_visible() {
        let f = WorkoutForm::new();
        assert!(f.is_hidden());
        assert_eq!(f.focused(), None);
        assert!(f.is_visible(Field::Cadence));
        assert!(!f.is_visible(Field::Elevation));
    }

    #[test]
    fn type_change_swaps_extra_field() {
        let mut f = WorkoutForm::new();
        f.select_kind(WorkoutKind::Cycling);
        assert_eq!(f.visible_extra_field(), Field::Elevation);
        assert!(!f.is_visible(Field::Cadence));
        f.select_kind(WorkoutKind::Running);
        assert_eq!(f.visible_extra_field(), Field::Cadence);
    }

    #[test]
    fn running_requires_positive_cadence() {
        let ok = filled(WorkoutKind::Running, "10", "50", "150");
        assert_eq!(
            ok.validate(),
            Ok(WorkoutDraft::Running {
                distance: 10.0,
                duration: 50.0,
                cadence: 150.0
            })
        );

        assert_eq!(rejected_field(&filled(WorkoutKind::Running, "-5", "50", "150")), "distance");
        assert_eq!(rejected_field(&filled(WorkoutKind::Running, "5", "0", "150")), "duration");
        assert_eq!(rejected_field(&filled(WorkoutKind::Running, "5", "50", "")), "cadence");
        assert_eq!(rejected_field(&filled(WorkoutKind::Running, "5", "abc", "1")), "duration");
    }

    #[test]
    fn cycling_elevation_may_be_negative_but_finite() {
        let ok = filled(WorkoutKind::Cycling, "27", "95", "-15");
        assert_eq!(ok.validate().map(|d| d.kind()), Ok(WorkoutKind::Cycling));

        let zero = filled(WorkoutKind::Cycling, "27", "95", "0");
        assert!(zero.validate().is_ok());

        assert_eq!(rejected_field(&filled(WorkoutKind::Cycling, "27", "95", "up")), "elevation");
        assert_eq!(rejected_field(&filled(WorkoutKind::Cycling, "0", "95", "10")), "distance");
    }

    #[test]
    fn hidden_field_is_ignored_for_selected_type() {
        let mut f = filled(WorkoutKind::Cycling, "20", "60", "100");
        f.set(Field::Cadence, "garbage");
        assert!(f.validate().is_ok());
    }

    #[test]
    fn show_focuses_distance_and_clear_empties_inputs() {
        let mut f = filled(WorkoutKind::Running, "1", "2", "3");
        f.show();
        assert!(!f.is_hidden());
        assert_eq!(f.focused(), Some(Field::Distance));
        f.clear_inputs();
        f.hide();
        assert!(f.is_hidden());
        assert_eq!(f.value(Field::Distance), "");
        assert_eq!(f.value(Field::Cadence), "");
    }
}
