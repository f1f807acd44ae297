use crate::config::PopupOptions;
use crate::types::{WorkoutId, WorkoutKind};
use crate::workout::{Metrics, Workout};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Detail {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub details: Vec<Detail>,
}

/// Derived values are shown to one decimal.
pub fn render_list_entry(w: &Workout) -> ListEntry {
    let mut details = vec![
        Detail::new(w.kind().icon(), w.distance_km().to_string(), "km"),
        Detail::new("⏱", w.duration_min().to_string(), "min"),
    ];

    match *w.metrics() {
        Metrics::Running { cadence, pace } => {
            details.push(Detail::new("⚡️", format!("{pace:.1}"), "min/km"));
            details.push(Detail::new("🦶🏼", cadence.to_string(), "spm"));
        }
        Metrics::Cycling {
            elevation_gain,
            speed,
        } => {
            details.push(Detail::new("⚡️", format!("{speed:.1}"), "km/h"));
            details.push(Detail::new("⛰", elevation_gain.to_string(), "m"));
        }
    }

    ListEntry {
        id: w.id().clone(),
        kind: w.kind(),
        title: w.description().to_string(),
        details,
    }
}

impl fmt::Display for ListEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<li class="workout workout--{}" data-id="{}">"#,
            self.kind, self.id
        )?;
        writeln!(f, r#"  <h2 class="workout__title">{}</h2>"#, self.title)?;
        for d in &self.details {
            writeln!(f, r#"  <div class="workout__details">"#)?;
            writeln!(f, r#"    <span class="workout__icon">{}</span>"#, d.icon)?;
            writeln!(f, r#"    <span class="workout__value">{}</span>"#, d.value)?;
            writeln!(f, r#"    <span class="workout__unit">{}</span>"#, d.unit)?;
            writeln!(f, "  </div>")?;
        }
        write!(f, "</li>")
    }
}

/// Marker popup: icon plus description, opened as soon as it is placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub options: PopupOptions,
}

pub fn popup_for(w: &Workout, options: PopupOptions) -> Popup {
    Popup {
        content: format!("{} {}", w.kind().icon(), w.description()),
        class_name: format!("{}-popup", w.kind()),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coords;
    use chrono::{TimeZone, Utc};

    fn at() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn running_entry_has_pace_and_cadence() {
        let w = Workout::running_at(at(), Coords::new(51.5, -0.1), 10.0, 50.0, 150.0);
        let e = render_list_entry(&w);
        assert_eq!(e.title, "Running on April 14");
        assert_eq!(&e.id, w.id());
        let rows: Vec<_> = e
            .details
            .iter()
            .map(|d| (d.value.as_str(), d.unit))
            .collect();
        assert_eq!(
            rows,
            [("10", "km"), ("50", "min"), ("5.0", "min/km"), ("150", "spm")]
        );
        assert_eq!(e.details[0].icon, "🏃‍♂️");
    }

    #[test]
    fn cycling_entry_has_speed_and_elevation() {
        let w = Workout::cycling_at(at(), Coords::new(51.5, -0.1), 27.0, 95.0, -15.0);
        let e = render_list_entry(&w);
        let rows: Vec<_> = e
            .details
            .iter()
            .map(|d| (d.value.as_str(), d.unit))
            .collect();
        assert_eq!(
            rows,
            [("27", "km"), ("95", "min"), ("17.1", "km/h"), ("-15", "m")]
        );
    }

    #[test]
    fn html_carries_type_class_and_data_id() {
        let w = Workout::running_at(at(), Coords::new(0.0, 0.0), 5.5, 30.0, 170.0);
        let html = render_list_entry(&w).to_string();
        assert!(html.starts_with(&format!(
            r#"<li class="workout workout--running" data-id="{}">"#,
            w.id()
        )));
        assert!(html.contains(r#"<span class="workout__value">5.5</span>"#));
        assert!(html.ends_with("</li>"));
    }

    #[test]
    fn popup_uses_icon_description_and_type_class() {
        let w = Workout::cycling_at(at(), Coords::new(0.0, 0.0), 10.0, 30.0, 5.0);
        let p = popup_for(&w, PopupOptions::default());
        assert_eq!(p.content, "🚴‍♀️ Cycling on April 14");
        assert_eq!(p.class_name, "cycling-popup");
        assert!(!p.options.auto_close);
    }
}
