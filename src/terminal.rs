use crate::providers::{EventSink, Geolocation, MapProvider, Notifier, PositionReply, ViewOptions};
use crate::render::Popup;
use crate::types::{Coords, MapHandle, MarkerHandle};

/// Map that prints markers and tracks its view instead of drawing.
#[derive(Debug, Default)]
pub struct TerminalMap {
    next_id: u64,
    center: Option<(Coords, u8)>,
    click_sink: Option<EventSink>,
}

impl TerminalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn center(&self) -> Option<(Coords, u8)> {
        self.center
    }

    /// Simulates a click. Returns false when no click listener is attached.
    pub fn click(&self, at: Coords) -> bool {
        let Some(sink) = &self.click_sink else {
            return false;
        };
        sink.map_clicked(at);
        true
    }

    fn issue(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MapProvider for TerminalMap {
    fn create_map(&mut self, container: &str, center: Coords, zoom: u8) -> MapHandle {
        let handle = MapHandle(self.issue());
        tracing::info!(container, center = %center, zoom, "map created");
        self.center = Some((center, zoom));
        handle
    }

    fn add_tile_layer(&mut self, _map: MapHandle, url_template: &str, _attribution: &str) {
        tracing::debug!(url_template, "tile layer added");
    }

    fn set_view(&mut self, _map: MapHandle, center: Coords, zoom: u8, options: ViewOptions) {
        tracing::info!(center = %center, zoom, animate = options.animate, "view moved");
        self.center = Some((center, zoom));
    }

    fn on_click(&mut self, _map: MapHandle, sink: EventSink) {
        self.click_sink = Some(sink);
    }

    fn add_marker(&mut self, _map: MapHandle, at: Coords, popup: &Popup) -> MarkerHandle {
        let handle = MarkerHandle(self.issue());
        println!("📍 [{at}] {}", popup.content);
        handle
    }
}

/// Answers immediately with a fixed position, or reports that geolocation
/// is unsupported when none is configured.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation {
    position: Option<Coords>,
}

impl FixedGeolocation {
    pub const fn new(position: Option<Coords>) -> Self {
        Self { position }
    }
}

impl Geolocation for FixedGeolocation {
    fn request_current_position(&mut self, reply: PositionReply) -> Result<(), String> {
        match self.position {
            Some(at) => {
                reply.resolve(at);
                Ok(())
            }
            None => Err("no position configured (pass --at LAT,LNG)".to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct StderrNotifier {
    alerts: Vec<String>,
}

impl StderrNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("⚠️  {message}");
        self.alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppEvent;
    use std::sync::mpsc::channel;

    #[test]
    fn fixed_geolocation_resolves_or_reports_unsupported() {
        let (tx, rx) = channel();
        let mut geo = FixedGeolocation::new(Some(Coords::new(1.0, 2.0)));
        assert!(geo
            .request_current_position(PositionReply::new(EventSink::new(tx.clone()), 0))
            .is_ok());
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::PositionAcquired {
                session: 0,
                at: Coords::new(1.0, 2.0)
            })
        );

        let mut none = FixedGeolocation::new(None);
        assert!(none
            .request_current_position(PositionReply::new(EventSink::new(tx), 0))
            .is_err());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn click_needs_listener() {
        let (tx, rx) = channel();
        let mut map = TerminalMap::new();
        assert!(!map.click(Coords::new(0.0, 0.0)));

        let h = map.create_map("map", Coords::new(0.0, 0.0), 13);
        map.on_click(h, EventSink::new(tx));
        assert!(map.click(Coords::new(3.0, 4.0)));
        assert_eq!(rx.try_recv().ok(), Some(AppEvent::MapClicked(Coords::new(3.0, 4.0))));
    }

    #[test]
    fn view_tracks_creation_and_recentre() {
        let mut map = TerminalMap::new();
        assert_eq!(map.center(), None);
        let h = map.create_map("map", Coords::new(1.0, 1.0), 13);
        assert_eq!(map.center(), Some((Coords::new(1.0, 1.0), 13)));
        map.set_view(h, Coords::new(2.0, 2.0), 13, ViewOptions::animated(1.0));
        assert_eq!(map.center(), Some((Coords::new(2.0, 2.0), 13)));
    }

    #[test]
    fn notifier_keeps_alerts() {
        let mut n = StderrNotifier::new();
        n.alert("Could not get your location");
        assert_eq!(n.alerts(), ["Could not get your location"]);
    }
}
