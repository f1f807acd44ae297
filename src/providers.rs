use crate::app::state::AppEvent;
use crate::dlog;
use crate::render::Popup;
use crate::types::{Coords, MapHandle, MarkerHandle};
use std::sync::mpsc::Sender;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

impl ViewOptions {
    pub const fn animated(pan_duration_secs: f64) -> Self {
        Self {
            animate: true,
            pan_duration_secs,
        }
    }
}

pub trait MapProvider {
    fn create_map(&mut self, container: &str, center: Coords, zoom: u8) -> MapHandle;
    fn add_tile_layer(&mut self, map: MapHandle, url_template: &str, attribution: &str);
    fn set_view(&mut self, map: MapHandle, center: Coords, zoom: u8, options: ViewOptions);
    /// Clicks on the map are reported as [`AppEvent::MapClicked`].
    fn on_click(&mut self, map: MapHandle, sink: EventSink);
    /// Places a marker with its popup already open.
    fn add_marker(&mut self, map: MapHandle, at: Coords, popup: &Popup) -> MarkerHandle;
}

pub trait Geolocation {
    /// Starts a request. The answer arrives later through `reply`, or never.
    /// An `Err` here means geolocation is not supported at all.
    fn request_current_position(&mut self, reply: PositionReply) -> Result<(), String>;
}

pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Collaborators post here; the controller handles events on its next `pump`.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<AppEvent>,
}

impl EventSink {
    pub const fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }

    pub fn emit(&self, event: AppEvent) {
        if self.tx.send(event).is_err() {
            dlog!("event dropped, controller is gone");
        }
    }

    pub fn map_clicked(&self, at: Coords) {
        self.emit(AppEvent::MapClicked(at));
    }
}

/// One-time continuation for a position request. Answering consumes it.
/// The answer carries the session it was issued in, so the controller can
/// drop replies that outlive a reset.
#[derive(Debug)]
pub struct PositionReply {
    sink: EventSink,
    session: u64,
}

impl PositionReply {
    pub const fn new(sink: EventSink, session: u64) -> Self {
        Self { sink, session }
    }

    pub fn resolve(self, at: Coords) {
        self.sink.emit(AppEvent::PositionAcquired {
            session: self.session,
            at,
        });
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.sink.emit(AppEvent::PositionFailed {
            session: self.session,
            reason: reason.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn reply_posts_exactly_one_event() {
        let (tx, rx) = channel();
        let reply = PositionReply::new(EventSink::new(tx), 3);
        reply.resolve(Coords::new(1.0, 2.0));
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::PositionAcquired {
                session: 3,
                at: Coords::new(1.0, 2.0)
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failure_keeps_session() {
        let (tx, rx) = channel();
        PositionReply::new(EventSink::new(tx), 7).fail("denied");
        assert_eq!(
            rx.try_recv().ok(),
            Some(AppEvent::PositionFailed {
                session: 7,
                reason: "denied".to_string()
            })
        );
    }

    #[test]
    fn emit_after_receiver_dropped_is_silent() {
        let (tx, rx) = channel();
        drop(rx);
        EventSink::new(tx).map_clicked(Coords::new(0.0, 0.0));
    }
}
