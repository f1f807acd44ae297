use crate::app::state::{AppEvent, AppState, StateEvent, StateMachine};
use crate::config::AppConfig;
use crate::dlog;
use crate::error::{AppError, LOCATION_ALERT};
use crate::form::{Field, WorkoutForm};
use crate::providers::{EventSink, Geolocation, MapProvider, Notifier, PositionReply, ViewOptions};
use crate::render::{ListEntry, popup_for, render_list_entry};
use crate::storage::{KeyValueStore, load_workouts, save_workouts};
use crate::types::{Coords, MapHandle, MarkerHandle, WorkoutId, WorkoutKind};
use crate::utils::maps_link;
use crate::workout::Workout;
use anyhow::{Context, Result};
use std::sync::mpsc::{Receiver, Sender, channel};

pub struct App<M, G, S, N> {
    config: AppConfig,
    map_provider: M,
    geolocation: G,
    store: S,
    notifier: N,

    state: AppState,
    map: Option<MapHandle>,
    form: WorkoutForm,
    /// Creation order.
    workouts: Vec<Workout>,
    /// Display order: newest first, next to the form.
    entries: Vec<ListEntry>,
    markers: Vec<MarkerHandle>,
    /// Bumped by `reset`; position answers from older sessions are dropped.
    session: u64,

    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl<M, G, S, N> App<M, G, S, N>
where
    M: MapProvider,
    G: Geolocation,
    S: KeyValueStore,
    N: Notifier,
{
    pub fn new(config: AppConfig, map_provider: M, geolocation: G, store: S, notifier: N) -> Self {
        let (tx, rx) = channel();
        Self {
            config,
            map_provider,
            geolocation,
            store,
            notifier,
            state: AppState::default(),
            map: None,
            form: WorkoutForm::new(),
            workouts: Vec::new(),
            entries: Vec::new(),
            markers: Vec::new(),
            session: 0,
            tx,
            rx,
        }
    }

    pub fn sink(&self) -> EventSink {
        EventSink::new(self.tx.clone())
    }

    /// Startup: restore stored workouts into the list and ask for a
    /// position. Restored workouts get list entries but no markers.
    pub fn start(&mut self) {
        self.workouts = load_workouts(&self.store, &self.config.storage_key);
        self.entries.clear();
        for w in &self.workouts {
            self.entries.insert(0, render_list_entry(w));
        }

        let reply = PositionReply::new(self.sink(), self.session);
        if let Err(reason) = self.geolocation.request_current_position(reply) {
            self.position_failed(reason);
        }
    }

    /// Returns how many events ran.
    pub fn pump(&mut self) -> usize {
        let mut n = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle(event);
            n += 1;
        }
        n
    }

    pub fn handle(&mut self, event: AppEvent) {
        dlog!("event {event:?} in state {:?}", self.state);
        match event {
            AppEvent::PositionAcquired { session, at } if session == self.session => {
                self.load_map(at);
            }
            AppEvent::PositionFailed { session, reason } if session == self.session => {
                self.position_failed(reason);
            }
            AppEvent::PositionAcquired { session, .. } | AppEvent::PositionFailed { session, .. } => {
                dlog!("stale position answer from session {session}, now {}", self.session);
            }
            AppEvent::MapClicked(at) => self.show_form(at),
            AppEvent::TypeChanged(kind) => self.change_type(kind),
            AppEvent::FormSubmitted => {
                if let Err(e) = self.submit_form() {
                    dlog!("submit rejected: {e}");
                }
            }
            AppEvent::WorkoutSelected(id) => {
                if let Err(e) = self.select_workout(&id) {
                    dlog!("recentre skipped: {e}");
                }
            }
            AppEvent::Reset => {
                if let Err(e) = self.reset() {
                    tracing::error!(err = %format!("{e:#}"), "reset failed");
                }
            }
        }
    }

    fn load_map(&mut self, at: Coords) {
        if self.state != AppState::AwaitingPosition {
            dlog!("position ignored in state {:?}", self.state);
            return;
        }
        tracing::info!(lat = at.lat, lng = at.lng, link = %maps_link(at), "position acquired");

        let map = self
            .map_provider
            .create_map(&self.config.map_container, at, self.config.zoom);
        self.map_provider
            .add_tile_layer(map, &self.config.tile_url, &self.config.attribution);
        self.map_provider.on_click(map, self.sink());

        self.map = Some(map);
        self.transition(StateEvent::PositionAcquired);
    }

    fn position_failed(&mut self, reason: String) {
        if self.state != AppState::AwaitingPosition {
            return;
        }
        let err = AppError::GeolocationUnavailable(reason);
        tracing::warn!(err = %err, "running without a map");
        self.notifier.alert(LOCATION_ALERT);
        self.transition(StateEvent::PositionFailed);
    }

    fn show_form(&mut self, at: Coords) {
        if !self.state.has_map() {
            dlog!("click ignored without a map");
            return;
        }
        self.transition(StateEvent::MapClicked(at));
        self.form.show();
    }

    pub fn change_type(&mut self, kind: WorkoutKind) {
        self.form.select_kind(kind);
    }

    /// Validates the form and, on success, records the workout at the
    /// pending click: marker, list entry, storage write, form closed.
    /// On rejection nothing changes and the form stays open.
    pub fn submit_form(&mut self) -> Result<WorkoutId, AppError> {
        let (Some(at), Some(map)) = (self.state.pending(), self.map) else {
            return Err(AppError::NoPendingClick);
        };

        let draft = match self.form.validate() {
            Ok(d) => d,
            Err(e) => {
                tracing::info!(err = %e, "workout rejected");
                if let Some(text) = e.alert_text() {
                    self.notifier.alert(text);
                }
                return Err(e);
            }
        };

        let workout = draft.build(at);
        let id = workout.id().clone();
        tracing::info!(id = %id, kind = %workout.kind(), "workout recorded");

        let popup = popup_for(&workout, self.config.popup);
        let marker = self.map_provider.add_marker(map, workout.coords(), &popup);
        self.markers.push(marker);
        self.entries.insert(0, render_list_entry(&workout));
        self.workouts.push(workout);

        self.persist();

        self.form.clear_inputs();
        self.form.hide();
        self.transition(StateEvent::WorkoutRecorded);
        Ok(id)
    }

    fn persist(&mut self) {
        if let Err(e) = save_workouts(&mut self.store, &self.config.storage_key, &self.workouts) {
            let err = AppError::PersistenceWrite(format!("{e:#}"));
            tracing::error!(err = %err, "workout kept in memory only");
            if let Some(text) = err.alert_text() {
                self.notifier.alert(text);
            }
        }
    }

    pub fn select_workout(&mut self, id: &WorkoutId) -> Result<Coords, AppError> {
        let Some(map) = self.map else {
            return Err(AppError::MapNotReady);
        };
        let at = self
            .workout(id)
            .map(Workout::coords)
            .ok_or_else(|| AppError::LookupMiss(id.clone()))?;

        self.map_provider.set_view(
            map,
            at,
            self.config.zoom,
            ViewOptions::animated(self.config.pan_duration_secs),
        );
        Ok(at)
    }

    /// Clears storage and starts over from the position request.
    pub fn reset(&mut self) -> Result<()> {
        self.store
            .remove(&self.config.storage_key)
            .context("Clearing stored workouts")?;

        // Events from the previous session are stale.
        while self.rx.try_recv().is_ok() {}

        self.workouts.clear();
        self.entries.clear();
        self.markers.clear();
        self.map = None;
        self.form = WorkoutForm::new();
        self.session += 1;
        self.transition(StateEvent::Reset);
        tracing::info!("reset, restarting");

        self.start();
        Ok(())
    }

    fn transition(&mut self, event: StateEvent) {
        let next = StateMachine::process_event(self.state, event);
        if next != self.state {
            dlog!("state {:?} -> {next:?}", self.state);
        }
        self.state = next;
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn workout(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub const fn state(&self) -> AppState {
        self.state
    }

    pub const fn map(&self) -> Option<MapHandle> {
        self.map
    }

    pub const fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    pub const fn map_provider(&self) -> &M {
        &self.map_provider
    }

    pub const fn geolocation_mut(&mut self) -> &mut G {
        &mut self.geolocation
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }
}
