use std::{sync::Arc, time::Duration};

use geo_integration::{
    LocationService, LocationServiceError, MissingLocationService, NullViewportRenderer,
    ViewportRenderer,
};
use shared::{
    domain::{Coordinates, PlaceCandidate, PlaceSuggestion, PlaceType, ViewportFrame},
    error::{LoadFailureCategory, PickerWarning},
    protocol::{ParentNotification, PickerProps},
};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

pub mod config;
pub mod debounce;
pub mod echo_guard;
pub mod messages;
mod resolution;
pub mod strategy;
pub mod viewport;

pub use config::{ConfigError, PickerConfig};
pub use messages::{Locale, WarningKey};
pub use strategy::StrategyKind;

use debounce::DebouncedTextChannel;
use echo_guard::EchoGuard;
use resolution::ResolutionSlot;
use strategy::{interactive, simple};
use viewport::ViewportController;

/// Callbacks owned by the parent form.
///
/// Invoked while the picker holds its state lock so the parent observes
/// revisions in order; implementations must not block on the picker.
pub trait LocationSink: Send + Sync {
    fn on_location_change(&self, address: &str, coordinates: Coordinates, revision: u64);

    fn on_coordinates_change(&self, _coordinates: Coordinates, _revision: u64) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    MissingCredentials,
    ServiceLoad(LoadFailureCategory),
}

impl DegradeReason {
    fn warning_key(self) -> WarningKey {
        match self {
            DegradeReason::MissingCredentials => WarningKey::MissingCredentials,
            DegradeReason::ServiceLoad(category) => WarningKey::ServiceLoad(category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Loading,
    Ready,
    /// Manual text entry only: no map gestures, no network search.
    Degraded(DegradeReason),
}

impl ServiceStatus {
    pub fn is_ready(self) -> bool {
        matches!(self, ServiceStatus::Ready)
    }

    fn from_load(result: Result<(), LocationServiceError>) -> Self {
        match result {
            Ok(()) => ServiceStatus::Ready,
            Err(LocationServiceError::MissingCredentials) => {
                ServiceStatus::Degraded(DegradeReason::MissingCredentials)
            }
            Err(LocationServiceError::Load { category, .. }) => {
                ServiceStatus::Degraded(DegradeReason::ServiceLoad(category))
            }
            Err(err) => ServiceStatus::Degraded(DegradeReason::ServiceLoad(
                LoadFailureCategory::from_message(&err.to_string()),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationSnapshot {
    pub address_text: String,
    pub coordinates: Option<Coordinates>,
    pub committed_address: String,
    pub committed_coordinates: Option<Coordinates>,
    pub viewport: ViewportFrame,
    pub revision: u64,
    pub echo_suppressed: bool,
    /// Time left before the echo guard lets edits through again.
    pub echo_window_remaining: Option<Duration>,
    pub debounce_pending: bool,
    /// Typed text still waiting for the debounce timer.
    pub pending_text: Option<String>,
    pub resolving: bool,
    pub status: ServiceStatus,
    pub placeholder: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum PickerEvent {
    StateChanged(LocationSnapshot),
    StatusChanged(ServiceStatus),
    Warning(PickerWarning),
}

/// Handle on an asynchronous resolution (reverse geocode, search, device location).
#[must_use = "a resolution runs in the background; await `settled` to observe it"]
pub struct PendingResolution {
    task: Option<JoinHandle<()>>,
}

impl PendingResolution {
    fn idle() -> Self {
        Self { task: None }
    }

    fn spawned(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// True when nothing was started, e.g. the gesture was rejected.
    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }

    /// Waits for the resolution. Returns false if a newer transition aborted it.
    pub async fn settled(self) -> bool {
        match self.task {
            None => true,
            Some(task) => task.await.is_ok(),
        }
    }
}

/// Address and coordinates as exchanged with the parent.
#[derive(Debug, Clone, Default, PartialEq)]
struct Committed {
    address: String,
    coordinates: Option<Coordinates>,
}

impl Committed {
    fn from_props(value: String, coordinates: Option<Coordinates>) -> Self {
        Self {
            address: value,
            coordinates: usable_coordinates(coordinates),
        }
    }
}

/// Drops the unset sentinel and anything outside the valid lat/lng range.
fn usable_coordinates(coordinates: Option<Coordinates>) -> Option<Coordinates> {
    coordinates
        .and_then(|coordinates| coordinates.validated().ok())
        .and_then(Coordinates::known)
}

struct LocationState {
    address_text: String,
    coordinates: Option<Coordinates>,
    /// Last value agreed with the parent, received or sent.
    committed: Committed,
    /// Last props as handed down, used to detect re-renders with unchanged props.
    received: Committed,
    revision: u64,
    guard: EchoGuard,
    text: DebouncedTextChannel,
    viewport: ViewportController,
    resolution: ResolutionSlot,
    status: ServiceStatus,
    placeholder: String,
    error: Option<String>,
}

impl LocationState {
    /// Records a picker-originated value and returns its revision.
    fn commit(&mut self, address: String, coordinates: Option<Coordinates>) -> u64 {
        self.address_text = address.clone();
        self.coordinates = coordinates;
        self.committed = Committed {
            address,
            coordinates,
        };
        self.revision += 1;
        self.revision
    }

    fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            address_text: self.address_text.clone(),
            coordinates: self.coordinates,
            committed_address: self.committed.address.clone(),
            committed_coordinates: self.committed.coordinates,
            viewport: self.viewport.frame(),
            revision: self.revision,
            echo_suppressed: self.guard.is_suppressed(),
            echo_window_remaining: self.guard.remaining(),
            debounce_pending: self.text.is_pending(),
            pending_text: self.text.pending_text().map(str::to_string),
            resolving: self.resolution.is_inflight(),
            status: self.status,
            placeholder: self.placeholder.clone(),
            error: self.error.clone(),
        }
    }
}

#[derive(Default)]
struct Effects {
    notifications: Vec<ParentNotification>,
    warnings: Vec<WarningKey>,
    snapshot: Option<LocationSnapshot>,
}

impl Effects {
    fn warning(key: WarningKey) -> Self {
        Self {
            warnings: vec![key],
            ..Self::default()
        }
    }
}

pub struct LocationPicker {
    config: PickerConfig,
    service: Arc<dyn LocationService>,
    sink: Arc<dyn LocationSink>,
    inner: Mutex<LocationState>,
    events: broadcast::Sender<PickerEvent>,
}

impl LocationPicker {
    pub fn new(config: PickerConfig, sink: Arc<dyn LocationSink>) -> Arc<Self> {
        Self::new_with_dependencies(
            config,
            sink,
            Arc::new(MissingLocationService),
            Arc::new(NullViewportRenderer),
        )
    }

    pub fn new_with_dependencies(
        config: PickerConfig,
        sink: Arc<dyn LocationSink>,
        service: Arc<dyn LocationService>,
        renderer: Arc<dyn ViewportRenderer>,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        let state = LocationState {
            address_text: String::new(),
            coordinates: None,
            committed: Committed::default(),
            received: Committed::default(),
            revision: 0,
            guard: EchoGuard::new(),
            text: DebouncedTextChannel::new(config.debounce()),
            viewport: ViewportController::new(
                config.default_center,
                config.default_zoom,
                renderer,
            ),
            resolution: ResolutionSlot::default(),
            status: ServiceStatus::Loading,
            placeholder: String::new(),
            error: None,
        };
        Arc::new(Self {
            config,
            service,
            sink,
            inner: Mutex::new(state),
            events,
        })
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PickerEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> LocationSnapshot {
        self.inner.lock().await.snapshot()
    }

    pub async fn status(&self) -> ServiceStatus {
        self.inner.lock().await.status
    }

    /// Loads the backing service and seeds state from the parent's props.
    pub async fn mount(&self, props: PickerProps) -> ServiceStatus {
        let status = ServiceStatus::from_load(self.service.load().await);
        match status {
            ServiceStatus::Degraded(reason) => {
                warn!(?reason, strategy = ?self.config.strategy, "picker: degraded to manual entry")
            }
            _ => info!(strategy = ?self.config.strategy, "picker: location service ready"),
        }

        let mut state = self.inner.lock().await;
        let mut effects = Effects::default();
        if let ServiceStatus::Degraded(reason) = status {
            effects.warnings.push(reason.warning_key());
        }

        let incoming = Committed::from_props(props.value, props.coordinates);
        let coordinates = incoming.coordinates;
        state.status = status;
        state.address_text = incoming.address.clone();
        state.coordinates = coordinates;
        state.committed = incoming.clone();
        state.received = incoming;
        state.placeholder = props.placeholder;
        state.error = props.error;
        if let Some(coordinates) = coordinates {
            state.viewport.recenter(coordinates);
        }
        state
            .viewport
            .set_rendering(self.config.strategy.renders_viewport() && status.is_ready());

        let _ = self.events.send(PickerEvent::StatusChanged(status));
        effects.snapshot = Some(state.snapshot());
        self.apply(effects);
        status
    }

    /// Applies the parent's props. Never calls the parent back.
    pub async fn sync_from_props(&self, props: PickerProps) {
        let mut state = self.inner.lock().await;
        state.placeholder = props.placeholder;
        state.error = props.error;

        if let Some(revision) = props.revision {
            if revision < state.revision {
                debug!(
                    revision,
                    current = state.revision,
                    "props: ignoring stale echo"
                );
                return;
            }
        }

        let incoming = Committed::from_props(props.value, props.coordinates);
        if incoming == state.received {
            debug!(revision = state.revision, "props: unchanged");
            return;
        }
        state.received = incoming.clone();
        if incoming == state.committed {
            debug!(revision = state.revision, "props: echo of the committed value");
            return;
        }

        state.guard.suppress(self.config.echo_window());
        state.text.invalidate();
        state.resolution.supersede();
        state.address_text = incoming.address.clone();
        state.coordinates = incoming.coordinates;
        match incoming.coordinates {
            Some(coordinates) => state.viewport.recenter(coordinates),
            None => state.viewport.clear_marker(),
        }
        state.committed = incoming;
        info!(revision = state.revision, "props: applied external location");

        let effects = Effects {
            snapshot: Some(state.snapshot()),
            ..Effects::default()
        };
        self.apply(effects);
    }

    /// Records typed text immediately and schedules the debounced commit.
    pub async fn on_keystroke(self: &Arc<Self>, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.inner.lock().await;

        if text != state.address_text {
            state.resolution.supersede();
        }
        if text.is_empty() {
            state.coordinates = None;
            state.viewport.clear_marker();
        }
        state.address_text = text.clone();

        let generation = state.text.keystroke(text);
        let delay = state.text.delay();
        let picker = Arc::clone(self);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            picker.flush_debounced(generation).await;
        });
        state.text.arm(generation, timer);

        let effects = Effects {
            snapshot: Some(state.snapshot()),
            ..Effects::default()
        };
        self.apply(effects);
    }

    /// Commits buffered text right away, as when the field loses focus.
    pub async fn blur(&self) {
        let mut state = self.inner.lock().await;
        let Some(text) = state.text.flush() else {
            return;
        };
        let effects = self.commit_text(&mut state, text);
        self.apply(effects);
    }

    async fn flush_debounced(&self, generation: u64) {
        let mut state = self.inner.lock().await;
        let Some(text) = state.text.take_if_current(generation) else {
            return;
        };
        let effects = self.commit_text(&mut state, text);
        self.apply(effects);
    }

    fn commit_text(&self, state: &mut LocationState, text: String) -> Effects {
        let mut effects = Effects::default();
        if state.guard.is_suppressed() {
            debug!("text: commit skipped while echo guard is armed");
            return effects;
        }
        if state.committed.address == text && state.committed.coordinates == state.coordinates {
            debug!("text: unchanged, nothing to forward");
            return effects;
        }

        let coordinates = state.coordinates;
        let revision = state.commit(text.clone(), coordinates);
        debug!(revision, "text: forwarding debounced edit");
        effects.notifications.push(ParentNotification::LocationChanged {
            address: text,
            coordinates: coordinates.unwrap_or(Coordinates::UNSET),
            revision,
        });
        effects.snapshot = Some(state.snapshot());
        effects
    }

    fn map_gestures_available(&self, state: &LocationState) -> Result<(), WarningKey> {
        if self.config.strategy.supports_map_gestures() && state.status.is_ready() {
            Ok(())
        } else {
            Err(WarningKey::MapFeaturesUnavailable)
        }
    }

    /// Autocomplete predictions for `query`; empty when unavailable.
    pub async fn suggest(&self, query: &str) -> Vec<PlaceSuggestion> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        {
            let state = self.inner.lock().await;
            if self.map_gestures_available(&state).is_err() {
                return Vec::new();
            }
        }

        match self
            .service
            .autocomplete(query, &self.config.autocomplete_options())
            .await
        {
            Ok(suggestions) => suggestions,
            Err(err) => {
                warn!("autocomplete failed: {err}");
                self.apply(Effects::warning(WarningKey::LookupFailed));
                Vec::new()
            }
        }
    }

    /// Applies an autocomplete pick. Returns whether state changed.
    pub async fn select_place(&self, candidate: PlaceCandidate) -> bool {
        let mut state = self.inner.lock().await;
        let effects = self.apply_selection(&mut state, candidate, None);
        let committed = !effects.notifications.is_empty();
        self.apply(effects);
        committed
    }

    /// Fetches details for a suggestion and applies them as a selection.
    pub async fn pick_suggestion(self: &Arc<Self>, place_id: impl Into<String>) -> PendingResolution {
        let place_id = place_id.into();
        let mut state = self.inner.lock().await;
        if let Err(key) = self.map_gestures_available(&state) {
            self.apply(Effects::warning(key));
            return PendingResolution::idle();
        }

        let generation = state.resolution.begin();
        let picker = Arc::clone(self);
        let options = self.config.autocomplete_options();
        let task = tokio::spawn(async move {
            let details = picker.service.place_details(&place_id, &options).await;
            let mut state = picker.inner.lock().await;
            let effects = match details {
                Ok(candidate) => picker.apply_selection(&mut state, candidate, Some(generation)),
                Err(err) if state.resolution.finish(generation) => {
                    warn!(place_id = %place_id, "place details failed: {err}");
                    match err {
                        LocationServiceError::NotFound(_) => {
                            Effects::warning(WarningKey::SelectionWithoutGeometry)
                        }
                        _ => Effects::warning(WarningKey::LookupFailed),
                    }
                }
                Err(_) => Effects::default(),
            };
            picker.apply(effects);
        });
        state.resolution.track(generation, task.abort_handle());
        PendingResolution::spawned(task)
    }

    fn apply_selection(
        &self,
        state: &mut LocationState,
        candidate: PlaceCandidate,
        generation: Option<u64>,
    ) -> Effects {
        if let Some(generation) = generation {
            if !state.resolution.finish(generation) {
                debug!(generation, "selection: discarding stale place details");
                return Effects::default();
            }
        }
        if let Err(key) = self.map_gestures_available(state) {
            return Effects::warning(key);
        }
        let selection = match interactive::selection_from_candidate(candidate) {
            Ok(selection) => selection,
            Err(key) => return Effects::warning(key),
        };

        state.guard.suppress(self.config.echo_window());
        state.text.invalidate();
        state.resolution.supersede();

        let zoom = ViewportController::zoom_for(selection.place_type());
        let coordinates = selection.coordinates;
        state.viewport.focus(coordinates, zoom);
        let revision = state.commit(selection.formatted_address.clone(), Some(coordinates));
        info!(revision, zoom, "selection: committed place");

        Effects {
            notifications: vec![
                ParentNotification::LocationChanged {
                    address: selection.formatted_address,
                    coordinates,
                    revision,
                },
                ParentNotification::CoordinatesChanged {
                    coordinates,
                    revision,
                },
            ],
            warnings: Vec::new(),
            snapshot: Some(state.snapshot()),
        }
    }

    /// Marker drag end: coordinates commit now, the address follows.
    pub async fn drag_marker_to(self: &Arc<Self>, coordinates: Coordinates) -> PendingResolution {
        let mut state = self.inner.lock().await;
        if let Err(key) = self.map_gestures_available(&state) {
            self.apply(Effects::warning(key));
            return PendingResolution::idle();
        }
        if let Err(err) = coordinates.validated() {
            warn!("drag: rejecting drop: {err}");
            self.apply(Effects::warning(WarningKey::InvalidPosition));
            return PendingResolution::idle();
        }
        if coordinates.is_unset() {
            debug!("drag: ignoring drop on the unset sentinel");
            return PendingResolution::idle();
        }

        state.guard.suppress(self.config.echo_window());
        state.text.invalidate();
        let generation = state.resolution.begin();
        state.viewport.recenter(coordinates);
        let effects = Self::commit_coordinates(&mut state, coordinates);
        debug!(generation, lat = coordinates.lat, lng = coordinates.lng, "drag: resolving address");

        let task = self.spawn_address_resolution(generation, coordinates);
        state.resolution.track(generation, task.abort_handle());
        self.apply(effects);
        PendingResolution::spawned(task)
    }

    /// "Use current location": device position, then the same path as a drag.
    pub async fn use_current_location(self: &Arc<Self>) -> PendingResolution {
        let mut state = self.inner.lock().await;
        if let Err(key) = self.map_gestures_available(&state) {
            self.apply(Effects::warning(key));
            return PendingResolution::idle();
        }

        let generation = state.resolution.begin();
        let picker = Arc::clone(self);
        let timeout = self.config.geolocation_timeout();
        let task = tokio::spawn(async move {
            match interactive::locate(picker.service.as_ref(), timeout).await {
                Ok(coordinates) => {
                    if picker.apply_located(generation, coordinates).await {
                        let resolved =
                            interactive::resolve_address(picker.service.as_ref(), coordinates)
                                .await;
                        picker.finish_address_resolution(generation, resolved).await;
                    }
                }
                Err(key) => {
                    let mut state = picker.inner.lock().await;
                    if state.resolution.finish(generation) {
                        picker.apply(Effects::warning(key));
                    }
                }
            }
        });
        state.resolution.track(generation, task.abort_handle());
        PendingResolution::spawned(task)
    }

    async fn apply_located(&self, generation: u64, coordinates: Coordinates) -> bool {
        let mut state = self.inner.lock().await;
        if !state.resolution.is_current(generation) {
            debug!(generation, "locate: discarding stale device position");
            return false;
        }
        state.guard.suppress(self.config.echo_window());
        state.text.invalidate();
        state
            .viewport
            .focus(coordinates, PlaceType::Unclassified.zoom());
        let effects = Self::commit_coordinates(&mut state, coordinates);
        info!(lat = coordinates.lat, lng = coordinates.lng, "locate: device position committed");
        self.apply(effects);
        true
    }

    fn commit_coordinates(state: &mut LocationState, coordinates: Coordinates) -> Effects {
        state.coordinates = Some(coordinates);
        state.committed.coordinates = Some(coordinates);
        state.revision += 1;
        Effects {
            notifications: vec![ParentNotification::CoordinatesChanged {
                coordinates,
                revision: state.revision,
            }],
            warnings: Vec::new(),
            snapshot: Some(state.snapshot()),
        }
    }

    fn spawn_address_resolution(
        self: &Arc<Self>,
        generation: u64,
        coordinates: Coordinates,
    ) -> JoinHandle<()> {
        let picker = Arc::clone(self);
        tokio::spawn(async move {
            let resolved = interactive::resolve_address(picker.service.as_ref(), coordinates).await;
            picker.finish_address_resolution(generation, resolved).await;
        })
    }

    async fn finish_address_resolution(
        &self,
        generation: u64,
        resolved: interactive::ResolvedAddress,
    ) {
        let mut state = self.inner.lock().await;
        if !state.resolution.finish(generation) {
            debug!(generation, "resolution: discarding stale reverse geocode");
            return;
        }

        let mut effects = Effects::default();
        if !resolved.resolved {
            effects.warnings.push(WarningKey::ReverseGeocodeFailed);
        }
        state.guard.suppress(self.config.echo_window());
        let revision = state.commit(resolved.address.clone(), Some(resolved.coordinates));
        debug!(revision, resolved = resolved.resolved, "resolution: address committed");
        effects.notifications.push(ParentNotification::LocationChanged {
            address: resolved.address,
            coordinates: resolved.coordinates,
            revision,
        });
        effects.snapshot = Some(state.snapshot());
        self.apply(effects);
    }

    /// Explicit search (button or Enter).
    ///
    /// The simple strategy forward-geocodes the typed text; without a usable
    /// service it commits the raw text with unset coordinates and never
    /// touches the network. The interactive field commits buffered text as is.
    pub async fn search(self: &Arc<Self>) -> PendingResolution {
        let mut state = self.inner.lock().await;

        if !self.config.strategy.searches_explicitly() {
            if let Some(text) = state.text.flush() {
                let effects = self.commit_text(&mut state, text);
                self.apply(effects);
            }
            return PendingResolution::idle();
        }

        let text = state.address_text.clone();
        state.text.invalidate();
        if !state.status.is_ready() {
            let effects = Self::commit_unresolved(&mut state, text, None);
            self.apply(effects);
            return PendingResolution::idle();
        }

        let generation = state.resolution.begin();
        let picker = Arc::clone(self);
        let task = tokio::spawn(async move {
            let outcome =
                simple::search(picker.service.as_ref(), &text, picker.config.region()).await;
            picker.finish_search(generation, text, outcome).await;
        });
        state.resolution.track(generation, task.abort_handle());
        PendingResolution::spawned(task)
    }

    async fn finish_search(&self, generation: u64, text: String, outcome: simple::SearchOutcome) {
        let mut state = self.inner.lock().await;
        if !state.resolution.finish(generation) {
            debug!(generation, "search: discarding stale result");
            return;
        }

        let effects = match outcome {
            simple::SearchOutcome::Resolved {
                address,
                coordinates,
            } => {
                state.guard.suppress(self.config.echo_window());
                state.viewport.recenter(coordinates);
                let revision = state.commit(address.clone(), Some(coordinates));
                info!(revision, "search: resolved address");
                Effects {
                    notifications: vec![
                        ParentNotification::LocationChanged {
                            address,
                            coordinates,
                            revision,
                        },
                        ParentNotification::CoordinatesChanged {
                            coordinates,
                            revision,
                        },
                    ],
                    warnings: Vec::new(),
                    snapshot: Some(state.snapshot()),
                }
            }
            simple::SearchOutcome::Unresolved { warning } => {
                Self::commit_unresolved(&mut state, text, warning)
            }
        };
        self.apply(effects);
    }

    fn commit_unresolved(
        state: &mut LocationState,
        text: String,
        warning: Option<WarningKey>,
    ) -> Effects {
        state.viewport.clear_marker();
        let revision = state.commit(text.clone(), None);
        debug!(revision, "search: committing typed text without coordinates");
        Effects {
            notifications: vec![ParentNotification::LocationChanged {
                address: text,
                coordinates: Coordinates::UNSET,
                revision,
            }],
            warnings: warning.into_iter().collect(),
            snapshot: Some(state.snapshot()),
        }
    }

    /// Cancels timers and in-flight resolutions; used when the widget unmounts.
    pub async fn shutdown(&self) {
        let mut state = self.inner.lock().await;
        state.text.invalidate();
        state.resolution.supersede();
        state.guard.release();
    }

    /// Publishes effects. Callers with parent notifications hold the state
    /// lock so revisions reach the parent in order.
    fn apply(&self, effects: Effects) {
        for key in effects.warnings {
            let warning = key.to_warning(self.config.locale);
            warn!(code = ?warning.code, "{}", warning.message);
            let _ = self.events.send(PickerEvent::Warning(warning));
        }
        if let Some(snapshot) = effects.snapshot {
            let _ = self.events.send(PickerEvent::StateChanged(snapshot));
        }
        for notification in effects.notifications {
            match notification {
                ParentNotification::LocationChanged {
                    address,
                    coordinates,
                    revision,
                } => self.sink.on_location_change(&address, coordinates, revision),
                ParentNotification::CoordinatesChanged {
                    coordinates,
                    revision,
                } => self.sink.on_coordinates_change(coordinates, revision),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
