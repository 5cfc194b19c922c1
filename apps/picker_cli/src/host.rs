use std::sync::Arc;

use picker_core::{LocationPicker, LocationSink, LocationSnapshot, PickerEvent};
use serde_json::json;
use shared::{
    domain::{Coordinates, PlaceCandidate, ViewportFrame},
    protocol::{ParentNotification, PickerProps},
};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::commands::{Command, USAGE};

/// Plays the parent form: prints every notification as a JSON line.
pub struct JsonLinesSink;

impl JsonLinesSink {
    fn emit(notification: &ParentNotification) {
        match serde_json::to_string(notification) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!("failed to encode notification: {err}"),
        }
    }
}

impl LocationSink for JsonLinesSink {
    fn on_location_change(&self, address: &str, coordinates: Coordinates, revision: u64) {
        Self::emit(&ParentNotification::LocationChanged {
            address: address.to_string(),
            coordinates,
            revision,
        });
    }

    fn on_coordinates_change(&self, coordinates: Coordinates, revision: u64) {
        Self::emit(&ParentNotification::CoordinatesChanged {
            coordinates,
            revision,
        });
    }
}

/// Stands in for the map widget.
pub struct TracingRenderer;

impl geo_integration::ViewportRenderer for TracingRenderer {
    fn render(&self, frame: &ViewportFrame) {
        info!(
            lat = frame.center.lat,
            lng = frame.center.lng,
            zoom = frame.zoom,
            marker = frame.marker.is_some(),
            draggable = frame.marker_draggable,
            "map frame"
        );
    }
}

/// Forwards picker warnings to stdout next to the notifications.
pub fn spawn_warning_printer(mut events: broadcast::Receiver<PickerEvent>) {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(PickerEvent::Warning(warning)) => {
                    println!("{}", json!({ "type": "warning", "payload": warning }));
                }
                Ok(PickerEvent::StatusChanged(status)) => info!(?status, "service status"),
                Ok(PickerEvent::StateChanged(_)) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "event printer lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Runs one command. Returns false once the session should end.
pub async fn execute(picker: &Arc<LocationPicker>, command: Command) -> bool {
    match command {
        Command::Type(text) => picker.on_keystroke(text).await,
        Command::Clear => picker.on_keystroke(String::new()).await,
        Command::Blur => picker.blur().await,
        Command::Search => report(picker.search().await.settled().await),
        Command::Suggest(query) => {
            for suggestion in picker.suggest(&query).await {
                println!("{}", json!({ "type": "suggestion", "payload": suggestion }));
            }
        }
        Command::Pick(place_id) => report(picker.pick_suggestion(place_id).await.settled().await),
        Command::Select {
            coordinates,
            place_types,
            address,
        } => {
            let candidate = PlaceCandidate {
                name: None,
                formatted_address: Some(address),
                coordinates: Some(coordinates),
                place_types,
            };
            if !picker.select_place(candidate).await {
                debug!("selection was not applied");
            }
        }
        Command::Drag(coordinates) => {
            report(picker.drag_marker_to(coordinates).await.settled().await)
        }
        Command::Locate => report(picker.use_current_location().await.settled().await),
        Command::Props {
            coordinates,
            address,
        } => {
            picker
                .sync_from_props(PickerProps::new(address, coordinates))
                .await
        }
        Command::State => print_snapshot(&picker.snapshot().await),
        Command::Help => eprintln!("{USAGE}"),
        Command::Quit => {
            picker.shutdown().await;
            return false;
        }
    }
    true
}

fn report(settled: bool) {
    if !settled {
        debug!("resolution superseded by a newer action");
    }
}

fn print_snapshot(snapshot: &LocationSnapshot) {
    let line = json!({
        "type": "state",
        "payload": {
            "address": snapshot.address_text,
            "coordinates": snapshot.coordinates,
            "revision": snapshot.revision,
            "status": format!("{:?}", snapshot.status),
            "zoom": snapshot.viewport.zoom,
            "center": snapshot.viewport.center,
            "marker": snapshot.viewport.marker,
            "debounce_pending": snapshot.debounce_pending,
            "pending_text": snapshot.pending_text,
            "echo_window_ms": snapshot.echo_window_remaining.map(|left| left.as_millis() as u64),
            "resolving": snapshot.resolving,
        }
    });
    println!("{line}");
}
