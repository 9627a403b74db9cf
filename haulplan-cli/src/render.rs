//! Text and JSON rendering of a finished plan.

use std::io::Write;

use haulplan_core::{
    AVERAGE_SPEED_MPH, DayCard, DrivingEstimate, HeadlessMap, MapLayerSet, MapSyncController,
    StopRole, TripViewModel,
};
use serde::Serialize;

use crate::CliError;
use crate::plan::PlanOutcome;

/// Description of the headless map after the route was drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct MapSnapshot {
    /// Container the map lives in.
    pub(crate) container: String,
    /// Initial centre as `[latitude, longitude]`.
    pub(crate) center: [f64; 2],
    /// Initial zoom.
    pub(crate) zoom: u8,
    /// Tile attribution, if tiles are shown.
    pub(crate) attribution: Option<String>,
    /// Stop markers in route order.
    pub(crate) markers: Vec<MarkerSnapshot>,
    /// Route line as `[latitude, longitude]` pairs.
    pub(crate) route_line: Vec<[f64; 2]>,
    /// Viewport fitted to the route.
    pub(crate) fitted: Option<BoundsSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MarkerSnapshot {
    pub(crate) role: StopRole,
    pub(crate) label: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) color: &'static str,
    pub(crate) icon: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct BoundsSnapshot {
    pub(crate) south: f64,
    pub(crate) west: f64,
    pub(crate) north: f64,
    pub(crate) east: f64,
    pub(crate) padding_px: u32,
}

impl MapSnapshot {
    /// Describe the controller's live map; empty when none is bound.
    pub(crate) fn capture(map: &MapSyncController<HeadlessMap>) -> Self {
        let Some(state) = map.map_id().and_then(|id| map.backend().map(id)) else {
            return Self::default();
        };
        let markers = state
            .markers()
            .map(|marker| MarkerSnapshot {
                role: marker.role,
                label: marker.label.clone(),
                latitude: marker.position.y,
                longitude: marker.position.x,
                color: marker.style.color,
                icon: marker.style.icon,
            })
            .collect();
        let route_line = map
            .layers()
            .and_then(MapLayerSet::route_line)
            .and_then(|id| state.polyline(id))
            .map(|line| line.line.coords().map(|coord| [coord.y, coord.x]).collect())
            .unwrap_or_default();
        let fitted = state.fitted.map(|fitted| BoundsSnapshot {
            south: fitted.bounds.min().y,
            west: fitted.bounds.min().x,
            north: fitted.bounds.max().y,
            east: fitted.bounds.max().x,
            padding_px: fitted.padding_px,
        });
        Self {
            container: state.container.clone(),
            center: [state.view.center.y, state.view.center.x],
            zoom: state.view.zoom,
            attribution: state
                .tile_layers()
                .next()
                .map(|tiles| tiles.attribution.clone()),
            markers,
            route_line,
            fitted,
        }
    }

    fn describe(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Map: {} marker(s), route line of {} point(s)",
            self.markers.len(),
            self.route_line.len()
        )];
        if let Some(bounds) = self.fitted {
            lines.push(format!(
                "  fitted to {:.3},{:.3} .. {:.3},{:.3} with {} px padding",
                bounds.south, bounds.west, bounds.north, bounds.east, bounds.padding_px
            ));
        }
        lines.extend(self.markers.iter().map(|marker| {
            format!(
                "  {} ({:.3}, {:.3})",
                marker.label, marker.latitude, marker.longitude
            )
        }));
        lines
    }
}

fn estimate_line(estimate: &DrivingEstimate) -> String {
    let line = format!(
        "Distance: {:.1} mi, {:.1} h driving at {AVERAGE_SPEED_MPH:.0} mph",
        estimate.distance_miles(),
        estimate.hours()
    );
    if estimate.is_pending() {
        format!("{line} (estimate pending)")
    } else {
        line
    }
}

fn card_lines(card: &DayCard) -> Vec<String> {
    let mut lines = vec![format!("Day {}: {:.1} h logged", card.day, card.total_hours)];
    lines.extend(card.blocks.iter().map(|block| {
        format!(
            "  {:>5.1}h  {:<14} {:>5.1}h  {}",
            block.start_hour, block.label, block.duration_hours, block.color_tag
        )
    }));
    lines.push(format!(
        "  Driving {:.1}h | On Duty {:.1}h | Sleeper {:.1}h | Off Duty {:.1}h",
        card.total_driving, card.total_on_duty, card.total_sleeper, card.total_off_duty
    ));
    lines
}

/// Human-readable plan: summary, compliance, one card per day and the map.
pub(crate) fn render_text(view: &TripViewModel, map: &MapSnapshot) -> String {
    let mut lines = vec![
        format!("Route: {}", view.route_summary),
        estimate_line(&view.estimate),
    ];
    if let Some(banner) = &view.compliance {
        lines.push(format!("Compliance: {}", banner.text));
    }
    if let Some(message) = &view.error_banner {
        lines.push(format!("Error: {message}"));
    }
    if view.day_cards.is_empty() {
        lines.push(String::new());
        lines.push("No duty logs returned.".to_owned());
    }
    for card in &view.day_cards {
        lines.push(String::new());
        lines.extend(card_lines(card));
    }
    lines.push(String::new());
    lines.extend(map.describe());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[derive(Serialize)]
struct PlanReport<'a> {
    trip: &'a TripViewModel,
    map: &'a MapSnapshot,
}

pub(crate) fn write_text(writer: &mut dyn Write, outcome: &PlanOutcome) -> Result<(), CliError> {
    writer
        .write_all(render_text(&outcome.view, &outcome.map).as_bytes())
        .map_err(CliError::WritePlanOutput)
}

pub(crate) fn write_json(writer: &mut dyn Write, outcome: &PlanOutcome) -> Result<(), CliError> {
    let report = PlanReport {
        trip: &outcome.view,
        map: &outcome.map,
    };
    let payload =
        serde_json::to_string_pretty(&report).map_err(CliError::SerializePlanOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WritePlanOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WritePlanOutput)?;
    Ok(())
}
