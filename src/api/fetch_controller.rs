use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::{ChartData, ChartSize};
use crate::engine::{ChartEngine, ChartType};
use crate::error::{ViewportError, ViewportResult};
#[cfg(feature = "http")]
use crate::source::HttpDataSource;
use crate::source::{AxisSelection, DataSource, EndpointConfig};

use super::ChartController;

const CONFIG_ALERT: &str = "Configuration error: Could not fetch chart update URL.";
const TRANSPORT_ALERT: &str = "An error occurred while fetching chart data.";

/// Current state of the chart-type, size and axis selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartSelection {
    pub chart_type: ChartType,
    pub size: ChartSize,
    pub x_axis: Option<String>,
    pub y_axis: Option<String>,
}

impl ChartSelection {
    /// Request body for this selection; `None` until both axes are chosen.
    #[must_use]
    pub fn axes(&self) -> Option<AxisSelection> {
        let x_axis = self.x_axis.as_deref().filter(|axis| !axis.is_empty())?;
        let y_axis = self.y_axis.as_deref().filter(|axis| !axis.is_empty())?;
        Some(AxisSelection::new(x_axis, y_axis))
    }
}

/// Issues monotonically increasing request sequence numbers.
///
/// A sequence number is honored at most once: it must be the latest issued
/// and not yet retired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    issued: u64,
    completed: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    #[must_use]
    pub fn latest(self) -> u64 {
        self.issued
    }

    #[must_use]
    pub fn is_current(self, seq: u64) -> bool {
        seq != 0 && seq == self.issued && seq > self.completed
    }

    /// Marks `seq` as applied; it and every earlier number become stale.
    pub fn retire(&mut self, seq: u64) {
        self.completed = self.completed.max(seq);
    }
}

/// Proof that a fetch was started; only the latest ticket may apply its data,
/// and only once.
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    selection: ChartSelection,
    axes: AxisSelection,
}

impl FetchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub fn selection(&self) -> &ChartSelection {
        &self.selection
    }

    #[must_use]
    pub fn axes(&self) -> &AxisSelection {
        &self.axes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New chart built from the fetched data.
    Rendered,
    /// Data arrived but chart creation was refused; no chart is shown.
    Refused { reason: String },
    /// Fetch failed; the chart was destroyed and `alert` raised.
    Failed { alert: String },
    /// A newer fetch was issued meanwhile; the response was discarded.
    Stale,
    /// Not both axes are selected, so nothing was requested.
    Skipped,
}

/// User-facing alert text for a failed fetch.
#[must_use]
pub fn fetch_alert_message(err: &ViewportError) -> String {
    match err {
        ViewportError::Fetch { message, .. } => format!("Error fetching chart data: {message}"),
        ViewportError::Config(_) => CONFIG_ALERT.to_owned(),
        _ => TRANSPORT_ALERT.to_owned(),
    }
}

impl<E: ChartEngine> ChartController<E> {
    /// Sequence number of the most recently issued fetch.
    #[must_use]
    pub fn latest_fetch_seq(&self) -> u64 {
        self.sequencer.latest()
    }

    /// Starts a fetch for `selection`, superseding any outstanding one.
    ///
    /// The live chart stays interactive until the ticket completes.
    pub fn begin_fetch(&mut self, selection: ChartSelection) -> Option<FetchTicket> {
        let Some(axes) = selection.axes() else {
            debug!("fetch skipped: both axes must be selected");
            return None;
        };
        let seq = self.sequencer.issue();
        debug!(seq, x_axis = %axes.x_axis, y_axis = %axes.y_axis, "chart data fetch issued");
        Some(FetchTicket {
            seq,
            selection,
            axes,
        })
    }

    /// Applies the result of a fetch started with `begin_fetch`.
    ///
    /// Success replaces the chart; failure destroys it and raises an alert.
    /// Results for superseded tickets are dropped without touching the chart.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: ViewportResult<ChartData>,
    ) -> FetchOutcome {
        if !self.sequencer.is_current(ticket.seq) {
            debug!(
                seq = ticket.seq,
                latest = self.sequencer.latest(),
                "discarding stale chart data response"
            );
            return FetchOutcome::Stale;
        }
        self.sequencer.retire(ticket.seq);

        match result {
            Ok(data) => {
                let FetchTicket {
                    selection, axes, ..
                } = ticket;
                self.destroy();
                self.size = selection.size;
                match self.create(selection.chart_type, &data, &axes.x_axis, &axes.y_axis) {
                    Ok(()) => FetchOutcome::Rendered,
                    Err(err) => {
                        warn!(error = %err, "fetched chart data could not be rendered");
                        FetchOutcome::Refused {
                            reason: err.to_string(),
                        }
                    }
                }
            }
            Err(err) => {
                let alert = fetch_alert_message(&err);
                error!(error = %err, seq = ticket.seq, "chart data fetch failed");
                self.destroy();
                self.last_alert = Some(alert.clone());
                FetchOutcome::Failed { alert }
            }
        }
    }

    /// Synchronous fetch-and-rebuild for hosts without an event loop.
    pub fn refresh<S>(&mut self, source: &S, selection: ChartSelection) -> FetchOutcome
    where
        S: DataSource + ?Sized,
    {
        let Some(ticket) = self.begin_fetch(selection) else {
            return FetchOutcome::Skipped;
        };
        let result = source.fetch(ticket.axes());
        self.complete_fetch(ticket, result)
    }

    #[must_use]
    pub fn endpoint(&self) -> Option<&EndpointConfig> {
        self.endpoint.as_ref()
    }

    pub fn set_endpoint(&mut self, endpoint: Option<EndpointConfig>) {
        self.endpoint = endpoint;
    }

    /// Fetch-and-rebuild against the configured endpoint.
    ///
    /// `build` turns the endpoint into a data source. A missing or invalid
    /// endpoint fails the fetch with a `Config` error, which raises the
    /// configuration alert and destroys the chart like any other failure.
    pub fn refresh_from_endpoint<S, B>(
        &mut self,
        selection: ChartSelection,
        build: B,
    ) -> FetchOutcome
    where
        S: DataSource,
        B: FnOnce(&EndpointConfig) -> ViewportResult<S>,
    {
        let Some(ticket) = self.begin_fetch(selection) else {
            return FetchOutcome::Skipped;
        };
        let source = match self.endpoint.as_ref() {
            Some(endpoint) => endpoint.validate().and_then(|()| build(endpoint)),
            None => Err(ViewportError::Config(
                "no chart data endpoint configured".to_owned(),
            )),
        };
        let result = match source {
            Ok(source) => source.fetch(ticket.axes()),
            Err(err) => Err(err),
        };
        self.complete_fetch(ticket, result)
    }

    /// `refresh_from_endpoint` with the blocking HTTP client.
    #[cfg(feature = "http")]
    pub fn refresh_configured(&mut self, selection: ChartSelection) -> FetchOutcome {
        self.refresh_from_endpoint(selection, |endpoint| HttpDataSource::new(endpoint.clone()))
    }
}
