//! Event-log output.
//!
//! [`EventLogObserver`] bridges [`SimObserver`] to an [`EventWriter`]
//! backend.  Observer methods have no return value, so write errors are
//! stored internally; check with [`take_error`](EventLogObserver::take_error)
//! after the run.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use fleet_core::Tick;
use fleet_routing::Event;

use crate::observer::SimObserver;
use crate::{OutputError, OutputResult};

/// Trait implemented by event-log backends.
pub trait EventWriter {
    /// Write one tick's events.
    fn write_events(&mut self, tick: Tick, events: &[Event]) -> OutputResult<()>;

    /// Flush and close the underlying file.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Writes the event log as CSV:
/// `tick, event, vehicle, order, x, y`.
pub struct CsvEventWriter {
    events: Writer<File>,
    finished: bool,
}

impl CsvEventWriter {
    /// Open (or create) the CSV file at `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut events = Writer::from_path(path)?;
        events.write_record(["tick", "event", "vehicle", "order", "x", "y"])?;
        Ok(Self {
            events,
            finished: false,
        })
    }
}

impl EventWriter for CsvEventWriter {
    fn write_events(&mut self, _tick: Tick, events: &[Event]) -> OutputResult<()> {
        for event in events {
            let (vehicle, order, loc) = match event {
                Event::Spawn { vehicle, node, .. } => {
                    (Some(vehicle.0), None, Some(*node))
                }
                Event::ArrivedAtNode { vehicle, node, .. } => {
                    (Some(vehicle.0), None, Some(*node))
                }
                Event::ArrivedAtRestaurant {
                    vehicle,
                    restaurant,
                    ..
                } => (Some(vehicle.0), None, Some(*restaurant)),
                Event::OrderReceived { order, .. } => {
                    (None, Some(order.id().0), Some(order.location()))
                }
                Event::DeliverOrder { vehicle, order, .. } => {
                    (Some(vehicle.0), Some(order.id().0), Some(order.location()))
                }
            };
            self.events.write_record(&[
                event.tick().0.to_string(),
                event.label().to_string(),
                vehicle.map(|v| v.to_string()).unwrap_or_default(),
                order.map(|o| o.to_string()).unwrap_or_default(),
                loc.map(|l| l.x.to_string()).unwrap_or_default(),
                loc.map(|l| l.y.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}

/// A [`SimObserver`] that forwards every tick's events to an
/// [`EventWriter`].
pub struct EventLogObserver<W: EventWriter> {
    writer: W,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> EventLogObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect the file after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> SimObserver for EventLogObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, events: &[Event]) {
        if !events.is_empty() {
            let result = self.writer.write_events(tick, events);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
