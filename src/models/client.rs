//! Client and time window types.

use serde::{Deserialize, Serialize};

/// Client identifier. Equal to the client's row in the travel-time matrix.
pub type ClientId = usize;

/// Planar coordinates of a client or the depot.
///
/// Kept for reporting and for deriving travel times; the search itself only
/// consults the travel-time matrix.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// X-coordinate.
    pub x: f64,
    /// Y-coordinate.
    pub y: f64,
}

impl Position {
    /// Creates a position.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The interval within which a visit must be completed.
///
/// Arriving before `start` means waiting until `start`; finishing the visit
/// after `end` is a missed-care violation.
///
/// # Examples
///
/// ```
/// use care_routing::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert_eq!(tw.waiting_time(80.0), 20.0);
/// assert_eq!(tw.lateness(230.0), 30.0);
/// assert_eq!(tw.lateness(150.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `start > end` or either value is non-finite.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Earliest time service may begin.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Latest time service may finish.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Idle time when arriving at `arrival`. Zero when arriving inside or after the window.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        (self.start - arrival).max(0.0)
    }

    /// How far a visit finishing at `finish` overruns the window.
    pub fn lateness(&self, finish: f64) -> f64 {
        (finish - self.end).max(0.0)
    }
}

/// A client to be visited by exactly one worker.
///
/// # Examples
///
/// ```
/// use care_routing::models::{Client, Position, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 500.0).unwrap();
/// let c = Client::new(3, 10, tw, 15.0, Position::new(4.0, 2.0));
/// assert_eq!(c.id(), 3);
/// assert_eq!(c.demand(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    demand: u32,
    window: TimeWindow,
    service_duration: f64,
    position: Position,
}

impl Client {
    /// Creates a client.
    pub fn new(
        id: ClientId,
        demand: u32,
        window: TimeWindow,
        service_duration: f64,
        position: Position,
    ) -> Self {
        Self {
            id,
            demand,
            window,
            service_duration,
            position,
        }
    }

    /// Client id (1-based, matches the travel-time matrix index).
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Capacity consumed by visiting this client.
    pub fn demand(&self) -> u32 {
        self.demand
    }

    /// Service time window.
    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    /// Time spent on site.
    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    /// Location.
    pub fn position(&self) -> Position {
        self.position
    }
}
