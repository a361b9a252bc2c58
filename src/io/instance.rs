//! JSON instance format.
//!
//! ```json
//! {
//!   "instance_name": "train_0",
//!   "nbr_nurses": 25,
//!   "capacity_nurse": 200,
//!   "benchmark": 827.3,
//!   "depot": { "x_coord": 40, "y_coord": 50, "return_time": 1236 },
//!   "patients": {
//!     "1": { "demand": 10, "start_time": 912, "end_time": 967,
//!            "care_time": 90, "x_coord": 45, "y_coord": 68 }
//!   },
//!   "travel_times": [[0.0, 18.68], [18.68, 0.0]]
//! }
//! ```

use crate::distance::TravelTimes;
use crate::error::{InstanceError, Result};
use crate::models::{Client, ClientId, Depot, Position, ProblemInstance, TimeWindow};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct InstanceRecord {
    instance_name: String,
    nbr_nurses: usize,
    capacity_nurse: u32,
    benchmark: f64,
    depot: DepotRecord,
    patients: BTreeMap<ClientId, PatientRecord>,
    travel_times: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct DepotRecord {
    x_coord: f64,
    y_coord: f64,
    return_time: f64,
}

#[derive(Debug, Deserialize)]
struct PatientRecord {
    demand: u32,
    start_time: f64,
    end_time: f64,
    care_time: f64,
    x_coord: f64,
    y_coord: f64,
}

impl InstanceRecord {
    fn into_instance(self) -> Result<ProblemInstance> {
        let clients = self
            .patients
            .into_iter()
            .map(|(id, p)| -> Result<Client, InstanceError> {
                let window = TimeWindow::new(p.start_time, p.end_time)
                    .ok_or(InstanceError::InvalidTimeWindow(id))?;
                Ok(Client::new(
                    id,
                    p.demand,
                    window,
                    p.care_time,
                    Position::new(p.x_coord, p.y_coord),
                ))
            })
            .collect::<Result<Vec<_>, InstanceError>>()?;

        let expected = clients.len() + 1;
        let entries = self.travel_times.iter().map(Vec::len).sum::<usize>();
        let travel_times =
            TravelTimes::from_rows(self.travel_times).ok_or(InstanceError::MatrixSize {
                expected,
                actual: entries,
            })?;

        let depot = Depot::new(
            Position::new(self.depot.x_coord, self.depot.y_coord),
            self.depot.return_time,
        );
        Ok(ProblemInstance::new(
            self.instance_name,
            self.nbr_nurses,
            self.capacity_nurse,
            self.benchmark,
            depot,
            clients,
            travel_times,
        )?)
    }
}

/// Parses an instance from JSON text.
///
/// # Errors
///
/// [`SolverError::Json`](crate::error::SolverError::Json) for malformed
/// JSON and [`SolverError::Instance`](crate::error::SolverError::Instance)
/// for inconsistent data.
///
/// # Examples
///
/// ```
/// use care_routing::io::parse_instance;
///
/// let instance = parse_instance(r#"{
///     "instance_name": "tiny",
///     "nbr_nurses": 1,
///     "capacity_nurse": 5,
///     "benchmark": 4.0,
///     "depot": { "x_coord": 0, "y_coord": 0, "return_time": 100 },
///     "patients": {
///         "1": { "demand": 2, "start_time": 0, "end_time": 50,
///                "care_time": 10, "x_coord": 2, "y_coord": 0 }
///     },
///     "travel_times": [[0, 2], [2, 0]]
/// }"#).unwrap();
///
/// assert_eq!(instance.num_clients(), 1);
/// assert_eq!(instance.travel_time(0, 1), 2.0);
/// ```
pub fn parse_instance(json: &str) -> Result<ProblemInstance> {
    let record: InstanceRecord = serde_json::from_str(json)?;
    record.into_instance()
}

/// Reads an instance from a JSON stream.
pub fn read_instance<R: Read>(reader: R) -> Result<ProblemInstance> {
    let record: InstanceRecord = serde_json::from_reader(reader)?;
    record.into_instance()
}

/// Loads an instance from a JSON file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let path = path.as_ref();
    let instance = read_instance(BufReader::new(File::open(path)?))?;
    debug!(
        path = %path.display(),
        instance = instance.name(),
        clients = instance.num_clients(),
        workers = instance.num_workers(),
        "instance loaded"
    );
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    const TWO_PATIENTS: &str = r#"{
        "instance_name": "two",
        "nbr_nurses": 2,
        "capacity_nurse": 10,
        "benchmark": 12.5,
        "depot": { "x_coord": 0, "y_coord": 0, "return_time": 300 },
        "patients": {
            "2": { "demand": 3, "start_time": 20, "end_time": 90,
                   "care_time": 15, "x_coord": 0, "y_coord": 4 },
            "1": { "demand": 4, "start_time": 0, "end_time": 60,
                   "care_time": 10, "x_coord": 3, "y_coord": 0 }
        },
        "travel_times": [[0, 3, 4], [3, 0, 5], [4, 5, 0]]
    }"#;

    #[test]
    fn test_parse_fields() {
        let inst = parse_instance(TWO_PATIENTS).expect("parses");
        assert_eq!(inst.name(), "two");
        assert_eq!(inst.num_workers(), 2);
        assert_eq!(inst.capacity(), 10);
        assert!((inst.benchmark() - 12.5).abs() < 1e-12);
        assert!((inst.depot().return_deadline() - 300.0).abs() < 1e-12);
        assert_eq!(inst.num_clients(), 2);

        let c2 = inst.client(2);
        assert_eq!(c2.demand(), 3);
        assert!((c2.window().start() - 20.0).abs() < 1e-12);
        assert!((c2.window().end() - 90.0).abs() < 1e-12);
        assert!((c2.service_duration() - 15.0).abs() < 1e-12);
        assert!((c2.position().y - 4.0).abs() < 1e-12);
        assert!((inst.travel_time(1, 2) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bad_window() {
        let json = TWO_PATIENTS.replace(r#""start_time": 20"#, r#""start_time": 95"#);
        assert!(matches!(
            parse_instance(&json),
            Err(SolverError::Instance(InstanceError::InvalidTimeWindow(2)))
        ));
    }

    #[test]
    fn test_ragged_matrix() {
        let json = TWO_PATIENTS.replace("[4, 5, 0]", "[4, 5]");
        assert!(matches!(
            parse_instance(&json),
            Err(SolverError::Instance(InstanceError::MatrixSize {
                expected: 3,
                actual: 8
            }))
        ));
    }

    #[test]
    fn test_non_numeric_id() {
        let json = TWO_PATIENTS.replace(r#""2":"#, r#""b":"#);
        assert!(matches!(parse_instance(&json), Err(SolverError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_instance("/nonexistent/instance.json"),
            Err(SolverError::Io(_))
        ));
    }
}
