//! Solution export.

use crate::error::Result;
use crate::evaluation::{is_solution_valid, BenchmarkComparison, Penalties};
use crate::ga::EvolutionResult;
use crate::models::{Individual, ProblemInstance, Route};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Serialisable summary of a solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionReport {
    /// Instance name.
    pub instance: String,
    /// One client sequence per worker, depot omitted.
    pub routes: Vec<Route>,
    /// Penalised fitness.
    pub fitness: f64,
    /// Total travel time.
    pub travel_time: f64,
    /// Unweighted violations.
    pub penalties: Penalties,
    /// Strict feasibility.
    pub feasible: bool,
    /// Instance benchmark travel time.
    pub benchmark: f64,
    /// Gap to the benchmark in percent; absent for a non-positive benchmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent_gap: Option<f64>,
}

impl SolutionReport {
    /// Summarises `individual` against `instance`.
    pub fn new(instance: &ProblemInstance, individual: &Individual) -> Self {
        let cmp = BenchmarkComparison::new(individual.travel_time(), instance.benchmark());
        Self {
            instance: instance.name().to_owned(),
            routes: individual.genome().routes().to_vec(),
            fitness: individual.fitness(),
            travel_time: individual.travel_time(),
            penalties: *individual.penalties(),
            feasible: is_solution_valid(instance, individual.genome()),
            benchmark: cmp.benchmark,
            percent_gap: cmp.percent_gap(),
        }
    }

    /// Summarises the best individual of a run.
    pub fn from_result(instance: &ProblemInstance, result: &EvolutionResult) -> Self {
        Self::new(instance, &result.best)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes pretty-printed JSON to `writer`.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// Writes pretty-printed JSON to a file, replacing it if present.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::FitnessEvaluator;
    use crate::ga::{EngineConfig, EvolutionEngine};
    use crate::models::Genome;
    use crate::random::SeededSource;
    use crate::test_support::{line_instance, tight_instance};

    #[test]
    fn test_report_fields() {
        let inst = line_instance();
        let eval = FitnessEvaluator::new(&inst);
        let ind = Individual::evaluated(Genome::new(vec![vec![1, 2], vec![3, 4]]), &eval);
        let report = SolutionReport::new(&inst, &ind);

        assert_eq!(report.routes, vec![vec![1, 2], vec![3, 4]]);
        assert!((report.travel_time - 12.0).abs() < 1e-10);
        assert!(report.feasible);
        assert!((report.benchmark - 8.0).abs() < 1e-10);
        assert!((report.percent_gap.expect("positive benchmark") - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_infeasible_report_json() {
        let inst = tight_instance();
        let eval = FitnessEvaluator::new(&inst);
        // client 3 served last: its window closes at 12
        let ind = Individual::evaluated(Genome::new(vec![vec![1, 2, 3], vec![]]), &eval);
        let report = SolutionReport::new(&inst, &ind);
        assert!(!report.feasible);

        let value: serde_json::Value =
            serde_json::from_str(&report.to_json().expect("serialises")).expect("valid json");
        assert_eq!(value["feasible"], serde_json::Value::Bool(false));
        assert_eq!(value["routes"], serde_json::json!([[1, 2, 3], []]));
        assert!(value["penalties"]["missed_care"].as_f64().expect("number") > 0.0);
    }

    #[test]
    fn test_from_result() {
        let inst = line_instance();
        let config = EngineConfig::default()
            .with_population_size(6)
            .with_generations(3);
        let engine = EvolutionEngine::new(&inst, config).expect("valid config");
        let result = engine.run(&mut SeededSource::new(2)).expect("runs");
        let report = SolutionReport::from_result(&inst, &result);
        assert_eq!(report.feasible, result.feasible);
        assert_eq!(&report.routes[..], result.best.genome().routes());
        assert_eq!(report.instance, inst.name());
    }
}
