//! Record types for one line of an optimization trace.
//!
//! The producing engine serialises its whole state after every generation.
//! Only `pops[*].indis[*].genome` is required for rendering; the remaining
//! fields are optional and kept for the trace summary.

use serde::{Deserialize, Serialize};

/// State of the run after one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    /// Sub-populations in engine order.
    #[serde(alias = "populations")]
    pub pops: Vec<SubPopulation>,
    /// Generations evolved so far.
    #[serde(default)]
    pub generations: Option<u64>,
    /// Time spent evolving, in nanoseconds.
    #[serde(default)]
    pub duration: Option<i64>,
    /// Best individuals ever encountered, best first.
    #[serde(default)]
    pub hall_of_fame: Vec<IndividualRecord>,
}

/// One sub-population (deme) of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubPopulation {
    /// Individuals in engine order.
    pub indis: Vec<IndividualRecord>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub generations: Option<u64>,
    /// Age in nanoseconds.
    #[serde(default)]
    pub age: Option<i64>,
}

/// A single candidate solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    /// Coordinates in search space.
    pub genome: Vec<f64>,
    #[serde(default)]
    pub fitness: Option<f64>,
    #[serde(default)]
    pub id: Option<String>,
}

impl GenerationSnapshot {
    /// First sub-population, the one rendered.
    pub fn primary(&self) -> Option<&SubPopulation> {
        self.pops.first()
    }

    /// Lowest fitness among all individuals of all sub-populations.
    pub fn best_fitness(&self) -> Option<f64> {
        self.pops
            .iter()
            .flat_map(|pop| pop.indis.iter())
            .filter_map(|indi| indi.fitness)
            .filter(|f| f.is_finite())
            .reduce(f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record() {
        let snapshot: GenerationSnapshot =
            serde_json::from_str(r#"{"pops":[{"indis":[{"genome":[1.0,2.0]}]}]}"#).unwrap();
        assert_eq!(snapshot.pops.len(), 1);
        assert_eq!(snapshot.pops[0].indis[0].genome, vec![1.0, 2.0]);
        assert_eq!(snapshot.generations, None);
        assert!(snapshot.hall_of_fame.is_empty());
        assert_eq!(snapshot.best_fitness(), None);
    }

    #[test]
    fn test_engine_record_with_extra_fields() {
        let line = r#"{
            "populations": [
                {"indis": [
                    {"genome": [0.5, -0.5, 9.0], "fitness": -1.2, "id": "abc"},
                    {"genome": [1.0, 1.0], "fitness": -2.06, "id": "def"}
                ],
                 "age": 1500, "generations": 3, "id": "pop0"}
            ],
            "hall_of_fame": [{"genome": [1.0, 1.0], "fitness": -2.06, "id": "def"}],
            "duration": 4200,
            "generations": 3,
            "unknown": {"ignored": true}
        }"#;
        let snapshot: GenerationSnapshot = serde_json::from_str(line).unwrap();
        let primary = snapshot.primary().unwrap();
        assert_eq!(primary.id.as_deref(), Some("pop0"));
        assert_eq!(primary.indis[0].genome.len(), 3);
        assert_eq!(snapshot.generations, Some(3));
        assert_eq!(snapshot.duration, Some(4200));
        assert_eq!(snapshot.best_fitness(), Some(-2.06));
    }

    #[test]
    fn test_missing_pops_is_rejected() {
        let result: Result<GenerationSnapshot, _> = serde_json::from_str(r#"{"generations": 1}"#);
        assert!(result.is_err());
    }
}
