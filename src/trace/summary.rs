//! Summary statistics over a loaded trace.

use std::fmt;

use super::Trace;

/// Aggregate view of a trace, logged after loading.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    /// Number of snapshots.
    pub snapshots: usize,
    /// Generation counter of the first and last snapshot, when recorded.
    pub generation_range: Option<(u64, u64)>,
    /// Smallest and largest first-population size across snapshots.
    pub population_range: Option<(usize, usize)>,
    /// Best (lowest) fitness per snapshot.
    pub best_per_snapshot: Vec<Option<f64>>,
    /// Best fitness over the whole run.
    pub best_overall: Option<f64>,
}

impl TraceSummary {
    /// Compute summary from a trace.
    pub fn from_trace(trace: &Trace) -> Self {
        let snapshots = trace.snapshots();

        let generation_range = match (
            snapshots.first().and_then(|s| s.generations),
            snapshots.last().and_then(|s| s.generations),
        ) {
            (Some(first), Some(last)) => Some((first, last)),
            _ => None,
        };

        let sizes = snapshots
            .iter()
            .map(|s| s.primary().map_or(0, |pop| pop.indis.len()));
        let population_range = sizes.fold(None, |acc, n| match acc {
            None => Some((n, n)),
            Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
        });

        let best_per_snapshot: Vec<Option<f64>> =
            snapshots.iter().map(|s| s.best_fitness()).collect();
        let best_overall = best_per_snapshot.iter().flatten().copied().reduce(f64::min);

        Self {
            snapshots: snapshots.len(),
            generation_range,
            population_range,
            best_per_snapshot,
            best_overall,
        }
    }
}

impl fmt::Display for TraceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} snapshots", self.snapshots)?;
        if let Some((first, last)) = self.generation_range {
            write!(f, ", generations {}..={}", first, last)?;
        }
        if let Some((lo, hi)) = self.population_range {
            if lo == hi {
                write!(f, ", {} individuals", lo)?;
            } else {
                write!(f, ", {}-{} individuals", lo, hi)?;
            }
        }
        if let Some(best) = self.best_overall {
            write!(f, ", best fitness {:.6}", best)?;
        }
        Ok(())
    }
}
