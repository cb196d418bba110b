//! Projection of generation snapshots onto the plotting plane.
//!
//! A frame holds one point per individual of the *first* sub-population,
//! built from the first two genome components. Further sub-populations and
//! genome dimensions are not displayed.

use crate::trace::Trace;

/// Errors raised while projecting a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("Frame index {index} out of range (trace has {len} snapshots)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(
        "Individual {individual} of frame {frame} has a {dimensions}-dimensional genome, at least 2 are required"
    )]
    InsufficientDimensions {
        frame: usize,
        individual: usize,
        dimensions: usize,
    },
    #[error("Snapshot {frame} has no sub-population")]
    MissingPopulation { frame: usize },
}

/// Points to overlay for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Snapshot index in the trace.
    pub index: usize,
    /// `(x, y)` per individual, in snapshot order.
    pub points: Vec<(f64, f64)>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Project snapshot `index` of `trace` into a [`Frame`].
pub fn extract_frame(trace: &Trace, index: usize) -> Result<Frame, FrameError> {
    let snapshot = trace.get(index).ok_or(FrameError::IndexOutOfRange {
        index,
        len: trace.len(),
    })?;
    let population = snapshot
        .primary()
        .ok_or(FrameError::MissingPopulation { frame: index })?;

    let points = population
        .indis
        .iter()
        .enumerate()
        .map(|(i, indi)| match indi.genome.as_slice() {
            [x, y, ..] => Ok((*x, *y)),
            short => Err(FrameError::InsufficientDimensions {
                frame: index,
                individual: i,
                dimensions: short.len(),
            }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Frame { index, points })
}

/// Iterator producing the frames of a trace in snapshot order.
pub struct FrameIterator<'a> {
    trace: &'a Trace,
    current: usize,
}

impl<'a> FrameIterator<'a> {
    pub fn new(trace: &'a Trace) -> Self {
        Self { trace, current: 0 }
    }
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = Result<Frame, FrameError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.trace.len() {
            return None;
        }

        let result = extract_frame(self.trace, self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trace.len() - self.current;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for FrameIterator<'a> {}
