//! Evenly spaced scalar positions between two bounds.
//!
//! A [`Stepper`] is a small value describing the sequence; iterating it is
//! cheap and can be repeated any number of times with identical results.

use millpath_core::{ParameterError, ParameterResult, EPSILON};

/// Evenly spaced positions from `start` to `end`, both included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stepper {
    start: f64,
    end: f64,
    count: usize,
}

impl Stepper {
    /// Describe the steps between `start` and `end`.
    ///
    /// Exactly one of `increment` and `count` must be given, unless the two
    /// bounds coincide (within [`EPSILON`]), in which case the sequence is
    /// the single value `start`. With `reverse` the bounds are swapped
    /// first; the sign of `increment` is always derived from the bounds.
    pub fn new(
        start: f64,
        end: f64,
        increment: Option<f64>,
        count: Option<usize>,
        reverse: bool,
    ) -> ParameterResult<Self> {
        let (start, end) = if reverse { (end, start) } else { (start, end) };
        if (start - end).abs() < EPSILON {
            return Ok(Self {
                start,
                end: start,
                count: 1,
            });
        }

        let count = match (increment, count) {
            (None, None) => {
                return Err(ParameterError::Missing(
                    "step increment or step count".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ParameterError::Incompatible(
                    "step increment and step count are mutually exclusive".to_string(),
                ))
            }
            (None, Some(count)) => {
                if count < 2 {
                    return Err(ParameterError::OutOfRange {
                        name: "step count".to_string(),
                        value: count as f64,
                        min: 2.0,
                        max: f64::INFINITY,
                    });
                }
                count
            }
            (Some(increment), None) => {
                if !increment.is_finite() || increment.abs() < EPSILON {
                    return Err(ParameterError::InvalidValue {
                        name: "step increment".to_string(),
                        reason: format!("{increment} is not a usable step width"),
                    });
                }
                ((end - start).abs() / increment.abs()).ceil() as usize + 1
            }
        };

        Ok(Self { start, end, count })
    }

    /// Steps of at most `increment` between the bounds.
    pub fn by_increment(start: f64, end: f64, increment: f64) -> ParameterResult<Self> {
        Self::new(start, end, Some(increment), None, false)
    }

    /// Exactly `count` steps between the bounds.
    pub fn by_count(start: f64, end: f64, count: usize) -> ParameterResult<Self> {
        Self::new(start, end, None, Some(count), false)
    }

    pub fn first(&self) -> f64 {
        self.start
    }

    pub fn last(&self) -> f64 {
        self.end
    }

    /// Number of positions in the sequence.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always false; a sequence holds at least one position.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Distance between consecutive positions (zero for a single position).
    pub fn increment(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.end - self.start) / (self.count - 1) as f64
        }
    }

    pub fn iter(&self) -> Steps {
        Steps {
            stepper: *self,
            front: 0,
            back: self.count,
        }
    }
}

impl IntoIterator for Stepper {
    type Item = f64;
    type IntoIter = Steps;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Stepper {
    type Item = f64;
    type IntoIter = Steps;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the positions of a [`Stepper`].
#[derive(Debug, Clone)]
pub struct Steps {
    stepper: Stepper,
    front: usize,
    back: usize,
}

impl Steps {
    fn value(&self, index: usize) -> f64 {
        // the final position is the exact end bound, never an accumulated sum
        if index + 1 == self.stepper.count {
            self.stepper.end
        } else {
            self.stepper.start + self.stepper.increment() * index as f64
        }
    }
}

impl Iterator for Steps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        let value = self.value(self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Steps {
    fn next_back(&mut self) -> Option<f64> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.value(self.back))
    }
}

impl ExactSizeIterator for Steps {}
