//! Compensated summation.
//!
//! All totals in the engine go through [`OrderedSum`], which applies
//! Neumaier's variant of Kahan summation. Callers feed values in entry-id
//! order so repeated queries over the same data add the same terms in the
//! same sequence.

use std::iter::Sum;

/// A running total with a compensation term for lost low-order bits.
///
/// # Example
///
/// ```
/// use workforce_analytics::analytics::OrderedSum;
///
/// let total: OrderedSum = [1e16, 1.0, -1e16].into_iter().collect();
/// assert_eq!(total.value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderedSum {
    sum: f64,
    compensation: f64,
}

impl OrderedSum {
    /// Creates an empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one term.
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    /// Returns the compensated total.
    pub fn value(&self) -> f64 {
        self.sum + self.compensation
    }
}

impl FromIterator<f64> for OrderedSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut total = OrderedSum::new();
        for value in iter {
            total.add(value);
        }
        total
    }
}

impl Sum<f64> for OrderedSum {
    fn sum<I: Iterator<Item = f64>>(iter: I) -> Self {
        iter.collect()
    }
}

/// Sums an iterator of values with compensation.
pub fn ordered_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().collect::<OrderedSum>().value()
}
