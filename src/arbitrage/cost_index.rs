//! Opening cost index
//!
//! Ordered multimap from opening cost to the strikes that achieved it, built
//! up while one expiry is swept. Supports ordered insert and retrieval of
//! every entry strictly below a threshold.

use std::collections::BTreeMap;

use ordered_float::OrderedFloat;

use crate::core::ContractId;

/// A strike already swept, available as the lower leg of a later box
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OpeningLeg {
    /// Call bought at the lower strike
    pub call_id: ContractId,
    /// Put sold at the lower strike
    pub put_id: ContractId,
    pub strike: f64,
}

#[derive(Debug, Default)]
pub(crate) struct OpeningCostIndex {
    entries: BTreeMap<OrderedFloat<f64>, Vec<OpeningLeg>>,
    len: usize,
}

impl OpeningCostIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a leg under its opening cost. Equal costs share one bucket.
    pub fn insert(&mut self, cost: f64, leg: OpeningLeg) {
        self.entries.entry(OrderedFloat(cost)).or_default().push(leg);
        self.len += 1;
    }

    /// Every stored leg whose cost is strictly below `threshold`, cheapest first.
    ///
    /// A NaN threshold matches nothing. NaN costs sort above every number
    /// and are never returned.
    pub fn below(&self, threshold: f64) -> impl Iterator<Item = (f64, &OpeningLeg)> + '_ {
        let bound = if threshold.is_nan() {
            f64::NEG_INFINITY
        } else {
            threshold
        };

        self.entries
            .range(..OrderedFloat(bound))
            .flat_map(|(cost, legs)| legs.iter().map(move |leg| (cost.into_inner(), leg)))
    }

    /// Number of stored legs (not distinct costs)
    pub fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leg(id: u64, strike: f64) -> OpeningLeg {
        OpeningLeg {
            call_id: ContractId(id),
            put_id: ContractId(id + 100),
            strike,
        }
    }

    #[test]
    fn test_below_is_strict() {
        let mut index = OpeningCostIndex::new();
        index.insert(10.0, leg(1, 100.0));
        index.insert(12.0, leg(2, 105.0));
        index.insert(11.0, leg(3, 110.0));

        let costs: Vec<f64> = index.below(12.0).map(|(c, _)| c).collect();
        assert_eq!(costs, vec![10.0, 11.0]);

        assert_eq!(index.below(10.0).count(), 0);
        assert_eq!(index.below(f64::INFINITY).count(), 3);
    }

    #[test]
    fn test_duplicate_costs_all_returned() {
        let mut index = OpeningCostIndex::new();
        index.insert(5.0, leg(1, 100.0));
        index.insert(5.0, leg(2, 105.0));
        index.insert(7.0, leg(3, 110.0));

        assert_eq!(index.len(), 3);
        let ids: Vec<u64> = index.below(6.0).map(|(_, l)| l.call_id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_nan_never_matches() {
        let mut index = OpeningCostIndex::new();
        assert_eq!(index.len(), 0);
        index.insert(f64::NAN, leg(1, 100.0));
        index.insert(1.0, leg(2, 105.0));

        assert_eq!(index.below(f64::NAN).count(), 0);
        let ids: Vec<u64> = index.below(f64::INFINITY).map(|(_, l)| l.call_id.0).collect();
        assert_eq!(ids, vec![2]);
    }
}
