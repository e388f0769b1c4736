//! Option chain index
//!
//! Calls and puts grouped by expiry, then by strike ascending.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use chrono::NaiveDate;
use ordered_float::OrderedFloat;

use super::option::{ContractQuote, OptionType};

/// Strike → quote for one expiry, ascending by strike
pub type StrikeLadder = BTreeMap<OrderedFloat<f64>, ContractQuote>;

/// Full chain: one ladder per expiry, separately for calls and puts
#[derive(Debug, Clone, Default)]
pub struct ChainIndex {
    calls: BTreeMap<NaiveDate, StrikeLadder>,
    puts: BTreeMap<NaiveDate, StrikeLadder>,
}

/// Ascending `(strike, quote)` traversal of one ladder
pub struct StrikesAscending<'a> {
    inner: Option<btree_map::Iter<'a, OrderedFloat<f64>, ContractQuote>>,
}

impl<'a> Iterator for StrikesAscending<'a> {
    type Item = (f64, &'a ContractQuote);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .as_mut()?
            .next()
            .map(|(strike, quote)| (strike.into_inner(), quote))
    }
}

impl ChainIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a call quote. Replaces (and returns) any quote already at this expiry/strike.
    pub fn insert_call(
        &mut self,
        expiry: NaiveDate,
        strike: f64,
        quote: ContractQuote,
    ) -> Option<ContractQuote> {
        self.insert(OptionType::Call, expiry, strike, quote)
    }

    /// Add a put quote. Replaces (and returns) any quote already at this expiry/strike.
    pub fn insert_put(
        &mut self,
        expiry: NaiveDate,
        strike: f64,
        quote: ContractQuote,
    ) -> Option<ContractQuote> {
        self.insert(OptionType::Put, expiry, strike, quote)
    }

    pub fn insert(
        &mut self,
        side: OptionType,
        expiry: NaiveDate,
        strike: f64,
        quote: ContractQuote,
    ) -> Option<ContractQuote> {
        self.side_mut(side)
            .entry(expiry)
            .or_default()
            .insert(OrderedFloat(strike), quote)
    }

    fn side(&self, side: OptionType) -> &BTreeMap<NaiveDate, StrikeLadder> {
        match side {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    fn side_mut(&mut self, side: OptionType) -> &mut BTreeMap<NaiveDate, StrikeLadder> {
        match side {
            OptionType::Call => &mut self.calls,
            OptionType::Put => &mut self.puts,
        }
    }

    /// Expiries that have at least one call, ascending
    pub fn expiries_with_calls(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.calls.keys().copied()
    }

    /// Expiries that have at least one put, ascending
    pub fn expiries_with_puts(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.puts.keys().copied()
    }

    /// Every expiry present on either side, ascending
    pub fn expiries(&self) -> Vec<NaiveDate> {
        let all: BTreeSet<NaiveDate> = self
            .calls
            .keys()
            .chain(self.puts.keys())
            .copied()
            .collect();
        all.into_iter().collect()
    }

    /// Does this side have quotes for the expiry?
    pub fn has_expiry(&self, expiry: NaiveDate, side: OptionType) -> bool {
        self.side(side).contains_key(&expiry)
    }

    /// Strikes for one expiry and side, ascending. Empty if the expiry is absent.
    pub fn strikes_ascending(&self, expiry: NaiveDate, side: OptionType) -> StrikesAscending<'_> {
        StrikesAscending {
            inner: self.side(side).get(&expiry).map(|ladder| ladder.iter()),
        }
    }

    /// Get call quote at strike
    pub fn call_at(&self, expiry: NaiveDate, strike: f64) -> Option<&ContractQuote> {
        self.quote_at(OptionType::Call, expiry, strike)
    }

    /// Get put quote at strike
    pub fn put_at(&self, expiry: NaiveDate, strike: f64) -> Option<&ContractQuote> {
        self.quote_at(OptionType::Put, expiry, strike)
    }

    fn quote_at(&self, side: OptionType, expiry: NaiveDate, strike: f64) -> Option<&ContractQuote> {
        self.side(side).get(&expiry)?.get(&OrderedFloat(strike))
    }

    /// Number of distinct expiries across both sides
    pub fn expiry_count(&self) -> usize {
        self.expiries().len()
    }

    /// Total number of quotes
    pub fn len(&self) -> usize {
        self.calls
            .values()
            .chain(self.puts.values())
            .map(|ladder| ladder.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 2).unwrap()
    }

    #[test]
    fn test_strikes_sorted_regardless_of_insert_order() {
        let mut chain = ChainIndex::new();
        chain.insert_call(expiry(), 160.0, ContractQuote::new(5, 20.75, 21.0));
        chain.insert_call(expiry(), 150.0, ContractQuote::new(1, 30.3, 30.5));
        chain.insert_call(expiry(), 155.0, ContractQuote::new(3, 25.45, 25.7));

        let strikes: Vec<f64> = chain
            .strikes_ascending(expiry(), OptionType::Call)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(strikes, vec![150.0, 155.0, 160.0]);
    }

    #[test]
    fn test_duplicate_insert_replaces() {
        let mut chain = ChainIndex::new();
        assert!(chain
            .insert_put(expiry(), 150.0, ContractQuote::new(2, 0.37, 0.38))
            .is_none());
        let replaced = chain.insert_put(expiry(), 150.0, ContractQuote::new(9, 0.40, 0.41));

        assert_eq!(replaced.map(|q| q.id.0), Some(2));
        assert_eq!(chain.put_at(expiry(), 150.0).map(|q| q.id.0), Some(9));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_absent_expiry_is_empty_traversal() {
        let chain = ChainIndex::new();
        assert!(chain.is_empty());
        assert_eq!(chain.strikes_ascending(expiry(), OptionType::Put).count(), 0);
        assert!(chain.call_at(expiry(), 150.0).is_none());
    }

    #[test]
    fn test_expiries_union() {
        let later = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();
        let mut chain = ChainIndex::new();
        chain.insert_call(later, 100.0, ContractQuote::new(1, 1.0, 1.1));
        chain.insert_put(expiry(), 100.0, ContractQuote::new(2, 1.0, 1.1));

        assert_eq!(chain.expiries(), vec![expiry(), later]);
        assert_eq!(chain.expiries_with_calls().collect::<Vec<_>>(), vec![later]);
        assert_eq!(chain.expiries_with_puts().collect::<Vec<_>>(), vec![expiry()]);
        assert!(chain.has_expiry(later, OptionType::Call));
        assert!(!chain.has_expiry(later, OptionType::Put));
        assert_eq!(chain.expiry_count(), 2);
    }
}
