// src/data/resultset.rs

//! Correlated records bucketed by [`Outcome`].

use std::collections::BTreeMap;

use crate::common::Count;
use crate::data::line::Outcome;
use crate::data::records::CorrelatedRecord;

/// Records of one outcome, in join discovery order.
///
/// The count is the length of the records; there is no separate counter to
/// drift out of step.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultSet {
    records: Vec<CorrelatedRecord>,
}

impl ResultSet {
    pub fn new() -> ResultSet {
        ResultSet::default()
    }

    pub fn push(
        &mut self,
        record: CorrelatedRecord,
    ) {
        self.records.push(record);
    }

    pub fn count(&self) -> Count {
        self.records.len() as Count
    }

    pub fn records(&self) -> &[CorrelatedRecord] {
        self.records.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One [`ResultSet`] per outcome in scope.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResultSets {
    sets: BTreeMap<Outcome, ResultSet>,
}

impl ResultSets {
    /// Empty sets for each of `outcomes`.
    pub fn new(outcomes: &[Outcome]) -> ResultSets {
        let mut sets: BTreeMap<Outcome, ResultSet> = BTreeMap::new();
        for outcome in outcomes.iter() {
            sets.insert(*outcome, ResultSet::new());
        }

        ResultSets { sets }
    }

    /// Add `record` to the set of its outcome; the set is created if the
    /// outcome was not in scope.
    pub fn push(
        &mut self,
        record: CorrelatedRecord,
    ) {
        self.sets
            .entry(record.outcome)
            .or_default()
            .push(record);
    }

    /// Count of one outcome; `0` if not in scope.
    pub fn count(
        &self,
        outcome: Outcome,
    ) -> Count {
        match self.sets.get(&outcome) {
            Some(set) => set.count(),
            None => 0,
        }
    }

    /// Count across all outcomes.
    pub fn total(&self) -> Count {
        self.sets
            .values()
            .map(ResultSet::count)
            .sum()
    }

    pub fn records(
        &self,
        outcome: Outcome,
    ) -> &[CorrelatedRecord] {
        match self.sets.get(&outcome) {
            Some(set) => set.records(),
            None => &[],
        }
    }

    /// Outcomes in scope and their sets, in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, &ResultSet)> {
        self.sets
            .iter()
            .map(|(outcome, set)| (*outcome, set))
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.sets.keys().copied().collect()
    }
}
