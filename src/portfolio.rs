// src/portfolio.rs
//! Owner portfolios: every consolidated row held by one owner name, plus
//! count and sums. Derived on demand, never stored.
use std::collections::{ BTreeMap, BTreeSet };

use crate::consolidate::{ Consolidated, ConsolidatedRecord };
use crate::store::{ self, DataSet };

/// Distinct non-empty owner names, sorted.
pub fn owner_names(c: &Consolidated) -> Vec<&str> {
    c.properties()
        .map(|p| p.owner_name.as_str())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Zero-copy view over the rows of one owner.
/// Holds row indexes into the consolidated collection.
#[derive(Clone, Debug)]
pub struct OwnerPortfolio<'a> {
    pub owner: String,
    /// Positions of this owner's rows in `Consolidated::records`
    pub row_ix: Vec<usize>,
    source: &'a Consolidated,
}

impl<'a> OwnerPortfolio<'a> {
    /// Exact, case-sensitive match on the owner name.
    pub fn new(source: &'a Consolidated, owner: &str) -> Self {
        let row_ix = source.records.iter()
            .enumerate()
            .filter(|(_, r)| r.property.owner_name == owner)
            .map(|(i, _)| i)
            .collect();
        Self { owner: s!(owner), row_ix, source }
    }

    pub fn count(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn records(&self) -> impl Iterator<Item = &'a ConsolidatedRecord> + '_ {
        self.row_ix.iter().map(|&i| &self.source.records[i])
    }

    pub fn total_assessed_value(&self) -> f64 {
        self.records().map(|r| r.property.assessed_value).sum()
    }

    pub fn total_land_area(&self) -> f64 {
        self.records().map(|r| r.property.land_area).sum()
    }

    /// Owned table of this owner's rows (same columns as the consolidated table).
    pub fn to_dataset(&self) -> DataSet {
        store::consolidated_subset(self.source, &self.row_ix)
    }
}

/// Shorthand for [`OwnerPortfolio::new`].
pub fn portfolio<'a>(c: &'a Consolidated, owner: &str) -> OwnerPortfolio<'a> {
    OwnerPortfolio::new(c, owner)
}

/// One line of the owner listing.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnerSummary {
    pub owner: String,
    pub count: usize,
    pub total_assessed_value: f64,
    pub total_land_area: f64,
}

/// Every distinct owner with count and sums, sorted by name.
pub fn owner_summaries(c: &Consolidated) -> Vec<OwnerSummary> {
    let mut acc: BTreeMap<&str, OwnerSummary> = BTreeMap::new();
    for p in c.properties().filter(|p| !p.owner_name.is_empty()) {
        let e = acc.entry(p.owner_name.as_str()).or_insert_with(|| OwnerSummary {
            owner: p.owner_name.clone(),
            count: 0,
            total_assessed_value: 0.0,
            total_land_area: 0.0,
        });
        e.count += 1;
        e.total_assessed_value += p.assessed_value;
        e.total_land_area += p.land_area;
    }
    acc.into_values().collect()
}
