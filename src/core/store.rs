use std::collections::HashSet;

use serde_json::Value;

use crate::core::error::StoreError;
use crate::core::types::{Term, DEFAULT_CATEGORY};
use crate::rng::RandomSource;

/// The term list and blacklist for one session.
///
/// `terms` keeps insertion order, which is also display order. The
/// blacklist is a plain name set; deleting a term does not prune its
/// name from it. A stale entry only filters a term that no longer
/// exists, so it never affects what a user can select.
#[derive(Debug, Default, Clone)]
pub struct TermStore {
    terms: Vec<Term>,
    blacklist: HashSet<String>,
}

impl TermStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from previously persisted state.
    pub fn from_parts(terms: Vec<Term>, blacklist: HashSet<String>) -> Self {
        Self { terms, blacklist }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn blacklist(&self) -> &HashSet<String> {
        &self.blacklist
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.contains(name)
    }

    /// Adds a term. Whitespace-only names are ignored (`Ok(false)`), a
    /// name already present under any casing is a `DuplicateTerm` error,
    /// and a blank category falls back to [`DEFAULT_CATEGORY`].
    pub fn add_term(&mut self, name: &str, category: &str) -> Result<bool, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }
        let lowered = name.to_lowercase();
        if self.terms.iter().any(|t| t.name.to_lowercase() == lowered) {
            return Err(StoreError::DuplicateTerm(name.to_string()));
        }

        let category = category.trim();
        let category = if category.is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };
        self.terms.push(Term::new(name, category));
        tracing::debug!(name, category, "term added");
        Ok(true)
    }

    /// Removes the first term whose name matches exactly. The blacklist
    /// keeps the name if it was there.
    pub fn delete_term(&mut self, name: &str) -> bool {
        match self.terms.iter().position(|t| t.name == name) {
            Some(idx) => {
                self.terms.remove(idx);
                tracing::debug!(name, "term deleted");
                true
            }
            None => false,
        }
    }

    /// Flips blacklist membership for a name and returns the new state.
    pub fn toggle_blacklist(&mut self, name: &str) -> bool {
        if self.blacklist.remove(name) {
            false
        } else {
            self.blacklist.insert(name.to_string());
            true
        }
    }

    /// Picks one eligible term uniformly at random and blacklists it, so
    /// it cannot come up again until the blacklist is reset or toggled.
    ///
    /// Eligible terms are those not blacklisted, narrowed to `filter`'s
    /// category when one is given.
    pub fn select_random(
        &mut self,
        filter: Option<&str>,
        rng: &mut dyn RandomSource,
    ) -> Result<Term, StoreError> {
        let eligible: Vec<usize> = self
            .terms
            .iter()
            .enumerate()
            .filter(|(_, t)| !self.blacklist.contains(&t.name))
            .filter(|(_, t)| filter.map_or(true, |c| t.category == c))
            .map(|(idx, _)| idx)
            .collect();

        if eligible.is_empty() {
            return Err(StoreError::NoAvailableTerms);
        }

        let chosen = &self.terms[eligible[rng.pick_index(eligible.len())]];
        self.blacklist.insert(chosen.name.clone());
        tracing::debug!(name = %chosen.name, "term selected");
        Ok(chosen.clone())
    }

    /// Makes every term selectable again. Terms themselves are untouched.
    pub fn reset_blacklist(&mut self) {
        self.blacklist.clear();
        tracing::debug!("blacklist reset");
    }

    /// Appends imported records to the end of the list.
    ///
    /// The top-level value must be an array. Records are taken as-is:
    /// no duplicate-name check, no empty-name check, no category
    /// defaulting. Those rules belong to `add_term` only. Records are
    /// decoded before anything is appended, so a malformed record
    /// leaves the store untouched.
    pub fn import_terms(&mut self, value: &Value) -> Result<usize, StoreError> {
        let items = value.as_array().ok_or(StoreError::ImportFormat)?;
        let records: Vec<Term> = items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).map_err(|_| StoreError::ImportFormat))
            .collect::<Result<_, _>>()?;

        let count = records.len();
        self.terms.extend(records);
        tracing::debug!(count, "terms imported");
        Ok(count)
    }

    /// Groups terms by category for rendering. Categories appear in
    /// first-seen order and terms keep insertion order within each group.
    pub fn group_by_category(&self) -> Vec<(&str, Vec<&Term>)> {
        let mut groups: Vec<(&str, Vec<&Term>)> = Vec::new();
        for term in &self.terms {
            match groups.iter_mut().find(|(cat, _)| *cat == term.category) {
                Some((_, list)) => list.push(term),
                None => groups.push((term.category.as_str(), vec![term])),
            }
        }
        groups
    }
}
