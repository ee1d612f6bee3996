//! Suppression of reported differences

use crate::difference::CompatDifference;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Ordered difference list with global and per-member suppression
///
/// A difference is dropped when its id is in the no-warn set, or when its
/// member id is ignored for that id. Both lookups ignore ASCII case.
#[derive(Debug, Clone, Default)]
pub struct DifferenceBag {
    no_warn: HashSet<String>,
    ignored: HashMap<String, HashSet<String>>,
    differences: Vec<CompatDifference>,
    suppressed: usize,
}

impl DifferenceBag {
    /// `no_warn` is a `;` or `,` separated list of diagnostic ids; `ignored`
    /// maps a diagnostic id to the member ids suppressed for it
    pub fn new<I, S>(no_warn: &str, ignored: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let no_warn = no_warn
            .split([';', ','])
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_ascii_lowercase)
            .collect();

        let mut ignored_map: HashMap<String, HashSet<String>> = HashMap::new();
        for (id, member_id) in ignored {
            ignored_map
                .entry(id.as_ref().trim().to_ascii_lowercase())
                .or_default()
                .insert(member_id.as_ref().trim().to_ascii_lowercase());
        }

        Self {
            no_warn,
            ignored: ignored_map,
            differences: Vec::new(),
            suppressed: 0,
        }
    }

    /// Whether `difference` would be dropped
    pub fn is_suppressed(&self, difference: &CompatDifference) -> bool {
        let id = difference.id().to_ascii_lowercase();
        if self.no_warn.contains(&id) {
            return true;
        }
        self.ignored
            .get(&id)
            .is_some_and(|members| members.contains(&difference.member_id().to_ascii_lowercase()))
    }

    pub fn add(&mut self, difference: CompatDifference) {
        if self.is_suppressed(&difference) {
            debug!("Suppressed {}", difference);
            self.suppressed += 1;
            return;
        }
        self.differences.push(difference);
    }

    pub fn add_range<I>(&mut self, differences: I)
    where
        I: IntoIterator<Item = CompatDifference>,
    {
        for difference in differences {
            self.add(difference);
        }
    }

    /// Kept differences in arrival order
    pub fn differences(&self) -> &[CompatDifference] {
        &self.differences
    }

    pub fn into_differences(self) -> Vec<CompatDifference> {
        self.differences
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    /// Number of differences dropped so far
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }
}
