//! Cut sets and minimal cut-set families.

use std::collections::BTreeSet;

use crate::domain::foundation::EventId;

/// Set of basic events whose joint failure fails a gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CutSet(BTreeSet<EventId>);

impl CutSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(event: EventId) -> Self {
        Self(BTreeSet::from([event]))
    }

    pub fn events(&self) -> impl Iterator<Item = EventId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, event: EventId) -> bool {
        self.0.contains(&event)
    }

    pub fn is_subset_of(&self, other: &CutSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union(&self, other: &CutSet) -> CutSet {
        CutSet(self.0.union(&other.0).copied().collect())
    }

    pub(crate) fn insert(&mut self, event: EventId) -> bool {
        self.0.insert(event)
    }

    pub(crate) fn remove(&mut self, event: EventId) -> bool {
        self.0.remove(&event)
    }
}

impl FromIterator<EventId> for CutSet {
    fn from_iter<I: IntoIterator<Item = EventId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A collection of cut sets in which no member contains another.
///
/// Members are kept sorted by size, then by content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutSetFamily(Vec<CutSet>);

impl CutSetFamily {
    /// The family that never fails (identity for OR).
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The family that always fails (identity for AND).
    pub fn unit() -> Self {
        Self(vec![CutSet::new()])
    }

    /// Removes duplicates and every set that is a superset of another.
    pub fn minimize(sets: impl IntoIterator<Item = CutSet>) -> Self {
        let mut candidates: Vec<CutSet> = sets.into_iter().collect();
        candidates.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        candidates.dedup();

        let mut kept: Vec<CutSet> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !kept.iter().any(|smaller| smaller.is_subset_of(&candidate)) {
                kept.push(candidate);
            }
        }
        Self(kept)
    }

    /// Cut sets of `self AND other`.
    pub fn and(&self, other: &CutSetFamily) -> CutSetFamily {
        let mut product = Vec::with_capacity(self.0.len() * other.0.len());
        for left in &self.0 {
            for right in &other.0 {
                product.push(left.union(right));
            }
        }
        Self::minimize(product)
    }

    /// Cut sets of `self OR other`.
    pub fn or(&self, other: &CutSetFamily) -> CutSetFamily {
        Self::minimize(self.0.iter().chain(other.0.iter()).cloned())
    }

    /// Drops every cut set that contains some member of `other`.
    pub fn without_supersets_of(&self, other: &CutSetFamily) -> CutSetFamily {
        Self(
            self.0
                .iter()
                .filter(|cs| !other.0.iter().any(|o| o.is_subset_of(cs)))
                .cloned()
                .collect(),
        )
    }

    /// True when no member is a subset of another member.
    pub fn is_minimal(&self) -> bool {
        self.0.iter().enumerate().all(|(i, a)| {
            self.0
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !a.is_subset_of(b))
        })
    }

    /// Every basic event appearing in some member.
    pub fn events(&self) -> BTreeSet<EventId> {
        self.0.iter().flat_map(|cs| cs.events()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CutSet> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CutSetFamily {
    type Item = &'a CutSet;
    type IntoIter = std::slice::Iter<'a, CutSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: usize) -> EventId {
        EventId::from_index(i)
    }

    fn cs(ids: &[usize]) -> CutSet {
        ids.iter().map(|i| id(*i)).collect()
    }

    #[test]
    fn minimize_applies_absorption() {
        let family = CutSetFamily::minimize(vec![cs(&[1, 2, 3]), cs(&[1, 2]), cs(&[4]), cs(&[4, 1])]);
        assert_eq!(family.len(), 2);
        assert_eq!(family.iter().next(), Some(&cs(&[4])));
        assert!(family.is_minimal());
    }

    #[test]
    fn minimize_is_order_independent() {
        let a = CutSetFamily::minimize(vec![cs(&[2, 1]), cs(&[3]), cs(&[1, 2, 3])]);
        let b = CutSetFamily::minimize(vec![cs(&[1, 2, 3]), cs(&[3]), cs(&[1, 2])]);
        assert_eq!(a, b);
    }

    #[test]
    fn and_distributes_over_members() {
        let left = CutSetFamily::minimize(vec![cs(&[1])]);
        let right = CutSetFamily::minimize(vec![cs(&[2]), cs(&[3])]);
        let product = left.and(&right);
        assert_eq!(product, CutSetFamily::minimize(vec![cs(&[1, 2]), cs(&[1, 3])]));
    }

    #[test]
    fn unit_and_empty_are_identities() {
        let f = CutSetFamily::minimize(vec![cs(&[1, 2]), cs(&[3])]);
        assert_eq!(f.and(&CutSetFamily::unit()), f);
        assert_eq!(f.or(&CutSetFamily::empty()), f);
        assert!(f.and(&CutSetFamily::empty()).is_empty());
    }

    #[test]
    fn without_supersets_of_removes_containing_sets() {
        let failed = CutSetFamily::minimize(vec![cs(&[1, 2]), cs(&[1, 3]), cs(&[4])]);
        let success = CutSetFamily::minimize(vec![cs(&[3])]);
        let kept = failed.without_supersets_of(&success);
        assert_eq!(kept, CutSetFamily::minimize(vec![cs(&[1, 2]), cs(&[4])]));
    }
}
