use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Merge groups – which columns share a subplot
// ---------------------------------------------------------------------------

/// Column-name groups declared with `--merge a,b,c`.
///
/// A name listed in several specifications belongs to the last one. Names
/// never listed form a singleton group of their own.
#[derive(Debug, Clone, Default)]
pub struct MergeGroups {
    groups: Vec<BTreeSet<String>>,
    /// name → index into `groups`.
    owner: BTreeMap<String, usize>,
}

/// One subplot: the group it was resolved from and the columns drawn in it,
/// in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotSlot {
    pub group: BTreeSet<String>,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SlotKey {
    Declared(usize),
    Single(String),
}

impl MergeGroups {
    /// Parse comma-separated specifications. Tokens are trimmed and empty
    /// tokens dropped; a specification with no names declares nothing.
    pub fn from_specs<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut merged = MergeGroups::default();
        for spec in specs {
            let group: BTreeSet<String> = spec
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if group.is_empty() {
                continue;
            }

            let idx = merged.groups.len();
            for name in &group {
                merged.owner.insert(name.clone(), idx);
            }
            merged.groups.push(group);
        }
        merged
    }

    /// Number of declared (non-empty) specifications.
    pub fn declared(&self) -> usize {
        self.groups.len()
    }

    /// The full group `name` belongs to, or `{name}` if it was never listed.
    ///
    /// The group is returned as declared, so it may still list names that a
    /// later specification took over.
    pub fn group_of(&self, name: &str) -> BTreeSet<String> {
        match self.owner.get(name) {
            Some(&idx) => self.groups[idx].clone(),
            None => BTreeSet::from([name.to_string()]),
        }
    }

    /// Whether `a` and `b` resolve to the same subplot.
    pub fn same_group(&self, a: &str, b: &str) -> bool {
        match (self.owner.get(a), self.owner.get(b)) {
            (Some(ia), Some(ib)) => ia == ib,
            (None, None) => a == b,
            _ => false,
        }
    }

    /// Partition `columns` into subplots.
    ///
    /// Slots appear in the order their first member appears in `columns`.
    pub fn resolve<'a, I>(&self, columns: I) -> Vec<PlotSlot>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut slots: Vec<PlotSlot> = Vec::new();
        let mut index: BTreeMap<SlotKey, usize> = BTreeMap::new();

        for name in columns {
            let key = match self.owner.get(name) {
                Some(&idx) => SlotKey::Declared(idx),
                None => SlotKey::Single(name.to_string()),
            };
            let slot = *index.entry(key).or_insert_with(|| {
                slots.push(PlotSlot {
                    group: self.group_of(name),
                    members: Vec::new(),
                });
                slots.len() - 1
            });
            slots[slot].members.push(name.to_string());
        }
        slots
    }

    /// Listed names that match none of `columns`, in sorted order.
    pub fn unmatched<'a, I>(&self, columns: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: BTreeSet<&str> = columns.into_iter().collect();
        self.owner
            .keys()
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect()
    }
}
