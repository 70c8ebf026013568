// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// A page-owned collection with a revision counter.
///
/// Every mutation goes through this type so the revision changes whenever
/// the rows do; table controllers key their memo on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet<T> {
    records: Vec<T>,
    revision: u64,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> RecordSet<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            revision: 0,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn replace(&mut self, records: Vec<T>) {
        self.records = records;
        self.revision += 1;
    }

    pub fn prepend(&mut self, record: T) {
        self.records.insert(0, record);
        self.revision += 1;
    }

    /// Applies `update` to the first record matching `predicate`. Returns
    /// false, leaving the revision alone, when nothing matched.
    pub fn update_first<P, F>(&mut self, predicate: P, update: F) -> bool
    where
        P: Fn(&T) -> bool,
        F: FnOnce(&mut T),
    {
        let Some(record) = self.records.iter_mut().find(|record| predicate(record)) else {
            return false;
        };
        update(record);
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::RecordSet;

    #[test]
    fn mutations_bump_revision() {
        let mut set = RecordSet::new(vec![1, 2, 3]);
        set.prepend(0);
        assert_eq!(set.records(), &[0, 1, 2, 3]);
        assert_eq!(set.revision(), 1);

        assert!(set.update_first(|value| *value == 2, |value| *value = 20));
        assert_eq!(set.records(), &[0, 1, 20, 3]);
        assert_eq!(set.revision(), 2);

        assert!(!set.update_first(|value| *value == 99, |value| *value = 0));
        assert_eq!(set.revision(), 2);

        set.replace(Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.revision(), 3);
    }
}
