use std::fmt;

/// Stable identity of a row, unaffected by removals before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey(u32);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered rows of a draft (ingredients, shopping items).
#[derive(Debug, Clone)]
pub struct Rows<T> {
    rows: Vec<(RowKey, T)>,
    next: u32,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next: 0,
        }
    }
}

impl<T> Rows<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: T) -> RowKey {
        let key = RowKey(self.next);
        self.next += 1;
        self.rows.push((key, value));

        key
    }

    pub fn remove(&mut self, key: RowKey) -> Option<T> {
        let index = self.rows.iter().position(|(k, _)| *k == key)?;

        Some(self.rows.remove(index).1)
    }

    pub fn get(&self, key: RowKey) -> Option<&T> {
        self.rows.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: RowKey) -> Option<&mut T> {
        self.rows
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn key_at(&self, index: usize) -> Option<RowKey> {
        self.rows.get(index).map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowKey, &T)> {
        self.rows.iter().map(|(k, v)| (*k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().map(|(_, v)| v)
    }

    pub fn into_values(self) -> impl Iterator<Item = T> {
        self.rows.into_iter().map(|(_, v)| v)
    }
}

impl<T> FromIterator<T> for Rows<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut rows = Rows::new();
        for value in iter {
            rows.push(value);
        }

        rows
    }
}
