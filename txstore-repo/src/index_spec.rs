use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    /// The key direction MongoDB expects in an index specification.
    pub const fn direction(self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }
}

/// An ordered list of `(field, order)` pairs describing a single or composite index.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct IndexSpec {
    keys: Vec<(String, SortOrder)>,
}

impl IndexSpec {
    pub fn ascending(field: &str) -> IndexSpec {
        IndexSpec {
            keys: vec![(field.to_owned(), SortOrder::Ascending)],
        }
    }

    pub fn descending(field: &str) -> IndexSpec {
        IndexSpec {
            keys: vec![(field.to_owned(), SortOrder::Descending)],
        }
    }

    /// Appends another key, turning this into a composite index.
    pub fn then(mut self, field: &str, order: SortOrder) -> IndexSpec {
        self.keys.push((field.to_owned(), order));
        self
    }

    pub fn keys(&self) -> &[(String, SortOrder)] {
        &self.keys
    }

    /// The name MongoDB generates for an index created without an explicit name,
    /// e.g. `created_at_-1_type_1`.
    pub fn name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, order)| format!("{}_{}", field, order.direction()))
            .collect::<Vec<String>>()
            .join("_")
    }
}

impl Display for IndexSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
