use serde::Serialize;

/// First-N preview of a discrepancy list plus the size of the full list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Sample<T> {
    pub total: usize,
    pub shown: Vec<T>,
}

impl<T> Sample<T> {
    pub fn first_n(items: impl IntoIterator<Item = T>, n: usize) -> Self {
        let mut total = 0;
        let mut shown = Vec::new();
        for item in items {
            if total < n {
                shown.push(item);
            }
            total += 1;
        }
        Self { total, shown }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Entries not shown ("... and N more").
    pub fn remainder(&self) -> usize {
        self.total - self.shown.len()
    }
}
