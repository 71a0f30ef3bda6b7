//! Paging options for multi-document reads

/// Skip/limit applied to a find. Skip is applied before limit.
///
/// A zero skip or limit is treated as not set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    skip: Option<u64>,
    limit: Option<u64>,
}

impl FindOptions {
    /// No skip, no limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of documents to skip
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = (skip > 0).then_some(skip);
        self
    }

    /// Set the maximum number of documents to return
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = (limit > 0).then_some(limit);
        self
    }

    /// Build from optional values as accepted at the client boundary
    pub fn from_parts(skip: Option<u64>, limit: Option<u64>) -> Self {
        Self::new().skip(skip.unwrap_or(0)).limit(limit.unwrap_or(0))
    }

    /// Get the skip value
    pub fn get_skip(&self) -> Option<u64> {
        self.skip
    }

    /// Get the limit value
    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    /// Apply to an ordered sequence: skip first, then limit
    pub fn apply<I: Iterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        let limit = self
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);
        let skip = self
            .skip
            .map(|s| usize::try_from(s).unwrap_or(usize::MAX))
            .unwrap_or(0);
        items.skip(skip).take(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_options_new() {
        let options = FindOptions::new();
        assert!(options.get_skip().is_none());
        assert!(options.get_limit().is_none());
    }

    #[test]
    fn test_find_options_chaining() {
        let options = FindOptions::new().skip(5).limit(10);
        assert_eq!(options.get_skip(), Some(5));
        assert_eq!(options.get_limit(), Some(10));
    }

    #[test]
    fn test_zero_means_unset() {
        let options = FindOptions::from_parts(Some(0), Some(0));
        assert_eq!(options, FindOptions::new());
    }

    #[test]
    fn test_apply_skip_before_limit() {
        let options = FindOptions::new().limit(3).skip(2);
        let picked: Vec<_> = options.apply(1..=10).collect();
        assert_eq!(picked, vec![3, 4, 5]);
    }

    #[test]
    fn test_apply_without_options() {
        let picked: Vec<_> = FindOptions::new().apply(1..=4).collect();
        assert_eq!(picked, vec![1, 2, 3, 4]);
    }
}
