use crate::core::errors::{Error, Result};

/*-------------------------------------------------------------------------------------------------
  Descent Bound
-------------------------------------------------------------------------------------------------*/

/// Upper bound (exclusive) on the prefix length of ranges the resolver descends into.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DescentBound {
    /// Descend while the range's prefix length is shorter than the target prefix length.
    #[default]
    TargetPrefix,

    /// Descend while the range's prefix length is shorter than a fixed value, regardless of the
    /// target. `Fixed(28)` reproduces the behavior of the legacy lookup plugins.
    Fixed(u8),
}

impl DescentBound {
    pub fn limit(&self, target_prefix_length: u8) -> u8 {
        match self {
            DescentBound::TargetPrefix => target_prefix_length,
            DescentBound::Fixed(limit) => *limit,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Search Query
-------------------------------------------------------------------------------------------------*/

/// What to search for: the networks to start from, the prefix length and title substring a
/// range must have, and the title to write on the match.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchQuery {
    /// Network names or CIDRs passed as `Ranges?filter=`, searched in order.
    pub networks: Vec<String>,

    /// Prefix length the matching range must have.
    pub prefix_length: u8,

    /// Case-insensitive substring the range's title must contain.
    pub title: String,

    /// Title written to the matching range, if any.
    pub new_title: Option<String>,

    pub descent_bound: DescentBound,
}

impl SearchQuery {
    /// Create a query for `networks`. Entries are trimmed and empty entries dropped; an empty
    /// result is an error.
    ///
    /// ```
    /// let query = micetro_findrange::SearchQuery::new([" 192.168.0.0/24 ", ""], 28)?
    ///     .title("free")
    ///     .new_title("reserved");
    ///
    /// assert_eq!(query.networks, vec!["192.168.0.0/24"]);
    /// # Ok::<(), micetro_findrange::Error>(())
    /// ```
    pub fn new<I, S>(networks: I, prefix_length: u8) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let networks: Vec<String> = networks
            .into_iter()
            .map(|network| network.as_ref().trim().to_string())
            .filter(|network| !network.is_empty())
            .collect();

        if networks.is_empty() {
            return Err(Error::InvalidArguments(
                "Insufficient parameters. Need at least: mm_provider and network(s).".to_string(),
            ));
        }

        Ok(Self {
            networks,
            prefix_length,
            ..Self::default()
        })
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Set the title to write on the match. An empty string means no rewrite.
    pub fn new_title(mut self, new_title: &str) -> Self {
        self.new_title = Some(new_title.to_string()).filter(|title| !title.is_empty());
        self
    }

    pub fn descent_bound(mut self, descent_bound: DescentBound) -> Self {
        self.descent_bound = descent_bound;
        self
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_drops_empty_networks() {
        let query = SearchQuery::new(["  10.0.0.0/8", "", "   ", "examplenet "], 24).unwrap();
        assert_eq!(query.networks, vec!["10.0.0.0/8", "examplenet"]);
        assert_eq!(query.prefix_length, 24);
        assert_eq!(query.title, "");
        assert_eq!(query.new_title, None);
        assert_eq!(query.descent_bound, DescentBound::TargetPrefix);
    }

    #[test]
    fn test_new_without_networks_is_error() {
        let result = SearchQuery::new(Vec::<String>::new(), 28);
        assert!(matches!(result, Err(Error::InvalidArguments(_))));

        let result = SearchQuery::new([" "], 28);
        assert!(matches!(result, Err(Error::InvalidArguments(_))));
    }

    #[test]
    fn test_empty_new_title_means_no_rewrite() {
        let query = SearchQuery::new(["10.0.0.0/8"], 28).unwrap().new_title("");
        assert_eq!(query.new_title, None);

        let query = query.new_title("reserved");
        assert_eq!(query.new_title.as_deref(), Some("reserved"));
    }

    #[test]
    fn test_descent_bound_limit() {
        assert_eq!(DescentBound::TargetPrefix.limit(24), 24);
        assert_eq!(DescentBound::Fixed(28).limit(24), 28);
    }
}
