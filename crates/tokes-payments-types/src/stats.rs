//! Merchant statistics query parameters.

/// Ordered query parameters for `GET /api/merchant/stats`.
///
/// Entries keep their insertion order. A `None` value marks a parameter that is
/// declared but left out of the serialized query.
///
/// ```
/// use tokes_payments_types::StatisticsQuery;
///
/// let query = StatisticsQuery::new()
///     .with("type", "dollarsPerOrder")
///     .with_optional("currency", None::<String>);
/// assert_eq!(query.present().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsQuery(Vec<(String, Option<String>)>);

impl StatisticsQuery {
    pub const DEFAULT_TYPE: &'static str = "dollarsPerOrder";
    pub const DEFAULT_CURRENCY: &'static str = "TKS";

    /// An empty query. See [`StatisticsQuery::default`] for the service defaults.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_optional(name, Some(value))
    }

    pub fn with_optional(
        mut self,
        name: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        self.0.push((name.into(), value.map(Into::into)));
        self
    }

    /// All entries, including those without a value.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Entries that carry a value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries()
            .filter_map(|(name, value)| value.map(|value| (name, value)))
    }
}

/// `type=dollarsPerOrder`, `currency=TKS`.
impl Default for StatisticsQuery {
    fn default() -> Self {
        Self::new()
            .with("type", Self::DEFAULT_TYPE)
            .with("currency", Self::DEFAULT_CURRENCY)
    }
}

impl<N, V> FromIterator<(N, Option<V>)> for StatisticsQuery
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, Option<V>)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (name, value)| query.with_optional(name, value))
    }
}
