use std::fmt;

/// A single query parameter value.
///
/// Scalars stringify in their decimal / `true` / `false` form. A list
/// repeats its key once per element, preserving element order.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    List(Vec<QueryValue>),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(text) => f.write_str(text),
            QueryValue::Bool(value) => write!(f, "{value}"),
            QueryValue::Int(value) => write!(f, "{value}"),
            QueryValue::UInt(value) => write!(f, "{value}"),
            QueryValue::Float(value) => write!(f, "{value}"),
            QueryValue::List(items) => {
                let joined = items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&joined)
            }
        }
    }
}

impl From<&str> for QueryValue {
    fn from(text: &str) -> Self {
        QueryValue::Text(text.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(text: String) -> Self {
        QueryValue::Text(text)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Int(value.into())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::UInt(value.into())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::UInt(value)
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Float(value)
    }
}

impl<V: Into<QueryValue>> From<Vec<V>> for QueryValue {
    fn from(items: Vec<V>) -> Self {
        QueryValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Ordered query parameter collection.
///
/// The form-urlencoded analogue of a browser `URLSearchParams`: pairs
/// keep insertion order, and serialization percent-encodes with `+` for
/// spaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter. A list value repeats the key once per
    /// element, preserving element order.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.append_value(key.into(), value.into());
    }

    fn append_value(&mut self, key: String, value: QueryValue) {
        match value {
            QueryValue::List(items) => {
                for item in items {
                    self.append_value(key.clone(), item);
                }
            }
            scalar => self.pairs.push((key, scalar.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Percent-encoded query string, keys in insertion order, no
    /// leading separator.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K: Into<String>, V: Into<QueryValue>> Extend<(K, V)> for QueryParams {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.append(key, value);
        }
    }
}

/// Accepted forms for the builder's `query` method.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Pre-encoded query string, stored verbatim.
    Raw(String),
    /// Parameter collection, serialized via its own string form.
    Params(QueryParams),
}

impl Query {
    pub(crate) fn into_query_string(self) -> String {
        match self {
            Query::Raw(raw) => raw,
            Query::Params(params) => params.to_query_string(),
        }
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Query::Raw(raw.to_string())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Query::Raw(raw)
    }
}

impl From<QueryParams> for Query {
    fn from(params: QueryParams) -> Self {
        Query::Params(params)
    }
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        Query::Params(pairs.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<QueryValue>> From<Vec<(K, V)>> for Query {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Query::Params(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut params = QueryParams::new();
        params.append("foo", "bar");
        params.append("baz", "buzz");
        assert_eq!(params.to_query_string(), "foo=bar&baz=buzz");
    }

    #[test]
    fn scalars_stringify() {
        let mut params = QueryParams::new();
        params.append("flag", true);
        params.append("count", 10);
        params.append("limit", 2.5);
        assert_eq!(params.to_query_string(), "flag=true&count=10&limit=2.5");
    }

    #[test]
    fn list_repeats_key_in_order() {
        let mut params = QueryParams::new();
        params.append("foo", "bar");
        params.append("baz", vec![10, 20]);
        assert_eq!(params.to_query_string(), "foo=bar&baz=10&baz=20");
    }

    #[test]
    fn values_are_percent_encoded() {
        let mut params = QueryParams::new();
        params.append("q", "hello world");
        params.append("sym", "a&b=c");
        assert_eq!(params.to_query_string(), "q=hello+world&sym=a%26b%3Dc");
    }

    #[test]
    fn from_iterator_matches_appends() {
        let collected: QueryParams = [("foo", "bar"), ("baz", "buzz")].into_iter().collect();
        let mut appended = QueryParams::new();
        appended.append("foo", "bar");
        appended.append("baz", "buzz");
        assert_eq!(collected, appended);
    }

    #[test]
    fn query_forms_serialize_identically() {
        let params: QueryParams = [("foo", "bar"), ("baz", "buzz")].into_iter().collect();
        assert_eq!(
            Query::from(params).into_query_string(),
            Query::from("foo=bar&baz=buzz").into_query_string()
        );
    }
}
