//! Query string model.
//!
//! A parsed query string is a mapping from parameter name to either a single
//! value or an ordered list. `name[]=a&name[]=b` and `name[0]=a&name[1]=b`
//! both parse into a list under `name`; serialization always emits the
//! `name[]=` form. A list whose entries all carry an index is ordered by
//! index, otherwise entries keep their order of appearance. Names are kept
//! in sorted order so serialization is deterministic.
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pagination parameter. Never carried into facet links.
pub const PAGE_PARAM: &str = "page";

/// Marker asking the host to render a partial (ajax/dialog) response.
pub const WRAPPER_FORMAT_PARAM: &str = "_wrapper_format";

/// Request format parameter, inherited by synthetic facet-source requests.
pub const FORMAT_PARAM: &str = "_format";

// Characters that must be escaped inside a query component. `:` `/` `,`
// `[` `]` are left readable.
const QUERY_COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'=')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(String),
    List(Vec<String>),
}

impl QueryValue {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            QueryValue::List(values) => Some(values.as_slice()),
            QueryValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value.as_str()),
            QueryValue::List(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    params: BTreeMap<String, QueryValue>,
}

impl QueryParams {
    pub fn new() -> Self { Self::default() }

    /// Parses a raw query string, with or without the leading `?`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut query = Self::new();
        let mut lists: BTreeMap<String, Vec<(Option<u64>, String)>> = BTreeMap::new();
        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = match pair.split_once('=') {
                Some((n, v)) => (decode_component(n), decode_component(v)),
                None => (decode_component(pair), String::new()),
            };
            // `[]=x` has no base name and is ignored.
            if let Some((base, index)) = list_name(&name) {
                // A list entry replaces an earlier scalar of the same name.
                query.remove(base);
                lists.entry(base.to_string()).or_default().push((index, value));
            } else if !name.is_empty() && !name.starts_with('[') {
                lists.remove(&name);
                query.set(name, value);
            }
        }
        for (name, mut entries) in lists {
            if entries.iter().all(|(index, _)| index.is_some()) {
                entries.sort_by_key(|(index, _)| *index);
            }
            query.set_list(name, entries.into_iter().map(|(_, value)| value).collect());
        }
        query
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> { self.params.get(name) }

    pub fn contains(&self, name: &str) -> bool { self.params.contains_key(name) }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.insert(name.into(), QueryValue::Scalar(value.into()));
    }

    pub fn set_list(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.params.insert(name.into(), QueryValue::List(values));
    }

    /// Appends to the list under `name`. A scalar already stored there is
    /// replaced by a fresh list.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let entry = self.params.entry(name.into()).or_insert_with(|| QueryValue::List(Vec::new()));
        match entry {
            QueryValue::List(values) => values.push(value.into()),
            QueryValue::Scalar(_) => *entry = QueryValue::List(vec![value.into()]),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: QueryValue) {
        self.params.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<QueryValue> { self.params.remove(name) }

    pub fn is_empty(&self) -> bool { self.params.is_empty() }

    pub fn len(&self) -> usize { self.params.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serializes without the leading `?`. Empty lists are omitted.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        for (name, value) in &self.params {
            let name = encode_component(name);
            match value {
                QueryValue::Scalar(v) => pairs.push(format!("{}={}", name, encode_component(v))),
                QueryValue::List(values) => {
                    for v in values { pairs.push(format!("{}[]={}", name, encode_component(v))); }
                }
            }
        }
        pairs.join("&")
    }
}

impl std::fmt::Display for QueryParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

/// Returns the base name and index for `name[]` and `name[<digits>]`.
fn list_name(name: &str) -> Option<(&str, Option<u64>)> {
    let open = name.find('[')?;
    let index = name[open..].strip_prefix('[')?.strip_suffix(']')?;
    if open == 0 || !index.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some((&name[..open], index.parse().ok()))
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

fn encode_component(raw: &str) -> String { utf8_percent_encode(raw, QUERY_COMPONENT).to_string() }
