//! List queries over JSON records: text search, field filters, sorting and
//! pagination, as driven by the dashboard's table toolbars.

use crate::pagination::{paginate, Page, DEFAULT_PAGE_SIZES};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Filter values that mean "no filter".
const WILDCARD_VALUES: [&str; 3] = ["", "all", "Toate"];

/// Lowercase and strip diacritics so `"Constanța"` matches `"constanta"`.
pub fn normalize_text(s: &str) -> String {
    s.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'ă' | 'â' | 'á' | 'à' | 'ä' | 'ã' | 'å' => 'a',
        'î' | 'í' | 'ì' | 'ï' => 'i',
        'ș' | 'ş' | 'š' => 's',
        'ț' | 'ţ' => 't',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("invalid sort direction: {}", other)),
        }
    }
}

/// Render a scalar field the way filters compare it.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Order two present field values. Numbers compare numerically, strings by
/// normalized text; anything else (or mixed kinds) falls back to text.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => normalize_text(x)
            .cmp(&normalize_text(y))
            .then_with(|| x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => normalize_text(&a.to_string()).cmp(&normalize_text(&b.to_string())),
    }
}

fn present<'a>(record: &'a Value, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|v| !v.is_null())
}

/// A table query: search, exact-match filters, optional sort, one page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    search: Option<String>,
    search_fields: Vec<String>,
    filters: BTreeMap<String, String>,
    sort: Option<(String, SortDirection)>,
    page: usize,
    page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: None,
            search_fields: Vec::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZES[0],
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search. Blank text disables searching.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = normalize_text(text.into().trim());
        self.search = (!text.is_empty()).then_some(text);
        self
    }

    /// Restrict search to these fields. Without this every top-level string
    /// field is searched.
    pub fn search_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Keep records whose `field` equals `value`. `""`, `"all"` and
    /// `"Toate"` are ignored.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !WILDCARD_VALUES.contains(&value.as_str()) {
            self.filters.insert(field.into(), value);
        }
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }

    /// Select a 1-based page.
    pub fn page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Whether `record` passes the search and every filter.
    pub fn matches(&self, record: &Value) -> bool {
        let filters_ok = self.filters.iter().all(|(field, expected)| {
            present(record, field)
                .and_then(scalar_text)
                .is_some_and(|actual| &actual == expected)
        });
        if !filters_ok {
            return false;
        }

        let Some(needle) = &self.search else {
            return true;
        };

        let contains = |value: &Value| match value {
            Value::String(s) => normalize_text(s).contains(needle.as_str()),
            _ => false,
        };

        if self.search_fields.is_empty() {
            record
                .as_object()
                .is_some_and(|obj| obj.values().any(contains))
        } else {
            self.search_fields
                .iter()
                .filter_map(|field| record.get(field))
                .any(contains)
        }
    }

    /// Filter and sort `records` without paginating. The sort is stable and
    /// records missing the sort field go last in either direction.
    pub fn select(&self, records: Vec<Value>) -> Vec<Value> {
        let mut selected: Vec<Value> = records.into_iter().filter(|r| self.matches(r)).collect();

        if let Some((field, direction)) = &self.sort {
            selected.sort_by(|a, b| match (present(a, field), present(b, field)) {
                (Some(x), Some(y)) => {
                    let ord = compare_values(x, y);
                    match direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            });
        }

        selected
    }

    /// Filter, sort and cut out the requested page.
    pub fn apply(&self, records: Vec<Value>) -> Page<Value> {
        paginate(self.select(records), self.page, self.page_size)
    }
}

/// Distinct values of `field` across `records`, sorted, for facet pickers.
pub fn facet_values(records: &[Value], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| present(r, field).and_then(scalar_text))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
