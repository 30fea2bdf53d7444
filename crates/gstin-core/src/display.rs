//! Presentation formatting for a [`LookupResult`].
//!
//! The formatter never inspects arbitrary record keys. It walks two static
//! tables:
//!
//! - [`TABLE_FIELDS`]: the ordered allow-list of flat fields shown in the
//!   main table, each with an optional label override;
//! - [`DETAIL_FIELDS`]: the structured fields rendered as blocks after the
//!   table, each tagged with its [`FieldKind`].
//!
//! A value is decoded into a [`FieldValue`] according to the kind its key is
//! known to have. Values that do not fit the expected shape fall back to a
//! pretty-printed JSON dump, so nothing in a rendered field is dropped.
//! Record keys that appear in neither table are never rendered.
use serde_json::Value;

use crate::record::{Address, LookupResult, PAN_KEY, PlaceOfBusiness, keys};
use crate::serde_helpers::{scalar_to_string, string_list};

/// Placeholder shown for a missing or empty value.
pub const PLACEHOLDER: &str = "N/A";

/// Notice shown when a lookup succeeds but the record has no fields.
pub const EMPTY_NOTICE: &str = "No details found for this GSTIN.";

/// Main table: `(record key, label override)` in display order.
///
/// A `None` label is derived from the key with [`format_key`].
pub static TABLE_FIELDS: &[(&str, Option<&str>)] = &[
    (keys::GSTIN, None),
    (PAN_KEY, Some("PAN Number")),
    (keys::LEGAL_NAME, None),
    (keys::TRADE_NAME, None),
    (keys::STATUS, None),
    ("type", None),
    ("registration_date", None),
    ("cancellation_date", None),
    ("business_constitution", None),
    ("centre_jurisdiction", None),
    ("centre_jurisdiction_code", None),
    ("state_jurisdiction", None),
    ("state_jurisdiction_code", None),
];

/// Structured fields rendered after the main table, in display order.
pub static DETAIL_FIELDS: &[(&str, FieldKind)] = &[
    (keys::BUSINESS_ACTIVITY_NATURE, FieldKind::NatureList),
    (keys::PRINCIPAL_PLACE, FieldKind::PlaceRecord),
    (keys::ADDITIONAL_PLACES, FieldKind::PlaceRecordList),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The schema-level kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A flat value: string, number or boolean.
    Scalar,
    /// A list of nature-of-business strings.
    NatureList,
    /// A single place of business.
    PlaceRecord,
    /// A list of places of business.
    PlaceRecordList,
}

impl FieldKind {
    /// Returns the kind a record key is known to have; unknown keys are
    /// treated as scalars.
    pub fn of(key: &str) -> Self {
        DETAIL_FIELDS
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(Self::Scalar, |(_, kind)| *kind)
    }
}

/// A record value decoded according to its [`FieldKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Absent, `null`, or empty.
    Missing,
    /// A flat value, already stringified.
    Scalar(String),
    /// A list of strings.
    List(Vec<String>),
    /// A single place of business.
    Place(PlaceOfBusiness),
    /// Several places of business.
    PlaceList(Vec<PlaceOfBusiness>),
    /// A value that did not fit its expected kind, pretty-printed.
    Object(String),
}

impl FieldValue {
    /// Decodes `value` as a field of the given kind.
    pub fn decode(kind: FieldKind, value: Option<&Value>) -> Self {
        let Some(value) = value.filter(|v| !is_empty_value(v)) else {
            return Self::Missing;
        };
        match kind {
            FieldKind::Scalar => match scalar_to_string(value) {
                Ok(Some(s)) => Self::Scalar(s),
                Ok(None) => Self::Missing,
                Err(_) => Self::Object(dump(value)),
            },
            FieldKind::NatureList => match string_list(value) {
                Ok(Some(items)) if format_list(&items).is_empty() => Self::Missing,
                Ok(Some(items)) => Self::List(items),
                Ok(None) => Self::Missing,
                Err(_) => Self::Object(dump(value)),
            },
            FieldKind::PlaceRecord => match value {
                Value::Object(_) => {
                    PlaceOfBusiness::from_value(value).map_or_else(|| Self::Object(dump(value)), Self::Place)
                }
                Value::String(_) | Value::Number(_) | Value::Bool(_) => {
                    Self::decode(FieldKind::Scalar, Some(value))
                }
                Value::Null | Value::Array(_) => Self::Object(dump(value)),
            },
            FieldKind::PlaceRecordList => match value {
                Value::Array(items) => items
                    .iter()
                    .map(PlaceOfBusiness::from_value)
                    .collect::<Option<Vec<_>>>()
                    .map_or_else(|| Self::Object(dump(value)), Self::PlaceList),
                Value::Null
                | Value::Bool(_)
                | Value::Number(_)
                | Value::String(_)
                | Value::Object(_) => Self::Object(dump(value)),
            },
        }
    }
}

/// A rendered display tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayNode {
    /// A single line of text.
    Text(String),
    /// A multi-line structural dump (2-space indented JSON).
    Dump(String),
    /// An ordered list of labeled children.
    Group(Vec<Labeled>),
}

impl DisplayNode {
    /// The `N/A` placeholder node.
    pub fn placeholder() -> Self {
        Self::Text(PLACEHOLDER.to_owned())
    }
}

/// A display node with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeled {
    /// Human-readable label.
    pub label: String,
    /// Rendered value.
    pub node: DisplayNode,
}

impl Labeled {
    fn new(label: impl Into<String>, node: DisplayNode) -> Self {
        Self {
            label: label.into(),
            node,
        }
    }
}

/// The full rendering of a lookup result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// The record has no fields; show [`EMPTY_NOTICE`].
    Empty,
    /// Main table rows followed by structured detail blocks.
    Table {
        /// One row per entry of [`TABLE_FIELDS`], in order.
        rows: Vec<Labeled>,
        /// One block per [`DETAIL_FIELDS`] entry present in the record.
        details: Vec<Labeled>,
    },
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Renders the value stored under `key`.
pub fn render(key: &str, value: Option<&Value>) -> DisplayNode {
    render_value(FieldValue::decode(FieldKind::of(key), value))
}

/// Renders an already decoded value.
pub fn render_value(value: FieldValue) -> DisplayNode {
    match value {
        FieldValue::Missing => DisplayNode::placeholder(),
        FieldValue::Scalar(s) => DisplayNode::Text(s),
        FieldValue::List(items) => DisplayNode::Text(format_list(&items)),
        FieldValue::Place(place) => DisplayNode::Group(place_entries(&place)),
        FieldValue::PlaceList(places) => DisplayNode::Group(
            places
                .iter()
                .enumerate()
                .map(|(i, place)| {
                    Labeled::new(
                        format!("Place {}", i + 1),
                        DisplayNode::Group(place_entries(place)),
                    )
                })
                .collect(),
        ),
        FieldValue::Object(text) => DisplayNode::Dump(text),
    }
}

/// Renders a whole record: the main table plus any detail blocks present.
pub fn render_result(result: &LookupResult) -> ResultView {
    if result.is_empty() {
        return ResultView::Empty;
    }
    let rows = TABLE_FIELDS
        .iter()
        .map(|(key, label)| {
            let label = label.map_or_else(|| format_key(key), str::to_owned);
            Labeled::new(label, render(key, result.get(key)))
        })
        .collect();
    let details = DETAIL_FIELDS
        .iter()
        .filter_map(|(key, kind)| {
            let value = FieldValue::decode(*kind, result.get(key));
            (value != FieldValue::Missing)
                .then(|| Labeled::new(format_key(key), render_value(value)))
        })
        .collect();
    ResultView::Table { rows, details }
}

/// The `Address:` / `Nature:` entries of one place of business.
fn place_entries(place: &PlaceOfBusiness) -> Vec<Labeled> {
    let address = place.effective_address();
    let address_node = if address.is_blank() {
        DisplayNode::placeholder()
    } else {
        DisplayNode::Text(format_address(address))
    };
    let mut entries = vec![Labeled::new("Address", address_node)];
    if let Some(nature) = place
        .nature
        .as_deref()
        .filter(|n| !format_list(n).is_empty())
    {
        entries.push(Labeled::new("Nature", DisplayNode::Text(format_list(nature))));
    }
    entries
}

// ---------------------------------------------------------------------------
// String formatting
// ---------------------------------------------------------------------------

/// Formats an address as a single comma-separated line.
///
/// Parts appear in the order door number, building, street, locality, city,
/// district, state, PIN code. Blank parts are skipped, and the district is
/// skipped when it repeats the city (ASCII case-insensitive).
///
/// # Examples
///
/// ```
/// use gstin_core::Address;
/// use gstin_core::display::format_address;
///
/// let address = Address {
///     city: Some("Pune".to_owned()),
///     state: Some("MH".to_owned()),
///     pin_code: Some("411001".to_owned()),
///     ..Address::default()
/// };
/// assert_eq!(format_address(&address), "Pune, MH, 411001");
/// ```
pub fn format_address(address: &Address) -> String {
    let city = address.city.as_deref().map(str::trim);
    let district = address
        .district
        .as_deref()
        .map(str::trim)
        .filter(|d| city.is_none_or(|c| !c.eq_ignore_ascii_case(d)));

    let mut parts = address.parts();
    parts[5] = district;
    parts
        .iter()
        .copied()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Joins list items with `", "`, skipping blank entries.
pub fn format_list(items: &[String]) -> String {
    items
        .iter()
        .map(String::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Converts a record key into a display label.
///
/// Splits on `_`, `-`, spaces and lower-to-upper case transitions and
/// upper-cases the first letter of each word. Every `Gstin` and `Pan` in the
/// result is then spelled `GSTIN` and `PAN`, inside words too, so `pancard`
/// becomes `PANcard` while `company` stays `Company`. Applying it to its own
/// output is a no-op.
///
/// # Examples
///
/// ```
/// use gstin_core::display::format_key;
///
/// assert_eq!(format_key("centre_jurisdiction_code"), "Centre Jurisdiction Code");
/// assert_eq!(format_key("panNum"), "PAN Num");
/// assert_eq!(format_key("gstin"), "GSTIN");
/// ```
pub fn format_key(key: &str) -> String {
    split_words(key)
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
        .replace("Gstin", "GSTIN")
        .replace("Pan", "PAN")
}

fn split_words(key: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pretty-prints a value with 2-space indentation.
fn dump(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
