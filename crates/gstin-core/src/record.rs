//! The normalized lookup record and its typed views.
//!
//! [`normalize`] is the only transformation applied to a classified response:
//! it derives the PAN from the record's `gstin` field and stores it under
//! [`PAN_KEY`]. Everything else passes through untouched, so the record keeps
//! any field the API adds later even though the display layer only renders an
//! allow-list of them.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::newtypes::Pan;
use crate::response::RawResponse;
use crate::serde_helpers::{deserialize_lenient_string, deserialize_string_list};

/// Key under which the derived PAN is stored.
pub const PAN_KEY: &str = "panNum";

/// Well-known record keys.
pub mod keys {
    /// The GSTIN echoed back by the API.
    pub const GSTIN: &str = "gstin";
    /// Registered legal name.
    pub const LEGAL_NAME: &str = "legal_name";
    /// Trade name.
    pub const TRADE_NAME: &str = "trade_name";
    /// Registration status.
    pub const STATUS: &str = "status";
    /// List of declared business activities.
    pub const BUSINESS_ACTIVITY_NATURE: &str = "business_activity_nature";
    /// Principal place of business.
    pub const PRINCIPAL_PLACE: &str = "place_of_business_principal";
    /// Additional places of business.
    pub const ADDITIONAL_PLACES: &str = "place_of_business_additional";
}

// ---------------------------------------------------------------------------
// Address / PlaceOfBusiness
// ---------------------------------------------------------------------------

/// Postal address of a place of business. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    /// Door / flat number.
    #[serde(
        default,
        alias = "door_number",
        alias = "door_no",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub door_num: Option<String>,
    /// Building or premises name.
    #[serde(
        default,
        alias = "building",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub building_name: Option<String>,
    /// Street or road.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub street: Option<String>,
    /// Locality / area.
    #[serde(
        default,
        alias = "locality",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub location: Option<String>,
    /// City or town.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub city: Option<String>,
    /// District.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub district: Option<String>,
    /// State name or code.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub state: Option<String>,
    /// Postal (PIN) code.
    #[serde(
        default,
        alias = "pincode",
        alias = "postal_code",
        deserialize_with = "deserialize_lenient_string"
    )]
    pub pin_code: Option<String>,
}

impl Address {
    /// Returns `true` if every part is absent or blank.
    pub fn is_blank(&self) -> bool {
        self.parts().iter().all(|p| p.is_none_or(|s| s.trim().is_empty()))
    }

    /// All parts in display order.
    pub(crate) fn parts(&self) -> [Option<&str>; 8] {
        [
            self.door_num.as_deref(),
            self.building_name.as_deref(),
            self.street.as_deref(),
            self.location.as_deref(),
            self.city.as_deref(),
            self.district.as_deref(),
            self.state.as_deref(),
            self.pin_code.as_deref(),
        ]
    }
}

/// A registered place of business.
///
/// The address is normally nested under `address`; some payloads put the
/// address parts directly on the place object instead, which is captured by
/// [`PlaceOfBusiness::inline_address`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlaceOfBusiness {
    /// Nested address object, when present.
    #[serde(default)]
    pub address: Option<Address>,
    /// Address parts found at the top level of the place object.
    #[serde(flatten)]
    pub inline_address: Address,
    /// Declared nature of business at this place.
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub nature: Option<Vec<String>>,
}

impl PlaceOfBusiness {
    /// Returns the effective address: the nested one if present, otherwise
    /// the inline parts.
    pub fn effective_address(&self) -> &Address {
        self.address.as_ref().unwrap_or(&self.inline_address)
    }

    /// Decodes a place from a raw JSON value.
    ///
    /// Returns `None` when the value is not an object or contains structured
    /// data where a scalar was expected.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).ok(),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Array(_) => {
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// LookupResult
// ---------------------------------------------------------------------------

/// A normalized lookup record.
///
/// Wraps the raw JSON object (plus the derived [`PAN_KEY`] entry). Serializes
/// transparently as that object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResult {
    fields: Map<String, Value>,
}

/// Derives the PAN from `raw["gstin"]` and merges it into the record.
///
/// When `gstin` is missing, not a string, or shorter than 12 characters the
/// record is returned without a [`PAN_KEY`] entry.
pub fn normalize(raw: RawResponse) -> LookupResult {
    let mut fields = raw;
    let pan = fields
        .get(keys::GSTIN)
        .and_then(Value::as_str)
        .and_then(Pan::from_gstin_str);
    if let Some(pan) = pan {
        fields.insert(PAN_KEY.to_owned(), Value::String(pan.as_str().to_owned()));
    }
    LookupResult { fields }
}

impl LookupResult {
    /// Returns the underlying JSON object.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the record and returns the underlying JSON object.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns the raw value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns the value under `key` if it is a string.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns `true` when the record has no keys at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of keys in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The GSTIN echoed back by the API.
    pub fn gstin(&self) -> Option<&str> {
        self.text(keys::GSTIN)
    }

    /// The derived PAN.
    pub fn pan_num(&self) -> Option<&str> {
        self.text(PAN_KEY)
    }

    /// The registered legal name.
    pub fn legal_name(&self) -> Option<&str> {
        self.text(keys::LEGAL_NAME)
    }

    /// Declared business activities, if present and well-formed.
    pub fn business_activity_nature(&self) -> Option<Vec<String>> {
        self.get(keys::BUSINESS_ACTIVITY_NATURE)
            .and_then(|v| crate::serde_helpers::string_list(v).ok().flatten())
    }

    /// The principal place of business, if present and well-formed.
    pub fn principal_place(&self) -> Option<PlaceOfBusiness> {
        self.get(keys::PRINCIPAL_PLACE)
            .and_then(PlaceOfBusiness::from_value)
    }

    /// Additional places of business, if present and every entry is
    /// well-formed.
    pub fn additional_places(&self) -> Option<Vec<PlaceOfBusiness>> {
        match self.get(keys::ADDITIONAL_PLACES)? {
            Value::Array(items) => items.iter().map(PlaceOfBusiness::from_value).collect(),
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => None,
        }
    }
}

impl From<RawResponse> for LookupResult {
    fn from(raw: RawResponse) -> Self {
        normalize(raw)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> RawResponse {
        match value {
            Value::Object(map) => map,
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_) => Map::new(),
        }
    }

    #[test]
    fn normalize_derives_pan() {
        let result = normalize(raw(json!({"gstin": "27ABCDE1234F1Z5", "legal_name": "Acme"})));
        assert_eq!(result.pan_num(), Some("ABCDE1234F"));
        assert_eq!(result.legal_name(), Some("Acme"));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn normalize_passes_other_fields_through() {
        let input = json!({
            "gstin": "27ABCDE1234F1Z5",
            "status": "Active",
            "unknown_field": {"nested": [1, 2]},
        });
        let result = normalize(raw(input.clone()));
        for (key, value) in raw(input) {
            assert_eq!(result.get(&key), Some(&value), "field {key}");
        }
    }

    #[test]
    fn normalize_without_gstin_adds_nothing() {
        let result = normalize(raw(json!({"legal_name": "Acme"})));
        assert_eq!(result.pan_num(), None);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn normalize_with_short_gstin_adds_nothing() {
        let result = normalize(raw(json!({"gstin": "27ABC"})));
        assert_eq!(result.pan_num(), None);
    }

    #[test]
    fn normalize_with_non_string_gstin_adds_nothing() {
        let result = normalize(raw(json!({"gstin": 27})));
        assert_eq!(result.pan_num(), None);
    }

    #[test]
    fn empty_record_stays_empty() {
        assert!(normalize(Map::new()).is_empty());
    }

    #[test]
    fn serializes_transparently() {
        let result = normalize(raw(json!({"gstin": "27ABCDE1234F1Z5"})));
        let value = serde_json::to_value(&result).expect("serialize");
        assert_eq!(
            value,
            json!({"gstin": "27ABCDE1234F1Z5", "panNum": "ABCDE1234F"})
        );
    }

    #[test]
    fn principal_place_with_nested_address() {
        let result = normalize(raw(json!({
            "place_of_business_principal": {
                "address": {"city": "Pune", "state": "MH", "pin_code": 411001},
                "nature": ["Office / Sale Office"]
            }
        })));
        let place = result.principal_place().expect("place");
        let address = place.effective_address();
        assert_eq!(address.city.as_deref(), Some("Pune"));
        assert_eq!(address.pin_code.as_deref(), Some("411001"));
        assert_eq!(place.nature, Some(vec!["Office / Sale Office".to_owned()]));
    }

    #[test]
    fn principal_place_with_inline_address() {
        let result = normalize(raw(json!({
            "place_of_business_principal": {"city": "Surat", "pincode": "395003"}
        })));
        let place = result.principal_place().expect("place");
        assert!(place.address.is_none());
        assert_eq!(place.effective_address().city.as_deref(), Some("Surat"));
        assert_eq!(place.effective_address().pin_code.as_deref(), Some("395003"));
    }

    #[test]
    fn address_aliases_are_accepted() {
        let address: Address = serde_json::from_value(json!({
            "door_number": "12",
            "building": "Tower A",
            "locality": "Baner",
        }))
        .expect("deserialize");
        assert_eq!(address.door_num.as_deref(), Some("12"));
        assert_eq!(address.building_name.as_deref(), Some("Tower A"));
        assert_eq!(address.location.as_deref(), Some("Baner"));
    }

    #[test]
    fn blank_address_detection() {
        assert!(Address::default().is_blank());
        let address = Address {
            city: Some("  ".to_owned()),
            ..Address::default()
        };
        assert!(address.is_blank());
    }

    #[test]
    fn malformed_additional_place_is_none() {
        let result = normalize(raw(json!({
            "place_of_business_additional": [{"city": "Pune"}, "not a place"]
        })));
        assert_eq!(result.additional_places(), None);
    }

    #[test]
    fn additional_places_decode_in_order() {
        let result = normalize(raw(json!({
            "place_of_business_additional": [
                {"address": {"city": "Pune"}},
                {"address": {"city": "Nashik"}, "nature": "Warehouse / Depot"}
            ]
        })));
        let places = result.additional_places().expect("places");
        assert_eq!(places.len(), 2);
        assert_eq!(places[1].effective_address().city.as_deref(), Some("Nashik"));
        assert_eq!(places[1].nature, Some(vec!["Warehouse / Depot".to_owned()]));
    }

    #[test]
    fn business_activity_nature_list() {
        let result = normalize(raw(json!({
            "business_activity_nature": ["Supplier of Services", "Recipient of Goods"]
        })));
        assert_eq!(
            result.business_activity_nature(),
            Some(vec![
                "Supplier of Services".to_owned(),
                "Recipient of Goods".to_owned()
            ])
        );
    }
}
