use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Reads a string field that the server may send as `null`.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A tax record as served by `GET /taxes`.
///
/// Fields the client does not know about are kept in `extra` so that the
/// `PUT` body carries the full record back to the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub request_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of the country reference list (`GET /countries`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Country {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{
            "id": "7",
            "name": "Marco Huel",
            "gender": "male",
            "requestDate": "2025-06-16T12:00:00.000Z",
            "country": "iraq",
            "countryId": "3"
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "7");
        assert_eq!(record.request_date.as_deref(), Some("2025-06-16T12:00:00.000Z"));
        assert_eq!(record.country_id, "3");
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_record_missing_optional_fields() {
        let record: Record = serde_json::from_str(r#"{"id":"1"}"#).unwrap();
        assert_eq!(record.name, "");
        assert_eq!(record.gender, None);
        assert_eq!(record.country, "");
        assert_eq!(record.country_id, "");
    }

    #[test]
    fn test_record_null_gender_is_none() {
        let record: Record =
            serde_json::from_str(r#"{"id":"1","gender":null,"country":"Norway"}"#).unwrap();
        assert_eq!(record.gender, None);
    }

    #[test]
    fn test_record_list_with_null_strings_decodes() {
        let json = r#"[
            {"id":"1","name":null,"country":null,"countryId":null},
            {"id":"2","name":"Bob","country":"Norway","countryId":"2"}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].country, "");
        assert_eq!(records[0].country_id, "");
        assert_eq!(
            crate::core::store::distinct_country_options(&records),
            vec!["Norway"]
        );
    }

    #[test]
    fn test_record_null_optionals_written_back() {
        let record: Record =
            serde_json::from_str(r#"{"id":"1","gender":null,"requestDate":null}"#).unwrap();
        let out: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(out.get("gender"), Some(&Value::Null));
        assert_eq!(out.get("requestDate"), Some(&Value::Null));
    }

    /// Contract test: unknown fields are echoed back on serialization.
    #[test]
    fn test_record_preserves_unknown_fields() {
        let json = r#"{"id":"1","name":"A","country":"Norway","countryId":"2","createdAt":"x","score":4}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.extra.len(), 2);

        let out: Value = serde_json::to_value(&record).unwrap();
        assert_eq!(out["createdAt"], "x");
        assert_eq!(out["score"], 4);
        assert_eq!(out["countryId"], "2");
    }
}
