//! Sorting of materialized records
//!
//! Sort keys come from an explicit accessor table: each allowed `sort_by`
//! name maps to an extraction function that reads a numeric field from the
//! materialized record and falls back to `0` when the field is absent or not
//! a number. Sorting is stable in both directions, so ties keep store order.

use crate::domain::{MaterializedRecord, RegistryError, Result};
use std::fmt;
use std::str::FromStr;

/// Field a listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
    /// Accepted by the allow-list, but no record carries a `bmi_category`
    /// key (the derived category is exposed as `verdict`). Every key
    /// therefore reads as `0` and the sort keeps store order.
    BmiCategory,
}

/// Extracts the sort key from a materialized record
pub type SortKeyFn = fn(&MaterializedRecord) -> f64;

/// One entry of the accessor table
#[derive(Debug, Clone, Copy)]
pub struct SortKeyAccessor {
    pub field: SortField,
    pub name: &'static str,
    pub extract: SortKeyFn,
}

/// Allowed `sort_by` values and their key extractors, in allow-list order
pub static SORT_KEY_ACCESSORS: [SortKeyAccessor; 4] = [
    SortKeyAccessor {
        field: SortField::Height,
        name: "height",
        extract: height_key,
    },
    SortKeyAccessor {
        field: SortField::Weight,
        name: "weight",
        extract: weight_key,
    },
    SortKeyAccessor {
        field: SortField::Bmi,
        name: "bmi",
        extract: bmi_key,
    },
    SortKeyAccessor {
        field: SortField::BmiCategory,
        name: "bmi_category",
        extract: bmi_category_key,
    },
];

fn number_or_zero(record: &MaterializedRecord, key: &str) -> f64 {
    record.number(key).unwrap_or(0.0)
}

fn height_key(record: &MaterializedRecord) -> f64 {
    number_or_zero(record, "height")
}

fn weight_key(record: &MaterializedRecord) -> f64 {
    number_or_zero(record, "weight")
}

fn bmi_key(record: &MaterializedRecord) -> f64 {
    number_or_zero(record, "bmi")
}

fn bmi_category_key(record: &MaterializedRecord) -> f64 {
    number_or_zero(record, "bmi_category")
}

impl SortField {
    /// Allowed `sort_by` names, comma-separated
    pub fn allowed() -> String {
        SORT_KEY_ACCESSORS
            .iter()
            .map(|a| a.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn accessor(&self) -> &'static SortKeyAccessor {
        // Every variant has exactly one table entry
        match self {
            SortField::Height => &SORT_KEY_ACCESSORS[0],
            SortField::Weight => &SORT_KEY_ACCESSORS[1],
            SortField::Bmi => &SORT_KEY_ACCESSORS[2],
            SortField::BmiCategory => &SORT_KEY_ACCESSORS[3],
        }
    }

    /// The query-string name of this field
    pub fn as_str(&self) -> &'static str {
        self.accessor().name
    }

    /// Sort key for `record`
    pub fn key(&self, record: &MaterializedRecord) -> f64 {
        (self.accessor().extract)(record)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        SORT_KEY_ACCESSORS
            .iter()
            .find(|a| a.name == s)
            .map(|a| a.field)
            .ok_or_else(|| {
                RegistryError::InvalidParameter(format!(
                    "Invalid field, select from {}",
                    SortField::allowed()
                ))
            })
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(RegistryError::InvalidParameter(
                "Invalid order, select between asc and desc".to_string(),
            )),
        }
    }
}

/// A validated sort request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortQuery {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortQuery {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parses raw query parameters
    ///
    /// `sort_by` is required; `order` defaults to ascending. The field is
    /// checked before the order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidParameter`] for a missing or unknown
    /// `sort_by`, or an `order` other than `asc`/`desc`.
    pub fn parse(sort_by: Option<&str>, order: Option<&str>) -> Result<Self> {
        let field = match sort_by {
            Some(raw) => raw.parse()?,
            None => {
                return Err(RegistryError::InvalidParameter(format!(
                    "sort_by is required, select from {}",
                    SortField::allowed()
                )))
            }
        };
        let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
        Ok(Self { field, order })
    }

    /// Sorts `records` by this query
    pub fn apply(&self, records: Vec<MaterializedRecord>) -> Vec<MaterializedRecord> {
        sort_records(records, self.field, self.order)
    }
}

/// Orders records by `field` in `order`
///
/// The sort is stable: records with equal keys keep their relative input
/// order in both directions, so descending is not necessarily the reverse of
/// ascending when ties exist.
pub fn sort_records(
    records: Vec<MaterializedRecord>,
    field: SortField,
    order: SortOrder,
) -> Vec<MaterializedRecord> {
    let mut keyed: Vec<(f64, MaterializedRecord)> = records
        .into_iter()
        // `+ 0.0` folds -0.0 into 0.0 so it ties with absent keys
        .map(|record| (field.key(&record) + 0.0, record))
        .collect();

    match order {
        SortOrder::Asc => keyed.sort_by(|a, b| a.0.total_cmp(&b.0)),
        SortOrder::Desc => keyed.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(id: &str, stored: Value) -> MaterializedRecord {
        MaterializedRecord::from_stored(id, &stored)
    }

    fn ids(records: &[MaterializedRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    fn sample() -> Vec<MaterializedRecord> {
        vec![
            record("P001", json!({"height": 1.8, "weight": 72})),
            record("P002", json!({"height": 1.6, "weight": 50})),
            record("P003", json!({"height": 1.7, "weight": 95})),
        ]
    }

    #[test]
    fn test_weight_ascending() {
        let sorted = sort_records(sample(), SortField::Weight, SortOrder::Asc);
        assert_eq!(ids(&sorted), ["P002", "P001", "P003"]);
    }

    #[test]
    fn test_weight_descending() {
        let sorted = sort_records(sample(), SortField::Weight, SortOrder::Desc);
        assert_eq!(ids(&sorted), ["P003", "P001", "P002"]);
    }

    #[test]
    fn test_height_and_bmi() {
        let sorted = sort_records(sample(), SortField::Height, SortOrder::Asc);
        assert_eq!(ids(&sorted), ["P002", "P003", "P001"]);

        // bmi: P001 22.2, P002 19.5, P003 32.9
        let sorted = sort_records(sample(), SortField::Bmi, SortOrder::Desc);
        assert_eq!(ids(&sorted), ["P003", "P001", "P002"]);
    }

    #[test]
    fn test_ties_keep_input_order_in_both_directions() {
        let records = vec![
            record("A", json!({"weight": 60})),
            record("B", json!({"weight": 70})),
            record("C", json!({"weight": 60})),
        ];

        let asc = sort_records(records.clone(), SortField::Weight, SortOrder::Asc);
        assert_eq!(ids(&asc), ["A", "C", "B"]);

        let desc = sort_records(records, SortField::Weight, SortOrder::Desc);
        assert_eq!(ids(&desc), ["B", "A", "C"]);
    }

    #[test]
    fn test_missing_field_sorts_as_zero() {
        let records = vec![
            record("P001", json!({"weight": 10})),
            record("P002", json!({"name": "no weight"})),
            record("P003", json!({"weight": "heavy"})),
        ];
        let sorted = sort_records(records, SortField::Weight, SortOrder::Asc);
        assert_eq!(ids(&sorted), ["P002", "P003", "P001"]);
    }

    #[test]
    fn test_negative_zero_ties_with_absent_key() {
        let records = vec![
            record("P001", json!({"weight": -0.0})),
            record("P002", json!({"name": "no weight"})),
            record("P003", json!({"weight": 0})),
        ];

        let asc = sort_records(records.clone(), SortField::Weight, SortOrder::Asc);
        assert_eq!(ids(&asc), ["P001", "P002", "P003"]);

        let desc = sort_records(records, SortField::Weight, SortOrder::Desc);
        assert_eq!(ids(&desc), ["P001", "P002", "P003"]);
    }

    #[test]
    fn test_bmi_category_is_a_no_op_sort() {
        // Listed as valid but never present on a record, so every key is 0.
        // Likely meant to be `verdict`; kept as-is.
        let sorted = sort_records(sample(), SortField::BmiCategory, SortOrder::Asc);
        assert_eq!(ids(&sorted), ["P001", "P002", "P003"]);
        let sorted = sort_records(sample(), SortField::BmiCategory, SortOrder::Desc);
        assert_eq!(ids(&sorted), ["P001", "P002", "P003"]);
    }

    #[test]
    fn test_sort_is_deterministic() {
        let first = sort_records(sample(), SortField::Bmi, SortOrder::Asc);
        let second = sort_records(sample(), SortField::Bmi, SortOrder::Asc);
        assert_eq!(first, second);
    }

    #[test]
    fn test_sort_does_not_filter() {
        let sorted = sort_records(sample(), SortField::Height, SortOrder::Desc);
        assert_eq!(sorted.len(), 3);
        assert!(sorted.iter().all(|r| r.get("verdict").is_some()));
    }

    #[test]
    fn test_parse_sort_field() {
        assert_eq!("height".parse::<SortField>().unwrap(), SortField::Height);
        assert_eq!(
            "bmi_category".parse::<SortField>().unwrap(),
            SortField::BmiCategory
        );

        let err = "invalidfield".parse::<SortField>().unwrap_err();
        assert!(matches!(err, RegistryError::InvalidParameter(_)));
        assert!(err
            .to_string()
            .contains("height, weight, bmi, bmi_category"));

        // Names are case-sensitive
        assert!("Height".parse::<SortField>().is_err());
    }

    #[test]
    fn test_parse_sort_order() {
        assert_eq!("asc".parse::<SortOrder>().unwrap(), SortOrder::Asc);
        assert_eq!("desc".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        let err = "up".parse::<SortOrder>().unwrap_err();
        assert!(err.to_string().contains("asc and desc"));
    }

    #[test]
    fn test_query_parse() {
        let query = SortQuery::parse(Some("bmi"), None).unwrap();
        assert_eq!(query, SortQuery::new(SortField::Bmi, SortOrder::Asc));

        let query = SortQuery::parse(Some("weight"), Some("desc")).unwrap();
        assert_eq!(query.order, SortOrder::Desc);

        assert!(SortQuery::parse(None, Some("asc")).is_err());
        assert!(SortQuery::parse(Some("weight"), Some("sideways")).is_err());
    }

    #[test]
    fn test_query_checks_field_before_order() {
        let err = SortQuery::parse(Some("nope"), Some("nope")).unwrap_err();
        assert!(err.to_string().contains("Invalid field"));
    }

    #[test]
    fn test_accessor_table_matches_variants() {
        for accessor in SORT_KEY_ACCESSORS.iter() {
            assert_eq!(accessor.field.as_str(), accessor.name);
        }
    }
}
