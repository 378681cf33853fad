//! Materialized record views
//!
//! A materialized record is what clients read: the stored fields of one
//! patient plus its `id`, `bmi` and `verdict`. Derived values are computed
//! here from whatever `height` and `weight` the store holds; they are never
//! written back.

use super::bmi::{body_mass_index, Verdict};
use serde::Serialize;
use serde_json::{Map, Number, Value};

/// Key under which the patient id is exposed
pub const ID_KEY: &str = "id";

/// Key under which the derived BMI is exposed
pub const BMI_KEY: &str = "bmi";

/// Key under which the derived weight category is exposed
pub const VERDICT_KEY: &str = "verdict";

/// Dict-like view of one record with derived fields attached
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaterializedRecord {
    fields: Map<String, Value>,
}

impl MaterializedRecord {
    /// Builds the view for one stored record
    ///
    /// Key order is `id`, the stored keys in their stored order, then `bmi`
    /// and `verdict`. Derived keys are only attached when both `height` and
    /// `weight` are numbers and the resulting BMI is finite; any stale
    /// `bmi`/`verdict` carried by the stored value is replaced.
    pub fn from_stored(id: &str, stored: &Value) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_KEY.to_string(), Value::String(id.to_string()));

        if let Some(object) = stored.as_object() {
            for (key, value) in object {
                if key == ID_KEY || key == BMI_KEY || key == VERDICT_KEY {
                    continue;
                }
                fields.insert(key.clone(), value.clone());
            }
        }

        let height = fields.get("height").and_then(Value::as_f64);
        let weight = fields.get("weight").and_then(Value::as_f64);
        if let (Some(height), Some(weight)) = (height, weight) {
            let bmi = body_mass_index(weight, height);
            if let Some(number) = Number::from_f64(bmi) {
                fields.insert(BMI_KEY.to_string(), Value::Number(number));
                fields.insert(
                    VERDICT_KEY.to_string(),
                    Value::String(Verdict::classify(bmi).as_str().to_string()),
                );
            }
        }

        Self { fields }
    }

    /// The record's id
    pub fn id(&self) -> &str {
        self.fields
            .get(ID_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Raw value under `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Numeric value under `key`, if present and numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    /// Derived BMI, when it could be computed
    pub fn bmi(&self) -> Option<f64> {
        self.number(BMI_KEY)
    }

    /// Derived weight category, when it could be computed
    pub fn verdict(&self) -> Option<Verdict> {
        self.bmi().map(Verdict::classify)
    }

    /// Consumes the view and returns it as a JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_stored_adds_id_and_derived_fields() {
        let stored = json!({
            "name": "Ravi", "city": "Pune", "age": 30,
            "gender": "male", "height": 1.8, "weight": 72
        });
        let record = MaterializedRecord::from_stored("P001", &stored);

        assert_eq!(record.id(), "P001");
        assert!((record.bmi().unwrap() - 22.22).abs() < 0.01);
        assert_eq!(record.verdict(), Some(Verdict::Normal));

        let value = record.into_value();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys,
            ["id", "name", "city", "age", "gender", "height", "weight", "bmi", "verdict"]
        );
        assert_eq!(value["verdict"], "Normal");
    }

    #[test]
    fn test_stale_derived_fields_are_recomputed() {
        let stored = json!({"height": 2.0, "weight": 100.0, "bmi": 1.0, "verdict": "Underweight"});
        let record = MaterializedRecord::from_stored("P002", &stored);
        assert_eq!(record.bmi(), Some(25.0));
        assert_eq!(record.get("verdict").unwrap(), "Overweight");
    }

    #[test]
    fn test_missing_measurements_skip_derived_fields() {
        let record = MaterializedRecord::from_stored("P003", &json!({"name": "Nia"}));
        assert!(record.get("bmi").is_none());
        assert!(record.get("verdict").is_none());
        assert_eq!(record.get("name").unwrap(), "Nia");
    }

    #[test]
    fn test_zero_height_skips_derived_fields() {
        let record = MaterializedRecord::from_stored("P004", &json!({"height": 0, "weight": 50}));
        assert!(record.bmi().is_none());
    }

    #[test]
    fn test_non_object_stored_value() {
        let record = MaterializedRecord::from_stored("P005", &json!("corrupt"));
        assert_eq!(record.into_value(), json!({"id": "P005"}));
    }
}
