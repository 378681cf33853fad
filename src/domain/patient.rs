//! Patient domain model
//!
//! This module defines the validated [`Patient`] value object, the
//! [`PatientRecord`] shape that is persisted under a patient's id, and the
//! batch validation that turns a loosely-typed JSON candidate into a patient.

use super::bmi::{body_mass_index, Verdict};
use super::errors::{FieldViolation, ValidationError, ViolationRule};
use super::ids::PatientId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Exclusive lower bound for `age`
pub const MIN_AGE_EXCLUSIVE: u32 = 0;

/// Exclusive upper bound for `age`
pub const MAX_AGE_EXCLUSIVE: u32 = 120;

/// Patient gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

impl Gender {
    /// Accepted wire values, in declaration order
    pub const ALLOWED: [&'static str; 3] = ["male", "female", "others"];

    /// Returns the wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Others => "others",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "others" => Ok(Gender::Others),
            other => Err(format!(
                "Invalid gender '{}'. Must be one of: {}",
                other,
                Gender::ALLOWED.join(", ")
            )),
        }
    }
}

/// The six fields persisted under a patient's id
///
/// Derived values are exposed as methods and never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: u32,
    pub gender: Gender,
    /// Meters
    pub height: f64,
    /// Kilograms
    pub weight: f64,
}

impl PatientRecord {
    /// Body-mass index, recomputed on each call
    pub fn bmi(&self) -> f64 {
        body_mass_index(self.weight, self.height)
    }

    /// Weight category for [`Self::bmi`]
    pub fn verdict(&self) -> Verdict {
        Verdict::classify(self.bmi())
    }
}

/// A validated, immutable patient
///
/// Construct through [`Patient::from_json`] or [`Patient::builder`]; both run
/// the same field checks and report every violation at once.
///
/// # Examples
///
/// ```
/// use patient_registry::domain::patient::{Gender, Patient};
/// use patient_registry::domain::bmi::Verdict;
///
/// let patient = Patient::builder()
///     .id("P001")
///     .name("Ravi")
///     .city("Pune")
///     .age(30)
///     .gender(Gender::Male)
///     .height(1.8)
///     .weight(72.0)
///     .build()
///     .unwrap();
///
/// assert_eq!(patient.verdict(), Verdict::Normal);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    id: PatientId,
    record: PatientRecord,
}

impl Patient {
    /// Validates a JSON candidate and constructs a patient
    ///
    /// The candidate must be an object carrying `id`, `name`, `city`, `age`,
    /// `gender`, `height` and `weight`. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] listing every violated constraint.
    pub fn from_json(candidate: &Value) -> Result<Self, ValidationError> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationError::new(vec![FieldViolation::wrong_type(
                "patient",
                "a JSON object",
            )]));
        };

        let mut checks = FieldChecks::default();

        let id = string_field(object, "id", &mut checks);
        let name = string_field(object, "name", &mut checks);
        let city = string_field(object, "city", &mut checks);
        let age = integer_field(object, "age", &mut checks);
        let gender = gender_field(object, &mut checks);
        let height = number_field(object, "height", &mut checks);
        let weight = number_field(object, "weight", &mut checks);

        checks.finish(id, name, city, age, gender, height, weight)
    }

    /// Returns a builder for constructing a patient
    pub fn builder() -> PatientBuilder {
        PatientBuilder::default()
    }

    pub fn id(&self) -> &PatientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn city(&self) -> &str {
        &self.record.city
    }

    pub fn age(&self) -> u32 {
        self.record.age
    }

    pub fn gender(&self) -> Gender {
        self.record.gender
    }

    pub fn height(&self) -> f64 {
        self.record.height
    }

    pub fn weight(&self) -> f64 {
        self.record.weight
    }

    /// Body-mass index, `weight / height²`
    pub fn bmi(&self) -> f64 {
        self.record.bmi()
    }

    /// Weight category for [`Self::bmi`]
    pub fn verdict(&self) -> Verdict {
        self.record.verdict()
    }

    /// The stored fields, without the id
    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Splits the patient into its store key and stored fields
    pub fn into_parts(self) -> (PatientId, PatientRecord) {
        (self.id, self.record)
    }
}

/// Builder for constructing [`Patient`] instances
#[derive(Debug, Default)]
pub struct PatientBuilder {
    id: Option<String>,
    name: Option<String>,
    city: Option<String>,
    age: Option<i64>,
    gender: Option<Gender>,
    height: Option<f64>,
    weight: Option<f64>,
}

impl PatientBuilder {
    /// Creates a new PatientBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Builds the patient
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if required fields are missing or any
    /// value breaks its constraint.
    pub fn build(self) -> Result<Patient, ValidationError> {
        let mut checks = FieldChecks::default();

        let id = checks.present("id", self.id);
        let name = checks.present("name", self.name);
        let city = checks.present("city", self.city);
        let age = checks.present("age", self.age).map(i128::from);
        let gender = checks.present("gender", self.gender);
        let height = checks.present("height", self.height);
        let weight = checks.present("weight", self.weight);

        checks.finish(id, name, city, age, gender, height, weight)
    }
}

/// Accumulates violations across all fields of one candidate
#[derive(Default)]
struct FieldChecks {
    violations: Vec<FieldViolation>,
}

impl FieldChecks {
    fn push(&mut self, violation: FieldViolation) {
        self.violations.push(violation);
    }

    fn present<T>(&mut self, field: &'static str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(FieldViolation::missing(field));
        }
        value
    }

    /// Applies the range rules and assembles the patient
    #[allow(clippy::too_many_arguments)]
    fn finish(
        mut self,
        id: Option<String>,
        name: Option<String>,
        city: Option<String>,
        age: Option<i128>,
        gender: Option<Gender>,
        height: Option<f64>,
        weight: Option<f64>,
    ) -> Result<Patient, ValidationError> {
        let id = id.and_then(|raw| match PatientId::new(raw) {
            Ok(id) => Some(id),
            Err(message) => {
                self.push(FieldViolation::new("id", ViolationRule::Blank, message));
                None
            }
        });

        let name = name.filter(|n| {
            let ok = !n.trim().is_empty();
            if !ok {
                self.push(FieldViolation::new(
                    "name",
                    ViolationRule::Blank,
                    "name cannot be empty",
                ));
            }
            ok
        });

        let age = age.and_then(|a| {
            if a > i128::from(MIN_AGE_EXCLUSIVE) && a < i128::from(MAX_AGE_EXCLUSIVE) {
                u32::try_from(a).ok()
            } else {
                self.push(FieldViolation::new(
                    "age",
                    ViolationRule::OutOfRange,
                    format!(
                        "age must be greater than {MIN_AGE_EXCLUSIVE} and less than {MAX_AGE_EXCLUSIVE}, got {a}"
                    ),
                ));
                None
            }
        });

        let height = self.positive("height", height);
        let weight = self.positive("weight", weight);

        // Both positive, but weight / height² can still overflow
        let height = match (height, weight) {
            (Some(h), Some(w)) if !body_mass_index(w, h).is_finite() => {
                self.push(FieldViolation::new(
                    "height",
                    ViolationRule::OutOfRange,
                    format!("height {h} and weight {w} do not give a finite bmi"),
                ));
                None
            }
            _ => height,
        };

        match (id, name, city, age, gender, height, weight) {
            (
                Some(id),
                Some(name),
                Some(city),
                Some(age),
                Some(gender),
                Some(height),
                Some(weight),
            ) if self.violations.is_empty() => Ok(Patient {
                id,
                record: PatientRecord {
                    name,
                    city,
                    age,
                    gender,
                    height,
                    weight,
                },
            }),
            _ => Err(ValidationError::new(self.violations)),
        }
    }

    fn positive(&mut self, field: &'static str, value: Option<f64>) -> Option<f64> {
        value.filter(|v| {
            let ok = v.is_finite() && *v > 0.0;
            if !ok {
                self.push(FieldViolation::new(
                    field,
                    ViolationRule::OutOfRange,
                    format!("{field} must be greater than 0, got {v}"),
                ));
            }
            ok
        })
    }
}

fn lookup<'a>(
    object: &'a Map<String, Value>,
    field: &'static str,
    checks: &mut FieldChecks,
) -> Option<&'a Value> {
    match object.get(field) {
        None | Some(Value::Null) => {
            checks.push(FieldViolation::missing(field));
            None
        }
        Some(value) => Some(value),
    }
}

fn string_field(
    object: &Map<String, Value>,
    field: &'static str,
    checks: &mut FieldChecks,
) -> Option<String> {
    let value = lookup(object, field, checks)?;
    match value.as_str() {
        Some(s) => Some(s.to_string()),
        None => {
            checks.push(FieldViolation::wrong_type(field, "a string"));
            None
        }
    }
}

/// Accepts JSON integers of any magnitude and integral floats such as `30.0`
///
/// Values past `i64` are still integers; the range check rejects them.
fn integer_field(
    object: &Map<String, Value>,
    field: &'static str,
    checks: &mut FieldChecks,
) -> Option<i128> {
    let value = lookup(object, field, checks)?;
    let integer = value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i128)
        });
    if integer.is_none() {
        checks.push(FieldViolation::wrong_type(field, "an integer"));
    }
    integer
}

fn number_field(
    object: &Map<String, Value>,
    field: &'static str,
    checks: &mut FieldChecks,
) -> Option<f64> {
    let value = lookup(object, field, checks)?;
    let number = value.as_f64();
    if number.is_none() {
        checks.push(FieldViolation::wrong_type(field, "a number"));
    }
    number
}

fn gender_field(object: &Map<String, Value>, checks: &mut FieldChecks) -> Option<Gender> {
    let raw = string_field(object, "gender", checks)?;
    match raw.parse::<Gender>() {
        Ok(gender) => Some(gender),
        Err(_) => {
            checks.push(FieldViolation::new(
                "gender",
                ViolationRule::NotInEnumeration,
                format!(
                    "gender must be one of: {}, got '{}'",
                    Gender::ALLOWED.join(", "),
                    raw
                ),
            ));
            None
        }
    }
}
