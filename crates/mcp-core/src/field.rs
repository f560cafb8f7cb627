//! DataMaker template field schema.
//!
//! A template is a list of [`FieldDefinition`]s. Each definition shares the
//! same common attributes and carries a `type`-tagged [`FieldKind`] with the
//! options specific to that generator.
//!
//! Deserialization already rejects unknown types and missing required
//! options; [`FieldDefinition::validate`] adds the semantic checks serde
//! cannot express.
//!
//! # Examples
//!
//! ```
//! use datamaker_mcp_core::{FieldDefinition, FieldKind};
//! use serde_json::json;
//!
//! let field: FieldDefinition = serde_json::from_value(json!({
//!     "name": "age",
//!     "type": "Number",
//!     "options": { "min": 18, "max": 99 }
//! }))
//! .unwrap();
//!
//! assert!(matches!(field.kind, FieldKind::Number { .. }));
//! assert!(field.validate().is_ok());
//! ```

use crate::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const fn default_true() -> bool {
    true
}

/// One field of a DataMaker template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FieldDefinition {
    /// Output column / property name
    pub name: String,

    /// Inactive fields are skipped during generation
    #[serde(default = "default_true")]
    pub active: bool,

    /// Child fields for nested generators
    #[serde(default)]
    pub nested: Vec<Value>,

    /// Optional post-processing function source
    #[serde(default)]
    pub function: String,

    /// Whether the generator may emit no value
    #[serde(default)]
    pub optional: bool,

    /// Whether the value should be masked in previews
    #[serde(default)]
    pub sensitive: bool,

    /// Generator type and its options
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// Options for generators that take none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NoOptions {}

/// Biological sex selector used by the name generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male names
    Male,
    /// Female names
    Female,
}

/// Options of the `Words` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordsOptions {
    /// Number of words
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

/// Options of the `UUID` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UuidOptions {
    /// Marks the field as the record's primary key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<bool>,
}

/// Options of the `Number` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumberOptions {
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Emit the number as a string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stringify: Option<bool>,
}

/// Options of the `Float` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FloatOptions {
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Decimal places
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
}

/// Options of the `Boolean` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BooleanOptions {
    /// Value used for "true"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truthy: Option<bool>,
    /// Value used for "false"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub falsy: Option<bool>,
}

/// Options of the `AI` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PromptOptions {
    /// Prompt sent to the model for every record
    pub prompt: String,
}

/// Options of the `Custom` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CustomOptions {
    /// Values picked at random
    pub values: Vec<String>,
}

/// Options carrying an optional output format (`Date`, `Phone Number`, `Zip Code`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FormatOptions {
    /// Format pattern
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Options of the name generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NameOptions {
    /// Restrict names to one sex
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<Sex>,
}

/// Options of the `Address` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressOptions {
    /// Emit street, city and country instead of the street only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_full_address: Option<bool>,
}

/// Options of the `Random String` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LengthRangeOptions {
    /// Minimum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// Maximum length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

/// Options of the `IBAN` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IbanOptions {
    /// Insert grouping spaces
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted: Option<bool>,
    /// ISO country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// Options of the `Credit Card Number` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreditCardOptions {
    /// Card issuer (visa, mastercard, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// Options of the `Account Number` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AccountNumberOptions {
    /// Number of digits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

/// Options of the `Datetime` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatetimeOptions {
    /// Only produce dates in the past
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past: Option<bool>,
}

/// Options of the `Month` and `Weekday` generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AbbreviationOptions {
    /// Use abbreviated names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<bool>,
}

/// Options of the `Lorem` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoremOptions {
    /// Number of lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_count: Option<u32>,
}

/// Options of the `RegExp` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegExpOptions {
    /// Pattern the generated strings must match
    pub string: String,
}

/// Options of the `Null` generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NullOptions {
    /// Literal emitted instead of `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Options of the `Derived` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DerivedOptions {
    /// Expression over sibling fields
    pub value: String,
}

/// Options of the `Template` generator (records from another template).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRefOptions {
    /// Referenced template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    /// Field of the referenced template used as foreign key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Emit an array of records instead of one
    pub array: bool,
    /// Number of records when `array` is set
    pub quantity: u32,
}

/// Options of the `API Response` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ApiResponseOptions {
    /// Endpoint id to query
    pub endpoint: String,
    /// Path into the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Masking rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masking: Option<String>,
    /// Optional AI post-processing prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Options of the `DB Response` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DbResponseOptions {
    /// Connection id to query
    pub connection: String,
    /// SQL statement
    pub sql: String,
    /// Path into the result
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Masking rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masking: Option<String>,
    /// Optional AI post-processing prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Options of the `Mapped` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MappedOptions {
    /// Source field
    pub field: String,
    /// Source value to output value mapping
    pub map: BTreeMap<String, String>,
}

/// Options of the `Nested` generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NestedOptions {
    /// Emit an array of nested objects instead of one
    pub array: bool,
    /// Number of nested objects when `array` is set
    pub quantity: u32,
}

/// Generator type of a field, tagged by `type`, with its `options`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum FieldKind {
    /// Random words
    Words {
        /// Generator options
        #[serde(default)]
        options: WordsOptions,
    },
    /// Random UUID
    #[serde(rename = "UUID")]
    Uuid {
        /// Generator options
        #[serde(default)]
        options: UuidOptions,
    },
    /// Integer in a range
    Number {
        /// Generator options
        #[serde(default)]
        options: NumberOptions,
    },
    /// Decimal in a range
    Float {
        /// Generator options
        #[serde(default)]
        options: FloatOptions,
    },
    /// Boolean
    Boolean {
        /// Generator options
        #[serde(default)]
        options: BooleanOptions,
    },
    /// LLM-generated value
    #[serde(rename = "AI")]
    Ai {
        /// Generator options
        options: PromptOptions,
    },
    /// Pick from a fixed list
    Custom {
        /// Generator options
        options: CustomOptions,
    },
    /// Date
    Date {
        /// Generator options
        #[serde(default)]
        options: FormatOptions,
    },
    /// Full name
    Name {
        /// Generator options
        #[serde(default)]
        options: NameOptions,
    },
    /// First name
    #[serde(rename = "First Name")]
    FirstName {
        /// Generator options
        #[serde(default)]
        options: NameOptions,
    },
    /// Last name
    #[serde(rename = "Last Name")]
    LastName {
        /// Generator options
        #[serde(default)]
        options: NameOptions,
    },
    /// E-mail address
    #[serde(rename = "E-Mail")]
    Email {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Street address
    Address {
        /// Generator options
        #[serde(default)]
        options: AddressOptions,
    },
    /// City
    City {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Country
    Country {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Phone number
    #[serde(rename = "Phone Number")]
    PhoneNumber {
        /// Generator options
        #[serde(default)]
        options: FormatOptions,
    },
    /// Postal code
    #[serde(rename = "Zip Code")]
    ZipCode {
        /// Generator options
        #[serde(default)]
        options: FormatOptions,
    },
    /// Sex
    Sex {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Gender
    Gender {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Avatar image URL
    Avatar {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Job title
    #[serde(rename = "Job Title")]
    JobTitle {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Random alphanumeric string
    #[serde(rename = "Random String")]
    RandomString {
        /// Generator options
        #[serde(default)]
        options: LengthRangeOptions,
    },
    /// Bank account name
    #[serde(rename = "Account Name")]
    AccountName {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// IBAN
    #[serde(rename = "IBAN")]
    Iban {
        /// Generator options
        #[serde(default)]
        options: IbanOptions,
    },
    /// Currency name
    #[serde(rename = "Currency Name")]
    CurrencyName {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Credit card number
    #[serde(rename = "Credit Card Number")]
    CreditCardNumber {
        /// Generator options
        #[serde(default)]
        options: CreditCardOptions,
    },
    /// Bank account number
    #[serde(rename = "Account Number")]
    AccountNumber {
        /// Generator options
        #[serde(default)]
        options: AccountNumberOptions,
    },
    /// Password
    Password {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Domain name
    #[serde(rename = "Domain Name")]
    DomainName {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Color
    Color {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Emoji
    Emoji {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// IPv4 address
    #[serde(rename = "IPv4")]
    Ipv4 {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// MAC address
    #[serde(rename = "MAC Address")]
    MacAddress {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// URL
    #[serde(rename = "URL")]
    Url {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Product
    Product {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Department
    Department {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Product name
    #[serde(rename = "Product Name")]
    ProductName {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Date and time
    Datetime {
        /// Generator options
        #[serde(default)]
        options: DatetimeOptions,
    },
    /// Month name
    Month {
        /// Generator options
        #[serde(default)]
        options: AbbreviationOptions,
    },
    /// Weekday name
    Weekday {
        /// Generator options
        #[serde(default)]
        options: AbbreviationOptions,
    },
    /// Time zone
    #[serde(rename = "Time Zone")]
    TimeZone {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Lorem ipsum text
    Lorem {
        /// Generator options
        #[serde(default)]
        options: LoremOptions,
    },
    /// String matching a regular expression
    #[serde(rename = "RegExp")]
    RegExp {
        /// Generator options
        options: RegExpOptions,
    },
    /// MongoDB `ObjectId`
    #[serde(rename = "MongoDB ObjectID")]
    MongoObjectId {
        /// Generator options
        #[serde(default)]
        options: NoOptions,
    },
    /// Always null (or a literal)
    Null {
        /// Generator options
        #[serde(default)]
        options: NullOptions,
    },
    /// Computed from other fields
    Derived {
        /// Generator options
        options: DerivedOptions,
    },
    /// Records from another template
    Template {
        /// Generator options
        options: TemplateRefOptions,
    },
    /// Value pulled from a user-defined endpoint
    #[serde(rename = "API Response")]
    ApiResponse {
        /// Generator options
        options: ApiResponseOptions,
    },
    /// Value pulled from a database connection
    #[serde(rename = "DB Response")]
    DbResponse {
        /// Generator options
        options: DbResponseOptions,
    },
    /// Value mapped from another field
    Mapped {
        /// Generator options
        options: MappedOptions,
    },
    /// Nested object built from `nested` fields
    Nested {
        /// Generator options
        options: NestedOptions,
    },
}

impl FieldDefinition {
    /// Checks constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] when the name is blank, a range has
    /// `min > max`, a `Custom` field has no values, or a required string
    /// option (`prompt`, `string`, `value`, `endpoint`, `connection`, `sql`,
    /// `field`) is blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }

        match &self.kind {
            FieldKind::Number { options } => check_range(options.min, options.max)?,
            FieldKind::Float { options } => check_range(options.min, options.max)?,
            FieldKind::RandomString { options } => check_range(options.min, options.max)?,
            FieldKind::Custom { options } => {
                if options.values.is_empty() {
                    return Err(invalid("options.values", "must contain at least one value"));
                }
            }
            FieldKind::Ai { options } => require("options.prompt", &options.prompt)?,
            FieldKind::RegExp { options } => require("options.string", &options.string)?,
            FieldKind::Derived { options } => require("options.value", &options.value)?,
            FieldKind::ApiResponse { options } => {
                require("options.endpoint", &options.endpoint)?;
            }
            FieldKind::DbResponse { options } => {
                require("options.connection", &options.connection)?;
                require("options.sql", &options.sql)?;
            }
            FieldKind::Mapped { options } => require("options.field", &options.field)?,
            _ => {}
        }

        Ok(())
    }
}

/// Validates a whole field list, reporting the offending index.
///
/// # Errors
///
/// Returns the first [`Error::ValidationError`], with the field path
/// prefixed by `fields[<index>]`, or an error if the list is empty.
pub fn validate_fields(fields: &[FieldDefinition]) -> Result<()> {
    if fields.is_empty() {
        return Err(invalid("fields", "at least one field is required"));
    }

    for (index, field) in fields.iter().enumerate() {
        field.validate().map_err(|err| match err {
            Error::ValidationError { field, reason } => Error::ValidationError {
                field: format!("fields[{index}].{field}"),
                reason,
            },
            other => other,
        })?;
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> Error {
    Error::ValidationError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    Ok(())
}

fn check_range<T: PartialOrd>(min: Option<T>, max: Option<T>) -> Result<()> {
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(invalid("options.min", "must not be greater than options.max"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> FieldDefinition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_definition_round_trips_common_attributes() {
        let field = parse(json!({
            "name": "id",
            "type": "UUID",
            "active": false,
            "nested": [],
            "options": { "primaryKey": true },
            "function": "",
            "optional": false,
            "sensitive": true
        }));

        assert_eq!(field.name, "id");
        assert!(!field.active);
        assert!(field.sensitive);
        assert_eq!(
            field.kind,
            FieldKind::Uuid {
                options: UuidOptions {
                    primary_key: Some(true)
                }
            }
        );
    }

    #[test]
    fn test_defaults_for_omitted_common_attributes() {
        let field = parse(json!({ "name": "email", "type": "E-Mail", "options": {} }));
        assert!(field.active);
        assert!(!field.optional);
        assert!(field.nested.is_empty());
        assert!(matches!(field.kind, FieldKind::Email { .. }));
    }

    #[test]
    fn test_optionless_variant_accepts_missing_options() {
        let field = parse(json!({ "name": "city", "type": "City" }));
        assert!(matches!(field.kind, FieldKind::City { .. }));
    }

    #[test]
    fn test_spaced_type_names() {
        let cases = [
            ("First Name", "FirstName"),
            ("Phone Number", "PhoneNumber"),
            ("MongoDB ObjectID", "MongoObjectId"),
            ("Credit Card Number", "CreditCardNumber"),
        ];
        for (type_name, expected) in cases {
            let field = parse(json!({ "name": "f", "type": type_name, "options": {} }));
            let debug = format!("{:?}", field.kind);
            assert!(debug.starts_with(expected), "{type_name} parsed as {debug}");
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result =
            serde_json::from_value::<FieldDefinition>(json!({ "name": "x", "type": "Hologram" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_required_options_enforced() {
        let missing_prompt =
            serde_json::from_value::<FieldDefinition>(json!({ "name": "x", "type": "AI" }));
        assert!(missing_prompt.is_err());

        let missing_quantity = serde_json::from_value::<FieldDefinition>(json!({
            "name": "orders",
            "type": "Template",
            "options": { "array": true }
        }));
        assert!(missing_quantity.is_err());
    }

    #[test]
    fn test_invalid_sex_rejected() {
        let result = serde_json::from_value::<FieldDefinition>(json!({
            "name": "n",
            "type": "Name",
            "options": { "sex": "other" }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_mapped_options() {
        let field = parse(json!({
            "name": "label",
            "type": "Mapped",
            "options": { "field": "status", "map": { "A": "Active", "I": "Inactive" } }
        }));
        let FieldKind::Mapped { options } = &field.kind else {
            panic!("expected Mapped");
        };
        assert_eq!(options.map.get("A").map(String::as_str), Some("Active"));
        assert!(field.validate().is_ok());
    }

    #[test]
    fn test_serializes_type_and_options() {
        let field = parse(json!({
            "name": "score",
            "type": "Float",
            "options": { "min": 0.5, "precision": 2 }
        }));
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "Float");
        assert_eq!(value["options"]["precision"], 2);
        assert!(value["options"].get("max").is_none());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let field = parse(json!({
            "name": "age",
            "type": "Number",
            "options": { "min": 10, "max": 1 }
        }));
        let err = field.validate().unwrap_err();
        assert!(err.to_string().contains("options.min"));
    }

    #[test]
    fn test_validate_rejects_empty_custom_values() {
        let field = parse(json!({
            "name": "tier",
            "type": "Custom",
            "options": { "values": [] }
        }));
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let field = parse(json!({ "name": "  ", "type": "Color" }));
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_validate_fields_reports_index() {
        let fields = vec![
            parse(json!({ "name": "ok", "type": "Color" })),
            parse(json!({
                "name": "bad",
                "type": "DB Response",
                "options": { "connection": "c1", "sql": " " }
            })),
        ];
        let err = validate_fields(&fields).unwrap_err();
        assert!(err.to_string().contains("fields[1].options.sql"));
    }

    #[test]
    fn test_validate_fields_rejects_empty_list() {
        assert!(validate_fields(&[]).is_err());
    }
}
