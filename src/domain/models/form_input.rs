use serde::{Deserialize, Deserializer, Serialize};

use super::{ApiKey, QueryRecord, MISSING_INPUT_WARNING};
use crate::domain::DomainError;

pub const DEFAULT_FARMER_NAME: &str = "Ram Kumar Baitha";
pub const DEFAULT_FARMER_LOCATION: &str = "Kishanganj, Bihar";
pub const DEFAULT_LAND_SIZE: &str = "0.25";
pub const DEFAULT_DISTRICT: &str = "Samastipur";
pub const DEFAULT_CROP_STAGE: &str = "Vegetative";
pub const DEFAULT_CATEGORY: &str = "Diesel Cost Saving";

pub const DISTRICT_SUGGESTIONS: &[&str] = &[
    "Araria",
    "Begusarai",
    "Bhagalpur",
    "Darbhanga",
    "Gaya",
    "Kishanganj",
    "Madhubani",
    "Muzaffarpur",
    "Nalanda",
    "Patna",
    "Purnia",
    "Saharsa",
    "Samastipur",
    "Sitamarhi",
    "Supaul",
    "Vaishali",
];

pub const CROP_STAGE_SUGGESTIONS: &[&str] = &[
    "Sowing",
    "Germination",
    "Vegetative",
    "Flowering",
    "Fruiting",
    "Maturity",
    "Harvest",
];

pub const CATEGORY_SUGGESTIONS: &[&str] = &[
    "Diesel Cost Saving",
    "Irrigation",
    "Pest Control",
    "Fertilizer",
    "Flood Preparedness",
    "Drought Management",
    "Market Prices",
];

/// Raw field values exactly as submitted by the operator.
///
/// Nothing here is trusted: [`ValidationPolicy::validate`] turns it into a
/// [`QueryRecord`]. Missing fields deserialize as blank. Serializing drops
/// the credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub farmer_name: String,
    pub farmer_location: String,
    /// Text as typed; JSON clients may also send a number.
    #[serde(deserialize_with = "deserialize_land_size")]
    pub land_size: String,
    pub district: String,
    pub crop_stage: String,
    pub category: String,
    pub question: String,
    /// Password-field key; blank counts as absent.
    #[serde(deserialize_with = "deserialize_api_key", skip_serializing)]
    pub api_key: Option<ApiKey>,
}

impl FormInput {
    /// The values the page shows before the operator has typed anything.
    pub fn prefilled() -> Self {
        Self {
            farmer_name: DEFAULT_FARMER_NAME.to_string(),
            farmer_location: DEFAULT_FARMER_LOCATION.to_string(),
            land_size: DEFAULT_LAND_SIZE.to_string(),
            district: DEFAULT_DISTRICT.to_string(),
            crop_stage: DEFAULT_CROP_STAGE.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            question: String::new(),
            api_key: None,
        }
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = district.into();
        self
    }

    pub fn with_api_key(mut self, key: Option<ApiKey>) -> Self {
        self.api_key = key;
        self
    }

    /// Copy without the credential, for re-rendering the form.
    pub fn without_api_key(&self) -> Self {
        Self {
            api_key: None,
            ..self.clone()
        }
    }
}

fn deserialize_api_key<'de, D>(deserializer: D) -> Result<Option<ApiKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ApiKey::parse))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LandSizeField {
    Text(String),
    Number(f64),
}

fn deserialize_land_size<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LandSizeField>::deserialize(deserializer)? {
        Some(LandSizeField::Text(text)) => text,
        Some(LandSizeField::Number(value)) => value.to_string(),
        None => String::new(),
    })
}

/// Which fields must be filled in before a submission may reach the API.
///
/// Question and district are always required; crop stage only when
/// `require_crop_stage` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    require_crop_stage: bool,
}

impl ValidationPolicy {
    pub fn new() -> Self {
        Self {
            require_crop_stage: false,
        }
    }

    pub fn with_require_crop_stage(mut self, required: bool) -> Self {
        self.require_crop_stage = required;
        self
    }

    pub fn requires_crop_stage(&self) -> bool {
        self.require_crop_stage
    }

    pub fn validate(&self, input: &FormInput) -> Result<QueryRecord, DomainError> {
        let question = input.question.trim();
        let district = input.district.trim();

        if question.is_empty() || district.is_empty() {
            return Err(DomainError::invalid_input(MISSING_INPUT_WARNING));
        }

        if self.require_crop_stage && input.crop_stage.trim().is_empty() {
            return Err(DomainError::invalid_input(
                "Please enter the current crop stage.",
            ));
        }

        let land_size = parse_land_size(&input.land_size)?;

        Ok(QueryRecord::new(question)
            .with_operator_name(input.farmer_name.as_str())
            .with_operator_location(input.farmer_location.as_str())
            .with_land_size(land_size)
            .with_district(district)
            .with_crop_stage(input.crop_stage.as_str())
            .with_category(input.category.as_str()))
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_land_size(raw: &str) -> Result<f64, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(DomainError::invalid_input(
            "Land size must be a non-negative number of hectares.",
        )),
    }
}
