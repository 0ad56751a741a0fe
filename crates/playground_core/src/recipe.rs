use serde::{Deserialize, Deserializer, Serialize};

/// Body returned by `GET /recipes/extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub recipe: ExtractedRecipe,
    #[serde(default)]
    pub metadata: TokenUsage,
}

/// Structured recipe as produced by the extraction service.
///
/// Only `title` is mandatory; the service omits fields it could not infer
/// (the canonical `url` in particular is never serialized by the current
/// server), so everything else falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub servings: u32,
    /// Minutes.
    #[serde(default)]
    pub prep_time: u32,
    /// Minutes.
    #[serde(default)]
    pub cook_time: u32,
    /// Minutes.
    #[serde(default)]
    pub total_time: u32,
    /// 1 (easy) to 3 (hard) when the service reports it.
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub nutritional_info: NutritionalInfo,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub text: String,
    #[serde(default)]
    pub optional: bool,
}

/// Nutrition per 100 g.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionalInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fats: f64,
    pub fiber: f64,
    pub sugar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_token_count: u64,
    pub candidates_token_count: u64,
}

/// Nil slices on the server are serialized as `null`; read them as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ExtractionResponse {
    /// Minimal response carrying only a title; used by tests and fixtures.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            recipe: ExtractedRecipe::titled(title),
            metadata: TokenUsage::default(),
        }
    }
}

impl ExtractedRecipe {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            servings: 0,
            prep_time: 0,
            cook_time: 0,
            total_time: 0,
            difficulty: None,
            ingredients: Vec::new(),
            sections: Vec::new(),
            notes: String::new(),
            nutritional_info: NutritionalInfo::default(),
            url: String::new(),
        }
    }
}
