use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Represents a chat completion model identifier.
///
/// This can be a predefined model or a custom string value for models the
/// endpoint serves that are not listed here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model identifiers.
    Known(KnownModel),

    /// Custom model identifier (for newer, fine-tuned or self-hosted models).
    Custom(String),
}

/// Known chat completion models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// GPT-4o mini, the default model.
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,

    /// GPT-4o.
    #[serde(rename = "gpt-4o")]
    Gpt4o,

    /// GPT-4.1 mini.
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,

    /// GPT-4.1.
    #[serde(rename = "gpt-4.1")]
    Gpt41,

    /// GPT-3.5 Turbo.
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
}

impl KnownModel {
    const ALL: [KnownModel; 5] = [
        KnownModel::Gpt4oMini,
        KnownModel::Gpt4o,
        KnownModel::Gpt41Mini,
        KnownModel::Gpt41,
        KnownModel::Gpt35Turbo,
    ];

    /// The identifier sent to the endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownModel::Gpt4oMini => "gpt-4o-mini",
            KnownModel::Gpt4o => "gpt-4o",
            KnownModel::Gpt41Mini => "gpt-4.1-mini",
            KnownModel::Gpt41 => "gpt-4.1",
            KnownModel::Gpt35Turbo => "gpt-3.5-turbo",
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Model::Known(KnownModel::Gpt4oMini)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        KnownModel::ALL
            .into_iter()
            .find(|model| model.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown model: {s}"))
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        let trimmed = model.trim();
        match trimmed.parse::<KnownModel>() {
            Ok(known) => Model::Known(known),
            Err(_) => Model::Custom(trimmed.to_string()),
        }
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::from(model.to_string())
    }
}
