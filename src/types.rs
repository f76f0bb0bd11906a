use std::fmt;

use serde::Deserialize;

use crate::error::{Result, RoastError};

pub const DEFAULT_INTENSITY: u8 = 5;

const CONSENT_REQUIRED_EN: &str =
    "You must accept the terms and conditions to generate an image roast.";
const CONSENT_REQUIRED_ES: &str =
    "Debes aceptar los términos y condiciones para generar un roast de imagen.";

/// Output language for a roast. Requests default to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    pub fn parse(code: &str) -> Result<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(RoastError::Validation(format!(
                "unsupported language '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The three roast request kinds; used together with [`Language`] as the
/// prompt catalog key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    Text,
    Social,
    Image,
}

impl Flow {
    pub fn name(&self) -> &'static str {
        match self {
            Flow::Text => "text",
            Flow::Social => "social",
            Flow::Image => "image",
        }
    }
}

fn default_intensity() -> u8 {
    DEFAULT_INTENSITY
}

fn require_field(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RoastError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn check_intensity(intensity: u8) -> Result<()> {
    if !(1..=10).contains(&intensity) {
        return Err(RoastError::Validation(format!(
            "intensity must be between 1 and 10, got {intensity}"
        )));
    }
    Ok(())
}

/// Roast a subject described by free-form attributes.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRoastRequest {
    pub name: String,
    pub occupation: String,
    pub hobbies: String,
    pub quirks: String,
    #[serde(default)]
    pub extras: Option<String>,
    #[serde(default = "default_intensity")]
    pub intensity: u8,
    #[serde(default)]
    pub language: Language,
}

impl TextRoastRequest {
    pub fn validate(&self) -> Result<()> {
        require_field(&self.name, "name")?;
        require_field(&self.occupation, "occupation")?;
        require_field(&self.hobbies, "hobbies")?;
        require_field(&self.quirks, "quirks")?;
        check_intensity(self.intensity)
    }
}

/// Roast a subject described by a social-media profile.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialRoastRequest {
    pub platform: String,
    pub username: String,
    pub biography: String,
    #[serde(default = "default_intensity")]
    pub intensity: u8,
    #[serde(default)]
    pub language: Language,
}

impl SocialRoastRequest {
    pub fn validate(&self) -> Result<()> {
        require_field(&self.platform, "platform")?;
        require_field(&self.username, "username")?;
        require_field(&self.biography, "biography")?;
        check_intensity(self.intensity)
    }
}

/// Roast a subject from an uploaded image, supplied as a
/// `data:<mime>;base64,<payload>` URI. Requires explicit consent.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRoastRequest {
    pub image_data_uri: String,
    #[serde(default = "default_intensity")]
    pub intensity: u8,
    #[serde(default)]
    pub language: Language,
    pub accept_terms: bool,
}

impl ImageRoastRequest {
    pub fn validate(&self) -> Result<()> {
        if !self.accept_terms {
            let message = match self.language {
                Language::En => CONSENT_REQUIRED_EN,
                Language::Es => CONSENT_REQUIRED_ES,
            };
            return Err(RoastError::Consent(message.to_string()));
        }
        require_field(&self.image_data_uri, "image_data_uri")?;
        check_intensity(self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_request() -> TextRoastRequest {
        TextRoastRequest {
            name: "Alex".to_string(),
            occupation: "juggler".to_string(),
            hobbies: "unicycling".to_string(),
            quirks: "talks to plants".to_string(),
            extras: None,
            intensity: DEFAULT_INTENSITY,
            language: Language::En,
        }
    }

    #[test]
    fn accepts_a_well_formed_text_request() {
        assert!(text_request().validate().is_ok());
    }

    #[test]
    fn rejects_intensity_outside_bounds() {
        let mut request = text_request();
        request.intensity = 0;
        assert!(matches!(
            request.validate(),
            Err(RoastError::Validation(_))
        ));

        request.intensity = 11;
        assert!(matches!(
            request.validate(),
            Err(RoastError::Validation(_))
        ));
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut request = text_request();
        request.occupation = "   ".to_string();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("occupation"));
    }

    #[test]
    fn consent_refusal_is_localized() {
        let request = ImageRoastRequest {
            image_data_uri: "data:image/png;base64,AQID".to_string(),
            intensity: 5,
            language: Language::Es,
            accept_terms: false,
        };
        match request.validate() {
            Err(RoastError::Consent(message)) => {
                assert!(message.contains("términos"));
            }
            other => panic!("expected consent error, got {other:?}"),
        }
    }

    #[test]
    fn empty_image_payload_is_a_validation_error() {
        let request = ImageRoastRequest {
            image_data_uri: String::new(),
            intensity: 5,
            language: Language::En,
            accept_terms: true,
        };
        assert!(matches!(
            request.validate(),
            Err(RoastError::Validation(_))
        ));
    }

    #[test]
    fn parses_language_codes_case_insensitively() {
        assert_eq!(Language::parse("ES").unwrap(), Language::Es);
        assert!(Language::parse("fr").is_err());
    }

    #[test]
    fn deserializes_defaults_for_optional_fields() {
        let request: TextRoastRequest = serde_json::from_str(
            r#"{"name":"Alex","occupation":"juggler","hobbies":"unicycling","quirks":"talks to plants"}"#,
        )
        .unwrap();
        assert_eq!(request.intensity, DEFAULT_INTENSITY);
        assert_eq!(request.language, Language::En);
        assert!(request.extras.is_none());
    }
}
