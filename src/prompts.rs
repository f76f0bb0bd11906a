use std::collections::HashMap;

use crate::error::{Result, RoastError};
use crate::template::Template;
use crate::types::{Flow, Language};

const TEXT_ROAST_EN: &str = "You are a professional roast comedian. You will generate a roast in English based on the following information about the person:

Name: {{name}}
Occupation: {{occupation}}
Hobbies: {{hobbies}}
Quirks: {{quirks}}
{{#if extras}}
Additional Information: {{extras}}
{{/if}}

The intensity of the roast should be adjusted based on the intensity level, from 1 (gentle) to 10 (harsh). The current intensity is {{intensity}}.

Write a roast that is tailored to the person and their information. The roast should be funny, engaging, and deliver a humorous critique. The roast must be at least 60 words long. Respond in English.
";

const TEXT_ROAST_ES: &str = "Eres un comediante profesional de roasts. Generarás un roast en español basado en la siguiente información sobre la persona:

Nombre: {{name}}
Ocupación: {{occupation}}
Pasatiempos: {{hobbies}}
Manías: {{quirks}}
{{#if extras}}
Información Adicional: {{extras}}
{{/if}}

La intensidad del roast debe ajustarse según el nivel de intensidad, de 1 (suave) a 10 (fuerte). La intensidad actual es {{intensity}}.

Escribe un roast que se adapte a la persona y su información. El roast debe ser divertido, atractivo y ofrecer una crítica humorística. El roast debe tener un mínimo de 60 palabras. Responde en español.
";

const SOCIAL_ROAST_EN: &str = "You are a professional roast comedian. You will generate a roast in English based on the following social media profile information:

Platform: {{platform}}
Username: {{username}}
Biography: {{biography}}

The intensity of the roast should be adjusted based on the intensity level, from 1 (gentle) to 10 (harsh). The current intensity is {{intensity}}.

Write a roast that is tailored to the person's social media persona. Consider common stereotypes associated with the platform if relevant, but focus on the provided username and biography. The roast should be funny, engaging, and deliver a humorous critique. The roast must be at least 60 words long. Respond in English.
";

const SOCIAL_ROAST_ES: &str = "Eres un comediante profesional de roasts. Generarás un roast en español basado en la siguiente información del perfil de redes sociales:

Plataforma: {{platform}}
Nombre de usuario: {{username}}
Biografía: {{biography}}

La intensidad del roast debe ajustarse según el nivel de intensidad, de 1 (suave) a 10 (fuerte). La intensidad actual es {{intensity}}.

Escribe un roast que se adapte a la persona y su perfil en redes sociales. Considera los estereotipos comunes asociados con la plataforma si es relevante, pero céntrate en el nombre de usuario y la biografía proporcionados. El roast debe ser divertido, atractivo y ofrecer una crítica humorística. El roast debe tener un mínimo de 60 palabras. Responde en español.
";

const IMAGE_ROAST_EN: &str = "You are a professional roast comedian. You will generate a roast in English based on an analysis of the provided image and the user's desired intensity.
The image has been analyzed and the following was noted: {{analysis}}

The intensity of the roast should be adjusted based on the intensity level, from 1 (gentle) to 10 (harsh). The current intensity is {{intensity}}.

Write a roast that is tailored to the image's content and the analysis. The roast should be funny, engaging, and deliver a humorous critique. The roast must be at least 60 words long. Respond in English.
";

const IMAGE_ROAST_ES: &str = "Eres un comediante profesional de roasts. Generarás un roast en español basado en un análisis de la imagen proporcionada y la intensidad deseada por el usuario.
La imagen ha sido analizada y se ha observado lo siguiente: {{analysis}}

La intensidad del roast debe ajustarse según el nivel de intensidad, de 1 (suave) a 10 (fuerte). La intensidad actual es {{intensity}}.

Escribe un roast que se adapte al contenido de la imagen y al análisis. El roast debe ser divertido, atractivo y ofrecer una crítica humorística. El roast debe tener un mínimo de 60 palabras. Responde en español.
";

/// The fixed set of prompt templates, keyed by (flow, language) and parsed
/// once when the service is constructed.
#[derive(Debug)]
pub struct PromptCatalog {
    templates: HashMap<(Flow, Language), Template>,
}

impl PromptCatalog {
    pub fn new() -> Result<Self> {
        let sources = [
            (Flow::Text, Language::En, TEXT_ROAST_EN),
            (Flow::Text, Language::Es, TEXT_ROAST_ES),
            (Flow::Social, Language::En, SOCIAL_ROAST_EN),
            (Flow::Social, Language::Es, SOCIAL_ROAST_ES),
            (Flow::Image, Language::En, IMAGE_ROAST_EN),
            (Flow::Image, Language::Es, IMAGE_ROAST_ES),
        ];

        let mut templates = HashMap::new();
        for (flow, language, source) in sources {
            templates.insert((flow, language), Template::parse(source)?);
        }
        Ok(Self { templates })
    }

    pub fn get(&self, flow: Flow, language: Language) -> Result<&Template> {
        self.templates.get(&(flow, language)).ok_or_else(|| {
            RoastError::Configuration(format!(
                "no prompt template for flow '{}' and language '{}'",
                flow.name(),
                language.code()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateContext;

    #[test]
    fn catalog_builds_and_serves_all_six_templates() {
        let catalog = PromptCatalog::new().unwrap();
        for flow in [Flow::Text, Flow::Social, Flow::Image] {
            for language in [Language::En, Language::Es] {
                assert!(catalog.get(flow, language).is_ok());
            }
        }
    }

    #[test]
    fn every_template_references_the_intensity() {
        for source in [
            TEXT_ROAST_EN,
            TEXT_ROAST_ES,
            SOCIAL_ROAST_EN,
            SOCIAL_ROAST_ES,
            IMAGE_ROAST_EN,
            IMAGE_ROAST_ES,
        ] {
            assert!(source.contains("{{intensity}}"));
        }
    }

    #[test]
    fn rendered_text_roast_stays_in_one_language() {
        let catalog = PromptCatalog::new().unwrap();
        let mut context = TemplateContext::new();
        context.insert("name", "Alex".to_string());
        context.insert("occupation", "juggler".to_string());
        context.insert("hobbies", "unicycling".to_string());
        context.insert("quirks", "talks to plants".to_string());
        context.insert("intensity", "7".to_string());

        let english = catalog
            .get(Flow::Text, Language::En)
            .unwrap()
            .render(&context);
        assert!(english.contains("Name: Alex"));
        assert!(!english.contains("Nombre:"));

        let spanish = catalog
            .get(Flow::Text, Language::Es)
            .unwrap()
            .render(&context);
        assert!(spanish.contains("Nombre: Alex"));
        assert!(!spanish.contains("Occupation:"));
    }
}
