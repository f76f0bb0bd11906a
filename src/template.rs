use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Result, RoastError};

static VAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder regex"));
static IF_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{\{#if (\w+)\}\}\n?(.*?)\{\{/if\}\}\n?").expect("valid conditional regex")
});

pub type TemplateContext = HashMap<&'static str, String>;

/// A prompt template with `{{field}}` substitution and a single conditional
/// construct: `{{#if field}}...{{/if}}` keeps its body only when the named
/// field is present and non-blank in the context.
///
/// Rendering is pure and never fails; a missing field substitutes as the
/// empty string. The orchestrator supplies every required field before
/// rendering.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let opens = source.matches("{{#if").count();
        let closes = source.matches("{{/if}}").count();
        if opens != closes {
            return Err(RoastError::Configuration(format!(
                "unbalanced conditional block in template ({opens} open, {closes} close)"
            )));
        }
        Ok(Self {
            source: source.to_string(),
        })
    }

    pub fn render(&self, context: &TemplateContext) -> String {
        let with_conditionals = IF_BLOCK_RE.replace_all(&self.source, |caps: &Captures| {
            let field = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
            match context.get(field) {
                Some(value) if !value.trim().is_empty() => {
                    caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string()
                }
                _ => String::new(),
            }
        });

        VAR_RE
            .replace_all(&with_conditionals, |caps: &Captures| {
                let field = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                context.get(field).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&'static str, &str)]) -> TemplateContext {
        pairs
            .iter()
            .map(|(key, value)| (*key, value.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_fields_from_the_context() {
        let template = Template::parse("Name: {{name}}, Intensity: {{intensity}}.").unwrap();
        let rendered = template.render(&context(&[("name", "Alex"), ("intensity", "8")]));
        assert_eq!(rendered, "Name: Alex, Intensity: 8.");
    }

    #[test]
    fn missing_field_renders_as_empty() {
        let template = Template::parse("Hello {{name}}!").unwrap();
        assert_eq!(template.render(&TemplateContext::new()), "Hello !");
    }

    #[test]
    fn conditional_block_included_when_field_present() {
        let template =
            Template::parse("Intro\n{{#if extras}}Extras: {{extras}}\n{{/if}}\nOutro").unwrap();
        let rendered = template.render(&context(&[("extras", "loves karaoke")]));
        assert!(rendered.contains("Extras: loves karaoke"));
        assert!(rendered.contains("Outro"));
    }

    #[test]
    fn conditional_block_omitted_when_field_absent_or_blank() {
        let template =
            Template::parse("Intro\n{{#if extras}}Extras: {{extras}}\n{{/if}}\nOutro").unwrap();

        let rendered = template.render(&TemplateContext::new());
        assert!(!rendered.contains("Extras:"));

        let rendered = template.render(&context(&[("extras", "   ")]));
        assert!(!rendered.contains("Extras:"));
    }

    #[test]
    fn rejects_unbalanced_conditionals() {
        let result = Template::parse("{{#if extras}}dangling");
        assert!(matches!(result, Err(RoastError::Configuration(_))));
    }
}
