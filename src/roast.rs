use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::llm::{
    AnalysisSimulator, CompletionBackend, HttpCompletionClient, HttpImageAnalyzer, ImageAnalyzer,
};
use crate::media::{self, DecodedImage};
use crate::prompts::PromptCatalog;
use crate::template::TemplateContext;
use crate::types::{Flow, ImageRoastRequest, Language, SocialRoastRequest, TextRoastRequest};
use crate::utils::http::build_http_client;
use crate::utils::timing::log_llm_timing;

const ANALYSIS_FALLBACK_PREFIX: &str =
    "Image analysis attempt failed. Falling back to simulated analysis: ";

/// Orchestrates the three roast flows: validates the request, renders the
/// prompt from the catalog, and submits it to the completion backend. For the
/// image flow it also decodes the payload and obtains an analysis fragment,
/// degrading to a simulated fragment whenever the analyzer fails.
pub struct RoastService {
    config: Config,
    catalog: PromptCatalog,
    completion: Box<dyn CompletionBackend>,
    analyzer: Box<dyn ImageAnalyzer>,
    simulator: AnalysisSimulator,
}

impl RoastService {
    /// Wires HTTP backends from the configuration.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(config.http_timeout_seconds)?;
        let completion = Box::new(HttpCompletionClient::new(&config, client.clone()));
        let analyzer = Box::new(HttpImageAnalyzer::new(
            config.image_analysis_url.clone(),
            client,
        ));
        Self::with_backends(config, completion, analyzer, AnalysisSimulator::new())
    }

    /// Injects collaborators; used by tests and by hosts that bring their
    /// own clients.
    pub fn with_backends(
        config: Config,
        completion: Box<dyn CompletionBackend>,
        analyzer: Box<dyn ImageAnalyzer>,
        simulator: AnalysisSimulator,
    ) -> Result<Self> {
        Ok(Self {
            config,
            catalog: PromptCatalog::new()?,
            completion,
            analyzer,
            simulator,
        })
    }

    pub async fn generate_roast(&self, request: &TextRoastRequest) -> Result<String> {
        request.validate()?;

        let mut context = TemplateContext::new();
        context.insert("name", request.name.clone());
        context.insert("occupation", request.occupation.clone());
        context.insert("hobbies", request.hobbies.clone());
        context.insert("quirks", request.quirks.clone());
        if let Some(extras) = &request.extras {
            context.insert("extras", extras.clone());
        }
        context.insert("intensity", request.intensity.to_string());

        let prompt = self
            .catalog
            .get(Flow::Text, request.language)?
            .render(&context);
        self.submit(Flow::Text, &prompt, None).await
    }

    pub async fn generate_social_roast(&self, request: &SocialRoastRequest) -> Result<String> {
        request.validate()?;

        let mut context = TemplateContext::new();
        context.insert("platform", request.platform.clone());
        context.insert("username", request.username.clone());
        context.insert("biography", request.biography.clone());
        context.insert("intensity", request.intensity.to_string());

        let prompt = self
            .catalog
            .get(Flow::Social, request.language)?
            .render(&context);
        self.submit(Flow::Social, &prompt, None).await
    }

    pub async fn generate_image_roast(&self, request: &ImageRoastRequest) -> Result<String> {
        request.validate()?;

        let image = media::decode_data_uri(&request.image_data_uri)?;
        let analysis = self.obtain_analysis(&image, request.language).await;

        let mut context = TemplateContext::new();
        context.insert("analysis", analysis);
        context.insert("intensity", request.intensity.to_string());

        let prompt = self
            .catalog
            .get(Flow::Image, request.language)?
            .render(&context);
        self.submit(Flow::Image, &prompt, Some(&image)).await
    }

    async fn obtain_analysis(&self, image: &DecodedImage, language: Language) -> String {
        if !self.config.enable_image_analysis {
            debug!("Image analysis disabled; using simulated fragment");
            return self.simulator.simulate(language);
        }

        match self.analyzer.analyze(image, language).await {
            Ok(fragment) => fragment,
            Err(err) => {
                warn!("Image analysis failed, falling back to simulation: {err}");
                format!(
                    "{ANALYSIS_FALLBACK_PREFIX}{}",
                    self.simulator.simulate(language)
                )
            }
        }
    }

    async fn submit(
        &self,
        flow: Flow,
        prompt: &str,
        image: Option<&DecodedImage>,
    ) -> Result<String> {
        let operation = format!("roast:{}", flow.name());
        log_llm_timing(
            "completion",
            &self.config.completion_model,
            &operation,
            || async { self.completion.complete(prompt, image).await },
        )
        .await
    }
}
