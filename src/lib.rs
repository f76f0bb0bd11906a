//! Roast generation over an LLM chat-completion service.
//!
//! Three flows share one pipeline: validate the request, render a per-flow,
//! per-language prompt template, and submit it to the completion backend.
//! The image flow additionally decodes a data-URI payload and enriches the
//! prompt with an analysis fragment from an external image-analysis service,
//! falling back to a locally simulated fragment when that service is
//! disabled or failing.

pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod prompts;
pub mod roast;
pub mod template;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{Result, RoastError};
pub use roast::RoastService;
pub use types::{ImageRoastRequest, Language, SocialRoastRequest, TextRoastRequest};
