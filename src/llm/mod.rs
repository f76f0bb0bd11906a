pub mod analysis;
pub mod completion;
pub mod simulate;

pub use analysis::{HttpImageAnalyzer, ImageAnalyzer};
pub use completion::{CompletionBackend, HttpCompletionClient};
pub use simulate::AnalysisSimulator;

pub(crate) fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}
