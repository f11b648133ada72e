pub mod fetcher;
pub mod llm;
pub mod text;

pub use fetcher::ReqwestFetcher;
pub use llm::{DEFAULT_BASE_URL, OpenAiModel};
pub use text::HtmlTextExtractor;
