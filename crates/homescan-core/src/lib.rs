pub mod agent;
pub mod ascii_json;
pub mod error;
pub mod models;
pub mod normalize;
pub mod scrape;
pub mod traits;
pub mod util;


pub use agent::ExtractionAgent;
pub use ascii_json::{AsciiFormatter, to_ascii_json};
pub use error::AppError;
pub use models::{ExtractionContext, ExtractionResult, NOT_MENTIONED, RawPage};
pub use normalize::normalize;
pub use scrape::{PipelineStage, ScrapeService};
pub use traits::{Fetcher, LanguageModel, TextExtractor};
pub use util::parse_target_url;
