pub mod astro_api;
pub mod chain;
pub mod llm;
pub mod mock;
pub mod prokerala;

pub use astro_api::AstroApiAdapter;
pub use chain::{ChartResolution, ProviderChain};
pub use llm::OpenAiAssessmentAdapter;
pub use mock::{default_chart, MockChartAdapter};
pub use prokerala::ProkeralaAdapter;
