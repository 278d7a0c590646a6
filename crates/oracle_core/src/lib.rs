pub mod assessment;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod tables;

pub use assessment::{generate_bundle, user_slug, FrameworkResult, LLM_CONFIDENCE, RULE_BASED_CONFIDENCE};
pub use domain::{
    AssessmentBundle, Aspect, BirthChart, BirthInput, FrameworkKind, Planet, PlanetPosition,
    ZodiacSign,
};
pub use ports::{AssessmentGenerator, ChartProvider, PortError, PortResult};
