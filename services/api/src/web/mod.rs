pub mod auth;
pub mod rest;
pub mod state;

// Re-export the handlers the server binary wires into its router.
pub use auth::{login_handler, register_handler};
pub use rest::{
    astro_health_handler, birth_chart_handler, full_assessment_handler, health_handler,
    list_tests_handler, personality_health_handler, root_handler, single_assessment_handler,
};
