pub mod providers;
pub mod recommendations;
pub mod transport;

pub use recommendations::RecommendationService;
