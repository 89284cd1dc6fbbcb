pub mod pipeline;
pub mod types;

pub use pipeline::RecommendationPipeline;
pub use types::{RecommendationPayload, RecordRequest, TextRecommendRequest};
