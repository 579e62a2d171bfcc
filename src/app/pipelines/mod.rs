pub mod card_pipeline;

pub use card_pipeline::{build_card, CardPipeline};
