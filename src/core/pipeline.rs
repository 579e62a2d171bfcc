pub use crate::app::pipelines::card_pipeline::{build_card, CardPipeline};
