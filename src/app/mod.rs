// Application layer: pipelines wiring the domain services to the adapters.

pub mod pipelines;
