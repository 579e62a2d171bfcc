// Domain layer: release/card models, ports (interfaces) and the pure derivation services.

pub mod model;
pub mod ports;

pub mod services;
