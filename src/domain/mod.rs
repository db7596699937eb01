// Domain layer: value types and ports (interfaces) for external collaborators.

pub mod model;
pub mod ports;
