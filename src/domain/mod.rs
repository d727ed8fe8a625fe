// Domain layer: GeoJSON models, ports, and the pure transforms between them.

pub mod model;
pub mod ports;

pub mod services;
