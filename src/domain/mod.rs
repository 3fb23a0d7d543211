// Domain layer: cart aggregate, backend shapes and the document store port.

pub mod cart;
pub mod model;
pub mod ports;
