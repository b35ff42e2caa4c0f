// Domain layer: pricing model, invariants and ports (interfaces).
// Nothing in here touches files or spreadsheets directly.

pub mod item_price;
pub mod model;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod projection;
pub mod region;
