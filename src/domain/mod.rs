// Domain layer - Core fetch types and rules

pub mod errors;
pub mod model;
pub mod rules;
