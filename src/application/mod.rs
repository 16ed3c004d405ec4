pub mod builders;
pub mod resolver;
pub mod services;
