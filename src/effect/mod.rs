pub mod classes;
pub mod opacity;
pub mod plan;
pub mod settings;
