pub mod action;
pub mod aggregate;
pub mod chart;
pub mod exchange;
pub mod payload;
pub mod settings;
pub mod state;
pub mod zone;
