pub mod chart_service;
pub mod fetch_service;
pub mod zone_data_service;
