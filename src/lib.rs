// Manometer calibration - Error classification and offset adjustment log
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
