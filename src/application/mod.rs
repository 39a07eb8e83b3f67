// Application layer - Use cases over the domain
pub mod calibration_service;
pub mod clock;
pub mod offset_log_service;
