// Domain layer - Calibration types and formulas
pub mod calibration;
pub mod error;
pub mod offset_log;
pub mod pressure;
