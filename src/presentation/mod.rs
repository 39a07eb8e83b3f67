// Presentation layer - Session state and HTTP surface
pub mod app_state;
pub mod handlers;
pub mod session;
pub mod view;
