//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and colors
//! - Reusable widgets (buttons, popups)
//! - Start and Explore screen rendering

pub mod theme;
pub mod render;
pub mod widgets;

pub use theme::Theme;
pub use render::render;
