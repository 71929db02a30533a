//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Main frame layout, route selection and overlays
//! - `input`: Keyboard event handling
//! - `form`: Text fields and form focus handling
//! - `styles`: Color scheme and text styling
//! - `screens`: Per-screen content (loading, sign-in, sign-up, dashboard)

pub mod form;
pub mod input;
pub mod render;
pub mod screens;
pub mod styles;
