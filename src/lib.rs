//! Window and docking manager for the survey dashboard: free-floating panels
//! on a canvas, a resizable sidebar dock, and the drag, drop and resize
//! gestures that move panels between them.

pub mod components;
pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod gesture;
pub mod layout;
pub mod panel;
pub mod runner;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
