//! Terminal front-end for the package builder
//!
//! The wizard itself stays free of terminal code: pages prompt and call
//! wizard operations, and `TerminalView` redraws from each snapshot.

pub mod app;
pub mod pages;
pub mod summary;

pub use app::{run_wizard, Outcome};
pub use summary::{format_money, render_summary, TerminalView};
