// Components module - reusable UI building blocks
//
// - File selector: left-docked directory listing
// - Viewport: bordered scrollable panel (content, history)
// - Text input: single-line query editor
// - Error banner: transient overlay for rejected selections
// - Status bar: key hints, selection, latest notice
//
// Each component is a focused, single-responsibility module.

pub mod error_banner;
pub mod file_selector;
pub mod scrollbar;
pub mod status_bar;
pub mod text_input;
pub mod viewport;

pub use error_banner::ErrorBanner;
