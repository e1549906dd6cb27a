//! Session state: the authoritative record driving every recompute

mod session;
mod theme;

pub use session::AnalysisSession;
pub use theme::Theme;
