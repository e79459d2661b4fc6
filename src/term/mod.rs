//! Terminal front end: raw-mode backend, game view, and the terminal
//! implementation of the presentation seam.

pub mod renderer;
pub mod stage;
pub mod view;

pub use renderer::TerminalRenderer;
pub use stage::TermStage;
pub use view::GameView;
