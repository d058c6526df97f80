pub mod session;
pub mod ticker;

pub use session::{format_clock, AudioSession, AudioState, AudioView, TickOutcome};
pub use ticker::Ticker;
