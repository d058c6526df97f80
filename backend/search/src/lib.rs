//! Search Simulator.
//!
//! Simulation mode only: the result set is the same for every query and the
//! relevance scores are fixed, not computed from the query or the document.

pub mod simulator;

pub use simulator::{search, simulated_results, ResultSet, SearchResult};
