pub mod report;
pub mod tournament;

pub use report::write_bundle;
pub use tournament::{TournamentManager, TournamentOptions, TournamentResults};
