pub mod types;
pub mod similarity;
pub mod utterance;
pub mod resolver;

pub use types::{CommandTable, Intent, MatchReport, NoMatch};
pub use resolver::CommandResolver;
pub use utterance::Utterance;
