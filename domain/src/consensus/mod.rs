//! Vote counting and consensus outcome types

pub mod tally;

pub use tally::{ConsensusResult, DecisionMethod, Vote, VoteTally, tally_votes};
