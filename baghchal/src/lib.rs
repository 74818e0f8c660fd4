pub use board::*;
pub use candidates::*;
pub use errors::*;
pub use game::*;
pub use protocol_types::*;
pub use qubo::*;
pub use rules::*;
pub use selector::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod board;
mod candidates;
mod errors;
mod game;
mod protocol_types;
mod qubo;
mod rules;
mod selector;
mod visualization;
