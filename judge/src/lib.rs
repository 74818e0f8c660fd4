mod config;
mod game;
mod goats;
mod oracle;
pub use config::*;
pub use game::*;
pub use goats::*;
pub use oracle::*;
