pub mod errors;

pub use errors::BotError;
