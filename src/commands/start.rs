use serenity::builder::CreateCommand;

use crate::context::AppContext;

pub fn register() -> CreateCommand {
    CreateCommand::new("start").description("Show the welcome message")
}

pub fn execute(app: &AppContext) -> String {
    format!("Hello, this is a {} price tracker for testing.", app.config.symbol)
}
