use super::{CommandContext, CommandHandler};

const HELP: &str = "\
/check <floors> - record checked floors, e.g. /check 12, /check 7-10, /check 3, 5, 9
/summary - checked and unchecked floors
/stats - drill statistics";

/// `/help` and `/start`.
pub struct HelpHandler;

impl CommandHandler for HelpHandler {
    fn command(&self) -> &'static str {
        "/help"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["/start"]
    }

    fn handle(&self, _args: &str, _ctx: &CommandContext) -> String {
        HELP.to_string()
    }
}
