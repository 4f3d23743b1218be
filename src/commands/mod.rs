mod config_cmd;
mod items;
mod shell;

pub use config_cmd::ConfigCommand;
pub use items::{AddCommand, ClearCommand, DeleteCommand, ListCommand, UpdateCommand};
pub use shell::run_shell;
