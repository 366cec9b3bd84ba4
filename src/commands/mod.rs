mod command_error;
mod command_handler;
mod echo;
mod get;
mod ping;
mod set;
mod type_command;
mod xadd;
mod xrange;
mod xread;

pub use command_error::CommandError;
pub use command_handler::CommandHandler;
