//! Command dispatch: bridges CLI args -> reconcilers -> output formatting.

pub mod config_cmd;
pub mod lifecycle;
pub mod server;
pub mod util;

use sonarsync_core::{ResourceIdentity, Session};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

use self::lifecycle::Action;

/// Dispatch a server-bound command to the appropriate handler.
///
/// Declaration files are parsed before connecting, so a broken file never
/// costs a round trip.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Create(args) => {
            let declaration = util::read_declaration(&args.file)?;
            lifecycle::handle(connect(global).await?, declaration, Action::Create, global).await
        }
        Command::Read(args) => {
            let declaration = util::read_declaration(&args.file)?;
            let action = Action::Read(ResourceIdentity::from(args.id));
            lifecycle::handle(connect(global).await?, declaration, action, global).await
        }
        Command::Update(args) => {
            let declaration = util::read_declaration(&args.file)?;
            let action = Action::Update(ResourceIdentity::from(args.id));
            lifecycle::handle(connect(global).await?, declaration, action, global).await
        }
        Command::Delete(args) => {
            let declaration = util::read_declaration(&args.file)?;
            let action = Action::Delete(ResourceIdentity::from(args.id));
            lifecycle::handle(connect(global).await?, declaration, action, global).await
        }
        Command::Import(args) => {
            let identity = ResourceIdentity::from(args.id);
            lifecycle::import(connect(global).await?, args.kind, identity, global).await
        }
        Command::Server => server::handle(&connect(global).await?, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}

/// Resolve the server config and discover the server.
async fn connect(global: &GlobalOpts) -> Result<Session, CliError> {
    let server = config::build_server_config(global)?;
    Session::connect(&server)
        .await
        .map_err(|e| CliError::from(e).with_url(&server.url))
}
