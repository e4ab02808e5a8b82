//! Server discovery handler.

use serde::Serialize;

use sonarsync_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct ServerView<'a> {
    edition: &'a str,
    version: &'a str,
    bindings_supported: bool,
}

pub fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let info = session.server();
    let view = ServerView {
        edition: &info.edition,
        version: &info.version,
        bindings_supported: !info.is_community(),
    };
    let rendered = output::render_single(global.output, &view)?;
    output::print_output(&rendered);
    Ok(())
}
