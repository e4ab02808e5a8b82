//! Create / Read / Update / Delete / Import handlers.
//!
//! Each invocation drives exactly one lifecycle call against one reconciler
//! and prints the result.

use secrecy::ExposeSecret;
use tracing::info;

use sonarsync_core::{
    AlmBindings, Declaration, Permissions, Reconcile, Reconciled, ResourceIdentity, ResourceKind,
    Session, UserTokenDeclaration, UserTokens,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// One lifecycle call. Every call but Create needs the identity Create
/// returned.
#[derive(Debug)]
pub enum Action {
    Create,
    Read(ResourceIdentity),
    Update(ResourceIdentity),
    Delete(ResourceIdentity),
}

pub async fn handle(
    session: Session,
    declaration: Declaration,
    action: Action,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let kind = declaration.kind();
    info!(%kind, ?action, "reconciling");

    let outcome = match declaration {
        Declaration::Permissions(d) => {
            run(&Permissions::new(session), &d, action, Declaration::Permissions).await?
        }
        Declaration::GitlabBinding(d) => {
            run(&AlmBindings::gitlab(session), &d, action, Declaration::GitlabBinding).await?
        }
        Declaration::GithubBinding(d) => {
            run(&AlmBindings::github(session), &d, action, Declaration::GithubBinding).await?
        }
        Declaration::UserToken(d) => {
            run(&UserTokens::new(session), &d, action, Declaration::UserToken).await?
        }
    };

    match outcome {
        Outcome::Present(reconciled) => report(&reconciled, global),
        Outcome::Deleted(identity) => {
            eprintln!("Deleted {kind} {identity}");
            Ok(())
        }
    }
}

pub async fn import(
    session: Session,
    kind: ResourceKind,
    identity: ResourceIdentity,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    info!(%kind, %identity, "importing");

    let reconciled = match kind {
        ResourceKind::Permissions => {
            wrap(Permissions::new(session).import(&identity).await?, Declaration::Permissions)
        }
        ResourceKind::GitlabBinding => wrap(
            AlmBindings::gitlab(session).import(&identity).await?,
            Declaration::GitlabBinding,
        ),
        ResourceKind::GithubBinding => wrap(
            AlmBindings::github(session).import(&identity).await?,
            Declaration::GithubBinding,
        ),
        ResourceKind::UserToken => {
            wrap(UserTokens::new(session).import(&identity).await?, Declaration::UserToken)
        }
    };

    report(&reconciled, global)
}

// ── Helpers ─────────────────────────────────────────────────────────

enum Outcome {
    Present(Reconciled<Declaration>),
    Deleted(ResourceIdentity),
}

async fn run<R: Reconcile>(
    reconciler: &R,
    declaration: &R::Declaration,
    action: Action,
    into: fn(R::Declaration) -> Declaration,
) -> Result<Outcome, CliError> {
    let reconciled = match action {
        Action::Create => reconciler.create(declaration).await?,
        Action::Update(identity) => reconciler.update(&identity, declaration).await?,
        Action::Read(identity) => {
            let declaration = reconciler.read(&identity, declaration).await?;
            Reconciled {
                identity,
                declaration,
            }
        }
        Action::Delete(identity) => {
            reconciler.delete(&identity, declaration).await?;
            return Ok(Outcome::Deleted(identity));
        }
    };
    Ok(Outcome::Present(wrap(reconciled, into)))
}

fn wrap<D>(reconciled: Reconciled<D>, into: fn(D) -> Declaration) -> Reconciled<Declaration> {
    Reconciled {
        identity: reconciled.identity,
        declaration: into(reconciled.declaration),
    }
}

fn report(reconciled: &Reconciled<Declaration>, global: &GlobalOpts) -> Result<(), CliError> {
    if let Declaration::UserToken(UserTokenDeclaration {
        token: Some(ref secret),
        ..
    }) = reconciled.declaration
    {
        // Never serialized; this is the only time it is shown.
        eprintln!("Token value (shown once): {}", secret.expose_secret());
    }

    let rendered = output::render_single(global.output, reconciled)?;
    output::print_output(&rendered);
    Ok(())
}
