// sonarsync-core: Declarations and reconcilers between sonarsync-api and
// consumers (the CLI, or any engine that diffs desired against current state).

pub mod codec;
pub mod config;
pub mod error;
pub mod identity;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod target;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthCredentials, ServerConfig, TlsVerification};
pub use error::CoreError;
pub use identity::ResourceIdentity;
pub use model::{
    AlmBindingDeclaration, AlmKind, Declaration, PermissionsDeclaration, ResourceKind,
    UserTokenDeclaration,
};
pub use reconcile::{AlmBindings, Permissions, Reconcile, Reconciled, UserTokens};
pub use session::{ServerInfo, Session};
pub use target::{PermissionScope, PermissionTarget, ResolvedTarget, SpecialGroup};
