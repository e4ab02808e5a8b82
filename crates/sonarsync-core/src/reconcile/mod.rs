// ── Reconcilers ──
//
// One reconciler per resource kind, all behind the same five entry
// points. A reconciler holds only the shared `Session`; nothing survives
// between calls, so the same value can serve any number of resources.

mod bindings;
mod permissions;
mod tokens;

use std::future::Future;

use serde::Serialize;

use crate::error::CoreError;
use crate::identity::ResourceIdentity;
use crate::model::ResourceKind;

pub use bindings::AlmBindings;
pub use permissions::Permissions;
pub use tokens::UserTokens;

/// Outcome of Create, Update and Import: the identity plus the
/// declaration as the server now reports it.
#[derive(Debug, Clone, Serialize)]
pub struct Reconciled<D> {
    pub identity: ResourceIdentity,
    pub declaration: D,
}

/// Create / Read / Update / Delete / Import for one resource kind.
///
/// Every call takes the declaration by reference and returns a fresh
/// value; caller input is never modified. Requests within one call are
/// issued one after another and never retried.
pub trait Reconcile {
    type Declaration: Clone + Send + Sync;

    fn kind(&self) -> ResourceKind;

    /// Apply the declaration, then read it back.
    ///
    /// Multi-request creates are not transactional: a failure part-way
    /// leaves earlier requests applied.
    fn create(
        &self,
        declaration: &Self::Declaration,
    ) -> impl Future<Output = Result<Reconciled<Self::Declaration>, CoreError>> + Send;

    /// Fetch current server state for the resource.
    ///
    /// Returns [`CoreError::NotFound`] when the server has no matching
    /// record.
    fn read(
        &self,
        identity: &ResourceIdentity,
        declaration: &Self::Declaration,
    ) -> impl Future<Output = Result<Self::Declaration, CoreError>> + Send;

    /// Re-apply the declaration under an existing identity.
    ///
    /// The returned identity differs from the given one when the
    /// declaration changes a field the identity is built from.
    fn update(
        &self,
        identity: &ResourceIdentity,
        declaration: &Self::Declaration,
    ) -> impl Future<Output = Result<Reconciled<Self::Declaration>, CoreError>> + Send;

    /// Remove the resource. The server's status decides success; there is
    /// no existence check beforehand.
    fn delete(
        &self,
        identity: &ResourceIdentity,
        declaration: &Self::Declaration,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Rebuild a declaration from an identity alone, then read it.
    fn import(
        &self,
        identity: &ResourceIdentity,
    ) -> impl Future<Output = Result<Reconciled<Self::Declaration>, CoreError>> + Send;
}
