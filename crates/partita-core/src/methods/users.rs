// crates/partita-core/src/methods/users.rs
// ============================================================================
// Module: Users Method
// Description: Listing of every valid account identifier.
// Purpose: Render the account roster, or an empty marker when there is none.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `users` takes no parameters. An empty roster is not an error: the output
//! port renders an explicit empty marker so clients can distinguish "no
//! accounts" from a failed call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::resource::ResourceKind;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::Gatekeeper;
use crate::interfaces::UserRepository;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `users` action.
pub struct UsersMethod {
    /// Account lookups and listings.
    users: Arc<dyn UserRepository>,
}

impl UsersMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "users";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(110_000);

    /// Creates the handler around a user repository.
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

impl ApiMethod for UsersMethod {
    fn action(&self) -> &'static str {
        Self::ACTION
    }

    fn minimum_version(&self) -> ProtocolVersion {
        Self::MINIMUM_VERSION
    }

    fn handle(
        &self,
        _gatekeeper: &dyn Gatekeeper,
        output: &dyn ApiOutput,
        _request: &ApiRequest,
    ) -> Result<Payload, MethodFailure> {
        let ids = self.users.valid_ids()?;
        if ids.is_empty() {
            return Ok(output.empty_result(ResourceKind::User));
        }
        Ok(output.users(&ids)?)
    }
}
