// crates/partita-core/src/methods/catalog.rs
// ============================================================================
// Module: Methods Catalog Method
// Description: Introspection of the registered action catalog.
// Purpose: Let clients discover actions and their minimum protocol versions.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! `methods` renders the action catalog captured at registry construction.
//! The catalog is a snapshot: actions registered later do not appear, which
//! keeps the handler free of registry back-references.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::version::ActionDescriptor;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::Gatekeeper;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `methods` action.
pub struct MethodsMethod {
    /// Catalog snapshot captured at construction.
    entries: Vec<ActionDescriptor>,
}

impl MethodsMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "methods";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(150_000);

    /// Creates the handler around a fixed catalog snapshot.
    #[must_use]
    pub const fn new(entries: Vec<ActionDescriptor>) -> Self {
        Self { entries }
    }
}

impl ApiMethod for MethodsMethod {
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
        Ok(output.action_catalog(&self.entries)?)
    }
}
