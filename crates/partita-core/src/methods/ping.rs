// crates/partita-core/src/methods/ping.rs
// ============================================================================
// Module: Ping Method
// Description: Handshake action returning the server status snapshot.
// Purpose: Let clients confirm reachability and read server vitals.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! `ping` takes no parameters and cannot fail on caller input. It echoes the
//! caller's token inside the snapshot so session-aware clients can confirm
//! which credential the server accepted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::payload::Payload;
use crate::core::request::ApiRequest;
use crate::core::version::ProtocolVersion;
use crate::interfaces::ApiOutput;
use crate::interfaces::Gatekeeper;
use crate::methods::ApiMethod;
use crate::methods::MethodFailure;
use crate::runtime::details::ServerDetailsRetriever;

// ============================================================================
// SECTION: Method
// ============================================================================

/// Handler for the `ping` action.
pub struct PingMethod {
    /// Snapshot retriever the handler answers with.
    retriever: ServerDetailsRetriever,
}

impl PingMethod {
    /// Action name this method is dispatched under.
    pub const ACTION: &'static str = "ping";
    /// Protocol version at which the action became available.
    pub const MINIMUM_VERSION: ProtocolVersion = ProtocolVersion::new(100_000);

    /// Creates the handler around a status snapshot retriever.
    #[must_use]
    pub const fn new(retriever: ServerDetailsRetriever) -> Self {
        Self { retriever }
    }
}

impl ApiMethod for PingMethod {
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
        request: &ApiRequest,
    ) -> Result<Payload, MethodFailure> {
        let details = self.retriever.retrieve(&request.token)?;
        Ok(output.server_details(&details)?)
    }
}
