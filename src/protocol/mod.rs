//! Endpoint layer: the fixed table of remote operations and how each one is
//! sent and classified.
//!
//! ## Overview
//!
//! Every call the client can make is an [`Operation`]. Each operation maps to
//! exactly one [`Endpoint`] descriptor (HTTP method, path, action parameter,
//! whether an empty body is an acceptable answer). The client never
//! hand-writes a request: it looks up the descriptor and appends the
//! operation's own parameters.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`endpoints`] | Operation kinds and their endpoint descriptors |
//! | [`request`] | Generic request assembly from a descriptor plus parameters |

pub mod endpoints;
pub mod request;

pub use endpoints::{Classification, Endpoint, HttpMethod, Operation};
pub use request::{ApiRequest, Attachment, RequestBuilder};
