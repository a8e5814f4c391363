//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and the edge gate.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::Authenticated;
pub use handlers::AuthAppState;
pub use middleware::{EdgeGate, GateRoute, edge_gate};
pub use router::{users_router, users_router_generic};
