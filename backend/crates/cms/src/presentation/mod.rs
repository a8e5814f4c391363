//! Presentation Layer
//!
//! HTTP handlers, DTOs and the router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CmsAppState;
pub use router::{CmsServices, ProductionBackend, cms_router, cms_router_generic};
