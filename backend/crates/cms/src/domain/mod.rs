//! Domain Layer - Content entities and ports
//!
//! This layer contains:
//! - Domain entities (News, Album, TeamMember, ReportPdf, ...)
//! - Repository traits
//! - Service ports (blob storage, mail, remote files) and text rules

pub mod entities;
pub mod repository;
pub mod services;
