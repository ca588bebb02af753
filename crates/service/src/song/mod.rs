//! Song catalog: domain types, query construction, repository contract
//! and implementations, upstream metadata lookup and the catalog service.

pub mod domain;
pub mod metadata;
pub mod query;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::CatalogService;
