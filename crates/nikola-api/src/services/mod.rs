//! Service layer for the Nikola API.
//!
//! Services encapsulate business logic and coordinate
//! between handlers and database queries.

pub mod resource;

pub use resource::ResourceService;
