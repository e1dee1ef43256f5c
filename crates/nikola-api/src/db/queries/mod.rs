//! Database queries for the Nikola API.

pub mod resource;
