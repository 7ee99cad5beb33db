//! # IO Module
//!
//! The adapter layer between HTTP clients and the domain services.

pub mod rest;
