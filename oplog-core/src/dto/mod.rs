//! Data Transfer Objects for the Ghostwriter API
//!
//! This module contains the GraphQL request and response shapes sent to and
//! received from the Ghostwriter `/v1/graphql` endpoint.

pub mod mutation;
