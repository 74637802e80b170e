//! Models Module
//!
//! Request and response DTOs for the HTTP API.

mod requests;
mod responses;

pub use requests::SetRequest;
pub use responses::{
    DeleteResponse, GetResponse, HealthResponse, SetResponse, SnapshotResponse, StatsResponse,
};
