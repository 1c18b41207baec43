//! gRPC transport adapter.

mod auth_grpc;

pub use auth_grpc::{domain_error_to_status, AuthGrpcService};
