//! gRPC implementation for AuthService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::error;

use crate::service::AuthService;
use domain::DomainError;
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, IsAdminRequest, IsAdminResponse,
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let req = request.into_inner();
        validate_register(&req)?;

        let user_id = self
            .service
            .register_new_user(&req.email, &req.password)
            .await
            .map_err(domain_error_to_status)?;

        Ok(Response::new(RegisterResponse { user_id }))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();
        validate_login(&req)?;

        let token = self
            .service
            .login(&req.email, &req.password, &req.app_id)
            .await
            .map_err(domain_error_to_status)?;

        Ok(Response::new(LoginResponse { token }))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let req = request.into_inner();
        validate_is_admin(&req)?;

        let is_admin = self
            .service
            .is_admin(&req.user_id)
            .await
            .map_err(domain_error_to_status)?;

        Ok(Response::new(IsAdminResponse { is_admin }))
    }
}

/// Map a domain error to a gRPC status. Internal detail is logged, never sent.
pub fn domain_error_to_status(err: DomainError) -> Status {
    match err {
        DomainError::InvalidCredentials => Status::unauthenticated("invalid credentials"),
        DomainError::UserExists => Status::already_exists("user already exists"),
        DomainError::UserNotFound => Status::not_found("user not found"),
        DomainError::AppNotFound => Status::invalid_argument("invalid app id"),
        DomainError::Internal(detail) => {
            error!(error = %detail, "internal error");
            Status::internal("internal error")
        }
    }
}

fn require(value: &str, field: &str) -> Result<(), Status> {
    if value.is_empty() {
        return Err(Status::invalid_argument(format!("{} is empty", field)));
    }
    Ok(())
}

fn validate_register(req: &RegisterRequest) -> Result<(), Status> {
    require(&req.email, "email")?;
    require(&req.password, "password")
}

fn validate_login(req: &LoginRequest) -> Result<(), Status> {
    require(&req.email, "email")?;
    require(&req.password, "password")?;
    require(&req.app_id, "app_id")
}

fn validate_is_admin(req: &IsAdminRequest) -> Result<(), Status> {
    require(&req.user_id, "user_id")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockAuthService;
    use tonic::Code;

    fn grpc(mock: MockAuthService) -> AuthGrpcService {
        AuthGrpcService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_missing_fields_never_reach_service() {
        let mut mock = MockAuthService::new();
        mock.expect_register_new_user().never();
        mock.expect_login().never();
        mock.expect_is_admin().never();
        let svc = grpc(mock);

        let cases = [
            (
                svc.register(Request::new(RegisterRequest {
                    email: String::new(),
                    password: "pw".to_string(),
                }))
                .await
                .map(|_| ()),
                "email is empty",
            ),
            (
                svc.register(Request::new(RegisterRequest {
                    email: String::new(),
                    password: String::new(),
                }))
                .await
                .map(|_| ()),
                "email is empty",
            ),
            (
                svc.login(Request::new(LoginRequest {
                    email: "a@example.com".to_string(),
                    password: String::new(),
                    app_id: "app-1".to_string(),
                }))
                .await
                .map(|_| ()),
                "password is empty",
            ),
            (
                svc.login(Request::new(LoginRequest {
                    email: "a@example.com".to_string(),
                    password: "pw".to_string(),
                    app_id: String::new(),
                }))
                .await
                .map(|_| ()),
                "app_id is empty",
            ),
            (
                svc.is_admin(Request::new(IsAdminRequest {
                    user_id: String::new(),
                }))
                .await
                .map(|_| ()),
                "user_id is empty",
            ),
        ];

        for (result, message) in cases {
            let status = result.unwrap_err();
            assert_eq!(status.code(), Code::InvalidArgument);
            assert_eq!(status.message(), message);
        }
    }

    #[tokio::test]
    async fn test_login_passes_fields_through() {
        let mut mock = MockAuthService::new();
        mock.expect_login()
            .withf(|email, password, app_id| {
                email == "a@example.com" && password == "pw" && app_id == "app-1"
            })
            .returning(|_, _, _| Ok("signed.jwt.token".to_string()));

        let resp = grpc(mock)
            .login(Request::new(LoginRequest {
                email: "a@example.com".to_string(),
                password: "pw".to_string(),
                app_id: "app-1".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(resp.into_inner().token, "signed.jwt.token");
    }

    #[test]
    fn test_domain_error_mapping() {
        let cases = [
            (DomainError::InvalidCredentials, Code::Unauthenticated, "invalid credentials"),
            (DomainError::UserExists, Code::AlreadyExists, "user already exists"),
            (DomainError::UserNotFound, Code::NotFound, "user not found"),
            (DomainError::AppNotFound, Code::InvalidArgument, "invalid app id"),
            (
                DomainError::internal("db password is hunter2"),
                Code::Internal,
                "internal error",
            ),
        ];

        for (err, code, message) in cases {
            let status = domain_error_to_status(err);
            assert_eq!(status.code(), code);
            assert_eq!(status.message(), message);
        }
    }
}
