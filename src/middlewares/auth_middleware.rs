//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고, 저장소에서 읽은 사용자 정보를
//! 요청 확장에 붙인 뒤 라우트에 선언된 접근 정책을 적용합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::entities::users::user::Role;
use crate::domain::models::auth::AccessPolicy;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
///
/// `required()`는 인증만 수행하고, 빌더 메서드로 이후 단계를 추가합니다.
/// 단계 실행 순서는 호출 순서와 무관하게 `roles → verified_email → doctor_approval`입니다.
pub struct AuthMiddleware {
    policy: AccessPolicy,
}

impl AuthMiddleware {
    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self { policy: AccessPolicy::authenticated() }
    }

    /// 허용 역할 지정
    pub fn roles(mut self, roles: &[Role]) -> Self {
        self.policy.roles = Some(roles.to_vec());
        self
    }

    pub fn verified_email(mut self) -> Self {
        self.policy.verified_email = true;
        self
    }

    pub fn doctor_approval(mut self) -> Self {
        self.policy.doctor_approval = true;
        self
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            policy: Rc::new(self.policy.clone()),
        }))
    }
}
