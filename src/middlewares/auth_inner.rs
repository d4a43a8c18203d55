//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use crate::core::registry::AppContext;
use crate::domain::models::auth::{AccessPolicy, AuthenticatedUser};
use crate::errors::{AppError, AppResult};
use crate::middlewares::access::enforce;
use crate::services::auth::extract_bearer_token;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub policy: Rc<AccessPolicy>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let policy = self.policy.clone();

        Box::pin(async move {
            let user = match authenticate(&req).await {
                Ok(user) => user,
                Err(err) => {
                    log::debug!("인증 실패 [{}]: {}", err.code(), err);
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };

            if !policy.is_authentication_only() {
                if let Err(err) = enforce(&user, &policy) {
                    log::debug!("접근 거부 [{}]: 사용자 ID {}", err.code(), user.id);
                    return Ok(req.error_response(err).map_into_right_body());
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Bearer 토큰을 검증하고 저장소에서 현재 사용자 상태를 다시 읽습니다.
async fn authenticate(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let context = req
        .app_data::<web::Data<AppContext>>()
        .ok_or_else(|| AppError::InternalError("Application context is not registered".to_string()))?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".to_string()))?;

    let token = extract_bearer_token(auth_header)?;
    let payload = context.tokens.verify_access_token(token)?;

    let user = context
        .store
        .find_by_id(&payload.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Not authorized, user not found".to_string()))?;

    if !user.is_active {
        log::warn!("🔒 비활성 계정 접근 시도: {}", payload.id);
        return Err(AppError::AccountDeactivated);
    }

    Ok(AuthenticatedUser::from(&user))
}
