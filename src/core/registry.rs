//! # Application Context - 명시적 의존성 주입
//!
//! 시작 시 한 번 구성되어 `web::Data<AppContext>`로 등록되는 컴포넌트 묶음입니다.
//! 전역 레지스트리나 지연 초기화 캐시는 없으며, 모든 서비스는 생성자에서
//! 저장소/메일러/시계를 `Arc`로 받습니다.
//!
//! ## 구성 순서
//!
//! ```text
//! 1. 인프라
//!    ├─ MongoDB 연결 + 인덱스
//!    ├─ TimedUserStore (호출별 타임아웃)
//!    └─ Mailer (SendGrid 또는 로깅)
//!
//! 2. 서비스
//!    ├─ TokenService
//!    ├─ EmailVerificationService
//!    ├─ AuthService
//!    └─ UserService
//! ```
//!
//! 테스트는 `AppContext::new`에 메모리 저장소와 수동 시계를 넘겨 같은 그래프를 구성합니다.

use std::sync::Arc;
use crate::config::{
    DatabaseConfig, Environment, JwtConfig, MailConfig, PasswordConfig, VerificationConfig,
};
use crate::core::clock::{Clock, SystemClock};
use crate::db::Database;
use crate::errors::AppResult;
use crate::repositories::users::{MongoUserRepository, TimedUserStore, UserStore};
use crate::services::auth::{AuthService, EmailVerificationService, TokenService};
use crate::services::mail::{LogMailer, Mailer, SendGridMailer};
use crate::services::users::UserService;
use crate::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_step_complete, print_step_start, print_sub_task,
};

/// 환경 변수에서 읽은 런타임 설정 묶음
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub environment: Environment,
    pub bcrypt_cost: u32,
    pub jwt: JwtConfig,
    pub verification: VerificationConfig,
    pub mail: MailConfig,
}

impl AppSettings {
    /// # Errors
    ///
    /// * `AppError::InternalError` - 프로덕션에서 JWT 비밀키 누락 또는 두 비밀키가 같음
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            environment: Environment::current(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            jwt: JwtConfig::from_env()?,
            verification: VerificationConfig::from_env(),
            mail: MailConfig::from_env(),
        })
    }
}

/// 애플리케이션 컴포넌트 그래프
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<AppSettings>,
    pub store: Arc<dyn UserStore>,
    pub clock: Arc<dyn Clock>,
    pub tokens: Arc<TokenService>,
    pub verification: Arc<EmailVerificationService>,
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
}

impl AppContext {
    /// 주어진 협력자로 서비스 그래프를 구성합니다.
    pub fn new(
        settings: AppSettings,
        store: Arc<dyn UserStore>,
        mailer: Arc<dyn Mailer>,
        clock: Arc<dyn Clock>,
    ) -> AppResult<Self> {
        let tokens = Arc::new(TokenService::new(settings.jwt.clone(), clock.clone()));

        let verification = Arc::new(EmailVerificationService::new(
            store.clone(),
            mailer,
            clock.clone(),
            settings.verification.clone(),
            settings.mail.verification_template_id.clone(),
        ));

        let auth = Arc::new(AuthService::new(
            store.clone(),
            tokens.clone(),
            verification.clone(),
            clock.clone(),
            settings.bcrypt_cost,
        )?);

        let users = Arc::new(UserService::new(store.clone(), verification.clone(), clock.clone()));

        Ok(Self {
            settings: Arc::new(settings),
            store,
            clock,
            tokens,
            verification,
            auth,
            users,
        })
    }

    /// 운영용 컨텍스트 구성
    ///
    /// MongoDB에 연결하고 인덱스를 만든 뒤 실제 메일러와 시스템 시계로 서비스를 구성합니다.
    pub async fn initialize() -> AppResult<Self> {
        print_boxed_title("APPLICATION CONTEXT");

        let settings = AppSettings::from_env()?;
        if !Environment::install(settings.environment.clone()) {
            log::warn!("실행 환경이 이미 고정되어 있습니다: {:?}", Environment::active());
        }

        print_step_start(1, "Infrastructure");
        let database = Database::new().await?;
        let repository = MongoUserRepository::new(&database);
        repository.create_indexes().await?;

        let timeout = DatabaseConfig::store_timeout();
        let store: Arc<dyn UserStore> = Arc::new(TimedUserStore::new(Arc::new(repository), timeout));
        print_sub_task(
            "UserStore",
            &format!("MongoDB {} (timeout {}ms)", database.database_name(), timeout.as_millis()),
        );

        let mailer: Arc<dyn Mailer> = match &settings.mail.api_key {
            Some(api_key) => {
                print_sub_task("Mailer", "SendGrid");
                Arc::new(SendGridMailer::new(api_key.clone(), &settings.mail))
            }
            None => {
                log::warn!("⚠️ SENDGRID_API_KEY 미설정 - 인증 메일은 로그로만 출력됩니다");
                print_sub_task("Mailer", "log only");
                Arc::new(LogMailer)
            }
        };
        print_step_complete(1, "Infrastructure", 2);

        print_step_start(2, "Services");
        let require_verification = settings.verification.require_email_verification;
        let context = Self::new(settings, store, mailer, Arc::new(SystemClock))?;
        print_sub_task("TokenService", "HS256 access/refresh");
        print_sub_task(
            "EmailVerificationService",
            if require_verification { "required" } else { "disabled" },
        );
        print_sub_task("AuthService", "ready");
        print_sub_task("UserService", "ready");
        print_step_complete(2, "Services", 4);

        print_final_summary(2, 4);
        Ok(context)
    }
}
