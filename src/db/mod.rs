//! MongoDB 연결 관리
//!
//! 애플리케이션 시작 시 한 번 연결하고 `ping`으로 확인한 뒤,
//! 저장소 구현체가 공유하는 `mongodb::Database` 핸들을 제공합니다.

use mongodb::{Client, options::ClientOptions};
use log::info;
use crate::config::DatabaseConfig;
use crate::errors::{AppError, ErrorContext};

#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 환경 설정으로 MongoDB에 연결합니다.
    ///
    /// 서버 선택 타임아웃은 저장소 호출 타임아웃과 같은 값을 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ServiceUnavailable` - 연결 또는 `ping` 실패
    /// * `AppError::InternalError` - URI 파싱 실패
    pub async fn new() -> Result<Self, AppError> {
        let mongodb_uri = DatabaseConfig::uri();
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(&mongodb_uri)
            .await
            .context("Invalid MONGODB_URI")?;

        client_options.app_name = Some("clinic_auth".to_string());
        client_options.server_selection_timeout = Some(DatabaseConfig::store_timeout());

        let client = Client::with_options(client_options)
            .context("MongoDB client error")?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::ServiceUnavailable(format!("MongoDB ping failed: {}", e)))?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
