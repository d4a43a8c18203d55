//! 시간 공급자
//!
//! 토큰 만료와 이메일 인증 만료 비교는 모두 주입된 `Clock`을 통해서만
//! 현재 시각을 얻습니다.

use chrono::{DateTime, Utc};
use mongodb::bson;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// 저장소 필드에 쓰는 BSON 시각 (밀리초 정밀도)
    fn now_bson(&self) -> bson::DateTime {
        to_bson(self.now())
    }
}

/// 시스템 벽시계
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

pub fn to_bson(value: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}
