use crate::SessionInfo;
use serde::Deserialize;
use serde::Serialize;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub user_id: String,
    pub password: String,
}

/// Wire projection of a live session.
///
/// Timestamps travel as Unix epoch seconds.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: String,
    pub start_time: i64,
    pub max_time: i64,
}

fn epoch(at: SystemTime) -> i64 {
    at.duration_since(UNIX_EPOCH).expect("time").as_secs() as i64
}

impl From<SessionInfo> for SessionResponse {
    fn from(info: SessionInfo) -> Self {
        Self {
            token: info.token,
            user_id: info.user_id,
            start_time: epoch(info.start_time),
            max_time: epoch(info.max_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn session_response_in_epoch_seconds() {
        let start = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let info = SessionInfo {
            token: "tok".to_string(),
            user_id: "alice".to_string(),
            start_time: start,
            max_time: start + Duration::from_secs(3600),
        };
        let wire = SessionResponse::from(info);
        assert_eq!(wire.start_time, 1_700_000_000);
        assert_eq!(wire.max_time, 1_700_003_600);
    }
}
