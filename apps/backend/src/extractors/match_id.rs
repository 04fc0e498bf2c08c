use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Match ID extracted from the `{match_id}` route path parameter.
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct MatchId(pub i64);

impl FromRequest for MatchId {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = (|| {
            let raw = req.match_info().get("match_id").ok_or_else(|| {
                AppError::bad_request(ErrorCode::InvalidMatchId, "Missing match_id parameter")
            })?;

            let match_id = raw.parse::<i64>().map_err(|_| {
                AppError::bad_request(
                    ErrorCode::InvalidMatchId,
                    format!("Invalid match id: {raw}"),
                )
            })?;

            if match_id <= 0 {
                return Err(AppError::bad_request(
                    ErrorCode::InvalidMatchId,
                    format!("Match id must be positive, got: {match_id}"),
                ));
            }

            Ok(MatchId(match_id))
        })();

        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use actix_web::FromRequest;

    use super::MatchId;
    use crate::error::AppError;

    #[actix_web::test]
    async fn parses_positive_id() {
        let req = TestRequest::default()
            .param("match_id", "42")
            .to_http_request();
        let id = MatchId::from_request(&req, &mut actix_web::dev::Payload::None)
            .await
            .unwrap();
        assert_eq!(id.0, 42);
    }

    #[actix_web::test]
    async fn rejects_non_numeric_and_non_positive() {
        for bad in ["abc", "0", "-3"] {
            let req = TestRequest::default()
                .param("match_id", bad)
                .to_http_request();
            let result = MatchId::from_request(&req, &mut actix_web::dev::Payload::None).await;
            assert!(matches!(result, Err(AppError::BadRequest { .. })), "{bad}");
        }
    }
}
