use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;

/// Current user, additionally required to be a club admin.
///
/// Result entry, fixture scheduling and scoreboard driving all hang off
/// this extractor.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let user = fut.await?;
            if !user.is_admin {
                return Err(AppError::admin_required());
            }
            Ok(AdminUser(user))
        })
    }
}
