/// User Routes
///
/// Current-user information for authenticated requests.

use actix_web::{web, HttpResponse};

use crate::auth::Claims;
use crate::error::{AppError, AuthError};
use crate::repository::UserRepository;
use crate::routes::auth::UserResponse;

/// GET /users/me
///
/// Return the authenticated user's information. Claims are injected by
/// the JWT middleware; the subject is resolved back to a user row here.
///
/// # Errors
/// - 401: Missing or invalid token (handled by middleware), or the
///   token's subject no longer exists
/// - 500: Internal server error
pub async fn get_current_user(
    claims: web::ReqData<Claims>,
    users: web::Data<dyn UserRepository>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Auth(AuthError::UserNotFound))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
