use crate::Argon2id;
use crate::AuthError;
use crate::SessionResponse;
use crate::SignInRequest;
use crate::SignUpRequest;
use crate::SignUpResponse;
use crate::Teller;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use std::sync::Arc;
use tokio_postgres::Client;

/// The gateway as deployed: postgres-backed stores behind both seams,
/// Argon2id for credentials.
pub type Gateway = Teller<Arc<Client>, Arc<Client>, Argon2id>;

// Both routes take the same credential pair. The user_id cap matches the
// users.user_id column width, so nothing oversize ever reaches the store.
fn malformed(user_id: &str, password: &str) -> Option<HttpResponse> {
    if user_id.is_empty() || user_id.len() > 64 {
        return Some(HttpResponse::BadRequest().body("user_id must be 1-64 characters"));
    }
    if password.is_empty() {
        return Some(HttpResponse::BadRequest().body("password must not be empty"));
    }
    None
}

fn fail(e: AuthError) -> HttpResponse {
    match &e {
        AuthError::Conflict => HttpResponse::BadRequest().body(e.to_string()),
        AuthError::Unauthorized => HttpResponse::Unauthorized().body(e.to_string()),
        _ => {
            log::error!("auth failure: {}", e);
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

pub async fn signup(teller: web::Data<Gateway>, req: web::Json<SignUpRequest>) -> impl Responder {
    if let Some(rejection) = malformed(&req.user_id, &req.password) {
        return rejection;
    }
    match teller.sign_up(&req.user_id, &req.password).await {
        Err(e) => fail(e),
        Ok(account) => HttpResponse::Created().json(SignUpResponse {
            user_id: account.user_id().to_string(),
            message: "User created successfully".to_string(),
        }),
    }
}

pub async fn signin(teller: web::Data<Gateway>, req: web::Json<SignInRequest>) -> impl Responder {
    if let Some(rejection) = malformed(&req.user_id, &req.password) {
        return rejection;
    }
    match teller.sign_in(&req.user_id, &req.password).await {
        Err(e) => fail(e),
        Ok(info) => HttpResponse::Ok().json(SessionResponse::from(info)),
    }
}
