use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, OwnerResponse, ProtectedResponse, PublicUser, SignupRequest,
            TokenResponse,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::AppError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(mut payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "signup with invalid email");
        return Err(AppError::Validation("Invalid email"));
    }
    if payload.password.is_empty() {
        warn!("signup with empty password");
        return Err(AppError::Validation("Password must not be empty"));
    }

    let hash = hash_password(&payload.password)?;

    // The unique index on email makes this an atomic insert-if-absent; a
    // duplicate surfaces as a unique violation and becomes a 409.
    let user = User::create(
        &state.db,
        &payload.name,
        &payload.email,
        &hash,
        payload.role.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.email = payload.email.trim().to_lowercase();

    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login with unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login with invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(TokenResponse { token }))
}

#[instrument(skip(state))]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    // A valid token may outlive its user record.
    let user = User::find_by_id(&state.db, claims.sub)
        .await?
        .ok_or(AppError::NotFound("User not found"))?;
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state))]
pub async fn owner_check(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<OwnerResponse>, AppError> {
    // Stored emails are normalized at signup; match that here.
    let email = email.trim().to_lowercase();
    let user = User::find_by_email(&state.db, &email).await?;
    let owner = user
        .map(|u| u.role.as_deref() == Some("owner"))
        .unwrap_or(false);
    Ok(Json(OwnerResponse { owner }))
}

#[instrument]
pub async fn protected(AuthUser(claims): AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Protected route accessed",
        user: claims,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, JwtConfig};
    use sqlx::PgPool;
    use std::sync::Arc;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_junk() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing-tld@example"));
    }

    fn test_state(pool: PgPool) -> AppState {
        AppState {
            db: pool,
            config: Arc::new(AppConfig {
                database_url: String::new(),
                jwt: JwtConfig {
                    secret: "test-secret".into(),
                    ttl_minutes: 60,
                },
                cors_origins: Vec::new(),
            }),
        }
    }

    fn signup_body(name: &str, email: &str, password: &str, role: Option<&str>) -> SignupRequest {
        SignupRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            role: role.map(Into::into),
        }
    }

    // The tests below need a live Postgres (DATABASE_URL); run them with
    // `cargo test -- --ignored`.

    #[sqlx::test]
    #[ignore]
    async fn duplicate_signup_conflicts_and_stores_one_record(pool: PgPool) {
        let state = test_state(pool.clone());
        signup(
            State(state.clone()),
            Json(signup_body("Asha", "asha@example.com", "pw", None)),
        )
        .await
        .expect("first signup succeeds");

        let err = signup(
            State(state),
            Json(signup_body("Asha Again", " Asha@Example.com ", "pw2", None)),
        )
        .await
        .expect_err("second signup must conflict");
        assert!(matches!(err, AppError::Conflict(_)));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind("asha@example.com")
            .fetch_one(&pool)
            .await
            .expect("count rows");
        assert_eq!(count, 1);
    }

    #[sqlx::test]
    #[ignore]
    async fn signup_login_currentuser_end_to_end(pool: PgPool) {
        let state = test_state(pool.clone());
        signup(
            State(state.clone()),
            Json(signup_body("Rafi", "a@b.com", "pw", None)),
        )
        .await
        .expect("signup");

        let Json(resp) = login(
            State(state.clone()),
            Json(LoginRequest {
                email: "a@b.com".into(),
                password: "pw".into(),
            }),
        )
        .await
        .expect("login");

        let keys = JwtKeys::from_ref(&state);
        let claims = keys.verify(&resp.token).expect("issued token verifies");

        let Json(user) = current_user(State(state), AuthUser(claims))
            .await
            .expect("currentuser");
        assert_eq!(user.email, "a@b.com");
    }

    #[sqlx::test]
    #[ignore]
    async fn login_with_wrong_password_is_unauthorized(pool: PgPool) {
        let state = test_state(pool.clone());
        signup(
            State(state.clone()),
            Json(signup_body("Rafi", "a@b.com", "pw", None)),
        )
        .await
        .expect("signup");

        let err = login(
            State(state),
            Json(LoginRequest {
                email: "a@b.com".into(),
                password: "not-pw".into(),
            }),
        )
        .await
        .expect_err("wrong password must fail");
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[sqlx::test]
    #[ignore]
    async fn owner_check_ignores_email_casing(pool: PgPool) {
        let state = test_state(pool.clone());
        signup(
            State(state.clone()),
            Json(signup_body("Hana", "Owner@X.com", "pw", Some("owner"))),
        )
        .await
        .expect("signup");

        let Json(resp) = owner_check(State(state.clone()), Path("Owner@X.com".into()))
            .await
            .expect("owner check, original casing");
        assert!(resp.owner);

        let Json(resp) = owner_check(State(state.clone()), Path("owner@x.com".into()))
            .await
            .expect("owner check, lowercase");
        assert!(resp.owner);

        let Json(resp) = owner_check(State(state), Path("nobody@x.com".into()))
            .await
            .expect("owner check, unknown email");
        assert!(!resp.owner);
    }
}
