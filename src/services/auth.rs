//! Authentication service: password hashing, JWT issue/validation, login.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::{User, UserRole};

/// Session context carried inside the bearer token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub user_id: i64,
    pub role: UserRole,
    pub enterprise_id: Option<i64>,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned on successful login.
#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub role: UserRole,
    /// Where the client should land, e.g. `/admin/dashboard`.
    pub redirect_to: String,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Sign an access token for `user`.
pub fn generate_token(user: &User, jwt_secret: &str, expiry_secs: i64) -> Result<AccessToken, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.username.clone(),
        user_id: user.id,
        role: user.role,
        enterprise_id: user.enterprise_id,
        exp: (now + Duration::seconds(expiry_secs)).timestamp(),
        iat: now.timestamp(),
    };

    let access_token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    Ok(AccessToken {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: expiry_secs,
        role: user.role,
        redirect_to: format!("/{}/dashboard", user.role.segment()),
    })
}

/// Validate a JWT and return the claims.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    jsonwebtoken::decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized)
}

/// Authenticate by email (case-insensitive) and password.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    jwt_secret: &str,
    expiry_secs: i64,
) -> Result<AccessToken, AppError> {
    let email = email.trim().to_lowercase();
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, role, enterprise_id, is_active, created_at
        FROM users
        WHERE LOWER(email) = $1
        "#,
    )
    .bind(&email)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::Unauthorized)?;

    if !user.is_active || !verify_password(password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Rejected login");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    generate_token(&user, jwt_secret, expiry_secs)
}

/// Find a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: i64) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, role, enterprise_id, is_active, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> User {
        User {
            id: 42,
            username: "pmjohn".to_string(),
            email: "pmjohn@test.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            enterprise_id: Some(1),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_hash_and_verify() {
        let password = "pass12345";
        let hash = hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("WrongPassword", &hash).unwrap());
    }

    #[test]
    fn token_round_trip_carries_session_context() {
        let secret = "test-secret-key-for-jwt";
        let token = generate_token(&user(UserRole::ProjectManager), secret, 900).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 900);
        assert_eq!(token.redirect_to, "/pm/dashboard");

        let claims = validate_token(&token.access_token, secret).unwrap();
        assert_eq!(claims.sub, "pmjohn");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, UserRole::ProjectManager);
        assert_eq!(claims.enterprise_id, Some(1));
    }

    #[test]
    fn token_signed_with_other_secret_rejected() {
        let token = generate_token(&user(UserRole::Admin), "one", 900).unwrap();
        assert!(validate_token(&token.access_token, "two").is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(validate_token("garbage.token.here", "secret").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Well beyond the default 60s leeway.
        let token = generate_token(&user(UserRole::Analyst), "secret", -3600).unwrap();
        assert!(validate_token(&token.access_token, "secret").is_err());
    }
}
