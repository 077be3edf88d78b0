//! Authentication service.
//!
//! Email and password accounts, hashed with Argon2id.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use threadline_core::Email;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::user::{NewUser, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Account type recorded when registration leaves it blank.
pub const DEFAULT_USER_TYPE: &str = "customer";

/// Registration input as submitted by the sign-up form.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub user_type: String,
}

impl Registration {
    /// Validate everything except the password and normalize whitespace.
    fn into_new_user(self) -> Result<(NewUser, String), AuthError> {
        let email = Email::parse(self.email.trim())?;
        let user_type = match self.user_type.trim() {
            "" => DEFAULT_USER_TYPE.to_owned(),
            other => other.to_owned(),
        };

        Ok((
            NewUser {
                name: self.name.trim().to_owned(),
                email,
                phone: self.phone.trim().to_owned(),
                address: self.address.trim().to_owned(),
                user_type,
            },
            self.password,
        ))
    }
}

/// Authentication service.
///
/// Handles user registration and login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    pub async fn register_with_password(
        &self,
        registration: Registration,
    ) -> Result<User, AuthError> {
        let (new_user, password) = registration.into_new_user()?;

        if self.users.get_by_email(&new_user.email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        validate_password(&password)?;
        let password_hash = hash_password(&password)?;

        let user = self
            .users
            .create_with_password(&new_user, &password_hash)
            .await
            .map_err(|e| match e {
                // A concurrent registration won the insert
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if nobody registered this email,
    /// including any input that is not an email address at all.
    /// Returns `AuthError::InvalidPassword` if the password is wrong.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let Ok(email) = Email::parse(email.trim()) else {
            return Err(AuthError::UserNotFound);
        };

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Look up the profile of a logged-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the account no longer exists.
    pub async fn profile(&self, user_id: threadline_core::UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidPassword)
}
