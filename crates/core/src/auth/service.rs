//! Account registration, login and hotel listing

use std::sync::Arc;

use hotelix_common::crypto::PasswordHasher;
use hotelix_common::validation::{validate_login, validate_registration, ValidationError};
use hotelix_common::CommonError;
use hotelix_domain::{
    AuthErrorCode, Hotel, HotelixError, LoginRequest, NewUser, Outcome, RegisterRequest, Result,
    UserSession,
};
use tracing::{info, warn};

use super::ports::{HotelRepository, UserRepository};

const INVALID_CREDENTIALS: &str = "Email, mot de passe ou hôtel incorrect";
const EMAIL_TAKEN: &str = "Un utilisateur avec cet email existe déjà";

fn validation_failed(errors: &ValidationError) -> HotelixError {
    HotelixError::validation(errors.to_field_map())
}

/// Storage failures surface as `DATABASE_ERROR` with a form-level message.
fn database_failure(message: &'static str) -> impl FnOnce(HotelixError) -> HotelixError {
    move |err| match err {
        HotelixError::Database(_) | HotelixError::Internal(_) => {
            warn!(error = %err, "auth storage failure");
            HotelixError::auth(AuthErrorCode::DatabaseError, message)
        }
        other => other,
    }
}

fn hashing_failed(err: CommonError) -> HotelixError {
    HotelixError::Internal(err.to_string())
}

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hotels: Arc<dyn HotelRepository>,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hotels: Arc<dyn HotelRepository>) -> Self {
        Self::with_hasher(users, hotels, PasswordHasher::default())
    }

    pub fn with_hasher(
        users: Arc<dyn UserRepository>,
        hotels: Arc<dyn HotelRepository>,
        hasher: PasswordHasher,
    ) -> Self {
        Self { users, hotels, hasher }
    }

    /// Create an account. The role defaults to STAFF.
    pub async fn register(&self, request: RegisterRequest) -> Result<Outcome<UserSession>> {
        const FAILURE: &str = "Erreur lors de la création du compte";

        let email = request.email.trim().to_string();
        validate_registration(
            &email,
            &request.password,
            &request.confirm_password,
            request.hotel_id,
        )
        .map_err(|errors| validation_failed(&errors))?;

        if self.users.find_by_email(&email).await.map_err(database_failure(FAILURE))?.is_some() {
            return Err(HotelixError::auth(AuthErrorCode::EmailTaken, EMAIL_TAKEN));
        }

        let hotel = self
            .hotels
            .find_by_id(request.hotel_id)
            .await
            .map_err(database_failure(FAILURE))?
            .ok_or_else(|| HotelixError::auth(AuthErrorCode::HotelNotFound, "Hôtel non trouvé"))?;

        let password_hash = self.hash(request.password).await?;
        let user = self
            .users
            .create(NewUser {
                email,
                password_hash,
                name: request.name.filter(|name| !name.trim().is_empty()),
                role: request.role.unwrap_or_default(),
                specialite: request.specialite.filter(|s| !s.trim().is_empty()),
                hotel_id: hotel.id,
            })
            .await
            .map_err(|err| match err {
                // A concurrent registration won the unique index after the lookup.
                HotelixError::Conflict(_) => {
                    HotelixError::auth(AuthErrorCode::EmailTaken, EMAIL_TAKEN)
                }
                other => database_failure(FAILURE)(other),
            })?;

        info!(user_id = user.id, hotel_id = hotel.id, role = %user.role, "account created");
        Ok(Outcome::new(UserSession::new(&user, hotel), "Compte créé avec succès"))
    }

    /// Authenticate against the hotel picked on the login form.
    pub async fn login(&self, request: LoginRequest) -> Result<Outcome<UserSession>> {
        let email = request.email.trim();
        validate_login(email, &request.password, request.hotel_id)
            .map_err(|errors| validation_failed(&errors))?;

        let invalid = || HotelixError::auth(AuthErrorCode::InvalidCredentials, INVALID_CREDENTIALS);

        let user = self
            .users
            .find_by_email_and_hotel(email, request.hotel_id)
            .await
            .map_err(database_failure("Erreur lors de la connexion"))?;
        let Some(user) = user else {
            warn!(hotel_id = request.hotel_id, "login rejected: unknown user");
            return Err(invalid());
        };

        if !self.verify(request.password, user.password_hash.clone()).await? {
            warn!(user_id = user.id, "login rejected: bad password");
            return Err(invalid());
        }

        let hotel = self
            .hotels
            .find_by_id(user.hotel_id)
            .await?
            .ok_or_else(|| HotelixError::auth(AuthErrorCode::HotelNotFound, "Hôtel non trouvé"))?;

        info!(user_id = user.id, hotel_id = hotel.id, "login succeeded");
        Ok(Outcome::new(UserSession::new(&user, hotel), "Connexion réussie"))
    }

    /// Every hotel, ordered by name.
    pub async fn hotels(&self) -> Result<Vec<Hotel>> {
        self.hotels
            .list()
            .await
            .map_err(database_failure("Erreur lors de la récupération des hôtels"))
    }

    async fn hash(&self, password: String) -> Result<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| HotelixError::Internal(format!("Password hashing task failed: {e}")))?
            .map_err(hashing_failed)
    }

    async fn verify(&self, password: String, stored: String) -> Result<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| HotelixError::Internal(format!("Password check task failed: {e}")))?
            .map_err(hashing_failed)
    }
}
