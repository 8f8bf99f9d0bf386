use anyhow::anyhow;
use coursehub_auth::create_access_token;
use coursehub_config::JwtConfig;
use coursehub_core::{AppError, hash_password, verify_password};
use coursehub_models::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RoleId, User, UserCredentials,
    UserId, system_roles,
};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_login, track_user_registered};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, is_staff, is_active, created_at, updated_at";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequest) -> Result<User, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(&dto.email)
        .fetch_one(db)
        .await?;

        if exists {
            return Err(AppError::bad_request(anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"INSERT INTO users (email, first_name, last_name, password)
               VALUES ($1, $2, $3, $4)
               RETURNING {USER_COLUMNS}"#
        ))
        .bind(&dto.email)
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow!("Email already exists"));
            }
            AppError::from(e)
        })?;

        track_user_registered();

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let credentials = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, email, password, is_staff, is_active FROM users WHERE LOWER(email) = LOWER($1)",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        let Some(credentials) = credentials else {
            track_login(false);
            return Err(AppError::unauthorized("Invalid email or password"));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            track_login(false);
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        if !credentials.is_active {
            track_login(false);
            return Err(AppError::unauthorized("User account is disabled"));
        }

        let role_ids = Self::role_ids(db, credentials.id).await?;

        let access_token = create_access_token(
            credentials.id.into_inner(),
            &credentials.email,
            role_ids.iter().map(|r| r.into_inner()).collect(),
            credentials.is_staff,
            jwt_config,
        )?;

        let user = Self::get_user(db, credentials.id).await?;

        track_login(true);

        Ok(LoginResponse { access_token, user })
    }

    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: UserId) -> Result<ProfileResponse, AppError> {
        let user = Self::get_user(db, user_id).await?;
        let role_ids = Self::role_ids(db, user_id).await?;

        Ok(ProfileResponse {
            is_moderator: role_ids.contains(&system_roles::MODERATOR),
            role_ids,
            user,
        })
    }

    async fn get_user(db: &PgPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    async fn role_ids(db: &PgPool, user_id: UserId) -> Result<Vec<RoleId>, AppError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT role_id FROM user_roles WHERE user_id = $1 ORDER BY assigned_at",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(ids.into_iter().map(RoleId::from_uuid).collect())
    }
}
