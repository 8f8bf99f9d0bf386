//! Interactive account creation.

use coursehub_core::hash_password;
use coursehub_models::{UserId, system_roles};
use sqlx::PgPool;

pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub staff: bool,
    pub moderator: bool,
}

/// Creates a user, optionally flagged as staff and holding the moderator
/// role. Fails if the e-mail is taken.
pub async fn create_user(
    db: &PgPool,
    account: &NewAccount,
) -> Result<UserId, Box<dyn std::error::Error>> {
    let hashed_password = hash_password(&account.password)
        .map_err(|e| e.error.to_string())?;

    let mut tx = db.begin().await?;

    let user_id = sqlx::query_scalar::<_, UserId>(
        "INSERT INTO users (first_name, last_name, email, password, is_staff)
         VALUES ($1, $2, $3, $4, $5)
         ON CONFLICT (email) DO NOTHING
         RETURNING id",
    )
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(&account.email)
    .bind(&hashed_password)
    .bind(account.staff)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(user_id) = user_id else {
        tx.rollback().await?;
        return Err("User with this email already exists".into());
    };

    if account.moderator {
        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, role_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(system_roles::MODERATOR)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    Ok(user_id)
}
