//! User seeding.
//!
//! Seeded accounts share the `@seed.coursehub.local` domain so they can be
//! told apart from real ones and removed with [`clear_users`].

use coursehub_models::{UserId, system_roles};
use fake::Fake;
use fake::faker::name::en::*;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::UserSeed;

pub const SEED_EMAIL_DOMAIN: &str = "seed.coursehub.local";

/// Generates regular users followed by moderators.
///
/// `run_tag` keeps e-mails unique across repeated seed runs.
pub fn generate_users(
    users: usize,
    moderators: usize,
    run_tag: &str,
    password_hash: &str,
) -> Vec<UserSeed> {
    (0..users + moderators)
        .into_par_iter()
        .map(|idx| {
            let moderator = idx >= users;
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();

            let email = format!(
                "{}.{}+{}{}-{}@{}",
                first_name.to_lowercase().replace(' ', ""),
                last_name.to_lowercase().replace(' ', ""),
                if moderator { "mod" } else { "user" },
                idx,
                run_tag,
                SEED_EMAIL_DOMAIN
            );

            UserSeed {
                first_name,
                last_name,
                email,
                password_hash: password_hash.to_string(),
                moderator,
            }
        })
        .collect()
}

/// Seeds users and grants the moderator role where requested. Returns the
/// ids of the regular users and of the moderators separately.
pub async fn seed_users(
    db: &PgPool,
    users: usize,
    moderators: usize,
    run_tag: &str,
    password_hash: &str,
) -> Result<(Vec<UserId>, Vec<UserId>), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "👥 Seeding {} users ({} regular, {} moderators)...",
        users + moderators,
        users,
        moderators
    );

    let seeds = generate_users(users, moderators, run_tag, password_hash);
    let inserted = insert_users_batch(db, &seeds).await?;

    let (mods, regular): (Vec<_>, Vec<_>) = inserted.into_iter().partition(|(_, m)| *m);
    let regular: Vec<UserId> = regular.into_iter().map(|(id, _)| id).collect();
    let mods: Vec<UserId> = mods.into_iter().map(|(id, _)| id).collect();

    assign_moderators(db, &mods).await?;

    println!(
        "   ✓ Inserted {} users in {:?}",
        regular.len() + mods.len(),
        start_time.elapsed()
    );

    Ok((regular, mods))
}

/// Inserts users in batches, returning `(id, is_moderator)` pairs.
pub async fn insert_users_batch(
    db: &PgPool,
    users: &[UserSeed],
) -> Result<Vec<(UserId, bool)>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 5 params per user
    const BATCH_SIZE: usize = 1000;

    let mut inserted = Vec::with_capacity(users.len());

    for chunk in users.chunks(BATCH_SIZE) {
        let ids = insert_users_chunk(&mut tx, chunk).await?;
        for (id, seed) in ids.into_iter().zip(chunk.iter()) {
            inserted.push((id, seed.moderator));
        }
    }

    tx.commit().await?;
    Ok(inserted)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> Result<Vec<UserId>, Box<dyn std::error::Error>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        String::from("INSERT INTO users (first_name, last_name, email, password, is_staff) VALUES ");

    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, UserId>(&query);
    for user in users {
        q = q
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            // Seeded moderators are staff so they can see every course
            .bind(user.moderator);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

async fn assign_moderators(
    db: &PgPool,
    user_ids: &[UserId],
) -> Result<(), Box<dyn std::error::Error>> {
    if user_ids.is_empty() {
        return Ok(());
    }

    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id)
         SELECT id, $2 FROM UNNEST($1::uuid[]) AS t(id)
         ON CONFLICT (user_id, role_id) DO NOTHING",
    )
    .bind(user_ids)
    .bind(system_roles::MODERATOR)
    .execute(db)
    .await?;

    Ok(())
}

/// Deletes every seeded user. Courses and lessons they own are removed by
/// [`super::clear_all`] beforehand.
pub async fn clear_users(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded users...");

    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(seed_email_pattern())
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} users in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}

pub(crate) fn seed_email_pattern() -> String {
    format!("%@{}", SEED_EMAIL_DOMAIN)
}
