//! Fake data seeding for development databases.
//!
//! Rows are generated in parallel with rayon and inserted with multi-row
//! `INSERT` statements inside a transaction per table.

pub mod courses;
pub mod models;
pub mod subscriptions;
pub mod users;

pub use models::{CourseSeed, LessonSeed, SeedConfig, UserSeed};

use coursehub_models::CourseId;
use sqlx::PgPool;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub const DEFAULT_PASSWORD: &str = "password123";

/// Seeds users, moderators, courses, lessons and subscriptions.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Users: {}", config.num_users);
    println!("   - Moderators: {}", config.num_moderators);
    println!(
        "   - Courses: {} ({} lessons each)",
        config.total_courses(),
        config.lessons_per_course
    );

    println!("\n🔐 Hashing password...");
    let hash_start = Instant::now();
    // Low cost keeps seeding fast; these accounts are throwaway
    let password_hash = bcrypt::hash(DEFAULT_PASSWORD, 4)?;
    println!("   ✓ Hashed password in {:?}", hash_start.elapsed());

    let run_tag = run_tag();

    let (regular, moderators) = users::seed_users(
        db,
        config.num_users,
        config.num_moderators,
        &run_tag,
        &password_hash,
    )
    .await?;

    let courses = courses::seed_courses(db, &regular, config.courses_per_user).await?;
    courses::seed_lessons(db, &courses, config.lessons_per_course).await?;

    let course_ids: Vec<CourseId> = courses.iter().map(|(id, _)| *id).collect();
    subscriptions::seed_subscriptions(db, &regular, &course_ids, config.subscriptions_per_user)
        .await?;

    println!(
        "\n✅ Seeding complete in {:?} ({} users, {} moderators, {} courses)",
        start_time.elapsed(),
        regular.len(),
        moderators.len(),
        course_ids.len()
    );
    println!("\n📝 Default password for all users: {}", DEFAULT_PASSWORD);

    Ok(())
}

/// Removes every seeded user together with the content they own.
pub async fn clear_all(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded data...");

    let lessons = courses::clear_lessons(db).await?;
    println!("   ✓ Deleted {} stray lessons", lessons);

    courses::clear_courses(db).await?;
    users::clear_users(db).await?;

    println!(
        "✅ Seeded data cleared successfully in {:?}!",
        start_time.elapsed()
    );

    Ok(())
}

fn run_tag() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{:x}", secs)
}
