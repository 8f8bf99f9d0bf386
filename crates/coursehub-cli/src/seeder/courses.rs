//! Course and lesson seeding.

use coursehub_models::{CourseId, UserId};
use fake::Fake;
use fake::faker::lorem::en::*;
use rand::Rng;
use rand::distributions::Alphanumeric;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::{CourseSeed, LessonSeed};

/// Generates `per_owner` courses for every owner.
pub fn generate_courses(owners: &[UserId], per_owner: usize) -> Vec<CourseSeed> {
    owners
        .par_iter()
        .flat_map(|&owner_id| {
            (0..per_owner)
                .map(|_| CourseSeed {
                    title: title(),
                    preview: preview(),
                    description: description(),
                    owner_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Generates `per_course` lessons for each `(course, owner)` pair.
pub fn generate_lessons(courses: &[(CourseId, UserId)], per_course: usize) -> Vec<LessonSeed> {
    courses
        .par_iter()
        .flat_map(|&(course_id, owner_id)| {
            (0..per_course)
                .map(|_| LessonSeed {
                    title: title(),
                    preview: preview(),
                    description: description(),
                    video_link: video_link(),
                    course_id,
                    owner_id,
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

fn title() -> String {
    let words: Vec<String> = Words(2..5).fake();
    let mut title = words.join(" ");
    if let Some(first) = title.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    title
}

fn preview() -> String {
    let preview: String = Sentence(4..10).fake();
    preview.chars().take(255).collect()
}

fn description() -> String {
    let paragraphs: Vec<String> = Paragraphs(1..3).fake();
    paragraphs.join("\n\n")
}

fn video_link() -> String {
    let id: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(11)
        .map(char::from)
        .collect();
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Seeds courses, returning `(course_id, owner_id)` pairs.
pub async fn seed_courses(
    db: &PgPool,
    owners: &[UserId],
    per_owner: usize,
) -> Result<Vec<(CourseId, UserId)>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "📚 Seeding {} courses ({} per user)...",
        owners.len() * per_owner,
        per_owner
    );

    let courses = generate_courses(owners, per_owner);
    let mut tx = db.begin().await?;

    // 4 params per course
    const BATCH_SIZE: usize = 1000;

    let mut inserted = Vec::with_capacity(courses.len());
    for chunk in courses.chunks(BATCH_SIZE) {
        let ids = insert_courses_chunk(&mut tx, chunk).await?;
        for (id, seed) in ids.into_iter().zip(chunk.iter()) {
            inserted.push((id, seed.owner_id));
        }
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} courses in {:?}",
        inserted.len(),
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_courses_chunk(
    tx: &mut Transaction<'_, Postgres>,
    courses: &[CourseSeed],
) -> Result<Vec<CourseId>, Box<dyn std::error::Error>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO courses (title, preview, description, owner_id) VALUES ");

    for i in 0..courses.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 4;
        query.push_str(&format!("(${}, ${}, ${}, ${})", p + 1, p + 2, p + 3, p + 4));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar::<_, CourseId>(&query);
    for course in courses {
        q = q
            .bind(&course.title)
            .bind(&course.preview)
            .bind(&course.description)
            .bind(course.owner_id);
    }

    Ok(q.fetch_all(&mut **tx).await?)
}

/// Seeds lessons for the given courses.
pub async fn seed_lessons(
    db: &PgPool,
    courses: &[(CourseId, UserId)],
    per_course: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!(
        "🎬 Seeding {} lessons ({} per course)...",
        courses.len() * per_course,
        per_course
    );

    let lessons = generate_lessons(courses, per_course);
    let mut tx = db.begin().await?;

    // 6 params per lesson
    const BATCH_SIZE: usize = 1000;

    let mut inserted = 0;
    for chunk in lessons.chunks(BATCH_SIZE) {
        inserted += insert_lessons_chunk(&mut tx, chunk).await?;
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} lessons in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

async fn insert_lessons_chunk(
    tx: &mut Transaction<'_, Postgres>,
    lessons: &[LessonSeed],
) -> Result<u64, Box<dyn std::error::Error>> {
    if lessons.is_empty() {
        return Ok(0);
    }

    let mut query = String::from(
        "INSERT INTO lessons (title, preview, description, video_link, course_id, owner_id) VALUES ",
    );

    for i in 0..lessons.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let p = i * 6;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${}, ${})",
            p + 1,
            p + 2,
            p + 3,
            p + 4,
            p + 5,
            p + 6
        ));
    }

    let mut q = sqlx::query(&query);
    for lesson in lessons {
        q = q
            .bind(&lesson.title)
            .bind(&lesson.preview)
            .bind(&lesson.description)
            .bind(&lesson.video_link)
            .bind(lesson.course_id)
            .bind(lesson.owner_id);
    }

    Ok(q.execute(&mut **tx).await?.rows_affected())
}

/// Deletes courses owned by seeded users. Their lessons cascade.
pub async fn clear_courses(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded courses...");

    let deleted = sqlx::query(
        "DELETE FROM courses c
         USING users u
         WHERE c.owner_id = u.id AND u.email LIKE $1",
    )
    .bind(super::users::seed_email_pattern())
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Deleted {} courses in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}

/// Deletes lessons owned by seeded users that sit in someone else's course.
pub async fn clear_lessons(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let deleted = sqlx::query(
        "DELETE FROM lessons l
         USING users u
         WHERE l.owner_id = u.id AND u.email LIKE $1",
    )
    .bind(super::users::seed_email_pattern())
    .execute(db)
    .await?
    .rows_affected();

    Ok(deleted)
}
