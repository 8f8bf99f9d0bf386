//! Subscription seeding.

use coursehub_models::{CourseId, UserId};
use rand::seq::SliceRandom;
use sqlx::PgPool;
use std::time::Instant;

/// Picks up to `per_user` distinct courses for every user.
pub fn generate_subscriptions(
    users: &[UserId],
    courses: &[CourseId],
    per_user: usize,
) -> Vec<(UserId, CourseId)> {
    let mut rng = rand::thread_rng();

    users
        .iter()
        .flat_map(|&user_id| {
            courses
                .choose_multiple(&mut rng, per_user)
                .map(move |&course_id| (user_id, course_id))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_subscriptions(
    db: &PgPool,
    users: &[UserId],
    courses: &[CourseId],
    per_user: usize,
) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    let pairs = generate_subscriptions(users, courses, per_user);
    println!("🔔 Seeding {} subscriptions...", pairs.len());

    if pairs.is_empty() {
        return Ok(0);
    }

    let (user_ids, course_ids): (Vec<UserId>, Vec<CourseId>) = pairs.into_iter().unzip();

    let inserted = sqlx::query(
        "INSERT INTO subscriptions (user_id, course_id)
         SELECT * FROM UNNEST($1::uuid[], $2::uuid[])
         ON CONFLICT (user_id, course_id) DO NOTHING",
    )
    .bind(&user_ids)
    .bind(&course_ids)
    .execute(db)
    .await?
    .rows_affected();

    println!(
        "   ✓ Inserted {} subscriptions in {:?}",
        inserted,
        start_time.elapsed()
    );

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriptions_are_distinct_per_user() {
        let users = vec![UserId::new(), UserId::new()];
        let courses: Vec<CourseId> = (0..10).map(|_| CourseId::new()).collect();

        let pairs = generate_subscriptions(&users, &courses, 4);
        assert_eq!(pairs.len(), 8);

        for user in &users {
            let mut picked: Vec<_> = pairs
                .iter()
                .filter(|(u, _)| u == user)
                .map(|(_, c)| *c)
                .collect();
            picked.sort_by_key(|c| c.into_inner());
            picked.dedup();
            assert_eq!(picked.len(), 4);
        }
    }

    #[test]
    fn test_subscriptions_capped_by_course_count() {
        let users = vec![UserId::new()];
        let courses = vec![CourseId::new(), CourseId::new()];
        assert_eq!(generate_subscriptions(&users, &courses, 5).len(), 2);
    }

    #[test]
    fn test_no_courses_no_subscriptions() {
        assert!(generate_subscriptions(&[UserId::new()], &[], 3).is_empty());
    }
}
