//! Seed rows and the configuration that controls how many are generated.

use coursehub_models::{CourseId, UserId};

/// Seed data for a user.
pub struct UserSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub moderator: bool,
}

/// Seed data for a course.
pub struct CourseSeed {
    pub title: String,
    pub preview: String,
    pub description: String,
    pub owner_id: UserId,
}

/// Seed data for a lesson.
pub struct LessonSeed {
    pub title: String,
    pub preview: String,
    pub description: String,
    pub video_link: String,
    pub course_id: CourseId,
    pub owner_id: UserId,
}

/// Complete configuration for database seeding.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub num_users: usize,
    pub num_moderators: usize,
    pub courses_per_user: usize,
    pub lessons_per_course: usize,
    pub subscriptions_per_user: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_users: 10,
            num_moderators: 1,
            courses_per_user: 2,
            lessons_per_course: 5,
            subscriptions_per_user: 3,
        }
    }
}

impl SeedConfig {
    pub fn new(num_users: usize) -> Self {
        Self {
            num_users,
            ..Default::default()
        }
    }

    pub fn with_moderators(mut self, count: usize) -> Self {
        self.num_moderators = count;
        self
    }

    pub fn with_courses(mut self, courses_per_user: usize, lessons_per_course: usize) -> Self {
        self.courses_per_user = courses_per_user;
        self.lessons_per_course = lessons_per_course;
        self
    }

    pub fn with_subscriptions(mut self, subscriptions_per_user: usize) -> Self {
        self.subscriptions_per_user = subscriptions_per_user;
        self
    }

    /// Only regular users own courses.
    pub fn total_courses(&self) -> usize {
        self.num_users * self.courses_per_user
    }

    pub fn total_lessons(&self) -> usize {
        self.total_courses() * self.lessons_per_course
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_totals() {
        let config = SeedConfig::new(4)
            .with_moderators(2)
            .with_courses(3, 5)
            .with_subscriptions(1);

        assert_eq!(config.num_users, 4);
        assert_eq!(config.num_moderators, 2);
        assert_eq!(config.total_courses(), 12);
        assert_eq!(config.total_lessons(), 60);
        assert_eq!(config.subscriptions_per_user, 1);
    }
}
