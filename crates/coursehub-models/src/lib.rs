//! # Coursehub Models
//!
//! Domain models and DTOs for the Coursehub API: database rows, request
//! payloads with their validation rules, and response shapes.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID identifiers
//! - [`users`]: Users, authentication payloads and system roles
//! - [`courses`]: Courses and their list/detail representations
//! - [`lessons`]: Lessons, the video link rule and paginated listings
//! - [`subscriptions`]: Course subscriptions and the toggle payload

pub mod courses;
pub mod ids;
pub mod lessons;
pub mod subscriptions;
pub mod users;

pub use courses::{Course, CourseDetail, CourseWithStats, CreateCourseDto, UpdateCourseDto};
pub use ids::{CourseId, LessonId, RoleId, SubscriptionId, UserId};
pub use lessons::{CreateLessonDto, Lesson, PaginatedLessonsResponse, UpdateLessonDto};
pub use subscriptions::{
    MessageResponse, Subscription, SubscriptionState, SubscriptionView, ToggleSubscriptionRequest,
};
pub use users::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, User, UserCredentials,
    system_roles,
};
