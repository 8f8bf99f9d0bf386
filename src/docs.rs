use coursehub_core::{PaginationMeta, PaginationParams};
use coursehub_models::{
    CourseDetail, CourseWithStats, CreateCourseDto, CreateLessonDto, Lesson, LoginRequest,
    LoginResponse, MessageResponse, PaginatedLessonsResponse, ProfileResponse, RegisterRequest,
    SubscriptionView, ToggleSubscriptionRequest, UpdateCourseDto, UpdateLessonDto, User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::lessons::controller::create_lesson,
        crate::modules::lessons::controller::get_lessons,
        crate::modules::lessons::controller::get_lesson,
        crate::modules::lessons::controller::update_lesson,
        crate::modules::lessons::controller::delete_lesson,
        crate::modules::subscriptions::controller::toggle_subscription,
        crate::modules::subscriptions::controller::get_subscriptions,
    ),
    components(
        schemas(
            User,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            ProfileResponse,
            ErrorResponse,
            CourseWithStats,
            CourseDetail,
            CreateCourseDto,
            UpdateCourseDto,
            Lesson,
            CreateLessonDto,
            UpdateLessonDto,
            PaginatedLessonsResponse,
            ToggleSubscriptionRequest,
            MessageResponse,
            SubscriptionView,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and profile"),
        (name = "Courses", description = "Course management"),
        (name = "Lessons", description = "Lesson management"),
        (name = "Subscriptions", description = "Course update subscriptions")
    ),
    info(
        title = "Coursehub API",
        version = "0.1.0",
        description = "Courses, lessons and subscriptions with owner and moderator permissions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
