//! Request extractors for authentication and authorization.
//!
//! - [`auth`]: the `AuthUser` extractor built from a verified bearer token
//! - [`permissions`]: per-action policies and the `Require*` extractors that
//!   check them before the handler runs
//!
//! ```ignore
//! async fn delete_course(
//!     RequireDestroy(auth_user): RequireDestroy,
//!     Path(id): Path<CourseId>,
//! ) -> Result<StatusCode, AppError> {
//!     let course = CourseService::get_visible(&db, &auth_user, id).await?;
//!     Action::Destroy.authorize_object(&auth_user, course.owner_id.map(Into::into))?;
//!     // ...
//! }
//! ```

pub mod auth;
pub mod permissions;
