//! Degree-course catalogue client for dependent select population.
//!
//! [`CatalogApi`] wraps the two course-listing endpoints; [`CoursePopulator`]
//! drives the select-control refresh cycle, tagging each request with a
//! generation number so a slow response can never overwrite a newer one.

pub mod api;
pub mod populate;

pub use api::{AppealCourse, CatalogApi, CatalogApiError, DegreeCourse, ExaminationAppeal};
pub use populate::{CoursePopulator, RefreshOutcome, COURSE_PLACEHOLDER};
