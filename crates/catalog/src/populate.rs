//! Select-control refresh cycle with stale-response suppression.
//!
//! The page fires a refresh on load and on every change of the parent
//! select, with no cancellation of in-flight requests. Responses can
//! therefore complete out of order; each refresh takes a generation
//! number and a completed response is applied only while its generation
//! is still the newest. A stale response is discarded, never merged.

use std::sync::atomic::{AtomicU64, Ordering};

use ums_core::view::{SelectControl, SelectOption};

use crate::api::{CatalogApi, CatalogApiError};

/// Label of the leading placeholder option in the course select.
pub const COURSE_PLACEHOLDER: &str = "Select a course";

/// Element id of the dependent course select.
const COURSE_SELECT_ID: &str = "courseToAdd";

/// Element id of the degree-course select.
const DEGREE_COURSE_SELECT_ID: &str = "degreeCourse";

/// Element id of the professor's examination appeal select.
const EXAM_APPEALS_SELECT_ID: &str = "examAppeals";

/// What happened to one refresh call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was applied; `count` options now follow the
    /// placeholder.
    Applied { count: usize },
    /// A newer refresh started while this one was in flight; the
    /// response was discarded and the select left untouched.
    Stale,
}

/// Drives select population from the catalogue endpoints.
pub struct CoursePopulator {
    api: CatalogApi,
    generation: AtomicU64,
}

impl CoursePopulator {
    pub fn new(api: CatalogApi) -> Self {
        Self {
            api,
            generation: AtomicU64::new(0),
        }
    }

    /// Empty course select with its reserved placeholder.
    pub fn course_select() -> SelectControl {
        SelectControl::with_placeholder(COURSE_SELECT_ID, COURSE_PLACEHOLDER)
    }

    /// Empty degree-course select. This control has no placeholder;
    /// its options are replaced wholesale.
    pub fn degree_course_select() -> SelectControl {
        SelectControl::new(DEGREE_COURSE_SELECT_ID)
    }

    /// Empty examination-appeal select, also without a placeholder.
    pub fn exam_appeals_select() -> SelectControl {
        SelectControl::new(EXAM_APPEALS_SELECT_ID)
    }

    /// Refresh the dependent course select for one degree course.
    ///
    /// On success the option set is replaced wholesale; on error or on a
    /// stale response the select keeps whatever it had, since nothing is
    /// cleared before the response arrives.
    pub async fn refresh_courses(
        &self,
        select: &mut SelectControl,
        degree_course_name: &str,
    ) -> Result<RefreshOutcome, CatalogApiError> {
        let generation = self.begin();
        let names = self.api.get_courses(degree_course_name).await?;

        if !self.is_current(generation) {
            tracing::debug!(
                degree_course_name,
                generation,
                "Discarding stale course response",
            );
            return Ok(RefreshOutcome::Stale);
        }

        let count = names.len();
        select.replace_options(names.into_iter().map(SelectOption::named));
        tracing::debug!(degree_course_name, count, "Course select repopulated");
        Ok(RefreshOutcome::Applied { count })
    }

    /// Refresh the degree-course select from the flat listing.
    pub async fn refresh_degree_courses(
        &self,
        select: &mut SelectControl,
    ) -> Result<RefreshOutcome, CatalogApiError> {
        let generation = self.begin();
        let courses = self.api.get_degree_courses().await?;

        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale degree-course response");
            return Ok(RefreshOutcome::Stale);
        }

        let count = courses.len();
        select.replace_options(courses.into_iter().map(|c| SelectOption::named(c.name)));
        tracing::debug!(count, "Degree-course select repopulated");
        Ok(RefreshOutcome::Applied { count })
    }

    /// Refresh the examination-appeal select from the professor listing.
    ///
    /// Each option is valued by the course name and labelled with the
    /// appeal date, so the professor picks an appeal by when it takes
    /// place.
    pub async fn refresh_exam_appeals(
        &self,
        select: &mut SelectControl,
    ) -> Result<RefreshOutcome, CatalogApiError> {
        let generation = self.begin();
        let appeals = self.api.get_examination_appeals().await?;

        if !self.is_current(generation) {
            tracing::debug!(generation, "Discarding stale examination-appeal response");
            return Ok(RefreshOutcome::Stale);
        }

        let count = appeals.len();
        select.replace_options(appeals.into_iter().map(|appeal| SelectOption {
            value: appeal.course.name,
            label: appeal.date.to_string(),
        }));
        tracing::debug!(count, "Examination-appeal select repopulated");
        Ok(RefreshOutcome::Applied { count })
    }

    // ---- private helpers ----

    /// Start a new refresh generation and return its number.
    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether no newer refresh has started since `generation`.
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}
