/// Server-side identifiers are JPA `Long` primary keys.
pub type DbId = i64;

/// The server serialises `LocalDateTime` without a zone designator.
pub type LocalTimestamp = chrono::NaiveDateTime;

/// Calendar dates arrive as plain ISO `yyyy-mm-dd` strings.
pub type LocalDate = chrono::NaiveDate;
