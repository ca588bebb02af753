/// Release date codec and entity helpers against a mock connection
pub mod song_tests;


/// Live database tests run only when a database is configured.
pub(crate) fn db_tests_disabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}
