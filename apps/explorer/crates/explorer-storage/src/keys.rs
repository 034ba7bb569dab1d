//! Storage key constants.

/// Keys used inside a profile's storage document.
///
/// `jwt` and `savedArticles` match the keys the web client kept in
/// `localStorage`, so exported profiles stay readable by both.
pub struct StorageKeys;

impl StorageKeys {
    /// Auth token (opaque string)
    pub const TOKEN: &'static str = "jwt";

    /// Saved articles (JSON array of article summaries)
    pub const SAVED_ARTICLES: &'static str = "savedArticles";

    /// Mock auth user table (JSON array)
    pub const MOCK_AUTH_USERS: &'static str = "mockAuthUsers";

    /// Mock auth token signing secret
    pub const MOCK_AUTH_SECRET: &'static str = "mockAuthSecret";
}
