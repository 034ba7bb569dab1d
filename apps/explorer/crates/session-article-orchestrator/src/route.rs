use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Home,
    SavedNews,
}

/// The saved-news route is only reachable while signed in; anything else
/// lands on home.
pub fn resolve_route(requested: Route, is_authenticated: bool) -> Route {
    match requested {
        Route::SavedNews if is_authenticated => Route::SavedNews,
        _ => Route::Home,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard() {
        assert_eq!(resolve_route(Route::SavedNews, true), Route::SavedNews);
        assert_eq!(resolve_route(Route::SavedNews, false), Route::Home);
        assert_eq!(resolve_route(Route::Home, true), Route::Home);
        assert_eq!(resolve_route(Route::Home, false), Route::Home);
    }
}
