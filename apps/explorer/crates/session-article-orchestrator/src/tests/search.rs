use super::harness::{articles, TestHarness};
use crate::{SearchCondition, ValidationError, INITIAL_PAGE_SIZE, NOTHING_FOUND};
use explorer_search::{SearchError, SearchResponse};

#[tokio::test]
async fn empty_keyword_never_reaches_the_service() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    for keyword in ["", "   ", "\t\n"] {
        orchestrator.search(keyword).await;
        assert_eq!(
            orchestrator.search_state().condition(),
            Some(SearchCondition::Validation)
        );
    }

    assert_eq!(h.search.call_count(), 0);
    assert_eq!(
        orchestrator
            .search_state()
            .condition()
            .map(|c| c.message()),
        Some("Please enter a keyword")
    );
    assert!(!orchestrator.search_state().has_searched());
}

#[tokio::test]
async fn bitcoin_pages_three_then_five_then_five() {
    let h = TestHarness::new();
    h.search.with_results("bitcoin", 5);
    let mut orchestrator = h.anonymous().await;

    orchestrator.search("bitcoin").await;
    assert_eq!(orchestrator.search_state().displayed_count(), 3);
    assert_eq!(orchestrator.visible_articles().len(), 3);
    assert!(orchestrator.can_show_more());

    orchestrator.show_more();
    assert_eq!(orchestrator.search_state().displayed_count(), 5);
    assert!(!orchestrator.can_show_more());

    orchestrator.show_more();
    assert_eq!(orchestrator.search_state().displayed_count(), 5);
}

#[tokio::test]
async fn displayed_count_grows_monotonically_to_total() {
    for total in 0..12 {
        let h = TestHarness::new();
        h.search.with_results("k", total);
        let mut orchestrator = h.anonymous().await;

        orchestrator.search("k").await;
        let mut previous = orchestrator.search_state().displayed_count();
        assert_eq!(previous, INITIAL_PAGE_SIZE.min(total));

        for _ in 0..6 {
            orchestrator.show_more();
            let current = orchestrator.search_state().displayed_count();
            assert!(current >= previous);
            assert!(current <= total);
            previous = current;
        }
        assert_eq!(previous, total);
    }
}

#[tokio::test]
async fn no_results_is_nothing_found_not_a_failure() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    orchestrator.search("zzzznoresults").await;

    let state = orchestrator.search_state();
    assert_eq!(state.condition(), Some(SearchCondition::NoResults));
    assert_eq!(state.condition().unwrap().message(), NOTHING_FOUND);
    assert!(state.articles().is_empty());
    assert!(!state.is_loading());
    assert!(state.has_searched());
}

#[tokio::test]
async fn service_failure_clears_articles_and_sets_failed() {
    let h = TestHarness::new();
    h.search.with_results("bitcoin", 4);
    h.search.fail_for("offline");
    let mut orchestrator = h.anonymous().await;
    orchestrator.search("bitcoin").await;

    orchestrator.search("offline").await;

    let state = orchestrator.search_state();
    assert_eq!(state.condition(), Some(SearchCondition::Failed));
    assert!(state.articles().is_empty());
    assert_eq!(state.displayed_count(), 0);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn new_search_clears_previous_condition() {
    let h = TestHarness::new();
    h.search.with_results("bitcoin", 2);
    let mut orchestrator = h.anonymous().await;
    orchestrator.search("").await;

    let ticket = orchestrator.begin_search("bitcoin").unwrap();

    assert_eq!(orchestrator.search_state().condition(), None);
    assert!(orchestrator.search_state().is_loading());
    assert_eq!(ticket.keyword, "bitcoin");
}

#[tokio::test]
async fn stale_completion_is_discarded() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    let first = orchestrator.begin_search("bitcoin").unwrap();
    let second = orchestrator.begin_search("ethereum").unwrap();

    // The newer request settles first.
    let applied = orchestrator.apply_search_outcome(
        &second,
        Ok(SearchResponse {
            articles: articles(4, "ethereum"),
        }),
    );
    assert!(applied);

    let applied = orchestrator.apply_search_outcome(
        &first,
        Ok(SearchResponse {
            articles: articles(1, "bitcoin"),
        }),
    );
    assert!(!applied);

    let state = orchestrator.search_state();
    assert_eq!(state.keyword(), "ethereum");
    assert_eq!(state.articles().len(), 4);
    assert!(state.articles().iter().all(|a| a.keyword == "ethereum"));
}

#[tokio::test]
async fn stale_completion_does_not_clear_loading() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    let first = orchestrator.begin_search("bitcoin").unwrap();
    let _second = orchestrator.begin_search("ethereum").unwrap();

    let applied = orchestrator.apply_search_outcome(&first, Err(SearchError::MissingApiKey));

    assert!(!applied);
    let state = orchestrator.search_state();
    assert!(state.is_loading());
    assert_eq!(state.condition(), None);
}

#[tokio::test]
async fn begin_search_rejects_blank_keyword() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    assert_eq!(
        orchestrator.begin_search("  "),
        Err(ValidationError::EmptyKeyword)
    );
}

#[tokio::test]
async fn keyword_is_trimmed_before_searching() {
    let h = TestHarness::new();
    h.search.with_results("bitcoin", 1);
    let mut orchestrator = h.anonymous().await;

    orchestrator.search("  bitcoin  ").await;

    assert_eq!(orchestrator.search_state().keyword(), "bitcoin");
    assert_eq!(orchestrator.search_state().articles().len(), 1);
}
