use super::harness::{AuthFailure, TestHarness};
use crate::{ModalVisibility, Route};
use explorer_auth::Credentials;

#[tokio::test]
async fn opening_login_while_register_is_open_shows_only_login() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    orchestrator.open_register();
    orchestrator.open_login();

    let modal = orchestrator.modal();
    assert!(modal.is_login_open());
    assert!(!modal.is_register_open());
}

#[tokio::test]
async fn switching_and_closing_modals() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    orchestrator.open_login();
    orchestrator.open_register();
    assert_eq!(orchestrator.modal(), ModalVisibility::Register);

    orchestrator.close_modals();
    assert_eq!(orchestrator.modal(), ModalVisibility::None);
    assert!(!orchestrator.modal().is_open());

    orchestrator.close_modals();
    assert_eq!(orchestrator.modal(), ModalVisibility::None);
}

#[tokio::test]
async fn dismissing_notice_clears_it() {
    let h = TestHarness::new();
    h.auth.fail_login(AuthFailure::Internal);
    let mut orchestrator = h.anonymous().await;
    orchestrator
        .sign_in(&Credentials::new("ann@example.com", "nope"))
        .await
        .unwrap_err();
    assert!(orchestrator.notice().is_some());

    orchestrator.dismiss_notice();
    orchestrator.dismiss_notice();

    assert!(orchestrator.notice().is_none());
}

#[tokio::test]
async fn saved_news_route_requires_session() {
    let h = TestHarness::new();
    let mut orchestrator = h.anonymous().await;

    assert_eq!(orchestrator.resolve_route(Route::SavedNews), Route::Home);

    orchestrator
        .sign_in(&Credentials::new("ann@example.com", "password123"))
        .await
        .unwrap();
    assert_eq!(orchestrator.resolve_route(Route::SavedNews), Route::SavedNews);

    orchestrator.sign_out().await;
    assert_eq!(orchestrator.resolve_route(Route::SavedNews), Route::Home);
}

#[tokio::test]
async fn nothing_is_routable_while_initializing() {
    let h = TestHarness::new();
    let orchestrator = h.orchestrator();

    assert!(orchestrator.is_initializing());
    assert_eq!(orchestrator.resolve_route(Route::SavedNews), Route::Home);
}
