//! Sign-out cleanup, revocation and session observation

mod common;

use anyhow::Result;
use auth_session::{
    ApiClient, AuthSessionManager, AuthSnapshot, FnTokenRevoker, SignInOutcome,
};
use common::{FakeApi, FakeRevoker, RevokeBehavior, ScriptedExchange};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

async fn signed_in(revoker: Arc<FakeRevoker>) -> (AuthSessionManager, Arc<FakeApi>) {
    let api = FakeApi::with_profile(common::profile_body());
    let manager = common::manager(ScriptedExchange::granting("T"), api.clone(), revoker);
    let outcome = manager.sign_in().await.unwrap();
    assert!(matches!(outcome, SignInOutcome::SignedIn(_)));
    (manager, api)
}

fn assert_signed_out(manager: &AuthSessionManager, api: &FakeApi) {
    assert_eq!(manager.state(), AuthSnapshot::default());
    assert!(api.header("Authorization").is_none());
    assert_eq!(api.header("Client-Id").as_deref(), Some(common::CLIENT_ID));
}

#[tokio::test]
async fn test_sign_out_revokes_and_clears() {
    let revoker = FakeRevoker::new(RevokeBehavior::Succeed);
    let (manager, api) = signed_in(revoker.clone()).await;

    manager.sign_out().await;

    assert_eq!(
        *revoker.requests.lock().unwrap(),
        vec![(
            "T".to_string(),
            common::CLIENT_ID.to_string(),
            common::REVOKE_URL.to_string()
        )]
    );
    assert_signed_out(&manager, &api);
    assert!(!manager.is_logging_out());
}

#[tokio::test]
async fn test_sign_out_clears_even_when_revocation_fails() {
    let revoker = FakeRevoker::new(RevokeBehavior::Fail);
    let (manager, api) = signed_in(revoker.clone()).await;

    manager.sign_out().await;

    assert_eq!(revoker.call_count(), 1);
    assert_signed_out(&manager, &api);
    assert!(!manager.is_logging_out());
}

#[tokio::test]
async fn test_sign_out_cancelled_by_caller_still_clears() {
    let revoker = FakeRevoker::new(RevokeBehavior::Hang);
    let (manager, api) = signed_in(revoker.clone()).await;

    let result = tokio::time::timeout(Duration::from_millis(50), manager.sign_out()).await;

    assert!(result.is_err(), "revocation should still be pending");
    assert_eq!(revoker.call_count(), 1);
    assert_signed_out(&manager, &api);
    assert!(!manager.is_logging_out());
}

#[tokio::test]
async fn test_sign_out_is_idempotent() {
    let revoker = FakeRevoker::new(RevokeBehavior::Succeed);
    let (manager, api) = signed_in(revoker.clone()).await;

    manager.sign_out().await;
    manager.sign_out().await;

    assert_eq!(revoker.call_count(), 1);
    assert_signed_out(&manager, &api);
}

#[tokio::test]
async fn test_sign_out_without_session_skips_revocation() {
    let revoker = FakeRevoker::new(RevokeBehavior::Succeed);
    let api = FakeApi::with_profile(common::profile_body());
    let manager = common::manager(ScriptedExchange::granting("T"), api.clone(), revoker.clone());

    manager.sign_out().await;

    assert_eq!(revoker.call_count(), 0);
    assert_signed_out(&manager, &api);
}

#[tokio::test]
async fn test_logging_out_flag_is_set_during_revocation() {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());

    let revoker = FnTokenRevoker::new({
        let entered = entered.clone();
        let release = release.clone();
        move |_request, _endpoint| {
            let entered = entered.clone();
            let release = release.clone();
            Box::pin(async move {
                entered.notify_one();
                release.notified().await;
                Ok(())
            })
        }
    });

    let api = FakeApi::with_profile(common::profile_body());
    let manager = Arc::new(
        AuthSessionManager::builder()
            .config(common::config())
            .exchange(ScriptedExchange::granting("T"))
            .api_client(api.clone())
            .revoker(Arc::new(revoker))
            .build()
            .unwrap(),
    );
    manager.sign_in().await.unwrap();

    let task = tokio::spawn({
        let manager = manager.clone();
        async move { manager.sign_out().await }
    });

    entered.notified().await;
    assert!(manager.is_logging_out());
    // Session is only cleared once revocation settles
    assert!(manager.is_authenticated());

    release.notify_one();
    task.await.unwrap();

    assert!(!manager.is_logging_out());
    assert_signed_out(&manager, &api);
}

#[tokio::test]
async fn test_sign_in_after_sign_out() {
    let (manager, api) = signed_in(FakeRevoker::new(RevokeBehavior::Succeed)).await;

    manager.sign_out().await;
    manager.sign_in().await.unwrap();

    assert!(manager.is_authenticated());
    assert_eq!(api.header("Authorization").as_deref(), Some("Bearer T"));
}

#[tokio::test]
async fn test_changes_stream_reports_session_lifecycle() -> Result<()> {
    let api = FakeApi::with_profile(common::profile_body());
    let manager = common::manager(
        ScriptedExchange::granting("T"),
        api,
        FakeRevoker::new(RevokeBehavior::Succeed),
    );
    let mut receiver = manager.subscribe();

    manager.sign_in().await?;
    assert!(receiver.has_changed()?);
    let snapshot = receiver.borrow_and_update().clone();
    assert_eq!(snapshot.user.map(|u| u.id), Some(1));
    assert!(!snapshot.is_logging_in);

    let changes = manager.changes();
    futures::pin_mut!(changes);
    let current = changes.next().await.expect("stream yields current snapshot");
    assert!(current.is_authenticated());

    manager.sign_out().await;
    let mut last = None;
    while let Ok(Some(snapshot)) =
        tokio::time::timeout(Duration::from_millis(50), changes.next()).await
    {
        last = Some(snapshot);
    }
    assert_eq!(last, Some(AuthSnapshot::default()));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_operations_are_serialized() {
    let revoker = FakeRevoker::new(RevokeBehavior::Succeed);
    let api = FakeApi::with_profile(common::profile_body());
    let manager = Arc::new(common::manager(
        ScriptedExchange::granting("T"),
        api.clone(),
        revoker.clone(),
    ));

    let sign_in = tokio::spawn({
        let manager = manager.clone();
        async move { manager.sign_in().await.map(|_| ()) }
    });
    let sign_out = tokio::spawn({
        let manager = manager.clone();
        async move { manager.sign_out().await }
    });

    sign_in.await.unwrap().unwrap();
    sign_out.await.unwrap();

    // Either order leaves a consistent session
    let state = manager.state();
    assert!(!state.is_busy());
    assert_eq!(state.user.is_some(), state.token.is_some());
    assert_eq!(
        api.header("Authorization").is_some(),
        manager.is_authenticated()
    );
}
