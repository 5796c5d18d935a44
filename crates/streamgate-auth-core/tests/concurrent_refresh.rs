//! Concurrency tests for refresh rotation
//!
//! Two simultaneous refresh attempts presenting the same current token must
//! resolve to exactly one success and one `SessionInvalidated` - never two
//! successes (which would leak divergent sessions) and never two failures.

mod common;

use std::sync::Arc;

use streamgate_auth_core::AuthError;

use common::test_coordinator;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refresh_has_exactly_one_winner() {
    let (coordinator, users, _) = test_coordinator();
    users.insert_test_user("alice@example.com", "correct-pw", "user");

    let (_, pair) = coordinator
        .login("alice@example.com", "correct-pw")
        .await
        .unwrap();

    let mut current_refresh = pair.refresh_token;

    for round in 0..1000 {
        let a = {
            let coordinator = Arc::clone(&coordinator);
            let token = current_refresh.clone();
            tokio::spawn(async move { coordinator.refresh(&token).await })
        };
        let b = {
            let coordinator = Arc::clone(&coordinator);
            let token = current_refresh.clone();
            tokio::spawn(async move { coordinator.refresh(&token).await })
        };

        let (ra, rb) = (a.await.unwrap(), b.await.unwrap());

        let winners: Vec<_> = [ra, rb].into_iter().filter_map(Result::ok).collect();
        assert_eq!(
            winners.len(),
            1,
            "round {round}: exactly one refresh must win the race"
        );

        current_refresh = winners.into_iter().next().unwrap().1.refresh_token;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stale_and_current_tokens_resolve_deterministically() {
    let (coordinator, users, _) = test_coordinator();
    users.insert_test_user("alice@example.com", "correct-pw", "user");

    let (_, pair1) = coordinator
        .login("alice@example.com", "correct-pw")
        .await
        .unwrap();
    let (_, pair2) = coordinator.refresh(&pair1.refresh_token).await.unwrap();

    // Race the superseded token against the current one
    let stale = {
        let coordinator = Arc::clone(&coordinator);
        let token = pair1.refresh_token.clone();
        tokio::spawn(async move { coordinator.refresh(&token).await })
    };
    let current = {
        let coordinator = Arc::clone(&coordinator);
        let token = pair2.refresh_token.clone();
        tokio::spawn(async move { coordinator.refresh(&token).await })
    };

    let stale_result = stale.await.unwrap();
    let current_result = current.await.unwrap();

    assert!(
        matches!(stale_result, Err(AuthError::SessionInvalidated)),
        "superseded token must always be rejected"
    );
    current_result.expect("current token must always be accepted");
}
