/*
[INPUT]:  Route paths and in-flight polls
[OUTPUT]: Page transition and stale-poll verification
[POS]:    Integration test layer - router/poller interaction
[UPDATE]: When changing routes or the page-identity guard
*/

mod common;

use std::time::Duration;

use common::{client_for, setup_mock_server, task_json};
use facility_tasks_panel::poller::DiscardReason;
use facility_tasks_panel::routes::{RouteError, navigate};
use facility_tasks_panel::{Mutation, PageName, PollOutcome, RouteTable, Store, poll_tasks};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_poll_discarded_after_page_transition() {
    let server = setup_mock_server().await;
    let client = client_for(&server);
    let table = RouteTable::facility_management();
    let store = Store::new();
    navigate(&store, &table, "/classes").expect("classes route");

    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([task_json("t1", "localimport", "RUNNING", 50)]))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let (polled, _) = tokio::join!(poll_tasks(&store, &client), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        navigate(&store, &table, "/users").expect("users route");
    });

    assert_eq!(polled, PollOutcome::Discarded(DiscardReason::NavigatedAway));
    let state = store.snapshot();
    assert_eq!(state.page_name, Some(PageName::UserMgmt));
    assert!(state.page_state.task_list.is_empty());
}

#[tokio::test]
async fn test_navigation_emits_set_page() {
    let table = RouteTable::facility_management();
    let store = Store::new();
    let mut events = store.subscribe_mutations();

    let route = navigate(&store, &table, "/classes/c-7/enroll").expect("enroll route");

    assert_eq!(route.page, PageName::ClassEnrollMgmt);
    let event = events.recv().await.expect("mutation event");
    assert_eq!(event.name(), "SET_PAGE");
    match event {
        Mutation::SetPage { page, params } => {
            assert_eq!(page, PageName::ClassEnrollMgmt);
            assert_eq!(params.get("id").map(String::as_str), Some("c-7"));
        }
        other => panic!("unexpected mutation {other:?}"),
    }
}

#[test]
fn test_unknown_path_is_rejected() {
    let table = RouteTable::facility_management();
    let store = Store::new();

    let err = navigate(&store, &table, "/nowhere").unwrap_err();

    assert!(matches!(err, RouteError::NotFound(_)));
    assert_eq!(store.snapshot().page_name, None);
}
