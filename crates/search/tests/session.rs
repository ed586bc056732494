mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ScriptedCatalog, advance, drain, results_for};
use marquee_catalog::Feed;
use marquee_config::SearchConfig;
use marquee_search::{MemoryHistory, Query, ROW_LIMIT, ResultSource, Session, SessionEvent, ViewState};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc::UnboundedReceiver;

fn texts(events: &[SessionEvent]) -> Vec<String> {
	events
		.iter()
		.filter_map(|event| match event {
			SessionEvent::Results { query, .. } => Some(query.text().to_string()),
			_ => None,
		})
		.collect()
}

fn session(catalog: &Arc<ScriptedCatalog>) -> (Session<MemoryHistory>, UnboundedReceiver<SessionEvent>) {
	Session::new(&SearchConfig::default(), catalog.clone(), MemoryHistory::default())
}

fn searching(query: &str, live: bool) -> SessionEvent {
	SessionEvent::Searching {
		query: Query::new(query),
		live,
	}
}

fn results(query: &str, source: ResultSource) -> SessionEvent {
	SessionEvent::Results {
		query: Query::new(query),
		results: results_for(query).into(),
		source,
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn typing_burst_issues_one_request() {
	let catalog = ScriptedCatalog::new();
	let (session, mut rx) = session(&catalog);

	for text in ["b", "ba", "bat", "batm", "batman"] {
		session.input(text);
		advance(100).await;
	}
	assert!(catalog.search_calls().is_empty());

	advance(300).await;
	assert_eq!(catalog.search_calls(), vec!["batman"]);
	assert_eq!(
		drain(&mut rx),
		vec![searching("batman", true), results("batman", ResultSource::Network)]
	);
	assert_eq!(session.state(), ViewState::Home, "live results do not switch views");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn short_input_clears_without_a_request() {
	let catalog = ScriptedCatalog::new();
	let (session, mut rx) = session(&catalog);

	session.input("ab");
	session.input("a");
	advance(400).await;

	assert!(catalog.calls().is_empty());
	assert_eq!(drain(&mut rx), vec![SessionEvent::ResultsCleared]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn shortening_input_cancels_the_in_flight_search() {
	let catalog = ScriptedCatalog::new();
	catalog.delay_search("ab", Duration::from_millis(500));
	let (session, mut rx) = session(&catalog);

	session.input("ab");
	advance(350).await;
	assert!(session.coordinator().is_in_flight());

	session.input("a");
	advance(350).await;
	assert!(!session.coordinator().is_in_flight());

	advance(1_000).await;
	assert_eq!(catalog.search_calls(), vec!["ab"]);
	assert_eq!(drain(&mut rx), vec![searching("ab", true), SessionEvent::ResultsCleared]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn repeated_live_query_skips_the_loading_state() {
	let catalog = ScriptedCatalog::new();
	let (session, mut rx) = session(&catalog);

	session.input("alien");
	advance(400).await;
	session.input("alie");
	session.input("alien");
	advance(400).await;

	assert_eq!(catalog.search_calls(), vec!["alien"]);
	assert_eq!(
		drain(&mut rx),
		vec![
			searching("alien", true),
			results("alien", ResultSource::Network),
			results("alien", ResultSource::Cache),
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn submit_searches_now_and_shows_results() {
	let catalog = ScriptedCatalog::new();
	let (mut session, mut rx) = session(&catalog);

	session.input("bat");
	assert!(session.submit("Batman"));
	advance(1).await;

	assert_eq!(session.state(), ViewState::Results);
	assert_eq!(
		drain(&mut rx),
		vec![
			SessionEvent::ViewChanged(ViewState::Results),
			searching("Batman", false),
			results("Batman", ResultSource::Network),
		]
	);

	advance(1_000).await;
	assert_eq!(catalog.search_calls(), vec!["Batman"], "submit disarms the pending live search");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn blank_submit_is_ignored() {
	let catalog = ScriptedCatalog::new();
	let (mut session, mut rx) = session(&catalog);

	assert!(!session.submit("   "));
	advance(10).await;
	assert!(drain(&mut rx).is_empty());
	assert_eq!(session.state(), ViewState::Home);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn search_failure_is_reported_inline() {
	let catalog = ScriptedCatalog::new();
	catalog.fail_search("oops");
	let (mut session, mut rx) = session(&catalog);

	session.submit("oops");
	advance(1).await;

	let events = drain(&mut rx);
	assert_eq!(
		events.last(),
		Some(&SessionEvent::SearchFailed {
			query: Query::new("oops"),
			message: "Error: Search request failed (status 500)".to_string(),
		})
	);
	assert!(!session.coordinator().is_in_flight());
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn missing_key_fails_without_network_activity() {
	let catalog = ScriptedCatalog::new();
	catalog.set_missing_key(true);
	let (session, mut rx) = session(&catalog);

	session.input("batman");
	advance(400).await;

	assert!(catalog.calls().is_empty());
	let events = drain(&mut rx);
	match events.last() {
		Some(SessionEvent::SearchFailed { message, .. }) => assert!(message.contains("API key")),
		other => panic!("expected SearchFailed, got {other:?}"),
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn home_feed_builds_rows_and_hero() {
	let catalog = ScriptedCatalog::new();
	let (session, mut rx) = session(&catalog);

	session.load_home();
	advance(1).await;

	let events = drain(&mut rx);
	let [SessionEvent::Home(home)] = events.as_slice() else {
		panic!("expected one Home event, got {events:?}");
	};
	assert_eq!(home.rows.iter().map(|row| row.feed).collect::<Vec<_>>(), Feed::ALL.to_vec());
	assert!(home.rows.iter().all(|row| row.movies.len() == ROW_LIMIT));
	assert_eq!(home.hero.as_ref().map(|m| m.title.as_str()), Some("Trending 0"));
	assert_eq!(home.row(Feed::TopRated).map(|row| row.title()), Some("Top Rated"));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn home_hero_falls_back_to_popular() {
	let catalog = ScriptedCatalog::new();
	catalog.empty_feed(Feed::Trending);
	let (session, mut rx) = session(&catalog);

	session.load_home();
	advance(1).await;

	let events = drain(&mut rx);
	let [SessionEvent::Home(home)] = events.as_slice() else {
		panic!("expected one Home event, got {events:?}");
	};
	assert_eq!(home.hero.as_ref().map(|m| m.title.as_str()), Some("Popular 0"));
	assert!(home.row(Feed::Trending).is_some_and(|row| row.movies.is_empty()));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn any_feed_failure_fails_the_home_load() {
	let catalog = ScriptedCatalog::new();
	catalog.fail_feed(Feed::Upcoming);
	let (session, mut rx) = session(&catalog);

	session.load_home();
	advance(1).await;

	assert_eq!(
		drain(&mut rx),
		vec![SessionEvent::HomeFailed {
			message: "Home load error: Feed request failed (status 503)".to_string(),
		}]
	);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn back_to_back_submits_show_only_the_last_on_a_multi_thread_runtime() {
	for _ in 0..10 {
		let catalog = ScriptedCatalog::new();
		catalog.delay_search("first", Duration::from_millis(20));
		let (session, mut rx) = session(&catalog);

		let session = tokio::spawn(async move {
			let mut session = session;
			session.submit("first");
			session.submit("second");
			session
		})
		.await
		.unwrap();

		let mut events = Vec::new();
		let deadline = tokio::time::Instant::now() + Duration::from_millis(150);
		while let Ok(Some(event)) = tokio::time::timeout_at(deadline, rx.recv()).await {
			events.push(event);
		}
		assert_eq!(texts(&events), vec!["second"], "events: {events:?}");
		drop(session);
	}
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn submit_after_a_live_fire_replaces_it() {
	let catalog = ScriptedCatalog::new();
	catalog.delay_search("bat", Duration::from_millis(200));
	let (mut session, mut rx) = session(&catalog);

	session.input("bat");
	advance(350).await;
	assert!(session.submit("batman"));
	advance(1_000).await;

	assert_eq!(catalog.search_calls(), vec!["bat", "batman"]);
	assert_eq!(
		drain(&mut rx),
		vec![
			searching("bat", true),
			SessionEvent::ViewChanged(ViewState::Results),
			searching("batman", false),
			results("batman", ResultSource::Network),
		]
	);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn missing_key_reports_without_a_loading_state() {
	let catalog = ScriptedCatalog::new();
	catalog.set_missing_key(true);
	let (mut session, mut rx) = session(&catalog);

	session.submit("batman");
	advance(1).await;

	let events = drain(&mut rx);
	assert!(
		!events.iter().any(|e| matches!(e, SessionEvent::Searching { .. })),
		"no fetch was issued: {events:?}"
	);
	assert!(matches!(events.last(), Some(SessionEvent::SearchFailed { .. })));
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn movie_of_day_is_a_seeded_pick_from_popular() {
	let catalog = ScriptedCatalog::new();
	let mut picks = Vec::new();

	for _ in 0..2 {
		let (mut session, mut rx) = session(&catalog);
		session.set_home_seed(7);
		session.load_home();
		advance(1).await;

		let events = drain(&mut rx);
		let [SessionEvent::Home(home)] = events.as_slice() else {
			panic!("expected one Home event, got {events:?}");
		};
		let pick = home.movie_of_day.clone().expect("popular feed is not empty");
		assert!((200..215).contains(&pick.id.0), "picked {pick:?}");
		picks.push(pick);
	}
	assert_eq!(picks[0], picks[1]);
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn empty_popular_feed_has_no_movie_of_day() {
	let catalog = ScriptedCatalog::new();
	catalog.empty_feed(Feed::Popular);
	let (session, mut rx) = session(&catalog);

	session.load_home();
	advance(1).await;

	let events = drain(&mut rx);
	let [SessionEvent::Home(home)] = events.as_slice() else {
		panic!("expected one Home event, got {events:?}");
	};
	assert_eq!(home.movie_of_day, None);
	assert_eq!(home.hero.as_ref().map(|m| m.title.as_str()), Some("Trending 0"));
}
