//! Ordering and failure behaviour of the insight fetcher under virtual time

use pe_insight::{InsightFetcher, InsightState, FALLBACK_MESSAGE};
use pe_test_utils::{numbered_data_set, seed_data_set, HangingSummarizer, Reply, ScriptedSummarizer};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn superseded_request_is_cancelled() {
    let script = Arc::new(ScriptedSummarizer::new([
        Reply::ok("about A").after(ms(500)),
        Reply::ok("about B").after(ms(50)),
    ]));
    let fetcher = InsightFetcher::new(script.clone());

    let first = fetcher.trigger(&numbered_data_set(3));
    tokio::time::sleep(ms(1)).await;
    assert_eq!(script.running(), 1);

    let second = fetcher.trigger(&numbered_data_set(5));
    assert!(first.await.unwrap_err().is_cancelled());

    second.await.unwrap();
    assert_eq!(script.running(), 0);
    assert_eq!(fetcher.state(), InsightState::Ready("about B".into()));
    assert_eq!(fetcher.status().generation(), 2);
    assert_eq!(script.seen(), vec![3, 5]);

    tokio::time::sleep(ms(1_000)).await;
    assert_eq!(fetcher.state(), InsightState::Ready("about B".into()));
}

#[tokio::test(start_paused = true)]
async fn early_response_for_old_data_keeps_loading() {
    let script = Arc::new(ScriptedSummarizer::new([
        Reply::ok("about A").after(ms(10)),
        Reply::ok("about B").after(ms(300)),
    ]));
    let fetcher = InsightFetcher::new(script.clone());

    let first = fetcher.trigger(&numbered_data_set(1));
    tokio::time::sleep(ms(1)).await;
    let second = fetcher.trigger(&numbered_data_set(2));

    assert!(first.await.unwrap_err().is_cancelled());
    tokio::time::sleep(ms(50)).await;
    assert_eq!(fetcher.state(), InsightState::Loading);

    second.await.unwrap();
    assert_eq!(fetcher.state(), InsightState::Ready("about B".into()));
}

#[tokio::test(start_paused = true)]
async fn stale_failure_does_not_replace_ready() {
    let script = Arc::new(ScriptedSummarizer::new([
        Reply::err("boom").after(ms(200)),
        Reply::ok("fresh").after(ms(20)),
    ]));
    let fetcher = InsightFetcher::new(script.clone());

    let first = fetcher.trigger(&numbered_data_set(1));
    tokio::time::sleep(ms(1)).await;
    let second = fetcher.trigger(&numbered_data_set(2));
    second.await.unwrap();
    assert!(first.await.unwrap_err().is_cancelled());

    tokio::time::sleep(ms(500)).await;
    assert_eq!(fetcher.state(), InsightState::Ready("fresh".into()));
}

#[tokio::test(start_paused = true)]
async fn finished_request_is_not_cancelled() {
    let script = Arc::new(ScriptedSummarizer::new([Reply::ok("one"), Reply::ok("two")]));
    let fetcher = InsightFetcher::new(script.clone());

    let first = fetcher.trigger(&numbered_data_set(1));
    tokio::time::sleep(ms(1)).await;
    let second = fetcher.trigger(&numbered_data_set(2));

    first.await.unwrap();
    second.await.unwrap();
    assert_eq!(fetcher.state(), InsightState::Ready("two".into()));
}

#[tokio::test(start_paused = true)]
async fn subscribers_never_observe_stale_text() {
    let script = Arc::new(ScriptedSummarizer::new([
        Reply::ok("stale").after(ms(400)),
        Reply::ok("current").after(ms(100)),
    ]));
    let fetcher = InsightFetcher::new(script.clone());
    let mut rx = fetcher.subscribe();

    let monitor = tokio::spawn(async move {
        let mut observed = Vec::new();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().state().clone();
            observed.push(state);
            if observed.len() > 8 {
                break;
            }
        }
        observed
    });

    let first = fetcher.trigger(&numbered_data_set(1));
    tokio::time::sleep(ms(1)).await;
    let second = fetcher.trigger(&numbered_data_set(2));
    assert!(first.await.unwrap_err().is_cancelled());
    second.await.unwrap();
    drop(fetcher);

    let observed = monitor.await.unwrap();
    assert!(!observed.contains(&InsightState::Ready("stale".into())));
    assert_eq!(observed.last(), Some(&InsightState::Ready("current".into())));
}

#[tokio::test(start_paused = true)]
async fn settled_follows_the_newest_request() {
    let script = Arc::new(ScriptedSummarizer::new([
        Reply::ok("one").after(ms(100)),
        Reply::ok("two").after(ms(100)),
    ]));
    let fetcher = InsightFetcher::new(script.clone());

    fetcher.trigger(&numbered_data_set(1));
    let waiter = {
        let fetcher = fetcher.clone();
        tokio::spawn(async move { fetcher.settled().await })
    };
    tokio::time::sleep(ms(50)).await;
    fetcher.trigger(&numbered_data_set(2));

    // First response lands at 100ms but belongs to generation 1
    assert_eq!(waiter.await.unwrap(), InsightState::Ready("two".into()));
}

#[tokio::test(start_paused = true)]
async fn hanging_service_times_out() {
    let fetcher = InsightFetcher::new(Arc::new(HangingSummarizer)).with_timeout(ms(2_000));

    let started = tokio::time::Instant::now();
    fetcher.trigger(&seed_data_set()).await.unwrap();

    assert_eq!(fetcher.state(), InsightState::Failed(FALLBACK_MESSAGE.into()));
    assert!(started.elapsed() >= ms(2_000));
}

#[tokio::test(start_paused = true)]
async fn retrigger_after_failure_recovers() {
    let script = Arc::new(ScriptedSummarizer::new([Reply::err("down"), Reply::ok("back up")]));
    let fetcher = InsightFetcher::new(script.clone());

    fetcher.trigger(&seed_data_set()).await.unwrap();
    assert_eq!(fetcher.state(), InsightState::failed());

    fetcher.trigger(&seed_data_set()).await.unwrap();
    assert_eq!(fetcher.state(), InsightState::Ready("back up".into()));
    assert_eq!(script.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn one_request_per_trigger_and_no_retries() {
    let script = Arc::new(ScriptedSummarizer::new([Reply::err("down")]));
    let fetcher = InsightFetcher::new(script.clone());

    fetcher.trigger(&seed_data_set()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(script.calls(), 1);
}
