//! Multi-cycle scenarios for the monitor
//!
//! Each test drives `Monitor::run_cycle` several times against a scripted
//! source and checks what reached the notifier.

mod common;

use common::{badge, badges, presence, RecordingNotifier, ScriptedSource};
use roblox_monitor::model::PresenceStatus;
use roblox_monitor::monitor::{BaselinePolicy, Monitor, MonitorState};
use roblox_monitor::notifier::MonitorEvent;

const USER_ID: u64 = 8_213_751_331;

fn monitor(
    source: ScriptedSource,
    policy: BaselinePolicy,
) -> (Monitor<ScriptedSource, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::default();
    let monitor = Monitor::new(source, notifier.clone(), USER_ID, policy);
    (monitor, notifier)
}

async fn run_cycles<S, N>(monitor: &Monitor<S, N>, cycles: usize) -> MonitorState
where
    S: roblox_monitor::fetcher::RemoteStateSource,
    N: roblox_monitor::notifier::Notifier,
{
    let mut state = MonitorState::default();
    for _ in 0..cycles {
        state = monitor.run_cycle(state).await.state;
    }
    state
}

#[tokio::test]
async fn test_first_cycle_is_silent() {
    let source = ScriptedSource::new(vec![Ok(badges(&[3, 2, 1]))], vec![Ok(presence(1))]);
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    let outcome = monitor.run_cycle(MonitorState::default()).await;

    assert!(outcome.events.is_empty());
    assert!(notifier.events().is_empty());
    assert_eq!(outcome.state.badges.len(), 3);
    assert_eq!(outcome.state.presence, Some(presence(1)));
}

#[tokio::test]
async fn test_new_badge_reported_once() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1])), Ok(badges(&[2, 1])), Ok(badges(&[2, 1]))],
        vec![Ok(presence(0))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    run_cycles(&monitor, 3).await;

    assert_eq!(notifier.events(), vec![MonitorEvent::BadgeAdded(badge(2))]);
}

#[tokio::test]
async fn test_badge_dropping_out_of_window_reported_as_removed() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[2, 1])), Ok(badges(&[3, 2]))],
        vec![Ok(presence(0))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    run_cycles(&monitor, 2).await;

    assert_eq!(
        notifier.events(),
        vec![
            MonitorEvent::BadgeAdded(badge(3)),
            MonitorEvent::BadgeRemoved(badge(1)),
        ]
    );
}

#[tokio::test]
async fn test_presence_transition_reported() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1]))],
        vec![Ok(presence(0)), Ok(presence(2))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    run_cycles(&monitor, 2).await;

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    let MonitorEvent::StatusChanged(transition) = &events[0] else {
        panic!("expected a status change, got {events:?}");
    };
    assert_eq!(transition.from, PresenceStatus::Offline);
    assert_eq!(transition.to, PresenceStatus::InGame);
}

#[tokio::test]
async fn test_presence_failure_resets_baseline() {
    // Online, failed fetch, Online again: the gap clears the baseline
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1]))],
        vec![Ok(presence(1)), Err(()), Ok(presence(1))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    let state = run_cycles(&monitor, 3).await;

    assert!(notifier.events().is_empty());
    assert_eq!(state.presence, Some(presence(1)));
}

#[tokio::test]
async fn test_change_across_failure_is_missed_under_reset() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1])), Err(()), Ok(badges(&[2, 1]))],
        vec![Ok(presence(0)), Err(()), Ok(presence(1))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    run_cycles(&monitor, 3).await;

    assert!(notifier.events().is_empty());
}

#[tokio::test]
async fn test_change_across_failure_is_reported_when_retaining() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1])), Err(()), Ok(badges(&[2, 1]))],
        vec![Ok(presence(0)), Err(()), Ok(presence(1))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::RetainLastKnown);

    let state = run_cycles(&monitor, 3).await;

    let events = notifier.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], MonitorEvent::BadgeAdded(badge(2)));
    assert!(matches!(&events[1], MonitorEvent::StatusChanged(t) if t.to == PresenceStatus::Online));
    assert_eq!(state.badges, badges(&[2, 1]));
}

#[tokio::test]
async fn test_badge_events_precede_status_event() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1])), Ok(badges(&[2]))],
        vec![Ok(presence(1)), Ok(presence(0))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    run_cycles(&monitor, 2).await;

    let kinds: Vec<_> = notifier.events().iter().map(MonitorEvent::kind).collect();
    assert_eq!(kinds, vec!["badge_added", "badge_removed", "status_changed"]);
}

#[tokio::test]
async fn test_empty_baseline_suppresses_badge_diff() {
    // An account with no badges yet: the first award only seeds the baseline
    let source = ScriptedSource::new(
        vec![Ok(badges(&[])), Ok(badges(&[7]))],
        vec![Ok(presence(0))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    let state = run_cycles(&monitor, 2).await;

    assert!(notifier.events().is_empty());
    assert_eq!(state.badges, badges(&[7]));
}

#[tokio::test]
async fn test_outcome_events_match_delivered_events() {
    let source = ScriptedSource::new(
        vec![Ok(badges(&[1])), Ok(badges(&[5, 1]))],
        vec![Ok(presence(0)), Ok(presence(1))],
    );
    let (monitor, notifier) = monitor(source, BaselinePolicy::Reset);

    let first = monitor.run_cycle(MonitorState::default()).await;
    let second = monitor.run_cycle(first.state).await;

    assert_eq!(second.events, notifier.events());
    assert_eq!(second.events.len(), 2);
}
