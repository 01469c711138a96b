//! # Monitor State
//!
//! The baseline carried from one cycle to the next, and the pure transition
//! functions that advance it.

use crate::differ::{diff_badges, diff_presence};
use crate::model::{BadgeRecord, BadgeSnapshot, PresenceSnapshot};
use crate::notifier::MonitorEvent;

/// What a failed fetch does to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaselinePolicy {
    /// A failed fetch replaces the baseline with an empty/absent snapshot.
    /// The next successful fetch then only re-establishes the baseline, so a
    /// change spanning the failure goes unreported.
    #[default]
    Reset,
    /// A failed fetch leaves the previous snapshot in place.
    RetainLastKnown,
}

/// Last known snapshots, owned by the poll loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    pub badges: BadgeSnapshot,
    /// `None` until the first successful presence fetch, and after a failed
    /// one under `BaselinePolicy::Reset`
    pub presence: Option<PresenceSnapshot>,
}

/// Advance the badge baseline.
///
/// `fetched` is `None` when the fetch failed. Returns the new baseline and
/// the events to emit, additions first in current order, then removals in
/// previous order.
#[must_use]
pub fn badge_step(
    previous: &[BadgeRecord],
    fetched: Option<BadgeSnapshot>,
    policy: BaselinePolicy,
) -> (BadgeSnapshot, Vec<MonitorEvent>) {
    let current = match (fetched, policy) {
        (Some(current), _) => current,
        (None, BaselinePolicy::Reset) => BadgeSnapshot::new(),
        (None, BaselinePolicy::RetainLastKnown) => return (previous.to_vec(), Vec::new()),
    };

    // Badge changes are only reported against a non-empty previous snapshot
    if previous.is_empty() {
        return (current, Vec::new());
    }

    let diff = diff_badges(previous, &current);
    let events = diff
        .added
        .into_iter()
        .map(MonitorEvent::BadgeAdded)
        .chain(diff.removed.into_iter().map(MonitorEvent::BadgeRemoved))
        .collect();
    (current, events)
}

/// Advance the presence baseline.
///
/// `fetched` is `None` when the fetch failed.
#[must_use]
pub fn presence_step(
    previous: Option<&PresenceSnapshot>,
    fetched: Option<PresenceSnapshot>,
    policy: BaselinePolicy,
) -> (Option<PresenceSnapshot>, Option<MonitorEvent>) {
    let event = diff_presence(previous, fetched.as_ref()).map(MonitorEvent::StatusChanged);
    let next = match (fetched, policy) {
        (Some(current), _) => Some(current),
        (None, BaselinePolicy::Reset) => None,
        (None, BaselinePolicy::RetainLastKnown) => previous.cloned(),
    };
    (next, event)
}
