//! # Snapshot Differ
//!
//! Pure comparisons between the previous and current snapshot of each
//! tracked category. No I/O happens here.

use crate::model::{BadgeRecord, PresenceSnapshot, PresenceStatus};
use std::collections::HashSet;

/// Badges that appeared or disappeared between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeDiff {
    /// In the order of the current snapshot
    pub added: Vec<BadgeRecord>,
    /// In the order of the previous snapshot
    pub removed: Vec<BadgeRecord>,
}

impl BadgeDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// A change in presence status between two consecutive snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: PresenceStatus,
    pub to: PresenceStatus,
    /// The snapshot that produced `to`
    pub current: PresenceSnapshot,
}

/// Compare two badge snapshots by identifier.
///
/// Field changes on a badge whose id is present in both snapshots are not
/// reported.
#[must_use]
pub fn diff_badges(previous: &[BadgeRecord], current: &[BadgeRecord]) -> BadgeDiff {
    let previous_ids: HashSet<u64> = previous.iter().map(|b| b.id).collect();
    let current_ids: HashSet<u64> = current.iter().map(|b| b.id).collect();

    BadgeDiff {
        added: current
            .iter()
            .filter(|b| !previous_ids.contains(&b.id))
            .cloned()
            .collect(),
        removed: previous
            .iter()
            .filter(|b| !current_ids.contains(&b.id))
            .cloned()
            .collect(),
    }
}

/// Compare two presence snapshots by status code only.
///
/// `None` on either side (no baseline yet, or the latest fetch failed)
/// never yields a transition.
#[must_use]
pub fn diff_presence(
    previous: Option<&PresenceSnapshot>,
    current: Option<&PresenceSnapshot>,
) -> Option<Transition> {
    let (previous, current) = (previous?, current?);
    if previous.status == current.status {
        return None;
    }
    Some(Transition {
        from: previous.status,
        to: current.status,
        current: current.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(id: u64) -> BadgeRecord {
        BadgeRecord {
            id,
            name: format!("Badge {id}"),
            description: None,
            created: None,
            icon_image_id: None,
        }
    }

    fn ids(badges: &[BadgeRecord]) -> Vec<u64> {
        badges.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_diff_badges_unchanged_is_empty() {
        let snapshot = vec![badge(1), badge(2), badge(3)];
        assert!(diff_badges(&snapshot, &snapshot).is_empty());
    }

    #[test]
    fn test_diff_badges_from_empty_adds_everything() {
        let current = vec![badge(3), badge(1)];
        let diff = diff_badges(&[], &current);
        assert_eq!(diff.added, current);
        assert!(diff.removed.is_empty());
    }

    #[test]
    fn test_diff_badges_to_empty_removes_everything() {
        let previous = vec![badge(3), badge(1)];
        let diff = diff_badges(&previous, &[]);
        assert!(diff.added.is_empty());
        assert_eq!(diff.removed, previous);
    }

    #[test]
    fn test_diff_badges_preserves_source_order() {
        let previous = vec![badge(5), badge(4), badge(3), badge(2)];
        let current = vec![badge(9), badge(8), badge(4), badge(7)];

        let diff = diff_badges(&previous, &current);

        assert_eq!(ids(&diff.added), vec![9, 8, 7]);
        assert_eq!(ids(&diff.removed), vec![5, 3, 2]);
    }

    #[test]
    fn test_diff_badges_sets_are_disjoint_from_common_ids() {
        let previous = vec![badge(1), badge(2), badge(3)];
        let current = vec![badge(2), badge(3), badge(4)];

        let diff = diff_badges(&previous, &current);
        let added: HashSet<u64> = ids(&diff.added).into_iter().collect();
        let removed: HashSet<u64> = ids(&diff.removed).into_iter().collect();

        assert!(added.is_disjoint(&removed));
        for common in [2, 3] {
            assert!(!added.contains(&common));
            assert!(!removed.contains(&common));
        }
        assert_eq!(added, HashSet::from([4]));
        assert_eq!(removed, HashSet::from([1]));
    }

    #[test]
    fn test_diff_badges_ignores_field_changes() {
        let previous = vec![badge(1)];
        let mut changed = badge(1);
        changed.description = Some("updated".to_string());
        changed.name = "Renamed".to_string();

        assert!(diff_badges(&previous, &[changed]).is_empty());
    }

    #[test]
    fn test_diff_presence_without_baseline() {
        let current = PresenceSnapshot::new(PresenceStatus::Online);
        assert_eq!(diff_presence(None, Some(&current)), None);
    }

    #[test]
    fn test_diff_presence_with_absent_current() {
        let previous = PresenceSnapshot::new(PresenceStatus::Online);
        assert_eq!(diff_presence(Some(&previous), None), None);
    }

    #[test]
    fn test_diff_presence_same_status() {
        for status in [
            PresenceStatus::Offline,
            PresenceStatus::Online,
            PresenceStatus::InGame,
            PresenceStatus::Unknown(3),
        ] {
            let snapshot = PresenceSnapshot::new(status);
            assert_eq!(diff_presence(Some(&snapshot), Some(&snapshot)), None);
        }
    }

    #[test]
    fn test_diff_presence_ignores_place_change() {
        let previous = PresenceSnapshot::new(PresenceStatus::InGame).with_place(1);
        let current = PresenceSnapshot::new(PresenceStatus::InGame).with_place(2);
        assert_eq!(diff_presence(Some(&previous), Some(&current)), None);
    }

    #[test]
    fn test_diff_presence_offline_to_in_game() {
        let previous = PresenceSnapshot::new(PresenceStatus::Offline);
        let current = PresenceSnapshot::new(PresenceStatus::InGame).with_place(42);

        let transition = diff_presence(Some(&previous), Some(&current)).unwrap();

        assert_eq!(transition.from, PresenceStatus::Offline);
        assert_eq!(transition.to, PresenceStatus::InGame);
        assert_eq!(transition.current, current);
    }
}
