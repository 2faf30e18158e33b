/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use corgi_protocol::Status;

/// Server-side toggles on a status. Each one maps to a flag, an optional
/// counter and an activate/deactivate pair of API verbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusAction {
    Reblog,
    Favourite,
    Bookmark,
    Pin,
    Mute,
}

impl StatusAction {
    pub const ALL: [StatusAction; 5] = [
        StatusAction::Reblog,
        StatusAction::Favourite,
        StatusAction::Bookmark,
        StatusAction::Pin,
        StatusAction::Mute,
    ];

    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "reblog" | "reblogged" | "boost" => Some(Self::Reblog),
            "favourite" | "favourited" | "favorite" | "fav" => Some(Self::Favourite),
            "bookmark" | "bookmarked" => Some(Self::Bookmark),
            "pin" | "pinned" => Some(Self::Pin),
            "mute" | "muted" => Some(Self::Mute),
            _ => None,
        }
    }

    pub fn flag(self, status: &Status) -> bool {
        match self {
            Self::Reblog => status.reblogged,
            Self::Favourite => status.favourited,
            Self::Bookmark => status.bookmarked,
            Self::Pin => status.pinned,
            Self::Mute => status.muted,
        }
    }

    pub fn set_flag(self, status: &mut Status, value: bool) {
        match self {
            Self::Reblog => status.reblogged = value,
            Self::Favourite => status.favourited = value,
            Self::Bookmark => status.bookmarked = value,
            Self::Pin => status.pinned = value,
            Self::Mute => status.muted = value,
        }
    }

    pub fn has_counter(self) -> bool {
        matches!(self, Self::Reblog | Self::Favourite)
    }

    pub fn count(self, status: &Status) -> Option<u64> {
        match self {
            Self::Reblog => Some(status.reblogs_count),
            Self::Favourite => Some(status.favourites_count),
            _ => None,
        }
    }

    /// No-op for actions without a counter.
    pub fn set_count(self, status: &mut Status, value: u64) {
        match self {
            Self::Reblog => status.reblogs_count = value,
            Self::Favourite => status.favourites_count = value,
            _ => {}
        }
    }

    pub fn activate_verb(self) -> &'static str {
        match self {
            Self::Reblog => "reblog",
            Self::Favourite => "favourite",
            Self::Bookmark => "bookmark",
            Self::Pin => "pin",
            Self::Mute => "mute",
        }
    }

    pub fn deactivate_verb(self) -> &'static str {
        match self {
            Self::Reblog => "unreblog",
            Self::Favourite => "unfavourite",
            Self::Bookmark => "unbookmark",
            Self::Pin => "unpin",
            Self::Mute => "unmute",
        }
    }

    /// Tag sent as `action_type` to the interactions endpoint.
    pub fn interaction_tag(self) -> &'static str {
        match self {
            Self::Reblog => "reblogged",
            Self::Favourite => "favourited",
            Self::Bookmark => "bookmarked",
            Self::Pin => "pinned",
            Self::Mute => "muted",
        }
    }
}

/// Client-only recommendation signals. Never sent to the status API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    MoreLikeThis,
    LessLikeThis,
}

impl Signal {
    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "more" | "more_like_this" | "morelikethis" => Some(Self::MoreLikeThis),
            "less" | "less_like_this" | "lesslikethis" => Some(Self::LessLikeThis),
            _ => None,
        }
    }

    pub fn flag(self, status: &Status) -> bool {
        match self {
            Self::MoreLikeThis => status.more_like_this,
            Self::LessLikeThis => status.less_like_this,
        }
    }

    pub fn set_flag(self, status: &mut Status, value: bool) {
        match self {
            Self::MoreLikeThis => status.more_like_this = value,
            Self::LessLikeThis => status.less_like_this = value,
        }
    }

    pub fn interaction_tag(self) -> &'static str {
        match self {
            Self::MoreLikeThis => "more_like_this",
            Self::LessLikeThis => "less_like_this",
        }
    }
}

/// Pending remote calls per action, so each control can be disabled on its
/// own. Overlapping presses of the same action each hold one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionState {
    pending: [u32; 5],
}

impl ActionState {
    fn slot(action: StatusAction) -> usize {
        match action {
            StatusAction::Reblog => 0,
            StatusAction::Favourite => 1,
            StatusAction::Bookmark => 2,
            StatusAction::Pin => 3,
            StatusAction::Mute => 4,
        }
    }

    pub fn get(&self, action: StatusAction) -> bool {
        self.pending(action) > 0
    }

    pub fn pending(&self, action: StatusAction) -> u32 {
        self.pending[Self::slot(action)]
    }

    pub fn begin(&mut self, action: StatusAction) {
        let n = &mut self.pending[Self::slot(action)];
        *n = n.saturating_add(1);
    }

    pub fn finish(&mut self, action: StatusAction) {
        let n = &mut self.pending[Self::slot(action)];
        *n = n.saturating_sub(1);
    }

    pub fn any(&self) -> bool {
        self.pending.iter().any(|n| *n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_reblog_and_favourite_are_counted() {
        let mut status = Status {
            reblogs_count: 2,
            favourites_count: 9,
            ..Default::default()
        };
        assert_eq!(StatusAction::Reblog.count(&status), Some(2));
        assert_eq!(StatusAction::Favourite.count(&status), Some(9));
        for action in [StatusAction::Bookmark, StatusAction::Pin, StatusAction::Mute] {
            assert!(!action.has_counter());
            assert_eq!(action.count(&status), None);
            action.set_count(&mut status, 100);
        }
        assert_eq!(status.reblogs_count, 2);
        assert_eq!(status.favourites_count, 9);
    }

    #[test]
    fn set_flag_touches_one_field() {
        for action in StatusAction::ALL {
            let mut status = Status::default();
            action.set_flag(&mut status, true);
            assert!(action.flag(&status));
            let raised = StatusAction::ALL
                .iter()
                .filter(|a| a.flag(&status))
                .count();
            assert_eq!(raised, 1, "{action:?}");
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!(StatusAction::from_str("Favorite"), Some(StatusAction::Favourite));
        assert_eq!(StatusAction::from_str(" pin "), Some(StatusAction::Pin));
        assert_eq!(StatusAction::from_str("more"), None);
        assert_eq!(Signal::from_str("more"), Some(Signal::MoreLikeThis));
        assert_eq!(Signal::from_str("less_like_this"), Some(Signal::LessLikeThis));
    }

    #[test]
    fn action_state_tracks_each_action() {
        let mut state = ActionState::default();
        assert!(!state.any());
        state.begin(StatusAction::Pin);
        assert!(state.get(StatusAction::Pin));
        assert!(!state.get(StatusAction::Mute));
        assert!(state.any());
        state.finish(StatusAction::Pin);
        assert!(!state.any());
    }

    #[test]
    fn overlapping_calls_keep_the_action_busy() {
        let mut state = ActionState::default();
        state.begin(StatusAction::Favourite);
        state.begin(StatusAction::Favourite);
        assert_eq!(state.pending(StatusAction::Favourite), 2);

        state.finish(StatusAction::Favourite);
        assert!(state.get(StatusAction::Favourite));
        state.finish(StatusAction::Favourite);
        assert!(!state.get(StatusAction::Favourite));

        state.finish(StatusAction::Favourite);
        assert_eq!(state.pending(StatusAction::Favourite), 0);
    }
}
