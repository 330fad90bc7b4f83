//! Mapping from [`StatusState`] to the view the rendering host draws.

use crate::types::{ActionLabel, IconVariant, IndicatorViewModel, StatusState};

/// A change of daemon state between two consecutive published views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StatusState,
    pub to: StatusState,
}

/// Build the view for `state`. `status_text` is carried through verbatim.
pub fn reconcile(state: StatusState, status_text: impl Into<String>) -> IndicatorViewModel {
    let (icon_variant, action_label) = match state {
        StatusState::Error => (IconVariant::Error, ActionLabel::Start),
        StatusState::Idle => (IconVariant::Idle, ActionLabel::Stop),
        StatusState::Indexing => (IconVariant::Indexing, ActionLabel::Stop),
    };
    IndicatorViewModel {
        icon_variant,
        action_label,
        status_text: status_text.into(),
    }
}

/// `Some` when `next` differs from `previous`.
pub fn transition(previous: StatusState, next: StatusState) -> Option<Transition> {
    (previous != next).then_some(Transition {
        from: previous,
        to: next,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(StatusState::Error, IconVariant::Error, ActionLabel::Start)]
    #[case(StatusState::Idle, IconVariant::Idle, ActionLabel::Stop)]
    #[case(StatusState::Indexing, IconVariant::Indexing, ActionLabel::Stop)]
    fn maps_state_to_icon_and_action(
        #[case] state: StatusState,
        #[case] icon: IconVariant,
        #[case] label: ActionLabel,
    ) {
        let view = reconcile(state, "msg");
        assert_eq!(view.icon_variant, icon);
        assert_eq!(view.action_label, label);
        assert_eq!(view.state(), state);
    }

    #[test]
    fn status_text_is_verbatim() {
        let view = reconcile(StatusState::Idle, "  Sync: idle\n");
        assert_eq!(view.status_text, "  Sync: idle\n");
    }

    #[test]
    fn reconcile_is_idempotent() {
        assert_eq!(
            reconcile(StatusState::Indexing, "Indexing: 42 files left"),
            reconcile(StatusState::Indexing, "Indexing: 42 files left"),
        );
    }

    #[test]
    fn transition_only_on_change() {
        assert_eq!(transition(StatusState::Idle, StatusState::Idle), None);
        assert_eq!(
            transition(StatusState::Error, StatusState::Indexing),
            Some(Transition {
                from: StatusState::Error,
                to: StatusState::Indexing,
            })
        );
    }
}
