#![forbid(unsafe_code)]

//! Interaction routing.
//!
//! An ordered table of `(predicate, action)` pairs over the clicked
//! [`RowPart`]. The first matching entry wins and at most one action runs
//! per interaction.
//!
//! | Part | Action |
//! |------|--------|
//! | `ExpandIcon` | [`Action::ToggleExpand`] |
//! | `Body`, `Checkbox` | [`Action::ToggleChecked`] |
//! | `Indent`, `LeafIcon` | nothing |

use vtree_core::event::RowPart;

/// Mutation triggered by an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Flip the node's checked state and propagate it.
    ToggleChecked,
    /// Expand or collapse the node.
    ToggleExpand,
}

impl Action {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToggleChecked => "toggle_checked",
            Self::ToggleExpand => "toggle_expand",
        }
    }
}

type Predicate = fn(RowPart) -> bool;

fn is_expand_icon(part: RowPart) -> bool {
    part == RowPart::ExpandIcon
}

fn is_checkable(part: RowPart) -> bool {
    matches!(part, RowPart::Body | RowPart::Checkbox)
}

/// Routing table, evaluated in order.
const ROUTES: &[(Predicate, Action)] = &[
    (is_expand_icon, Action::ToggleExpand),
    (is_checkable, Action::ToggleChecked),
];

/// Action for a click on `part`, if any.
#[must_use]
pub fn route(part: RowPart) -> Option<Action> {
    ROUTES
        .iter()
        .find(|(predicate, _)| predicate(part))
        .map(|&(_, action)| action)
}
