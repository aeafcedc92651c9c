use content::{LocationId, LocationSet};
use tracing::debug;

/// Which location's detail overlay is showing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Closed,
    Open(LocationId),
}

impl SelectionState {
    pub fn overlay_open(&self) -> bool {
        matches!(self, SelectionState::Open(_))
    }

    pub fn selected(&self) -> Option<LocationId> {
        match *self {
            SelectionState::Open(id) => Some(id),
            SelectionState::Closed => None,
        }
    }
}

/// Outcome of a selection request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Opened(LocationId),
    Switched { from: LocationId, to: LocationId },
    Closed(LocationId),
    Unchanged,
}

/// Selection and hover state owned by one globe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    state: SelectionState,
    hovered: Option<LocationId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn hovered(&self) -> Option<LocationId> {
        self.hovered
    }

    /// Opens the overlay for `id` if it names a visited location.
    ///
    /// Unknown or unvisited locations leave the state untouched.
    pub fn select(&mut self, locations: &LocationSet, id: LocationId) -> Transition {
        let Some(location) = locations.get(id) else {
            return Transition::Unchanged;
        };
        if !location.visited() {
            debug!(location = location.name(), "ignored selection of unvisited location");
            return Transition::Unchanged;
        }

        let transition = match self.state {
            SelectionState::Closed => Transition::Opened(id),
            SelectionState::Open(current) if current == id => Transition::Unchanged,
            SelectionState::Open(current) => Transition::Switched { from: current, to: id },
        };
        if transition != Transition::Unchanged {
            debug!(location = location.name(), ?transition, "selection changed");
        }
        self.state = SelectionState::Open(id);
        transition
    }

    pub fn dismiss(&mut self) -> Transition {
        match std::mem::take(&mut self.state) {
            SelectionState::Open(id) => {
                debug!(location = id.index(), "overlay dismissed");
                Transition::Closed(id)
            }
            SelectionState::Closed => Transition::Unchanged,
        }
    }

    /// Records the hovered marker. Returns `true` if it changed.
    pub fn set_hovered(&mut self, id: Option<LocationId>) -> bool {
        if self.hovered == id {
            return false;
        }
        debug!(from = ?self.hovered, to = ?id, "hover changed");
        self.hovered = id;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Selection, SelectionState, Transition};
    use content::{Content, LocationId};

    fn locations() -> content::LocationSet {
        Content::builtin().unwrap().locations
    }

    #[test]
    fn starts_closed() {
        let selection = Selection::new();
        assert_eq!(selection.state(), SelectionState::Closed);
        assert!(!selection.state().overlay_open());
        assert_eq!(selection.hovered(), None);
    }

    #[test]
    fn visited_opens_switches_and_dismisses() {
        let set = locations();
        let (india, _) = set.find("India").unwrap();
        let (germany, _) = set.find("Germany").unwrap();
        let mut selection = Selection::new();

        assert_eq!(selection.select(&set, india), Transition::Opened(india));
        assert_eq!(selection.state(), SelectionState::Open(india));
        assert!(selection.state().overlay_open());

        assert_eq!(selection.select(&set, india), Transition::Unchanged);
        assert_eq!(
            selection.select(&set, germany),
            Transition::Switched {
                from: india,
                to: germany
            }
        );

        assert_eq!(selection.dismiss(), Transition::Closed(germany));
        assert_eq!(selection.state(), SelectionState::Closed);
        assert_eq!(selection.dismiss(), Transition::Unchanged);
    }

    #[test]
    fn unvisited_and_unknown_are_ignored() {
        let set = locations();
        let (china, _) = set.find("China").unwrap();
        let (india, _) = set.find("India").unwrap();
        let mut selection = Selection::new();

        assert_eq!(selection.select(&set, china), Transition::Unchanged);
        assert_eq!(selection.state(), SelectionState::Closed);

        selection.select(&set, india);
        assert_eq!(selection.select(&set, china), Transition::Unchanged);
        assert_eq!(selection.select(&set, LocationId(999)), Transition::Unchanged);
        assert_eq!(selection.state(), SelectionState::Open(india));
    }

    #[test]
    fn hover_reports_changes_only() {
        let mut selection = Selection::new();
        assert!(selection.set_hovered(Some(LocationId(4))));
        assert!(!selection.set_hovered(Some(LocationId(4))));
        assert!(selection.set_hovered(None));
    }
}
