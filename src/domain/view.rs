// src/domain/view.rs

/// The four display states of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Settings,
    List,
    Editor,
    Detail,
}

/// Header actions whose visibility is decided per view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Back,
    Add,
    Settings,
    Save,
}

/// Navigation events that move the app between views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A valid configuration was saved.
    ConfigSaved,
    /// The add action was chosen from the list.
    Add,
    /// A note was selected from the list.
    Select,
    /// The settings action was chosen from the list.
    OpenSettings,
    /// The edit action was chosen from the detail view.
    Edit,
    /// The back action.
    Back,
}

impl View {
    /// Apply a navigation event. Returns `None` when the event is not valid
    /// in the current view; the caller stays where it is.
    pub fn transition(self, event: Event) -> Option<View> {
        match (self, event) {
            (View::Settings, Event::ConfigSaved) => Some(View::List),
            (View::List, Event::Add) => Some(View::Editor),
            (View::List, Event::Select) => Some(View::Detail),
            (View::List, Event::OpenSettings) => Some(View::Settings),
            (View::Detail, Event::Edit) => Some(View::Editor),
            (View::Settings, Event::Back)
            | (View::Editor, Event::Back)
            | (View::Detail, Event::Back) => Some(View::List),
            _ => None,
        }
    }

    /// Header actions visible in this view.
    ///
    /// The set is recomputed on every entry; settings only offers a way back
    /// once a valid configuration exists, so a fresh install cannot leave the
    /// settings view without completing it.
    pub fn actions(self, config_valid: bool) -> &'static [HeaderAction] {
        match self {
            View::List => &[HeaderAction::Settings, HeaderAction::Add],
            View::Settings => {
                if config_valid {
                    &[HeaderAction::Back]
                } else {
                    &[]
                }
            }
            View::Editor => &[HeaderAction::Back, HeaderAction::Save],
            View::Detail => &[HeaderAction::Back],
        }
    }

    /// Title shown in the header for this view.
    pub fn title(self) -> &'static str {
        match self {
            View::List => "GitNotes",
            View::Settings => "Settings",
            View::Editor => "New note",
            View::Detail => "Detail",
        }
    }
}
