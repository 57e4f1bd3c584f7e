pub mod builder;
pub mod router;

/// Every item in the tray menu that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Toggle,
    OpenWeb,
    OpenRepo,
    OpenBaseIcons,
    OpenStatusIcons,
    Quit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 6] = [
        MenuAction::Toggle,
        MenuAction::OpenWeb,
        MenuAction::OpenRepo,
        MenuAction::OpenBaseIcons,
        MenuAction::OpenStatusIcons,
        MenuAction::Quit,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MenuAction::Toggle => "__toggle__",
            MenuAction::OpenWeb => "__open_web__",
            MenuAction::OpenRepo => "__open_repo__",
            MenuAction::OpenBaseIcons => "__open_base_icons__",
            MenuAction::OpenStatusIcons => "__open_status_icons__",
            MenuAction::Quit => "__quit__",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}
