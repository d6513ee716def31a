/// Views the front end can navigate between
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    EraDetail { id: String },
    Favorites,
    History,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::EraDetail { .. } => "era-detail",
            Self::Favorites => "favorites",
            Self::History => "history",
        }
    }
}

/// Navigation component, implemented by whatever owns the current view
pub trait Router {
    fn navigate(&mut self, route: Route);
}
