//! Routes and navigation
//!
//! Three addressable views: the list, a contact's detail page and its edit
//! form. The [`Router`] publishes the active route on a watch channel so
//! views can follow route changes and drop their subscription on teardown.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

/// Addressable contact views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/contacts`
    List,
    /// `/contacts/{id}`
    Detail(u64),
    /// `/contacts/{id}/edit`
    Edit(u64),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "/contacts"),
            Self::Detail(id) => write!(f, "/contacts/{}", id),
            Self::Edit(id) => write!(f, "/contacts/{}/edit", id),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect();

        let parse_id = |seg: &str| seg.parse::<u64>().map_err(|_| UnknownRoute(s.to_string()));

        match segments.as_slice() {
            ["contacts"] => Ok(Self::List),
            ["contacts", id] => Ok(Self::Detail(parse_id(*id)?)),
            ["contacts", id, "edit"] => Ok(Self::Edit(parse_id(*id)?)),
            _ => Err(UnknownRoute(s.to_string())),
        }
    }
}

/// Something that can move the application to another view
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Route holder backed by a watch channel
pub struct Router {
    tx: watch::Sender<Route>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Currently active route
    pub fn current(&self) -> Route {
        *self.tx.borrow()
    }

    /// Subscribe to route changes
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.tx.subscribe()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::List)
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route);
        self.tx.send_replace(route);
    }
}
