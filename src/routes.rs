//! Application routes.

/// A navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Home,
    Doctors,
    Appointments,
    /// Booking wizard, optionally with a doctor pre-selected.
    Book { doctor: Option<u32> },
    Login,
    SignUp,
}

impl Route {
    /// Path form, e.g. `/appointments/book?doctor=2`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Doctors => "/doctors".to_string(),
            Route::Appointments => "/appointments".to_string(),
            Route::Book { doctor: None } => "/appointments/book".to_string(),
            Route::Book { doctor: Some(id) } => format!("/appointments/book?doctor={}", id),
            Route::Login => "/login".to_string(),
            Route::SignUp => "/signup".to_string(),
        }
    }

    /// Parse a path. An unparsable `doctor` parameter is dropped.
    pub fn parse(path: &str) -> Option<Route> {
        let (base, query) = match path.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (path, None),
        };
        let base = match base.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match base {
            "/" => Some(Route::Home),
            "/doctors" => Some(Route::Doctors),
            "/appointments" => Some(Route::Appointments),
            "/appointments/book" => Some(Route::Book {
                doctor: query.and_then(|q| query_param(q, "doctor")).and_then(|v| v.parse().ok()),
            }),
            "/login" => Some(Route::Login),
            "/signup" => Some(Route::SignUp),
            _ => None,
        }
    }

    /// Routes that need a logged in user.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Doctors | Route::Appointments | Route::Book { .. })
    }

    /// Get the display name for the route.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Doctors => "Doctors",
            Route::Appointments => "Appointments",
            Route::Book { .. } => "Book an Appointment",
            Route::Login => "Login",
            Route::SignUp => "Sign Up",
        }
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
