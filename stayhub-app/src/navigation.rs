use stayhub_core::{Identity, Route};

/// Outcome of resolving a path against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    /// Private route without a signed-in user. `from` is where to return after login.
    Redirect { to: Route, from: String },
    NotFound,
}

pub fn resolve(path: &str, identity: Option<&Identity>) -> Resolution {
    let Some(route) = Route::parse(path) else {
        return Resolution::NotFound;
    };

    if route.requires_auth() && identity.is_none() {
        return Resolution::Redirect {
            to: Route::Login,
            from: route.path(),
        };
    }

    match route {
        // The dashboard index shows the user's bookings.
        Route::Dashboard => Resolution::Render(Route::MyBookings),
        other => Resolution::Render(other),
    }
}
