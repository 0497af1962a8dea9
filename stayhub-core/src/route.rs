use std::fmt;

/// Navigation targets of the booking front end.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    RoomDetails(String),
    Login,
    SignUp,
    Dashboard,
    AddRoom,
    MyBookings,
    MyListings,
    ManageBookings,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::RoomDetails(id) => format!("/room/{}", id),
            Route::Login => "/login".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::AddRoom => "/dashboard/add-room".to_string(),
            Route::MyBookings => "/dashboard/my-bookings".to_string(),
            Route::MyListings => "/dashboard/my-listings".to_string(),
            Route::ManageBookings => "/dashboard/manage-bookings".to_string(),
        }
    }

    /// Match a path against the route table. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let route = match trimmed {
            "" => Route::Home,
            "/login" => Route::Login,
            "/signup" => Route::SignUp,
            "/dashboard" => Route::Dashboard,
            "/dashboard/add-room" => Route::AddRoom,
            "/dashboard/my-bookings" => Route::MyBookings,
            "/dashboard/my-listings" => Route::MyListings,
            "/dashboard/manage-bookings" => Route::ManageBookings,
            other => {
                let id = other.strip_prefix("/room/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Route::RoomDetails(id.to_string())
            }
        };
        Some(route)
    }

    /// Private routes need a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Home | Route::Login | Route::SignUp)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
