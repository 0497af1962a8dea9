use crate::route::Route;

/// User-facing side effects shared by every flow: toasts and navigation.
pub trait Notifier: Send + Sync {
    fn toast_success(&self, message: &str);

    fn navigate(&self, route: &Route);
}
