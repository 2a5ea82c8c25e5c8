use tracing::info;

use crate::error::NotifyError;
use crate::models::Employee;

/// Delivers the "submit your availability" request to one employee.
pub trait Notifier {
    fn notify(&self, employee: &Employee) -> Result<(), NotifyError>;
}

/// Records requests in the log instead of sending mail.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    /// Link to the availability form, included in the log line.
    pub form_url: Option<String>,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form_url(mut self, url: impl Into<String>) -> Self {
        self.form_url = Some(url.into());
        self
    }
}

impl Notifier for LogNotifier {
    fn notify(&self, employee: &Employee) -> Result<(), NotifyError> {
        info!(
            name = %employee.name,
            email = %employee.email,
            form = self.form_url.as_deref().unwrap_or("-"),
            "availability request sent"
        );
        Ok(())
    }
}
