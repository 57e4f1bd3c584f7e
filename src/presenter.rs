use crate::icons::IconKind;
use crate::service::{ControlError, ServiceAction, ServiceControl, ServiceStatus};

/// The UI handles the watcher drives. Implemented by the tray indicator and
/// by recording fakes in tests.
pub trait IndicatorView {
    fn set_icon(&mut self, icon: IconKind, tooltip: &str);
    fn set_status_text(&mut self, text: &str);
    fn set_action(&mut self, label: &str, enabled: bool);
    fn set_secondary_enabled(&mut self, enabled: bool);
    fn deactivate(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub icon: IconKind,
    pub tooltip: String,
    pub status_text: String,
    pub action_label: String,
    pub action_enabled: bool,
    pub secondary_enabled: bool,
}

impl Presentation {
    pub fn for_status(status: ServiceStatus, name: &str) -> Self {
        match status {
            ServiceStatus::Active => Self {
                icon: IconKind::Running,
                tooltip: format!("{} is running", name),
                status_text: format!("{}: RUNNING", name),
                action_label: format!("Stop {}", name),
                action_enabled: true,
                secondary_enabled: true,
            },
            ServiceStatus::Activating | ServiceStatus::Reloading | ServiceStatus::Unknown => Self {
                icon: IconKind::Loading,
                tooltip: format!("{} starting / checking", name),
                status_text: format!("{}: STARTING ({})", name, status),
                action_label: format!("Stop {}", name),
                action_enabled: false,
                secondary_enabled: false,
            },
            ServiceStatus::Inactive | ServiceStatus::Failed | ServiceStatus::Deactivating => Self {
                icon: IconKind::Stopped,
                tooltip: format!("{} is {}", name, status),
                status_text: format!("{}: {}", name, status.as_str().to_uppercase()),
                action_label: format!("Start {}", name),
                action_enabled: true,
                secondary_enabled: false,
            },
        }
    }

    pub fn apply_to<V: IndicatorView>(&self, view: &mut V) {
        view.set_icon(self.icon, &self.tooltip);
        view.set_status_text(&self.status_text);
        view.set_action(&self.action_label, self.action_enabled);
        view.set_secondary_enabled(self.secondary_enabled);
    }
}

fn pending_label(action: ServiceAction, name: &str) -> String {
    match action {
        ServiceAction::Start => format!("Starting {}…", name),
        ServiceAction::Stop => format!("Stopping {}…", name),
    }
}

/// Holds the last observed status and keeps the indicator in sync with it.
pub struct Watcher<S, V> {
    service: S,
    view: V,
    name: String,
    status: ServiceStatus,
    pending: Option<ServiceAction>,
    quit: bool,
}

impl<S: ServiceControl, V: IndicatorView> Watcher<S, V> {
    pub fn new(service: S, view: V, name: impl Into<String>) -> Self {
        Self {
            service,
            view,
            name: name.into(),
            status: ServiceStatus::Unknown,
            pending: None,
            quit: false,
        }
    }

    pub fn status(&self) -> ServiceStatus {
        self.status
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn refresh(&mut self) -> ServiceStatus {
        let status = self.service.probe();
        if status != self.status {
            log::debug!("{} status: {} -> {}", self.name, self.status, status);
        }
        self.status = status;
        Presentation::for_status(status, &self.name).apply_to(&mut self.view);
        status
    }

    /// Timer callback. Always asks to stay armed.
    pub fn on_tick(&mut self) -> bool {
        self.refresh();
        true
    }

    pub fn on_toggle_action(&mut self) -> Option<ServiceAction> {
        let action = self.begin_toggle()?;
        self.finish_toggle(action);
        Some(action)
    }

    /// Shows the pending state and picks the command to run. Returns `None`
    /// while a previous toggle is still in flight.
    pub fn begin_toggle(&mut self) -> Option<ServiceAction> {
        if self.pending.is_some() {
            log::debug!("Toggle ignored, {:?} already in flight", self.pending);
            return None;
        }

        let action = match self.status {
            ServiceStatus::Active => ServiceAction::Stop,
            _ => ServiceAction::Start,
        };
        let label = pending_label(action, &self.name);
        self.view.set_icon(IconKind::Loading, &label);
        self.view.set_status_text(&label);
        self.pending = Some(action);
        Some(action)
    }

    /// Runs the command, re-probes, and surfaces a failure in the status line
    /// until the next tick.
    pub fn finish_toggle(&mut self, action: ServiceAction) -> Result<(), ControlError> {
        let outcome = self.service.control(action);
        self.pending = None;
        self.refresh();

        if let Err(e) = &outcome {
            log::warn!("Failed to {} {}: {}", action.as_str(), self.name, e);
            self.view.set_status_text(&format!("Error: {}", e));
        }
        outcome
    }

    /// Returns `true` only on the first call; the caller stops the loop then.
    pub fn on_quit(&mut self) -> bool {
        if self.quit {
            return false;
        }
        self.quit = true;
        self.view.deactivate();
        true
    }
}
