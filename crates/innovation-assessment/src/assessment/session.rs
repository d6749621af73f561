use std::sync::Mutex;

use super::snapshot::WizardSnapshot;
use super::wizard::WizardController;

/// The single wizard a service instance drives, shared across handlers.
pub struct AssessmentSession {
    controller: Mutex<WizardController>,
}

impl AssessmentSession {
    pub fn new(controller: WizardController) -> Self {
        Self {
            controller: Mutex::new(controller),
        }
    }

    /// Run `action` with exclusive access to the controller.
    pub fn with_controller<T>(&self, action: impl FnOnce(&mut WizardController) -> T) -> T {
        let mut guard = self
            .controller
            .lock()
            .expect("assessment session mutex poisoned");
        action(&mut guard)
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        self.with_controller(|wizard| wizard.snapshot())
    }
}
