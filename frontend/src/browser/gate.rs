use std::cell::RefCell;
use std::rc::Rc;

use common::requests::AdminCredentials;
use common::workflow::AdminGate;

/// Admits exactly the credentials the backend last approved.
///
/// The component asks `/api/admin/login` first and, on success, stores the
/// pair in the shared cell before dispatching `Action::AdminLogin`.
#[derive(Clone, Default)]
pub struct ServerApprovedGate {
    approved: Rc<RefCell<Option<AdminCredentials>>>,
}

impl ServerApprovedGate {
    pub fn approve(&self, credentials: AdminCredentials) {
        *self.approved.borrow_mut() = Some(credentials);
    }

    pub fn revoke(&self) {
        self.approved.borrow_mut().take();
    }

    pub fn approved(&self) -> Option<AdminCredentials> {
        self.approved.borrow().clone()
    }
}

impl AdminGate for ServerApprovedGate {
    fn check(&self, credentials: &AdminCredentials) -> bool {
        self.approved.borrow().as_ref() == Some(credentials)
    }
}
