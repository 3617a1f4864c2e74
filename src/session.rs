//! Admin-session flag.
//!
//! A client-side marker, not a security boundary: any host with access to
//! the storage file can set the flag directly. The credential pair is
//! hardcoded; real authentication belongs to an external collaborator.

use log::info;

use crate::content_store::{ContentStore, SESSION_KEY};
use crate::error::StoreResult;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

impl ContentStore {
    /// Compares against the hardcoded credentials and sets the session flag
    /// on a match. Returns whether the session was opened.
    pub fn login(&self, email: &str, password: &str) -> StoreResult<bool> {
        if email.trim() == ADMIN_EMAIL && password.trim() == ADMIN_PASSWORD {
            self.backend.set(SESSION_KEY, "true")?;
            info!("admin session opened");
            Ok(true)
        } else {
            info!("admin login rejected");
            Ok(false)
        }
    }

    /// Clears the session flag. Idempotent.
    pub fn logout(&self) -> StoreResult<()> {
        self.backend.remove(SESSION_KEY)?;
        info!("admin session closed");
        Ok(())
    }

    /// Whether the session flag is currently set.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.backend.get(SESSION_KEY), Ok(Some(flag)) if flag == "true")
    }
}
