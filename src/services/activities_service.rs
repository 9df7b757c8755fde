use tracing::{info, warn};

use crate::database::ActivityRegistry;
use crate::error::SignupError;
use crate::models::ActivityCatalog;

pub fn list_activities(registry: &ActivityRegistry) -> ActivityCatalog {
    registry.list_activities()
}

pub fn sign_up(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<String, SignupError> {
    match registry.sign_up(activity_name, email) {
        Ok(participants) => {
            info!(activity = %activity_name, email = %email, participants, "Signed up");
            Ok(format!("Signed up {} for {}", email, activity_name))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, "Signup rejected: {}", e);
            Err(e)
        }
    }
}

pub fn unregister(
    registry: &ActivityRegistry,
    activity_name: &str,
    email: &str,
) -> Result<String, SignupError> {
    match registry.unregister(activity_name, email) {
        Ok(participants) => {
            info!(activity = %activity_name, email = %email, participants, "Unregistered");
            Ok(format!("Unregistered {} from {}", email, activity_name))
        }
        Err(e) => {
            warn!(activity = %activity_name, email = %email, "Unregister rejected: {}", e);
            Err(e)
        }
    }
}
