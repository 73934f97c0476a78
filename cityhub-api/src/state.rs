use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;

use cityhub_assist::Assistant;
use cityhub_booking::{PaymentGateway, Portal};
use cityhub_domain::auth::Authenticator;
use cityhub_domain::clock::SimClock;
use cityhub_domain::movie::Movie;
use cityhub_domain::notification::Notification;
use cityhub_domain::user::UserProfile;

use crate::error::AppError;

#[derive(Clone)]
pub struct AuthSettings {
    pub secret: String,
    pub expiration: u64,
}

/// Shared application state. All portal mutation funnels through the single
/// `portal` mutex, so handler and timer writes are serialized and at most
/// one mutation is ever in flight.
#[derive(Clone)]
pub struct AppState {
    pub portal: Arc<Mutex<Portal>>,
    pub clock: Arc<SimClock>,
    pub profiles: Arc<Mutex<HashMap<String, UserProfile>>>,
    pub notifier: broadcast::Sender<Notification>,
    pub assistant: Arc<Assistant>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub authenticator: Arc<dyn Authenticator>,
    pub movies: Arc<Vec<Movie>>,
    pub auth: AuthSettings,
}

impl AppState {
    pub fn lock_portal(&self) -> Result<MutexGuard<'_, Portal>, AppError> {
        self.portal
            .lock()
            .map_err(|_| AppError::InternalServerError("portal state poisoned".to_string()))
    }

    pub fn lock_profiles(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<String, UserProfile>>, AppError> {
        self.profiles
            .lock()
            .map_err(|_| AppError::InternalServerError("profile state poisoned".to_string()))
    }

    /// Fan a notification out to live SSE listeners. Nobody listening is
    /// fine.
    pub fn broadcast(&self, notification: Notification) {
        let _ = self.notifier.send(notification);
    }
}
