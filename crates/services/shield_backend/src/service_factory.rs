// --- File: crates/services/shield_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! Initializes the external collaborators (calendar, mailer) once at startup
//! based on compile features and runtime flags, and hands them out as trait
//! objects. A collaborator that is disabled or fails to initialize is simply
//! absent; routes degrade rather than crash.

use shield_config::AppConfig;
use std::sync::Arc;
#[allow(unused_imports)] // some imports are only used by certain features
use {
    shield_common::is_feature_enabled,
    shield_common::services::{
        BoxFuture, BoxedError, CalendarEvent, CalendarService, CreatedEvent, EmailMessage,
        NotificationResult, NotificationService, ServiceFactory,
    },
    tracing::{error, info},
};

#[cfg(feature = "gcal")]
use shield_gcal::{create_calendar_hub, GoogleCalendarService};

#[cfg(feature = "mailer")]
use shield_mailer::GmailNotificationService;

/// Service factory for the backend binary.
pub struct ShieldServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    #[cfg(feature = "gcal")]
    calendar_service: Option<Arc<dyn CalendarService<Error = BoxedError>>>,
    #[cfg(feature = "mailer")]
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl ShieldServiceFactory {
    /// Create a new service factory.
    pub async fn new(config: Arc<AppConfig>) -> Self {
        #[allow(unused_mut)]
        let mut factory = Self {
            config: config.clone(),
            #[cfg(feature = "gcal")]
            calendar_service: None,
            #[cfg(feature = "mailer")]
            notification_service: None,
        };

        #[cfg(feature = "gcal")]
        {
            if is_feature_enabled(&config, config.use_gcal, config.gcal.as_ref()) {
                info!("Initializing Google Calendar service...");
                let gcal_config = config.gcal.as_ref().unwrap();
                match create_calendar_hub(gcal_config).await {
                    Ok(hub) => {
                        let service = GoogleCalendarService::new(
                            Arc::new(hub),
                            gcal_config.time_zone.clone(),
                        );

                        // Adapter that erases the concrete error type.
                        struct BoxedCalendarService {
                            inner: GoogleCalendarService,
                        }

                        impl CalendarService for BoxedCalendarService {
                            type Error = BoxedError;

                            fn create_event(
                                &self,
                                calendar_id: &str,
                                event: CalendarEvent,
                            ) -> BoxFuture<'_, CreatedEvent, Self::Error>
                            {
                                let calendar_id = calendar_id.to_string();
                                let inner = &self.inner;

                                Box::pin(async move {
                                    inner
                                        .create_event(&calendar_id, event)
                                        .await
                                        .map_err(|e| BoxedError(Box::new(e)))
                                })
                            }
                        }

                        factory.calendar_service =
                            Some(Arc::new(BoxedCalendarService { inner: service }));
                        info!("Google Calendar service initialized.");
                    }
                    Err(e) => {
                        error!(
                            "Failed to initialize Google Calendar service: {}. Bookings will fall back to placeholder links.",
                            e
                        );
                    }
                }
            } else {
                info!("GCal feature compiled, but disabled via runtime config or missing gcal config section.");
            }
        }

        #[cfg(feature = "mailer")]
        {
            if is_feature_enabled(&config, config.use_mailer, config.mailer.as_ref()) {
                info!("Initializing mail notification service...");
                match GmailNotificationService::new(config.mailer.as_ref().unwrap()).await {
                    Ok(service) => {
                        // Adapter that erases the concrete error type.
                        struct BoxedNotificationService {
                            inner: GmailNotificationService,
                        }

                        impl NotificationService for BoxedNotificationService {
                            type Error = BoxedError;

                            fn send_email(
                                &self,
                                message: EmailMessage,
                            ) -> BoxFuture<'_, NotificationResult, Self::Error>
                            {
                                let inner = &self.inner;
                                Box::pin(async move {
                                    inner
                                        .send_email(message)
                                        .await
                                        .map_err(|e| BoxedError(Box::new(e)))
                                })
                            }
                        }

                        factory.notification_service =
                            Some(Arc::new(BoxedNotificationService { inner: service }));
                        info!("Mail notification service initialized.");
                    }
                    Err(e) => {
                        error!(
                            "Failed to initialize mail notification service: {}. Notifications disabled.",
                            e
                        );
                    }
                }
            } else {
                info!("Mailer feature compiled, but disabled via runtime config or missing mailer config section.");
            }
        }

        factory
    }
}

impl ServiceFactory for ShieldServiceFactory {
    fn calendar_service(&self) -> Option<Arc<dyn CalendarService<Error = BoxedError>>> {
        #[cfg(feature = "gcal")]
        {
            if let Some(service) = self.calendar_service.clone() {
                return Some(service);
            }
        }

        None
    }

    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        #[cfg(feature = "mailer")]
        {
            if let Some(service) = self.notification_service.clone() {
                return Some(service);
            }
        }

        None
    }
}
