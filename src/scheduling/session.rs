use crate::db::MaintenanceStore;
use crate::error::SchedulingError;
use crate::models::{Appointment, MaintenanceAlert, ScheduleRecommendation, Vehicle};
use crate::scheduling::confirmer::confirm_schedule;
use crate::scheduling::requester::{request_recommendation, RecommendationSource};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct ScheduleSession {
    pending: Option<ScheduleRecommendation>,
}

impl ScheduleSession {
    pub fn pending(&self) -> Option<&ScheduleRecommendation> {
        self.pending.as_ref()
    }

    pub async fn request(
        &mut self,
        source: &dyn RecommendationSource,
        alert: Option<&MaintenanceAlert>,
        vehicle: Option<&Vehicle>,
        estimated_cost: f64,
    ) -> Result<Option<&ScheduleRecommendation>, SchedulingError> {
        if let Some(recommendation) =
            request_recommendation(source, alert, vehicle, estimated_cost).await?
        {
            self.pending = Some(recommendation);
            return Ok(self.pending.as_ref());
        }
        Ok(None)
    }

    // The slot is cleared only on success.
    pub async fn confirm(
        &mut self,
        store: &dyn MaintenanceStore,
        alert: &MaintenanceAlert,
    ) -> Result<Appointment, SchedulingError> {
        let recommendation = self
            .pending
            .as_ref()
            .filter(|r| r.alert_id == alert.id)
            .ok_or(SchedulingError::NoPendingRecommendation(alert.id))?;

        let appointment = confirm_schedule(store, alert, recommendation).await?;
        self.pending = None;
        Ok(appointment)
    }

    pub fn close(&mut self) {
        self.pending = None;
    }
}

#[derive(Default)]
pub struct PendingSchedules {
    sessions: Mutex<HashMap<Uuid, Arc<Mutex<ScheduleSession>>>>,
}

impl PendingSchedules {
    pub async fn session(&self, alert_id: Uuid) -> Arc<Mutex<ScheduleSession>> {
        self.sessions
            .lock()
            .await
            .entry(alert_id)
            .or_default()
            .clone()
    }

    // Hands back a session taken with `session`. The entry goes away only when its slot is
    // empty and no other handler still holds it; clones are only made under the map lock.
    pub async fn release(&self, alert_id: Uuid, session: Arc<Mutex<ScheduleSession>>) {
        drop(session);
        let mut sessions = self.sessions.lock().await;
        let idle = match sessions.get(&alert_id) {
            Some(entry) if Arc::strong_count(entry) == 1 => match entry.try_lock() {
                Ok(guard) => guard.pending().is_none(),
                Err(_) => false,
            },
            _ => false,
        };
        if idle {
            sessions.remove(&alert_id);
        }
    }

    pub async fn close(&self, alert_id: Uuid) -> bool {
        let session = match self.sessions.lock().await.get(&alert_id).cloned() {
            Some(session) => session,
            None => return false,
        };
        let held = {
            let mut guard = session.lock().await;
            let held = guard.pending().is_some();
            guard.close();
            held
        };
        self.release(alert_id, session).await;
        held
    }

    pub async fn pending(&self, alert_id: Uuid) -> Option<ScheduleRecommendation> {
        let session = self.sessions.lock().await.get(&alert_id).cloned()?;
        let guard = session.lock().await;
        guard.pending().cloned()
    }
}
