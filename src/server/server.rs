use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use chrono::Duration;
use std::sync::Arc;

pub struct Server {
    pub login_gate: Arc<dyn LoginGate>,
    pub activity_refresher: Arc<dyn ActivityRefresher>,
    pub session_lifecycle: Arc<dyn SessionLifecycle>,
}

// Upper bound for every duration setting: one century.
const MAX_SETTING_HOURS: i64 = 100 * 366 * 24;

fn hours_setting(name: &str, value: i64, min: i64) -> anyhow::Result<Duration> {
    if !(min..=MAX_SETTING_HOURS).contains(&value) {
        return Err(anyhow::anyhow!(
            "{} must be between {} and {}, got {}",
            name,
            min,
            MAX_SETTING_HOURS,
            value
        ));
    }
    Ok(Duration::hours(value))
}

fn seconds_setting(name: &str, value: i64, min: i64) -> anyhow::Result<Duration> {
    let max = MAX_SETTING_HOURS * 3600;
    if !(min..=max).contains(&value) {
        return Err(anyhow::anyhow!(
            "{} must be between {} and {}, got {}",
            name,
            min,
            max,
            value
        ));
    }
    Ok(Duration::seconds(value))
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let max_idle = hours_setting("admission.max_idle_hours", settings.admission.max_idle_hours, 0)?;
        let throttle = seconds_setting("activity.throttle_secs", settings.activity.throttle_secs, 0)?;
        let ttl = hours_setting("session.ttl_hours", settings.session.ttl_hours, 1)?;
        let remember_ttl = hours_setting(
            "session.remember_ttl_hours",
            settings.session.remember_ttl_hours,
            1,
        )?;

        let store: Arc<dyn SessionActivityStore> = match settings.store.backend.as_str() {
            "memory" => Arc::new(MemorySessionActivityStore::new()),
            "redis" => {
                let dsn = settings
                    .store
                    .redis_dsn
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("store.redis_dsn is required for redis"))?;
                let redis_client = redis::Client::open(dsn)?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RedisSessionActivityStore::new(
                    redis_manager,
                    settings.store.prefix.clone(),
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let admission: Arc<dyn SessionAdmission> = match settings.admission.backend.as_str() {
            "fake" => Arc::new(FakeSessionAdmission::new()),
            "real" => {
                if settings.admission.max_sessions == 0 {
                    return Err(anyhow::anyhow!("admission.max_sessions must be at least 1"));
                }
                Arc::new(RealSessionAdmission::new(
                    store.clone(),
                    AdmissionConfig {
                        max_sessions: settings.admission.max_sessions,
                        max_idle,
                    },
                ))
            }
            other => return Err(anyhow::anyhow!("Unknown admission backend: {}", other)),
        };

        let session_lifecycle: Arc<dyn SessionLifecycle> = Arc::new(RealSessionLifecycle::new(
            store.clone(),
            SessionLifecycleConfig {
                ttl,
                remember_ttl,
            },
        ));

        let activity_refresher: Arc<dyn ActivityRefresher> = Arc::new(RealActivityRefresher::new(
            store,
            throttle,
        ));

        let login_gate: Arc<dyn LoginGate> = Arc::new(RealLoginGate::new(
            admission,
            session_lifecycle.clone(),
        ));

        info!(
            store = %settings.store.backend,
            admission = %settings.admission.backend,
            max_sessions = settings.admission.max_sessions,
            max_idle_hours = settings.admission.max_idle_hours,
            "server started"
        );

        Ok(Self {
            login_gate,
            activity_refresher,
            session_lifecycle,
        })
    }
}
