//! Wiring - builds adapters and handlers from configuration.

use std::sync::Arc;
use std::time::Duration;

use redis::aio::MultiplexedConnection;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::adapters::{
    DoorAppState, FileDoorStateStore, InMemoryDoorStateStore, LogNotifier, MockDeviceCloud,
    ParticleClient, ParticleClientConfig, PostgresDoorStateStore, RedisDoorStateStore,
    RedisNotifier, TimedDoorStateStore, TimedNotifier, WebhookNotifier,
};
use crate::application::{DoorMonitor, DoorStateRecorder, VoiceCommandHandler};
use crate::config::{
    AppConfig, DeviceCloudBackend, NotificationBackend, NotificationConfig, ParticleConfig,
    ServerConfig, StorageBackend, StorageConfig,
};
use crate::domain::foundation::DeviceId;
use crate::ports::{DeviceCloud, DeviceCloudError, DoorStateStore, Notifier, NotifierError, StoreError};

/// Failures while assembling the service.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("device cloud setup failed: {0}")]
    DeviceCloud(#[from] DeviceCloudError),

    #[error("state store setup failed: {0}")]
    Store(#[from] StoreError),

    #[error("notifier setup failed: {0}")]
    Notifier(#[from] NotifierError),

    #[error("redis connection failed: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis connection timed out")]
    RedisTimeout,

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("missing setting: {0}")]
    MissingSetting(&'static str),
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Production logs are JSON.
pub fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if server.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing already initialised: {}", e);
    }
}

/// Handlers shared by the HTTP surface and the scheduler.
#[derive(Clone)]
pub struct Services {
    pub voice: Arc<VoiceCommandHandler>,
    pub monitor: Arc<DoorMonitor>,
}

impl Services {
    pub fn app_state(&self) -> DoorAppState {
        DoorAppState {
            voice: self.voice.clone(),
            monitor: self.monitor.clone(),
        }
    }
}

/// Builds every adapter named by the configuration.
///
/// Missing device id, table or topic do not fail here; they surface as
/// `NotConfigured` errors on first use.
pub async fn build_services(config: &AppConfig) -> Result<Services, BootstrapError> {
    let device_cloud = build_device_cloud(&config.particle)?;
    let store = build_store(&config.storage).await?;
    let notifier = build_notifier(&config.notification).await?;

    let device_id = config
        .particle
        .device_id
        .as_deref()
        .and_then(|d| DeviceId::new(d).ok());
    let recorder = DoorStateRecorder::new(store, device_id, config.monitor.threshold_minutes);

    Ok(Services {
        voice: Arc::new(VoiceCommandHandler::new(
            device_cloud.clone(),
            recorder.clone(),
        )),
        monitor: Arc::new(DoorMonitor::new(device_cloud, notifier, recorder)),
    })
}

pub fn build_device_cloud(config: &ParticleConfig) -> Result<Arc<dyn DeviceCloud>, BootstrapError> {
    match config.backend {
        DeviceCloudBackend::Particle => {
            let client = ParticleClient::new(ParticleClientConfig::from_settings(config))?;
            Ok(Arc::new(client))
        }
        DeviceCloudBackend::Mock => {
            tracing::warn!("Using mock device cloud");
            Ok(Arc::new(MockDeviceCloud::new()))
        }
    }
}

/// Builds the configured store behind a per-call deadline.
pub async fn build_store(config: &StorageConfig) -> Result<Arc<dyn DoorStateStore>, BootstrapError> {
    let store = build_store_backend(config).await?;
    Ok(Arc::new(TimedDoorStateStore::new(store, config.timeout())))
}

async fn build_store_backend(
    config: &StorageConfig,
) -> Result<Arc<dyn DoorStateStore>, BootstrapError> {
    let table = config.table_name().unwrap_or_default();

    match config.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryDoorStateStore::new(table))),
        StorageBackend::File => Ok(Arc::new(FileDoorStateStore::new(&config.data_dir, table))),
        StorageBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or(BootstrapError::MissingSetting("storage.redis_url"))?;
            let conn = redis_connection(url, config.timeout()).await?;
            Ok(Arc::new(RedisDoorStateStore::new(conn, table)))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or(BootstrapError::MissingSetting("storage.database_url"))?;
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(config.timeout())
                .connect(url)
                .await?;
            let store = PostgresDoorStateStore::new(pool, table);
            if config.table_name().is_some() {
                store.ensure_schema().await?;
            }
            Ok(Arc::new(store))
        }
    }
}

/// Builds the configured notifier behind a per-publish deadline.
pub async fn build_notifier(
    config: &NotificationConfig,
) -> Result<Arc<dyn Notifier>, BootstrapError> {
    let topic = config.topic_name().unwrap_or_default();

    let notifier: Arc<dyn Notifier> = match config.backend {
        NotificationBackend::Log => Arc::new(LogNotifier::new(topic)),
        NotificationBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .ok_or(BootstrapError::MissingSetting("notification.redis_url"))?;
            let conn = redis_connection(url, config.timeout()).await?;
            Arc::new(RedisNotifier::new(conn, topic))
        }
        NotificationBackend::Webhook => {
            let url = config
                .webhook_url
                .as_deref()
                .ok_or(BootstrapError::MissingSetting("notification.webhook_url"))?;
            let mut notifier = WebhookNotifier::new(url, topic, config.timeout())?;
            if let Some(secret) = config.signing_secret.as_deref().filter(|s| !s.is_empty()) {
                notifier = notifier.with_signing_secret(secret);
            }
            Arc::new(notifier)
        }
    };
    Ok(Arc::new(TimedNotifier::new(notifier, config.timeout())))
}

async fn redis_connection(
    url: &str,
    timeout: Duration,
) -> Result<MultiplexedConnection, BootstrapError> {
    let client = redis::Client::open(url)?;
    let conn = tokio::time::timeout(timeout, client.get_multiplexed_tokio_connection())
        .await
        .map_err(|_| BootstrapError::RedisTimeout)??;
    Ok(conn)
}
