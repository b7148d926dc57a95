///! State carried from one command to the next

use crate::config::GateConfig;
use crate::interrupt::InterruptState;
use crate::options::{OptionKey, Options};
use anyhow::Context;
use gate_core::records::{CustomObject, SatelliteRecord};
use gate_core::store::KeyedStore;
use gate_core::toolkit::{KernelPool, Toolkit};
use gate_core::topo::{ObserverSite, observer_radius};
use gate_core::tracking::{DEFAULT_INTERVAL, LoopMode, TrackingLoop};
use std::time::Duration;

pub struct Session {
    pub pool: KernelPool,
    pub options: Options,
    pub satellites: KeyedStore<SatelliteRecord>,
    pub customs: KeyedStore<CustomObject>,
    pub interrupt: InterruptState,
    pub tracking_interval: Duration,
    pub(crate) script_depth: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            pool: KernelPool::new(),
            options: Options::new(),
            satellites: KeyedStore::new(),
            customs: KeyedStore::new(),
            interrupt: InterruptState::new(),
            tracking_interval: DEFAULT_INTERVAL,
            script_depth: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session with the configured observer, kernels and star tables loaded
    pub fn from_config(config: &GateConfig) -> anyhow::Result<Self> {
        let mut session = Self::new();
        session.tracking_interval = config.tracking_interval();

        for path in &config.kernels {
            session
                .pool
                .load_kernel_file(path)
                .with_context(|| format!("Failed to load kernel {}", path.display()))?;
        }

        for (name, path) in &config.star_tables {
            session
                .pool
                .load_star_table(name, path)
                .with_context(|| format!("Failed to load star table {} from {}", name, path.display()))?;
        }

        let observer = &config.observer;
        session.options.set(OptionKey::ObserverBody, &observer.body)?;
        session.options.set_number(OptionKey::ObserverHeight, observer.height_km)?;
        if let Some(latitude) = observer.latitude {
            session.options.set_number(OptionKey::ObserverLatitude, latitude)?;
        }
        if let Some(longitude) = observer.longitude {
            session.options.set_number(OptionKey::ObserverLongitude, longitude)?;
        }
        if let Some(table) = &config.star_table {
            session.options.set(OptionKey::StarTable, table)?;
        }

        tracing::info!(
            kernels = config.kernels.len(),
            star_tables = config.star_tables.len(),
            observer = %observer.body,
            "Session initialized"
        );
        Ok(session)
    }

    /// Observer frame settings from the current options
    pub fn observer_site(&self, frame_name: &str) -> anyhow::Result<ObserverSite> {
        let body = self.options.require_text(OptionKey::ObserverBody)?;
        let body_id = self
            .pool
            .body_id(body)
            .ok_or_else(|| anyhow::anyhow!("No NAIF ID was found for body '{}'! Try LOAD KERNEL?", body))?;

        let latitude = self.options.require_number(OptionKey::ObserverLatitude)?;
        let longitude = self.options.require_number(OptionKey::ObserverLongitude)?;
        let height = self.options.number(OptionKey::ObserverHeight).unwrap_or(0.0);

        Ok(ObserverSite {
            frame_name: frame_name.to_string(),
            body_id,
            latitude,
            longitude,
            radius: observer_radius(&self.pool, body_id, latitude, longitude, height),
        })
    }

    pub fn tracker(&self, mode: LoopMode) -> TrackingLoop {
        TrackingLoop::new(mode, self.interrupt.token()).interval(self.tracking_interval)
    }
}
