//! Persistent configuration over any [`StoragePort`].
//!
//! The whole [`SystemConfig`] is stored as one `postcard` blob under
//! `armctl::syscfg`. A missing blob is first boot and yields defaults; a
//! blob that fails to decode is reported as [`ConfigError::Corrupted`] so
//! the caller decides whether to fall back.

use core::cell::RefCell;

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::SystemConfig;

pub const CONFIG_NAMESPACE: &str = "armctl";
pub const CONFIG_KEY: &str = "syscfg";

const MAX_BLOB_SIZE: usize = 256;

pub struct ConfigStore<S> {
    storage: RefCell<S>,
}

impl<S: StoragePort> ConfigStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage: RefCell::new(storage),
        }
    }

    /// Remove the stored blob; the next `load` returns defaults.
    pub fn reset(&self) -> Result<(), ConfigError> {
        self.storage
            .borrow_mut()
            .delete(CONFIG_NAMESPACE, CONFIG_KEY)?;
        info!("ConfigStore: stored config erased");
        Ok(())
    }

    pub fn into_inner(self) -> S {
        self.storage.into_inner()
    }
}

impl<S: StoragePort> ConfigPort for ConfigStore<S> {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let mut buf = [0u8; MAX_BLOB_SIZE];
        let len = match self
            .storage
            .borrow()
            .read(CONFIG_NAMESPACE, CONFIG_KEY, &mut buf)
        {
            Ok(len) => len,
            Err(StorageError::NotFound) => {
                info!("ConfigStore: no stored config, using defaults");
                return Ok(SystemConfig::default());
            }
            Err(StorageError::Full) => {
                warn!("ConfigStore: stored blob larger than {} bytes", MAX_BLOB_SIZE);
                return Err(ConfigError::Corrupted);
            }
            Err(e) => return Err(e.into()),
        };

        let cfg: SystemConfig =
            postcard::from_bytes(&buf[..len]).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        info!("ConfigStore: loaded config ({} bytes)", len);
        Ok(cfg)
    }

    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.storage
            .borrow_mut()
            .write(CONFIG_NAMESPACE, CONFIG_KEY, &bytes)?;
        info!("ConfigStore: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
