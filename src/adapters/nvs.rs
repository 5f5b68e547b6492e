//! ESP-IDF NVS backend for [`StoragePort`].
//!
//! Each call opens its namespace on the default partition, does one
//! operation and drops the handle. `EspNvs` commits every write before
//! returning, so a blob is either fully stored or not at all.

use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::{ESP_ERR_NVS_NOT_ENOUGH_SPACE, ESP_ERR_NVS_NOT_FOUND, EspError};
use log::{info, warn};

use crate::app::ports::{StorageError, StoragePort};

pub struct NvsStorage {
    partition: EspDefaultNvsPartition,
}

impl NvsStorage {
    pub fn new(partition: EspDefaultNvsPartition) -> Self {
        info!("NvsStorage: default partition bound");
        Self { partition }
    }

    fn open(&self, namespace: &str, read_write: bool) -> Result<EspNvs<NvsDefault>, StorageError> {
        EspNvs::new(self.partition.clone(), namespace, read_write).map_err(|e| {
            warn!("NvsStorage: open '{}' failed: {}", namespace, e);
            map_err(e)
        })
    }
}

// A read-only open of a namespace that was never written reports NOT_FOUND.
fn map_err(e: EspError) -> StorageError {
    match e.code() {
        c if c == ESP_ERR_NVS_NOT_FOUND as i32 => StorageError::NotFound,
        c if c == ESP_ERR_NVS_NOT_ENOUGH_SPACE as i32 => StorageError::Full,
        _ => StorageError::IoError,
    }
}

impl StoragePort for NvsStorage {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let nvs = self.open(namespace, false)?;
        match nvs.blob_len(key).map_err(map_err)? {
            None => Err(StorageError::NotFound),
            Some(len) if len > buf.len() => Err(StorageError::Full),
            Some(_) => nvs
                .get_blob(key, buf)
                .map_err(map_err)?
                .map(|data| data.len())
                .ok_or(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.open(namespace, true)?
            .set_blob(key, data)
            .map_err(map_err)
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.open(namespace, true)?
            .remove(key)
            .map(|_| ())
            .map_err(map_err)
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.open(namespace, false)
            .and_then(|nvs| nvs.contains(key).map_err(map_err))
            .unwrap_or(false)
    }
}
