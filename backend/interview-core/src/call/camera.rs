//! Webcam stream lifecycle: acquire on start, release on stop.

use crate::error::call::CallError;

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

/// An open media stream. Stopping releases every track.
pub trait MediaStream: Send + Sync {
    fn stop(&mut self);
}

/// Source of camera streams.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn open_video(&self) -> Result<Box<dyn MediaStream>, CallError>;
}

pub struct Camera {
    devices: Arc<dyn MediaDevices>,
    stream: Option<Box<dyn MediaStream>>,
}

impl Camera {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            devices,
            stream: None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.stream.is_some()
    }

    /// Opens a stream unless one is already held.
    pub async fn start(&mut self) -> Result<(), CallError> {
        if self.stream.is_some() {
            debug!("Camera already on");
            return Ok(());
        }

        let stream = self.devices.open_video().await?;
        self.stream = Some(stream);
        info!("Camera started");
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            info!("Camera stopped");
        }
    }
}

impl Drop for Camera {
    fn drop(&mut self) {
        self.stop();
    }
}
