//! Last-known-values sensor snapshot
//!
//! The [`SensorView`] holds the most recent typed values for every sensor
//! group: 3-vectors for the inertial sensors, scalars for the rest. A
//! refresh overwrites exactly the requested groups from one frame; groups
//! outside the request keep their previous values, and a malformed field
//! stales only its own group without aborting the others. Values read
//! before any refresh are a defined zero.

use std::collections::HashSet;

use log::{debug, warn};

use crate::error::Result;
use crate::frame::Frame;
use crate::resource::{Resource, Sensor};

/// Mutable snapshot of last-fetched sensor values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorView {
    accelerometer: [f32; 3],
    gyroscope: [f32; 3],
    magnetometer: [f32; 3],
    humidity: f32,
    pressure: f32,
    temperature_from_humidity: f32,
    temperature_from_pressure: f32,
}

impl SensorView {
    /// Overwrite the requested sensor groups from one frame
    ///
    /// Groups not in `sensors` are left untouched. A group whose fields
    /// fail to parse keeps its previous values and is reported in the
    /// returned list; remaining groups still refresh.
    pub fn refresh(&mut self, sensors: &HashSet<Sensor>, frame: &Frame) -> Vec<Sensor> {
        let mut failed = Vec::new();

        for sensor in Sensor::ALL {
            if !sensors.contains(&sensor) {
                continue;
            }
            debug!("fetching {} data...", sensor);
            match self.refresh_group(sensor, frame) {
                Ok(()) => debug!("fetching {} data...done", sensor),
                Err(e) => {
                    warn!("keeping stale {} values: {}", sensor, e);
                    failed.push(sensor);
                }
            }
        }

        failed
    }

    fn refresh_group(&mut self, sensor: Sensor, frame: &Frame) -> Result<()> {
        match sensor {
            Sensor::Accelerometer => {
                self.accelerometer = frame.parse_fields(["ACC_X", "ACC_Y", "ACC_Z"])?;
            }
            Sensor::Gyroscope => {
                self.gyroscope = frame.parse_fields(["GYRO_X", "GYRO_Y", "GYRO_Z"])?;
            }
            Sensor::Magnetometer => {
                self.magnetometer = frame.parse_fields(["MAGNET_X", "MAGNET_Y", "MAGNET_Z"])?;
            }
            Sensor::Pressure => self.pressure = frame.parse_field("PRESSURE")?,
            Sensor::Humidity => self.humidity = frame.parse_field("HUMIDITY")?,
            Sensor::TemperatureFromHumidity => {
                self.temperature_from_humidity = frame.parse_field("TEMP_HUM")?;
            }
            Sensor::TemperatureFromPressure => {
                self.temperature_from_pressure = frame.parse_field("TEMP_PRESS")?;
            }
        }
        Ok(())
    }

    /// Last stored value for a resource, or `None` for resources without
    /// read semantics
    pub fn value(&self, resource: Resource) -> Option<f32> {
        match resource {
            Resource::Humidity => Some(self.humidity),
            Resource::Pressure => Some(self.pressure),
            Resource::TemperatureFromHumidity => Some(self.temperature_from_humidity),
            Resource::TemperatureFromPressure => Some(self.temperature_from_pressure),
            Resource::AccelerationX => Some(self.accelerometer[0]),
            Resource::AccelerationY => Some(self.accelerometer[1]),
            Resource::AccelerationZ => Some(self.accelerometer[2]),
            Resource::MagnetometerX => Some(self.magnetometer[0]),
            Resource::MagnetometerY => Some(self.magnetometer[1]),
            Resource::MagnetometerZ => Some(self.magnetometer[2]),
            Resource::GyroscopeX => Some(self.gyroscope[0]),
            Resource::GyroscopeY => Some(self.gyroscope[1]),
            Resource::GyroscopeZ => Some(self.gyroscope[2]),
            Resource::Joystick => None,
        }
    }
}
