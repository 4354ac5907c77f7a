//! Logical resources and physical sensor groups
//!
//! A [`Resource`] is the user-facing identifier a channel is configured
//! with (one axis of acceleration, humidity, ...). A [`Sensor`] is the
//! physical quantity group whose single fetch satisfies every resource
//! associated with it: the three acceleration axes all map to
//! [`Sensor::Accelerometer`], so twenty channels reading acceleration
//! still cost one accelerometer fetch per batch.
//!
//! Both sets are closed; the resource-to-sensor mapping is a total
//! function checked by exhaustive matches.

use crate::error::{EngineError, Result};

/// Logical resource identifier, as configured per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Humidity,
    Pressure,
    TemperatureFromHumidity,
    TemperatureFromPressure,
    AccelerationX,
    AccelerationY,
    AccelerationZ,
    MagnetometerX,
    MagnetometerY,
    MagnetometerZ,
    GyroscopeX,
    GyroscopeY,
    GyroscopeZ,
    /// Event-style resource; carries no sensor group and is not readable
    /// through the batch path
    Joystick,
}

impl Resource {
    /// All resources, in declaration order
    pub const ALL: [Resource; 14] = [
        Resource::Humidity,
        Resource::Pressure,
        Resource::TemperatureFromHumidity,
        Resource::TemperatureFromPressure,
        Resource::AccelerationX,
        Resource::AccelerationY,
        Resource::AccelerationZ,
        Resource::MagnetometerX,
        Resource::MagnetometerY,
        Resource::MagnetometerZ,
        Resource::GyroscopeX,
        Resource::GyroscopeY,
        Resource::GyroscopeZ,
        Resource::Joystick,
    ];

    /// Resolve a raw channel-configuration identifier
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownResource`] if the identifier is not
    /// in the closed enumeration.
    pub fn resolve(identifier: &str) -> Result<Resource> {
        match identifier {
            "HUMIDITY" => Ok(Resource::Humidity),
            "PRESSURE" => Ok(Resource::Pressure),
            "TEMPERATURE_FROM_HUMIDITY" => Ok(Resource::TemperatureFromHumidity),
            "TEMPERATURE_FROM_PRESSURE" => Ok(Resource::TemperatureFromPressure),
            "ACCELERATION_X" => Ok(Resource::AccelerationX),
            "ACCELERATION_Y" => Ok(Resource::AccelerationY),
            "ACCELERATION_Z" => Ok(Resource::AccelerationZ),
            "MAGNETOMETER_X" => Ok(Resource::MagnetometerX),
            "MAGNETOMETER_Y" => Ok(Resource::MagnetometerY),
            "MAGNETOMETER_Z" => Ok(Resource::MagnetometerZ),
            "GYROSCOPE_X" => Ok(Resource::GyroscopeX),
            "GYROSCOPE_Y" => Ok(Resource::GyroscopeY),
            "GYROSCOPE_Z" => Ok(Resource::GyroscopeZ),
            "JOYSTICK" => Ok(Resource::Joystick),
            other => Err(EngineError::UnknownResource(other.to_string())),
        }
    }

    /// The configuration identifier for this resource
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Humidity => "HUMIDITY",
            Resource::Pressure => "PRESSURE",
            Resource::TemperatureFromHumidity => "TEMPERATURE_FROM_HUMIDITY",
            Resource::TemperatureFromPressure => "TEMPERATURE_FROM_PRESSURE",
            Resource::AccelerationX => "ACCELERATION_X",
            Resource::AccelerationY => "ACCELERATION_Y",
            Resource::AccelerationZ => "ACCELERATION_Z",
            Resource::MagnetometerX => "MAGNETOMETER_X",
            Resource::MagnetometerY => "MAGNETOMETER_Y",
            Resource::MagnetometerZ => "MAGNETOMETER_Z",
            Resource::GyroscopeX => "GYROSCOPE_X",
            Resource::GyroscopeY => "GYROSCOPE_Y",
            Resource::GyroscopeZ => "GYROSCOPE_Z",
            Resource::Joystick => "JOYSTICK",
        }
    }

    /// The sensor group a fetch must refresh before this resource can be
    /// read, or `None` for non-sensor resources
    pub fn associated_sensor(&self) -> Option<Sensor> {
        match self {
            Resource::Humidity => Some(Sensor::Humidity),
            Resource::Pressure => Some(Sensor::Pressure),
            Resource::TemperatureFromHumidity => Some(Sensor::TemperatureFromHumidity),
            Resource::TemperatureFromPressure => Some(Sensor::TemperatureFromPressure),
            Resource::AccelerationX | Resource::AccelerationY | Resource::AccelerationZ => {
                Some(Sensor::Accelerometer)
            }
            Resource::MagnetometerX | Resource::MagnetometerY | Resource::MagnetometerZ => {
                Some(Sensor::Magnetometer)
            }
            Resource::GyroscopeX | Resource::GyroscopeY | Resource::GyroscopeZ => {
                Some(Sensor::Gyroscope)
            }
            Resource::Joystick => None,
        }
    }

    /// Whether this resource is backed by a physical sensor group
    pub fn is_sensor_resource(&self) -> bool {
        self.associated_sensor().is_some()
    }

    /// Whether this resource only makes sense for event listeners
    pub fn is_event_resource(&self) -> bool {
        !self.is_sensor_resource()
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Resource::resolve(s)
    }
}

/// Physical quantity group; one fetch refreshes the whole group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Accelerometer,
    Gyroscope,
    Magnetometer,
    Pressure,
    Humidity,
    TemperatureFromHumidity,
    TemperatureFromPressure,
}

impl Sensor {
    /// All sensor groups, in refresh order
    pub const ALL: [Sensor; 7] = [
        Sensor::Accelerometer,
        Sensor::Gyroscope,
        Sensor::Magnetometer,
        Sensor::Pressure,
        Sensor::Humidity,
        Sensor::TemperatureFromHumidity,
        Sensor::TemperatureFromPressure,
    ];
}

impl std::fmt::Display for Sensor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sensor::Accelerometer => "accelerometer",
            Sensor::Gyroscope => "gyroscope",
            Sensor::Magnetometer => "magnetometer",
            Sensor::Pressure => "pressure",
            Sensor::Humidity => "humidity",
            Sensor::TemperatureFromHumidity => "temperature-from-humidity",
            Sensor::TemperatureFromPressure => "temperature-from-pressure",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_identifiers() {
        assert_eq!(Resource::resolve("HUMIDITY").unwrap(), Resource::Humidity);
        assert_eq!(
            Resource::resolve("ACCELERATION_Z").unwrap(),
            Resource::AccelerationZ
        );
        assert_eq!(Resource::resolve("JOYSTICK").unwrap(), Resource::Joystick);
    }

    #[test]
    fn test_resolve_unknown_identifier() {
        let result = Resource::resolve("WIND_SPEED");
        assert!(matches!(result, Err(EngineError::UnknownResource(s)) if s == "WIND_SPEED"));
    }

    #[test]
    fn test_resolve_roundtrip() {
        for resource in Resource::ALL {
            assert_eq!(Resource::resolve(resource.as_str()).unwrap(), resource);
        }
    }

    #[test]
    fn test_resolve_is_deterministic() {
        // Same identifier resolves identically, regardless of call order
        let first = Resource::resolve("GYROSCOPE_Y").unwrap();
        for _ in 0..100 {
            assert_eq!(Resource::resolve("GYROSCOPE_Y").unwrap(), first);
        }
    }

    #[test]
    fn test_axis_resources_share_sensor() {
        assert_eq!(
            Resource::AccelerationX.associated_sensor(),
            Some(Sensor::Accelerometer)
        );
        assert_eq!(
            Resource::AccelerationY.associated_sensor(),
            Some(Sensor::Accelerometer)
        );
        assert_eq!(
            Resource::AccelerationZ.associated_sensor(),
            Some(Sensor::Accelerometer)
        );
    }

    #[test]
    fn test_joystick_is_event_resource() {
        assert!(Resource::Joystick.is_event_resource());
        assert!(!Resource::Joystick.is_sensor_resource());
        assert!(Resource::Joystick.associated_sensor().is_none());
    }

    #[test]
    fn test_all_other_resources_are_sensor_backed() {
        for resource in Resource::ALL {
            if resource != Resource::Joystick {
                assert!(resource.is_sensor_resource(), "{} has no sensor", resource);
            }
        }
    }
}
