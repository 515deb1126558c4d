use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Device lifecycle state definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum DeviceStatus {
    /// Device is in stock, available for installation
    #[serde(rename = "stock")]
    Stock,
    /// Device is installed in the field
    #[serde(rename = "installé")]
    Installed,
    /// Device was pulled back for maintenance
    #[serde(rename = "maintenance")]
    Maintenance,
}

impl DeviceStatus {
    /// Check if this state marks a device as deployed
    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Installed)
    }

    /// Check if this state makes a device available for installation
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Stock)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stock => write!(f, "stock"),
            Self::Installed => write!(f, "installé"),
            Self::Maintenance => write!(f, "maintenance"),
        }
    }
}

impl std::str::FromStr for DeviceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stock" => Ok(Self::Stock),
            "installé" => Ok(Self::Installed),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(format!("Invalid device status: {s}")),
        }
    }
}

/// Default state for newly created devices
impl Default for DeviceStatus {
    fn default() -> Self {
        Self::Stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(DeviceStatus::Stock.to_string(), "stock");
        assert_eq!(DeviceStatus::Installed.to_string(), "installé");
        assert_eq!(DeviceStatus::Maintenance.to_string(), "maintenance");

        assert_eq!("stock".parse::<DeviceStatus>().unwrap(), DeviceStatus::Stock);
        assert_eq!(
            "installé".parse::<DeviceStatus>().unwrap(),
            DeviceStatus::Installed
        );
        assert_eq!(
            "maintenance".parse::<DeviceStatus>().unwrap(),
            DeviceStatus::Maintenance
        );

        assert!("installed".parse::<DeviceStatus>().is_err());
        assert!("".parse::<DeviceStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let status = DeviceStatus::Installed;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"installé\"");

        let parsed: DeviceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);

        assert!(serde_json::from_str::<DeviceStatus>("\"broken\"").is_err());
    }

    #[test]
    fn test_status_default_is_stock() {
        assert_eq!(DeviceStatus::default(), DeviceStatus::Stock);
    }

    #[test]
    fn test_status_predicates() {
        assert!(DeviceStatus::Stock.is_available());
        assert!(!DeviceStatus::Stock.is_deployed());
        assert!(DeviceStatus::Installed.is_deployed());
        assert!(!DeviceStatus::Maintenance.is_available());
    }
}
