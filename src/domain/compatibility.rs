//! Vehicle/station power compatibility table

use std::collections::HashMap;

use super::user::VehicleClass;

/// Maximum charging power (kW) each vehicle class tolerates.
///
/// Classes without an entry are compatible with any power level.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityPolicy {
    limits: HashMap<VehicleClass, f64>,
}

impl CompatibilityPolicy {
    /// The built-in table
    pub fn standard() -> Self {
        Self::empty()
            .with_limit(VehicleClass::Compact, 50.0)
            .with_limit(VehicleClass::Sedan, 100.0)
            .with_limit(VehicleClass::Suv, 150.0)
            .with_limit(VehicleClass::Van, 100.0)
            .with_limit(VehicleClass::Truck, 200.0)
            .with_limit(VehicleClass::Luxury, 350.0)
            .with_limit(VehicleClass::Sports, 350.0)
    }

    pub fn empty() -> Self {
        Self {
            limits: HashMap::new(),
        }
    }

    pub fn with_limit(mut self, class: VehicleClass, max_kw: f64) -> Self {
        self.limits.insert(class, max_kw);
        self
    }

    pub fn without_limit(mut self, class: VehicleClass) -> Self {
        self.limits.remove(&class);
        self
    }

    pub fn limit_for(&self, class: VehicleClass) -> Option<f64> {
        self.limits.get(&class).copied()
    }

    /// A station rated exactly at the limit is compatible.
    pub fn is_compatible(&self, class: VehicleClass, station_kw: f64) -> bool {
        match self.limit_for(class) {
            Some(limit) => station_kw <= limit,
            None => true,
        }
    }
}

impl Default for CompatibilityPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
