//! Provider domain entity

/// Operator that owns charging stations.
///
/// The provider is the owning side of the provider/station relationship:
/// it keeps the ordered list of station ids, while each station only
/// stores its provider id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Provider {
    /// Store-assigned identifier, 0 until persisted
    pub id: i32,
    pub name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    station_ids: Vec<i32>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_contact(
        mut self,
        contact_person: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        self.contact_person = contact_person.into();
        self.email = email.into();
        self.phone = phone.into();
        self.address = address.into();
        self
    }

    pub fn station_ids(&self) -> &[i32] {
        &self.station_ids
    }

    pub fn owns_station(&self, station_id: i32) -> bool {
        self.station_ids.contains(&station_id)
    }

    /// Returns false if the station is already listed.
    pub fn add_station(&mut self, station_id: i32) -> bool {
        if self.owns_station(station_id) {
            return false;
        }
        self.station_ids.push(station_id);
        true
    }

    /// Returns false if the station was not listed.
    pub fn remove_station(&mut self, station_id: i32) -> bool {
        let len_before = self.station_ids.len();
        self.station_ids.retain(|id| *id != station_id);
        self.station_ids.len() < len_before
    }

    pub(crate) fn replace_stations(&mut self, station_ids: Vec<i32>) {
        self.station_ids = station_ids;
    }

    /// First comma-separated segment of the address, e.g. the city.
    pub fn city(&self) -> &str {
        self.address.split(',').next().unwrap_or("").trim()
    }
}
