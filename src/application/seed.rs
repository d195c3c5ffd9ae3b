//! Sample data and the canonical charging scenarios

use rust_decimal::Decimal;
use tracing::info;

use super::context::AppContext;
use super::processor::{ChargingOutcome, StopOutcome};
use crate::domain::{
    CreateProviderDto, CreateStationDto, CreateUserDto, DomainError, DomainResult, Station,
    StationStatus, User, VehicleClass,
};

struct ProviderSeed {
    name: &'static str,
    contact: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
}

const PROVIDERS: [ProviderSeed; 5] = [
    ProviderSeed {
        name: "ElectroDrive",
        contact: "John Smith",
        email: "john@electrodrive.com",
        phone: "+386 31 123 456",
        address: "Ljubljana, Slovenia",
    },
    ProviderSeed {
        name: "GreenCharge",
        contact: "Ana Novak",
        email: "ana@greencharge.eu",
        phone: "+386 41 789 123",
        address: "Maribor, Slovenia",
    },
    ProviderSeed {
        name: "EcoVolt",
        contact: "Mark Johnson",
        email: "mark@ecovolt.com",
        phone: "+386 40 333 444",
        address: "Celje, Slovenia",
    },
    ProviderSeed {
        name: "PowerPlugs",
        contact: "Maria Rodriguez",
        email: "maria@powerplugs.eu",
        phone: "+386 51 555 666",
        address: "Koper, Slovenia",
    },
    ProviderSeed {
        name: "VoltVenture",
        contact: "Alex Peterson",
        email: "alex@voltventure.com",
        phone: "+386 70 777 888",
        address: "Kranj, Slovenia",
    },
];

/// (name suffix, location prefix, status, connectors, kW, base coordinates)
const STATION_TEMPLATES: [(&str, &str, StationStatus, u32, f64, (f64, f64)); 3] = [
    ("City Center", "City Center", StationStatus::Available, 4, 22.0, (46.05, 14.50)),
    ("Mall Station", "Shopping Mall", StationStatus::Occupied, 2, 50.0, (46.06, 14.51)),
    ("Airport", "Airport", StationStatus::OutOfService, 6, 150.0, (46.22, 14.45)),
];

const USERS: [(&str, &str, i64, VehicleClass); 5] = [
    ("John Doe", "john.doe@example.com", 12050, VehicleClass::Sedan),
    ("Jane Smith", "jane.smith@example.com", 8575, VehicleClass::Suv),
    ("Robert Johnson", "robert@example.com", 5025, VehicleClass::Compact),
    ("Emma Davis", "emma@example.com", 20000, VehicleClass::Luxury),
    ("Michael Wilson", "michael@example.com", 15030, VehicleClass::Sports),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub providers: usize,
    pub stations: usize,
    pub users: usize,
}

/// Load the sample providers (three stations each) and users through the
/// services, so every station gets the standard observers.
pub fn seed_demo_data(ctx: &AppContext) -> DomainResult<SeedSummary> {
    let mut summary = SeedSummary {
        providers: 0,
        stations: 0,
        users: 0,
    };

    for (index, seed) in PROVIDERS.iter().enumerate() {
        let provider = ctx.provider_service.create(CreateProviderDto {
            name: seed.name.to_string(),
            contact_person: seed.contact.to_string(),
            email: seed.email.to_string(),
            phone: seed.phone.to_string(),
            address: seed.address.to_string(),
        })?;
        summary.providers += 1;

        let city = provider.city().to_string();
        let offset = index as f64 * 0.001;
        for (suffix, place, status, connectors, kw, (lat, lon)) in STATION_TEMPLATES {
            ctx.station_service.create(CreateStationDto {
                name: format!("{} {}", provider.name, suffix),
                location: format!("{}, {}", place, city),
                coordinates: format!("{:.4},{:.4}", lat + offset, lon + offset),
                status,
                provider_id: Some(provider.id),
                connectors,
                max_power_kw: kw,
            })?;
            summary.stations += 1;
        }
    }

    for (name, email, cents, vehicle_class) in USERS {
        ctx.user_service.register(CreateUserDto {
            name: name.to_string(),
            email: email.to_string(),
            balance: Decimal::new(cents, 2),
            vehicle_class,
        })?;
        summary.users += 1;
    }

    info!(
        providers = summary.providers,
        stations = summary.stations,
        users = summary.users,
        "Demo data loaded"
    );
    Ok(summary)
}

/// Result of one canonical scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub title: &'static str,
    pub outcome: ChargingOutcome,
    /// Whether the outcome matched what the scenario expects
    pub as_expected: bool,
}

/// Run the four canonical scenarios against seeded data: occupied station,
/// insufficient funds, incompatible vehicle and a full start/stop cycle.
pub fn run_scenarios(ctx: &AppContext) -> DomainResult<Vec<ScenarioReport>> {
    let john = find_user(ctx, "john.doe@example.com")?;
    let robert = find_user(ctx, "robert@example.com")?;
    let mall = find_station(ctx, "ElectroDrive Mall Station")?;
    let center = find_station(ctx, "ElectroDrive City Center")?;
    let green_center = find_station(ctx, "GreenCharge City Center")?;
    let airport = find_station(ctx, "EcoVolt Airport")?;

    let mut reports = Vec::with_capacity(4);

    let outcome = ctx
        .processor
        .request_charging(john.id, mall.id, Decimal::from(30))?;
    reports.push(ScenarioReport {
        title: "Station occupied",
        as_expected: matches!(&outcome, ChargingOutcome::Rejected(r) if r.code() == "unavailable"),
        outcome,
    });

    let outcome = ctx
        .processor
        .request_charging(robert.id, green_center.id, robert.balance + Decimal::from(10))?;
    reports.push(ScenarioReport {
        title: "Insufficient funds",
        as_expected: matches!(&outcome, ChargingOutcome::Rejected(r) if r.code() == "insufficient_balance"),
        outcome,
    });

    // Bring the airport back into service so only power can stop Robert
    ctx.station_service
        .update_status(airport.id, StationStatus::Available)?;
    let outcome = ctx
        .processor
        .request_charging(robert.id, airport.id, Decimal::from(20))?;
    reports.push(ScenarioReport {
        title: "Incompatible vehicle",
        as_expected: matches!(&outcome, ChargingOutcome::Rejected(r) if r.code() == "incompatible"),
        outcome,
    });

    let outcome = ctx
        .processor
        .request_charging(john.id, center.id, Decimal::from(20))?;
    let stopped = ctx.processor.end_session(center.id)?;
    reports.push(ScenarioReport {
        title: "Successful session",
        as_expected: outcome.is_started() && stopped == StopOutcome::Stopped,
        outcome,
    });

    Ok(reports)
}

fn find_user(ctx: &AppContext, email: &str) -> DomainResult<User> {
    ctx.user_service.get_by_email(email)
}

fn find_station(ctx: &AppContext, name: &str) -> DomainResult<Station> {
    ctx.station_service
        .list()?
        .into_iter()
        .find(|s| s.name == name)
        .ok_or_else(|| DomainError::not_found("Station", "name", name))
}
