//! End-to-end charging flows through the public API: sample catalogue,
//! admission outcomes, balances and the notifications observers emit.

use std::sync::Arc;

use rust_decimal::Decimal;

use ev_charging::application::{run_scenarios, seed_demo_data, AppContext, ContextOptions};
use ev_charging::domain::{DomainError, DomainResult, StationStatus, StatusChange};
use ev_charging::notifications::{
    DispatchPolicy, MemorySink, Notification, SharedObserver, StationObserver,
};
use ev_charging::{ChargingOutcome, StopOutcome};

fn seeded(policy: DispatchPolicy) -> (AppContext, Arc<MemorySink>) {
    let sink = MemorySink::shared();
    let options = ContextOptions {
        dispatch_policy: policy,
        ..ContextOptions::default()
    };
    let ctx = AppContext::new(options, sink.clone());
    seed_demo_data(&ctx).unwrap();
    (ctx, sink)
}

fn station_id(ctx: &AppContext, name: &str) -> i32 {
    ctx.station_service
        .list()
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap()
        .id
}

struct Broken;

impl StationObserver for Broken {
    fn name(&self) -> &'static str {
        "broken"
    }

    fn on_status_changed(&self, _change: &StatusChange) -> DomainResult<()> {
        Err(DomainError::validation("display offline"))
    }
}

#[test]
fn canonical_scenarios_match_expectations() {
    let (ctx, sink) = seeded(DispatchPolicy::Isolate);
    let reports = run_scenarios(&ctx).unwrap();

    let titles: Vec<&str> = reports.iter().map(|r| r.title).collect();
    assert_eq!(
        titles,
        vec![
            "Station occupied",
            "Insufficient funds",
            "Incompatible vehicle",
            "Successful session"
        ]
    );
    assert!(reports.iter().all(|r| r.as_expected));

    // Rejections leave balances untouched; the session costs John 20
    let robert = ctx.user_service.get_by_email("robert@example.com").unwrap();
    assert_eq!(robert.balance, Decimal::new(5025, 2));
    let john = ctx.user_service.get_by_email("john.doe@example.com").unwrap();
    assert_eq!(john.balance, Decimal::new(10050, 2));

    let emails: Vec<_> = sink
        .notifications()
        .into_iter()
        .filter_map(|n| match n {
            Notification::Email(email) => Some(email),
            _ => None,
        })
        .collect();
    assert_eq!(emails.len(), 2);
    assert_eq!(emails[0].to, "john.doe@example.com");
    assert_eq!(emails[0].subject, "Charging started!");
    assert_eq!(emails[1].subject, "Charging finished!");
}

#[test]
fn session_round_trip_notifies_in_registration_order() {
    let (ctx, sink) = seeded(DispatchPolicy::Isolate);
    let john = ctx.user_service.get_by_email("john.doe@example.com").unwrap();
    let center = station_id(&ctx, "GreenCharge City Center");

    let outcome = ctx
        .processor
        .request_charging(john.id, center, Decimal::from(20))
        .unwrap();
    assert_eq!(outcome, ChargingOutcome::Started);
    assert_eq!(
        ctx.station_service.get(center).unwrap().status,
        StationStatus::Occupied
    );

    assert_eq!(ctx.processor.end_session(center).unwrap(), StopOutcome::Stopped);
    assert_eq!(
        ctx.processor.end_session(center).unwrap(),
        StopOutcome::NotOccupied(StationStatus::Available)
    );

    let kinds: Vec<&str> = sink.notifications().iter().map(|n| n.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "email",
            "provider_alert",
            "station_board",
            "email",
            "provider_alert",
            "station_board"
        ]
    );
    match &sink.notifications()[1] {
        Notification::ProviderAlert(alert) => {
            assert_eq!(alert.provider_name, "GreenCharge");
            assert_eq!(alert.status_text, "occupied");
        }
        other => panic!("expected provider alert, got {:?}", other),
    }
}

#[test]
fn failing_observer_is_isolated_by_default() {
    let (ctx, sink) = seeded(DispatchPolicy::Isolate);
    let john = ctx.user_service.get_by_email("john.doe@example.com").unwrap();
    let center = station_id(&ctx, "EcoVolt City Center");
    let broken: SharedObserver = Arc::new(Broken);
    assert!(ctx.bus.add_observer(center, broken));

    assert!(ctx
        .processor
        .process_charging_request(john.id, center, Decimal::from(20)));
    // The three standard observers still ran
    assert_eq!(sink.len(), 3);
}

#[test]
fn fail_fast_surfaces_the_observer_error() {
    let (ctx, sink) = seeded(DispatchPolicy::FailFast);
    let center = station_id(&ctx, "PowerPlugs City Center");
    let broken: SharedObserver = Arc::new(Broken);
    ctx.bus.add_observer(center, broken);

    let err = ctx
        .station_service
        .update_status(center, StationStatus::Maintenance)
        .unwrap_err();
    assert!(matches!(err, DomainError::Observer { observer: "broken", .. }));

    // The status change itself is kept. The standard observers were
    // registered first and already ran; the user notifier ignores maintenance.
    assert_eq!(
        ctx.station_service.get(center).unwrap().status,
        StationStatus::Maintenance
    );
    let kinds: Vec<&str> = sink.notifications().iter().map(|n| n.kind()).collect();
    assert_eq!(kinds, vec!["provider_alert", "station_board"]);
}

#[test]
fn deleted_station_loses_its_observers() {
    let (ctx, sink) = seeded(DispatchPolicy::Isolate);
    let mall = station_id(&ctx, "VoltVenture Mall Station");
    assert_eq!(ctx.bus.observer_count(mall), 3);

    ctx.station_service.delete(mall).unwrap();
    assert_eq!(ctx.bus.observer_count(mall), 0);
    assert!(ctx.station_service.get(mall).is_err());
    assert!(sink.is_empty());

    let voltventure = ctx
        .provider_service
        .list()
        .unwrap()
        .into_iter()
        .find(|p| p.name == "VoltVenture")
        .unwrap();
    assert_eq!(voltventure.station_ids().len(), 2);
}
