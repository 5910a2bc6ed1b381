// tests/balancer.rs
use traffic_balance::mechanics::lanes::{LaneFilter, VehicleType};
use traffic_balance::systems::sdk::{MemTopology, NetClass, Segment};
use traffic_balance::{
    Balancer, BalancerConfig, CapacityParams, ConfigError, ConnectionEvent, ConnectionId,
    CounterSeeding, TickOutcome,
};

const HIGHWAY: ConnectionId = ConnectionId(1);
const AVENUE: ConnectionId = ConnectionId(2);
const RAIL: ConnectionId = ConnectionId(3);
const ELEVATOR: ConnectionId = ConnectionId(4);

/// Map edge with a baseline highway, a 2-lane two-way avenue and a rail line.
fn map_edge() -> MemTopology {
    let mut t = MemTopology::new();
    t.connect(HIGHWAY, Segment::one_way(3, 2.0))
        .connect(AVENUE, Segment::two_way(2, 1.0))
        .connect(RAIL, Segment::non_road(NetClass::Rail));
    t
}

fn loaded() -> Balancer<MemTopology> {
    let mut b = Balancer::new(map_edge(), BalancerConfig::default()).expect("valid config");
    b.handle_all([HIGHWAY, AVENUE, RAIL].map(ConnectionEvent::Loaded));
    b
}

/* ──────────────────────────────────────────────────────────────────────────
1) Lifecycle
────────────────────────────────────────────────────────────────────────── */

#[test_log::test]
fn load_registers_every_connection() {
    let b = loaded();
    assert_eq!(b.registry().len(), 3);
    assert_eq!(b.get(HIGHWAY).map(|s| s.capacity), Some(1.0));
    assert_eq!(b.get(RAIL).map(|s| s.capacity), Some(1.0));
    // 1 lane each way at 50 km/h.
    let avenue = b.get(AVENUE).map(|s| s.capacity).unwrap_or(f64::NAN);
    assert!((avenue - (1.0_f64 / 6.0).sqrt()).abs() < 1e-12, "{avenue}");
    assert_eq!(b.get(ELEVATOR), None);
}

#[test_log::test]
fn handle_all_reports_states_in_event_order() {
    let mut b = Balancer::new(map_edge(), BalancerConfig::default()).expect("valid config");
    let out = b.handle_all([
        ConnectionEvent::Created(RAIL),
        ConnectionEvent::Loaded(HIGHWAY),
    ]);
    let ids: Vec<_> = out.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![RAIL, HIGHWAY]);
}

#[test_log::test]
fn upgrade_event_recomputes_capacity() {
    let mut b = loaded();
    assert!(b.get(AVENUE).is_some_and(|s| s.is_throttled()));

    b.topology_mut().connect(AVENUE, Segment::one_way(6, 2.0));
    let st = b.handle(ConnectionEvent::Upgraded(AVENUE));
    assert!((st.capacity - 2.0_f64.sqrt()).abs() < 1e-12);
    assert_eq!(b.get(AVENUE), Some(st));
}

#[test_log::test]
fn topology_edits_wait_for_an_event() {
    let mut b = loaded();
    let before = b.get(HIGHWAY);
    b.topology_mut().connect(HIGHWAY, Segment::one_way(1, 1.0));
    assert_eq!(b.get(HIGHWAY), before);
}

/* ──────────────────────────────────────────────────────────────────────────
2) Ticks end to end
────────────────────────────────────────────────────────────────────────── */

#[test_log::test]
fn nominal_and_untracked_connections_always_run() {
    let mut b = loaded();
    for _ in 0..20 {
        assert_eq!(b.on_tick(HIGHWAY, 100), TickOutcome::run(100));
        assert_eq!(b.on_tick(RAIL, 100), TickOutcome::run(100));
        assert_eq!(b.on_tick(ELEVATOR, 100), TickOutcome::run(100));
    }
}

#[test_log::test]
fn avenue_runs_a_capacity_share_of_ticks() {
    let mut b = loaded();
    let c = b.get(AVENUE).map(|s| s.capacity).unwrap_or(0.0);
    let n = 10_000;
    let mut runs = 0usize;
    for _ in 0..n {
        let out = b.on_tick(AVENUE, 100);
        if out.allow {
            runs += 1;
            assert_eq!(out.rate, (100.0 * c).ceil() as i64);
        }
    }
    let freq = runs as f64 / n as f64;
    assert!((freq - c).abs() < 1e-3, "freq={freq} capacity={c}");
}

#[test_log::test]
fn same_capacity_connections_start_out_of_phase() {
    let mut t = MemTopology::new();
    for id in 10..42 {
        t.connect(ConnectionId(id), Segment::one_way(1, 1.0));
    }
    let mut b = Balancer::new(t, BalancerConfig::default()).expect("valid config");
    b.handle_all((10..42).map(|id| ConnectionEvent::Created(ConnectionId(id))));

    // With a shared phase every connection would fire on the same tick.
    let first: Vec<bool> = (10..42)
        .map(|id| b.on_tick(ConnectionId(id), 100).allow)
        .collect();
    assert!(first.iter().any(|a| *a) && first.iter().any(|a| !*a), "{first:?}");
}

/* ──────────────────────────────────────────────────────────────────────────
3) Configuration
────────────────────────────────────────────────────────────────────────── */

#[test]
fn invalid_configs_are_rejected() {
    let bad_base = BalancerConfig {
        capacity: CapacityParams { baseline_throughput: 0.0, ..CapacityParams::default() },
        ..BalancerConfig::default()
    };
    assert_eq!(bad_base.validate(), Err(ConfigError::InvalidBaseline(0.0)));

    let bad_fallback = BalancerConfig {
        capacity: CapacityParams { fallback_capacity: -1.0, ..CapacityParams::default() },
        ..BalancerConfig::default()
    };
    assert_eq!(bad_fallback.validate(), Err(ConfigError::InvalidFallback(-1.0)));

    let empty_filter = BalancerConfig {
        capacity: CapacityParams {
            lane_filter: LaneFilter { vehicle_types: VehicleType::NONE, ..LaneFilter::default() },
            ..CapacityParams::default()
        },
        ..BalancerConfig::default()
    };
    assert!(matches!(
        Balancer::new(map_edge(), empty_filter),
        Err(ConfigError::EmptyLaneFilter)
    ));

    let no_buckets = BalancerConfig { seeding: CounterSeeding::Buckets(0), ..BalancerConfig::default() };
    assert!(matches!(Balancer::new(map_edge(), no_buckets), Err(ConfigError::ZeroBuckets)));
}

#[test]
fn nan_baseline_is_rejected() {
    let cfg = BalancerConfig {
        capacity: CapacityParams { baseline_throughput: f64::NAN, ..CapacityParams::default() },
        ..BalancerConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidBaseline(_))));
}

#[test]
fn classic_config_uses_coarse_counters() {
    let cfg = BalancerConfig::classic().with_seed(77);
    assert_eq!(cfg.validate(), Ok(()));
    let mut b = Balancer::new(map_edge(), cfg).expect("valid config");
    let st = b.handle(ConnectionEvent::Loaded(AVENUE));
    assert_eq!(st.counter * 256.0, (st.counter * 256.0).floor());
    assert_eq!(b.registry().seeding(), CounterSeeding::Buckets(256));
}

#[test]
fn error_messages_name_the_problem() {
    assert_eq!(
        ConfigError::InvalidBaseline(-2.0).to_string(),
        "Baseline throughput must be positive and finite, got -2"
    );
    assert_eq!(
        ConfigError::ZeroBuckets.to_string(),
        "Counter seeding needs at least one bucket"
    );
}
