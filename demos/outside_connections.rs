// demos/outside_connections.rs
// Run with:
//   RUST_LOG=debug cargo run --example outside_connections

use traffic_balance::systems::sdk::{MemTopology, NetClass, Segment};
use traffic_balance::mechanics::lanes::Lane;
use traffic_balance::{Balancer, BalancerConfig, ConnectionEvent, ConnectionId};

fn main() {
    env_logger::init();

    // Map edge (pick your own roads)
    let mut topo = MemTopology::new();
    topo.connect(ConnectionId(1), Segment::one_way(3, 2.0).with_lane(Lane::bus())) // highway
        .connect(ConnectionId(2), Segment::two_way(2, 1.0)) // small two-way road
        .connect(ConnectionId(3), Segment::two_way(4, 1.2)) // four-lane avenue
        .connect(ConnectionId(4), Segment::one_way(6, 2.0)) // big highway
        .connect(ConnectionId(5), Segment::non_road(NetClass::Rail));

    let mut balancer = match Balancer::new(topo, BalancerConfig::classic()) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("bad config: {e}");
            return;
        }
    };

    let ids: Vec<ConnectionId> = (1..=5).map(ConnectionId).collect();
    for (id, st) in balancer.handle_all(ids.iter().copied().map(ConnectionEvent::Loaded)) {
        println!("{id}: capacity {:.3}, counter {:.3}", st.capacity, st.counter);
    }

    println!("== 12 offer cycles, base rate 100 ==");
    for cycle in 1..=12 {
        let row: Vec<String> = ids
            .iter()
            .map(|&id| {
                let out = balancer.on_tick(id, 100);
                if out.allow { format!("{:>4}", out.rate) } else { "   -".to_string() }
            })
            .collect();
        println!("cycle {cycle:>2}: {}", row.join(" "));
    }

    // Upgrade the small road to a highway.
    balancer
        .topology_mut()
        .connect(ConnectionId(2), Segment::one_way(3, 2.0));
    let st = balancer.handle(ConnectionEvent::Upgraded(ConnectionId(2)));
    println!("#2 upgraded: capacity {:.3}", st.capacity);
}
