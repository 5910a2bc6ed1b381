//! Lane descriptors and the car-lane predicate.
//!
//! Hosts describe each lane of a segment with three bitmasks (lane type,
//! vehicle type, vehicle category). A lane counts toward capacity when it
//! intersects every mask of the active [`LaneFilter`].

macro_rules! flag_set {
    ($(#[$meta:meta])* $name:ident($repr:ty) { $($(#[$fmeta:meta])* $flag:ident = $bit:expr,)* }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name(pub $repr);

        impl $name {
            pub const NONE: Self = Self(0);
            $($(#[$fmeta])* pub const $flag: Self = Self(1 << $bit);)*

            #[inline]
            pub fn intersects(self, other: Self) -> bool {
                self.0 & other.0 != 0
            }
            #[inline]
            pub fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;
            #[inline]
            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }
    };
}

flag_set! {
    /// What a lane carries.
    LaneType(u32) {
        VEHICLE = 0,
        PEDESTRIAN = 1,
        PARKING = 2,
        TRANSPORT_VEHICLE = 3,
        CARGO_VEHICLE = 4,
    }
}

flag_set! {
    /// Vehicle kinds allowed on a lane.
    VehicleType(u32) {
        CAR = 0,
        METRO = 1,
        TRAIN = 2,
        SHIP = 3,
        PLANE = 4,
        BICYCLE = 5,
        TRAM = 6,
    }
}

flag_set! {
    /// Finer vehicle categories; bus and service lanes are car-type lanes
    /// without `PASSENGER_CAR`.
    VehicleCategory(u64) {
        PASSENGER_CAR = 0,
        BUS = 1,
        TAXI = 2,
        CARGO_TRUCK = 3,
        AMBULANCE = 4,
        POLICE = 5,
        FIRE_TRUCK = 6,
        HEARSE = 7,
        GARBAGE_TRUCK = 8,
    }
}

/// One lane of a segment as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lane {
    pub lane_type: LaneType,
    pub vehicle_type: VehicleType,
    pub category: VehicleCategory,
}

impl Lane {
    /// A regular general-traffic car lane.
    pub fn car() -> Self {
        Self {
            lane_type: LaneType::VEHICLE,
            vehicle_type: VehicleType::CAR,
            category: VehicleCategory::PASSENGER_CAR,
        }
    }
    /// A dedicated bus lane (car-type, but no passenger cars).
    pub fn bus() -> Self {
        Self {
            lane_type: LaneType::VEHICLE | LaneType::TRANSPORT_VEHICLE,
            vehicle_type: VehicleType::CAR,
            category: VehicleCategory::BUS,
        }
    }
    /// Emergency / service lane.
    pub fn emergency() -> Self {
        Self {
            lane_type: LaneType::VEHICLE,
            vehicle_type: VehicleType::CAR,
            category: VehicleCategory::AMBULANCE
                | VehicleCategory::POLICE
                | VehicleCategory::FIRE_TRUCK,
        }
    }
    pub fn pedestrian() -> Self {
        Self {
            lane_type: LaneType::PEDESTRIAN,
            ..Self::default()
        }
    }
}

/// Predicate deciding which lanes count as car lanes.
/// Default: VEHICLE lane ∧ CAR type ∧ PASSENGER_CAR category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneFilter {
    pub lane_types: LaneType,
    pub vehicle_types: VehicleType,
    pub categories: VehicleCategory,
}

impl Default for LaneFilter {
    fn default() -> Self {
        Self {
            lane_types: LaneType::VEHICLE,
            vehicle_types: VehicleType::CAR,
            categories: VehicleCategory::PASSENGER_CAR,
        }
    }
}

impl LaneFilter {
    #[inline]
    pub fn matches(&self, lane: &Lane) -> bool {
        lane.lane_type.intersects(self.lane_types)
            && lane.vehicle_type.intersects(self.vehicle_types)
            && lane.category.intersects(self.categories)
    }

    /// Number of lanes in `lanes` accepted by this filter.
    pub fn count<'a>(&self, lanes: impl IntoIterator<Item = &'a Lane>) -> usize {
        lanes.into_iter().filter(|l| self.matches(l)).count()
    }

    /// True when some mask is empty, i.e. the filter can never match.
    pub fn is_degenerate(&self) -> bool {
        self.lane_types.is_empty() || self.vehicle_types.is_empty() || self.categories.is_empty()
    }
}
