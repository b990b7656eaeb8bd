//! Unit tests for dn-core primitives.

#[cfg(test)]
mod ids {
    use crate::{DepotId, PointId, RouteId};

    #[test]
    fn index_roundtrip() {
        let id = PointId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(PointId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(DepotId(0) < DepotId(1));
        assert!(RouteId(100) > RouteId(99));
    }

    #[test]
    fn display() {
        assert_eq!(DepotId(7).to_string(), "DepotId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{DnError, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(-34.60, -58.45);
        assert!(p.distance_km(p) < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = GeoPoint::new(30.0, -88.0);
        let b = GeoPoint::new(31.0, -88.0);
        let d = a.distance_km(b);
        assert!((d - 111.195).abs() < 0.05, "got {d}");
    }

    #[test]
    fn symmetric() {
        let a = GeoPoint::new(-34.50, -58.50);
        let b = GeoPoint::new(-34.67, -58.65);
        assert_eq!(a.distance_km(b), b.distance_km(a));
    }

    #[test]
    fn triangle_inequality() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 1.0);
        let c = GeoPoint::new(2.0, -1.0);
        assert!(a.distance_km(c) <= a.distance_km(b) + b.distance_km(c) + 1e-9);
    }

    #[test]
    fn out_of_range_rejected() {
        let ok = GeoPoint::new(0.0, 0.0);
        assert!(matches!(
            GeoPoint::new(91.0, 0.0).try_distance_km(ok),
            Err(DnError::Validation(_))
        ));
        assert!(matches!(
            ok.try_distance_km(GeoPoint::new(0.0, -180.5)),
            Err(DnError::Validation(_))
        ));
        assert!(GeoPoint::new(f64::NAN, 0.0).validate().is_err());
        assert!(GeoPoint::new(-90.0, 180.0).validate().is_ok());
    }
}

#[cfg(test)]
mod model {
    use crate::{DemandPoint, Depot, DnError, validate_network};

    fn depots() -> Vec<Depot> {
        vec![Depot::new(0, 100.0, (0.0, 0.0)), Depot::new(1, 50.0, (1.0, 0.0))]
    }

    fn points() -> Vec<DemandPoint> {
        vec![DemandPoint::new(0, 10.0, (0.5, 0.5)), DemandPoint::new(1, 20.0, (0.2, 0.1))]
    }

    #[test]
    fn valid_batch_passes() {
        assert!(validate_network(&depots(), &points()).is_ok());
    }

    #[test]
    fn empty_lists_are_configuration_errors() {
        assert!(matches!(validate_network(&[], &points()), Err(DnError::Configuration(_))));
        assert!(matches!(validate_network(&depots(), &[]), Err(DnError::Configuration(_))));
    }

    #[test]
    fn negative_quantities_rejected() {
        let mut d = depots();
        d[1].capacity = -1.0;
        assert!(matches!(validate_network(&d, &points()), Err(DnError::Validation(_))));

        let mut p = points();
        p[0].demand = f64::INFINITY;
        assert!(matches!(validate_network(&depots(), &p), Err(DnError::Validation(_))));
    }

    #[test]
    fn one_bad_coordinate_rejects_batch() {
        let mut p = points();
        p[1].location.lon = 200.0;
        let err = validate_network(&depots(), &p).unwrap_err();
        assert!(err.to_string().contains("PointId(1)"), "{err}");
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut p = points();
        p[1].id = p[0].id;
        assert!(matches!(validate_network(&depots(), &p), Err(DnError::Validation(_))));
    }
}

#[cfg(test)]
mod time {
    use crate::{MINUTES_PER_DAY, SimClock, SimTime};

    #[test]
    fn time_arithmetic() {
        let t = SimTime(10.0);
        assert_eq!(t + 5.0, SimTime(15.0));
        assert_eq!(SimTime(15.0) - SimTime(10.0), 5.0);
        assert_eq!(SimTime(15.0).since(SimTime(2.5)), 12.5);
    }

    #[test]
    fn total_order() {
        let mut v = vec![SimTime(3.0), SimTime(0.5), SimTime(2.0)];
        v.sort();
        assert_eq!(v, vec![SimTime(0.5), SimTime(2.0), SimTime(3.0)]);
    }

    #[test]
    fn clock_only_moves_forward() {
        let mut clock = SimClock::new(MINUTES_PER_DAY);
        clock.advance_to(SimTime(100.0));
        clock.advance_to(SimTime(50.0));
        assert_eq!(clock.now, SimTime(100.0));
    }

    #[test]
    fn day_and_dhm() {
        let mut clock = SimClock::new(MINUTES_PER_DAY);
        clock.advance_to(SimTime(MINUTES_PER_DAY + 125.0));
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.elapsed_dhm(), (1, 2, 5));
    }
}

#[cfg(test)]
mod rng {
    use rand::distributions::Uniform;

    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let dist = Uniform::new(0.0f64, 1.0);
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.sample(&dist), b.sample(&dist));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let dist = Uniform::new(0.0f64, 1.0);
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(8);
        let xs: Vec<f64> = (0..8).map(|_| a.sample(&dist)).collect();
        let ys: Vec<f64> = (0..8).map(|_| b.sample(&dist)).collect();
        assert_ne!(xs, ys);
    }
}
