//! Unit and property tests for dn-routing.

use dn_core::{DemandPoint, Depot, DepotId, PointId};
use dn_network::DistanceMatrix;

fn depot_at_origin() -> Vec<Depot> {
    vec![Depot::new(0, 1_000.0, (0.0, 0.0))]
}

/// A, B, C with saving(A,B) > saving(A,C) > saving(B,C) from a depot at the
/// origin.
fn abc() -> Vec<DemandPoint> {
    vec![
        DemandPoint::new(1, 10.0, (1.0, 0.0)),  // A
        DemandPoint::new(2, 10.0, (1.0, 0.1)),  // B
        DemandPoint::new(3, 10.0, (1.0, -0.3)), // C
    ]
}

fn ids(points: &[DemandPoint]) -> Vec<PointId> {
    points.iter().map(|p| p.id).collect()
}

fn assert_partition(routes: &[crate::Route], points: &[DemandPoint], max_stops: usize) {
    let mut seen: Vec<PointId> = routes.iter().flat_map(|r| r.stops.iter().copied()).collect();
    seen.sort();
    let mut expected = ids(points);
    expected.sort();
    assert_eq!(seen, expected, "routes must cover every point exactly once");
    assert!(routes.iter().all(|r| !r.is_empty() && r.len() <= max_stops));
}

#[cfg(test)]
mod savings {
    use super::*;
    use crate::RouteBuilder;
    use dn_core::DnError;

    #[test]
    fn zero_max_stops_is_configuration_error() {
        assert!(matches!(RouteBuilder::new(0), Err(DnError::Configuration(_))));
    }

    #[test]
    fn savings_sorted_descending_with_expected_order() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let s = RouteBuilder::default().savings(&m, 0, &[0, 1, 2]);

        assert_eq!(s.len(), 3);
        assert_eq!((s[0].i, s[0].j), (0, 1)); // A-B
        assert_eq!((s[1].i, s[1].j), (0, 2)); // A-C
        assert_eq!((s[2].i, s[2].j), (1, 2)); // B-C
        assert!(s.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(s.iter().all(|x| x.value >= 0.0));
    }

    #[test]
    fn highest_saving_pair_merges_first() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();

        // Room for only one merge: A and B must win it.
        let routes = RouteBuilder::new(2).unwrap().build(&m, DepotId(0), &ids(&points)).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].stops, vec![PointId(1), PointId(2)]);
        assert_eq!(routes[1].stops, vec![PointId(3)]);
    }

    #[test]
    fn merge_appends_absorbed_route() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let routes = RouteBuilder::new(3).unwrap().build(&m, DepotId(0), &ids(&points)).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].stops, vec![PointId(1), PointId(2), PointId(3)]);
    }

    #[test]
    fn five_points_collapse_into_one_route() {
        let depots = depot_at_origin();
        let points: Vec<DemandPoint> = (0..5)
            .map(|k| DemandPoint::new(k, 10.0, (0.3 * k as f64 + 0.1, 0.2 * (k % 2) as f64)))
            .collect();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let routes = RouteBuilder::default().build(&m, DepotId(0), &ids(&points)).unwrap();
        assert_eq!(routes.len(), 1);
        assert_partition(&routes, &points, 10);
    }

    #[test]
    fn singletons_when_max_stops_is_one() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let routes = RouteBuilder::new(1).unwrap().build(&m, DepotId(0), &ids(&points)).unwrap();
        assert_eq!(routes.len(), 3);
        assert_partition(&routes, &points, 1);
    }

    #[test]
    fn trivial_inputs() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let b = RouteBuilder::default();
        assert!(b.build(&m, DepotId(0), &[]).unwrap().is_empty());
        let one = b.build(&m, DepotId(0), &[PointId(2)]).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].stops, vec![PointId(2)]);
    }

    #[test]
    fn unknown_or_duplicate_ids_rejected() {
        let depots = depot_at_origin();
        let points = abc();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let b = RouteBuilder::default();
        assert!(matches!(b.build(&m, DepotId(9), &ids(&points)), Err(DnError::Validation(_))));
        assert!(matches!(b.build(&m, DepotId(0), &[PointId(77)]), Err(DnError::Validation(_))));
        assert!(matches!(
            b.build(&m, DepotId(0), &[PointId(1), PointId(1)]),
            Err(DnError::Validation(_))
        ));
    }
}

#[cfg(test)]
mod sequencer {
    use super::*;
    use crate::{Route, RouteSequencer, SequencerConfig};
    use dn_core::RouteId;

    fn line() -> (Vec<Depot>, Vec<DemandPoint>) {
        let points = vec![
            DemandPoint::new(0, 1.0, (0.0, 3.0)),
            DemandPoint::new(1, 1.0, (0.0, 1.0)),
            DemandPoint::new(2, 1.0, (0.0, 4.0)),
            DemandPoint::new(3, 1.0, (0.0, 2.0)),
        ];
        (depot_at_origin(), points)
    }

    fn route(stops: &[u32]) -> Route {
        Route { id: RouteId(0), depot: DepotId(0), stops: stops.iter().map(|&s| PointId(s)).collect() }
    }

    #[test]
    fn orders_points_along_a_line() {
        let (depots, points) = line();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let out = RouteSequencer::default().sequence(&m, &route(&[0, 1, 2, 3])).unwrap();
        assert_eq!(out.stops, vec![PointId(1), PointId(3), PointId(0), PointId(2)]);
        assert_eq!(out.id, RouteId(0));
    }

    #[test]
    fn output_is_permutation_and_no_longer() {
        let (depots, points) = line();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let input = route(&[2, 0, 3, 1]);
        let out = RouteSequencer::default().sequence(&m, &input).unwrap();

        let mut a = input.stops.clone();
        let mut b = out.stops.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);

        let idx = |r: &Route| -> Vec<usize> { r.stops.iter().map(|&s| m.point_index(s).unwrap()).collect() };
        assert!(
            crate::sequencer::path_length(&m, 0, &idx(&out))
                <= crate::sequencer::path_length(&m, 0, &idx(&input)) + 1e-9
        );
    }

    #[test]
    fn short_routes_unchanged() {
        let (depots, points) = line();
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let seq = RouteSequencer::default();
        let two = route(&[2, 1]);
        assert_eq!(seq.sequence(&m, &two).unwrap(), two);
        let one = route(&[3]);
        assert_eq!(seq.sequence(&m, &one).unwrap(), one);
    }

    #[test]
    fn swap_search_fixes_greedy_trap() {
        // Nearest neighbour steps left to X, crosses to the right-hand pair,
        // then doubles back to the far-left stop.  One swap serves the right
        // side first.
        let depots = depot_at_origin();
        let points = vec![
            DemandPoint::new(0, 1.0, (0.0, -0.3)), // X: nearest, wrong side
            DemandPoint::new(1, 1.0, (0.0, 0.4)),
            DemandPoint::new(2, 1.0, (0.0, 0.5)),
            DemandPoint::new(3, 1.0, (0.0, -2.0)),
        ];
        let m = DistanceMatrix::compute(&depots, &points).unwrap();
        let greedy = RouteSequencer::new(SequencerConfig { max_iterations: 0 })
            .sequence(&m, &route(&[3, 2, 1, 0]))
            .unwrap();
        let refined = RouteSequencer::default().sequence(&m, &route(&[3, 2, 1, 0])).unwrap();

        let len = |r: &Route| -> f64 {
            let idx: Vec<usize> = r.stops.iter().map(|&s| m.point_index(s).unwrap()).collect();
            crate::sequencer::path_length(&m, 0, &idx)
        };
        assert_eq!(greedy.stops, vec![PointId(0), PointId(1), PointId(2), PointId(3)]);
        assert!(len(&refined) < len(&greedy) - 1.0);
        assert_eq!(refined.stops, vec![PointId(2), PointId(1), PointId(0), PointId(3)]);
    }
}

#[cfg(test)]
mod optimizer {
    use super::*;
    use crate::{Optimizer, OptimizerConfig};
    use dn_core::DnError;

    fn case_study() -> Optimizer {
        let depots = vec![
            Depot::new(0, 10_000.0, (-34.50, -58.50)),
            Depot::new(1, 8_000.0, (-34.70, -58.45)),
            Depot::new(2, 12_000.0, (-34.60, -58.70)),
        ];
        let points = vec![
            DemandPoint::new(0, 1_500.0, (-34.55, -58.48)),
            DemandPoint::new(1, 1_200.0, (-34.65, -58.52)),
            DemandPoint::new(2, 1_000.0, (-34.62, -58.55)),
            DemandPoint::new(3, 800.0, (-34.58, -58.60)),
            DemandPoint::new(4, 1_100.0, (-34.67, -58.65)),
        ];
        Optimizer::new(depots, points, OptimizerConfig::default()).unwrap()
    }

    #[test]
    fn configuration_errors() {
        let cfg = OptimizerConfig { max_stops_per_route: 0, ..OptimizerConfig::default() };
        let r = Optimizer::new(depot_at_origin(), abc(), cfg);
        assert!(matches!(r, Err(DnError::Configuration(_))));

        let r = Optimizer::new(depot_at_origin(), vec![], OptimizerConfig::default());
        assert!(matches!(r, Err(DnError::Configuration(_))));

        let cfg = OptimizerConfig { reference_depot: Some(DepotId(5)), ..OptimizerConfig::default() };
        assert!(matches!(Optimizer::new(depot_at_origin(), abc(), cfg), Err(DnError::Configuration(_))));
    }

    #[test]
    fn validation_errors_before_any_work() {
        let mut points = abc();
        points[0].location.lat = 123.0;
        assert!(matches!(
            Optimizer::new(depot_at_origin(), points, OptimizerConfig::default()),
            Err(DnError::Validation(_))
        ));
    }

    #[test]
    fn reference_depot_selection() {
        let opt = case_study();
        assert_eq!(opt.reference_depot().id, DepotId(0));

        let depots = opt.depots().to_vec();
        let points = opt.points().to_vec();
        let cfg = OptimizerConfig { reference_depot: Some(DepotId(2)), ..OptimizerConfig::default() };
        let opt = Optimizer::new(depots, points, cfg).unwrap();
        assert_eq!(opt.reference_depot().id, DepotId(2));
        assert!(opt.current_routes().unwrap().iter().all(|r| r.depot == DepotId(2)));
    }

    #[test]
    fn current_routes_cover_all_points() {
        let opt = case_study();
        let routes = opt.current_routes().unwrap();
        assert_partition(&routes, opt.points(), opt.max_stops());
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn coordinates_follow_stop_order() {
        let opt = case_study();
        let routes = opt.current_routes().unwrap();
        let coords = opt.route_coordinates(&routes).unwrap();
        assert_eq!(coords.len(), routes.len());
        for (route, seq) in routes.iter().zip(&coords) {
            assert_eq!(route.len(), seq.len());
            for (&stop, &pos) in route.stops.iter().zip(seq) {
                let j = opt.matrix().point_index(stop).unwrap();
                assert_eq!(opt.points()[j].location, pos);
            }
        }
        assert_eq!(opt.current_route_coordinates().unwrap(), coords);
    }

    #[test]
    fn leg_distances_sum_to_route_length() {
        let opt = case_study();
        for route in opt.current_routes().unwrap() {
            let legs = opt.leg_distances(&route).unwrap();
            assert_eq!(legs.len(), route.len());
            let total: f64 = legs.iter().sum();
            assert!((total - opt.route_length(&route).unwrap()).abs() < 1e-9);
        }
    }

    #[test]
    fn sequencing_never_lengthens_routes() {
        let opt = case_study();
        let raw = opt.build_routes().unwrap();
        let seq = opt.current_routes().unwrap();
        for (a, b) in raw.iter().zip(&seq) {
            assert!(opt.route_length(b).unwrap() <= opt.route_length(a).unwrap() + 1e-9);
        }
    }

    #[test]
    fn transportation_through_facade() {
        let opt = case_study();
        let plan = opt.solve_transportation().unwrap();
        for p in opt.points() {
            assert!(plan.received_by(p.id) >= p.demand - 1e-6);
        }
        assert_eq!(opt.network().edge_count(), 15);
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use crate::sequencer::{nearest_neighbour, path_length};
    use crate::{Route, RouteBuilder, RouteSequencer};
    use dn_core::RouteId;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn routes_partition_points_within_size_limit(
            coords in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 0..30),
            max_stops in 1usize..8,
        ) {
            let depots = depot_at_origin();
            let points: Vec<DemandPoint> = coords
                .iter()
                .enumerate()
                .map(|(k, &(lat, lon))| DemandPoint::new(k as u32, 1.0, (lat, lon)))
                .collect();
            let m = DistanceMatrix::compute(&depots, &points).unwrap();
            let routes = RouteBuilder::new(max_stops).unwrap().build(&m, DepotId(0), &ids(&points)).unwrap();

            let mut seen: Vec<PointId> = routes.iter().flat_map(|r| r.stops.iter().copied()).collect();
            seen.sort();
            prop_assert_eq!(seen, ids(&points));
            prop_assert!(routes.iter().all(|r| !r.is_empty() && r.len() <= max_stops));
        }

        #[test]
        fn sequencing_permutes_stops_and_improves_on_greedy(
            coords in prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 0..12),
        ) {
            let depots = depot_at_origin();
            let points: Vec<DemandPoint> = coords
                .iter()
                .enumerate()
                .map(|(k, &(lat, lon))| DemandPoint::new(k as u32, 1.0, (lat, lon)))
                .collect();
            let m = DistanceMatrix::compute(&depots, &points).unwrap();
            let route = Route { id: RouteId(0), depot: DepotId(0), stops: ids(&points) };

            let out = RouteSequencer::default().sequence(&m, &route).unwrap();
            prop_assert_eq!(out.id, route.id);
            prop_assert_eq!(out.depot, route.depot);

            let mut sorted = out.stops.clone();
            sorted.sort();
            prop_assert_eq!(sorted, ids(&points));

            let index = |r: &Route| -> Vec<usize> {
                r.stops.iter().map(|&id| m.point_index(id).unwrap()).collect()
            };
            if route.len() <= 2 {
                prop_assert_eq!(&out, &route);
            } else {
                let greedy = nearest_neighbour(&m, 0, &index(&route));
                prop_assert!(path_length(&m, 0, &index(&out)) <= path_length(&m, 0, &greedy) + 1e-9);
            }
        }
    }
}
