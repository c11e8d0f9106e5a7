// Tests encoding of source geometry into host geometry across unit systems
use geom_encode::*;
use std::f64::consts::{FRAC_PI_2, PI, TAU};

fn mm_to_ft() -> Context {
    Context::from_units(LengthUnit::Millimeters, LengthUnit::Feet)
}

fn same(a: Xyz, b: Xyz, tol: f64) -> bool {
    a.distance_to(b) <= tol
}

fn line(a: Point3, b: Point3) -> Curve {
    Line::new(a, b).into()
}

// The only test touching the process-wide default, the default is established once.
#[test]
fn process_default_context() {
    let cx = Context::from_units(LengthUnit::Meters, LengthUnit::Feet);
    assert!(cx.install().is_ok());
    assert_eq!(Context::global(), &cx);

    // a second install is refused
    let again = Context::new(2.0).unwrap();
    assert_eq!(again.install(), Err(again));

    let f = 1.0 / 0.3048;
    let p = [1.0f64, 2.0, 3.0].encode().unwrap();
    assert!(same(p, Xyz([f, 2.0 * f, 3.0 * f]), 1e-12));

    // vectors do not pick up the default factor
    assert_eq!(Vec3([1.0, 2.0, 3.0]).encode(), Ok(Xyz([1.0, 2.0, 3.0])));

    // an explicit factor overrides the default
    assert_eq!([1.0f64, 2.0, 3.0].encode_by(1.0), Ok(Xyz([1.0, 2.0, 3.0])));
}

#[test]
fn many_factors_concurrently() {
    let handles = [1.0, 0.5, 12.0, 1.0 / 304.8]
        .into_iter()
        .map(|f| {
            std::thread::spawn(move || {
                let cx = Context::new(f).unwrap();
                let c = Curve::Circle(Circle::new(Plane::world_xy(), 1000.0));
                let r = match c.encode_with(&cx).unwrap() {
                    HostCurve::Arc(a) => a.radius,
                    x => panic!("expected arc, got {:?}", x),
                };
                (f, r)
            })
        })
        .collect::<Vec<_>>();

    for h in handles {
        let (f, r) = h.join().unwrap();
        assert!((r - 1000.0 * f).abs() <= 1e-9 * 1000.0);
    }
}

#[test]
fn identity_factor_is_relabelling() {
    let cx = Context::default();
    let p: Point3 = [0.1 + 0.2, -1e-300, 7.0 / 3.0];
    let h = p.encode_with(&cx).unwrap();
    assert_eq!(h.0.map(f64::to_bits), p.map(f64::to_bits));

    let t = Transform([
        [0.3, 0.1, 0.0, 0.7],
        [0.0, 0.9, 0.2, 1.0 / 3.0],
        [0.1, 0.0, 1.1, 0.1 + 0.2],
        [0.0, 0.0, 0.0, 1.0],
    ]);
    let h = t.encode_with(&cx).unwrap();
    assert_eq!(h.origin, Xyz([0.7, 1.0 / 3.0, 0.1 + 0.2]));
}

#[test]
fn transform_decomposition_round_trip() {
    let cx = mm_to_ft();
    let h = 0.5f64.sqrt();
    let plane = Plane::new([1000.0, -250.0, 3000.0], Vec3([h, -h, 0.0]), Vec3([h, h, 0.0]));
    let t = Transform::plane_to_plane(&Plane::world_xy(), &plane)
        .then(&Transform::translation([10.0, 0.0, -5.0]));

    let ht = t.encode_with(&cx).unwrap();
    let unscaled = t.encode_with(&Context::default()).unwrap();
    assert_eq!(ht.basis_x, unscaled.basis_x);
    assert_eq!(ht.basis_y, unscaled.basis_y);
    assert_eq!(ht.basis_z, unscaled.basis_z);

    for p in [[0.0f64; 3], [100.0, 200.0, 300.0], [-55.5, 0.25, 1e4]] {
        let host = ht.of_point(p.encode_with(&cx).unwrap());
        let source = t.apply_point(p).encode_with(&cx).unwrap();
        assert!(same(host, source, 1e-9), "{:?} != {:?}", host, source);
    }
}

#[test]
fn oriented_box_matches_world_extents() {
    let cx = mm_to_ft();
    let plane = Plane::new([500.0, 500.0, 0.0], Vec3([0.0, 1.0, 0.0]), Vec3([0.0, 0.0, 1.0]));
    let b = Box3::new(
        plane,
        Interval::new(0.0, 1200.0),
        Interval::new(-300.0, 300.0),
        Interval::new(50.0, 0.0),
    );
    let hb = b.encode_with(&cx).unwrap();
    assert!(hb.enabled);

    for (host, source) in hb.corners().into_iter().zip(b.corners()) {
        let source = source.encode_with(&cx).unwrap();
        assert!(same(host, source, 1e-9 * cx.factor.max(1.0)));
    }
}

#[test]
fn bounding_box_max_from_max() {
    let b = BoundingBox::from_iter([[10.0, 20.0, 30.0], [-10.0, 0.0, 35.0]]);
    let h = b.encode_with(&mm_to_ft()).unwrap();
    assert_ne!(h.max, h.min);
    assert!(h.min.0.into_iter().zip(h.max.0).all(|(a, b)| a < b));
    assert!(h.enabled);
}

#[test]
fn five_curves_third_degenerate() {
    let curves = vec![
        line([0.0; 3], [1000.0, 0.0, 0.0]),
        line([1000.0, 0.0, 0.0], [1000.0, 1000.0, 0.0]),
        line([1000.0, 1000.0, 0.0], [1000.0, 1000.0, 0.0]),
        line([1000.0, 1000.0, 0.0], [0.0, 1000.0, 0.0]),
        line([0.0, 1000.0, 0.0], [0.0; 3]),
    ];

    for r in [
        encode_curves(&curves, &mm_to_ft()),
        par_encode_each(&curves, &mm_to_ft()),
    ] {
        let e = r.unwrap_err();
        assert!(e.is_invalid_geometry());
        assert_eq!(e.index_path(), vec![2]);
        assert_eq!(
            e.to_string().split(':').next(),
            Some("element 2"),
            "{}",
            e
        );
    }
}

#[test]
fn room_outline_loop() {
    // a 6m x 4m room with a rounded corner, authored in millimeters
    let outline = Curve::Composite(vec![
        Curve::Polyline(Polyline3::new([
            [0.0, 0.0, 0.0],
            [5000.0, 0.0, 0.0],
            [5000.0, 0.2, 0.0], // sliver removed by the pre-pass
            [6000.0, 0.0, 0.0],
            [6000.0, 3000.0, 0.0],
        ])),
        Arc::new(
            Plane::new([5000.0, 3000.0, 0.0], Vec3::X, Vec3::Y),
            1000.0,
            Interval::new(0.0, FRAC_PI_2),
        )
        .into(),
        line([5000.0, 4000.0, 0.0], [0.0, 4000.0, 0.0]),
        line([0.0, 4000.0, 0.0], [0.0; 3]),
    ]);

    let cx = mm_to_ft();
    let l = encode_curve_loop(&outline, &cx).unwrap();
    assert_eq!(l.len(), 6);
    assert!(l.is_closed(cx.vertex_tolerance));

    match &l.curves()[3] {
        HostCurve::Arc(a) => {
            assert!((a.radius - 1000.0 * cx.factor).abs() < 1e-9);
            assert!((a.end_angle - FRAC_PI_2).abs() < 1e-9);
        }
        x => panic!("expected arc, got {:?}", x),
    }

    let arr = encode_curve_arr_array(&[outline.clone(), line([0.0; 3], [100.0, 100.0, 100.0])], &cx);
    let arr = arr.unwrap();
    assert_eq!(arr.0[0].len(), 6);
    assert_eq!(arr.0[1].len(), 1);

    let loops = encode_curve_loop_array(&[outline], &cx).unwrap();
    assert_eq!(loops[0], l);
}

#[test]
fn mixed_curve_kinds() {
    let cx = Context::new(2.0).unwrap();
    let h = 0.5f64.sqrt();
    let curves = vec![
        Curve::Ellipse(Ellipse::with_interval(
            Plane::world_xy(),
            3.0,
            1.0,
            Interval::new(0.0, PI),
        )),
        Curve::Arc(Arc::new(Plane::world_xy(), 1.0, Interval::new(0.0, TAU))),
        Curve::Nurbs(
            NurbsCurve::new(
                2,
                vec![[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
                vec![1.0, h, 1.0],
                clamped_knots(2, 3),
            )
            .unwrap(),
        ),
    ];

    let hs = encode_curves(&curves, &cx).unwrap();
    assert!(matches!(hs[0], HostCurve::Ellipse(_)));
    assert!(matches!(hs[1], HostCurve::Arc(ref a) if a.is_closed()));
    match &hs[2] {
        HostCurve::Nurbs(n) => {
            assert!(n.is_rational());
            assert!((n.point_at(0.3).length() - 2.0).abs() < 1e-9);
        }
        x => panic!("expected nurbs, got {:?}", x),
    }

    assert!(same(hs[0].end_point(), Xyz([-6.0, 0.0, 0.0]), 1e-9));
}

#[test]
fn overflow_is_reported() {
    let cx = Context::new(1e10).unwrap();
    let l = Line::new([0.0; 3], [f64::MAX / 1e5, 0.0, 0.0]);
    match encode_line(&l, &cx) {
        Err(Fault::NumericOverflow { factor, .. }) => assert_eq!(factor, 1e10),
        x => panic!("expected overflow, got {:?}", x),
    }
}

#[test]
fn polyline_to_host_polyline() {
    let p = Polyline3::new([[0.0; 3], [0.0; 3], [304.8, 0.0, 0.0]]);
    let h = encode_polyline_points(&p, &mm_to_ft()).unwrap();
    assert_eq!(h.0.len(), 3);
    assert!(same(h.0[2], Xyz([1.0, 0.0, 0.0]), 1e-12));

    let uv = [304.8f32, 609.6].encode_with(&mm_to_ft()).unwrap();
    assert!((uv.u() - 1.0).abs() < 1e-6);
    assert!((uv.v() - 2.0).abs() < 1e-6);
}
