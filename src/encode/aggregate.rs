//! Ordered collections.
//!
//! Every element is encoded independently. The first failing element, by index, aborts the
//! whole collection and is reported as a [`Fault::Element`].
use super::curve::encode_curve_many;
use super::*;
use rayon::prelude::*;

/// Encodes each item in order.
pub fn encode_each<T: Encode>(items: &[T], cx: &Context) -> Result<Vec<T::Output>> {
    items
        .iter()
        .enumerate()
        .map(|(i, x)| x.encode_with(cx).map_err(|e| e.at(i)))
        .collect()
}

/// [`encode_each`] over the rayon pool, reporting the same fault as the sequential form.
pub fn par_encode_each<T>(items: &[T], cx: &Context) -> Result<Vec<T::Output>>
where
    T: Encode + Sync,
    T::Output: Send,
{
    items
        .par_iter()
        .enumerate()
        .map(|(i, x)| x.encode_with(cx).map_err(|e| e.at(i)))
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// One host curve per source curve.
pub fn encode_curves(curves: &[Curve], cx: &Context) -> Result<Vec<HostCurve>> {
    encode_each(curves, cx)
}

/// The simple segments of one curve.
pub fn encode_curve_array(curve: &Curve, cx: &Context) -> Result<CurveArray> {
    encode_curve_many(curve, cx).map(CurveArray)
}

/// A [`CurveArray`] per source curve.
pub fn encode_curve_arr_array(curves: &[Curve], cx: &Context) -> Result<CurveArrArray> {
    let mut arr = CurveArrArray::default();
    for (i, c) in curves.iter().enumerate() {
        arr.append(encode_curve_array(c, cx).map_err(|e| e.at(i))?);
    }
    Ok(arr)
}

/// The simple segments of one curve as a connected loop.
///
/// Consecutive segments must meet within [`Context::short_curve_tolerance`].
pub fn encode_curve_loop(curve: &Curve, cx: &Context) -> Result<CurveLoop> {
    let curves = encode_curve_many(curve, cx)?;
    let l = CurveLoop::new(curves, cx.short_curve_tolerance)?;
    if !l.is_closed(cx.vertex_tolerance) {
        log::debug!("curve loop of {} curves is open", l.len());
    }
    Ok(l)
}

/// A [`CurveLoop`] per source curve.
pub fn encode_curve_loop_array(curves: &[Curve], cx: &Context) -> Result<Vec<CurveLoop>> {
    curves
        .iter()
        .enumerate()
        .map(|(i, c)| encode_curve_loop(c, cx).map_err(|e| e.at(i)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cx(f: f64) -> Context {
        Context::new(f).unwrap()
    }

    fn line(a: Point3, b: Point3) -> Curve {
        Line::new(a, b).into()
    }

    fn five_with_bad_third() -> Vec<Curve> {
        vec![
            line([0.0; 3], [1.0, 0.0, 0.0]),
            Circle::new(Plane::world_xy(), 2.0).into(),
            line([3.0; 3], [3.0; 3]),
            Arc::new(Plane::world_xy(), 0.0, Interval::new(0.0, 1.0)).into(),
            line([0.0; 3], [0.0, 0.0, 5.0]),
        ]
    }

    #[test]
    fn first_fault_aborts() {
        let curves = five_with_bad_third();
        let e = encode_curves(&curves, &cx(1.0)).unwrap_err();
        assert!(e.is_invalid_geometry());
        assert_eq!(e.index_path(), vec![2]);

        let p = par_encode_each(&curves, &cx(1.0)).unwrap_err();
        assert_eq!(p, e);
    }

    #[test]
    fn order_preserved() {
        let curves = (1..50)
            .map(|i| line([0.0; 3], [i as f64, 0.0, 0.0]))
            .collect::<Vec<_>>();
        let a = encode_curves(&curves, &cx(2.0)).unwrap();
        let b = par_encode_each(&curves, &cx(2.0)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[9].end_point(), Xyz([20.0, 0.0, 0.0]));
    }

    #[test]
    fn transforms_and_boxes() {
        let mut bad = Transform::identity();
        bad.0[3][3] = 0.0;
        let ts = [Transform::identity(), Transform::translation([1.0; 3]), bad];
        let e = encode_each(&ts, &cx(1.0)).unwrap_err();
        assert_eq!(e.index_path(), vec![2]);
        assert!(matches!(e.root(), Fault::NonAffineTransform { .. }));

        let bs = [BoundingBox::new([0.0; 3], [1.0; 3]), BoundingBox::EMPTY];
        let hs = par_encode_each(&bs, &cx(2.0)).unwrap();
        assert!(hs[0].enabled);
        assert!(!hs[1].enabled);
    }

    #[test]
    fn arr_array_one_per_curve() {
        let curves = vec![
            Curve::Polyline(Polyline3::new([[0.0; 3], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]])),
            Circle::new(Plane::world_xy(), 1.0).into(),
        ];
        let arr = encode_curve_arr_array(&curves, &cx(1.0)).unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.0[0].len(), 2);
        assert_eq!(arr.0[1].len(), 1);

        let e = encode_curve_arr_array(&five_with_bad_third(), &cx(1.0)).unwrap_err();
        assert_eq!(e.index_path(), vec![2]);
    }

    #[test]
    fn loops() {
        let rect = Curve::Polyline(Polyline3::new([
            [0.0; 3],
            [2.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0; 3],
        ]));
        let l = encode_curve_loop(&rect, &cx(1.0)).unwrap();
        assert_eq!(l.len(), 4);
        assert!(l.is_closed(1e-9));

        let slot = Curve::Composite(vec![
            line([0.0; 3], [2.0, 0.0, 0.0]),
            Arc::new(
                Plane::new([2.0, 1.0, 0.0], Vec3::X, Vec3::Y),
                1.0,
                Interval::new(-PI / 2.0, PI / 2.0),
            )
            .into(),
            line([2.0, 2.0, 0.0], [0.0, 2.0, 0.0]),
            Arc::new(
                Plane::new([0.0, 1.0, 0.0], Vec3::X, Vec3::Y),
                1.0,
                Interval::new(PI / 2.0, PI * 1.5),
            )
            .into(),
        ]);
        let loops = encode_curve_loop_array(&[rect, slot], &cx(0.5)).unwrap();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[1].len(), 4);
        assert!(loops[1].is_closed(1e-9));
    }

    #[test]
    fn loop_array_reports_index() {
        let open_gap = Curve::Composite(vec![
            line([0.0; 3], [1.0, 0.0, 0.0]),
            line([1.5, 0.0, 0.0], [2.0, 0.0, 0.0]),
        ]);
        let ok = line([0.0; 3], [1.0, 0.0, 0.0]);
        let e = encode_curve_loop_array(&[ok, open_gap], &cx(1.0)).unwrap_err();
        assert_eq!(e.index_path(), vec![1]);
        assert!(e.is_invalid_geometry());
    }
}
