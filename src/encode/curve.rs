//! Curves.
//!
//! Dispatch is over [`Curve`]'s variants. Kinds without a direct mapping go through their
//! NURBS form, and a NURBS that is geometrically a line is encoded as one.
use super::*;
use std::f64::consts::TAU;

pub fn encode_line(line: &Line, cx: &Context) -> Result<HostLine> {
    HostLine::bound(
        xyz(line.from, cx)?,
        xyz(line.to, cx)?,
        cx.short_curve_tolerance,
    )
}

/// Segments a polyline into bound lines, `max(0, N - 1)` of them.
///
/// When [`Context::delete_short_segments`] is set, vertices within the short curve tolerance
/// of the previous one are removed first, the comparison happening in source units.
/// A faulting segment is reported by the source index of its start vertex.
pub fn encode_lines(polyline: &Polyline3, cx: &Context) -> Result<Vec<HostLine>> {
    let pts = polyline.pts();
    let kept = if cx.delete_short_segments {
        let kept = polyline.retained_vertices(cx.source_short_curve_tolerance());
        if kept.len() < pts.len() {
            log::debug!("removed {} short polyline vertices", pts.len() - kept.len());
        }
        kept
    } else {
        (0..pts.len()).collect()
    };

    let mut lines = Vec::with_capacity(kept.len().saturating_sub(1));
    let mut kept = kept.into_iter();
    let Some(mut i) = kept.next() else {
        return Ok(lines);
    };

    let mut start = xyz(pts[i], cx).map_err(|e| e.at(i))?;
    for j in kept {
        let end = xyz(pts[j], cx).map_err(|e| e.at(i))?;
        let line = HostLine::bound(start, end, cx.short_curve_tolerance).map_err(|e| e.at(i))?;
        lines.push(line);
        start = end;
        i = j;
    }

    Ok(lines)
}

/// The polyline's vertices as a host polyline, without segmenting.
pub fn encode_polyline_points(polyline: &Polyline3, cx: &Context) -> Result<HostPolyLine> {
    polyline
        .pts()
        .iter()
        .map(|p| xyz(*p, cx))
        .collect::<Result<_>>()
        .map(HostPolyLine)
}

/// Full circles are rebuilt from their plane and radius, partial arcs from their start, end,
/// and mid points.
pub fn encode_arc(arc: &Arc, cx: &Context) -> Result<HostArc> {
    check_radius(arc.radius, "arc")?;
    orthonormal(&arc.plane)?;
    if arc.is_circle(cx.angle_tolerance) {
        return circle(&arc.plane, arc.radius, cx);
    }
    if arc.angle.length().abs() <= cx.angle_tolerance {
        return Err(Fault::invalid(format!(
            "arc sweeps no angle, {:?}",
            arc.angle
        )));
    }

    HostArc::through(
        xyz(arc.start(), cx)?,
        xyz(arc.end(), cx)?,
        xyz(arc.mid(), cx)?,
        cx.short_curve_tolerance,
    )
}

pub fn encode_circle(c: &Circle, cx: &Context) -> Result<HostArc> {
    check_radius(c.radius, "circle")?;
    circle(&c.plane, c.radius, cx)
}

fn circle(plane: &Plane, radius: f64, cx: &Context) -> Result<HostArc> {
    HostArc::on_plane(
        &plane.encode_with(cx)?,
        scale(radius, cx.factor)?,
        0.0,
        TAU,
        cx.short_curve_tolerance,
    )
}

fn check_radius(radius: f64, what: &str) -> Result<()> {
    if radius > 0.0 {
        Ok(())
    } else {
        Err(Fault::invalid(format!("{} radius {} is not positive", what, radius)))
    }
}

/// The angle interval is carried unscaled; ellipses with equal radii become arcs.
pub fn encode_ellipse(e: &Ellipse, cx: &Context) -> Result<HostCurve> {
    if !(e.radius1 > 0.0 && e.radius2 > 0.0) {
        return Err(Fault::invalid(format!(
            "ellipse radii {} and {} must be positive",
            e.radius1, e.radius2
        )));
    }
    let Interval { t0, t1 } = e.angle;
    if !(t1 > t0) || t1 - t0 > TAU + cx.angle_tolerance {
        return Err(Fault::invalid(format!(
            "ellipse interval [{}, {}] must be increasing and at most a full turn",
            t0, t1
        )));
    }

    let plane = e.plane.encode_with(cx)?;
    let rx = scale(e.radius1, cx.factor)?;
    let ry = scale(e.radius2, cx.factor)?;

    if e.radius1 == e.radius2 {
        return HostArc::on_plane(&plane, rx, t0, t1, cx.short_curve_tolerance).map(HostCurve::Arc);
    }

    if rx.min(ry) <= cx.short_curve_tolerance {
        return Err(Fault::invalid(format!("ellipse radii {} and {} are too small", rx, ry)));
    }

    Ok(HostCurve::Ellipse(HostEllipse {
        center: plane.origin,
        radius_x: rx,
        radius_y: ry,
        x_dir: plane.x_vec,
        y_dir: plane.y_vec,
        start_param: t0,
        end_param: t1,
    }))
}

/// Control points scale, weights and knots are copied.
///
/// A degree 1 curve with two control points is a line. A curve whose control polygon is
/// within the short curve tolerance once scaled is degenerate.
pub fn encode_nurbs(n: &NurbsCurve, cx: &Context) -> Result<HostCurve> {
    if n.degree() == 1 && n.points().len() == 2 {
        log::debug!("encoding two point degree 1 nurbs as a line");
        let line = Line::new(n.points()[0], n.points()[1]);
        return encode_line(&line, cx).map(HostCurve::Line);
    }

    let control_points = n
        .points()
        .iter()
        .map(|p| xyz(*p, cx))
        .collect::<Result<Vec<_>>>()?;

    let polygon = control_points
        .windows(2)
        .map(|w| w[0].distance_to(w[1]))
        .sum::<f64>();
    if !(polygon > cx.short_curve_tolerance) {
        return Err(Fault::invalid(format!(
            "nurbs control polygon is too short ({})",
            polygon
        )));
    }

    HostNurbs::new(
        n.degree(),
        control_points,
        n.weights().to_vec(),
        n.knots().to_vec(),
    )
    .map(HostCurve::Nurbs)
}

/// Encodes each segment, flattening nested composites.
///
/// Consecutive source segments must share endpoints within the short curve tolerance.
pub fn encode_composite(segments: &[Curve], cx: &Context) -> Result<HostCurve> {
    check_connected(segments, cx)?;

    let mut out = Vec::with_capacity(segments.len());
    for (i, seg) in segments.iter().enumerate() {
        match seg.encode_with(cx).map_err(|e| e.at(i))? {
            HostCurve::Composite(inner) => out.extend(inner),
            x => out.push(x),
        }
    }

    Ok(single_or_composite(out))
}

fn check_connected(segments: &[Curve], cx: &Context) -> Result<()> {
    if segments.is_empty() {
        return Err(Fault::invalid("composite curve has no segments"));
    }

    let tol = cx.source_short_curve_tolerance();
    for (i, w) in segments.windows(2).enumerate() {
        let (Some((_, end)), Some((start, _))) = (w[0].endpoints(), w[1].endpoints()) else {
            // unsupported segments fault when encoded
            continue;
        };
        let gap = dist(end, start);
        if gap > tol {
            return Err(Fault::invalid(format!(
                "composite segments {} and {} are {} apart",
                i,
                i + 1,
                gap
            )));
        }
    }
    Ok(())
}

fn single_or_composite(mut curves: Vec<HostCurve>) -> HostCurve {
    if curves.len() == 1 {
        curves.remove(0)
    } else {
        HostCurve::Composite(curves)
    }
}

fn encode_other(x: &dyn NurbsForm, cx: &Context) -> Result<HostCurve> {
    let kind = x.kind();
    let Some(n) = x.to_nurbs() else {
        log::warn!("{} has no nurbs form", kind);
        return Err(Fault::UnsupportedVariant(kind));
    };
    log::debug!("encoding {} through its nurbs form", kind);
    encode_nurbs(&n, cx)
}

impl Encode for Curve {
    type Output = HostCurve;
    fn encode_with(&self, cx: &Context) -> Result<HostCurve> {
        match self {
            Curve::Line(x) => encode_line(x, cx).map(HostCurve::Line),
            Curve::Polyline(x) => {
                let lines = encode_lines(x, cx)?;
                if lines.is_empty() {
                    return Err(Fault::invalid(format!(
                        "polyline with {} vertices has no segments",
                        x.len()
                    )));
                }
                Ok(single_or_composite(
                    lines.into_iter().map(HostCurve::Line).collect(),
                ))
            }
            Curve::Arc(x) => encode_arc(x, cx).map(HostCurve::Arc),
            Curve::Circle(x) => encode_circle(x, cx).map(HostCurve::Arc),
            Curve::Ellipse(x) => encode_ellipse(x, cx),
            Curve::Nurbs(x) => encode_nurbs(x, cx),
            Curve::Composite(x) => encode_composite(x, cx),
            Curve::Other(x) => encode_other(x.as_ref(), cx),
        }
    }
}

impl Encode for Line {
    type Output = HostLine;
    fn encode_with(&self, cx: &Context) -> Result<HostLine> {
        encode_line(self, cx)
    }
}

impl Encode for Arc {
    type Output = HostArc;
    fn encode_with(&self, cx: &Context) -> Result<HostArc> {
        encode_arc(self, cx)
    }
}

impl Encode for Circle {
    type Output = HostArc;
    fn encode_with(&self, cx: &Context) -> Result<HostArc> {
        encode_circle(self, cx)
    }
}

impl Encode for Ellipse {
    type Output = HostCurve;
    fn encode_with(&self, cx: &Context) -> Result<HostCurve> {
        encode_ellipse(self, cx)
    }
}

impl Encode for NurbsCurve {
    type Output = HostCurve;
    fn encode_with(&self, cx: &Context) -> Result<HostCurve> {
        encode_nurbs(self, cx)
    }
}

/// Polylines encode as their segments, see [`encode_lines`].
impl Encode for Polyline3 {
    type Output = Vec<HostLine>;
    fn encode_with(&self, cx: &Context) -> Result<Vec<HostLine>> {
        encode_lines(self, cx)
    }
}

/// Encodes a curve as simple segments, exploding polylines and composites.
pub fn encode_curve_many(curve: &Curve, cx: &Context) -> Result<Vec<HostCurve>> {
    match curve {
        Curve::Polyline(x) => Ok(encode_lines(x, cx)?
            .into_iter()
            .map(HostCurve::Line)
            .collect()),
        Curve::Composite(segs) => {
            check_connected(segs, cx)?;
            let mut out = Vec::with_capacity(segs.len());
            for (i, seg) in segs.iter().enumerate() {
                out.extend(encode_curve_many(seg, cx).map_err(|e| e.at(i))?);
            }
            Ok(out)
        }
        x => x.encode_with(cx).map(|c| c.segments().to_vec()),
    }
}
