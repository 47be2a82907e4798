//! Shape generation for 2D primitives
//!
//! Everything tessellates into a plain triangle list in local coordinates;
//! `DrawList` applies the current transform when shapes are pushed.

use glam::Vec2;
use std::f32::consts::{PI, TAU};

use super::vertex::Vertex;

/// Point on an axis-aligned ellipse
#[inline]
fn on_ellipse(center: Vec2, radii: Vec2, theta: f32) -> Vec2 {
    center + Vec2::new(radii.x * theta.cos(), radii.y * theta.sin())
}

/// Push a quad as two triangles (corners in winding order)
fn quad(out: &mut Vec<Vertex>, corners: [Vec2; 4], colors: [[f32; 4]; 4]) {
    for i in [0, 1, 2, 2, 1, 3] {
        out.push(Vertex::new(corners[i].x, corners[i].y, colors[i]));
    }
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// Generate vertices for a filled ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let p1 = on_ellipse(center, radii, theta1);
        let p2 = on_ellipse(center, radii, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    ellipse_outline(
        center,
        Vec2::splat((inner_radius + outer_radius) * 0.5),
        outer_radius - inner_radius,
        color,
        segments,
    )
}

/// Stroke around an ellipse, `width` straddling the outline
pub fn ellipse_outline(
    center: Vec2,
    radii: Vec2,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let half = width * 0.5;
    let inner_r = (radii - Vec2::splat(half)).max(Vec2::ZERO);
    let outer_r = radii + Vec2::splat(half);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        quad(
            &mut vertices,
            [
                on_ellipse(center, inner_r, theta1),
                on_ellipse(center, outer_r, theta1),
                on_ellipse(center, inner_r, theta2),
                on_ellipse(center, outer_r, theta2),
            ],
            [color; 4],
        );
    }

    vertices
}

/// Ellipse filled with a radial gradient.
///
/// `stops` are `(t, color)` pairs with `t` running from the center (0) to the
/// rim (1), in ascending order. The area inside the first stop takes its color.
pub fn radial_ellipse(
    center: Vec2,
    radii: Vec2,
    stops: &[(f32, [f32; 4])],
    segments: u32,
) -> Vec<Vertex> {
    let Some(&(first_t, first_color)) = stops.first() else {
        return Vec::new();
    };
    let segments = segments.max(3);
    let mut vertices = ellipse(center, radii * first_t, first_color, segments);

    for pair in stops.windows(2) {
        let (t_in, c_in) = pair[0];
        let (t_out, c_out) = pair[1];
        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * TAU;
            let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
            quad(
                &mut vertices,
                [
                    on_ellipse(center, radii * t_in, theta1),
                    on_ellipse(center, radii * t_out, theta1),
                    on_ellipse(center, radii * t_in, theta2),
                    on_ellipse(center, radii * t_out, theta2),
                ],
                [c_in, c_out, c_in, c_out],
            );
        }
    }

    vertices
}

/// Axis-aligned rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vertical_gradient(min, size, color, color)
}

/// Rectangle shaded from `top` to `bottom`
pub fn vertical_gradient(min: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    let mut vertices = Vec::with_capacity(6);
    quad(
        &mut vertices,
        [
            min,
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            max,
        ],
        [top, top, bottom, bottom],
    );
    vertices
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Outline of a rounded rectangle, clockwise from the top-left corner.
/// The radius is clamped to half the shorter side.
fn rounded_outline(min: Vec2, size: Vec2, radius: f32, corner_segments: u32) -> Vec<Vec2> {
    let r = radius.min(size.x * 0.5).min(size.y * 0.5).max(0.0);
    let max = min + size;
    let corners = [
        (Vec2::new(min.x + r, min.y + r), PI),
        (Vec2::new(max.x - r, min.y + r), PI * 1.5),
        (Vec2::new(max.x - r, max.y - r), 0.0),
        (Vec2::new(min.x + r, max.y - r), PI * 0.5),
    ];

    let mut points = Vec::with_capacity(corners.len() * (corner_segments as usize + 1));
    for (center, start) in corners {
        points.extend(arc_points(center, r, start, start + PI * 0.5, corner_segments));
    }
    points
}

/// Rounded rectangle whose color is computed per vertex
pub fn rounded_rect_shaded(
    min: Vec2,
    size: Vec2,
    radius: f32,
    corner_segments: u32,
    shade: impl Fn(Vec2) -> [f32; 4],
) -> Vec<Vertex> {
    let outline = rounded_outline(min, size, radius, corner_segments.max(1));
    let center = min + size * 0.5;
    let center_color = shade(center);
    let mut vertices = Vec::with_capacity(outline.len() * 3);

    for (i, p1) in outline.iter().enumerate() {
        let p2 = outline[(i + 1) % outline.len()];
        vertices.push(Vertex::new(center.x, center.y, center_color));
        vertices.push(Vertex::new(p1.x, p1.y, shade(*p1)));
        vertices.push(Vertex::new(p2.x, p2.y, shade(p2)));
    }

    vertices
}

pub fn rounded_rect(
    min: Vec2,
    size: Vec2,
    radius: f32,
    color: [f32; 4],
    corner_segments: u32,
) -> Vec<Vertex> {
    rounded_rect_shaded(min, size, radius, corner_segments, |_| color)
}

/// Points along a circular arc, angles in radians (y axis points down)
pub fn arc_points(center: Vec2, radius: f32, start: f32, end: f32, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let theta = start + (end - start) * (i as f32 / segments as f32);
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}

/// Points along a quadratic Bezier curve
pub fn quad_curve(from: Vec2, control: Vec2, to: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}

/// Thick polyline with round caps and joins
pub fn stroke(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let half = width * 0.5;
    let mut vertices = Vec::with_capacity(points.len() * 30);

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dir = (b - a).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x) * half;
        quad(
            &mut vertices,
            [a + perp, a - perp, b + perp, b - perp],
            [color; 4],
        );
    }
    for p in points {
        vertices.extend(circle(*p, half, color, 8));
    }

    vertices
}

/// Straight stroke between two points
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    stroke(&[from, to], width, color)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    fn bounds(vertices: &[Vertex]) -> (Vec2, Vec2) {
        vertices.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_circle_is_triangle_list() {
        let verts = circle(Vec2::ZERO, 10.0, RED, 16);
        assert_eq!(verts.len(), 16 * 3);
    }

    #[test]
    fn test_ellipse_bounds() {
        let (lo, hi) = bounds(&ellipse(Vec2::new(5.0, 5.0), Vec2::new(20.0, 10.0), RED, 32));
        assert!((lo - Vec2::new(-15.0, -5.0)).length() < 1e-3);
        assert!((hi - Vec2::new(25.0, 15.0)).length() < 1e-3);
    }

    #[test]
    fn test_capsule_radius_clamped() {
        // 80 wide with radius 40: the sides are fully round
        let verts = rounded_rect(Vec2::new(-40.0, -90.0), Vec2::new(80.0, 100.0), 60.0, RED, 8);
        let (lo, hi) = bounds(&verts);
        assert!((lo - Vec2::new(-40.0, -90.0)).length() < 1e-3);
        assert!((hi - Vec2::new(40.0, 10.0)).length() < 1e-3);
    }

    #[test]
    fn test_vertical_gradient_colors() {
        let top = [1.0, 1.0, 1.0, 1.0];
        let verts = vertical_gradient(Vec2::ZERO, Vec2::new(10.0, 20.0), top, RED);
        for v in &verts {
            let expected = if v.position[1] == 0.0 { top } else { RED };
            assert_eq!(v.color, expected);
        }
    }

    #[test]
    fn test_quad_curve_endpoints() {
        let pts = quad_curve(Vec2::new(-6.0, 0.0), Vec2::new(0.0, -3.0), Vec2::new(6.0, 0.0), 8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], Vec2::new(-6.0, 0.0));
        assert_eq!(pts[8], Vec2::new(6.0, 0.0));
        // Midpoint is halfway to the control point
        assert!((pts[4] - Vec2::new(0.0, -1.5)).length() < 1e-5);
    }

    #[test]
    fn test_radial_stops_fade_outward() {
        let stops = [
            (0.2, [1.0, 1.0, 1.0, 0.6]),
            (0.6, [1.0, 1.0, 1.0, 0.2]),
            (1.0, [1.0, 1.0, 1.0, 0.0]),
        ];
        let verts = radial_ellipse(Vec2::ZERO, Vec2::new(200.0, 60.0), &stops, 16);
        let (lo, hi) = bounds(&verts);
        assert!((hi.x - 200.0).abs() < 1e-3 && (lo.y + 60.0).abs() < 1e-3);
        // Rim vertices are fully transparent
        for v in verts.iter().filter(|v| {
            let p = Vec2::from(v.position);
            (p.x / 200.0).powi(2) + (p.y / 60.0).powi(2) > 0.99
        }) {
            assert_eq!(v.color[3], 0.0);
        }
    }

    #[test]
    fn test_empty_stroke() {
        assert!(stroke(&[], 3.0, RED).is_empty());
    }
}
