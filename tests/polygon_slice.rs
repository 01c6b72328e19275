use approx::relative_eq;
use cleave2d::math::{Point, Real};
use cleave2d::na;
use cleave2d::query::split::slice;
use cleave2d::shape::{Polygon, UvRect};
use cleave2d::utils::signed_area;

fn square(half: Real) -> Vec<Point<Real>> {
    vec![
        Point::new(-half, -half),
        Point::new(half, -half),
        Point::new(half, half),
        Point::new(-half, half),
    ]
}

fn rect_of(polygon: &Polygon) -> UvRect {
    UvRect::from_aabb(&polygon.aabb())
}

fn total_area(parts: &[Polygon]) -> Real {
    parts.iter().map(|p| p.signed_area()).sum()
}

#[test]
fn square_diagonal_cut() {
    let polygon = Polygon::new(square(1.0), Vec::new());
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-2.0, -2.0), &Point::new(2.0, 2.0), &rect);

    assert_eq!(parts.len(), 2);
    for part in &parts {
        assert_eq!(part.outer().len(), 3);
        assert!(relative_eq!(part.signed_area(), 2.0, epsilon = 1.0e-3));
    }
    assert!(relative_eq!(total_area(&parts), 4.0, epsilon = 1.0e-3));
}

#[test]
fn square_with_hole_horizontal_cut() {
    let polygon = Polygon::new(square(2.0), vec![square(1.0)]);
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-3.0, 0.0), &Point::new(3.0, 0.0), &rect);

    assert_eq!(parts.len(), 2);
    // Each half is an outer rectangle with a rectangular notch, no holes.
    for part in &parts {
        assert!(part.holes().is_empty());
        assert!(relative_eq!(part.signed_area(), 6.0, epsilon = 1.0e-2));
    }
    assert!(relative_eq!(total_area(&parts), 16.0 - 4.0, epsilon = 1.0e-2));
}

#[test]
fn annulus_offcenter_cut_keeps_hole_in_larger_part() {
    let polygon = Polygon::new(square(2.0), vec![square(0.5)]);
    let rect = rect_of(&polygon);

    // Touches only the outer ring, above the hole.
    let parts = slice(&polygon, &Point::new(-3.0, 1.2), &Point::new(3.0, 1.2), &rect);

    assert_eq!(parts.len(), 2);
    let with_hole: Vec<_> = parts.iter().filter(|p| !p.holes().is_empty()).collect();
    assert_eq!(with_hole.len(), 1);
    assert_eq!(with_hole[0].holes().len(), 1);

    // The hole went to the smaller-area containing solid, i.e. the part that
    // actually surrounds it.
    assert!(with_hole[0].contains_local_point(&Point::new(1.0, 0.0)));
    assert!(!with_hole[0].contains_local_point(&Point::new(0.0, 0.0)));

    assert!(relative_eq!(total_area(&parts), 16.0 - 1.0, epsilon = 1.0e-2));
}

#[test]
fn grid_polygon_horizontal_cut() {
    // 6x6 outer square with four 1x1 holes at the corners of a 4x4 inner frame.
    let hole_at = |cx: Real, cy: Real| {
        vec![
            Point::new(cx - 0.5, cy - 0.5),
            Point::new(cx + 0.5, cy - 0.5),
            Point::new(cx + 0.5, cy + 0.5),
            Point::new(cx - 0.5, cy + 0.5),
        ]
    };
    let polygon = Polygon::new(
        square(3.0),
        vec![
            hole_at(-2.0, -2.0),
            hole_at(2.0, -2.0),
            hole_at(2.0, 2.0),
            hole_at(-2.0, 2.0),
        ],
    );
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-4.0, 0.0), &Point::new(4.0, 0.0), &rect);

    assert_eq!(parts.len(), 2);
    for part in &parts {
        assert_eq!(part.holes().len(), 2);
        assert!(relative_eq!(part.signed_area(), 18.0 - 2.0, epsilon = 1.0e-2));
    }
}

#[test]
fn missing_cut_is_a_noop_and_input_is_unchanged() {
    let polygon = Polygon::new(square(1.0), vec![square(0.25)]);
    let before = polygon.clone();
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(9.0, -5.0), &Point::new(9.0, 5.0), &rect);

    assert!(parts.is_empty());
    assert_eq!(polygon, before);
}

#[test]
fn cut_through_concave_vertex() {
    // An L-shape with its reflex corner at (2, 2); the cut line passes
    // exactly through it.
    let polygon = Polygon::new(
        vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 4.0),
        ],
        Vec::new(),
    );
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-1.0, -1.0), &Point::new(5.0, 5.0), &rect);

    assert_eq!(parts.len(), 2);
    assert!(relative_eq!(total_area(&parts), 12.0, epsilon = 1.0e-2));

    // The reflex corner appears exactly once on each side of the seam.
    for part in &parts {
        let occurrences = part
            .outer()
            .iter()
            .filter(|p| na::distance_squared(p, &Point::new(2.0, 2.0)) < 1.0e-4)
            .count();
        assert_eq!(occurrences, 1);
    }
}

#[test]
fn tangent_cut_through_hole_vertex_opens_the_ring() {
    // A square with a diamond hole whose top vertex touches the cut line:
    // only one side of the ring is severed, leaving a single C-shaped part.
    let polygon = Polygon::new(
        square(2.0),
        vec![vec![
            Point::new(0.0, 1.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, -1.0),
            Point::new(-1.0, 0.0),
        ]],
    );
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-3.0, 1.0), &Point::new(3.0, 1.0), &rect);

    // One part only: the caller treats this as "no cut happened".
    assert_eq!(parts.len(), 1);
    assert!(relative_eq!(parts[0].signed_area(), 16.0 - 2.0, epsilon = 1.0e-2));
}

#[test]
fn area_is_conserved_across_repeated_cuts() {
    let polygon = Polygon::new(square(2.0), vec![square(0.5)]);
    let rect = rect_of(&polygon);
    let original_area = polygon.signed_area();

    let parts = slice(&polygon, &Point::new(-3.0, 0.9), &Point::new(3.0, 0.9), &rect);
    assert!(relative_eq!(total_area(&parts), original_area, epsilon = 1.0e-2));

    // Slice one of the fragments again, reusing the ancestral rectangle.
    let target = &parts[0];
    let sub = slice(target, &Point::new(0.2, -5.0), &Point::new(0.2, 5.0), &rect);
    if sub.len() >= 2 {
        assert!(relative_eq!(
            total_area(&sub),
            target.signed_area(),
            epsilon = 1.0e-2
        ));
    }
}

#[test]
fn outputs_are_winding_normalized() {
    let polygon = Polygon::new(square(2.0), vec![square(0.5)]);
    let rect = rect_of(&polygon);

    let parts = slice(&polygon, &Point::new(-3.0, 1.2), &Point::new(3.0, 1.2), &rect);

    for part in &parts {
        assert!(signed_area(part.outer()) > 0.0);
        for hole in part.holes() {
            assert!(signed_area(hole) < 0.0);
        }
    }
}
