// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::cmp::Ordering;

use cdtmesh::geometry::Point2;
use cdtmesh::kernel::{
    ExpansionKernel, Kernel, incircle, on_open_segment, orient2d, segments_intersect, sign_of,
};

fn ulp_up(x: f64) -> f64 {
    f64::from_bits(x.to_bits() + 1)
}

fn ulp_down(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}

#[test]
fn test_orient2d_near_collinear_grid() {
    // orient2d((12,12), (24,24), p) is exactly 12 * (py - px)
    let a = Point2::new(12.0, 12.0);
    let b = Point2::new(24.0, 24.0);
    let base = 0.5f64.to_bits();
    for i in 0..64 {
        for j in 0..64 {
            let px = f64::from_bits(base + i);
            let py = f64::from_bits(base + j);
            let expected = py.partial_cmp(&px).unwrap();
            let got = sign_of(orient2d(&a, &b, &Point2::new(px, py)));
            assert_eq!(got, expected, "p = ({px:e}, {py:e})");
        }
    }
}

#[test]
fn test_orient2d_is_antisymmetric() {
    let a = Point2::new(0.1, 0.1);
    let b = Point2::new(0.7, 0.3);
    let c = Point2::new(ulp_up(0.4), 0.2);
    let abc = sign_of(orient2d(&a, &b, &c));
    assert_eq!(sign_of(orient2d(&b, &c, &a)), abc);
    assert_eq!(sign_of(orient2d(&b, &a, &c)), abc.reverse());
}

#[test]
fn test_incircle_cocircular_integers() {
    let a = Point2::new(5.0, 0.0);
    let b = Point2::new(3.0, 4.0);
    let c = Point2::new(-4.0, 3.0);
    assert!(orient2d(&a, &b, &c) > 0.0);

    for d in [Point2::new(0.0, -5.0), Point2::new(4.0, -3.0), Point2::new(-3.0, -4.0)] {
        assert_eq!(incircle(&a, &b, &c, &d), 0.0, "{d:?} lies on the circle");
    }

    // one ulp towards the centre and one away from it
    let inside = Point2::new(0.0, ulp_down(-5.0));
    let outside = Point2::new(0.0, ulp_up(-5.0));
    assert!(inside.y > -5.0 && outside.y < -5.0);
    assert_eq!(sign_of(incircle(&a, &b, &c, &inside)), Ordering::Greater);
    assert_eq!(sign_of(incircle(&a, &b, &c, &outside)), Ordering::Less);
}

#[test]
fn test_incircle_orientation_flips_sign() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    let c = Point2::new(0.0, 1.0);
    let d = Point2::new(0.4, 0.4);
    assert_eq!(ExpansionKernel::incircle_sign(&a, &b, &c, &d), Ordering::Greater);
    assert_eq!(ExpansionKernel::incircle_sign(&a, &c, &b, &d), Ordering::Less);
}

#[test]
fn test_segment_helpers() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(3.0, 3.0);
    assert!(on_open_segment(&Point2::new(1.0, 1.0), &a, &b));
    assert!(!on_open_segment(&a, &a, &b));
    assert!(!on_open_segment(&Point2::new(4.0, 4.0), &a, &b));
    assert!(!on_open_segment(&Point2::new(1.0, ulp_up(1.0)), &a, &b));

    let c = Point2::new(0.0, 3.0);
    let d = Point2::new(3.0, 0.0);
    assert!(segments_intersect(&a, &b, &c, &d));
    // touching at an endpoint counts
    assert!(segments_intersect(&a, &b, &b, &Point2::new(5.0, 1.0)));
    assert!(!segments_intersect(&a, &Point2::new(1.0, 1.0), &Point2::new(2.0, 2.0), &b));
}

#[cfg(feature = "rational")]
#[test]
fn test_expansion_matches_rational_oracle() {
    use cdtmesh::kernel::RationalKernel;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn jitter(x: f64, rng: &mut StdRng) -> f64 {
        let steps: i32 = rng.random_range(-4..=4);
        x + f64::from(steps) * f64::EPSILON * x.abs().max(1.0)
    }

    let mut rng = StdRng::seed_from_u64(0x5eed);

    // perturbations of collinear and cocircular configurations
    for _ in 0..2000 {
        let t: f64 = rng.random_range(0.1..0.9);
        let a = Point2::new(jitter(0.25, &mut rng), jitter(0.25, &mut rng));
        let b = Point2::new(jitter(0.75, &mut rng), jitter(0.75, &mut rng));
        let p = Point2::new(jitter(0.25 + 0.5 * t, &mut rng), jitter(0.25 + 0.5 * t, &mut rng));
        assert_eq!(
            ExpansionKernel::orient2d_sign(&a, &b, &p),
            RationalKernel::orient2d_sign(&a, &b, &p)
        );

        let on_circle = [(5.0, 0.0), (3.0, 4.0), (-4.0, 3.0), (0.0, -5.0)];
        let [a, b, c, d] =
            on_circle.map(|(x, y)| Point2::new(jitter(x, &mut rng), jitter(y, &mut rng)));
        assert_eq!(
            ExpansionKernel::incircle_sign(&a, &b, &c, &d),
            RationalKernel::incircle_sign(&a, &b, &c, &d)
        );
    }
}
