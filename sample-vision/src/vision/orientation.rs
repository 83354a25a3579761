use opencv::{
    core::{Mat, Point, Point2f, Vector},
    imgproc::{box_points, min_area_rect},
    prelude::*,
};

/// Discrete rotational category of a detected sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOrientation {
    Vertical,
    Horizontal,
    CounterClockwise,
    Clockwise,
}

/// A minimum-area rectangle fitted around a sample contour.
///
/// Corner 0 is the corner with the least x (least y on a tie). The angle
/// is measured clockwise from the horizontal at corner 0 to the edge from
/// corner 0 to corner 1, and lies in (0, 90]: a perfectly vertical and a
/// perfectly horizontal rectangle both report 90. `height` spans the
/// corner0-corner1 edge and `width` the corner1-corner2 edge, regardless
/// of image axes.
#[derive(Debug, Clone)]
pub struct RotatedSample {
    pub center: Point2f,
    pub width: f32,
    pub height: f32,
    pub angle: f32,
    pub corners: [Point2f; 4],
}

impl RotatedSample {
    pub fn from_contour(contour: &Vector<Point>) -> anyhow::Result<RotatedSample> {
        let rect = min_area_rect(contour)?;

        let mut corner_mat = Mat::default();
        box_points(rect, &mut corner_mat)?;

        let mut corners = [Point2f::default(); 4];
        for (index, corner) in corners.iter_mut().enumerate() {
            corner.x = *corner_mat.at_2d::<f32>(index as i32, 0)?;
            corner.y = *corner_mat.at_2d::<f32>(index as i32, 1)?;
        }

        Ok(RotatedSample {
            center: rect.center,
            width: rect.size.width,
            height: rect.size.height,
            angle: rect.angle,
            corners,
        })
    }

    /// Maps the rectangle to an orientation category and the rotation
    /// angle in the robot's convention (0 for an upright sample, positive
    /// counter-clockwise).
    pub fn classify(&self) -> (SampleOrientation, f32) {
        if self.angle == 90.0 {
            if self.height < self.width {
                (SampleOrientation::Vertical, 0.0)
            } else if self.height > self.width {
                (SampleOrientation::Horizontal, 90.0)
            } else {
                // Square at 90: treated as upright.
                (SampleOrientation::Vertical, 0.0)
            }
        } else if self.width > self.height {
            (SampleOrientation::CounterClockwise, 90.0 - self.angle)
        } else if self.width < self.height {
            (SampleOrientation::Clockwise, -self.angle)
        } else if (self.corners[1].y.round() as i32) < (self.corners[0].y.round() as i32) {
            // An angled square leaves width and height equal, so the
            // rotation direction has to come from the corner ordering.
            (SampleOrientation::CounterClockwise, 90.0 - self.angle)
        } else {
            (SampleOrientation::Clockwise, -self.angle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(angle: f32, width: f32, height: f32, corners: [(f32, f32); 4]) -> RotatedSample {
        RotatedSample {
            center: Point2f::new(0.0, 0.0),
            width,
            height,
            angle,
            corners: corners.map(|(x, y)| Point2f::new(x, y)),
        }
    }

    const ANY_CORNERS: [(f32, f32); 4] = [(0.0, 0.0); 4];

    #[test]
    fn upright_sample_is_vertical() {
        let (orientation, angle) = sample(90.0, 20.0, 10.0, ANY_CORNERS).classify();

        assert_eq!(orientation, SampleOrientation::Vertical);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn sideways_sample_is_horizontal() {
        let (orientation, angle) = sample(90.0, 10.0, 20.0, ANY_CORNERS).classify();

        assert_eq!(orientation, SampleOrientation::Horizontal);
        assert_eq!(angle, 90.0);
    }

    #[test]
    fn square_at_ninety_counts_as_vertical() {
        let (orientation, angle) = sample(90.0, 15.0, 15.0, ANY_CORNERS).classify();

        assert_eq!(orientation, SampleOrientation::Vertical);
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn wide_angled_sample_rotates_counter_clockwise() {
        let (orientation, angle) = sample(30.0, 20.0, 10.0, ANY_CORNERS).classify();

        assert_eq!(orientation, SampleOrientation::CounterClockwise);
        assert_eq!(angle, 60.0);
    }

    #[test]
    fn tall_angled_sample_rotates_clockwise() {
        let (orientation, angle) = sample(30.0, 10.0, 20.0, ANY_CORNERS).classify();

        assert_eq!(orientation, SampleOrientation::Clockwise);
        assert_eq!(angle, -30.0);
    }

    #[test]
    fn angled_square_falls_back_to_corner_ordering() {
        // Corner 1 above corner 0 in image coordinates.
        let rising = [(0.0, 10.0), (7.0, 3.0), (14.0, 10.0), (7.0, 17.0)];
        let (orientation, angle) = sample(45.0, 15.0, 15.0, rising).classify();
        assert_eq!(orientation, SampleOrientation::CounterClockwise);
        assert_eq!(angle, 45.0);

        // Corner 1 below corner 0.
        let falling = [(0.0, 10.0), (7.0, 17.0), (14.0, 10.0), (7.0, 3.0)];
        let (orientation, angle) = sample(45.0, 15.0, 15.0, falling).classify();
        assert_eq!(orientation, SampleOrientation::Clockwise);
        assert_eq!(angle, -45.0);
    }

    #[test]
    fn fits_an_axis_aligned_contour() {
        let contour: Vector<Point> = Vector::from_iter([
            Point::new(10, 20),
            Point::new(110, 20),
            Point::new(110, 70),
            Point::new(10, 70),
        ]);

        let fitted = RotatedSample::from_contour(&contour).unwrap();

        assert!((fitted.center.x - 60.0).abs() < 1.0);
        assert!((fitted.center.y - 45.0).abs() < 1.0);
        assert_eq!(fitted.angle, 90.0);

        let mut sides = [fitted.width, fitted.height];
        sides.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((sides[0] - 50.0).abs() < 2.0);
        assert!((sides[1] - 100.0).abs() < 2.0);

        // An axis-aligned fit classifies on the height/width comparison.
        let (orientation, angle) = fitted.classify();
        if fitted.height < fitted.width {
            assert_eq!((orientation, angle), (SampleOrientation::Vertical, 0.0));
        } else {
            assert_eq!((orientation, angle), (SampleOrientation::Horizontal, 90.0));
        }
    }
}
