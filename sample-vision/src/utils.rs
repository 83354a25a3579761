use opencv::{
    core::{no_array, Mat, Point, Point2f, Scalar, Vector},
    imgproc::{draw_contours, LINE_8},
};

/// Draws the fitted sample rectangle onto the annotated output frame.
pub fn draw_sample_box(image: &mut Mat, corners: &[Point2f; 4]) -> anyhow::Result<()> {
    let polygon: Vector<Point> = corners
        .iter()
        .map(|corner| Point::new(corner.x.round() as i32, corner.y.round() as i32))
        .collect();
    let boxes: Vector<Vector<Point>> = Vector::from_iter([polygon]);

    draw_contours(
        image,
        &boxes,
        0,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        2,
        LINE_8,
        &no_array(),
        i32::MAX,
        Point::new(0, 0),
    )?;

    Ok(())
}
