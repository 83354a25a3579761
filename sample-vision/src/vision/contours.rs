use opencv::{
    core::{no_array, Mat, Point, Scalar, Vector, CV_8UC1},
    imgproc::{
        contour_area_def, draw_contours, find_contours_def, CHAIN_APPROX_SIMPLE, FILLED, LINE_8,
        RETR_EXTERNAL,
    },
    prelude::*,
};

/// Outcome of area-filtering the foreground blobs of a mask. The rejection
/// counts are kept so threshold tuning can see what was discarded.
pub struct FilteredContours {
    pub total: usize,
    pub below_min: usize,
    pub above_max: usize,
    /// Largest surviving contour; empty when nothing survived.
    pub largest: Vector<Point>,
    /// Fresh mask of the same dimensions containing only the survivors,
    /// filled white on black.
    pub mask: Mat,
}

/// Extracts all outer contours from a binary mask and keeps those whose
/// enclosed area lies inside [min_area, max_area], both bounds inclusive.
pub fn filter_by_area(mask: &Mat, min_area: f64, max_area: f64) -> anyhow::Result<FilteredContours> {
    let mut contours: Vector<Vector<Point>> = Vector::new();
    find_contours_def(mask, &mut contours, RETR_EXTERNAL, CHAIN_APPROX_SIMPLE)?;

    let size = mask.size()?;
    let mut filtered_mask =
        Mat::new_rows_cols_with_default(size.height, size.width, CV_8UC1, Scalar::all(0.0))?;

    let mut below_min = 0;
    let mut above_max = 0;
    let mut largest: Vector<Point> = Vector::new();
    let mut largest_area = -1.0;

    for (index, contour) in contours.iter().enumerate() {
        let area = contour_area_def(&contour)?;
        if area < min_area {
            below_min += 1;
            continue;
        }
        if area > max_area {
            above_max += 1;
            continue;
        }

        draw_contours(
            &mut filtered_mask,
            &contours,
            index as i32,
            Scalar::all(255.0),
            FILLED,
            LINE_8,
            &no_array(),
            i32::MAX,
            Point::new(0, 0),
        )?;

        if area > largest_area {
            largest_area = area;
            largest = contour;
        }
    }

    log::debug!(
        "{} contours: {} below min area, {} above max area, {} kept",
        contours.len(),
        below_min,
        above_max,
        contours.len() - below_min - above_max
    );

    Ok(FilteredContours {
        total: contours.len(),
        below_min,
        above_max,
        largest,
        mask: filtered_mask,
    })
}
