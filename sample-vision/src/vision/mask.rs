use anyhow::bail;
use opencv::{
    core::{bitwise_or_def, in_range, Mat},
    imgproc::{threshold, THRESH_BINARY, THRESH_BINARY_INV},
};

use crate::params::HsvBand;

/// Binarizes a single-channel image by fixed threshold. The sign of
/// `threshold_low` selects the direction: non-negative keeps pixels at or
/// above the bound, negative keeps pixels at or below its magnitude.
pub fn threshold_mask(channel: &Mat, threshold_low: i32) -> anyhow::Result<Mat> {
    let mut mask = Mat::default();
    if threshold_low >= 0 {
        // THRESH_BINARY keeps strictly-greater pixels, so shift the bound
        // by one to keep a pixel sitting exactly on it.
        threshold(
            channel,
            &mut mask,
            (threshold_low - 1) as f64,
            255.0,
            THRESH_BINARY,
        )?;
    } else {
        threshold(
            channel,
            &mut mask,
            threshold_low.unsigned_abs() as f64,
            255.0,
            THRESH_BINARY_INV,
        )?;
    }

    Ok(mask)
}

/// Binarizes an HSV image by hue band with saturation and value floors.
/// Hue bounds outside [0, 180] are rejected, never clamped.
pub fn hsv_band_mask(hsv: &Mat, band: &HsvBand) -> anyhow::Result<Mat> {
    if !(0..=180).contains(&band.hue_low) || !(0..=180).contains(&band.hue_high) {
        bail!(
            "hue band out of range: low {}, high {}",
            band.hue_low,
            band.hue_high
        );
    }

    let mut mask = Mat::default();
    if band.hue_low < band.hue_high {
        in_range(
            hsv,
            &[band.hue_low as u8, band.sat_low as u8, band.val_low as u8],
            &[band.hue_high as u8, 255, 255],
            &mut mask,
        )?;
    } else {
        // Hue is circular. A band such as low 170, high 5 straddles the
        // red seam and splits into 170-180 and 0-5.
        let mut upper_band = Mat::default();
        in_range(
            hsv,
            &[band.hue_low as u8, band.sat_low as u8, band.val_low as u8],
            &[180, 255, 255],
            &mut upper_band,
        )?;

        let mut lower_band = Mat::default();
        in_range(
            hsv,
            &[0, band.sat_low as u8, band.val_low as u8],
            &[band.hue_high as u8, 255, 255],
            &mut lower_band,
        )?;

        bitwise_or_def(&upper_band, &lower_band, &mut mask)?;
    }

    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;

    use opencv::core::Vec3b;
    use opencv::prelude::*;

    fn gray_row(pixels: &[u8]) -> Mat {
        Mat::from_slice_2d(&[pixels.to_vec()]).unwrap()
    }

    fn hsv_row(pixels: &[[u8; 3]]) -> Mat {
        let row: Vec<Vec3b> = pixels.iter().map(|p| Vec3b::from(*p)).collect();
        Mat::from_slice_2d(&[row]).unwrap()
    }

    #[test]
    fn threshold_keeps_pixels_at_or_above_bound() {
        let mask = threshold_mask(&gray_row(&[100, 159, 160, 161, 255]), 160).unwrap();

        let expected = [0, 0, 255, 255, 255];
        for (col, want) in expected.iter().enumerate() {
            assert_eq!(mask.at_2d::<u8>(0, col as i32).unwrap(), want);
        }
    }

    #[test]
    fn negative_threshold_inverts_direction() {
        let mask = threshold_mask(&gray_row(&[100, 159, 160, 161, 255]), -160).unwrap();

        let expected = [255, 255, 255, 0, 0];
        for (col, want) in expected.iter().enumerate() {
            assert_eq!(mask.at_2d::<u8>(0, col as i32).unwrap(), want);
        }
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let mask = threshold_mask(&gray_row(&[0, 1, 255]), 0).unwrap();

        for col in 0..3 {
            assert_eq!(*mask.at_2d::<u8>(0, col).unwrap(), 255);
        }
    }

    #[test]
    fn single_hue_band_is_inclusive() {
        let band = HsvBand {
            hue_low: 110,
            hue_high: 125,
            sat_low: 50,
            val_low: 100,
        };
        let hsv = hsv_row(&[
            [110, 50, 100], // on every bound
            [125, 255, 255],
            [109, 255, 255], // hue below
            [126, 255, 255], // hue above
            [115, 49, 255],  // saturation below floor
            [115, 255, 99],  // value below floor
        ]);

        let mask = hsv_band_mask(&hsv, &band).unwrap();

        let expected = [255, 255, 0, 0, 0, 0];
        for (col, want) in expected.iter().enumerate() {
            assert_eq!(mask.at_2d::<u8>(0, col as i32).unwrap(), want);
        }
    }

    #[test]
    fn wrapped_hue_band_covers_both_sides_of_the_seam() {
        let band = HsvBand {
            hue_low: 170,
            hue_high: 5,
            sat_low: 50,
            val_low: 100,
        };
        let hsv = hsv_row(&[
            [0, 255, 255],
            [179, 255, 255],
            [170, 255, 255],
            [5, 255, 255],
            [100, 255, 255], // outside both halves
            [6, 255, 255],
            [169, 255, 255],
            [0, 49, 255], // in band but under the saturation floor
        ]);

        let mask = hsv_band_mask(&hsv, &band).unwrap();

        let expected = [255, 255, 255, 255, 0, 0, 0, 0];
        for (col, want) in expected.iter().enumerate() {
            assert_eq!(mask.at_2d::<u8>(0, col as i32).unwrap(), want);
        }
    }

    #[test]
    fn hue_bounds_outside_range_are_rejected() {
        let hsv = hsv_row(&[[0, 255, 255]]);

        let low = HsvBand {
            hue_low: -1,
            hue_high: 5,
            sat_low: 0,
            val_low: 0,
        };
        assert!(hsv_band_mask(&hsv, &low).is_err());

        let high = HsvBand {
            hue_low: 0,
            hue_high: 181,
            sat_low: 0,
            val_low: 0,
        };
        assert!(hsv_band_mask(&hsv, &high).is_err());
    }
}
