use itertools::Itertools;
use opencv::{
    core::{no_array, Mat, Vector},
    imgproc::calc_hist,
    prelude::*,
};

pub const HUE_BINS: usize = 180;

/// 180-bucket hue histogram of an HSV image, one bucket per hue value.
pub fn hue_histogram(hsv: &Mat) -> anyhow::Result<[i32; HUE_BINS]> {
    let images: Vector<Mat> = Vector::from_iter([hsv.clone()]);
    let channels: Vector<i32> = Vector::from_iter([0]);
    let hist_size: Vector<i32> = Vector::from_iter([HUE_BINS as i32]);
    let ranges: Vector<f32> = Vector::from_iter([0.0, 180.0]);

    let mut hist = Mat::default();
    calc_hist(
        &images,
        &channels,
        &no_array(),
        &mut hist,
        &hist_size,
        &ranges,
        false,
    )?;

    let mut buckets = [0i32; HUE_BINS];
    for (bin, bucket) in buckets.iter_mut().enumerate() {
        *bucket = *hist.at::<f32>(bin as i32)? as i32;
    }

    Ok(buckets)
}

/// Finds the hue band around the dominant bin: walk outward one bin at a
/// time in each direction, wrapping at the 0/180 seam, and stop at the
/// first bin whose count equals the histogram's global minimum. The walk
/// visits every other bin before returning to its start, so it terminates
/// within 180 steps per direction.
pub fn hue_range_around_peak(hist: &[i32; HUE_BINS], dominant_bin: usize) -> (usize, usize) {
    let min_count = hist.iter().copied().min().unwrap_or(0);
    log::debug!("minimum pixel count {min_count}");
    log::debug!(
        "bins above minimum: {}",
        hist.iter()
            .enumerate()
            .filter(|(_, &count)| count != min_count)
            .map(|(bin, count)| format!("{bin}:{count}"))
            .join(", ")
    );

    let mut hue_low = dominant_bin;
    loop {
        hue_low = if hue_low == 0 { HUE_BINS - 1 } else { hue_low - 1 };
        if hist[hue_low] == min_count {
            break;
        }
    }

    let mut hue_high = dominant_bin;
    loop {
        hue_high = if hue_high == HUE_BINS - 1 { 0 } else { hue_high + 1 };
        if hist[hue_high] == min_count {
            break;
        }
    }

    log::debug!("hue low {hue_low}, high {hue_high}");
    (hue_low, hue_high)
}
