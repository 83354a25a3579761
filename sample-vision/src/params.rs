/// An inclusive hue band with saturation and value floors, in OpenCV's
/// 8-bit HSV encoding (hue 0-180). `hue_low >= hue_high` means the band
/// wraps across the 0/180 seam.
#[derive(Debug, Clone)]
pub struct HsvBand {
    pub hue_low: i32,
    pub hue_high: i32,
    pub sat_low: i32,
    pub val_low: i32,
}

/// Tunable recognition parameters, fixed at construction. Threshold and
/// band values were derived offline from reference frames (IJThresholdTester
/// and Gimp readings of field footage).
#[derive(Debug, Clone)]
pub struct RecognitionParams {
    /// Fixed threshold applied to the green channel to pick out the
    /// neutral (yellow) sample. Negative values invert the binarization.
    pub green_threshold_low: i32,
    pub blue_band: HsvBand,
    pub red_band: HsvBand,
    pub min_sample_area: f64,
    pub max_sample_area: f64,
}

impl Default for RecognitionParams {
    fn default() -> Self {
        Self {
            green_threshold_low: 160,
            blue_band: HsvBand {
                hue_low: 110,
                hue_high: 125,
                sat_low: 50,
                val_low: 100,
            },
            red_band: HsvBand {
                hue_low: 170,
                hue_high: 5,
                sat_low: 50,
                val_low: 100,
            },
            min_sample_area: 9000.0,
            max_sample_area: 21000.0,
        }
    }
}
