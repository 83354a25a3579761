mod utils;
mod vision;

pub mod params;

use anyhow::Context;
use nalgebra::Vector2;
use opencv::{
    core::{count_non_zero, extract_channel, Mat, Point, Vector},
    imgproc::{cvt_color_def, COLOR_BGR2GRAY},
};

use params::RecognitionParams;
use utils::draw_sample_box;

pub use vision::contours::{self, FilteredContours};
pub use vision::hue;
pub use vision::mask;
pub use vision::orientation::{RotatedSample, SampleOrientation};
pub use vision::recognition::{
    Alliance, PipelineStep, Recognition, RecognitionStatus, SampleColor,
};

/// One-shot sample recognizer: each call processes a single camera frame
/// to completion. Holds nothing but the tunable parameters, which are
/// read-only after construction.
pub struct SamplePipeline {
    params: RecognitionParams,
}

impl SamplePipeline {
    pub fn new(params: RecognitionParams) -> Self {
        Self { params }
    }

    /// Host-boundary entry point. Never fails: whatever happens inside,
    /// the host receives a well-formed (contour, annotated frame,
    /// diagnostic numbers) tuple. `llrobot[0]` selects the alliance
    /// (1 = BLUE, 2 = RED, anything else = stay idle).
    pub fn run_pipeline(&self, image: &Mat, llrobot: &[f64]) -> (Vector<Point>, Mat, Vec<f64>) {
        let selector = llrobot.first().map(|value| *value as i64).unwrap_or(0);
        let Some(alliance) = Alliance::from_selector(selector) else {
            return (
                Vector::new(),
                image.clone(),
                vec![RecognitionStatus::Idle.code()],
            );
        };

        match self.recognize(image, alliance) {
            Ok(recognition) => {
                let lloutput = match recognition.status {
                    RecognitionStatus::Success => vec![
                        recognition.status.code(),
                        recognition.color.code(),
                        recognition.robot_angle as f64,
                        recognition.center.x as f64,
                        recognition.center.y as f64,
                    ],
                    RecognitionStatus::Failure => {
                        vec![recognition.status.code(), recognition.color.code()]
                    }
                    _ => vec![recognition.status.code()],
                };

                (recognition.contour, recognition.annotated, lloutput)
            }
            Err(error) => {
                log::error!("recognition failed: {error:#}");
                let locator = error
                    .downcast_ref::<PipelineStep>()
                    .map(|step| step.0)
                    .unwrap_or(0);

                (
                    Vector::new(),
                    image.clone(),
                    vec![RecognitionStatus::AppCrash.code(), locator as f64],
                )
            }
        }
    }

    fn recognize(&self, image: &Mat, alliance: Alliance) -> anyhow::Result<Recognition> {
        log::debug!("running sample recognition for the {alliance:?} alliance");

        // The host runtime can invoke the pipeline before the camera has
        // produced real data, in which case the frame is all black.
        let mut gray = Mat::default();
        cvt_color_def(image, &mut gray, COLOR_BGR2GRAY).context(PipelineStep::GRAYSCALE)?;
        if count_non_zero(&gray).context(PipelineStep::GRAYSCALE)? == 0 {
            return Ok(Recognition::without_detection(
                RecognitionStatus::ImageNotAvailable,
                SampleColor::None,
                image,
            ));
        }

        // The neutral (yellow) sample stands out in the green channel of
        // the BGR frame, so it is found with a fixed channel threshold
        // rather than an HSV band.
        let mut green = Mat::default();
        extract_channel(image, &mut green, 1).context(PipelineStep::MASK)?;
        let sample_mask = mask::threshold_mask(&green, self.params.green_threshold_low)
            .context(PipelineStep::MASK)?;

        // The neutral class runs with half the minimum area.
        let filtered = contours::filter_by_area(
            &sample_mask,
            self.params.min_sample_area / 2.0,
            self.params.max_sample_area,
        )
        .context(PipelineStep::CONTOUR_FILTER)?;

        if filtered.largest.is_empty() {
            return Ok(Recognition::without_detection(
                RecognitionStatus::Failure,
                SampleColor::Yellow,
                image,
            ));
        }

        let sample =
            RotatedSample::from_contour(&filtered.largest).context(PipelineStep::RECT_FIT)?;
        let (orientation, robot_angle) = sample.classify();
        log::debug!("sample orientation {orientation:?}, robot angle {robot_angle}");

        let mut annotated = image.clone();
        draw_sample_box(&mut annotated, &sample.corners).context(PipelineStep::ANNOTATE)?;

        Ok(Recognition {
            status: RecognitionStatus::Success,
            color: SampleColor::Yellow,
            robot_angle,
            center: Vector2::new(sample.center.x, sample.center.y),
            contour: filtered.largest,
            annotated,
        })
    }
}
