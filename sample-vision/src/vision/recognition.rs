use std::fmt;

use nalgebra::Vector2;
use opencv::core::{Mat, Point, Vector};

/// Operating alliance selected by the host for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alliance {
    Blue,
    Red,
}

impl Alliance {
    /// Decodes the host's alliance selector. 1 is BLUE and 2 is RED;
    /// anything else means the pipeline should stay idle.
    pub fn from_selector(selector: i64) -> Option<Alliance> {
        match selector {
            1 => Some(Alliance::Blue),
            2 => Some(Alliance::Red),
            _ => None,
        }
    }
}

/// Color class of a detected sample. The integer values cross the host
/// boundary and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleColor {
    Blue = 0,
    Red = 1,
    Yellow = 2,
    None = 3,
}

impl SampleColor {
    pub fn code(self) -> f64 {
        self as i32 as f64
    }
}

/// Terminal state of one recognition pass. The integer values cross the
/// host boundary and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionStatus {
    Success = 200,
    AppCrash = 300,
    Idle = 400,
    ImageNotAvailable = 450,
    Failure = 500,
}

impl RecognitionStatus {
    pub fn code(self) -> f64 {
        self as i32 as f64
    }
}

/// Numeric locator identifying the pipeline stage an unexpected error
/// escaped from. Attached as error context and recovered at the pipeline
/// boundary for the crash diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStep(pub u32);

impl PipelineStep {
    pub const GRAYSCALE: PipelineStep = PipelineStep(1);
    pub const MASK: PipelineStep = PipelineStep(2);
    pub const CONTOUR_FILTER: PipelineStep = PipelineStep(3);
    pub const RECT_FIT: PipelineStep = PipelineStep(4);
    pub const ANNOTATE: PipelineStep = PipelineStep(5);
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipeline step {}", self.0)
    }
}

/// Result record of one recognition pass. Which fields carry meaning is
/// determined by `status`.
pub struct Recognition {
    pub status: RecognitionStatus,
    pub color: SampleColor,
    pub robot_angle: f32,
    pub center: Vector2<f32>,
    pub contour: Vector<Point>,
    pub annotated: Mat,
}

impl Recognition {
    /// A terminal outcome with no detection attached: the contour is empty
    /// and the annotated frame is an untouched copy of the input.
    pub fn without_detection(
        status: RecognitionStatus,
        color: SampleColor,
        image: &Mat,
    ) -> Recognition {
        Recognition {
            status,
            color,
            robot_angle: 0.0,
            center: Vector2::zeros(),
            contour: Vector::new(),
            annotated: image.clone(),
        }
    }
}
