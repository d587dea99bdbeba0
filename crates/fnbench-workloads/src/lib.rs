/*!
Concrete function bodies for fnbench.

Each workload pairs an identity and an input catalog with one opaque
computation. The computations stand in for ML inference and video
processing: they do real I/O on the selected input and spend real time on
it, but the "prediction" is a content digest mapped into a label table.

| Kind        | Identity            | Inputs                         | Summary        |
| ----------- | ------------------- | ------------------------------ | -------------- |
| `classify`  | Model Serving CNN   | two sample images              | top label      |
| `recognize` | ResNet Img Recog    | eight sample images, tags      | top label      |
| `transcode` | VideoProcess        | one source video               | output path    |
| `sleep`     | Sleep               | configurable                   | slept duration |

A workload is built once with [`WorkloadSpec::initialize`]; this is where
label tables are read and inputs are checked, so that cost lands in the
process start-up rather than in any invocation.
*/

#![warn(rust_2018_idioms)]

use anyhow::{bail, Result};
use fnbench_core::Workload;
use std::{path::PathBuf, str::FromStr, sync::Arc, time::Duration};

mod classify;
mod images;
mod labels;
mod recognize;
mod sleep;
mod transcode;

pub use classify::ImageClassifier;
pub use labels::LabelTable;
pub use recognize::{ImageRecognizer, RECORD_TAG, REPLAY_TAG};
pub use sleep::SleepWorkload;
pub use transcode::VideoTranscoder;

/// Which workload to run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WorkloadKind {
    #[default]
    Classify,
    Recognize,
    Transcode,
    Sleep,
}

impl FromStr for WorkloadKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classify" => Ok(WorkloadKind::Classify),
            "recognize" => Ok(WorkloadKind::Recognize),
            "transcode" => Ok(WorkloadKind::Transcode),
            "sleep" => Ok(WorkloadKind::Sleep),
            _ => Err(format!("unknown workload: {}", s)),
        }
    }
}

impl std::fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkloadKind::Classify => "classify",
            WorkloadKind::Recognize => "recognize",
            WorkloadKind::Transcode => "transcode",
            WorkloadKind::Sleep => "sleep",
        };
        f.write_str(name)
    }
}

/// Everything needed to build a workload.
#[derive(Clone, Debug)]
pub struct WorkloadSpec {
    pub kind: WorkloadKind,
    /// Directory holding the images or the source video.
    pub inputs_dir: PathBuf,
    /// ImageNet class index JSON. The built-in table is used when absent.
    pub labels: Option<PathBuf>,
    /// Overrides the default catalog of the selected workload.
    pub inputs: Vec<String>,
    /// Where transcoded files are written.
    pub out_dir: PathBuf,
    /// Delay of the sleep workload.
    pub delay: Duration,
    /// Make every n-th sleep invocation fail.
    pub fail_every: Option<usize>,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            kind: WorkloadKind::default(),
            inputs_dir: PathBuf::from("."),
            labels: None,
            inputs: vec![],
            out_dir: std::env::temp_dir(),
            delay: Duration::from_millis(10),
            fail_every: None,
        }
    }
}

impl WorkloadSpec {
    pub fn new(kind: WorkloadKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Load the workload resource. Called exactly once per process, before
    /// the server binds.
    pub fn initialize(&self) -> Result<Arc<dyn Workload>> {
        let workload: Arc<dyn Workload> = match self.kind {
            WorkloadKind::Classify => {
                let labels = self.label_table()?;
                Arc::new(ImageClassifier::new(
                    &self.inputs_dir,
                    self.catalog_or(classify::DEFAULT_IMAGES),
                    labels,
                )?)
            }
            WorkloadKind::Recognize => {
                let labels = self.label_table()?;
                Arc::new(ImageRecognizer::new(
                    &self.inputs_dir,
                    self.catalog_or(recognize::DEFAULT_IMAGES),
                    labels,
                )?)
            }
            WorkloadKind::Transcode => {
                let mut videos = self.catalog_or(&[transcode::DEFAULT_VIDEO]);
                if videos.len() != 1 {
                    bail!(
                        "the transcoder takes exactly one source video, got {}",
                        videos.len()
                    );
                }
                Arc::new(VideoTranscoder::new(
                    &self.inputs_dir,
                    videos.remove(0),
                    &self.out_dir,
                )?)
            }
            WorkloadKind::Sleep => Arc::new(SleepWorkload::new(
                self.catalog_or(sleep::DEFAULT_INPUTS),
                self.delay,
                self.fail_every,
            )?),
        };

        log::info!(
            "initialized {} ({} inputs)",
            workload.identity(),
            workload.catalog().len()
        );

        Ok(workload)
    }

    fn catalog_or(&self, defaults: &[&str]) -> Vec<String> {
        if self.inputs.is_empty() {
            defaults.iter().map(|s| (*s).to_owned()).collect()
        } else {
            self.inputs.clone()
        }
    }

    fn label_table(&self) -> Result<LabelTable> {
        match &self.labels {
            Some(path) => LabelTable::load(path),
            None => Ok(LabelTable::builtin()),
        }
    }
}
