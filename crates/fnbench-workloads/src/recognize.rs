// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 10 October 2026

use crate::{images::ImageDir, LabelTable};
use anyhow::Result;
use fnbench_core::{Call, InputCatalog, ReplyFormat, Workload};
use std::path::Path;

pub(crate) const DEFAULT_IMAGES: &[&str] = &[
    "800px-Porsche_991_silver_IAA.jpg",
    "512px-Cacatua_moluccensis_-Cincinnati_Zoo-8a.jpg",
    "800px-Sardinian_Warbler.jpg",
    "800px-7weeks_old.JPG",
    "800px-20180630_Tesla_Model_S_70D_2015_midnight_blue_left_front.jpg",
    "800px-Welsh_Springer_Spaniel.jpg",
    "800px-Jammlich_crop.jpg",
    "782px-Pumiforme.JPG",
];

/// Tag pinning a call to the snapshot-recording input.
pub const RECORD_TAG: &str = "record";
pub const RECORD_IMAGE: &str = "image.jpg";
/// Tag pinning a call to the snapshot-replay input.
pub const REPLAY_TAG: &str = "replay";
pub const REPLAY_IMAGE: &str = "animal-dog.jpg";

/// "ResNet Img Recog": rotates through a fixed image set, with the
/// `record` and `replay` tags pinned to their own images.
pub struct ImageRecognizer {
    catalog: InputCatalog,
    images: ImageDir,
    labels: LabelTable,
}

impl ImageRecognizer {
    pub fn new(dir: &Path, images: Vec<String>, labels: LabelTable) -> Result<Self> {
        let catalog = InputCatalog::new(images)?
            .with_tag(RECORD_TAG, RECORD_IMAGE)?
            .with_tag(REPLAY_TAG, REPLAY_IMAGE)?;
        let images = ImageDir::open(dir, &catalog)?;

        Ok(Self {
            catalog,
            images,
            labels,
        })
    }
}

impl Workload for ImageRecognizer {
    fn identity(&self) -> &str {
        "ResNet Img Recog"
    }

    fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    fn reply_format(&self) -> ReplyFormat {
        ReplyFormat::new("img", "pred")
    }

    fn invoke(&self, call: &Call<'_>) -> Result<String> {
        let data = self.images.read(call.input)?;
        Ok(self.labels.predict(&data).to_owned())
    }
}
