// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 10 October 2026

use crate::{images::ImageDir, LabelTable};
use anyhow::Result;
use fnbench_core::{Call, InputCatalog, ReplyFormat, Workload};
use std::path::Path;

pub(crate) const DEFAULT_IMAGES: &[&str] = &["animal-dog.jpg", "image.jpg"];

/// "Model Serving CNN": alternates between a small set of images and
/// reports the predicted label.
pub struct ImageClassifier {
    catalog: InputCatalog,
    images: ImageDir,
    labels: LabelTable,
}

impl ImageClassifier {
    pub fn new(dir: &Path, images: Vec<String>, labels: LabelTable) -> Result<Self> {
        let catalog = InputCatalog::new(images)?;
        let images = ImageDir::open(dir, &catalog)?;

        Ok(Self {
            catalog,
            images,
            labels,
        })
    }
}

impl Workload for ImageClassifier {
    fn identity(&self) -> &str {
        "Model Serving CNN"
    }

    fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    fn reply_format(&self) -> ReplyFormat {
        ReplyFormat::new("input", "pred")
    }

    fn invoke(&self, call: &Call<'_>) -> Result<String> {
        let data = self.images.read(call.input)?;
        Ok(self.labels.predict(&data).to_owned())
    }
}
