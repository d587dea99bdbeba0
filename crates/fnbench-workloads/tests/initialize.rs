// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 11 October 2026

use std::{path::Path, time::Duration};

use fnbench_core::Executor;
use fnbench_workloads::{WorkloadKind, WorkloadSpec};

fn write_images(dir: &Path, names: &[&str]) {
    for (idx, name) in names.iter().enumerate() {
        std::fs::write(dir.join(name), vec![idx as u8; 64 + idx]).unwrap();
    }
}

const RESNET_IMAGES: &[&str] = &[
    "800px-Porsche_991_silver_IAA.jpg",
    "512px-Cacatua_moluccensis_-Cincinnati_Zoo-8a.jpg",
    "800px-Sardinian_Warbler.jpg",
    "800px-7weeks_old.JPG",
    "800px-20180630_Tesla_Model_S_70D_2015_midnight_blue_left_front.jpg",
    "800px-Welsh_Springer_Spaniel.jpg",
    "800px-Jammlich_crop.jpg",
    "782px-Pumiforme.JPG",
];

#[test]
fn test_classifier_alternates_images() {
    let dir = tempfile::tempdir().unwrap();
    write_images(dir.path(), &["animal-dog.jpg", "image.jpg"]);

    let spec = WorkloadSpec {
        inputs_dir: dir.path().to_owned(),
        ..WorkloadSpec::new(WorkloadKind::Classify)
    };
    let executor = Executor::new(spec.initialize().unwrap());
    assert_eq!(executor.identity(), "Model Serving CNN");

    let first = executor.invoke(None).unwrap();
    let second = executor.invoke(None).unwrap();
    let third = executor.invoke(None).unwrap();

    assert_eq!(first.input, "animal-dog.jpg");
    assert_eq!(second.input, "image.jpg");
    assert_eq!(third.input, "animal-dog.jpg");
    assert_eq!(first.summary, third.summary);

    let line = executor.reply(&first);
    assert!(line.starts_with("fn: Model Serving CNN | input: animal-dog.jpg, pred: "));
    assert!(line.ends_with(" | runtime: rust"));
}

#[test]
fn test_recognizer_honours_tags() {
    let dir = tempfile::tempdir().unwrap();
    write_images(dir.path(), RESNET_IMAGES);
    write_images(dir.path(), &["image.jpg", "animal-dog.jpg"]);

    let spec = WorkloadSpec {
        inputs_dir: dir.path().to_owned(),
        ..WorkloadSpec::new(WorkloadKind::Recognize)
    };
    let executor = Executor::new(spec.initialize().unwrap());

    assert_eq!(executor.invoke(None).unwrap().input, RESNET_IMAGES[0]);
    assert_eq!(executor.invoke(Some("record")).unwrap().input, "image.jpg");
    assert_eq!(
        executor.invoke(Some("replay")).unwrap().input,
        "animal-dog.jpg"
    );
    assert_eq!(executor.invoke(Some("other")).unwrap().input, RESNET_IMAGES[1]);

    let line = executor.reply(&executor.invoke(None).unwrap());
    assert!(line.starts_with(&format!("fn: ResNet Img Recog | img: {}", RESNET_IMAGES[2])));
}

#[test]
fn test_missing_image_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    write_images(dir.path(), RESNET_IMAGES);

    // the tagged images are missing
    let spec = WorkloadSpec {
        inputs_dir: dir.path().to_owned(),
        ..WorkloadSpec::new(WorkloadKind::Recognize)
    };
    let err = spec.initialize().err().unwrap();
    assert!(err.to_string().contains("missing sample image"));
}

#[test]
fn test_empty_override_catalog_uses_defaults() {
    let spec = WorkloadSpec {
        inputs: vec![],
        delay: Duration::ZERO,
        ..WorkloadSpec::new(WorkloadKind::Sleep)
    };
    let workload = spec.initialize().unwrap();
    assert_eq!(workload.catalog().inputs().collect::<Vec<_>>(), vec!["tick"]);
}

#[test]
fn test_label_table_from_file() {
    let dir = tempfile::tempdir().unwrap();
    write_images(dir.path(), &["a.jpg"]);
    let labels = dir.path().join("imagenet_class_index.json");
    std::fs::write(&labels, r#"{"0": ["n02123045", "tabby"]}"#).unwrap();

    let spec = WorkloadSpec {
        inputs_dir: dir.path().to_owned(),
        labels: Some(labels),
        inputs: vec!["a.jpg".to_owned()],
        ..WorkloadSpec::new(WorkloadKind::Classify)
    };
    let executor = Executor::new(spec.initialize().unwrap());

    assert_eq!(executor.invoke(None).unwrap().summary, "tabby");
}

#[test]
fn test_broken_label_table_fails_initialization() {
    let dir = tempfile::tempdir().unwrap();
    write_images(dir.path(), &["a.jpg"]);
    let labels = dir.path().join("labels.json");
    std::fs::write(&labels, "not json").unwrap();

    let spec = WorkloadSpec {
        inputs_dir: dir.path().to_owned(),
        labels: Some(labels),
        inputs: vec!["a.jpg".to_owned()],
        ..WorkloadSpec::new(WorkloadKind::Classify)
    };
    assert!(spec.initialize().is_err());
}

#[test]
fn test_transcoder_writes_named_output() {
    let inputs = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    std::fs::write(inputs.path().join("clip.mp4"), vec![200u8; 10_000]).unwrap();

    let spec = WorkloadSpec {
        inputs_dir: inputs.path().to_owned(),
        inputs: vec!["clip.mp4".to_owned()],
        out_dir: out.path().to_owned(),
        ..WorkloadSpec::new(WorkloadKind::Transcode)
    };
    let executor = Executor::new(spec.initialize().unwrap());

    let inv = executor.invoke(Some("first")).unwrap();
    let expected = out.path().join("output-first");
    assert_eq!(inv.input, "clip.mp4");
    assert_eq!(inv.summary, expected.display().to_string());
    assert_eq!(std::fs::read(&expected).unwrap().len(), 10_000);

    let line = executor.reply(&inv);
    assert!(line.starts_with("fn: VideoProcess | video: clip.mp4, out: "));

    // path separators are rejected per call, the server keeps going
    assert!(executor.invoke(Some("../escape")).is_err());
    assert!(executor.invoke(None).is_ok());
    assert!(out.path().join("output-default").is_file());
}

#[test]
fn test_transcoder_needs_a_single_video() {
    let inputs = tempfile::tempdir().unwrap();
    let spec = WorkloadSpec {
        inputs_dir: inputs.path().to_owned(),
        inputs: vec!["a.mp4".to_owned(), "b.mp4".to_owned()],
        ..WorkloadSpec::new(WorkloadKind::Transcode)
    };
    assert!(spec.initialize().is_err());
}
