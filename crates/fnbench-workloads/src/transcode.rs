// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 11 October 2026

use anyhow::{bail, Context, Result};
use fnbench_core::{Call, InputCatalog, ReplyFormat, Workload};
use parking_lot::Mutex;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

pub(crate) const DEFAULT_VIDEO: &str = "SampleVideo_1280x720_10mb.mp4";

/// One 1280 pixel wide RGB row.
const FRAME_BYTES: usize = 1280 * 3;

/// "VideoProcess": converts the source video to grayscale, writing the
/// result to `<out_dir>/output-<name>`.
///
/// Calls are serialized, concurrent calls with the same name would write to
/// the same file.
pub struct VideoTranscoder {
    catalog: InputCatalog,
    source: PathBuf,
    out_dir: PathBuf,
    lock: Mutex<()>,
}

impl VideoTranscoder {
    pub fn new(dir: &Path, video: String, out_dir: &Path) -> Result<Self> {
        let source = dir.join(&video);
        if !source.is_file() {
            bail!("missing source video {:?}", source);
        }

        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed creating output directory {:?}", out_dir))?;

        Ok(Self {
            catalog: InputCatalog::new([video])?,
            source,
            out_dir: out_dir.to_owned(),
            lock: Mutex::new(()),
        })
    }

    fn output_path(&self, name: Option<&str>) -> Result<PathBuf> {
        let name = name.unwrap_or("default");
        if name.contains(['/', '\\']) || name == ".." || name == "." {
            bail!("{:?} is not a valid output name", name);
        }

        Ok(self.out_dir.join(format!("output-{}", name)))
    }
}

impl Workload for VideoTranscoder {
    fn identity(&self) -> &str {
        "VideoProcess"
    }

    fn catalog(&self) -> &InputCatalog {
        &self.catalog
    }

    fn reply_format(&self) -> ReplyFormat {
        ReplyFormat::new("video", "out")
    }

    fn invoke(&self, call: &Call<'_>) -> Result<String> {
        let output = self.output_path(call.name)?;

        let _guard = self.lock.lock();
        let frames = grayscale(&self.source, &output)?;
        log::debug!("wrote {} frames to {:?}", frames, output);

        Ok(output.display().to_string())
    }
}

/// Treat the input as packed RGB rows and replace every pixel with its luma.
/// Returns the number of rows written.
fn grayscale(source: &Path, output: &Path) -> Result<usize> {
    let mut reader = BufReader::new(
        File::open(source).with_context(|| format!("failed opening video {:?}", source))?,
    );
    let mut writer = BufWriter::new(
        File::create(output).with_context(|| format!("failed creating {:?}", output))?,
    );

    let mut frame = vec![0u8; FRAME_BYTES];
    let mut frames = 0;
    loop {
        let len = read_frame(&mut reader, &mut frame)?;
        if len == 0 {
            break;
        }

        let data = &mut frame[..len];
        for px in data.chunks_exact_mut(3) {
            let luma =
                (u32::from(px[0]) * 77 + u32::from(px[1]) * 150 + u32::from(px[2]) * 29) >> 8;
            px.fill(luma as u8);
        }

        writer.write_all(data)?;
        frames += 1;
    }

    writer.flush()?;
    Ok(frames)
}

fn read_frame(reader: &mut impl Read, frame: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < frame.len() {
        match reader.read(&mut frame[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(filled)
}
