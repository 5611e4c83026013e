use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::StorageError;

/// Reads the playing time of an audio file from its container header.
///
/// Returns `Ok(None)` when the container does not report a frame count.
pub fn probe_audio_duration(path: &Path) -> Result<Option<u32>, StorageError> {
    let file = File::open(path)?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| StorageError::ProbeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let format = probed.format;
    let track = match format.default_track() {
        Some(track) => track,
        None => return Ok(None),
    };

    let params = &track.codec_params;
    let seconds = match (params.n_frames, params.time_base, params.sample_rate) {
        (Some(frames), Some(time_base), _) => time_base.calc_time(frames).seconds,
        (Some(frames), None, Some(rate)) if rate > 0 => frames / u64::from(rate),
        _ => return Ok(None),
    };

    Ok(u32::try_from(seconds).ok())
}
