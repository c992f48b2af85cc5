use crate::audio::{AudioClip, AudioError};
use std::path::Path;

/// Load a WAV file as a mono clip; multi-channel input is downmixed by
/// per-frame mean.
pub fn load_wav_clip<P: AsRef<Path>>(path: P) -> Result<AudioClip, AudioError> {
    let reader = hound::WavReader::open(path.as_ref())
        .map_err(|e| AudioError::UnreadableFile(e.to_string()))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| AudioError::InvalidPcm(e.to_string()))?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_value))
                .collect::<Result<_, _>>()
                .map_err(|e| AudioError::InvalidPcm(e.to_string()))?
        }
    };

    let mono = downmix_to_mono(&samples, spec.channels);
    AudioClip::from_samples(spec.sample_rate, mono)
}

fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(usize::from(channels))
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_stereo_takes_frame_mean() {
        let interleaved = [0.0, 1.0, -1.0, 1.0, 0.5, 0.5];
        let mono = downmix_to_mono(&interleaved, 2);
        assert_eq!(mono, vec![0.5, 0.0, 0.5]);
    }

    #[test]
    fn downmix_mono_is_identity() {
        let samples = [0.1, -0.2, 0.3];
        assert_eq!(downmix_to_mono(&samples, 1), samples.to_vec());
    }
}
