//! Looping background music. Any failure here leaves the game silent.

use std::path::Path;

use crate::error::AudioError;

#[cfg(feature = "audio")]
pub struct Music {
    // The output stream must outlive the sink or playback stops.
    _stream: rodio::OutputStream,
    sink: rodio::Sink,
}

#[cfg(feature = "audio")]
impl Music {
    /// Opens the default output device and queues `path` on repeat, paused.
    pub fn load(path: &Path, volume: f32) -> Result<Self, AudioError> {
        use rodio::Source;
        use std::fs::File;
        use std::io::BufReader;

        if !path.exists() {
            return Err(AudioError::Missing(path.to_path_buf()));
        }
        let (stream, handle) = rodio::OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
        let sink = rodio::Sink::try_new(&handle).map_err(|e| AudioError::Output(e.to_string()))?;
        let source = rodio::Decoder::new(BufReader::new(File::open(path)?)).map_err(|e| AudioError::Decode(e.to_string()))?;
        sink.pause();
        sink.set_volume(volume);
        sink.append(source.repeat_infinite());
        Ok(Self { _stream: stream, sink })
    }

    pub fn play(&self) {
        self.sink.play();
    }
}

#[cfg(not(feature = "audio"))]
pub struct Music;

#[cfg(not(feature = "audio"))]
impl Music {
    pub fn load(path: &Path, _volume: f32) -> Result<Self, AudioError> {
        if !path.exists() {
            return Err(AudioError::Missing(path.to_path_buf()));
        }
        Err(AudioError::Unsupported)
    }

    pub fn play(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported() {
        let err = Music::load(Path::new("definitely/not/here.mp3"), 0.2).err();
        assert!(matches!(err, Some(AudioError::Missing(_))));
    }
}
