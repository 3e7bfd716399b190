use pickleball_core::{AudioCommand, Stream};
use std::io::{self, Write};

/// Playback state of a stream, shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Stopped,
    Playing,
}

impl StreamState {
    pub fn label(self) -> &'static str {
        match self {
            StreamState::Stopped => "off",
            StreamState::Playing => "on",
        }
    }
}

/// Terminal stand-in for an audio device.
///
/// Sounds ring the bell on `out`; streams are only tracked.
pub struct AudioSink<W: Write> {
    out: W,
    menu_music: StreamState,
}

impl<W: Write> AudioSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            menu_music: StreamState::Stopped,
        }
    }

    /// Apply one frame's audio commands
    pub fn apply(&mut self, commands: &[AudioCommand]) -> io::Result<()> {
        let mut ring = false;

        for command in commands {
            match *command {
                AudioCommand::PlaySound(sound) => {
                    log::debug!("sound {:?}", sound);
                    ring = true;
                }
                AudioCommand::PlayStream(stream) => {
                    log::debug!("stream {:?} started", stream);
                    *self.state_mut(stream) = StreamState::Playing;
                }
                AudioCommand::UpdateStream(stream) => {
                    // An update for a stream that never started restarts it
                    if self.state(stream) == StreamState::Stopped {
                        log::debug!("stream {:?} resumed", stream);
                        *self.state_mut(stream) = StreamState::Playing;
                    }
                }
                AudioCommand::StopStream(stream) => {
                    log::debug!("stream {:?} stopped", stream);
                    *self.state_mut(stream) = StreamState::Stopped;
                }
            }
        }

        // Two goals in one frame still ring once
        if ring {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn state(&self, stream: Stream) -> StreamState {
        match stream {
            Stream::MenuMusic => self.menu_music,
        }
    }

    fn state_mut(&mut self, stream: Stream) -> &mut StreamState {
        match stream {
            Stream::MenuMusic => &mut self.menu_music,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickleball_core::Sound;

    #[test]
    fn test_update_resumes_stopped_stream() {
        let mut sink = AudioSink::new(Vec::new());
        sink.apply(&[AudioCommand::UpdateStream(Stream::MenuMusic)])
            .unwrap();
        assert_eq!(sink.state(Stream::MenuMusic), StreamState::Playing);
    }

    #[test]
    fn test_sound_rings_bell() {
        let mut sink = AudioSink::new(Vec::new());
        sink.apply(&[AudioCommand::PlaySound(Sound::CpuScored)])
            .unwrap();
        assert_eq!(sink.out, b"\x07");

        sink.apply(&[]).unwrap();
        assert_eq!(sink.out.len(), 1);
    }

    #[test]
    fn test_stream_lifecycle() {
        let mut sink = AudioSink::new(Vec::new());

        assert_eq!(sink.state(Stream::MenuMusic), StreamState::Stopped);

        sink.apply(&[AudioCommand::PlayStream(Stream::MenuMusic)])
            .unwrap();
        sink.apply(&[AudioCommand::UpdateStream(Stream::MenuMusic)])
            .unwrap();
        assert_eq!(sink.state(Stream::MenuMusic), StreamState::Playing);

        sink.apply(&[AudioCommand::StopStream(Stream::MenuMusic)])
            .unwrap();
        assert_eq!(sink.state(Stream::MenuMusic), StreamState::Stopped);
        assert!(sink.out.is_empty());
    }
}
