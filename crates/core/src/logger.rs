//! Transcript logging of generated messages.
//!
//! The transcript is a plain-text file a human can read and a test harness can replay. Each
//! message is wrapped in begin/end markers and its segment terminators are replaced by a
//! visible token:
//!
//! ```text
//! <SB>
//! MSH|^~\&|SOMERIS|...<R>
//! PID|||...<R>
//! <EB><R>
//! \r
//! <SB>
//! ...
//! ```

use crate::GenerationResult;
use hl7::{Message, SEGMENT_TERMINATOR};
use std::fs;
use std::path::{Path, PathBuf};

const START_BLOCK: &str = "<SB>";
const END_BLOCK: &str = "<EB>";
const SEGMENT_TERMINATOR_TOKEN: &str = "<R>";
const MESSAGE_SEPARATOR: &str = "<R>\n\r\n";

const LOGFILE_PREFIX: &str = "hl7messages";
const LOGFILE_SUFFIX: &str = ".log";

/// Writes batches of messages to a log file.
pub trait MessageLogger {
    /// Serializes `messages` into the log format.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if any message cannot be encoded.
    fn encode_messages(&self, messages: &[Message]) -> GenerationResult<String>;

    /// Creates a fresh, persisted temporary log file and returns its path.
    fn logfile_for(&self) -> GenerationResult<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix(LOGFILE_PREFIX)
            .suffix(LOGFILE_SUFFIX)
            .tempfile()?;
        let (_, path) = file.keep().map_err(|e| e.error)?;
        Ok(path)
    }

    /// Writes `messages` to `path`, replacing any previous content.
    fn write_to_log(&self, path: &Path, messages: &[Message]) -> GenerationResult<()> {
        let transcript = self.encode_messages(messages)?;
        fs::write(path, transcript)?;
        tracing::info!("wrote {} messages to {}", messages.len(), path.display());
        Ok(())
    }

    /// Writes `messages` to a new temporary log file and returns its path.
    fn write_to_temp_log(&self, messages: &[Message]) -> GenerationResult<PathBuf> {
        let path = self.logfile_for()?;
        self.write_to_log(&path, messages)?;
        Ok(path)
    }
}

/// The escaped `<SB>`/`<EB>` transcript format.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranscriptLogger;

impl TranscriptLogger {
    /// Reverses [`encode_messages`](MessageLogger::encode_messages), returning each message's
    /// native encoding with segment terminators restored.
    ///
    /// Markers are recognised only as whole lines, so field values containing `<SB>`, `<EB>` or
    /// `<R>` decode unchanged. Lines between blocks are separators and are skipped, as is a block
    /// with no end marker.
    pub fn decode(transcript: &str) -> Vec<String> {
        let mut messages = Vec::new();
        let mut block: Option<String> = None;
        for line in transcript.split('\n') {
            let line = line.strip_suffix('\r').unwrap_or(line);
            match block.as_mut() {
                None if line == START_BLOCK => block = Some(String::new()),
                None => {}
                Some(_) if Self::is_end_marker(line) => messages.extend(block.take()),
                Some(body) => {
                    let segment = line.strip_suffix(SEGMENT_TERMINATOR_TOKEN).unwrap_or(line);
                    body.push_str(segment);
                    body.push(SEGMENT_TERMINATOR);
                }
            }
        }
        messages
    }

    fn is_end_marker(line: &str) -> bool {
        line.strip_suffix(SEGMENT_TERMINATOR_TOKEN).unwrap_or(line) == END_BLOCK
    }

    fn encode_block(encoded: &str) -> String {
        let mut lines = vec![START_BLOCK.to_owned()];
        lines.extend(
            encoded
                .split_terminator(SEGMENT_TERMINATOR)
                .map(|segment| format!("{segment}{SEGMENT_TERMINATOR_TOKEN}")),
        );
        lines.push(END_BLOCK.to_owned());
        lines.join("\n")
    }
}

impl MessageLogger for TranscriptLogger {
    fn encode_messages(&self, messages: &[Message]) -> GenerationResult<String> {
        let blocks = messages
            .iter()
            .map(|message| Ok(Self::encode_block(&message.encode()?)))
            .collect::<GenerationResult<Vec<_>>>()?;
        Ok(blocks.join(MESSAGE_SEPARATOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Requirements;
    use crate::trigger_events::{MessageGenerator, UnsolicitedObservationGenerator};
    use hl7::{Group, Segment};
    use tempfile::TempDir;

    fn small_message(control_id: &str) -> Message {
        let mut msh = Segment::new("MSH").unwrap();
        msh.set_field(1, "|").unwrap();
        msh.set_field(2, "^~\\&").unwrap();
        msh.set_field(10, control_id).unwrap();
        let mut pid = Segment::new("PID").unwrap();
        pid.set_at(5, 0, 1, 1, "SMITH").unwrap();
        let mut message = Message::new("ORU_R01");
        message.root_mut().push(msh);
        let mut patient = Group::new("PATIENT");
        patient.push(pid);
        message.root_mut().push(patient);
        message
    }

    #[test]
    fn single_message_layout() {
        let transcript = TranscriptLogger
            .encode_messages(&[small_message("1")])
            .unwrap();
        assert_eq!(
            transcript,
            "<SB>\nMSH|^~\\&||||||||1<R>\nPID|||||SMITH<R>\n<EB>"
        );
    }

    #[test]
    fn messages_are_separated_by_escaped_blank_line() {
        let transcript = TranscriptLogger
            .encode_messages(&[small_message("1"), small_message("2")])
            .unwrap();
        assert_eq!(transcript.matches(START_BLOCK).count(), 2);
        assert_eq!(transcript.matches(END_BLOCK).count(), 2);
        assert!(transcript.contains("<EB><R>\n\r\n<SB>"));
        assert!(!transcript.ends_with('\n'));
    }

    #[test]
    fn empty_batch_is_empty_transcript() {
        assert_eq!(TranscriptLogger.encode_messages(&[]).unwrap(), "");
        assert!(TranscriptLogger::decode("").is_empty());
    }

    #[test]
    fn decoded_blocks_match_native_encoding() {
        let requirements = Requirements::default();
        let generator = UnsolicitedObservationGenerator::default();
        let messages: Vec<Message> = (0..3)
            .map(|_| generator.generate(&requirements).unwrap())
            .collect();

        let transcript = TranscriptLogger.encode_messages(&messages).unwrap();
        assert_eq!(transcript.matches(START_BLOCK).count(), 3);
        assert_eq!(transcript.matches(END_BLOCK).count(), 3);

        let decoded = TranscriptLogger::decode(&transcript);
        let native: Vec<String> = messages.iter().map(|m| m.encode().unwrap()).collect();
        assert_eq!(decoded, native);
    }

    #[test]
    fn markers_inside_values_do_not_split_blocks() {
        let requirements = Requirements::builder()
            .study_reason("r/o <EB> x")
            .order_status("<SB><R>")
            .build()
            .unwrap();
        let generator = UnsolicitedObservationGenerator::default();
        let messages: Vec<Message> = (0..2)
            .map(|_| generator.generate(&requirements).unwrap())
            .collect();

        let transcript = TranscriptLogger.encode_messages(&messages).unwrap();
        let decoded = TranscriptLogger::decode(&transcript);
        let native: Vec<String> = messages.iter().map(|m| m.encode().unwrap()).collect();
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded, native);
        assert!(decoded[0].contains("^r/o <EB> x|"));
    }

    #[test]
    fn unterminated_block_is_dropped() {
        let transcript = "<SB>\nMSH|^~\\&||||||||1<R>\n<EB><R>\n\r\n<SB>\nMSH|^~\\&||||||||2<R>";
        assert_eq!(TranscriptLogger::decode(transcript), ["MSH|^~\\&||||||||1\r"]);
    }

    #[test]
    fn writes_transcript_to_given_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");
        TranscriptLogger
            .write_to_log(&path, &[small_message("7")])
            .unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            TranscriptLogger::decode(&written),
            ["MSH|^~\\&||||||||7\rPID|||||SMITH\r"]
        );
    }

    #[test]
    fn temp_log_is_persisted_with_log_name() {
        let path = TranscriptLogger
            .write_to_temp_log(&[small_message("9")])
            .unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(LOGFILE_PREFIX) && name.ends_with(LOGFILE_SUFFIX), "{name}");
        assert!(fs::read_to_string(&path).unwrap().starts_with("<SB>\nMSH|"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.log");
        let err = TranscriptLogger.write_to_log(&path, &[]).unwrap_err();
        assert!(matches!(err, crate::GenerationError::Io(_)));
    }
}
