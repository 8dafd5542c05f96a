//! Adapter implementations of the ports.
//!
//! Each adapter binds a port to a concrete backend: whisper.cpp for
//! recognition, hound/symphonia for audio decoding, arboard for the
//! clipboard, and the filesystem for configuration, transcripts, and models.

pub mod bidi;
pub mod clipboard;
pub mod config_store;
pub mod digits;
pub mod lingual;
pub mod model_store;
pub mod reshaper;
pub mod symphonia_reader;
pub mod transcript_file;
pub mod wav_reader;
pub mod whisper_cpp;

pub use bidi::UnicodeBidiReorderer;
pub use clipboard::ArboardClipboard;
pub use config_store::TomlConfigStore;
pub use digits::PersianDigitConverter;
pub use lingual::UnicodeLinguisticNormalizer;
pub use model_store::LocalModelStore;
pub use reshaper::ArReshaper;
pub use symphonia_reader::SymphoniaAudioReader;
pub use transcript_file::TextFileTranscriptSink;
pub use wav_reader::HoundWavReader;
pub use whisper_cpp::WhisperCppTranscriber;
