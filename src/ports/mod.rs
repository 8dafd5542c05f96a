pub mod audio_reader;
pub mod capabilities;
pub mod config;
pub mod model_store;
pub mod transcriber;
pub mod transcript_sink;

pub use audio_reader::AudioReader;
pub use capabilities::{
    BidiReorderer, DigitConverter, GlyphReshaper, IdentityCapability, LinguisticNormalizer,
};
pub use config::ConfigStore;
pub use model_store::ModelStore;
pub use transcriber::{RecognitionResult, TranscribeOptions, Transcriber};
pub use transcript_sink::TranscriptSink;
