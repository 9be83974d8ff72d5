//! Encoder registry: "list encoders by format name" and
//! "open an encoded-output stream over a raw stream".

use std::fmt;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use image::DynamicImage;

use super::bmp::BmpProvider;
use super::gif::GifProvider;
use super::jpeg::JpegProvider;
use super::png::PngProvider;
use super::types::{EncoderInfo, EncoderOptions, SinkError};

/// Buffered stream the encoder writes into. Dropping it releases the stream.
pub type EncodedOutput<'a> = Box<dyn Write + 'a>;

/// An encoder handle, valid for a single write.
///
/// Handles are created by an [`EncoderProvider`] and released by dropping them.
pub trait ImageEncoder {
    /// Description of this encoder.
    fn info(&self) -> &EncoderInfo;

    /// Options this encoder uses when nothing is configured.
    fn default_options(&self) -> EncoderOptions {
        EncoderOptions::for_encoder(self.info())
    }

    /// Encode `image` with `options` into `out`.
    fn encode(
        &mut self,
        image: &DynamicImage,
        options: &EncoderOptions,
        out: &mut dyn Write,
    ) -> Result<(), SinkError>;
}

/// Factory for [`ImageEncoder`] handles.
pub trait EncoderProvider: Send + Sync {
    fn info(&self) -> &EncoderInfo;

    fn create_encoder(&self) -> Box<dyn ImageEncoder>;
}

/// The platform capability an [`ImageSink`](super::ImageSink) dispatches through.
pub trait EncoderRegistry: Send + Sync {
    /// Providers that answer to `format_name`, in registration order.
    fn encoders_by_format_name(&self, format_name: &str) -> Vec<Arc<dyn EncoderProvider>>;

    /// Wrap a raw sink in an encoded-output stream.
    fn open_output<'a>(&self, sink: &'a mut dyn Write) -> io::Result<EncodedOutput<'a>> {
        Ok(Box::new(BufWriter::new(sink)))
    }
}

/// Registry holding the built-in encoders plus any registered extras.
#[derive(Clone)]
pub struct BuiltinRegistry {
    providers: Vec<Arc<dyn EncoderProvider>>,
}

impl BuiltinRegistry {
    /// Registry with the built-in jpeg, png, bmp and gif encoders.
    pub fn new() -> Self {
        Self {
            providers: vec![
                Arc::new(JpegProvider),
                Arc::new(PngProvider),
                Arc::new(BmpProvider),
                Arc::new(GifProvider),
            ],
        }
    }

    /// Registry without any encoder.
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Append a provider after the ones already registered.
    pub fn register(&mut self, provider: Arc<dyn EncoderProvider>) {
        log::debug!("Registering image encoder {}", provider.info().name);
        self.providers.push(provider);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_provider(mut self, provider: Arc<dyn EncoderProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Every format name some provider answers to, deduplicated.
    pub fn format_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for provider in &self.providers {
            for name in provider.info().format_names {
                if !names.contains(name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BuiltinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.providers.iter().map(|p| p.info().name))
            .finish()
    }
}

impl EncoderRegistry for BuiltinRegistry {
    fn encoders_by_format_name(&self, format_name: &str) -> Vec<Arc<dyn EncoderProvider>> {
        self.providers
            .iter()
            .filter(|provider| provider.info().handles(format_name))
            .cloned()
            .collect()
    }
}
