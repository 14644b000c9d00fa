//! Embedding candidates into complex vectors
//!
//! An [`Embedder`] turns one candidate into a fixed-length vector. The two
//! built-in embedders are deliberately simple feature maps; any closure
//! `Fn(&T) -> ComplexVector` can stand in for a real model.

use gra_core::linalg::{from_real, NORM_EPSILON};
use gra_core::ComplexVector;
use serde::{Deserialize, Serialize};

/// Maps a candidate to a complex vector
///
/// Every candidate of one selection must embed to the same length.
pub trait Embedder<T: ?Sized>: Send + Sync {
    /// Embed one candidate
    fn embed(&self, item: &T) -> ComplexVector;
}

impl<T, F> Embedder<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> ComplexVector + Send + Sync,
{
    fn embed(&self, item: &T) -> ComplexVector {
        self(item)
    }
}

/// Scale real features by `1 / (‖x‖ + 1e-9)` and lift to complex
fn normalized(features: &[f64]) -> ComplexVector {
    let norm = features.iter().map(|x| x * x).sum::<f64>().sqrt() + NORM_EPSILON;
    let scaled: Vec<f64> = features.iter().map(|x| x / norm).collect();
    from_real(&scaled)
}

/// Letters counted by [`CharHistogramEmbedder`], in vector order
pub const CHAR_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzабвгдеёжзийклмнопрстуфхцчшщъыьэюя";

/// Bag-of-characters text embedder
///
/// Lower-cases the text and counts each letter of [`CHAR_ALPHABET`]
/// (Latin then Cyrillic); everything else is ignored. Text without any
/// counted letter embeds to the zero vector.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharHistogramEmbedder;

impl CharHistogramEmbedder {
    /// Embedding length
    #[must_use]
    pub fn dimension() -> usize {
        CHAR_ALPHABET.chars().count()
    }
}

impl Embedder<str> for CharHistogramEmbedder {
    fn embed(&self, item: &str) -> ComplexVector {
        let mut counts = vec![0.0; Self::dimension()];
        for ch in item.to_lowercase().chars() {
            if let Some(slot) = CHAR_ALPHABET.chars().position(|c| c == ch) {
                counts[slot] += 1.0;
            }
        }
        normalized(&counts)
    }
}

/// Transport configuration scored by [`ProfileEmbedder`]
///
/// Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkProfile {
    /// Optional human-readable label, not embedded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Transport protocol name (`tcp`, `udp`, `tls`, `grpc`, `ws`)
    pub protocol: String,
    /// Remote port
    pub port: u16,
    /// Whether traffic obfuscation is enabled
    pub obfuscation: bool,
    /// Round-trip latency in milliseconds
    pub latency_ms: f64,
    /// Latency jitter in milliseconds
    pub jitter_ms: f64,
    /// Packet loss fraction
    pub packet_loss: f64,
    /// Whether the endpoint is known to be blocked
    pub blocked: bool,
    /// Uptime score in `[0, 1]`
    pub uptime_score: f64,
}

impl Default for NetworkProfile {
    fn default() -> Self {
        Self {
            label: None,
            protocol: "tcp".to_string(),
            port: 443,
            obfuscation: false,
            latency_ms: 100.0,
            jitter_ms: 10.0,
            packet_loss: 0.01,
            blocked: false,
            uptime_score: 0.5,
        }
    }
}

impl NetworkProfile {
    /// Create profile with defaults for everything but protocol and port
    #[must_use]
    pub fn new(protocol: impl Into<String>, port: u16) -> Self {
        Self {
            protocol: protocol.into(),
            port,
            ..Self::default()
        }
    }

    /// With label
    #[inline]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// With obfuscation flag
    #[inline]
    #[must_use]
    pub fn with_obfuscation(mut self, obfuscation: bool) -> Self {
        self.obfuscation = obfuscation;
        self
    }

    /// With latency and jitter, both in milliseconds
    #[inline]
    #[must_use]
    pub fn with_latency(mut self, latency_ms: f64, jitter_ms: f64) -> Self {
        self.latency_ms = latency_ms;
        self.jitter_ms = jitter_ms;
        self
    }

    /// With packet loss fraction
    #[inline]
    #[must_use]
    pub fn with_packet_loss(mut self, packet_loss: f64) -> Self {
        self.packet_loss = packet_loss;
        self
    }

    /// With blocked flag
    #[inline]
    #[must_use]
    pub fn with_blocked(mut self, blocked: bool) -> Self {
        self.blocked = blocked;
        self
    }

    /// With uptime score
    #[inline]
    #[must_use]
    pub fn with_uptime(mut self, uptime_score: f64) -> Self {
        self.uptime_score = uptime_score;
        self
    }

    /// Numeric protocol code; unknown protocols map to `0` like `tcp`
    #[must_use]
    pub fn protocol_code(&self) -> u8 {
        match self.protocol.to_lowercase().as_str() {
            "udp" => 1,
            "tls" => 2,
            "grpc" => 3,
            "ws" => 4,
            _ => 0,
        }
    }
}

/// Eight-feature embedder for [`NetworkProfile`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileEmbedder;

impl ProfileEmbedder {
    /// Embedding length
    pub const DIMENSION: usize = 8;

    /// Raw features before normalization
    #[must_use]
    pub fn features(profile: &NetworkProfile) -> [f64; Self::DIMENSION] {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        [
            f64::from(profile.protocol_code()),
            f64::from(profile.port) / 65535.0,
            flag(profile.obfuscation),
            profile.latency_ms / 1000.0,
            profile.jitter_ms / 500.0,
            profile.packet_loss,
            flag(profile.blocked),
            profile.uptime_score,
        ]
    }
}

impl Embedder<NetworkProfile> for ProfileEmbedder {
    fn embed(&self, item: &NetworkProfile) -> ComplexVector {
        normalized(&Self::features(item))
    }
}
