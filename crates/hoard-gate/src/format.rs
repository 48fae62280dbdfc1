use hoard_types::AssetFormat;

use crate::config::ValidatorConfig;

/// Whether a sniffed format may be stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Block,
}

/// One row of the signature table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Leading bytes that identify the format.
    pub signature: &'static [u8],
    pub format: AssetFormat,
    pub verdict: Verdict,
}

/// Result of sniffing a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sniffed {
    pub format: AssetFormat,
    pub verdict: Verdict,
}

/// Signatures in priority order. The first matching prefix wins.
const SIGNATURES: &[(&[u8], AssetFormat)] = &[
    (b"TEX ", AssetFormat::Texture),
    (b"GTF ", AssetFormat::GtfTexture),
    (b"MSHb", AssetFormat::Mesh),
    (b"PLNb", AssetFormat::Plan),
    (b"LVLb", AssetFormat::Level),
    (b"PTGb", AssetFormat::Painting),
    (b"MATb", AssetFormat::Material),
    (b"GMTb", AssetFormat::GfxMaterial),
    (b"PALb", AssetFormat::Palette),
    (b"FSHb", AssetFormat::Script),
    (b"\x89PNG\r\n\x1a\n", AssetFormat::Png),
    (b"\xff\xd8\xff", AssetFormat::Jpeg),
];

/// Ordered, immutable table of `(signature, format, verdict)` rows.
///
/// Classification is a linear scan in table order, so the result for any
/// payload is deterministic and can be audited by reading the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatTable {
    descriptors: Vec<FormatDescriptor>,
    unknown_verdict: Verdict,
}

impl FormatTable {
    /// Build the table from a validator configuration.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        let descriptors = SIGNATURES
            .iter()
            .map(|&(signature, format)| FormatDescriptor {
                signature,
                format,
                verdict: if config.blocked_formats.contains(&format) {
                    Verdict::Block
                } else {
                    Verdict::Allow
                },
            })
            .collect();
        let unknown_verdict = if config.allow_unknown_formats
            && !config.blocked_formats.contains(&AssetFormat::Unknown)
        {
            Verdict::Allow
        } else {
            Verdict::Block
        };
        Self {
            descriptors,
            unknown_verdict,
        }
    }

    /// Classify a payload by its leading bytes.
    pub fn sniff(&self, payload: &[u8]) -> Sniffed {
        self.descriptors
            .iter()
            .find(|d| payload.starts_with(d.signature))
            .map(|d| Sniffed {
                format: d.format,
                verdict: d.verdict,
            })
            .unwrap_or(Sniffed {
                format: AssetFormat::Unknown,
                verdict: self.unknown_verdict,
            })
    }

    /// The rows in evaluation order.
    pub fn descriptors(&self) -> &[FormatDescriptor] {
        &self.descriptors
    }

    /// Formats currently blocked, in table order.
    pub fn blocked(&self) -> impl Iterator<Item = AssetFormat> + '_ {
        self.descriptors
            .iter()
            .filter(|d| d.verdict == Verdict::Block)
            .map(|d| d.format)
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        Self::from_config(&ValidatorConfig::default())
    }
}
