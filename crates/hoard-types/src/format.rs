use serde::{Deserialize, Serialize};

/// Format tag inferred from a blob's leading bytes.
///
/// Tags never come from caller metadata; they are assigned by sniffing the
/// payload against an ordered signature table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetFormat {
    /// Compressed game texture (`TEX `).
    Texture,
    /// GTF texture (`GTF `).
    GtfTexture,
    /// Binary mesh resource (`MSHb`).
    Mesh,
    /// Binary plan resource (`PLNb`).
    Plan,
    /// Binary level resource (`LVLb`).
    Level,
    /// Binary painting resource (`PTGb`).
    Painting,
    /// Binary physical material (`MATb`).
    Material,
    /// Binary graphics material carrying shader programs (`GMTb`).
    GfxMaterial,
    /// Binary palette (`PALb`).
    Palette,
    /// Compiled script (`FSHb`).
    Script,
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// No signature matched.
    Unknown,
}

impl AssetFormat {
    /// Stable lowercase name, used in config files and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Texture => "texture",
            Self::GtfTexture => "gtf_texture",
            Self::Mesh => "mesh",
            Self::Plan => "plan",
            Self::Level => "level",
            Self::Painting => "painting",
            Self::Material => "material",
            Self::GfxMaterial => "gfx_material",
            Self::Palette => "palette",
            Self::Script => "script",
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
