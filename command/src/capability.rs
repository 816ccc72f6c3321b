//! Optional features backends may leave untranslated.

bitflags::bitflags! {
    /// Set of optional features a backend translates.
    #[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
    pub struct Features: u32 {
        /// Stream output targets and stream output sections.
        const STREAM_OUTPUT = 0x1;
        /// Binding render targets that are not presentable surfaces.
        const OFFSCREEN_RENDER_TARGET = 0x2;
        /// Occlusion and timestamp queries.
        const QUERY = 0x4;
        /// Predicated rendering.
        const RENDER_CONDITION = 0x8;
    }
}

/// Single optional feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    /// Stream output.
    StreamOutput,
    /// Offscreen render targets.
    OffscreenRenderTarget,
    /// Queries.
    Query,
    /// Predicated rendering.
    RenderCondition,
}

impl Feature {
    /// All features.
    pub const ALL: [Feature; 4] = [
        Feature::StreamOutput,
        Feature::OffscreenRenderTarget,
        Feature::Query,
        Feature::RenderCondition,
    ];

    /// Flag of the feature.
    pub fn flag(self) -> Features {
        match self {
            Feature::StreamOutput => Features::STREAM_OUTPUT,
            Feature::OffscreenRenderTarget => Features::OFFSCREEN_RENDER_TARGET,
            Feature::Query => Features::QUERY,
            Feature::RenderCondition => Features::RENDER_CONDITION,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt.write_str(match self {
            Feature::StreamOutput => "stream output",
            Feature::OffscreenRenderTarget => "offscreen render target",
            Feature::Query => "query",
            Feature::RenderCondition => "render condition",
        })
    }
}

impl Features {
    /// Check if `feature` is in the set.
    pub fn supports(self, feature: Feature) -> bool {
        self.contains(feature.flag())
    }

    /// Features of `Feature::ALL` not in the set.
    pub fn missing(self) -> impl Iterator<Item = Feature> {
        Feature::ALL
            .iter()
            .cloned()
            .filter(move |&feature| !self.supports(feature))
    }
}
