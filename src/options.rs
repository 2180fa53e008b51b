/// Overlay height as a fraction of the annotation's height.
pub const DEFAULT_HEIGHT_SCALE: f64 = 0.7;

/// Scale of the page view relative to PDF points.
pub const DEFAULT_VIEW_SCALE: f64 = 0.5;

/// What to do with a link annotation that has no `/A` action dictionary or
/// no `/URI` string in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingActionPolicy {
    /// Stop scanning the page and keep only the links found so far.
    #[default]
    AbortScan,
    /// Drop this annotation and keep scanning.
    SkipAnnotation,
}

/// Upper bound of the walk over the `/Annots` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnotsBound {
    /// Visit indices `0..=count`. The extra index never resolves and is skipped.
    #[default]
    Inclusive,
    /// Visit indices `0..count`.
    Exclusive,
}

/// Treatment of the Y axis on pages rotated by 180 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HalfTurnPolicy {
    /// Only the page offsets are applied.
    #[default]
    Legacy,
    /// Mirror Y around the page height, as for upright pages.
    MirrorY,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanOptions {
    pub missing_action: MissingActionPolicy,
    pub annots_bound: AnnotsBound,
    pub half_turn: HalfTurnPolicy,
    pub height_scale: f64,
    pub view_scale: f64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            missing_action: MissingActionPolicy::default(),
            annots_bound: AnnotsBound::default(),
            half_turn: HalfTurnPolicy::default(),
            height_scale: DEFAULT_HEIGHT_SCALE,
            view_scale: DEFAULT_VIEW_SCALE,
        }
    }
}
