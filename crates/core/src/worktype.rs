//! Static work-type registry.
//!
//! The server selects a generation pipeline by an integer work-type
//! code. The host panel identifies the same thing as a `(category,
//! option)` pair picked from its tabs and dropdowns. This module holds
//! the one static table that ties the two together, along with the
//! per-work-type defaults (prompt text, control sliders) and the
//! descriptor of which submission parameters the pipeline consumes.
//!
//! Pairs missing from the table resolve to [`GENERIC_WORK_TYPE`] rather
//! than failing; the server treats that code as its catch-all pipeline.

use serde::{Deserialize, Serialize};

/// Fallback pipeline code for `(category, option)` pairs the registry
/// does not know.
pub const GENERIC_WORK_TYPE: i32 = 100;

/// Top-level panel category the option was picked from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Interior,
    Architecture,
    Landscape,
    ImageEdit,
}

/// Which submission parameters a pipeline consumes, and their defaults.
///
/// One descriptor per `(category, option)` pair. The orchestrator uses
/// this to assemble the parameter subset for a submission instead of
/// routing each option through its own handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkType {
    pub category: Category,
    /// Option label as shown in the host panel dropdown.
    pub option: &'static str,
    /// Server pipeline code.
    pub code: i32,
    /// Default primary prompt for this pipeline.
    pub prompt_default: &'static str,
    /// Number of secondary prompts (multi-reference workflows), 0-2.
    pub secondary_prompts: u8,
    /// Number of reference-image weights the pipeline accepts, 0-2.
    pub ref_weights: u8,
    /// Whether the pipeline takes a control-strength value.
    pub strength: bool,
    /// Whether the pipeline takes control-window start/end values.
    pub control_window: bool,
    /// Whether the pipeline takes an expand-pixel count.
    pub expand_pixels: bool,
    /// Whether the pipeline takes a vertical-orientation flag.
    pub vertical_flag: bool,
    /// Whether the pipeline takes an enhancement-level integer.
    pub enhancement: bool,
    /// Default control strength (0-1) where `strength` is set.
    pub strength_default: f32,
    /// Default reference-image weight (0-1) where `ref_weights > 0`.
    pub ref_weight_default: f32,
}

impl WorkType {
    const fn base(category: Category, option: &'static str, code: i32) -> Self {
        Self {
            category,
            option,
            code,
            prompt_default: "",
            secondary_prompts: 0,
            ref_weights: 0,
            strength: false,
            control_window: false,
            expand_pixels: false,
            vertical_flag: false,
            enhancement: false,
            strength_default: 0.55,
            ref_weight_default: 0.8,
        }
    }

    /// Styled-render pipeline: strength + one reference weight + control window.
    const fn styled(
        category: Category,
        option: &'static str,
        code: i32,
        prompt: &'static str,
        strength: f32,
        weight: f32,
    ) -> Self {
        let mut w = Self::base(category, option, code);
        w.prompt_default = prompt;
        w.ref_weights = 1;
        w.strength = true;
        w.control_window = true;
        w.strength_default = strength;
        w.ref_weight_default = weight;
        w
    }

    /// Multi-reference pipeline: two secondary prompts and two weights.
    const fn multi(
        category: Category,
        option: &'static str,
        code: i32,
        prompt: &'static str,
    ) -> Self {
        let mut w = Self::styled(category, option, code, prompt, 0.58, 0.8);
        w.secondary_prompts = 2;
        w.ref_weights = 2;
        w
    }

    /// Image-editing pipeline: prompt only unless flags are added.
    const fn edit(option: &'static str, code: i32, prompt: &'static str) -> Self {
        let mut w = Self::base(Category::ImageEdit, option, code);
        w.prompt_default = prompt;
        w
    }

    /// Descriptor used for unmapped pairs: the generic pipeline with
    /// prompt passthrough and no sliders.
    pub const fn generic(category: Category) -> Self {
        Self::base(category, "generic", GENERIC_WORK_TYPE)
    }
}

// Interior pipelines carry the 0.55/0.58 strength and 0.8 weight
// defaults; architecture and landscape run at 0.8/0.6.
const INTERIOR_S: f32 = 0.55;
const INTERIOR_W: f32 = 0.8;
const EXTERIOR_S: f32 = 0.8;
const EXTERIOR_W: f32 = 0.6;

/// The full registry. Order is irrelevant; lookups scan linearly.
pub const WORK_TYPES: &[WorkType] = &[
    // Interior design
    WorkType::styled(Category::Interior, "color-plan", 110, "interior color plan", INTERIOR_S, INTERIOR_W),
    WorkType::styled(Category::Interior, "bare-shell", 111, "living room, classic french style, ornate ceiling light, rich detail", INTERIOR_S, INTERIOR_W),
    WorkType::styled(Category::Interior, "line-art", 112, "bedroom, modern style", INTERIOR_S, INTERIOR_W),
    WorkType::styled(Category::Interior, "white-model", 113, "bedroom, modern style, desk, bookshelf", INTERIOR_S, INTERIOR_W),
    WorkType::multi(Category::Interior, "multi-style-white-model", 114, "study, modern style, writing desk"),
    WorkType::multi(Category::Interior, "multi-style-line-art", 115, "bedroom, modern style"),
    WorkType::styled(Category::Interior, "style-transfer", 116, "living room, chinese style", INTERIOR_S, INTERIOR_W),
    WorkType::styled(Category::Interior, "pano-360", 117, "panoramic interior, modern style", INTERIOR_S, INTERIOR_W),
    // Architecture planning
    WorkType::styled(Category::Architecture, "color-plan", 210, "architectural color plan", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "site-photo", 211, "construction site, modern style", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "line-art", 212, "architectural line art, minimal style", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "white-model-perspective-exact", 213, "architectural white model, exact perspective", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "white-model-perspective-mass", 214, "architectural massing model, perspective", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "white-model-aerial-exact", 215, "architectural aerial, exact model", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "white-model-aerial-mass", 216, "architectural aerial, massing model", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "day-to-night", 217, "night scene, lighting render", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Architecture, "lighting-design", 218, "facade lighting, lighting design", EXTERIOR_S, EXTERIOR_W),
    // Landscape design
    WorkType::styled(Category::Landscape, "color-plan", 310, "landscape color plan", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "site-photo", 311, "landscape site, modern style", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "site-photo-local-ref", 312, "local landscape, reference comparison", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "line-art", 313, "landscape line art, minimal style", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "white-model-perspective", 314, "landscape white model, perspective", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "white-model-aerial", 315, "landscape aerial, white model", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "day-to-night", 316, "night scene, lighting render", EXTERIOR_S, EXTERIOR_W),
    WorkType::styled(Category::Landscape, "lighting-design", 317, "landscape lighting, lighting design", EXTERIOR_S, EXTERIOR_W),
    // Image editing
    WorkType::edit("replace-material", 410, "replace with new material"),
    WorkType::edit("edit-local", 411, "local edit, detail enhancement"),
    WorkType::edit("remove-object", 412, "remove selected object"),
    WorkType::edit("remove-watermark", 413, "remove watermark"),
    WorkType::edit("add-object", 414, "add new object"),
    WorkType::edit("add-object-specified", 415, "add specified object"),
    WorkType::edit("replace-product", 416, "product replacement"),
    WorkType::edit("replace-backdrop", 417, "replace background or ceiling"),
    {
        let mut w = WorkType::edit("expand", 418, "extend the frame");
        w.expand_pixels = true;
        w.vertical_flag = true;
        w
    },
    {
        let mut w = WorkType::edit("refine", 419, "clean up image, denoise");
        w.enhancement = true;
        w
    },
    {
        let mut w = WorkType::edit("enhance", 420, "image enhancement, detail boost");
        w.enhancement = true;
        w
    },
    {
        let mut w = WorkType::edit("blend-local", 421, "local blend, fused result");
        w.ref_weights = 2;
        w
    },
    {
        let mut w = WorkType::edit("upscale", 422, "upscale image, high resolution");
        w.vertical_flag = true;
        w
    },
    WorkType::edit("restore-photo", 423, "restore old photo, remove scratches"),
];

/// Look up the descriptor for a `(category, option)` pair.
pub fn lookup(category: Category, option: &str) -> Option<&'static WorkType> {
    WORK_TYPES
        .iter()
        .find(|w| w.category == category && w.option == option)
}

/// Resolve the full descriptor for a pair, falling back to
/// [`WorkType::generic`] for unmapped pairs.
pub fn resolve(category: Category, option: &str) -> WorkType {
    lookup(category, option)
        .copied()
        .unwrap_or(WorkType::generic(category))
}

/// Resolve the server pipeline code for a pair, falling back to
/// [`GENERIC_WORK_TYPE`] for unmapped pairs.
pub fn resolve_code(category: Category, option: &str) -> i32 {
    lookup(category, option).map_or(GENERIC_WORK_TYPE, |w| w.code)
}
