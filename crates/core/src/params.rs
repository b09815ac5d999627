//! Submission parameter assembly.
//!
//! The submission endpoint accepts a wide parameter set, but each
//! pipeline only consumes the subset its [`WorkType`] descriptor names.
//! [`SubmissionParams::assemble`] applies that selection so the client
//! never sends slider values a pipeline would ignore.

use serde::{Deserialize, Serialize};

use crate::worktype::WorkType;

/// Raw inputs gathered from the panel before work-type selection.
///
/// Everything is optional; missing values fall back to the work-type
/// defaults during assembly.
#[derive(Debug, Clone, Default)]
pub struct PanelInputs {
    /// Primary prompt text. Empty falls back to the pipeline default.
    pub prompt: String,
    /// Secondary prompts for multi-reference workflows.
    pub secondary_prompts: Vec<String>,
    /// Control strength slider (0-1).
    pub strength: Option<f32>,
    /// Reference-image weight sliders (0-1).
    pub ref_weights: Vec<f32>,
    /// Control-window start/end sliders (0-1).
    pub control_start: Option<f32>,
    pub control_end: Option<f32>,
    /// Expand-pixel count.
    pub expand_pixels: Option<u32>,
    /// Vertical-orientation flag.
    pub vertical: Option<bool>,
    /// Enhancement level.
    pub enhancement: Option<i32>,
}

/// The assembled parameter set sent to the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionParams {
    /// Server pipeline code.
    pub work_type: i32,
    /// Public URL of the uploaded primary image.
    pub original_url: String,
    /// Public URL of the uploaded reference image, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub secondary_prompts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub ref_weights: Vec<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_start: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_end: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand_pixels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement: Option<i32>,
}

fn clamp_unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

impl SubmissionParams {
    /// Assemble the parameter subset for `work_type` from panel inputs.
    ///
    /// Values the descriptor does not name are dropped; named values
    /// missing from the inputs take the descriptor defaults. Slider
    /// values are clamped to `0..=1`.
    pub fn assemble(
        work_type: &WorkType,
        inputs: &PanelInputs,
        original_url: String,
        reference_url: Option<String>,
    ) -> Self {
        let prompt = if inputs.prompt.trim().is_empty() {
            work_type.prompt_default.to_string()
        } else {
            inputs.prompt.clone()
        };

        let secondary_prompts: Vec<String> = inputs
            .secondary_prompts
            .iter()
            .take(work_type.secondary_prompts as usize)
            .cloned()
            .collect();

        let mut ref_weights: Vec<f32> = inputs
            .ref_weights
            .iter()
            .take(work_type.ref_weights as usize)
            .map(|w| clamp_unit(*w))
            .collect();
        while ref_weights.len() < work_type.ref_weights as usize {
            ref_weights.push(work_type.ref_weight_default);
        }

        let strength = work_type
            .strength
            .then(|| clamp_unit(inputs.strength.unwrap_or(work_type.strength_default)));

        let (control_start, control_end) = if work_type.control_window {
            (
                Some(clamp_unit(inputs.control_start.unwrap_or(0.0))),
                Some(clamp_unit(inputs.control_end.unwrap_or(1.0))),
            )
        } else {
            (None, None)
        };

        Self {
            work_type: work_type.code,
            original_url,
            reference_url,
            prompt,
            secondary_prompts,
            strength,
            ref_weights,
            control_start,
            control_end,
            expand_pixels: work_type
                .expand_pixels
                .then(|| inputs.expand_pixels.unwrap_or(200)),
            vertical: work_type
                .vertical_flag
                .then(|| inputs.vertical.unwrap_or(false)),
            enhancement: work_type
                .enhancement
                .then(|| inputs.enhancement.unwrap_or(1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worktype::{lookup, Category};

    #[test]
    fn styled_pipeline_takes_strength_and_window_defaults() {
        let w = lookup(Category::Interior, "line-art").unwrap();
        let params =
            SubmissionParams::assemble(w, &PanelInputs::default(), "http://a/1.png".into(), None);
        assert_eq!(params.work_type, 112);
        assert_eq!(params.strength, Some(0.55));
        assert_eq!(params.control_start, Some(0.0));
        assert_eq!(params.control_end, Some(1.0));
        assert_eq!(params.ref_weights, vec![0.8]);
        assert_eq!(params.prompt, "bedroom, modern style");
        assert!(params.expand_pixels.is_none());
    }

    #[test]
    fn edit_pipeline_drops_sliders_it_does_not_consume() {
        let w = lookup(Category::ImageEdit, "remove-watermark").unwrap();
        let inputs = PanelInputs {
            strength: Some(0.9),
            ref_weights: vec![0.5, 0.5],
            control_start: Some(0.2),
            ..Default::default()
        };
        let params = SubmissionParams::assemble(w, &inputs, "http://a/1.png".into(), None);
        assert!(params.strength.is_none());
        assert!(params.ref_weights.is_empty());
        assert!(params.control_start.is_none());
    }

    #[test]
    fn secondary_prompts_are_capped_at_descriptor_count() {
        let w = lookup(Category::Interior, "multi-style-white-model").unwrap();
        let inputs = PanelInputs {
            secondary_prompts: vec!["a".into(), "b".into(), "c".into()],
            ..Default::default()
        };
        let params = SubmissionParams::assemble(w, &inputs, "http://a/1.png".into(), None);
        assert_eq!(params.secondary_prompts, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(params.ref_weights.len(), 2);
    }

    #[test]
    fn user_prompt_overrides_default() {
        let w = lookup(Category::Interior, "line-art").unwrap();
        let inputs = PanelInputs {
            prompt: "kitchen, industrial style".into(),
            ..Default::default()
        };
        let params = SubmissionParams::assemble(w, &inputs, "http://a/1.png".into(), None);
        assert_eq!(params.prompt, "kitchen, industrial style");
    }

    #[test]
    fn slider_values_are_clamped_to_unit_range() {
        let w = lookup(Category::Interior, "line-art").unwrap();
        let inputs = PanelInputs {
            strength: Some(1.7),
            ref_weights: vec![-0.4],
            ..Default::default()
        };
        let params = SubmissionParams::assemble(w, &inputs, "http://a/1.png".into(), None);
        assert_eq!(params.strength, Some(1.0));
        assert_eq!(params.ref_weights, vec![0.0]);
    }

    #[test]
    fn expand_pipeline_fills_pixel_default() {
        let w = lookup(Category::ImageEdit, "expand").unwrap();
        let params =
            SubmissionParams::assemble(w, &PanelInputs::default(), "http://a/1.png".into(), None);
        assert_eq!(params.expand_pixels, Some(200));
        assert_eq!(params.vertical, Some(false));
    }

    #[test]
    fn optional_fields_are_omitted_from_wire_json() {
        let w = lookup(Category::ImageEdit, "remove-object").unwrap();
        let params =
            SubmissionParams::assemble(w, &PanelInputs::default(), "http://a/1.png".into(), None);
        let json = serde_json::to_value(&params).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("strength"));
        assert!(!obj.contains_key("reference_url"));
        assert!(!obj.contains_key("expand_pixels"));
        assert_eq!(obj["work_type"], 412);
    }
}
