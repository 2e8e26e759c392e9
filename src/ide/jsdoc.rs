//! JSDoc typedef emission.
//!
//! One block per emitted model, in id order, separated by a blank line:
//!
//! ```text
//! /**
//! * @typedef {Parent} Label
//! * @property {Type} name
//! * @property {Type} [optionalName]
//! * @property {function} action
//! * @property {*} view
//! */
//! ```

use crate::hir::{Model, ModelGraph, Projector, method_type, property_key};

use super::AnalysisOptions;

/// Header label: declared name, else binding, else placeholder token.
pub fn model_label(model: &Model, projector: &Projector<'_>) -> String {
    projector
        .declared_name(model)
        .unwrap_or_else(|| model.label().to_string())
}

/// Render the block of one model.
pub fn render_model(model: &Model, projector: &mut Projector<'_>, options: &AnalysisOptions) -> String {
    let parent = model.parent_symbol().unwrap_or(options.default_parent.as_str());

    let mut lines = vec![format!("@typedef {{{}}} {}", parent, model_label(model, projector))];
    for (key, ty) in &model.properties {
        let projection = projector.project(ty);
        lines.push(format!(
            "@property {{{}}} {}",
            projection.type_name,
            property_key(key, projection.optional)
        ));
    }
    for (key, kind) in model.actions.iter().chain(&model.views) {
        lines.push(format!("@property {{{}}} {}", method_type(*kind), key));
    }

    let mut block = String::from("/**\n");
    for line in lines {
        block.push_str("* ");
        block.push_str(&line);
        block.push('\n');
    }
    block.push_str("*/\n");
    block
}

/// Render every emitted model of `graph`.
pub fn emit_graph(graph: &ModelGraph, options: &AnalysisOptions) -> String {
    let mut projector = Projector::new(graph, options.capitalize_names);
    let blocks: Vec<String> = graph
        .emitted()
        .map(|model| render_model(model, &mut projector, options))
        .collect();
    tracing::debug!(blocks = blocks.len(), "typedefs emitted");
    blocks.join("\n")
}
