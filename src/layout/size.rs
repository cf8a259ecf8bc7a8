use crate::model::{GraphNode, NodeKind, Size, SizeMode};

const BASE_WIDTH: f64 = 220.0;
const BASE_HEIGHT: f64 = 60.0;
const MIN_WIDTH: f64 = 180.0;
const MIN_HEIGHT: f64 = 40.0;

const PROPERTY_ROW_HEIGHT: f64 = 22.0;
const PROPERTY_TEXT_THRESHOLD: usize = 25;
const PROPERTY_WIDTH_PER_CHAR: f64 = 4.0;
const PROPERTY_WIDTH_CAP: f64 = 100.0;

const ARRAY_EXPANDED_HEIGHT: f64 = 20.0;
const LABEL_THRESHOLD: usize = 10;
const LABEL_WIDTH_PER_CHAR: f64 = 8.0;
const LABEL_WIDTH_CAP: f64 = 80.0;

/// Rendered footprint of a node.
///
/// Collapsed objects hide their property rows, so the result depends on
/// `collapsed` as well as `mode` and must be recomputed when either changes.
pub fn estimate_size(node: &GraphNode, mode: SizeMode) -> Size {
    let scale = mode.multiplier();
    let mut width = BASE_WIDTH * scale;
    let mut height = BASE_HEIGHT * scale;

    match node.kind {
        NodeKind::Object => {
            let visible_rows = if node.collapsed {
                0
            } else {
                node.properties.len()
            };
            height += visible_rows as f64 * PROPERTY_ROW_HEIGHT * scale;

            let longest = node
                .properties
                .iter()
                .map(|p| p.key.chars().count() + p.value.chars().count())
                .max()
                .unwrap_or(0);
            if longest > PROPERTY_TEXT_THRESHOLD {
                let extra = (longest - PROPERTY_TEXT_THRESHOLD) as f64 * PROPERTY_WIDTH_PER_CHAR;
                width += extra.min(PROPERTY_WIDTH_CAP) * scale;
            }
        }
        NodeKind::Array => {
            if !node.collapsed && node.array_length.unwrap_or(0) > 0 {
                height += ARRAY_EXPANDED_HEIGHT * scale;
            }

            let label_len = node.label.chars().count();
            if label_len > LABEL_THRESHOLD {
                let extra = (label_len - LABEL_THRESHOLD) as f64 * LABEL_WIDTH_PER_CHAR;
                width += extra.min(LABEL_WIDTH_CAP) * scale;
            }
        }
    }

    Size::new(width.max(MIN_WIDTH * scale), height.max(MIN_HEIGHT * scale))
}
