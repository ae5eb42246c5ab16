use boxpack::{BuiltDocument, LayoutDocument, LayoutEngine, Viewport};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds a document from a `json!` fixture and lays it out.
pub fn layout_document(document: Value, viewport: Viewport) -> Result<BuiltDocument, boxpack::BoxpackError> {
    init_logging();
    let document: LayoutDocument = serde_json::from_value(document)?;
    let mut built = document.build()?;
    LayoutEngine::default().layout(&mut built.tree, built.root, &viewport)?;
    Ok(built)
}

/// Absolute content origin and content size of a named node.
pub fn geometry(built: &BuiltDocument, id: &str) -> ((f32, f32), (f32, f32)) {
    let layout = built.layout(id).unwrap_or_else(|| panic!("no node named {}", id));
    (
        (layout.absolute_content_left(), layout.absolute_content_top()),
        (layout.content_width, layout.content_height),
    )
}
