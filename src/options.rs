pub(crate) const MAX_PRINT_LEVEL: u32 = 2;

pub(crate) const INITIAL_DEPTH_BUDGET: u32 = 64;

pub(crate) const MAX_HEADER_ELEMENTS: usize = 5;

pub(crate) const MAX_BODY_ITEMS: usize = 100;

pub(crate) const MAX_STRING_LENGTH: usize = 48;

/// Preferences consumed by the [`Renderer`](crate::renderer::Renderer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectOptions {
    /// Nesting levels shown inline on one header line.
    pub max_print_level: u32,
    /// Structural depth allowed per disclosure, `None` for unlimited.
    pub initial_depth_budget: Option<u32>,
    pub max_header_elements: usize,
    pub max_body_items: usize,
    pub max_string_length: usize,
    pub more_marker: String,
    pub circular_marker: String,
    /// Attach the breadcrumb of every body line as its title.
    pub render_path_annotations: bool,
}

impl InspectOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_max_print_level(mut self, level: u32) -> Self {
        self.max_print_level = level;
        self
    }

    pub fn with_initial_depth_budget(mut self, budget: Option<u32>) -> Self {
        self.initial_depth_budget = budget;
        self
    }

    pub fn with_max_header_elements(mut self, max: usize) -> Self {
        self.max_header_elements = max;
        self
    }

    pub fn with_max_body_items(mut self, max: usize) -> Self {
        self.max_body_items = max;
        self
    }

    pub fn with_max_string_length(mut self, max: usize) -> Self {
        self.max_string_length = max;
        self
    }

    pub fn with_path_annotations(mut self, enabled: bool) -> Self {
        self.render_path_annotations = enabled;
        self
    }
}

impl Default for InspectOptions {
    fn default() -> Self {
        Self {
            max_print_level: MAX_PRINT_LEVEL,
            initial_depth_budget: Some(INITIAL_DEPTH_BUDGET),
            max_header_elements: MAX_HEADER_ELEMENTS,
            max_body_items: MAX_BODY_ITEMS,
            max_string_length: MAX_STRING_LENGTH,
            more_marker: "…".to_string(),
            circular_marker: "∞".to_string(),
            render_path_annotations: true,
        }
    }
}
