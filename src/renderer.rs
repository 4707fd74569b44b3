use derive_more::Constructor;
use tracing::{Level, debug, enabled, instrument, trace};

use crate::context;
use crate::continuation::Continuation;
use crate::markup::{Markup, Reference, ReferenceKind};
use crate::options::InspectOptions;
use crate::state::State;
use crate::value::{Tagged, Value};

/// Outcome of asking whether a value may be entered.
#[derive(Debug, Clone)]
pub enum Step {
    /// Recursion is prevented: fall back to a plain summary.
    Native,
    /// The value is one of its own ancestors.
    Circular,
    /// A budget is exhausted: defer the value behind a continuation.
    Limit,
    /// Enter the value with the given state.
    Descend(State),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Native => "native",
            Step::Circular => "circular",
            Step::Limit => "limit",
            Step::Descend(_) => "descend",
        }
    }
}

/// Plain-text header/body renderer driving the traversal state.
///
/// [`Renderer::header`] and [`Renderer::body`] are the entry points a host
/// calls. Both start from a fresh state, or from the state captured in a
/// [`Continuation`] when resuming a deferred subtree.
#[derive(Debug, Clone, Default, Constructor)]
pub struct Renderer {
    options: InspectOptions,
}

impl Renderer {
    pub fn options(&self) -> &InspectOptions {
        &self.options
    }

    #[instrument(level = Level::DEBUG, skip_all, fields(ty = value.ty(), resumed = token.is_some()))]
    pub fn header(&self, value: &Value, token: Option<&Continuation>) -> crate::Result<Markup> {
        let state = token.map(Continuation::restore).unwrap_or_default();
        context::scope(state, || self.render_header(value))
    }

    #[instrument(level = Level::DEBUG, skip_all, fields(ty = value.ty(), resumed = token.is_some()))]
    pub fn body(&self, value: &Value, token: Option<&Continuation>) -> crate::Result<Markup> {
        let state = token.map(Continuation::restore).unwrap_or_default();
        context::scope(self.disclosure(state), || self.render_body(value))
    }

    /// State a body starts from. An exhausted depth budget means the user
    /// opened a deferred subtree, which starts over with fresh limits.
    fn disclosure(&self, state: State) -> State {
        let state = if state.is_depth_exhausted() {
            debug!("depth budget exhausted, resetting limits for a new disclosure");
            state.reset_depth_limits()
        } else {
            state
        };
        let state = state.set_managed_print_level(None);
        match state.depth_budget() {
            Some(_) => state,
            None => state.set_depth_budget(self.options.initial_depth_budget),
        }
    }

    /// Decides how `value` is rendered from `state`: prevented recursion
    /// first, then cycles, then budgets.
    pub fn step(&self, state: &State, value: &Value) -> Step {
        let step = if state.prevent_recursion() {
            Step::Native
        } else if state.is_circular(value) {
            Step::Circular
        } else if state.is_depth_exhausted() || state.is_print_level_exhausted() {
            Step::Limit
        } else {
            Step::Descend(state.descend(value).consume_depth().consume_print_level())
        };
        if enabled!(Level::TRACE) {
            trace!(
                depth_budget = ?state.depth_budget(),
                print_level = ?state.managed_print_level(),
                "{} {}",
                step.name(),
                value.ty()
            );
        }
        step
    }

    fn render_header(&self, value: &Value) -> crate::Result<Markup> {
        match value {
            Value::Vector(_) | Value::Map(_) => self.render_container_header(value),
            Value::Tagged(tagged) => self.render_tagged(tagged),
            scalar => Ok(Markup::text(self.scalar_text(scalar))),
        }
    }

    fn render_container_header(&self, value: &Value) -> crate::Result<Markup> {
        let line_start = context::current()?.managed_print_level().is_none();
        if line_start {
            let level = self.options.max_print_level;
            context::update(|s| s.set_managed_print_level(Some(level)))?;
        }
        let state = context::current()?;
        match self.step(&state, value) {
            Step::Native => Ok(Markup::Native(self.summary(value))),
            Step::Circular => Ok(self.circular(value)),
            Step::Limit => Ok(self.limit(&state, value)),
            Step::Descend(inner) => {
                let inline = context::scope(inner, || self.render_inline(value))?;
                if line_start && !value.is_empty() {
                    Ok(Markup::Reference(Reference::new(
                        ReferenceKind::Expandable,
                        Box::new(inline),
                        value.clone(),
                        Continuation::capture(&state),
                    )))
                } else {
                    Ok(inline)
                }
            }
        }
    }

    fn render_inline(&self, value: &Value) -> crate::Result<Markup> {
        let is_map = matches!(value, Value::Map(_));
        let (open, close, separator) = if is_map {
            ("{", "}", ", ")
        } else {
            ("[", "]", " ")
        };
        let entries = value.entries();
        let shown = entries.len().min(self.options.max_header_elements);
        let mut parts = vec![Markup::text(open)];
        for (index, (key, child)) in entries.iter().take(shown).enumerate() {
            if index > 0 {
                parts.push(Markup::text(separator));
            }
            if is_map {
                parts.push(self.render_header(key)?);
                parts.push(Markup::text(" "));
            }
            parts.push(self.render_header(child)?);
        }
        if entries.len() > shown {
            if shown > 0 {
                parts.push(Markup::text(separator));
            }
            parts.push(Markup::text(self.options.more_marker.as_str()));
        }
        parts.push(Markup::text(close));
        Ok(Markup::Group(parts))
    }

    fn render_tagged(&self, tagged: &Tagged) -> crate::Result<Markup> {
        let state = context::current()?;
        if state.prevent_recursion() {
            return Ok(Markup::Native(self.tagged_summary(tagged)));
        }
        // The tag printer formats its payload itself; nested formatting must
        // not expand it again.
        let inner = context::scope(state.set_prevent_recursion(true), || {
            self.render_header(tagged.value())
        })?;
        Ok(Markup::Group(vec![
            Markup::text(format!("#{} ", tagged.tag())),
            inner,
        ]))
    }

    fn render_body(&self, value: &Value) -> crate::Result<Markup> {
        if !value.is_container() {
            return Ok(Markup::Body(vec![]));
        }
        let state = context::current()?;
        let inner = match self.step(&state, value) {
            Step::Descend(inner) => inner,
            Step::Native => return Ok(Markup::Body(vec![Markup::Native(self.summary(value))])),
            Step::Circular => return Ok(Markup::Body(vec![self.circular(value)])),
            Step::Limit => return Ok(Markup::Body(vec![self.limit(&state, value)])),
        };
        let entries = value.entries();
        let max = self.options.max_body_items;
        let mut lines = Vec::with_capacity(entries.len().min(max) + 1);
        for (key, child) in entries.iter().take(max) {
            let line_state = inner.set_managed_print_level(None);
            let label = context::scope(line_state.clone(), || self.render_header(key))?;
            let item = context::scope(line_state.clone(), || self.render_header(child))?;
            let line = Markup::Group(vec![label, Markup::text(": "), item]);
            lines.push(self.annotate(&line_state, child, line));
        }
        if entries.len() > max {
            lines.push(Markup::text(format!(
                "{} {} more",
                self.options.more_marker,
                entries.len() - max
            )));
        }
        Ok(Markup::Body(lines))
    }

    fn annotate(&self, state: &State, child: &Value, line: Markup) -> Markup {
        if !self.options.render_path_annotations {
            return line;
        }
        match state.extend_path(child).path_info() {
            Some(path) => Markup::Titled {
                title: format!("path: {path}"),
                inner: Box::new(line),
            },
            None => line,
        }
    }

    fn circular(&self, value: &Value) -> Markup {
        debug!("circular reference to {}", value.ty());
        Markup::Circular(Box::new(Markup::Group(vec![
            Markup::text(self.options.circular_marker.as_str()),
            Markup::text(self.abbreviation(value)),
        ])))
    }

    fn limit(&self, state: &State, value: &Value) -> Markup {
        Markup::Reference(Reference::new(
            ReferenceKind::Limit,
            Box::new(Markup::text(self.abbreviation(value))),
            value.clone(),
            Continuation::capture(state),
        ))
    }

    fn abbreviation(&self, value: &Value) -> String {
        let more = &self.options.more_marker;
        match value {
            Value::Vector(_) => format!("[{more}]"),
            Value::Map(_) => format!("{{{more}}}"),
            Value::Tagged(tagged) => format!("#{} {more}", tagged.tag()),
            scalar => self.scalar_text(scalar),
        }
    }

    /// Summary that never looks inside the value.
    fn summary(&self, value: &Value) -> String {
        match value {
            Value::Vector(vector) => format!("#<vector {}>", vector.len()),
            Value::Map(map) => format!("#<map {}>", map.len()),
            Value::Tagged(tagged) => self.tagged_summary(tagged),
            scalar => self.scalar_text(scalar),
        }
    }

    fn tagged_summary(&self, tagged: &Tagged) -> String {
        format!("#{} {}", tagged.tag(), self.summary(tagged.value()))
    }

    fn scalar_text(&self, value: &Value) -> String {
        match value {
            Value::Null => "nil".to_string(),
            Value::Boolean(boolean) => boolean.to_string(),
            Value::Number(number) => number.to_string(),
            Value::String(string) => self.quote(string),
            Value::Keyword(name) => format!(":{name}"),
            Value::Vector(_) | Value::Map(_) | Value::Tagged(_) => self.summary(value),
        }
    }

    fn quote(&self, string: &str) -> String {
        let max = self.options.max_string_length;
        if string.chars().count() > max {
            let head: String = string.chars().take(max).collect();
            format!("\"{head}{}\"", self.options.more_marker)
        } else {
            format!("\"{string}\"")
        }
    }
}
