//! Typography component.
//!
//! This module provides:
//!
//! - [`Typography`]: A polymorphic wrapper element rendering a
//!   caller-chosen tag with the `typography` base class
//! - [`TypographyAdjustments`]: Reader-tunable font-size and line-length
//!   settings emitted as CSS declarations
//!
//! The component is a thin pass-through: it contributes exactly one
//! class of its own and forwards everything else, leaving the visual
//! meaning of `typography` to the host's stylesheet.

mod adjust;

pub use adjust::TypographyAdjustments;

/// Class every rendered element carries, ahead of caller classes.
pub const BASE_CLASS: &str = "typography";

// HTML elements with no closing tag.
const VOID_TAGS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A polymorphic, class-applying wrapper element.
///
/// Renders as a `div` unless another tag is chosen with
/// [`Typography::as_tag`]. Caller classes are merged after the
/// [`BASE_CLASS`]; attributes are forwarded in insertion order. Text
/// content is escaped; trusted markup goes through [`Typography::raw`]
/// or [`Typography::child`].
///
/// # Example
///
/// ```rust
/// use duotone::Typography;
///
/// let html = Typography::new()
///     .as_tag("p")
///     .class("lead")
///     .attr("id", "intro")
///     .text("Fast & readable")
///     .render();
///
/// assert_eq!(
///     html,
///     r#"<p class="typography lead" id="intro">Fast &amp; readable</p>"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Typography {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    children: String,
}

impl Typography {
    /// Creates an empty `div` wrapper.
    pub fn new() -> Self {
        Self {
            tag: "div".to_string(),
            classes: Vec::new(),
            attributes: Vec::new(),
            children: String::new(),
        }
    }

    /// Renders as `tag` instead of `div`. The tag is used verbatim.
    pub fn as_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Appends a class after the base class.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Forwards an attribute. Values are escaped at render time.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends escaped text content.
    pub fn text(mut self, text: &str) -> Self {
        self.children.push_str(&escape_text(text));
        self
    }

    /// Appends trusted markup without escaping.
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push_str(&markup.into());
        self
    }

    /// Appends a nested element.
    pub fn child(self, child: Typography) -> Self {
        let rendered = child.render();
        self.raw(rendered)
    }

    /// Renders the element markup.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        out.push_str(" class=\"");
        out.push_str(BASE_CLASS);
        for class in &self.classes {
            out.push(' ');
            out.push_str(&escape_attr(class));
        }
        out.push('"');
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) && self.children.is_empty() {
            return out;
        }
        out.push_str(&self.children);
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}
