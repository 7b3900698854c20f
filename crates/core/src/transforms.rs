//! Content rewrites applied to documentation copied from the upstream Bootstrap tree

/// Inserted between the front matter and the body of every copied reference page
pub const REFERENCE_NOTICE: &str = "\n\n[//]: # DO NOT EDIT IT WILL BE OVERWRITTEN - copy of bootstrap documentation generated by bmd-build docs:copy-bs\n\n{% callout info %}\n**Bootstrap Reference Documentation**\nThis is a part of the reference documentation from <a href=\"http://getbootstrap.com\">Bootstrap</a>.\nIt is included here to demonstrate rendering with Material Design for Bootstrap default styling.\nSee the <a href=\"/material-design/buttons\">Material Design</a> section for more elements and customization options.\n{% endcallout %}\n\n\n";

/// First line of every copied stylesheet partial
pub const STYLESHEET_HEADER: &str =
    "// DO NOT EDIT IT WILL BE OVERWRITTEN - copy of bootstrap documentation generated by bmd-build docs:copy-bs";

const FRONT_MATTER_DELIMITER: &str = "---";

/// A page split around its first `---` delimited block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterDocument<'a> {
    /// Anything before the opening delimiter
    pub prefix: &'a str,
    /// The block including both delimiters
    pub front_matter: &'a str,
    /// Everything after the closing delimiter, never empty
    pub body: &'a str,
}

impl<'a> FrontMatterDocument<'a> {
    /// Split `content` into prefix, front matter and body.
    ///
    /// The block opens at the first `---`, holds at least one character and
    /// closes at the next `---`. Returns `None` when there is no such block or
    /// nothing follows it.
    pub fn parse(content: &'a str) -> Option<Self> {
        let open = content.find(FRONT_MATTER_DELIMITER)?;
        let after_open = open + FRONT_MATTER_DELIMITER.len();
        let first_inner = content[after_open..].chars().next()?;
        let search_from = after_open + first_inner.len_utf8();
        let close = search_from + content[search_from..].find(FRONT_MATTER_DELIMITER)?;
        let end = close + FRONT_MATTER_DELIMITER.len();

        let body = &content[end..];
        if body.is_empty() {
            return None;
        }

        Some(Self {
            prefix: &content[..open],
            front_matter: &content[open..end],
            body,
        })
    }
}

/// Insert [`REFERENCE_NOTICE`] right after the front matter. Content without a
/// front matter block and a body is returned unchanged.
pub fn inject_reference_notice(content: &str) -> String {
    match FrontMatterDocument::parse(content) {
        Some(doc) => format!(
            "{}{}{}{}",
            doc.prefix, doc.front_matter, REFERENCE_NOTICE, doc.body
        ),
        None => content.to_string(),
    }
}

/// `display` headings are a Material Design specific style; the sample text
/// is reworded so it does not suggest otherwise.
pub fn replace_fancy_heading(content: &str) -> String {
    content.replace("Fancy display heading", "Fancy heading")
}

pub fn prepend_stylesheet_header(content: &str) -> String {
    format!("{}\n\n{}", STYLESHEET_HEADER, content)
}

/// Rewrite applied to each file of a copy task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentTransform {
    /// Reference notice followed by the heading rewording
    BootstrapDocs,
    DoNotEditHeader,
}

impl ContentTransform {
    pub fn apply(&self, content: &str) -> String {
        match self {
            ContentTransform::BootstrapDocs => {
                replace_fancy_heading(&inject_reference_notice(content))
            }
            ContentTransform::DoNotEditHeader => prepend_stylesheet_header(content),
        }
    }
}
