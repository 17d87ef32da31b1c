//! HTML pages as `RcDom` trees.
//!
//! Rendered documentation pages are rarely well-formed. html5ever's tree
//! builder repairs them the way a browser would: implied end tags are closed,
//! stray `<` is text, named entities are decoded. Nothing here can fail.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, LocalName, ParseOpts};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom};
use regex::Regex;
use std::sync::LazyLock;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9-]*[\s/>]").unwrap());

/// Elements whose content is not markup and never carries visible names.
const RAW_TEXT: &[&str] = &["script", "style", "noscript"];

/// Whether `doc` looks like markup at all.
pub fn looks_like_html(doc: &str) -> bool {
    RE_TAG.is_match(doc)
}

/// A parsed page.
pub struct Page {
    dom: RcDom,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Page { dom }
    }

    /// Visit every node in document order with the elements enclosing it.
    /// Comments and the content of raw-text elements are skipped.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Handle, &Scope),
    {
        let mut scope = Scope::default();
        walk_node(&self.dom.document, &mut scope, visit);
    }

    /// Visible text, one trimmed text node per line.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.walk(&mut |node, _| {
            if let NodeData::Text { contents } = &node.data {
                let contents = contents.borrow();
                let trimmed = contents.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        });
        parts.join("\n")
    }

    /// `href` of every link, in document order.
    pub fn links(&self) -> Vec<String> {
        let mut links = Vec::new();
        self.walk(&mut |node, _| {
            if tag(node) == Some("a") {
                links.extend(attr(node, "href"));
            }
        });
        links
    }
}

fn walk_node<F>(node: &Handle, scope: &mut Scope, visit: &mut F)
where
    F: FnMut(&Handle, &Scope),
{
    let name = match &node.data {
        NodeData::Document => None,
        NodeData::Element { name, .. } => Some(name.local.clone()),
        NodeData::Text { .. } => {
            visit(node, scope);
            return;
        }
        _ => return,
    };
    visit(node, scope);
    if name.as_deref().is_some_and(|n| RAW_TEXT.contains(&n)) {
        return;
    }

    if let Some(name) = &name {
        scope.open.push(name.clone());
    }
    for child in node.children.borrow().iter() {
        walk_node(child, scope, visit);
    }
    if name.is_some() {
        scope.open.pop();
    }
}

// -- Node access --------------------------------------------------------------

/// Lower-case element name, `None` for anything but an element.
pub fn tag(node: &Node) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn attr(node: &Node, key: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == key)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Text of `node` and all its descendants, concatenated.
pub fn inner_text(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } if RAW_TEXT.contains(&&*name.local) => {}
        _ => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
    }
}

// -- Element nesting ----------------------------------------------------------

/// Elements enclosing the node being visited, outermost first.
#[derive(Debug, Default)]
pub struct Scope {
    open: Vec<LocalName>,
}

impl Scope {
    pub fn within(&self, any_of: &[&str]) -> bool {
        self.open.iter().any(|n| any_of.contains(&&**n))
    }
}
