use ego_tree::{NodeId, NodeRef};
use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use scraper::{ElementRef, Html, HtmlTreeSink, Node};

pub struct Document {
    html: Html,
}

pub struct Fragment {
    html: Html,
}

impl Fragment {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_fragment(markup),
        }
    }

    // Whitespace-only text is skipped so repeated grafts never pile up blank lines.
    fn top_level(&self) -> Vec<NodeRef<'_, Node>> {
        // Fragment parsing wraps the snippet in a synthetic <html> element.
        self.html
            .root_element()
            .children()
            .filter(|node| match node.value() {
                Node::Text(text) => !text.trim().is_empty(),
                Node::Comment(_) => false,
                _ => true,
            })
            .collect()
    }
}

impl Document {
    // Scripting off so <noscript> content parses as nodes and round-trips.
    pub fn parse(markup: &str) -> Self {
        let opts = ParseOpts {
            tree_builder: TreeBuilderOpts {
                scripting_enabled: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let html = html5ever::parse_document(HtmlTreeSink::new(Html::new_document()), opts)
            .one(markup);

        Self { html }
    }

    pub fn serialize(&self) -> String {
        self.html.html()
    }

    pub fn find_first(&self, tag: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|node| is_element_named(node, tag))
            .map(|node| node.id())
    }

    pub fn find_all(&self, tag: &str) -> Vec<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .filter(|node| is_element_named(node, tag))
            .map(|node| node.id())
            .collect()
    }

    pub fn body(&self) -> Option<NodeId> {
        self.find_first("body")
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.html
            .tree
            .get(id)
            .and_then(|node| node.value().as_element())
            .and_then(|element| element.attr(name))
    }

    pub fn text(&self, id: NodeId) -> String {
        self.html
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .map(|element| element.text().collect())
            .unwrap_or_default()
    }

    pub fn remove(&mut self, id: NodeId) {
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
    }

    pub fn replace_with(&mut self, id: NodeId, fragment: &Fragment) {
        for source in fragment.top_level() {
            let grafted = self.graft(source);
            if let Some(mut target) = self.html.tree.get_mut(id) {
                target.insert_id_before(grafted);
            }
        }
        self.remove(id);
    }

    pub fn prepend_child(&mut self, parent: NodeId, fragment: &Fragment) {
        for source in fragment.top_level().into_iter().rev() {
            let grafted = self.graft(source);
            if let Some(mut target) = self.html.tree.get_mut(parent) {
                target.prepend_id(grafted);
            }
        }
    }

    pub fn append_child(&mut self, parent: NodeId, fragment: &Fragment) {
        for source in fragment.top_level() {
            let grafted = self.graft(source);
            if let Some(mut target) = self.html.tree.get_mut(parent) {
                target.append_id(grafted);
            }
        }
    }

    /// Replaces all children of `id` with a single text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        let children: Vec<NodeId> = match self.html.tree.get(id) {
            Some(node) => node.children().map(|child| child.id()).collect(),
            None => return,
        };
        for child in children {
            self.remove(child);
        }

        let fragment = Fragment::parse(&escape_text(text));
        self.append_child(id, &fragment);
    }

    fn graft(&mut self, source: NodeRef<'_, Node>) -> NodeId {
        let id = self.html.tree.orphan(source.value().clone()).id();
        for child in source.children() {
            let child_id = self.graft(child);
            if let Some(mut parent) = self.html.tree.get_mut(id) {
                parent.append_id(child_id);
            }
        }
        id
    }
}

fn is_element_named(node: &NodeRef<'_, Node>, tag: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name().eq_ignore_ascii_case(tag))
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
