use ego_tree::{NodeId, NodeRef, Tree};
use scraper::node::Node;
use scraper::{Html, Selector};

/// A parsed page with the mutation helpers the injector and watcher need.
///
/// Wraps `scraper::Html`; mutations go through the underlying `ego_tree`
/// nodes. Lookups walk from the root so detached nodes are never observed.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn from_html(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Serializes the current document, reflecting any mutations.
    pub fn html(&self) -> String {
        self.html.root_element().html()
    }

    /// True when an element with this id attribute is attached to the
    /// document.
    pub fn has_element_id(&self, id: &str) -> bool {
        self.find_element_id(id).is_some()
    }

    /// True when the selector matches at least one element.
    pub fn matches(&self, selector: &str) -> bool {
        self.first_match(selector).is_some()
    }

    /// Text content of the first element matching `selector`, children
    /// included, with no whitespace normalization applied.
    pub fn select_first_text(&self, selector: &str) -> Option<String> {
        let parsed = Selector::parse(selector).ok()?;
        self.html
            .select(&parsed)
            .next()
            .map(|element| element.text().collect::<Vec<_>>().join(" "))
    }

    /// Grafts `fragment_html` as the next sibling(s) of the first element
    /// matching `selector`. Returns false when nothing matched.
    pub fn insert_after_first(&mut self, selector: &str, fragment_html: &str) -> bool {
        let Some(anchor) = self.first_match(selector) else {
            return false;
        };
        let fragment = Html::parse_fragment(fragment_html);
        let mut last = anchor;
        for child in fragment.root_element().children() {
            let new_id = self
                .html
                .tree
                .get_mut(last)
                .expect("anchor node exists")
                .insert_after(child.value().clone())
                .id();
            copy_descendants(&mut self.html.tree, new_id, child);
            last = new_id;
        }
        true
    }

    /// Grafts `fragment_html` as the last child(ren) of the first element
    /// matching `selector`. Returns false when nothing matched.
    pub fn append_inside_first(&mut self, selector: &str, fragment_html: &str) -> bool {
        let Some(target) = self.first_match(selector) else {
            return false;
        };
        graft_children(&mut self.html.tree, target, fragment_html);
        true
    }

    /// Appends `fragment_html` to the document body (host-page re-render
    /// feed). Falls back to the root element on body-less documents.
    pub fn append_to_body(&mut self, fragment_html: &str) {
        let target = self
            .first_match("body")
            .unwrap_or_else(|| self.html.root_element().id());
        graft_children(&mut self.html.tree, target, fragment_html);
    }

    /// Detaches the element with this id attribute. Returns false when it
    /// was not attached.
    pub fn remove_element_id(&mut self, id: &str) -> bool {
        let Some(node_id) = self.find_element_id(id) else {
            return false;
        };
        if let Some(mut node) = self.html.tree.get_mut(node_id) {
            node.detach();
            return true;
        }
        false
    }

    fn first_match(&self, selector: &str) -> Option<NodeId> {
        let parsed = Selector::parse(selector).ok()?;
        self.html.select(&parsed).next().map(|element| element.id())
    }

    fn find_element_id(&self, id: &str) -> Option<NodeId> {
        self.html
            .tree
            .root()
            .descendants()
            .find(|node| {
                node.value()
                    .as_element()
                    .is_some_and(|element| element.id() == Some(id))
            })
            .map(|node| node.id())
    }
}

fn graft_children(tree: &mut Tree<Node>, parent: NodeId, fragment_html: &str) {
    let fragment = Html::parse_fragment(fragment_html);
    for child in fragment.root_element().children() {
        let new_id = tree
            .get_mut(parent)
            .expect("graft target exists")
            .append(child.value().clone())
            .id();
        copy_descendants(tree, new_id, child);
    }
}

fn copy_descendants(tree: &mut Tree<Node>, dst: NodeId, src: NodeRef<'_, Node>) {
    for child in src.children() {
        let new_id = tree
            .get_mut(dst)
            .expect("copy target exists")
            .append(child.value().clone())
            .id();
        copy_descendants(tree, new_id, child);
    }
}
